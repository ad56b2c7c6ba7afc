pub mod buildings;
pub mod error;
pub mod home;
pub mod reviews;

pub use buildings::{building_feed_fragment, buildings_page, BuildingsVm};
pub use error::error_page;
pub use home::home_page;
pub use reviews::{review_feed_fragment, reviews_page, ReviewsVm};
