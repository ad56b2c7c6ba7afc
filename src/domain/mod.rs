pub mod building;
pub mod rent;
pub mod review;
pub mod review_form;
pub mod theme;

pub use building::{BuildingListItem, BuildingSummary};
pub use rent::RentType;
pub use review::{ReviewListItem, ReviewSummary};
