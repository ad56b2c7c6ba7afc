pub mod building_row;
pub mod error;
pub mod feed;
pub mod filters;
pub mod panel;
pub mod review_card;

pub use building_row::building_row;
pub use error::error_notice;
pub use feed::{feed_end, feed_error, feed_sentinel};
pub use filters::{building_filters, review_filters};
pub use panel::panel;
pub use review_card::review_card;
