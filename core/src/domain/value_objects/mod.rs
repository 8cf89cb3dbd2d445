//! Value objects assembled by the service layer.

pub mod item_details;

pub use item_details::{CommentDetails, ItemDetails};
