//! Business services containing domain logic and use cases.

pub mod booking_service;
pub mod item_service;
pub mod request_service;
pub mod user_service;

// Re-export commonly used types
pub use booking_service::BookingService;
pub use item_service::{ItemService, NewItem, UpdateItem};
pub use request_service::RequestService;
pub use user_service::{UpdateUser, UserService};
