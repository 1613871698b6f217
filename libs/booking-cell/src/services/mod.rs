pub mod booking;
pub mod engine;
pub mod store;

pub use booking::BookingService;
pub use engine::BookingEngine;
pub use store::{BookingState, BookingStore};
