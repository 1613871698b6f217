pub mod error;
pub mod grouping;
pub mod models;
pub mod services;

pub use error::BookingError;
pub use grouping::{group_by_specialty_room, SpecialtyRoomGroup};
pub use models::{Booking, BookingStatus, FamilyMember, NewBooking, QueueInfo};
pub use services::{BookingEngine, BookingService, BookingState, BookingStore};
