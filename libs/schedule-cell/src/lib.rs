pub mod catalog;
pub mod error;
pub mod grouping;
pub mod models;
pub mod services;

pub use error::ScheduleError;
pub use models::{
    AppointmentSlot, AvailableSlot, NewSlot, ScheduleFilter, SlotGroup, SlotPatch,
    DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY,
};
pub use services::{ScheduleEngine, ScheduleService, ScheduleState, ScheduleStore};
