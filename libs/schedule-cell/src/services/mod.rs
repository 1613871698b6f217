pub mod engine;
pub mod schedule;
pub mod store;

pub use engine::ScheduleEngine;
pub use schedule::ScheduleService;
pub use store::{ScheduleState, ScheduleStore};
