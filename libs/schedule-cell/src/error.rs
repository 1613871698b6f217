use thiserror::Error;

use shared_models::ApiError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No appointment group is selected")]
    NoSelection,

    #[error("No time slot is being edited")]
    NoEditingSession,

    #[error("Time slot {0} is no longer in the schedule")]
    TargetMissing(i64),

    #[error("Time slot still has {booked} booked patients")]
    HasBookedPatients { booked: i32 },

    #[error("Engine is not running: {0}")]
    Dispatch(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ScheduleError {
    pub fn user_message(&self) -> String {
        match self {
            ScheduleError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
