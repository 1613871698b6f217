use thiserror::Error;

use shared_models::ApiError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Engine is not running: {0}")]
    Dispatch(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl BookingError {
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
