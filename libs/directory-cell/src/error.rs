use thiserror::Error;

use shared_models::ApiError;

/// Directory reads propagate to the caller instead of turning into
/// notices; whoever asked for the listing decides how to present failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
