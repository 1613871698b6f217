pub mod error;
pub mod models;
pub mod services;

pub use error::DirectoryError;
pub use models::{Doctor, Specialty};
pub use services::DirectoryService;
