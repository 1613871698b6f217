pub mod auth;
pub mod envelope;
pub mod error;
pub mod listing;
pub mod notice;
pub mod page;

pub use auth::AuthTokens;
pub use envelope::ApiEnvelope;
pub use error::ApiError;
pub use listing::{Listing, Pagination};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use page::Page;
