pub mod dates;
pub mod test_utils;

pub use dates::{normalize_date_key, today_key};
