use chrono::Utc;

/// Reduces whatever date representation the backend sends to the plain
/// `YYYY-MM-DD` key used for grouping and comparisons. The backend emits
/// both bare dates and full timestamps (`T`- or space-separated) for the
/// same field, so every comparison must go through here first. Applying
/// the function twice changes nothing.
pub fn normalize_date_key(raw: &str) -> String {
    raw.split(['T', ' ']).next().unwrap_or(raw).to_string()
}

/// Today as a `YYYY-MM-DD` key.
pub fn today_key() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
