use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RECONCILE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub reconcile_delay_ms: u64,
    pub session_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CAREBOOK_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CAREBOOK_API_BASE_URL not set, using default");
                    DEFAULT_API_BASE_URL.to_string()
                }),
            request_timeout_secs: parse_var("CAREBOOK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            reconcile_delay_ms: parse_var("CAREBOOK_RECONCILE_DELAY_MS", DEFAULT_RECONCILE_DELAY_MS),
            session_file: env::var("CAREBOOK_SESSION_FILE").ok().map(PathBuf::from),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - running against the default local backend");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && self.api_base_url != DEFAULT_API_BASE_URL
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn reconcile_delay(&self) -> Duration {
        Duration::from_millis(self.reconcile_delay_ms)
    }
}

fn parse_var(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a number, using default", name);
            default
        }),
        Err(_) => default,
    }
}
