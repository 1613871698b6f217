use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::AuthTokens;

/// Holds the signed-in credentials for one client process. The store is an
/// explicit value passed to whoever needs it; nothing reads tokens from
/// global state. Cloning shares the same underlying session.
///
/// With a backing file the session survives restarts; without one it lives
/// only in memory. File trouble is logged and treated as "no session" so a
/// damaged file never blocks startup.
#[derive(Clone)]
pub struct SessionStore {
    tokens: Arc<RwLock<Option<AuthTokens>>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self { tokens: Arc::new(RwLock::new(None)), file: None }
    }

    pub async fn load(config: &AppConfig) -> Self {
        match &config.session_file {
            Some(path) => Self::from_file(path.clone()).await,
            None => {
                debug!("no session file configured, using in-memory session");
                Self::in_memory()
            }
        }
    }

    pub async fn from_file(path: PathBuf) -> Self {
        let tokens = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<AuthTokens>(&raw) {
                Ok(tokens) => {
                    info!(file = %path.display(), "restored session");
                    Some(tokens)
                }
                Err(err) => {
                    warn!(file = %path.display(), %err, "session file unreadable, ignoring it");
                    None
                }
            },
            Err(_) => {
                debug!(file = %path.display(), "no stored session");
                None
            }
        };
        Self { tokens: Arc::new(RwLock::new(tokens)), file: Some(path) }
    }

    pub async fn set(&self, tokens: AuthTokens) {
        if let Some(path) = &self.file {
            match serde_json::to_string(&tokens) {
                Ok(raw) => {
                    if let Err(err) = tokio::fs::write(path, raw).await {
                        warn!(file = %path.display(), %err, "could not persist session");
                    }
                }
                Err(err) => warn!(%err, "could not serialize session"),
            }
        }
        *self.tokens.write().await = Some(tokens);
    }

    pub async fn clear(&self) {
        *self.tokens.write().await = None;
        if let Some(path) = &self.file {
            if tokio::fs::remove_file(path).await.is_ok() {
                debug!(file = %path.display(), "stored session removed");
            }
        }
        info!("session cleared");
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.access_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }
}
