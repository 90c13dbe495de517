use std::env;
use std::sync::Arc;

/// Runtime configuration, loaded once at startup and injected through
/// `AppState` instead of being read ad hoc from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub test_mode: bool,
    pub signature_key: String,
    pub imgbb_api_key: String,
    pub imgbb_upload_url: String,
    pub webhook_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            test_mode: env::var("ENABLE_TEST_MODE")
                .map(|v| v == "true")
                .unwrap_or(false),
            signature_key: env::var("QRIS_SIGNATURE_KEY")
                .unwrap_or_else(|_| "@Sincem2k".to_string()),
            imgbb_api_key: env::var("IMGBB_API_KEY").unwrap_or_default(),
            imgbb_upload_url: env::var("IMGBB_UPLOAD_URL")
                .unwrap_or_else(|_| "https://api.imgbb.com/1/upload".to_string()),
            // Empty URL disables webhook forwarding
            webhook_url: env::var("WEBHOOK_URL").unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(Config::from_env())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
