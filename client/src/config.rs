//! Client configuration.
//!
//! Natively, values come from the environment (a `.env` file is honoured).
//! In the browser the API url is fixed at build time.

use payloads::{APIClient, UserId};
use std::path::PathBuf;

pub const API_URL_VAR: &str = "UPNEXT_API_URL";
pub const STORE_PATH_VAR: &str = "UPNEXT_STORE_PATH";
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
/// Single-user model: every session acts as this user.
pub const DEFAULT_USER_ID: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Directory for the persisted store; `None` picks the platform default.
    pub store_dir: Option<PathBuf>,
    pub user_id: UserId,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            store_dir: None,
            user_id: UserId::from(DEFAULT_USER_ID),
        }
    }
}

impl ClientConfig {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        use std::env::var;

        // silently ignore a missing .env file
        let _ = dotenvy::dotenv();

        Self {
            api_base_url: var(API_URL_VAR)
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            store_dir: var(STORE_PATH_VAR).ok().map(PathBuf::from),
            ..Self::default()
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self {
            api_base_url: option_env!("UPNEXT_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            ..Self::default()
        }
    }

    pub fn api_client(&self) -> APIClient {
        APIClient::new(self.api_base_url.clone())
    }

    /// Where the persisted store lives on this machine.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("upnext"))
                .unwrap_or_else(|| PathBuf::from(".upnext"))
        })
    }
}
