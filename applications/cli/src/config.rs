/// CLI configuration
use crate::error::{CliError, Result};
use expensify_core::SessionContext;
use expensify_remote::RemoteConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "expensify.toml";

/// Prefix for environment overrides, e.g. `EXPENSIFY_REMOTE__URL`
pub const ENV_PREFIX: &str = "EXPENSIFY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteSettings {
    /// Database root, e.g. `https://my-app.firebaseio.com`
    #[serde(default)]
    pub url: String,

    /// ID token sent as the `auth` query parameter
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Signed-in user whose expenses are read and written
    #[serde(default)]
    pub uid: String,
}

impl AppConfig {
    /// Load configuration from file and process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration, reading environment overrides from `env` instead
    /// of the process environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (EXPENSIFY_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.remote.url.trim().is_empty() {
            return Err(CliError::Config(
                "Remote URL is required (set remote.url or EXPENSIFY_REMOTE__URL)".to_string(),
            ));
        }

        if self.session.uid.trim().is_empty() {
            return Err(CliError::Config(
                "User id is required (set session.uid or EXPENSIFY_SESSION__UID)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            url: self.remote.url.clone(),
            auth_token: self.remote.auth_token.clone().filter(|t| !t.is_empty()),
        }
    }

    pub fn session(&self) -> Result<SessionContext> {
        Ok(SessionContext::new(self.session.uid.trim())?)
    }
}
