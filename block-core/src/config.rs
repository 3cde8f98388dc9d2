use std::env;

use thiserror::Error;

/// Environment variable holding the bot token.
pub const TOKEN_VAR: &str = "DISCORD_TOKEN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Set {TOKEN_VAR} as an environment variable before starting the bot.")]
    MissingToken,
}

/// Startup configuration read from the process environment.
#[derive(Clone)]
pub struct Config {
    pub token: String,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_token(env::var(TOKEN_VAR).ok())
    }

    fn from_token(token: Option<String>) -> Result<Self, ConfigError> {
        let token = token
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self { token })
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config").field("token", &"<redacted>").finish()
    }
}
