use std::net::SocketAddr;

use axum_extra::extract::cookie::Key;
use clap::Args;

/// Shortest secret accepted for signing flash cookies.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SECRET_KEY must be at least 32 bytes long")]
    SecretTooShort,
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "restaurantmenu.db")]
    pub database_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Secret used to sign session cookies
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

impl ServeArgs {
    pub fn cookie_key(&self) -> Result<Key, ConfigError> {
        if self.secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort);
        }
        Ok(Key::derive_from(self.secret_key.as_bytes()))
    }
}
