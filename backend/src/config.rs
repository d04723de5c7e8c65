use std::env;
use tracing::debug;

pub const DATABASE_URL_VAR: &str = "ELECTION_DATABASE_URL";
pub const ADMIN_PASSWORD_VAR: &str = "ELECTION_ADMIN_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    /// Shared admin password, compared in plaintext. There are no admin
    /// accounts, no hashing and no lockout.
    pub admin_password: String,
}

impl Config {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://election.db";
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "admin123";

    pub fn new() -> Self {
        Self {
            database_url: Self::DEFAULT_DATABASE_URL.into(),
            admin_password: Self::DEFAULT_ADMIN_PASSWORD.into(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(url) = env::var(DATABASE_URL_VAR) {
            config.database_url = url;
        }

        match env::var(ADMIN_PASSWORD_VAR) {
            Ok(password) if !password.is_empty() => config.admin_password = password,
            _ => debug!("{} not set, keeping the built-in admin password", ADMIN_PASSWORD_VAR),
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
