//! Environment-based configuration
//!
//! Two knobs, both optional: `PORT` (default 3000) and `MONGODB_URI`
//! (default `mongodb://localhost:27017/hotel-booking`). The database name is
//! taken from the URI path when present.

use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/hotel-booking";

/// Database used when the connection URI carries no path segment.
pub const DEFAULT_DATABASE: &str = "hotel-booking";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mongodb_uri: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("MONGODB_URI").ok())
    }

    /// Resolve configuration from raw variable values.
    ///
    /// An unparseable `PORT` falls back to the default.
    fn from_vars(port: Option<String>, mongodb_uri: Option<String>) -> Self {
        let port = port
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let mongodb_uri = mongodb_uri.unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());

        Self { port, mongodb_uri }
    }
}
