//! Configuration management for spotiroast.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. Everything is read once into a [`Config`] at start-up and passed
//! down explicitly; nothing else in the crate reads the environment.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, net::SocketAddr, path::PathBuf};

use axum_extra::extract::cookie::Key;

use crate::utils::{TimeRange, parse_time_range};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-top-read";
pub const DEFAULT_TOP_TRACKS_LIMIT: u32 = 50;

/// Spotify refuses `limit` values outside this range on the top items endpoint.
pub const MAX_TOP_TRACKS_LIMIT: u32 = 50;

/// Minimum length of `SESSION_SECRET`, dictated by the cookie signing key.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Loads environment variables from a `.env` file.
///
/// Looks in the platform-specific local data directory first
/// (`~/.local/share/spotiroast/.env` on Linux) and creates that directory if
/// needed. When no file exists there, a `.env` in the working directory is
/// tried instead. Having neither is fine: the variables may already be set in
/// the process environment.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
        return Ok(());
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotiroast/.env");
    path
}

/// Application configuration, built once at start-up.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub server_address: SocketAddr,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
    pub time_range: TimeRange,
    pub top_tracks_limit: u32,
    pub session_secret: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let server_address = get("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "SERVER_ADDRESS",
                reason: e.to_string(),
            })?;

        let time_range = match get("TOP_TRACKS_TIME_RANGE") {
            Some(value) => parse_time_range(&value).map_err(|reason| ConfigError::Invalid {
                key: "TOP_TRACKS_TIME_RANGE",
                reason,
            })?,
            None => TimeRange::default(),
        };

        let top_tracks_limit = match get("TOP_TRACKS_LIMIT") {
            Some(value) => parse_limit(&value).map_err(|reason| ConfigError::Invalid {
                key: "TOP_TRACKS_LIMIT",
                reason,
            })?,
            None => DEFAULT_TOP_TRACKS_LIMIT,
        };

        let session_secret = get("SESSION_SECRET");
        if let Some(secret) = &session_secret {
            if secret.len() < MIN_SESSION_SECRET_LEN {
                return Err(ConfigError::Invalid {
                    key: "SESSION_SECRET",
                    reason: format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
                });
            }
        }

        Ok(Config {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            server_address,
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            time_range,
            top_tracks_limit,
            session_secret,
        })
    }

    /// Key that encrypts the session cookies.
    ///
    /// Derived from `SESSION_SECRET` when set, otherwise random, which means
    /// sessions do not survive a restart.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        match &self.session_secret {
            Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| ConfigError::Invalid {
                key: "SESSION_SECRET",
                reason: e.to_string(),
            }),
            None => Ok(Key::generate()),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .field("server_address", &self.server_address)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("scope", &self.scope)
            .field("time_range", &self.time_range)
            .field("top_tracks_limit", &self.top_tracks_limit)
            .field(
                "session_secret",
                &self.session_secret.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

/// Parses a top tracks `limit`, accepting 1 through 50.
pub fn parse_limit(value: &str) -> Result<u32, String> {
    let limit = value
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("'{}' is not a number: {}", value, e))?;
    if limit == 0 || limit > MAX_TOP_TRACKS_LIMIT {
        return Err(format!(
            "{} is out of range; expected 1 to {}",
            limit, MAX_TOP_TRACKS_LIMIT
        ));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("SPOTIFY_CLIENT_ID", "client-id"),
        ("SPOTIFY_CLIENT_SECRET", "client-secret"),
        ("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:8000/callback"),
    ];

    #[test]
    fn test_defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.client_id, "client-id");
        assert_eq!(config.server_address.to_string(), DEFAULT_SERVER_ADDRESS);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.scope, DEFAULT_SCOPE);
        assert_eq!(config.time_range, TimeRange::ShortTerm);
        assert_eq!(config.top_tracks_limit, 50);
        assert!(config.session_secret.is_none());
    }

    #[test]
    fn test_missing_credential_is_named() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SPOTIFY_REDIRECT_URI")));
        assert_eq!(err.to_string(), "SPOTIFY_REDIRECT_URI must be set");
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("SPOTIFY_CLIENT_ID", "   ");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SPOTIFY_CLIENT_ID")));
    }

    #[test]
    fn test_overrides_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SERVER_ADDRESS", "127.0.0.1:9000"));
        pairs.push(("SPOTIFY_API_URL", "http://localhost:1234/v1/"));
        pairs.push(("TOP_TRACKS_TIME_RANGE", "long-term"));
        pairs.push(("TOP_TRACKS_LIMIT", "10"));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.server_address.port(), 9000);
        assert_eq!(config.api_url, "http://localhost:1234/v1");
        assert_eq!(config.time_range, TimeRange::LongTerm);
        assert_eq!(config.top_tracks_limit, 10);
    }

    #[test]
    fn test_limit_out_of_range_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TOP_TRACKS_LIMIT", "51"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "TOP_TRACKS_LIMIT",
                ..
            }
        ));

        assert!(parse_limit("0").is_err());
        assert!(parse_limit("abc").is_err());
        assert_eq!(parse_limit(" 25 ").unwrap(), 25);
    }

    #[test]
    fn test_short_session_secret_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SESSION_SECRET", "too-short"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "SESSION_SECRET",
                ..
            }
        ));
    }

    #[test]
    fn test_session_key_from_secret() {
        let secret = "x".repeat(MIN_SESSION_SECRET_LEN);
        let mut pairs: Vec<(&str, &str)> = REQUIRED.to_vec();
        pairs.push(("SESSION_SECRET", secret.as_str()));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        let first = config.session_key().unwrap();
        let second = config.session_key().unwrap();
        assert_eq!(first.master(), second.master());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("client-secret"));
        assert!(debug.contains("client-id"));
    }
}
