use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{
    config::{Config, ConfigError},
    spotify::SpotifyApi,
};

/// Everything the handlers need, built once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: Arc<dyn SpotifyApi>,
    pub key: Key,
}

impl AppState {
    /// Builds the state and derives the cookie key from `SESSION_SECRET`.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `spotify` - Client the handlers call, a mock in tests
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when `SESSION_SECRET` is set but shorter than 64 bytes.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let spotify: Arc<dyn SpotifyApi> = Arc::new(SpotifyClient::new(&config));
    /// let state = AppState::new(config, spotify)?;
    /// ```
    pub fn new(config: Config, spotify: Arc<dyn SpotifyApi>) -> Result<Self, ConfigError> {
        let key = config.session_key()?;
        Ok(Self {
            config: Arc::new(config),
            spotify,
            key,
        })
    }

    /// Session cookies only get the `Secure` flag when the app is served
    /// over HTTPS, otherwise browsers would drop them on localhost.
    pub fn secure_cookies(&self) -> bool {
        self.config.redirect_uri.starts_with("https://")
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
