//! # Spotify Integration Module
//!
//! Everything that talks to the Spotify Web API lives here. The rest of the
//! crate only sees the [`SpotifyApi`] trait, so request handlers and the roast
//! pipeline receive the fetch capability explicitly and tests can swap in a
//! mock.
//!
//! ## Modules
//!
//! - [`auth`] - authorize URL, authorization-code exchange and token refresh
//! - [`profile`] - current user profile and top tracks
//! - [`artists`] - single artist lookups
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and refresh (HTTP Basic client auth)
//! - `GET /me` - current user profile
//! - `GET /me/top/tracks` - top tracks for a time range
//! - `GET /artists/{id}` - artist popularity and genres
//!
//! ## Errors
//!
//! Every call returns [`SpotifyError`]. Non-200 responses carry the status and
//! the message extracted from Spotify's error body; nothing is retried.

pub mod artists;
pub mod auth;
pub mod profile;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::Config,
    types::{AccessToken, ArtistDetail, Token, TopTracksResponse, UserProfile},
    utils::TimeRange,
};

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    /// The token endpoint answered with an OAuth `error` code.
    #[error("{error} - {description}")]
    Authorization { error: String, description: String },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Malformed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SpotifyError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SpotifyError::Api { status, .. } => Some(*status),
            SpotifyError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// The Spotify operations the application depends on.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchanges an authorization code for a token.
    async fn exchange_code(&self, code: &str) -> Result<Token, SpotifyError>;

    async fn refresh_token(&self, refresh_token: &str) -> Result<Token, SpotifyError>;

    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, SpotifyError>;

    async fn top_tracks(
        &self,
        token: &AccessToken,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopTracksResponse, SpotifyError>;

    /// Looks up one artist's popularity and genres.
    async fn artist(
        &self,
        token: &AccessToken,
        artist_id: &str,
    ) -> Result<ArtistDetail, SpotifyError>;
}

/// HTTP client for the Spotify Web API and accounts service.
pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            token_url: config.token_url.clone(),
            api_url: config.api_url.clone(),
        }
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Result<Token, SpotifyError> {
        self.exchange_code(code).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<Token, SpotifyError> {
        self.refresh_token(refresh_token).await
    }

    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, SpotifyError> {
        self.current_user(token).await
    }

    async fn top_tracks(
        &self,
        token: &AccessToken,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopTracksResponse, SpotifyError> {
        self.top_tracks(token, time_range, limit).await
    }

    async fn artist(
        &self,
        token: &AccessToken,
        artist_id: &str,
    ) -> Result<ArtistDetail, SpotifyError> {
        self.artist(token, artist_id).await
    }
}

/// Decodes a `200 OK` JSON body, turning any other status into
/// [`SpotifyError::Api`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SpotifyError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status != StatusCode::OK {
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        return Err(SpotifyError::Api {
            status: status.as_u16(),
            message: api_error_message(&json),
        });
    }

    serde_json::from_slice(&body).map_err(|e| SpotifyError::Malformed(e.to_string()))
}

/// Pulls a readable message out of a Spotify error body.
///
/// The Web API nests it (`{"error": {"status": 401, "message": "..."}}`), the
/// accounts service uses a flat code (`{"error": "invalid_grant"}`).
pub fn api_error_message(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string(),
        _ => "Unknown error".to_string(),
    }
}
