use std::path::PathBuf;

use chrono::Utc;

use crate::{
    spotify::{SpotifyApi, SpotifyError},
    types::{AccessToken, Token},
    warning,
};

/// Tokens count as expired this many seconds before Spotify says they are.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Cached token for the terminal mode.
///
/// The web app keeps its token in the session cookie and never touches this.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self, String> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, String> {
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when
    /// it is about to expire.
    ///
    /// Without a refresh token the stale token is returned as is and Spotify
    /// will reject it, which tells the user to run `spotiroast auth` again.
    pub async fn get_valid_token(
        &mut self,
        api: &dyn SpotifyApi,
    ) -> Result<AccessToken, SpotifyError> {
        if self.is_expired(Utc::now().timestamp() as u64) {
            if let Some(refresh_token) = self.token.refresh_token.clone() {
                self.token = api.refresh_token(&refresh_token).await?;
                if let Err(e) = self.persist().await {
                    warning!("Failed to save refreshed token: {}", e);
                }
            }
        }

        Ok(self.token.access())
    }

    fn is_expired(&self, now: u64) -> bool {
        let lifetime = self.token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        now >= self.token.obtained_at + lifetime
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotiroast/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
