use crate::{
    types::{AccessToken, TopTracksResponse, UserProfile},
    utils::TimeRange,
};

use super::{SpotifyClient, SpotifyError, read_json};

impl SpotifyClient {
    /// Retrieves the profile of the user the token belongs to (`GET /me`).
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Api`] for any non-200 status, with Spotify's
    /// error message attached (for example "The access token expired").
    pub async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, SpotifyError> {
        let response = self
            .http
            .get(format!("{}/me", self.api_url))
            .bearer_auth(token.secret())
            .send()
            .await?;

        read_json(response).await
    }

    /// Retrieves the user's top tracks (`GET /me/top/tracks`).
    ///
    /// # Arguments
    ///
    /// * `token` - Access token of the user
    /// * `time_range` - Window the ranking is computed over
    /// * `limit` - Number of tracks to return (1-50)
    pub async fn top_tracks(
        &self,
        token: &AccessToken,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopTracksResponse, SpotifyError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(format!("{}/me/top/tracks", self.api_url))
            .query(&[
                ("time_range", time_range.as_str()),
                ("limit", limit.as_str()),
            ])
            .bearer_auth(token.secret())
            .send()
            .await?;

        read_json(response).await
    }
}
