use crate::types::{AccessToken, ArtistDetail};

use super::{SpotifyClient, SpotifyError, read_json};

impl SpotifyClient {
    /// Retrieves a single artist (`GET /artists/{id}`).
    ///
    /// The response carries the artist's popularity (0-100) and genre tags,
    /// which is all the roast needs.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Api`] for non-200 responses, e.g. an unknown ID
    /// - [`SpotifyError::Malformed`] when the body lacks the expected fields
    /// - [`SpotifyError::Http`] for network failures
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let artist = client.artist(&token, "0oSGxfWSnnOXhD2fKuz2Gy").await?;
    /// println!("{} is at {}", artist.name, artist.popularity);
    /// ```
    pub async fn artist(
        &self,
        token: &AccessToken,
        artist_id: &str,
    ) -> Result<ArtistDetail, SpotifyError> {
        let response = self
            .http
            .get(format!("{}/artists/{}", self.api_url, artist_id))
            .bearer_auth(token.secret())
            .send()
            .await?;

        read_json(response).await
    }
}
