use chrono::Utc;
use reqwest::{Url, header::AUTHORIZATION};
use serde_json::Value;

use crate::{config::Config, types::Token, utils};

use super::{SpotifyClient, SpotifyError, api_error_message};

/// Builds the Spotify authorization URL the login route redirects to.
///
/// All parameters are URL-encoded; the `state` value comes back on the
/// callback and must be checked there.
///
/// # Example
///
/// ```rust,ignore
/// let url = authorize_url(&config, "k3J9...")?;
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(config: &Config, state: &str) -> Result<String, SpotifyError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| SpotifyError::InvalidUrl(format!("{}: {}", config.auth_url, e)))?;

    Ok(url.into())
}

impl SpotifyClient {
    /// Exchanges an authorization code for an access token.
    ///
    /// Authenticates with the client credentials over HTTP Basic and posts
    /// the code together with the registered redirect URI.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Authorization`] when Spotify answers with an OAuth
    ///   `error` such as `invalid_grant`
    /// - [`SpotifyError::Http`] for transport failures
    /// - [`SpotifyError::Malformed`] when the body is not the expected JSON
    pub async fn exchange_code(&self, code: &str) -> Result<Token, SpotifyError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let json: Value = response
            .json()
            .await
            .map_err(|e| SpotifyError::Malformed(e.to_string()))?;

        parse_token_response(status, &json, None)
    }

    /// Trades a refresh token for a fresh access token.
    ///
    /// Spotify does not always rotate the refresh token, so the one passed in
    /// is kept when the response omits it.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, SpotifyError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let json: Value = response
            .json()
            .await
            .map_err(|e| SpotifyError::Malformed(e.to_string()))?;

        parse_token_response(status, &json, Some(refresh_token))
    }
}

/// Turns a token endpoint response into a [`Token`].
///
/// An `error` field wins over everything else, whatever the status code.
pub fn parse_token_response(
    status: u16,
    json: &Value,
    previous_refresh_token: Option<&str>,
) -> Result<Token, SpotifyError> {
    match json.get("error") {
        Some(Value::String(error)) => {
            return Err(SpotifyError::Authorization {
                error: error.clone(),
                description: json["error_description"]
                    .as_str()
                    .unwrap_or("No description")
                    .to_string(),
            });
        }
        Some(_) => {
            return Err(SpotifyError::Api {
                status,
                message: api_error_message(json),
            });
        }
        None => {}
    }

    let Some(access_token) = json["access_token"].as_str() else {
        if !(200..300).contains(&status) {
            return Err(SpotifyError::Api {
                status,
                message: "Unknown error".to_string(),
            });
        }
        return Err(SpotifyError::Malformed(
            "token response has no access_token".to_string(),
        ));
    };

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .or(previous_refresh_token)
            .map(String::from),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::spotify::mock::FakeSpotify;

    fn test_config() -> Config {
        Config::from_lookup(|key| match key {
            "SPOTIFY_CLIENT_ID" => Some("my-client".to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some("my-secret".to_string()),
            "SPOTIFY_REDIRECT_URI" => Some("http://127.0.0.1:8000/callback".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_authorize_url_encodes_parameters() {
        let url = authorize_url(&test_config(), "abc123").unwrap();
        let parsed = Url::parse(&url).unwrap();

        assert_eq!(parsed.host_str(), Some("accounts.spotify.com"));
        assert_eq!(parsed.path(), "/authorize");

        let params: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert!(params.contains(&("response_type".into(), "code".into())));
        assert!(params.contains(&("client_id".into(), "my-client".into())));
        assert!(params.contains(&(
            "scope".into(),
            "user-read-private user-read-email user-top-read".into()
        )));
        assert!(params.contains(&(
            "redirect_uri".into(),
            "http://127.0.0.1:8000/callback".into()
        )));
        assert!(params.contains(&("state".into(), "abc123".into())));

        // spaces in the scope must not leak into the raw URL
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_authorize_url_rejects_invalid_base() {
        let mut config = test_config();
        config.auth_url = "not a url".to_string();
        assert!(matches!(
            authorize_url(&config, "s"),
            Err(SpotifyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_token_response_success() {
        let json = json!({
            "access_token": "BQC-access",
            "token_type": "Bearer",
            "scope": "user-top-read",
            "expires_in": 3600,
            "refresh_token": "AQD-refresh"
        });

        let token = parse_token_response(200, &json, None).unwrap();
        assert_eq!(token.access_token, "BQC-access");
        assert_eq!(token.refresh_token.as_deref(), Some("AQD-refresh"));
        assert_eq!(token.scope, "user-top-read");
        assert_eq!(token.expires_in, 3600);
        assert!(token.obtained_at > 0);
    }

    #[test]
    fn test_parse_token_response_invalid_grant() {
        let json = json!({"error": "invalid_grant"});
        let err = parse_token_response(400, &json, None).unwrap_err();

        match &err {
            SpotifyError::Authorization { error, description } => {
                assert_eq!(error, "invalid_grant");
                assert_eq!(description, "No description");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[test]
    fn test_parse_token_response_error_with_description() {
        let json = json!({
            "error": "invalid_client",
            "error_description": "Invalid client secret"
        });
        let err = parse_token_response(400, &json, None).unwrap_err();
        assert_eq!(err.to_string(), "invalid_client - Invalid client secret");
    }

    #[test]
    fn test_parse_token_response_keeps_previous_refresh_token() {
        let json = json!({"access_token": "new", "expires_in": 1800});
        let token = parse_token_response(200, &json, Some("old-refresh")).unwrap();
        assert_eq!(token.refresh_token.as_deref(), Some("old-refresh"));
        assert_eq!(token.expires_in, 1800);
        assert_eq!(token.scope, "");
    }

    #[test]
    fn test_parse_token_response_missing_access_token() {
        let err = parse_token_response(200, &json!({}), None).unwrap_err();
        assert!(matches!(err, SpotifyError::Malformed(_)));

        let err = parse_token_response(500, &json!({}), None).unwrap_err();
        assert!(matches!(err, SpotifyError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_exchange_code_posts_form_with_basic_auth() {
        let fake = FakeSpotify::start().await;

        let token = fake.client().exchange_code("abc").await.unwrap();
        assert_eq!(token.access_token, "fake-access");
        assert_eq!(token.refresh_token.as_deref(), Some("fake-refresh"));

        let request = fake.single_request();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/token");
        assert_eq!(
            request.authorization.as_deref(),
            Some(utils::basic_auth_header("client-id", "client-secret").as_str())
        );
        assert!(request.body.contains("grant_type=authorization_code"));
        assert!(request.body.contains("code=abc"));
        let redirect_uri = "redirect_uri=http%3A%2F%2F127.0.0.1%3A8000%2Fcallback";
        assert!(request.body.contains(redirect_uri));
        // the client secret only travels in the header
        assert!(!request.body.contains("client-secret"));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected_code() {
        let fake = FakeSpotify::start().await;

        let err = fake.client().exchange_code("bad").await.unwrap_err();
        assert!(matches!(err, SpotifyError::Authorization { .. }));
        assert_eq!(err.to_string(), "invalid_grant - Invalid authorization code");
    }

    #[tokio::test]
    async fn test_refresh_token_posts_refresh_grant() {
        let fake = FakeSpotify::start().await;

        let token = fake.client().refresh_token("old").await.unwrap();
        assert_eq!(token.access_token, "fake-access");

        let request = fake.single_request();
        assert_eq!(request.path, "/api/token");
        assert!(request.authorization.unwrap().starts_with("Basic "));
        assert!(request.body.contains("grant_type=refresh_token"));
        assert!(request.body.contains("refresh_token=old"));
    }
}
