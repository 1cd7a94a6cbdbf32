//! Test doubles for the Spotify client.
//!
//! [`MockSpotify`] implements [`SpotifyApi`] in memory: it returns canned
//! profiles, tracks and artists and records which calls were made.
//! [`FakeSpotify`] is a local HTTP server answering like the accounts
//! service and the Web API, used to check what [`SpotifyClient`] puts on the
//! wire.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::to_bytes,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::{SpotifyApi, SpotifyClient, SpotifyError};
use crate::{
    config::Config,
    types::{
        AccessToken, AlbumSummary, ArtistDetail, ArtistRef, Popularity, Token, TopTracksResponse,
        Track, UserProfile,
    },
    utils::TimeRange,
};

pub struct MockSpotify {
    /// Profile to return; `None` answers 401
    pub profile: Option<UserProfile>,
    /// Top tracks to return; `None` answers 403
    pub top_tracks: Option<TopTracksResponse>,
    /// Known artists; everything else answers 404
    pub artists: HashMap<String, ArtistDetail>,
    /// OAuth error code and description returned by the token endpoint
    pub token_error: Option<(String, Option<String>)>,
    pub artist_calls: Mutex<Vec<String>>,
    pub exchanged_codes: Mutex<Vec<String>>,
    pub top_tracks_requests: Mutex<Vec<(TimeRange, u32)>>,
}

impl MockSpotify {
    pub fn new() -> Self {
        Self {
            profile: Some(profile("mock-user", "Mock User")),
            top_tracks: Some(TopTracksResponse {
                items: vec![],
                total: Some(0),
            }),
            artists: HashMap::new(),
            token_error: None,
            artist_calls: Mutex::new(Vec::new()),
            exchanged_codes: Mutex::new(Vec::new()),
            top_tracks_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        let total = tracks.len() as u32;
        self.top_tracks = Some(TopTracksResponse {
            items: tracks,
            total: Some(total),
        });
        self
    }

    pub fn with_artist(mut self, id: &str, name: &str, popularity: u32, genres: &[&str]) -> Self {
        self.artists.insert(
            id.to_string(),
            ArtistDetail {
                id: id.to_string(),
                name: name.to_string(),
                popularity,
                genres: genres.iter().map(|g| g.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_token_error(mut self, error: &str, description: Option<&str>) -> Self {
        self.token_error = Some((error.to_string(), description.map(String::from)));
        self
    }

    pub fn failing_profile(mut self) -> Self {
        self.profile = None;
        self
    }

    pub fn failing_top_tracks(mut self) -> Self {
        self.top_tracks = None;
        self
    }

    pub fn artist_calls(&self) -> Vec<String> {
        self.artist_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotifyApi for MockSpotify {
    async fn exchange_code(&self, code: &str) -> Result<Token, SpotifyError> {
        self.exchanged_codes.lock().unwrap().push(code.to_string());
        if let Some((error, description)) = &self.token_error {
            return Err(SpotifyError::Authorization {
                error: error.clone(),
                description: description
                    .clone()
                    .unwrap_or_else(|| "No description".to_string()),
            });
        }
        Ok(token(&format!("token-for-{}", code)))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<Token, SpotifyError> {
        Ok(token(&format!("refreshed-{}", refresh_token)))
    }

    async fn current_user(&self, _token: &AccessToken) -> Result<UserProfile, SpotifyError> {
        self.profile.clone().ok_or(SpotifyError::Api {
            status: 401,
            message: "The access token expired".to_string(),
        })
    }

    async fn top_tracks(
        &self,
        _token: &AccessToken,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopTracksResponse, SpotifyError> {
        self.top_tracks_requests
            .lock()
            .unwrap()
            .push((time_range, limit));
        self.top_tracks.clone().ok_or(SpotifyError::Api {
            status: 403,
            message: "Insufficient client scope".to_string(),
        })
    }

    async fn artist(
        &self,
        _token: &AccessToken,
        artist_id: &str,
    ) -> Result<ArtistDetail, SpotifyError> {
        self.artist_calls
            .lock()
            .unwrap()
            .push(artist_id.to_string());
        self.artists.get(artist_id).cloned().ok_or(SpotifyError::Api {
            status: 404,
            message: "Resource not found".to_string(),
        })
    }
}

pub fn token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: Some("refresh".to_string()),
        scope: "user-top-read".to_string(),
        expires_in: 3600,
        obtained_at: 0,
    }
}

pub fn profile(id: &str, display_name: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        display_name: Some(display_name.to_string()),
        email: None,
        country: Some("AU".to_string()),
        product: Some("premium".to_string()),
        followers: None,
        images: vec![],
    }
}

/// Track as it arrives from the top tracks endpoint, artists not yet annotated.
pub fn track(id: &str, name: &str, artists: &[(&str, &str)]) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        album: Some(AlbumSummary {
            id: Some(format!("{}-album", id)),
            name: format!("{} (Album)", name),
            images: vec![],
        }),
        artists: artists
            .iter()
            .map(|(artist_id, artist_name)| ArtistRef {
                id: Some(artist_id.to_string()),
                name: artist_name.to_string(),
                popularity: Popularity::Unknown,
                genres: vec![],
            })
            .collect(),
        external_urls: None,
    }
}

/// A request as [`FakeSpotify`] received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Local stand-in for `accounts.spotify.com` and `api.spotify.com`.
///
/// Answers on `127.0.0.1` with an OS-assigned port:
///
/// - `POST /api/token`: a token, or `invalid_grant` for the code `bad`
/// - `GET /v1/me`: a profile
/// - `GET /v1/me/top/tracks`: one track by artist `a1`
/// - `GET /v1/artists/a1`: a complete artist
/// - `GET /v1/artists/broken`: `200` with a body missing required fields
/// - anything else: `404` with Spotify's nested error body
pub struct FakeSpotify {
    pub address: SocketAddr,
    pub config: Config,
    requests: Recorded,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        let requests: Recorded = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .fallback(fake_endpoint)
            .with_state(Arc::clone(&requests));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api_url = format!("http://{}/v1", address);
        let token_url = format!("http://{}/api/token", address);
        let config = Config::from_lookup(|key| match key {
            "SPOTIFY_CLIENT_ID" => Some("client-id".to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some("client-secret".to_string()),
            "SPOTIFY_REDIRECT_URI" => Some("http://127.0.0.1:8000/callback".to_string()),
            "SPOTIFY_API_URL" => Some(api_url.clone()),
            "SPOTIFY_API_TOKEN_URL" => Some(token_url.clone()),
            _ => None,
        })
        .unwrap();

        Self {
            address,
            config,
            requests,
        }
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(&self.config)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request received so far.
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request: {:?}", requests);
        requests[0].clone()
    }
}

async fn fake_endpoint(State(requests): State<Recorded>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(String::from),
        authorization: parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from),
        body,
    };
    let bad_code = recorded.body.contains("code=bad");
    requests.lock().unwrap().push(recorded);

    match parts.uri.path() {
        "/api/token" if bad_code => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code"
            })),
        )
            .into_response(),
        "/api/token" => Json(json!({
            "access_token": "fake-access",
            "token_type": "Bearer",
            "scope": "user-top-read",
            "expires_in": 3600,
            "refresh_token": "fake-refresh"
        }))
        .into_response(),
        "/v1/me" => Json(json!({
            "id": "kurt",
            "display_name": "Kurt",
            "country": "US",
            "followers": {"total": 27}
        }))
        .into_response(),
        "/v1/me/top/tracks" => Json(json!({
            "items": [{
                "id": "t1",
                "name": "Lithium",
                "album": {"id": "al1", "name": "Nevermind", "images": []},
                "artists": [{"id": "a1", "name": "Alpha"}]
            }],
            "total": 1
        }))
        .into_response(),
        "/v1/artists/a1" => Json(json!({
            "id": "a1",
            "name": "Alpha",
            "popularity": 64,
            "genres": ["grunge"]
        }))
        .into_response(),
        "/v1/artists/broken" => Json(json!({"id": "broken"})).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"status": 404, "message": "non existing id"}})),
        )
            .into_response(),
    }
}
