use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{roast::ReportError, spotify::SpotifyError};

use super::pages;

/// Errors shown to the user as an error page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Error: Missing authorization code.")]
    MissingCode,

    #[error("Error: Invalid OAuth state.")]
    InvalidState,

    #[error("Error: {0}")]
    TokenExchange(#[source] SpotifyError),

    #[error("Error: {0}")]
    Login(#[source] SpotifyError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::MissingCode | WebError::InvalidState => StatusCode::BAD_REQUEST,
            WebError::TokenExchange(SpotifyError::Authorization { .. }) => StatusCode::BAD_REQUEST,
            // An expired session token surfaces as 401 from Spotify
            WebError::Report(e) if e.spotify_error().status() == Some(401) => {
                StatusCode::UNAUTHORIZED
            }
            WebError::TokenExchange(_) | WebError::Report(_) => StatusCode::BAD_GATEWAY,
            WebError::Login(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status(), Html(pages::error_page(&self.to_string()))).into_response()
    }
}
