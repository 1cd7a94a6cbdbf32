use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::{roast, types::AccessToken, utils::TimeRange};

use super::{AppState, WebError, pages, session::TOKEN_COOKIE};

/// Query of `/profile`; `time_range` falls back to the configured default.
#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    time_range: Option<TimeRange>,
}

/// `GET /profile`: the logged in user's profile and roasted top tracks.
///
/// Without a session the user is sent to `/login`.
///
/// # Returns
///
/// The rendered profile page, or a redirect to `/login`.
///
/// # Errors
///
/// [`WebError::Report`] when the profile or top tracks request fails. A
/// rejected token keeps Spotify's `401`; other failures give `502`.
///
/// # Example
///
/// ```text
/// GET /profile?time_range=long_term
/// ```
pub async fn profile(
    State(app): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<ProfileParams>,
) -> Result<Response, WebError> {
    let Some(cookie) = jar.get(TOKEN_COOKIE) else {
        return Ok(Redirect::to("/login").into_response());
    };
    let token = AccessToken::new(cookie.value());

    let time_range = params.time_range.unwrap_or(app.config.time_range);
    let report = roast::build_report(
        app.spotify.as_ref(),
        &token,
        time_range,
        app.config.top_tracks_limit,
    )
    .await?;

    Ok(Html(pages::profile_page(&report, time_range)).into_response())
}
