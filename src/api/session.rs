use axum::{
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

use crate::{spotify::auth, utils};

use super::{AppState, WebError, pages};

/// Access token of the logged in user.
pub const TOKEN_COOKIE: &str = "spotify_token";
/// OAuth `state` handed out by `/login`, checked by `/callback`.
pub const STATE_COOKIE: &str = "oauth_state";

/// Private session cookie valid for the whole site.
pub(crate) fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// `GET /`: landing page.
///
/// A token cookie that does not decrypt with the current key counts as
/// logged out.
pub async fn home(jar: PrivateCookieJar) -> Html<String> {
    Html(pages::home_page(jar.get(TOKEN_COOKIE).is_some()))
}

/// `GET /login`: starts the authorization code flow.
///
/// Generates a fresh OAuth `state`, stores it in a private cookie and
/// redirects to Spotify's authorization page with it.
///
/// # Returns
///
/// The updated cookie jar and a `303 See Other` to Spotify.
///
/// # Errors
///
/// [`WebError::Login`] when the configured authorize URL is invalid.
pub async fn login(
    State(app): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Redirect), WebError> {
    let oauth_state = utils::generate_state();
    let url = auth::authorize_url(&app.config, &oauth_state).map_err(WebError::Login)?;

    let jar = jar.add(session_cookie(
        STATE_COOKIE,
        oauth_state,
        app.secure_cookies(),
    ));
    Ok((jar, Redirect::to(&url)))
}

/// `GET /logout`: drops the session cookies and goes back to `/`.
pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    let jar = jar
        .remove(removal_cookie(TOKEN_COOKIE))
        .remove(removal_cookie(STATE_COOKIE));
    (jar, Redirect::to("/"))
}
