use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{types::PendingAuth, warning};

use super::{
    AppState, WebError,
    session::{STATE_COOKIE, TOKEN_COOKIE, removal_cookie, session_cookie},
};

/// Login started by `spotiroast auth`, shared with the callback handler.
pub type SharedPendingAuth = Arc<Mutex<Option<PendingAuth>>>;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

impl CallbackParams {
    /// The authorization code, logging Spotify's reason when there is none.
    fn code(&self) -> Option<&str> {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => Some(code),
            _ => {
                if let Some(error) = &self.error {
                    warning!("Spotify did not authorize the login: {}", error);
                }
                None
            }
        }
    }
}

/// Finishes the browser login: checks the `state`, trades the code for a
/// token and keeps it in the session.
pub async fn callback(
    State(app): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(PrivateCookieJar, Redirect), WebError> {
    let code = params.code().ok_or(WebError::MissingCode)?;

    let expected = jar
        .get(STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    match (expected.as_deref(), params.state.as_deref()) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(WebError::InvalidState),
    }

    let token = app.spotify.exchange_code(code).await.map_err(|e| {
        warning!("Token exchange failed: {}", e);
        WebError::TokenExchange(e)
    })?;

    let jar = jar.remove(removal_cookie(STATE_COOKIE)).add(session_cookie(
        TOKEN_COOKIE,
        token.access_token,
        app.secure_cookies(),
    ));
    Ok((jar, Redirect::to("/profile")))
}

/// Callback used while `spotiroast auth` waits for the browser.
pub async fn auth_callback(
    State(app): State<AppState>,
    Extension(pending): Extension<SharedPendingAuth>,
    Query(params): Query<CallbackParams>,
) -> Html<&'static str> {
    let Some(code) = params.code() else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut pending = pending.lock().await;
    let Some(pending_auth) = pending.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    if params.state.as_deref() != Some(pending_auth.state.as_str()) {
        return Html("<h4>Invalid OAuth state.</h4>");
    }

    match app.spotify.exchange_code(code).await {
        Ok(token) => {
            pending_auth.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
