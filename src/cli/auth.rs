use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{
    api::{AppState, SharedPendingAuth},
    config::Config,
    error,
    management::TokenManager,
    server::start_auth_server,
    spotify::{SpotifyApi, SpotifyClient, auth::authorize_url},
    success,
    types::{PendingAuth, Token},
    utils, warning,
};

/// How long the terminal login waits for the browser to come back.
const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Logs in through the browser and caches the token for `spotiroast roast`.
///
/// Starts a callback-only server on the configured address, opens the
/// authorization page and waits for the callback to deliver a token.
pub async fn auth(config: Config) {
    let spotify: Arc<dyn SpotifyApi> = Arc::new(SpotifyClient::new(&config));
    let state = match AppState::new(config, spotify) {
        Ok(state) => state,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let oauth_state = utils::generate_state();
    let auth_url = match authorize_url(&state.config, &oauth_state) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    };

    let pending: SharedPendingAuth = Arc::new(Mutex::new(Some(PendingAuth {
        state: oauth_state,
        token: None,
    })));

    let server_pending = Arc::clone(&pending);
    tokio::spawn(async move {
        if let Err(e) = start_auth_server(state, server_pending).await {
            warning!("Callback server stopped. Err: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(pending, AUTH_TIMEOUT).await {
        Some(token) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls `pending` once a second until the callback stored a token or
/// `max_wait` has passed.
async fn wait_for_token(pending: SharedPendingAuth, max_wait: Duration) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = pending.lock().await;
            if let Some(token) = lock.as_ref().and_then(|auth| auth.token.as_ref()) {
                return Some(token.clone());
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
