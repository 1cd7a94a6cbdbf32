use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::{
    Res,
    api::{self, AppState, SharedPendingAuth},
    config::Config,
    info,
    spotify::{SpotifyApi, SpotifyClient},
};

/// Routes of the web app.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/profile", get(api::profile))
        .route("/logout", get(api::logout))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Runs the web app until the process is stopped.
pub async fn serve(config: Config) -> Res<()> {
    let address = config.server_address;
    let spotify: Arc<dyn SpotifyApi> = Arc::new(SpotifyClient::new(&config));
    let state = AppState::new(config, spotify)?;

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on http://{}", address);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Routes of the callback server `spotiroast auth` runs.
///
/// # Arguments
///
/// * `state` - Application state holding the Spotify client
/// * `pending` - The login in progress; the callback stores the token here
pub fn auth_router(state: AppState, pending: SharedPendingAuth) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/callback",
            get(api::auth_callback).layer(Extension(pending)),
        )
        .with_state(state)
}

/// Serves only the OAuth callback, for the terminal login.
pub async fn start_auth_server(state: AppState, pending: SharedPendingAuth) -> Res<()> {
    let address = state.config.server_address;
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, auth_router(state, pending)).await?;
    Ok(())
}
