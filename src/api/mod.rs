//! # API Module
//!
//! HTTP handlers for the web app and for the local callback the terminal
//! login listens on.
//!
//! ## Endpoints
//!
//! - [`home`] - landing page with a login link
//! - [`login`] - stores a fresh OAuth `state` in the session and redirects to
//!   Spotify's authorization page
//! - [`callback`] - checks the `state`, exchanges the authorization code and
//!   keeps the access token in the session
//! - [`profile`] - the user's profile and their roasted top tracks
//! - [`logout`] - drops the session
//! - [`health`] - status and version for monitoring
//! - [`auth_callback`] - callback used by `spotiroast auth`
//!
//! ## Sessions
//!
//! The session lives in private (encrypted and authenticated) cookies. The
//! key comes from [`AppState`], so a tampered or foreign cookie simply reads
//! as "not logged in".
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use spotiroast::{api::AppState, server};
//!
//! let state = AppState::new(config, spotify)?;
//! let app = server::router(state);
//! ```

mod callback;
mod error;
mod health;
mod pages;
mod profile;
mod session;
mod state;

pub use callback::{CallbackParams, SharedPendingAuth, auth_callback, callback};
pub use error::WebError;
pub use health::health;
pub use profile::{ProfileParams, profile};
pub use session::{STATE_COOKIE, TOKEN_COOKIE, home, login, logout};
pub use state::AppState;
