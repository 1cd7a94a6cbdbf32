//! # CLI Module
//!
//! Terminal front end. The web app is one command among several; the others
//! run the same roast without a browser session.
//!
//! ## Commands
//!
//! - [`serve`] - runs the web app
//! - [`auth`] - logs in through the browser and caches the token locally
//! - [`roast`] - prints the roast of the cached user's top tracks
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotiroast serve                          # web app on SERVER_ADDRESS
//! spotiroast auth                           # cache a token for the terminal
//! spotiroast roast --time-range long        # table of all-time top tracks
//! spotiroast roast --limit 10 --json        # raw report
//! ```
//!
//! Failures at this level are reported with `error!`, which ends the process.

mod auth;
mod roast;
mod serve;

pub use auth::auth;
pub use roast::roast;
pub use serve::serve;
