//! Spotify Top Tracks Roaster
//!
//! This library logs a user into Spotify, pulls their top tracks, looks up
//! every artist on them and attaches a (deliberately rude) comment to each
//! track based on the artists' popularity and genres.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web app and the local auth callback
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded from the environment and `.env` files
//! - `management` - Token cache for the terminal mode
//! - `roast` - Artist resolution, annotation and the commentary rule table
//! - `server` - Router construction and server start-up
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use spotiroast::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotiroast::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::serve(config).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod roast;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for top-level plumbing using a
/// boxed dynamic error trait object. Library layers return their own typed
/// errors, which convert into this through `?`.
///
/// # Example
///
/// ```
/// use spotiroast::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```rust,ignore
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```rust,ignore
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only the
/// command-line layer uses it; library code returns errors instead.
///
/// # Example
///
/// ```rust,ignore
/// error!("Failed to load configuration");
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, such as a single artist lookup failing
/// while the rest of the page still renders.
///
/// # Example
///
/// ```rust,ignore
/// warning!("Error fetching artist details for ID {}: {}", id, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
