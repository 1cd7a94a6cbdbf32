//! # Roast Pipeline
//!
//! Turns a top tracks payload into one comment per track:
//!
//! ```text
//! top tracks ─► distinct artist IDs ─► artist lookups ─► annotate artists ─► rule table
//! ```
//!
//! - [`resolver`] - deduplicates artist IDs and fetches each one once
//! - [`annotate`] - copies popularity and genres back onto the tracks
//! - [`rules`] - the ordered commentary rule table
//!
//! Only the profile and top tracks requests can abort a report. After that the
//! pipeline always completes; a failed artist lookup just leaves that artist
//! with unknown popularity.

pub mod annotate;
pub mod resolver;
pub mod rules;

use crate::{
    spotify::{SpotifyApi, SpotifyError},
    types::{AccessToken, ProfileReport, TopTracksResponse, TrackCommentary},
    utils::TimeRange,
};

pub use annotate::annotate_track;
pub use resolver::{collect_artist_ids, resolve_artists};
pub use rules::{commentary_for, track_commentary};

/// Why a report could not be built.
///
/// Each variant names the request that failed; the message matches what the
/// web app shows, e.g. "Error fetching profile: The access token expired".
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Error fetching profile: {0}")]
    Profile(#[source] SpotifyError),

    #[error("Error fetching top tracks: {0}")]
    TopTracks(#[source] SpotifyError),
}

impl ReportError {
    /// The underlying Spotify failure, used to pick the HTTP status.
    pub fn spotify_error(&self) -> &SpotifyError {
        match self {
            ReportError::Profile(e) | ReportError::TopTracks(e) => e,
        }
    }
}

/// Annotates every track in `top_tracks` and comments on it, keeping the
/// original track order.
///
/// Each distinct artist is looked up once, however many tracks it appears
/// on. An empty payload makes no requests at all.
///
/// # Arguments
///
/// * `api` - Spotify client used for the artist lookups
/// * `token` - Access token of the user
/// * `top_tracks` - Payload of the top tracks request
///
/// # Returns
///
/// One [`TrackCommentary`] per input track. This never fails: artists whose
/// lookup failed are commented on with unknown popularity.
///
/// # Example
///
/// ```rust,ignore
/// let top_tracks = client.top_tracks(&token, TimeRange::ShortTerm, 50).await?;
/// for entry in roast_top_tracks(&client, &token, top_tracks).await {
///     println!("{}: {}", entry.track.name, entry.comment);
/// }
/// ```
pub async fn roast_top_tracks(
    api: &dyn SpotifyApi,
    token: &AccessToken,
    top_tracks: TopTracksResponse,
) -> Vec<TrackCommentary> {
    let mut tracks = top_tracks.items;
    if tracks.is_empty() {
        return Vec::new();
    }

    let artist_ids = collect_artist_ids(&tracks);
    let details = resolve_artists(api, token, artist_ids).await;

    for track in tracks.iter_mut() {
        annotate_track(track, &details);
    }

    tracks
        .into_iter()
        .map(|track| {
            let comment = track_commentary(&track);
            TrackCommentary { track, comment }
        })
        .collect()
}

/// Fetches the user's profile and top tracks and roasts them.
///
/// Shared by the `/profile` page and `spotiroast roast`.
///
/// # Arguments
///
/// * `api` - Spotify client
/// * `token` - Access token of the user
/// * `time_range` - Window the top tracks are computed over
/// * `limit` - Number of top tracks to fetch
///
/// # Errors
///
/// - [`ReportError::Profile`] when `GET /me` fails
/// - [`ReportError::TopTracks`] when `GET /me/top/tracks` fails
///
/// Artist lookup failures are not errors.
///
/// # Example
///
/// ```rust,ignore
/// let report = build_report(&client, &token, TimeRange::LongTerm, 20).await?;
/// println!("{} has {} tracks", report.profile.name(), report.tracks.len());
/// ```
pub async fn build_report(
    api: &dyn SpotifyApi,
    token: &AccessToken,
    time_range: TimeRange,
    limit: u32,
) -> Result<ProfileReport, ReportError> {
    let profile = api
        .current_user(token)
        .await
        .map_err(ReportError::Profile)?;

    let top_tracks = api
        .top_tracks(token, time_range, limit)
        .await
        .map_err(ReportError::TopTracks)?;

    let tracks = roast_top_tracks(api, token, top_tracks).await;

    Ok(ProfileReport { profile, tracks })
}
