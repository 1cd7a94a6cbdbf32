use std::collections::{HashMap, HashSet};

use futures::{StreamExt, stream};

use crate::{
    spotify::SpotifyApi,
    types::{AccessToken, ArtistDetail, Track},
    warning,
};

/// Number of artist lookups in flight at once.
pub const ARTIST_FETCH_CONCURRENCY: usize = 8;

/// Distinct artist IDs referenced anywhere in `tracks`.
///
/// Artists without an ID (local files) are skipped.
///
/// # Returns
///
/// A set, so an artist on several tracks is fetched only once.
pub fn collect_artist_ids(tracks: &[Track]) -> HashSet<String> {
    tracks
        .iter()
        .flat_map(|track| track.artists.iter())
        .filter_map(|artist| artist.id.clone())
        .collect()
}

/// Fetches every artist in `artist_ids` once and maps ID to details.
///
/// A failed lookup is logged and left out of the map; it never fails the
/// batch. Lookups run concurrently, so a slow artist does not hold up the
/// others.
///
/// # Arguments
///
/// * `api` - Spotify client
/// * `token` - Access token of the user
/// * `artist_ids` - IDs to look up, usually from [`collect_artist_ids`]
///
/// # Returns
///
/// Details for every artist that could be fetched. At most
/// [`ARTIST_FETCH_CONCURRENCY`] requests are in flight at once.
pub async fn resolve_artists(
    api: &dyn SpotifyApi,
    token: &AccessToken,
    artist_ids: HashSet<String>,
) -> HashMap<String, ArtistDetail> {
    let results: Vec<_> = stream::iter(artist_ids)
        .map(move |artist_id| async move {
            let result = api.artist(token, &artist_id).await;
            (artist_id, result)
        })
        .buffer_unordered(ARTIST_FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut details = HashMap::with_capacity(results.len());
    for (artist_id, result) in results {
        match result {
            Ok(detail) => {
                details.insert(artist_id, detail);
            }
            Err(e) => {
                warning!("Error fetching artist details for ID {}: {}", artist_id, e);
            }
        }
    }
    details
}
