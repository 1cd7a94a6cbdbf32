use std::collections::HashMap;

use crate::types::{ArtistDetail, Popularity, Track};

/// Copies popularity and genres from `details` onto every artist of `track`.
///
/// Artists without details, or without an ID at all, get
/// [`Popularity::Unknown`] and no genres.
///
/// # Arguments
///
/// * `track` - Track whose artists are annotated in place
/// * `details` - Lookup results keyed by artist ID, as returned by
///   [`resolve_artists`](crate::roast::resolve_artists)
///
/// # Example
///
/// ```rust,ignore
/// let details = resolve_artists(&client, &token, collect_artist_ids(&tracks)).await;
/// for track in tracks.iter_mut() {
///     annotate_track(track, &details);
/// }
/// ```
pub fn annotate_track(track: &mut Track, details: &HashMap<String, ArtistDetail>) {
    for artist in track.artists.iter_mut() {
        match artist.id.as_ref().and_then(|id| details.get(id)) {
            Some(detail) => {
                artist.popularity = Popularity::Score(detail.popularity);
                artist.genres = detail.genres.clone();
            }
            None => {
                artist.popularity = Popularity::Unknown;
                artist.genres = Vec::new();
            }
        }
    }
}
