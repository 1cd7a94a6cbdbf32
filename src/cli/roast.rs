use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error, info,
    management::TokenManager,
    roast::build_report,
    spotify::SpotifyClient,
    types::{TrackCommentary, TrackTableRow},
    utils::TimeRange,
    warning,
};

/// Roasts the cached user's top tracks and prints them as a table, or as
/// JSON with `json` set.
pub async fn roast(config: Config, time_range: Option<TimeRange>, limit: Option<u32>, json: bool) {
    let mut token_manager = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!("No cached token, run `spotiroast auth` first. Err: {}", e),
    };

    let client = SpotifyClient::new(&config);
    let token = match token_manager.get_valid_token(&client).await {
        Ok(token) => token,
        Err(e) => error!("Failed to refresh token. Err: {}", e),
    };

    let time_range = time_range.unwrap_or(config.time_range);
    let limit = limit.unwrap_or(config.top_tracks_limit);

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!(
        "Roasting your top tracks ({})...",
        time_range.label()
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let report = build_report(&client, &token, time_range, limit).await;
    pb.finish_and_clear();

    let report = match report {
        Ok(report) => report,
        Err(e) => error!("{}", e),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot serialize report. Err: {}", e),
        }
        return;
    }

    info!(
        "Top tracks of {} ({})",
        report.profile.name(),
        time_range.label()
    );

    if report.tracks.is_empty() {
        warning!("No top tracks for this time range.");
        return;
    }

    println!("{}", Table::new(table_rows(&report.tracks)));
}

fn table_rows(tracks: &[TrackCommentary]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, entry)| TrackTableRow {
            rank: i + 1,
            track: entry.track.name.clone(),
            artists: entry.track.artist_names(),
            popularity: entry
                .track
                .artists
                .iter()
                .map(|artist| artist.popularity.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            comment: entry.comment.clone(),
        })
        .collect()
}
