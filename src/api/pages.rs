//! HTML for the handful of pages the app serves.

use crate::{
    types::{ArtistRef, ProfileReport, TrackCommentary},
    utils::{TimeRange, escape_html},
};

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem;}\
li{margin-bottom:1rem;}img{vertical-align:middle;margin-right:.5rem;}\
.comment{font-style:italic;}.meta{color:#666;font-size:.85rem;}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>",
        title = escape_html(title),
    )
}

/// Landing page; shows the login link, or the roast and logout links for
/// a logged in user.
pub fn home_page(logged_in: bool) -> String {
    let action = if logged_in {
        "<p><a href=\"/profile\">See your roast</a> · <a href=\"/logout\">Log out</a></p>"
    } else {
        "<p><a href=\"/login\">Log in with Spotify</a></p>"
    };

    layout(
        "Spotify Roast",
        &format!(
            "<h1>Spotify Roast</h1><p>Let us judge your top tracks.</p>{}",
            action
        ),
    )
}

/// Page shown for every failed request, with `message` escaped.
pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!(
            "<h4>{}</h4><p><a href=\"/\">Back</a></p>",
            escape_html(message)
        ),
    )
}

/// Renders the profile header and the roasted top tracks.
///
/// # Arguments
///
/// * `report` - Profile and commented tracks from
///   [`build_report`](crate::roast::build_report)
/// * `time_range` - Range the tracks were fetched for; the range links mark
///   it as current
///
/// # Returns
///
/// A complete HTML document. All Spotify supplied text is escaped.
pub fn profile_page(report: &ProfileReport, time_range: TimeRange) -> String {
    let profile = &report.profile;
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>", escape_html(profile.name())));

    let mut meta = Vec::new();
    if let Some(followers) = &profile.followers {
        meta.push(format!("{} followers", followers.total));
    }
    if let Some(country) = &profile.country {
        meta.push(escape_html(country));
    }
    if let Some(product) = &profile.product {
        meta.push(escape_html(product));
    }
    if !meta.is_empty() {
        body.push_str(&format!("<p class=\"meta\">{}</p>", meta.join(" · ")));
    }

    let ranges: Vec<String> = TimeRange::ALL
        .iter()
        .map(|range| {
            if *range == time_range {
                format!("<strong>{}</strong>", range.label())
            } else {
                format!(
                    "<a href=\"/profile?time_range={}\">{}</a>",
                    range,
                    range.label()
                )
            }
        })
        .collect();
    body.push_str(&format!("<p>{}</p>", ranges.join(" | ")));

    if report.tracks.is_empty() {
        body.push_str("<p>No top tracks yet. Listen to something first.</p>");
    } else {
        body.push_str("<ol>");
        for entry in &report.tracks {
            body.push_str(&track_item(entry));
        }
        body.push_str("</ol>");
    }

    body.push_str("<p><a href=\"/logout\">Log out</a></p>");
    layout(&format!("{} - Top Tracks", profile.name()), &body)
}

fn track_item(entry: &TrackCommentary) -> String {
    let track = &entry.track;

    let image = track
        .album
        .as_ref()
        .and_then(|album| album.images.last())
        .map(|image| {
            format!(
                "<img src=\"{}\" width=\"48\" height=\"48\" alt=\"\">",
                escape_html(&image.url)
            )
        })
        .unwrap_or_default();

    let album = track
        .album
        .as_ref()
        .map(|album| escape_html(&album.name))
        .map(|name| format!(" <span class=\"meta\">({})</span>", name))
        .unwrap_or_default();

    let artists: Vec<String> = track.artists.iter().map(artist_line).collect();

    format!(
        "<li>{image}<strong>{name}</strong>{album}<br><span class=\"meta\">{artists}</span>\
         <br><span class=\"comment\">{comment}</span></li>",
        name = escape_html(&track.name),
        artists = artists.join("; "),
        comment = escape_html(&entry.comment),
    )
}

fn artist_line(artist: &ArtistRef) -> String {
    let genres = if artist.genres.is_empty() {
        "no genres".to_string()
    } else {
        artist.genres.join(", ")
    };

    format!(
        "{} (popularity {}, {})",
        escape_html(&artist.name),
        artist.popularity,
        escape_html(&genres)
    )
}
