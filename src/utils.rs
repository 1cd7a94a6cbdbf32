use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};

/// Random alphanumeric value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Value for an HTTP `Authorization: Basic` header built from the client
/// credentials.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

/// Escapes text for use in HTML content and attribute values.
///
/// Track, artist and profile names come from Spotify and are user
/// controlled, so every one of them goes through here before rendering.
///
/// # Example
///
/// ```
/// use spotiroast::utils::escape_html;
///
/// assert_eq!(escape_html("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Time window Spotify computes top tracks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Roughly the last four weeks
    #[default]
    ShortTerm,
    /// Roughly the last six months
    MediumTerm,
    /// Several years of data
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "last 4 weeks",
            TimeRange::MediumTerm => "last 6 months",
            TimeRange::LongTerm => "all time",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_range(s)
    }
}

/// Parses a time range the way users tend to type it: case-insensitive,
/// with `-` or `_` separators, and the short forms `short`, `medium`, `long`.
pub fn parse_time_range(s: &str) -> Result<TimeRange, String> {
    let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
    if normalized.is_empty() {
        return Err("time range cannot be empty".to_string());
    }

    match normalized.as_str() {
        "short_term" | "short" => Ok(TimeRange::ShortTerm),
        "medium_term" | "medium" => Ok(TimeRange::MediumTerm),
        "long_term" | "long" => Ok(TimeRange::LongTerm),
        other => Err(format!(
            "invalid value '{}'; expected one of: short_term, medium_term, long_term",
            other
        )),
    }
}
