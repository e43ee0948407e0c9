//! Form DTOs: the shapes the HTML forms submit, with validation and
//! conversion into the row types the store takes.

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::ArtistForm;
pub use show::ShowForm;
pub use venue::VenueForm;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Shared query/body shape for the search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search_term: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> &str {
        self.search_term.as_deref().unwrap_or("").trim()
    }
}

/// Accept the formats browsers and people actually type: RFC 3339, the
/// `datetime-local` input format, and plain `Y-m-d H:M[:S]`. Naive values
/// are taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    None
}

/// Trim a text input, mapping the empty string to `None` so optional
/// columns stay NULL instead of collecting empty strings.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Canonicalize a comma-separated genres field: trim each entry, drop
/// empties, re-join. `"Jazz, , Folk "` becomes `"Jazz,Folk"`.
fn canonical_genres(raw: Option<String>) -> String {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
