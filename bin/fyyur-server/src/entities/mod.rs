//! Database abstraction layer.
//!
//! One store trait per entity ([`VenueStore`], [`ArtistStore`],
//! [`ShowStore`]), all implemented by [`SqliteStore`]. To swap to another
//! database, implement the traits for a new type and change the concrete
//! type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.

pub mod artist;
pub mod dao;
pub mod show;
pub mod venue;

pub use dao::{
    Artist, ArtistRef, ArtistSearchRow, ArtistShowRow, NewArtist, NewShow, NewVenue, ShowListing,
    Venue, VenueOverviewRow, VenueShowRow,
};

pub use artist::ArtistStore;
pub use show::ShowStore;
pub use venue::VenueStore;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// SQLite-backed directory store.
///
/// Queries use the runtime-verified `sqlx::query` form deliberately so that
/// no `DATABASE_URL` environment variable is needed at compile time.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: sqlx::SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending
    /// migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://fyyur.db"`. The migrations directory is resolved relative
    /// to `CARGO_MANIFEST_DIR` at compile time and embedded into the binary.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database on a single persistent connection.
    ///
    /// A multi-connection pool would hand every connection its own empty
    /// `:memory:` database, so the pool is pinned to one connection that is
    /// never recycled.
    #[cfg(test)]
    pub(crate) async fn connect_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

/// Parse a stored RFC 3339 timestamp, warning (rather than failing the whole
/// page) on rows written by hand with a bad format.
fn parse_ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, error = %e, "failed to parse stored timestamp; using now");
        Utc::now()
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{Duration, Utc};

    use super::dao::{NewArtist, NewShow, NewVenue};

    pub fn sample_venue(name: &str, city: &str, state: &str) -> NewVenue {
        NewVenue {
            name: name.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            address: "1015 Folsom Street".to_owned(),
            phone: Some("123-123-1234".to_owned()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_owned()),
            website_link: None,
            genres: "Jazz,Reggae,Swing".to_owned(),
            seeking_talent: false,
            seeking_description: None,
            created_at: Utc::now(),
        }
    }

    pub fn sample_artist(name: &str, city: &str, state: &str) -> NewArtist {
        NewArtist {
            name: name.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            phone: Some("326-123-5000".to_owned()),
            image_link: Some("https://example.com/guns-n-petals.jpg".to_owned()),
            facebook_link: None,
            website_link: Some("https://gunsnpetalsband.com".to_owned()),
            genres: "Rock n Roll".to_owned(),
            seeking_venue: true,
            seeking_description: Some("Looking for shows to perform at".to_owned()),
            created_at: Utc::now(),
        }
    }

    /// A show `days_from_now` days away (negative for a past show).
    pub fn sample_show(venue_id: i64, artist_id: i64, days_from_now: i64) -> NewShow {
        NewShow {
            venue_id,
            artist_id,
            start_time: Utc::now() + Duration::days(days_from_now),
        }
    }
}
