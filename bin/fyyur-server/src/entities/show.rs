use std::future::Future;

use chrono::{DateTime, Utc};

use crate::entities::SqliteStore;
use crate::entities::dao::{ArtistShowRow, NewShow, ShowListing, VenueShowRow};

pub trait ShowStore: Send + Sync + 'static {
    /// Insert a show and return its database-assigned id. Fails with a
    /// foreign-key violation if the venue or artist does not exist.
    fn create_show(&self, show: NewShow) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Every show joined with its venue and artist, soonest first.
    fn list_shows(&self) -> impl Future<Output = Result<Vec<ShowListing>, sqlx::Error>> + Send;

    /// Shows at a venue that started before `now`, most recent first.
    fn past_shows_for_venue(
        &self,
        venue_id: i64,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<VenueShowRow>, sqlx::Error>> + Send;

    /// Shows at a venue starting after `now`, soonest first.
    fn upcoming_shows_for_venue(
        &self,
        venue_id: i64,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<VenueShowRow>, sqlx::Error>> + Send;

    /// Shows an artist played before `now`, most recent first.
    fn past_shows_for_artist(
        &self,
        artist_id: i64,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<ArtistShowRow>, sqlx::Error>> + Send;

    /// Shows an artist plays after `now`, soonest first.
    fn upcoming_shows_for_artist(
        &self,
        artist_id: i64,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<ArtistShowRow>, sqlx::Error>> + Send;
}

impl SqliteStore {
    async fn venue_shows(
        &self,
        venue_id: i64,
        now: DateTime<Utc>,
        upcoming: bool,
    ) -> Result<Vec<VenueShowRow>, sqlx::Error> {
        let sql = if upcoming {
            "SELECT s.artist_id, a.name, a.image_link, s.start_time \
             FROM shows s JOIN artists a ON a.id = s.artist_id \
             WHERE s.venue_id = ?1 AND s.start_time > ?2 \
             ORDER BY s.start_time"
        } else {
            "SELECT s.artist_id, a.name, a.image_link, s.start_time \
             FROM shows s JOIN artists a ON a.id = s.artist_id \
             WHERE s.venue_id = ?1 AND s.start_time < ?2 \
             ORDER BY s.start_time DESC"
        };
        let rows: Vec<(i64, String, Option<String>, String)> = sqlx::query_as(sql)
            .bind(venue_id)
            .bind(now.to_rfc3339())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(artist_id, artist_name, artist_image_link, start_time)| VenueShowRow {
                artist_id,
                artist_name,
                artist_image_link,
                start_time: super::parse_ts(&start_time),
            })
            .collect())
    }

    async fn artist_shows(
        &self,
        artist_id: i64,
        now: DateTime<Utc>,
        upcoming: bool,
    ) -> Result<Vec<ArtistShowRow>, sqlx::Error> {
        let sql = if upcoming {
            "SELECT s.venue_id, v.name, v.image_link, s.start_time \
             FROM shows s JOIN venues v ON v.id = s.venue_id \
             WHERE s.artist_id = ?1 AND s.start_time > ?2 \
             ORDER BY s.start_time"
        } else {
            "SELECT s.venue_id, v.name, v.image_link, s.start_time \
             FROM shows s JOIN venues v ON v.id = s.venue_id \
             WHERE s.artist_id = ?1 AND s.start_time < ?2 \
             ORDER BY s.start_time DESC"
        };
        let rows: Vec<(i64, String, Option<String>, String)> = sqlx::query_as(sql)
            .bind(artist_id)
            .bind(now.to_rfc3339())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(venue_id, venue_name, venue_image_link, start_time)| ArtistShowRow {
                venue_id,
                venue_name,
                venue_image_link,
                start_time: super::parse_ts(&start_time),
            })
            .collect())
    }
}

impl ShowStore for SqliteStore {
    async fn create_show(&self, show: NewShow) -> Result<i64, sqlx::Error> {
        let start_time = show.start_time.to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?1, ?2, ?3)",
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(&start_time)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, sqlx::Error> {
        let rows: Vec<(i64, String, i64, String, Option<String>, String)> = sqlx::query_as(
            "SELECT s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time \
             FROM shows s \
             JOIN venues v ON v.id = s.venue_id \
             JOIN artists a ON a.id = s.artist_id \
             ORDER BY s.start_time",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(
                |(venue_id, venue_name, artist_id, artist_name, artist_image_link, start_time)| {
                    ShowListing {
                        venue_id,
                        venue_name,
                        artist_id,
                        artist_name,
                        artist_image_link,
                        start_time: super::parse_ts(&start_time),
                    }
                },
            )
            .collect())
    }

    async fn past_shows_for_venue(
        &self,
        venue_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueShowRow>, sqlx::Error> {
        self.venue_shows(venue_id, now, false).await
    }

    async fn upcoming_shows_for_venue(
        &self,
        venue_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueShowRow>, sqlx::Error> {
        self.venue_shows(venue_id, now, true).await
    }

    async fn past_shows_for_artist(
        &self,
        artist_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistShowRow>, sqlx::Error> {
        self.artist_shows(artist_id, now, false).await
    }

    async fn upcoming_shows_for_artist(
        &self,
        artist_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistShowRow>, sqlx::Error> {
        self.artist_shows(artist_id, now, true).await
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
