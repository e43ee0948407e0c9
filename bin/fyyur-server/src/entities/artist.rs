use std::future::Future;

use chrono::{DateTime, Utc};

use crate::entities::SqliteStore;
use crate::entities::dao::{Artist, ArtistRef, ArtistSearchRow, NewArtist};

pub trait ArtistStore: Send + Sync + 'static {
    /// Insert an artist and return its database-assigned id.
    fn create_artist(
        &self,
        artist: NewArtist,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn get_artist(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Artist>, sqlx::Error>> + Send;

    /// Every artist as an (id, name) pair, ordered by name.
    fn list_artists(&self) -> impl Future<Output = Result<Vec<ArtistRef>, sqlx::Error>> + Send;

    /// Case-insensitive substring search over name, city and state.
    fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<ArtistSearchRow>, sqlx::Error>> + Send;

    /// The most recently listed artists, newest first.
    fn recent_artists(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Artist>, sqlx::Error>> + Send;

    /// Update every editable field. Returns `false` if the id is unknown.
    fn update_artist(
        &self,
        id: i64,
        artist: NewArtist,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Delete an artist (its shows go with it). Returns `false` if the id
    /// is unknown.
    fn delete_artist(&self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

type ArtistRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    bool,
    Option<String>,
    String,
);

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
     website_link, genres, seeking_venue, seeking_description, created_at";

fn artist_from_row(row: ArtistRow) -> Artist {
    let (
        id,
        name,
        city,
        state,
        phone,
        image_link,
        facebook_link,
        website_link,
        genres,
        seeking_venue,
        seeking_description,
        created_at,
    ) = row;
    Artist {
        id,
        name,
        city,
        state,
        phone,
        image_link,
        facebook_link,
        website_link,
        genres,
        seeking_venue,
        seeking_description,
        created_at: super::parse_ts(&created_at),
    }
}

impl ArtistStore for SqliteStore {
    async fn create_artist(&self, artist: NewArtist) -> Result<i64, sqlx::Error> {
        let created_at = artist.created_at.to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO artists (name, city, state, phone, image_link, facebook_link, \
             website_link, genres, seeking_venue, seeking_description, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(&artist.genres)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, sqlx::Error> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?1");
        let row: Option<ArtistRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(artist_from_row))
    }

    async fn list_artists(&self) -> Result<Vec<ArtistRef>, sqlx::Error> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM artists ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| ArtistRef { id, name })
            .collect())
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSearchRow>, sqlx::Error> {
        // SQLite LIKE is case-insensitive for ASCII.
        let pattern = format!("%{term}%");
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            "SELECT a.id, a.name, \
                 (SELECT COUNT(*) FROM shows s \
                  WHERE s.artist_id = a.id AND s.start_time > ?1) \
             FROM artists a \
             WHERE a.name LIKE ?2 OR a.city LIKE ?2 OR a.state LIKE ?2 \
             ORDER BY a.name",
        )
        .bind(now.to_rfc3339())
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, num_upcoming_shows)| ArtistSearchRow {
                id,
                name,
                num_upcoming_shows,
            })
            .collect())
    }

    async fn recent_artists(&self, limit: i64) -> Result<Vec<Artist>, sqlx::Error> {
        let sql = format!(
            "SELECT {ARTIST_COLUMNS} FROM artists ORDER BY created_at DESC, id DESC LIMIT ?1"
        );
        let rows: Vec<ArtistRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(artist_from_row).collect())
    }

    async fn update_artist(&self, id: i64, artist: NewArtist) -> Result<bool, sqlx::Error> {
        // created_at is set once on insert and never rewritten.
        let result = sqlx::query(
            "UPDATE artists SET name = ?1, city = ?2, state = ?3, phone = ?4, image_link = ?5, \
             facebook_link = ?6, website_link = ?7, genres = ?8, seeking_venue = ?9, \
             seeking_description = ?10 \
             WHERE id = ?11",
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(&artist.genres)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_artist(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;
    use crate::entities::testing::{sample_artist, sample_show, sample_venue};
    use crate::entities::{ShowStore, VenueStore};

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let id = store
            .create_artist(sample_artist("Guns N Petals", "San Francisco", "CA"))
            .await
            .unwrap();

        let artist = store.get_artist(id).await.unwrap().expect("artist exists");
        assert_eq!(artist.name, "Guns N Petals");
        assert!(artist.seeking_venue);
        assert_eq!(artist.genre_list(), vec!["Rock n Roll"]);
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let store = SqliteStore::connect_memory().await.unwrap();
        for name in ["The Wild Sax Band", "Guns N Petals", "Matt Quevedo"] {
            store
                .create_artist(sample_artist(name, "New York", "NY"))
                .await
                .unwrap();
        }
        let names: Vec<String> = store
            .list_artists()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
    }

    #[tokio::test]
    async fn search_counts_only_upcoming_shows() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let venue = store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let band = store
            .create_artist(sample_artist("The Wild Sax Band", "San Francisco", "CA"))
            .await
            .unwrap();
        store.create_show(sample_show(venue, band, -30)).await.unwrap();
        store.create_show(sample_show(venue, band, 30)).await.unwrap();

        let results = store.search_artists("band", Utc::now()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "The Wild Sax Band");
        assert_eq!(results[0].num_upcoming_shows, 1);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let id = store
            .create_artist(sample_artist("Guns N Petals", "San Francisco", "CA"))
            .await
            .unwrap();

        let mut changes = sample_artist("Guns N Petals", "Los Angeles", "CA");
        changes.seeking_venue = false;
        assert!(store.update_artist(id, changes).await.unwrap());
        let artist = store.get_artist(id).await.unwrap().unwrap();
        assert_eq!(artist.city, "Los Angeles");
        assert!(!artist.seeking_venue);

        assert!(store.delete_artist(id).await.unwrap());
        assert!(store.get_artist(id).await.unwrap().is_none());
        assert!(!store.delete_artist(id).await.unwrap());
    }
}
