use std::future::Future;

use chrono::{DateTime, Utc};

use crate::entities::SqliteStore;
use crate::entities::dao::{NewVenue, Venue, VenueOverviewRow};

pub trait VenueStore: Send + Sync + 'static {
    /// Insert a venue and return its database-assigned id.
    fn create_venue(
        &self,
        venue: NewVenue,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn get_venue(&self, id: i64)
    -> impl Future<Output = Result<Option<Venue>, sqlx::Error>> + Send;

    /// Every venue with its upcoming-show count, ordered by state, city and
    /// name so consecutive rows of one (city, state) area are adjacent.
    fn venue_overview(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<VenueOverviewRow>, sqlx::Error>> + Send;

    /// Case-insensitive substring search over name, city and state.
    fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<VenueOverviewRow>, sqlx::Error>> + Send;

    /// The most recently listed venues, newest first.
    fn recent_venues(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Venue>, sqlx::Error>> + Send;

    /// Update every editable field. Returns `false` if the id is unknown.
    fn update_venue(
        &self,
        id: i64,
        venue: NewVenue,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Delete a venue (its shows go with it). Returns `false` if the id is
    /// unknown.
    fn delete_venue(&self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

type VenueRow = (
    i64,
    String,
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

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     website_link, genres, seeking_talent, seeking_description, created_at";

fn venue_from_row(row: VenueRow) -> Venue {
    let (
        id,
        name,
        city,
        state,
        address,
        phone,
        image_link,
        facebook_link,
        website_link,
        genres,
        seeking_talent,
        seeking_description,
        created_at,
    ) = row;
    Venue {
        id,
        name,
        city,
        state,
        address,
        phone,
        image_link,
        facebook_link,
        website_link,
        genres,
        seeking_talent,
        seeking_description,
        created_at: super::parse_ts(&created_at),
    }
}

impl VenueStore for SqliteStore {
    async fn create_venue(&self, venue: NewVenue) -> Result<i64, sqlx::Error> {
        let created_at = venue.created_at.to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link, \
             website_link, genres, seeking_talent, seeking_description, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&venue.genres)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, sqlx::Error> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?1");
        let row: Option<VenueRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(venue_from_row))
    }

    async fn venue_overview(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueOverviewRow>, sqlx::Error> {
        let rows: Vec<(i64, String, String, String, i64)> = sqlx::query_as(
            "SELECT v.id, v.name, v.city, v.state, \
                 (SELECT COUNT(*) FROM shows s \
                  WHERE s.venue_id = v.id AND s.start_time > ?1) \
             FROM venues v \
             ORDER BY v.state, v.city, v.name",
        )
        .bind(now.to_rfc3339())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, city, state, num_upcoming_shows)| VenueOverviewRow {
                id,
                name,
                city,
                state,
                num_upcoming_shows,
            })
            .collect())
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueOverviewRow>, sqlx::Error> {
        // SQLite LIKE is case-insensitive for ASCII.
        let pattern = format!("%{term}%");
        let rows: Vec<(i64, String, String, String, i64)> = sqlx::query_as(
            "SELECT v.id, v.name, v.city, v.state, \
                 (SELECT COUNT(*) FROM shows s \
                  WHERE s.venue_id = v.id AND s.start_time > ?1) \
             FROM venues v \
             WHERE v.name LIKE ?2 OR v.city LIKE ?2 OR v.state LIKE ?2 \
             ORDER BY v.name",
        )
        .bind(now.to_rfc3339())
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, city, state, num_upcoming_shows)| VenueOverviewRow {
                id,
                name,
                city,
                state,
                num_upcoming_shows,
            })
            .collect())
    }

    async fn recent_venues(&self, limit: i64) -> Result<Vec<Venue>, sqlx::Error> {
        let sql =
            format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY created_at DESC, id DESC LIMIT ?1");
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(venue_from_row).collect())
    }

    async fn update_venue(&self, id: i64, venue: NewVenue) -> Result<bool, sqlx::Error> {
        // created_at is set once on insert and never rewritten.
        let result = sqlx::query(
            "UPDATE venues SET name = ?1, city = ?2, state = ?3, address = ?4, phone = ?5, \
             image_link = ?6, facebook_link = ?7, website_link = ?8, genres = ?9, \
             seeking_talent = ?10, seeking_description = ?11 \
             WHERE id = ?12",
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&venue.genres)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_venue(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?1")
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
    use crate::entities::{ArtistStore, ShowStore};

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let id = store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();

        let venue = store.get_venue(id).await.unwrap().expect("venue exists");
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.city, "San Francisco");
        assert_eq!(venue.state, "CA");
        assert_eq!(venue.genre_list(), vec!["Jazz", "Reggae", "Swing"]);
        assert!(!venue.seeking_talent);
    }

    #[tokio::test]
    async fn get_unknown_venue_is_none() {
        let store = SqliteStore::connect_memory().await.unwrap();
        assert!(store.get_venue(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overview_counts_upcoming_shows_per_venue() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let hop = store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let park = store
            .create_venue(sample_venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist = store
            .create_artist(sample_artist("Guns N Petals", "San Francisco", "CA"))
            .await
            .unwrap();

        // Two upcoming shows at the Hop, one past show at Park Square.
        store.create_show(sample_show(hop, artist, 7)).await.unwrap();
        store.create_show(sample_show(hop, artist, 14)).await.unwrap();
        store.create_show(sample_show(park, artist, -7)).await.unwrap();

        let rows = store.venue_overview(Utc::now()).await.unwrap();
        assert_eq!(rows.len(), 2);
        let by_id = |id| rows.iter().find(|r| r.id == id).unwrap();
        assert_eq!(by_id(hop).num_upcoming_shows, 2);
        assert_eq!(by_id(park).num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = SqliteStore::connect_memory().await.unwrap();
        store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        store
            .create_venue(sample_venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();

        let hop = store.search_venues("hop", Utc::now()).await.unwrap();
        assert_eq!(hop.len(), 1);
        assert_eq!(hop[0].name, "The Musical Hop");

        let music = store.search_venues("Music", Utc::now()).await.unwrap();
        assert_eq!(music.len(), 2);

        // City and state match too.
        assert_eq!(store.search_venues("francisco", Utc::now()).await.unwrap().len(), 2);
        assert!(store.search_venues("boston", Utc::now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rewrites_editable_fields() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let id = store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();

        let mut changes = sample_venue("The Musical Hop", "Oakland", "CA");
        changes.seeking_talent = true;
        changes.seeking_description = Some("We want bands".to_owned());
        assert!(store.update_venue(id, changes).await.unwrap());

        let venue = store.get_venue(id).await.unwrap().unwrap();
        assert_eq!(venue.city, "Oakland");
        assert!(venue.seeking_talent);
        assert_eq!(venue.seeking_description.as_deref(), Some("We want bands"));
    }

    #[tokio::test]
    async fn update_unknown_venue_reports_missing() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let changes = sample_venue("Ghost Venue", "Nowhere", "ZZ");
        assert!(!store.update_venue(42, changes).await.unwrap());
    }

    #[tokio::test]
    async fn delete_cascades_to_shows() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let venue = store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist = store
            .create_artist(sample_artist("Guns N Petals", "San Francisco", "CA"))
            .await
            .unwrap();
        store.create_show(sample_show(venue, artist, 7)).await.unwrap();

        assert!(store.delete_venue(venue).await.unwrap());
        assert!(store.get_venue(venue).await.unwrap().is_none());
        assert!(store.list_shows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_venues_newest_first_with_limit() {
        let store = SqliteStore::connect_memory().await.unwrap();
        for name in ["First", "Second", "Third"] {
            store
                .create_venue(sample_venue(name, "San Francisco", "CA"))
                .await
                .unwrap();
        }
        let recent = store.recent_venues(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "Third");
        assert_eq!(recent[1].name, "Second");
    }
}
