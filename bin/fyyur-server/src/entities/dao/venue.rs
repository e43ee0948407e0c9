use chrono::{DateTime, Utc};

/// A row in the `venues` table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// Comma-joined genre names, e.g. `"Jazz,Folk"`.
    pub genres: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Venue {
    /// Split the stored comma-joined genres back into a list for rendering.
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres.split(',').filter(|g| !g.is_empty()).collect()
    }
}

/// Field set for inserting or updating a venue; `id` is assigned by the
/// database on insert.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One venue in the `/venues` overview or a search result, annotated with
/// its upcoming-show count.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VenueOverviewRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}
