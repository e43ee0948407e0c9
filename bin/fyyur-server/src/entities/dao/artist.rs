use chrono::{DateTime, Utc};

/// A row in the `artists` table. Same shape as a venue minus the street
/// address; artists seek venues rather than talent.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// Comma-joined genre names, e.g. `"Jazz,Folk"`.
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Artist {
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres.split(',').filter(|g| !g.is_empty()).collect()
    }
}

/// Field set for inserting or updating an artist.
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Minimal (id, name) projection for the `/artists` listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArtistRef {
    pub id: i64,
    pub name: String,
}

/// One artist in a search result, annotated with its upcoming-show count.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArtistSearchRow {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}
