use chrono::{DateTime, Utc};

/// Field set for inserting a show; the show itself carries no attributes
/// besides its two references and the start time.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// One row on the `/shows` page: a show joined with both sides of the
/// association.
#[derive(Debug, Clone)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show on a venue page, joined with the performing artist.
#[derive(Debug, Clone)]
pub struct VenueShowRow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show on an artist page, joined with the hosting venue.
#[derive(Debug, Clone)]
pub struct ArtistShowRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
