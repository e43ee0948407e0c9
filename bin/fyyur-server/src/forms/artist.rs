use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::entities::dao::NewArtist;

/// Fields submitted by the new-artist and edit-artist forms. Same shape as
/// [`super::VenueForm`] minus the street address.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArtistForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Comma-separated genre names.
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    #[validate(url(message = "image link must be a URL"))]
    pub image_link: Option<String>,
    #[serde(default)]
    #[validate(url(message = "facebook link must be a URL"))]
    pub facebook_link: Option<String>,
    #[serde(default)]
    #[validate(url(message = "website link must be a URL"))]
    pub website_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            phone: super::clean(self.phone),
            genres: super::clean(self.genres),
            image_link: super::clean(self.image_link),
            facebook_link: super::clean(self.facebook_link),
            website_link: super::clean(self.website_link),
            seeking_venue: self.seeking_venue,
            seeking_description: super::clean(self.seeking_description),
        }
    }

    pub fn into_new_artist(self, created_at: DateTime<Utc>) -> NewArtist {
        NewArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: super::canonical_genres(self.genres),
            seeking_venue: self.seeking_venue.is_some(),
            seeking_description: self.seeking_description,
            created_at,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn form() -> ArtistForm {
        ArtistForm {
            name: "Guns N Petals".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: Some("326-123-5000".to_owned()),
            genres: Some("Rock n Roll".to_owned()),
            image_link: None,
            facebook_link: None,
            website_link: Some("https://gunsnpetalsband.com".to_owned()),
            seeking_venue: None,
            seeking_description: None,
        }
    }

    #[test]
    fn converts_into_new_artist() {
        let artist = form().normalized().into_new_artist(chrono::Utc::now());
        assert_eq!(artist.name, "Guns N Petals");
        assert_eq!(artist.genres, "Rock n Roll");
        assert!(!artist.seeking_venue);
    }

    #[test]
    fn blank_city_fails_validation() {
        let mut f = form();
        f.city = String::new();
        assert!(f.normalized().validate().is_err());
    }
}
