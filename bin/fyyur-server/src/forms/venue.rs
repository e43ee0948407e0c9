use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::entities::dao::NewVenue;

/// Fields submitted by the new-venue and edit-venue forms.
///
/// Checkboxes arrive as a present-or-absent field, so `seeking_talent` is an
/// `Option<String>` whose presence means checked.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
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
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Trim every field, dropping empty optionals, so validation and
    /// storage see canonical values.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            address: self.address.trim().to_owned(),
            phone: super::clean(self.phone),
            genres: super::clean(self.genres),
            image_link: super::clean(self.image_link),
            facebook_link: super::clean(self.facebook_link),
            website_link: super::clean(self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: super::clean(self.seeking_description),
        }
    }

    pub fn into_new_venue(self, created_at: DateTime<Utc>) -> NewVenue {
        NewVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: super::canonical_genres(self.genres),
            seeking_talent: self.seeking_talent.is_some(),
            seeking_description: self.seeking_description,
            created_at,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
