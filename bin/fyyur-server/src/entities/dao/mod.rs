pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistRef, ArtistSearchRow, NewArtist};
pub use show::{ArtistShowRow, NewShow, ShowListing, VenueShowRow};
pub use venue::{NewVenue, Venue, VenueOverviewRow};
