//! Home page: the ten most recently listed venues and artists.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use minijinja::context;

use crate::entities::{ArtistStore, VenueStore};
use crate::error::ServerError;
use crate::flash::Flashes;
use crate::render;
use crate::state::AppState;

/// How many newly listed venues/artists the home page features.
const RECENT_LIMIT: i64 = 10;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> Result<Response, ServerError> {
    let venues = state.store.recent_venues(RECENT_LIMIT).await?;
    let artists = state.store.recent_artists(RECENT_LIMIT).await?;

    let html = render::page(
        "pages/home.html",
        context! {
            flashes => flashes.messages(),
            venues => venues,
            artists => artists,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
