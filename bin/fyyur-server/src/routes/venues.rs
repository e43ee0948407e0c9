//! Venue pages: overview grouped by area, search, detail with past and
//! upcoming shows, create, edit, delete.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Form, Router};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use minijinja::context;
use validator::Validate as _;

use crate::entities::dao::{VenueOverviewRow, VenueShowRow};
use crate::entities::{ShowStore, VenueStore};
use crate::error::ServerError;
use crate::flash::{Flashes, FlashMessage};
use crate::forms::{SearchParams, VenueForm};
use crate::render;
use crate::state::AppState;
use crate::{flash, routes};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(venues_page))
        .route("/venues/search", get(search_venues).post(search_venues_form))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route(
            "/venues/{id}/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}

/// One (city, state) group on the overview page.
#[derive(Debug, serde::Serialize)]
struct Area {
    city: String,
    state: String,
    venues: Vec<VenueOverviewRow>,
}

/// Rows arrive ordered by (state, city), so one pass over consecutive rows
/// builds the area groups.
fn group_by_area(rows: Vec<VenueOverviewRow>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    for row in rows {
        let same_area = areas
            .last()
            .is_some_and(|a| a.city == row.city && a.state == row.state);
        if !same_area {
            areas.push(Area {
                city: row.city.clone(),
                state: row.state.clone(),
                venues: Vec::new(),
            });
        }
        if let Some(area) = areas.last_mut() {
            area.venues.push(row);
        }
    }
    areas
}

pub async fn venues_page(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> Result<Response, ServerError> {
    let rows = state.store.venue_overview(Utc::now()).await?;
    let html = render::page(
        "pages/venues.html",
        context! {
            flashes => flashes.messages(),
            areas => group_by_area(rows),
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

async fn render_search(
    state: &AppState,
    flashes: Flashes,
    term: &str,
) -> Result<Response, ServerError> {
    let results = state.store.search_venues(term, Utc::now()).await?;
    let html = render::page(
        "pages/search_venues.html",
        context! {
            flashes => flashes.messages(),
            search_term => term,
            count => results.len(),
            data => results,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Query(params): Query<SearchParams>,
) -> Result<Response, ServerError> {
    render_search(&state, flashes, params.term()).await
}

pub async fn search_venues_form(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Form(params): Form<SearchParams>,
) -> Result<Response, ServerError> {
    render_search(&state, flashes, params.term()).await
}

fn show_context(show: &VenueShowRow) -> minijinja::Value {
    context! {
        artist_id => show.artist_id,
        artist_name => show.artist_name,
        artist_image_link => show.artist_image_link,
        start_time => routes::format_start_time(&show.start_time),
    }
}

pub async fn show_venue(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    let venue = state
        .store
        .get_venue(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("venue {id}")))?;

    let now = Utc::now();
    let past_shows = state.store.past_shows_for_venue(id, now).await?;
    let upcoming_shows = state.store.upcoming_shows_for_venue(id, now).await?;

    let html = render::page(
        "pages/show_venue.html",
        context! {
            flashes => flashes.messages(),
            venue => context! {
                id => venue.id,
                name => venue.name,
                genres => venue.genre_list(),
                address => venue.address,
                city => venue.city,
                state => venue.state,
                phone => venue.phone,
                website_link => venue.website_link,
                facebook_link => venue.facebook_link,
                seeking_talent => venue.seeking_talent,
                seeking_description => venue.seeking_description,
                image_link => venue.image_link,
                past_shows => past_shows.iter().map(show_context).collect::<Vec<_>>(),
                upcoming_shows => upcoming_shows.iter().map(show_context).collect::<Vec<_>>(),
                past_shows_count => past_shows.len(),
                upcoming_shows_count => upcoming_shows.len(),
            },
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn create_venue_form(flashes: Flashes) -> Result<Response, ServerError> {
    let html = render::page(
        "forms/new_venue.html",
        context! { flashes => flashes.messages() },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Result<Response, ServerError> {
    let form = form.normalized();
    let name = form.name.clone();

    if form.validate().is_err() {
        return Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error(format!(
                "An error occurred. Venue {name} could not be listed."
            ))],
        ));
    }

    match state.store.create_venue(form.into_new_venue(Utc::now())).await {
        Ok(id) => {
            tracing::info!(venue_id = id, name = %name, "venue listed");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::success(format!(
                    "Venue {name} was successfully listed!"
                ))],
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create venue");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::error(format!(
                    "An error occurred. Venue {name} could not be listed."
                ))],
            ))
        }
    }
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    let Some(venue) = state.store.get_venue(id).await? else {
        return Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error("Venue was not deleted successfully.")],
        ));
    };

    match state.store.delete_venue(id).await {
        Ok(true) => Ok(flash::redirect_with(
            "/",
            &[FlashMessage::success(format!(
                "Venue {} was deleted successfully!",
                venue.name
            ))],
        )),
        Ok(false) => Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error("Venue was not deleted successfully.")],
        )),
        Err(e) => {
            tracing::error!(error = %e, venue_id = id, "failed to delete venue");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::error("Venue was not deleted successfully.")],
            ))
        }
    }
}

pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    let venue = state
        .store
        .get_venue(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("venue {id}")))?;

    let html = render::page(
        "forms/edit_venue.html",
        context! {
            flashes => flashes.messages(),
            venue => venue,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Result<Response, ServerError> {
    let form = form.normalized();
    let name = form.name.clone();
    let location = format!("/venues/{id}");

    if form.validate().is_err() {
        return Ok(flash::redirect_with(
            &location,
            &[FlashMessage::error("Venue was not edited successfully.")],
        ));
    }

    match state.store.update_venue(id, form.into_new_venue(Utc::now())).await {
        Ok(true) => Ok(flash::redirect_with(
            &location,
            &[FlashMessage::success(format!("Venue {name} edited successfully"))],
        )),
        Ok(false) => Err(ServerError::NotFound(format!("venue {id}"))),
        Err(e) => {
            tracing::error!(error = %e, venue_id = id, "failed to update venue");
            Ok(flash::redirect_with(
                &location,
                &[FlashMessage::error("Venue was not edited successfully.")],
            ))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
