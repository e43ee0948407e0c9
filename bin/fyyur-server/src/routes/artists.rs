//! Artist pages: listing, search, detail with past and upcoming shows,
//! create, edit, delete.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Form, Router};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use minijinja::context;
use validator::Validate as _;

use crate::entities::dao::ArtistShowRow;
use crate::entities::{ArtistStore, ShowStore};
use crate::error::ServerError;
use crate::flash::{Flashes, FlashMessage};
use crate::forms::{ArtistForm, SearchParams};
use crate::render;
use crate::state::AppState;
use crate::{flash, routes};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(artists_page))
        .route("/artists/search", get(search_artists).post(search_artists_form))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/{id}", get(show_artist).delete(delete_artist))
        .route(
            "/artists/{id}/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}

pub async fn artists_page(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> Result<Response, ServerError> {
    let artists = state.store.list_artists().await?;
    let html = render::page(
        "pages/artists.html",
        context! {
            flashes => flashes.messages(),
            artists => artists,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

async fn render_search(
    state: &AppState,
    flashes: Flashes,
    term: &str,
) -> Result<Response, ServerError> {
    let results = state.store.search_artists(term, Utc::now()).await?;
    let html = render::page(
        "pages/search_artists.html",
        context! {
            flashes => flashes.messages(),
            search_term => term,
            count => results.len(),
            data => results,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Query(params): Query<SearchParams>,
) -> Result<Response, ServerError> {
    render_search(&state, flashes, params.term()).await
}

pub async fn search_artists_form(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Form(params): Form<SearchParams>,
) -> Result<Response, ServerError> {
    render_search(&state, flashes, params.term()).await
}

fn show_context(show: &ArtistShowRow) -> minijinja::Value {
    context! {
        venue_id => show.venue_id,
        venue_name => show.venue_name,
        venue_image_link => show.venue_image_link,
        start_time => routes::format_start_time(&show.start_time),
    }
}

pub async fn show_artist(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    let artist = state
        .store
        .get_artist(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("artist {id}")))?;

    let now = Utc::now();
    let past_shows = state.store.past_shows_for_artist(id, now).await?;
    let upcoming_shows = state.store.upcoming_shows_for_artist(id, now).await?;

    let html = render::page(
        "pages/show_artist.html",
        context! {
            flashes => flashes.messages(),
            artist => context! {
                id => artist.id,
                name => artist.name,
                genres => artist.genre_list(),
                city => artist.city,
                state => artist.state,
                phone => artist.phone,
                website_link => artist.website_link,
                facebook_link => artist.facebook_link,
                seeking_venue => artist.seeking_venue,
                seeking_description => artist.seeking_description,
                image_link => artist.image_link,
                past_shows => past_shows.iter().map(show_context).collect::<Vec<_>>(),
                upcoming_shows => upcoming_shows.iter().map(show_context).collect::<Vec<_>>(),
                past_shows_count => past_shows.len(),
                upcoming_shows_count => upcoming_shows.len(),
            },
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn create_artist_form(flashes: Flashes) -> Result<Response, ServerError> {
    let html = render::page(
        "forms/new_artist.html",
        context! { flashes => flashes.messages() },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, ServerError> {
    let form = form.normalized();
    let name = form.name.clone();

    if form.validate().is_err() {
        return Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error(format!(
                "An error occurred. Artist {name} could not be added"
            ))],
        ));
    }

    match state.store.create_artist(form.into_new_artist(Utc::now())).await {
        Ok(id) => {
            tracing::info!(artist_id = id, name = %name, "artist listed");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::success(format!(
                    "Artist {name} was successfully listed!"
                ))],
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create artist");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::error(format!(
                    "An error occurred. Artist {name} could not be added"
                ))],
            ))
        }
    }
}

pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    let Some(artist) = state.store.get_artist(id).await? else {
        return Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error("Artist was not deleted successfully.")],
        ));
    };

    match state.store.delete_artist(id).await {
        Ok(true) => Ok(flash::redirect_with(
            "/",
            &[FlashMessage::success(format!(
                "Artist {} was deleted successfully!",
                artist.name
            ))],
        )),
        Ok(false) => Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error("Artist was not deleted successfully.")],
        )),
        Err(e) => {
            tracing::error!(error = %e, artist_id = id, "failed to delete artist");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::error("Artist was not deleted successfully.")],
            ))
        }
    }
}

pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    let artist = state
        .store
        .get_artist(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("artist {id}")))?;

    let html = render::page(
        "forms/edit_artist.html",
        context! {
            flashes => flashes.messages(),
            artist => artist,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, ServerError> {
    let form = form.normalized();
    let name = form.name.clone();
    let location = format!("/artists/{id}");

    if form.validate().is_err() {
        return Ok(flash::redirect_with(
            &location,
            &[FlashMessage::error("Artist was not edited successfully.")],
        ));
    }

    match state.store.update_artist(id, form.into_new_artist(Utc::now())).await {
        Ok(true) => Ok(flash::redirect_with(
            &location,
            &[FlashMessage::success(format!(
                "Artist {name} was successfully edited!"
            ))],
        )),
        Ok(false) => Err(ServerError::NotFound(format!("artist {id}"))),
        Err(e) => {
            tracing::error!(error = %e, artist_id = id, "failed to update artist");
            Ok(flash::redirect_with(
                &location,
                &[FlashMessage::error("Artist was not edited successfully.")],
            ))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
