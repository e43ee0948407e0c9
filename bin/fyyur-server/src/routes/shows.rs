//! Show pages: the full listing and the create form. A show is only an
//! (artist, venue, start_time) association, so there is no detail page.

use std::sync::Arc;

use axum::extract::State;
use axum::{Form, Router};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use minijinja::context;

use crate::entities::ShowStore;
use crate::error::ServerError;
use crate::flash::{Flashes, FlashMessage};
use crate::forms::ShowForm;
use crate::render;
use crate::state::AppState;
use crate::{flash, routes};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(shows_page))
        .route("/shows/create", get(create_show_form).post(create_show_submission))
}

pub async fn shows_page(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> Result<Response, ServerError> {
    let shows = state.store.list_shows().await?;
    let shows: Vec<_> = shows
        .iter()
        .map(|s| {
            context! {
                venue_id => s.venue_id,
                venue_name => s.venue_name,
                artist_id => s.artist_id,
                artist_name => s.artist_name,
                artist_image_link => s.artist_image_link,
                start_time => routes::format_start_time(&s.start_time),
            }
        })
        .collect();

    let html = render::page(
        "pages/shows.html",
        context! {
            flashes => flashes.messages(),
            shows => shows,
        },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn create_show_form(flashes: Flashes) -> Result<Response, ServerError> {
    let html = render::page(
        "forms/new_show.html",
        context! { flashes => flashes.messages() },
    )?;
    Ok(flashes.apply(html.into_response()))
}

pub async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Result<Response, ServerError> {
    let Some(show) = form.into_new_show() else {
        return Ok(flash::redirect_with(
            "/",
            &[FlashMessage::error("An error occurred. Show could not be listed.")],
        ));
    };

    match state.store.create_show(show).await {
        Ok(id) => {
            tracing::info!(show_id = id, "show listed");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::success("Show was successfully listed!")],
            ))
        }
        // A missing venue or artist surfaces as a foreign-key violation.
        Err(e) => {
            tracing::error!(error = %e, "failed to create show");
            Ok(flash::redirect_with(
                "/",
                &[FlashMessage::error("An error occurred. Show could not be listed.")],
            ))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use tower::ServiceExt as _;

    use crate::entities::testing::{sample_artist, sample_show, sample_venue};
    use crate::entities::{ArtistStore, ShowStore, VenueStore};
    use crate::routes::testing::{body_string, flashed_categories, form_post, get};
    use crate::state::test_state;

    #[tokio::test]
    async fn listing_shows_both_names() {
        let state = test_state().await;
        let venue = state
            .store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist = state
            .store
            .create_artist(sample_artist("Guns N Petals", "San Francisco", "CA"))
            .await
            .unwrap();
        state.store.create_show(sample_show(venue, artist, 7)).await.unwrap();
        let app = crate::routes::build(state);

        let response = app.oneshot(get("/shows")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("The Musical Hop"));
        assert!(body.contains("Guns N Petals"));
    }

    #[tokio::test]
    async fn create_persists_and_flashes_success() {
        let state = test_state().await;
        let venue = state
            .store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist = state
            .store
            .create_artist(sample_artist("Guns N Petals", "San Francisco", "CA"))
            .await
            .unwrap();
        let app = crate::routes::build(state.clone());

        let response = app
            .oneshot(form_post(
                "/shows/create",
                &format!("artist_id={artist}&venue_id={venue}&start_time=2035-06-15T20%3A00"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(flashed_categories(&response), vec!["success"]);
        assert_eq!(state.store.list_shows().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_with_unknown_artist_flashes_error() {
        let state = test_state().await;
        let venue = state
            .store
            .create_venue(sample_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let app = crate::routes::build(state.clone());

        let response = app
            .oneshot(form_post(
                "/shows/create",
                &format!("artist_id=99&venue_id={venue}&start_time=2035-06-15T20%3A00"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(flashed_categories(&response), vec!["error"]);
        assert!(state.store.list_shows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_bad_start_time_flashes_error() {
        let state = test_state().await;
        let app = crate::routes::build(state.clone());

        let response = app
            .oneshot(form_post(
                "/shows/create",
                "artist_id=1&venue_id=1&start_time=whenever",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(flashed_categories(&response), vec!["error"]);
    }
}
