//! Template rendering.
//!
//! All templates are embedded at compile time with `include_str!`, so the
//! binary is self-contained and the [`Environment`] can live for the whole
//! process in a [`OnceLock`].

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::Environment;

use crate::error::ServerError;

static TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("pages/home.html", include_str!("../templates/pages/home.html")),
    ("pages/venues.html", include_str!("../templates/pages/venues.html")),
    (
        "pages/search_venues.html",
        include_str!("../templates/pages/search_venues.html"),
    ),
    (
        "pages/show_venue.html",
        include_str!("../templates/pages/show_venue.html"),
    ),
    ("pages/artists.html", include_str!("../templates/pages/artists.html")),
    (
        "pages/search_artists.html",
        include_str!("../templates/pages/search_artists.html"),
    ),
    (
        "pages/show_artist.html",
        include_str!("../templates/pages/show_artist.html"),
    ),
    ("pages/shows.html", include_str!("../templates/pages/shows.html")),
    ("forms/new_venue.html", include_str!("../templates/forms/new_venue.html")),
    (
        "forms/edit_venue.html",
        include_str!("../templates/forms/edit_venue.html"),
    ),
    ("forms/new_artist.html", include_str!("../templates/forms/new_artist.html")),
    (
        "forms/edit_artist.html",
        include_str!("../templates/forms/edit_artist.html"),
    ),
    ("forms/new_show.html", include_str!("../templates/forms/new_show.html")),
    ("errors/404.html", include_str!("../templates/errors/404.html")),
    ("errors/500.html", include_str!("../templates/errors/500.html")),
];

fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("embedded template must parse");
        }
        env
    })
}

/// Render a page template with the given context.
pub fn page(name: &str, ctx: minijinja::Value) -> Result<Html<String>, ServerError> {
    let body = environment().get_template(name)?.render(ctx)?;
    Ok(Html(body))
}

/// Render the 404 or 500 error page. Falls back to a plain-text body if the
/// error template itself fails, so error reporting can never recurse.
pub fn error_page(status: StatusCode) -> Response {
    let name = if status == StatusCode::NOT_FOUND {
        "errors/404.html"
    } else {
        "errors/500.html"
    };
    match page(name, minijinja::context! {}) {
        Ok(html) => (status, html).into_response(),
        Err(_) => (status, status.canonical_reason().unwrap_or("error").to_owned()).into_response(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
