//! One-shot flash messages, carried between a mutation and the next page
//! render in an HttpOnly cookie.
//!
//! The payload is a JSON array of `{category, message}` pairs, base64url
//! encoded so it stays within the cookie value grammar. Whoever renders the
//! messages clears the cookie, so each message is shown exactly once.

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Either `"success"` or `"error"`; templates use it as a CSS class.
    pub category: String,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: "success".to_owned(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: "error".to_owned(),
            message: message.into(),
        }
    }
}

/// Extractor for the flash messages waiting in the request cookie.
///
/// Page handlers take this, pass [`Flashes::messages`] into the template
/// context, and wrap their response with [`Flashes::apply`] so the cookie is
/// cleared once the messages have been shown.
#[derive(Debug, Default)]
pub struct Flashes(Vec<FlashMessage>);

impl Flashes {
    pub fn messages(&self) -> &[FlashMessage] {
        &self.0
    }

    /// Attach the clear-cookie header when messages were consumed.
    pub fn apply(self, mut response: Response) -> Response {
        if !self.0.is_empty() {
            response.headers_mut().append(SET_COOKIE, clear_cookie());
        }
        response
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Flashes {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let messages = parts
            .headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(cookie_value)
            .map(decode)
            .unwrap_or_default();
        Ok(Flashes(messages))
    }
}

/// Redirect to `location`, flashing `messages` for the next page render.
pub fn redirect_with(location: &str, messages: &[FlashMessage]) -> Response {
    let mut response = Redirect::to(location).into_response();
    response.headers_mut().append(SET_COOKIE, set_cookie(messages));
    response
}

fn set_cookie(messages: &[FlashMessage]) -> HeaderValue {
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(messages).unwrap_or_default());
    let cookie = format!("{FLASH_COOKIE}={payload}; Path=/; HttpOnly; SameSite=Lax");
    // base64url and fixed attributes only; always a valid header value.
    HeaderValue::from_str(&cookie).expect("flash cookie is ASCII")
}

fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("fyyur_flash=; Path=/; HttpOnly; Max-Age=0")
}

/// Pull the flash cookie's value out of a `Cookie:` header.
fn cookie_value(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == FLASH_COOKIE).then_some(value)
    })
}

fn decode(value: &str) -> Vec<FlashMessage> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_through_cookie_value() {
        let messages = vec![
            FlashMessage::success("Venue The Musical Hop was successfully listed!"),
            FlashMessage::error("An error occurred."),
        ];
        let header = set_cookie(&messages);
        let header = header.to_str().unwrap();
        let value = cookie_value(header.split_once(';').unwrap().0).unwrap();
        let decoded = decode(value);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].category, "success");
        assert_eq!(decoded[1].message, "An error occurred.");
    }

    #[test]
    fn cookie_value_finds_flash_among_other_cookies() {
        let header = "theme=dark; fyyur_flash=abc123; lang=en";
        assert_eq!(cookie_value(header), Some("abc123"));
        assert_eq!(cookie_value("theme=dark"), None);
    }

    #[test]
    fn garbage_cookie_decodes_to_no_messages() {
        assert!(decode("%%not-base64%%").is_empty());
        assert!(decode("aGVsbG8").is_empty());
    }

    #[test]
    fn redirect_sets_cookie_and_location() {
        let resp = redirect_with("/venues/3", &[FlashMessage::success("ok")]);
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/venues/3");
        let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("fyyur_flash="));
    }
}
