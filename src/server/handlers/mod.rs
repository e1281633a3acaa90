pub mod admin;
pub mod ambassadors;
pub mod controller_actions;
pub mod vanity;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Plain 302, which is what browsers following vanity links expect.
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}
