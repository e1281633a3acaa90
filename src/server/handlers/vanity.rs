use axum::http::Uri;
use axum::response::{IntoResponse, Response};

use super::found;
use crate::api::DynAPI;
use crate::error::Error;

/// `/<username>` pages. Every outcome is a redirect: to the signup page
/// with the ambassador's referral id, or to the site root.
///
/// The signup page itself is served by the site front end; it is never
/// read as a username, so a referral link cannot bounce back to `/`.
pub async fn resolve(api: DynAPI, uri: Uri) -> Response {
    if uri.path().trim_end_matches('/') == api.signup_page_path().trim_end_matches('/') {
        return Error::not_found_error()
            .with_message("signup page is not served here")
            .into_response();
    }

    let username = uri.path().trim_matches('/');

    if username.is_empty() || username.contains('/') {
        return found("/");
    }

    match api.find_ambassador(username).await {
        Ok(Some(ambassador)) => match api.referral_url(&ambassador) {
            Ok(url) => found(url),
            Err(_) => found("/"),
        },
        _ => found("/"),
    }
}
