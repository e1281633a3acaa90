use axum::extract::{Extension, Path};
use axum::response::Response;

use super::found;
use crate::api::DynAPI;
use crate::error::Error;

pub async fn redirect(
    Extension(api): Extension<DynAPI>,
    Path(username): Path<String>,
) -> Result<Response, Error> {
    let ambassador = api
        .find_ambassador(&username)
        .await?
        .ok_or_else(|| Error::not_found_error().with_message("ambassador not found"))?;

    Ok(found(api.referral_url(&ambassador)?))
}
