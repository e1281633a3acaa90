use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};

use crate::api::{ActionOutcome, ActionRequest, DynAPI};
use crate::error::Error;

/// Malformed or mistyped bodies are invalid input like missing fields.
pub async fn apply(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<ActionOutcome>, Error> {
    let Json(params) = params.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected controller action body");
        Error::invalid_input_error().with_message("invalid request body")
    })?;

    let outcome = api.apply_action(params).await?;

    Ok(outcome.into())
}
