use axum::extract::{Extension, Json, Path};

use crate::api::DynAPI;
use crate::entities::SignupRecord;
use crate::error::Error;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<SignupRecord>>, Error> {
    let records = api.list_signups().await?;

    Ok(records.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(email): Path<String>,
) -> Result<Json<SignupRecord>, Error> {
    let record = api.find_signup(&email).await?;

    Ok(record.into())
}

pub async fn free_members(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<SignupRecord>>, Error> {
    let records = api.approved_free_members().await?;

    Ok(records.into())
}

pub async fn premium_members(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<SignupRecord>>, Error> {
    let records = api.premium_members().await?;

    Ok(records.into())
}

pub async fn rejected(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<SignupRecord>>, Error> {
    let records = api.rejected_signups().await?;

    Ok(records.into())
}
