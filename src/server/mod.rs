mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    handler::Handler,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::Error;
use crate::server::handlers::{admin, ambassadors, controller_actions, vanity};

pub fn router(api: DynAPI) -> Router {
    let vanity_api = api.clone();

    Router::new()
        .route("/", get(root))
        .route("/api/controller-actions", post(controller_actions::apply))
        .route(
            "/api/ambassador-redirect/:username",
            get(ambassadors::redirect),
        )
        .route("/api/admin/signups", get(admin::list))
        .route("/api/admin/signups/:email", get(admin::find))
        .route("/api/admin/free-members", get(admin::free_members))
        .route("/api/admin/premium-members", get(admin::premium_members))
        .route("/api/admin/rejected", get(admin::rejected))
        .fallback((move |uri: Uri| vanity::resolve(vanity_api.clone(), uri)).into_service())
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(Error::io_error)
}

async fn root() -> &'static str {
    "academy signups"
}
