pub mod rest;

use axum::{Router, routing::get};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{error::handle_panic, service::NoteService};

/// REST routes plus the Swagger UI at `/documentation` and the OpenAPI
/// document at `/swagger.json`.
pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .merge(SwaggerUi::new("/documentation").url("/swagger.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
