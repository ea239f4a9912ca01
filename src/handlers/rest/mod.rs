use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{self, CreateNoteRequest, ListNotesQuery, NoteResponse, UpdateNoteRequest},
    error::{ApiError, ErrorResponse},
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Notepad API Documentation"),
    paths(
        get_all_notes,
        create_note,
        get_one_note,
        update_note,
        delete_note
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Notes, optionally filtered by title", body = Vec<NoteResponse>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let Query(query) = query?;
    let filter = query.validate()?;

    Ok(Json(service.get_all_notes(filter.as_deref()).await))
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Invalid note", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let Json(payload) = payload?;
    let new_note = payload.validate()?;

    Ok((StatusCode::CREATED, Json(service.create_note(new_note).await)))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let Path(id) = id?;
    let id = dto::parse_note_id(&id)?;

    Ok(Json(service.get_one_note(id).await?))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Invalid note ID or note", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Body ID does not match path ID", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let Path(id) = id?;
    let id = dto::parse_note_id(&id)?;
    let Json(payload) = payload?;
    let patch = payload.validate()?;

    Ok(Json(service.update_note(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted, final state returned", body = NoteResponse),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let Path(id) = id?;
    let id = dto::parse_note_id(&id)?;

    Ok(Json(service.delete_note(id).await?))
}
