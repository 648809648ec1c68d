use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};
use validator::Validate;

use bp_calc_domain::services::ReadingServiceTrait;

use crate::api::error::ApiError;
use crate::entities::common::StatusMessage;
use crate::entities::reading::{CreateReadingRequest, ReadingResponse};

/// Service type shared by the reading handlers
pub type SharedReadingService = Arc<dyn ReadingServiceTrait + Send + Sync>;

/// List every stored reading
#[utoipa::path(
    get,
    path = "/api/bpcalc/",
    responses(
        (status = 200, description = "All stored readings", body = [ReadingResponse]),
        (status = 500, description = "Storage failure", body = String),
    ),
    tag = "readings"
)]
#[instrument(skip(service))]
pub async fn list_readings(
    State(service): State<SharedReadingService>,
) -> Result<Json<Vec<ReadingResponse>>, ApiError> {
    let readings = service.list().await?;
    info!("Listing {} readings", readings.len());

    Ok(Json(readings.into_iter().map(ReadingResponse::from).collect()))
}

/// Fetch a single reading
#[utoipa::path(
    get,
    path = "/api/bpcalc/{id}",
    params(
        ("id" = String, Path, description = "Reading identifier")
    ),
    responses(
        (status = 200, description = "Reading found", body = ReadingResponse),
        (status = 404, description = "No reading with this id", body = StatusMessage),
        (status = 500, description = "Storage failure", body = String),
    ),
    tag = "readings"
)]
#[instrument(skip(service))]
pub async fn get_reading(
    State(service): State<SharedReadingService>,
    Path(id): Path<String>,
) -> Result<Json<ReadingResponse>, ApiError> {
    let reading = service.get(&id).await?;

    Ok(Json(ReadingResponse::from(reading)))
}

/// Submit a reading for validation, classification and storage
#[utoipa::path(
    post,
    path = "/api/bpcalc/",
    request_body = CreateReadingRequest,
    responses(
        (status = 202, description = "Reading stored; message carries the category", body = StatusMessage),
        (status = 400, description = "Malformed request", body = StatusMessage),
        (status = 416, description = "Reading rejected; message carries the reason", body = StatusMessage),
        (status = 500, description = "Storage failure", body = String),
    ),
    tag = "readings"
)]
#[instrument(skip(service, payload))]
pub async fn create_reading(
    State(service): State<SharedReadingService>,
    payload: Result<Json<CreateReadingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let reading = request.into_new_reading()?;

    let submission = service.submit(reading).await?;
    info!("Reading {} stored as {}", submission.id, submission.category);

    Ok((
        StatusCode::ACCEPTED,
        Json(StatusMessage::new(
            StatusCode::ACCEPTED.as_u16(),
            submission.category.to_string(),
        )),
    ))
}

/// Delete a reading; unknown ids are not an error
#[utoipa::path(
    delete,
    path = "/api/bpcalc/{id}",
    params(
        ("id" = String, Path, description = "Reading identifier")
    ),
    responses(
        (status = 204, description = "Reading deleted, or never existed"),
        (status = 500, description = "Storage failure", body = String),
    ),
    tag = "readings"
)]
#[instrument(skip(service))]
pub async fn delete_reading(
    State(service): State<SharedReadingService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = service.remove(&id).await?;
    info!("Deleted {} reading(s) for id {}", deleted, id);

    Ok(StatusCode::NO_CONTENT)
}
