use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service::{
    directory::{record::parse_id, Record},
    pagination::{Page, PageQuery},
};
use tracing::info;

use crate::{errors::ApiError, routes::ServerState};

/// A path segment that is not an integer matches no record.
fn resolve_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or(ApiError::NotFound)
}

#[utoipa::path(
    get, path = "/directories", tag = "directories",
    params(crate::openapi::PageParams),
    responses((status = 200, description = "Paginated directories", body = crate::openapi::DirectoryPageDoc))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Page<Record>> {
    let pagination = PageQuery::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))).resolve();
    let page = state.directories.page(pagination).await;
    info!(page = page.page, page_size = page.page_size, count = page.count, "list directories");
    Json(page)
}

#[utoipa::path(
    post, path = "/directories", tag = "directories",
    request_body = crate::openapi::DirectoryInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::DirectoryDoc))
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<Record>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let created = state.directories.create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/directories/{id}", tag = "directories",
    params(("id" = i64, Path, description = "Directory id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::DirectoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = resolve_id(&id)?;
    Ok(Json(state.directories.get(id).await?))
}

#[utoipa::path(
    put, path = "/directories/{id}", tag = "directories",
    params(("id" = i64, Path, description = "Directory id")),
    request_body = crate::openapi::DirectoryInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::DirectoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Record>,
) -> Result<Json<Record>, ApiError> {
    let id = resolve_id(&id)?;
    Ok(Json(state.directories.replace(id, body).await?))
}

#[utoipa::path(
    patch, path = "/directories/{id}", tag = "directories",
    params(("id" = i64, Path, description = "Directory id")),
    request_body = crate::openapi::DirectoryInputDoc,
    responses(
        (status = 200, description = "Patched", body = crate::openapi::DirectoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Record>,
) -> Result<Json<Record>, ApiError> {
    let id = resolve_id(&id)?;
    Ok(Json(state.directories.patch(id, body).await?))
}

#[utoipa::path(
    delete, path = "/directories/{id}", tag = "directories",
    params(("id" = i64, Path, description = "Directory id")),
    responses(
        (status = 200, description = "Removed record", body = crate::openapi::DirectoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = resolve_id(&id)?;
    Ok(Json(state.directories.remove(id).await?))
}
