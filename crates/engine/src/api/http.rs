//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use sheetkeeper_domain::{CharacterId, CharacterSheet, Edge, EdgeId};

use super::auth::Owner;
use super::error::ApiError;
use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        .route("/api/edges", get(list_edges))
        .route("/api/edges/{id}", get(get_edge))
        .fallback(not_found)
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn parse_character_id(raw: &str) -> Result<CharacterId, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id())
}

// =============================================================================
// Characters
// =============================================================================

async fn list_characters(
    State(app): State<Arc<App>>,
    Owner(owner): Owner,
) -> Result<Json<Vec<CharacterSheet>>, ApiError> {
    let sheets = app.use_cases.characters.list(&owner).await?;
    Ok(Json(sheets))
}

async fn create_character(
    State(app): State<Arc<App>>,
    Owner(owner): Owner,
) -> Result<impl IntoResponse, ApiError> {
    let sheet = app.use_cases.characters.create(&owner).await?;
    let location = format!("/api/characters/{}", sheet.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sheet),
    ))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let id = parse_character_id(&id)?;
    let sheet = app
        .use_cases
        .characters
        .get(&owner, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(sheet))
}

async fn update_character(
    State(app): State<Arc<App>>,
    Owner(owner): Owner,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let id = parse_character_id(&id)?;
    let Json(patch) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let sheet = app
        .use_cases
        .characters
        .update(&owner, id, &patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(sheet))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_character_id(&id)?;
    if app.use_cases.characters.delete(&owner, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

// =============================================================================
// Edges
// =============================================================================

async fn list_edges(State(app): State<Arc<App>>) -> Result<Json<Vec<Edge>>, ApiError> {
    Ok(Json(app.use_cases.edges.list().await?))
}

async fn get_edge(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Edge>, ApiError> {
    let id: EdgeId = id.parse().map_err(|_| ApiError::invalid_id())?;
    let edge = app
        .use_cases
        .edges
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(edge))
}
