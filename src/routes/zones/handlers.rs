use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder};

use crate::common::{ApiJson, ApiPath, AppState, MessageResponse};
use crate::entity::{properties, zones};
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{ZonePayload, ZoneResponse};

const NOT_FOUND: &str = "Zona não encontrada";

async fn find_zone(state: &AppState, id: i32) -> AppResult<zones::Model> {
    zones::Entity::find_by_id(id)
        .one(&*state.db)
        .await
        .context("Erro ao buscar zona")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// List zones with their property name
#[utoipa::path(
    get,
    path = "/api/zonas",
    responses(
        (status = 200, description = "Zones retrieved successfully", body = Vec<ZoneResponse>),
    ),
    tag = "irrigacao"
)]
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<Vec<ZoneResponse>>> {
    let rows = zones::Entity::find()
        .find_also_related(properties::Entity)
        .order_by_asc(zones::Column::Id)
        .all(&*state.db)
        .await
        .context("Erro ao buscar zonas")?;

    Ok(Json(
        rows.into_iter()
            .map(|(zone, property)| ZoneResponse::new(zone, property))
            .collect(),
    ))
}

/// Get a zone by ID
#[utoipa::path(
    get,
    path = "/api/zonas/{id}",
    params(("id" = i32, Path, description = "Zone ID")),
    responses(
        (status = 200, description = "Zone retrieved successfully", body = ZoneResponse),
        (status = 404, description = "Zone not found"),
    ),
    tag = "irrigacao"
)]
pub async fn get_zone(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ZoneResponse>> {
    let (zone, property) = zones::Entity::find_by_id(id)
        .find_also_related(properties::Entity)
        .one(&*state.db)
        .await
        .context("Erro ao buscar zona")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(ZoneResponse::new(zone, property)))
}

/// Create a zone
#[utoipa::path(
    post,
    path = "/api/zonas",
    request_body = ZonePayload,
    responses(
        (status = 201, description = "Zone created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "irrigacao"
)]
pub async fn create_zone(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ZonePayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let row = payload.into_new()?;

    let inserted = zones::Entity::insert(row)
        .exec(&*state.db)
        .await
        .context("Erro ao criar zona")?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(
            "Zona criada com sucesso",
            i64::from(inserted.last_insert_id),
        )),
    ))
}

/// Update any subset of a zone's fields
#[utoipa::path(
    put,
    path = "/api/zonas/{id}",
    params(("id" = i32, Path, description = "Zone ID")),
    request_body = ZonePayload,
    responses(
        (status = 200, description = "Zone updated", body = MessageResponse),
        (status = 400, description = "No field to update or invalid field"),
        (status = 404, description = "Zone not found"),
    ),
    tag = "irrigacao"
)]
pub async fn update_zone(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ZonePayload>,
) -> AppResult<Json<MessageResponse>> {
    let mut row = find_zone(&state, id).await?.into_active_model();

    if payload.apply(&mut row)? == 0 {
        return Err(AppError::BadRequest("Nenhum campo para atualizar".to_string()));
    }

    row.update(&*state.db)
        .await
        .context("Erro ao atualizar zona")?;

    Ok(Json(MessageResponse::new("Zona atualizada com sucesso")))
}

/// Delete a zone
#[utoipa::path(
    delete,
    path = "/api/zonas/{id}",
    params(("id" = i32, Path, description = "Zone ID")),
    responses(
        (status = 200, description = "Zone deleted", body = MessageResponse),
        (status = 400, description = "Zone still referenced by irrigators, sectors or decisions"),
        (status = 404, description = "Zone not found"),
    ),
    tag = "irrigacao"
)]
pub async fn delete_zone(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    find_zone(&state, id).await?;

    zones::Entity::delete_by_id(id)
        .exec(&*state.db)
        .await
        .context("Erro ao remover zona")?;

    Ok(Json(MessageResponse::new("Zona removida com sucesso")))
}
