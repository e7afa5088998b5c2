use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel, QueryOrder};

use crate::common::{ApiJson, ApiPath, AppState, MessageResponse};
use crate::entity::{irrigators, zones};
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{IrrigatorPayload, IrrigatorResponse, StatusPayload, parse_status};

const NOT_FOUND: &str = "Irrigador não encontrado";

async fn find_irrigator(state: &AppState, id: i32) -> AppResult<irrigators::Model> {
    irrigators::Entity::find_by_id(id)
        .one(&*state.db)
        .await
        .context("Erro ao buscar irrigador")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// List irrigators with their zone name
#[utoipa::path(
    get,
    path = "/api/irrigadores",
    responses(
        (status = 200, description = "Irrigators retrieved successfully", body = Vec<IrrigatorResponse>),
    ),
    tag = "irrigacao"
)]
pub async fn list_irrigators(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<IrrigatorResponse>>> {
    let rows = irrigators::Entity::find()
        .find_also_related(zones::Entity)
        .order_by_asc(irrigators::Column::Id)
        .all(&*state.db)
        .await
        .context("Erro ao buscar irrigadores")?;

    Ok(Json(
        rows.into_iter()
            .map(|(irrigator, zone)| IrrigatorResponse::new(irrigator, zone))
            .collect(),
    ))
}

/// Get an irrigator by ID
#[utoipa::path(
    get,
    path = "/api/irrigadores/{id}",
    params(("id" = i32, Path, description = "Irrigator ID")),
    responses(
        (status = 200, description = "Irrigator retrieved successfully", body = IrrigatorResponse),
        (status = 404, description = "Irrigator not found"),
    ),
    tag = "irrigacao"
)]
pub async fn get_irrigator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<IrrigatorResponse>> {
    let (irrigator, zone) = irrigators::Entity::find_by_id(id)
        .find_also_related(zones::Entity)
        .one(&*state.db)
        .await
        .context("Erro ao buscar irrigador")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(IrrigatorResponse::new(irrigator, zone)))
}

/// Install an irrigator in a zone
#[utoipa::path(
    post,
    path = "/api/irrigadores",
    request_body = IrrigatorPayload,
    responses(
        (status = 201, description = "Irrigator created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "irrigacao"
)]
pub async fn create_irrigator(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<IrrigatorPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let row = payload.into_new()?;

    let inserted = irrigators::Entity::insert(row)
        .exec(&*state.db)
        .await
        .context("Erro ao criar irrigador")?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(
            "Irrigador criado com sucesso",
            i64::from(inserted.last_insert_id),
        )),
    ))
}

/// Update any subset of an irrigator's fields
#[utoipa::path(
    put,
    path = "/api/irrigadores/{id}",
    params(("id" = i32, Path, description = "Irrigator ID")),
    request_body = IrrigatorPayload,
    responses(
        (status = 200, description = "Irrigator updated", body = MessageResponse),
        (status = 400, description = "No field to update or invalid field"),
        (status = 404, description = "Irrigator not found"),
    ),
    tag = "irrigacao"
)]
pub async fn update_irrigator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<IrrigatorPayload>,
) -> AppResult<Json<MessageResponse>> {
    let mut row = find_irrigator(&state, id).await?.into_active_model();

    if payload.apply(&mut row)? == 0 {
        return Err(AppError::BadRequest("Nenhum campo para atualizar".to_string()));
    }

    row.update(&*state.db)
        .await
        .context("Erro ao atualizar irrigador")?;

    Ok(Json(MessageResponse::new("Irrigador atualizado com sucesso")))
}

/// Change an irrigator's operational status
#[utoipa::path(
    put,
    path = "/api/irrigadores/{id}/status",
    params(("id" = i32, Path, description = "Irrigator ID")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Missing or unknown status"),
        (status = 404, description = "Irrigator not found"),
    ),
    tag = "irrigacao"
)]
pub async fn update_irrigator_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<StatusPayload>,
) -> AppResult<Json<MessageResponse>> {
    let label = payload
        .status
        .ok_or_else(|| AppError::BadRequest("Status é obrigatório".to_string()))?;
    let status = parse_status(&label)?;

    let mut row = find_irrigator(&state, id).await?.into_active_model();
    row.status = Set(status);
    row.update(&*state.db)
        .await
        .context("Erro ao atualizar status do irrigador")?;

    tracing::info!(id, status = %label, "Irrigator status changed");

    Ok(Json(MessageResponse::new(
        "Status do irrigador atualizado com sucesso",
    )))
}

/// Delete an irrigator
#[utoipa::path(
    delete,
    path = "/api/irrigadores/{id}",
    params(("id" = i32, Path, description = "Irrigator ID")),
    responses(
        (status = 200, description = "Irrigator deleted", body = MessageResponse),
        (status = 404, description = "Irrigator not found"),
    ),
    tag = "irrigacao"
)]
pub async fn delete_irrigator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    find_irrigator(&state, id).await?;

    irrigators::Entity::delete_by_id(id)
        .exec(&*state.db)
        .await
        .context("Erro ao remover irrigador")?;

    Ok(Json(MessageResponse::new("Irrigador removido com sucesso")))
}
