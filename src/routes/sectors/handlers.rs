use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder};

use crate::common::{ApiJson, ApiPath, AppState, MessageResponse};
use crate::db;
use crate::entity::{properties, sectors};
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{SchedulePayload, SectorPayload, SectorResponse};

const NOT_FOUND: &str = "Setor não encontrado";

async fn find_sector(state: &AppState, id: i32) -> AppResult<sectors::Model> {
    sectors::Entity::find_by_id(id)
        .one(&*state.db)
        .await
        .context("Erro ao buscar setor")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// List sectors with their property name
#[utoipa::path(
    get,
    path = "/api/setores",
    responses(
        (status = 200, description = "Sectors retrieved successfully", body = Vec<SectorResponse>),
    ),
    tag = "irrigacao"
)]
pub async fn list_sectors(State(state): State<AppState>) -> AppResult<Json<Vec<SectorResponse>>> {
    let rows = sectors::Entity::find()
        .find_also_related(properties::Entity)
        .order_by_asc(sectors::Column::Id)
        .all(&*state.db)
        .await
        .context("Erro ao buscar setores")?;

    Ok(Json(
        rows.into_iter()
            .map(|(sector, property)| SectorResponse::new(sector, property))
            .collect(),
    ))
}

/// Get a sector by ID
#[utoipa::path(
    get,
    path = "/api/setores/{id}",
    params(("id" = i32, Path, description = "Sector ID")),
    responses(
        (status = 200, description = "Sector retrieved successfully", body = SectorResponse),
        (status = 404, description = "Sector not found"),
    ),
    tag = "irrigacao"
)]
pub async fn get_sector(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SectorResponse>> {
    let (sector, property) = sectors::Entity::find_by_id(id)
        .find_also_related(properties::Entity)
        .one(&*state.db)
        .await
        .context("Erro ao buscar setor")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(SectorResponse::new(sector, property)))
}

/// Create a sector
#[utoipa::path(
    post,
    path = "/api/setores",
    request_body = SectorPayload,
    responses(
        (status = 201, description = "Sector created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "irrigacao"
)]
pub async fn create_sector(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SectorPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let row = payload.into_new()?;

    let inserted = sectors::Entity::insert(row)
        .exec(&*state.db)
        .await
        .context("Erro ao criar setor")?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(
            "Setor criado com sucesso",
            i64::from(inserted.last_insert_id),
        )),
    ))
}

/// Update any subset of a sector's fields
#[utoipa::path(
    put,
    path = "/api/setores/{id}",
    params(("id" = i32, Path, description = "Sector ID")),
    request_body = SectorPayload,
    responses(
        (status = 200, description = "Sector updated", body = MessageResponse),
        (status = 400, description = "No field to update or invalid field"),
        (status = 404, description = "Sector not found"),
    ),
    tag = "irrigacao"
)]
pub async fn update_sector(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SectorPayload>,
) -> AppResult<Json<MessageResponse>> {
    let mut row = find_sector(&state, id).await?.into_active_model();

    if payload.apply(&mut row)? == 0 {
        return Err(AppError::BadRequest("Nenhum campo para atualizar".to_string()));
    }

    row.update(&*state.db)
        .await
        .context("Erro ao atualizar setor")?;

    Ok(Json(MessageResponse::new("Setor atualizado com sucesso")))
}

/// Delete a sector
#[utoipa::path(
    delete,
    path = "/api/setores/{id}",
    params(("id" = i32, Path, description = "Sector ID")),
    responses(
        (status = 200, description = "Sector deleted", body = MessageResponse),
        (status = 400, description = "Sector still has crops"),
        (status = 404, description = "Sector not found"),
    ),
    tag = "irrigacao"
)]
pub async fn delete_sector(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    find_sector(&state, id).await?;

    sectors::Entity::delete_by_id(id)
        .exec(&*state.db)
        .await
        .context("Erro ao remover setor")?;

    Ok(Json(MessageResponse::new("Setor removido com sucesso")))
}

/// Start an irrigation run now and schedule the next one
#[utoipa::path(
    post,
    path = "/api/setores/{id}/irrigacao",
    params(("id" = i32, Path, description = "Sector ID")),
    request_body = SchedulePayload,
    responses(
        (status = 200, description = "Irrigation scheduled", body = MessageResponse),
        (status = 400, description = "Missing or invalid duration"),
        (status = 404, description = "Sector not found"),
    ),
    tag = "irrigacao"
)]
pub async fn schedule_irrigation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SchedulePayload>,
) -> AppResult<Json<MessageResponse>> {
    let (duration, interval) = payload.validate()?;

    find_sector(&state, id).await?;

    db::execute(
        &*state.db,
        "UPDATE Setor \
         SET duracao_irrigacao = ?, \
             ultima_irrigacao = NOW(), \
             proxima_irrigacao = DATE_ADD(NOW(), INTERVAL ? HOUR) \
         WHERE ID_setor = ?",
        vec![duration.into(), interval.into(), id.into()],
    )
    .await
    .context("Erro ao programar irrigação")?;

    tracing::info!(sector = id, duration, interval, "Irrigation scheduled");

    Ok(Json(MessageResponse::new("Irrigação programada com sucesso")))
}
