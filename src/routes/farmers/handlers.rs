use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder};

use crate::common::{ApiJson, ApiPath, AppState, MessageResponse};
use crate::entity::farmers;
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{FarmerPayload, FarmerResponse};

const NOT_FOUND: &str = "Agricultor não encontrado";

async fn find_farmer(state: &AppState, id: i32) -> AppResult<farmers::Model> {
    farmers::Entity::find_by_id(id)
        .one(&*state.db)
        .await
        .context("Erro ao buscar agricultor")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// List all farmers
#[utoipa::path(
    get,
    path = "/api/agricultores",
    responses(
        (status = 200, description = "Farmers retrieved successfully", body = Vec<FarmerResponse>),
    ),
    tag = "agricultores"
)]
pub async fn list_farmers(State(state): State<AppState>) -> AppResult<Json<Vec<FarmerResponse>>> {
    let rows = farmers::Entity::find()
        .order_by_asc(farmers::Column::Id)
        .all(&*state.db)
        .await
        .context("Erro ao buscar agricultores")?;

    Ok(Json(rows.into_iter().map(FarmerResponse::from).collect()))
}

/// Get a farmer by ID
#[utoipa::path(
    get,
    path = "/api/agricultores/{id}",
    params(("id" = i32, Path, description = "Farmer ID")),
    responses(
        (status = 200, description = "Farmer retrieved successfully", body = FarmerResponse),
        (status = 404, description = "Farmer not found"),
    ),
    tag = "agricultores"
)]
pub async fn get_farmer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<FarmerResponse>> {
    let farmer = find_farmer(&state, id).await?;
    Ok(Json(farmer.into()))
}

/// Register a farmer
#[utoipa::path(
    post,
    path = "/api/agricultores",
    request_body = FarmerPayload,
    responses(
        (status = 201, description = "Farmer created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "agricultores"
)]
pub async fn create_farmer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<FarmerPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let row = payload.into_new()?;

    let inserted = farmers::Entity::insert(row)
        .exec(&*state.db)
        .await
        .context("Erro ao criar agricultor")?;

    tracing::info!(id = inserted.last_insert_id, "Farmer created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(
            "Agricultor criado com sucesso",
            i64::from(inserted.last_insert_id),
        )),
    ))
}

/// Update any subset of a farmer's fields
#[utoipa::path(
    put,
    path = "/api/agricultores/{id}",
    params(("id" = i32, Path, description = "Farmer ID")),
    request_body = FarmerPayload,
    responses(
        (status = 200, description = "Farmer updated", body = MessageResponse),
        (status = 400, description = "No field to update or invalid field"),
        (status = 404, description = "Farmer not found"),
    ),
    tag = "agricultores"
)]
pub async fn update_farmer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<FarmerPayload>,
) -> AppResult<Json<MessageResponse>> {
    let mut row = find_farmer(&state, id).await?.into_active_model();

    if payload.apply(&mut row)? == 0 {
        return Err(AppError::BadRequest("Nenhum campo para atualizar".to_string()));
    }

    row.update(&*state.db)
        .await
        .context("Erro ao atualizar agricultor")?;

    Ok(Json(MessageResponse::new("Agricultor atualizado com sucesso")))
}

/// Delete a farmer
#[utoipa::path(
    delete,
    path = "/api/agricultores/{id}",
    params(("id" = i32, Path, description = "Farmer ID")),
    responses(
        (status = 200, description = "Farmer deleted", body = MessageResponse),
        (status = 404, description = "Farmer not found"),
    ),
    tag = "agricultores"
)]
pub async fn delete_farmer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    find_farmer(&state, id).await?;

    farmers::Entity::delete_by_id(id)
        .exec(&*state.db)
        .await
        .context("Erro ao remover agricultor")?;

    Ok(Json(MessageResponse::new("Agricultor removido com sucesso")))
}
