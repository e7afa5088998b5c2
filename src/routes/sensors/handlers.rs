use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, Query, SimpleExpr},
};

use crate::common::{ApiJson, ApiPath, ApiQuery, AppState, MessageResponse, required};
use crate::db;
use crate::entity::{measurements, properties, sensors};
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{
    MeasurementPayload, MeasurementResponse, MeasurementsQuery, RecentMeasurementResponse,
    RecentMeasurementRow, SensorPayload, SensorResponse, SensorSummaryResponse, SensorTypeAverage,
    SensorTypeCount, parse_sensor_type,
};

const NOT_FOUND: &str = "Sensor não encontrado";

async fn find_sensor(state: &AppState, id: i32) -> AppResult<sensors::Model> {
    sensors::Entity::find_by_id(id)
        .one(&*state.db)
        .await
        .context("Erro ao buscar sensor")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// List sensors with their property name
#[utoipa::path(
    get,
    path = "/api/sensores",
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = Vec<SensorResponse>),
    ),
    tag = "sensores"
)]
pub async fn list_sensors(State(state): State<AppState>) -> AppResult<Json<Vec<SensorResponse>>> {
    let rows = sensors::Entity::find()
        .find_also_related(properties::Entity)
        .order_by_asc(sensors::Column::Id)
        .all(&*state.db)
        .await
        .context("Erro ao buscar sensores")?;

    Ok(Json(
        rows.into_iter()
            .map(|(sensor, property)| SensorResponse::new(sensor, property))
            .collect(),
    ))
}

/// Get a sensor by ID
#[utoipa::path(
    get,
    path = "/api/sensores/{id}",
    params(("id" = i32, Path, description = "Sensor ID")),
    responses(
        (status = 200, description = "Sensor retrieved successfully", body = SensorResponse),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensores"
)]
pub async fn get_sensor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SensorResponse>> {
    let (sensor, property) = sensors::Entity::find_by_id(id)
        .find_also_related(properties::Entity)
        .one(&*state.db)
        .await
        .context("Erro ao buscar sensor")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(SensorResponse::new(sensor, property)))
}

/// Register a sensor
#[utoipa::path(
    post,
    path = "/api/sensores",
    request_body = SensorPayload,
    responses(
        (status = 201, description = "Sensor created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "sensores"
)]
pub async fn create_sensor(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SensorPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let row = payload.into_new()?;

    let inserted = sensors::Entity::insert(row)
        .exec(&*state.db)
        .await
        .context("Erro ao criar sensor")?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(
            "Sensor criado com sucesso",
            i64::from(inserted.last_insert_id),
        )),
    ))
}

/// Update any subset of a sensor's fields
#[utoipa::path(
    put,
    path = "/api/sensores/{id}",
    params(("id" = i32, Path, description = "Sensor ID")),
    request_body = SensorPayload,
    responses(
        (status = 200, description = "Sensor updated", body = MessageResponse),
        (status = 400, description = "No field to update or invalid field"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensores"
)]
pub async fn update_sensor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SensorPayload>,
) -> AppResult<Json<MessageResponse>> {
    let mut row = find_sensor(&state, id).await?.into_active_model();

    if payload.apply(&mut row)? == 0 {
        return Err(AppError::BadRequest("Nenhum campo para atualizar".to_string()));
    }

    row.update(&*state.db)
        .await
        .context("Erro ao atualizar sensor")?;

    Ok(Json(MessageResponse::new("Sensor atualizado com sucesso")))
}

/// Delete a sensor
#[utoipa::path(
    delete,
    path = "/api/sensores/{id}",
    params(("id" = i32, Path, description = "Sensor ID")),
    responses(
        (status = 200, description = "Sensor deleted", body = MessageResponse),
        (status = 400, description = "Sensor still has measurements"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensores"
)]
pub async fn delete_sensor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    find_sensor(&state, id).await?;

    sensors::Entity::delete_by_id(id)
        .exec(&*state.db)
        .await
        .context("Erro ao remover sensor")?;

    Ok(Json(MessageResponse::new("Sensor removido com sucesso")))
}

/// Measurement history of one sensor, newest first
#[utoipa::path(
    get,
    path = "/api/sensores/{id}/medicoes",
    params(("id" = i32, Path, description = "Sensor ID"), MeasurementsQuery),
    responses(
        (status = 200, description = "Measurements retrieved successfully", body = Vec<MeasurementResponse>),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensores"
)]
pub async fn list_sensor_measurements(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<MeasurementsQuery>,
) -> AppResult<Json<Vec<MeasurementResponse>>> {
    let sensor = find_sensor(&state, id).await?;

    let rows = measurements::Entity::find()
        .filter(measurements::Column::SensorId.eq(sensor.id))
        .order_by_desc(measurements::Column::TakenAt)
        .limit(query.limit())
        .offset(query.offset())
        .all(&*state.db)
        .await
        .context("Erro ao buscar medições")?;

    Ok(Json(
        rows.into_iter()
            .map(|m| MeasurementResponse::new(m, &sensor))
            .collect(),
    ))
}

/// Record a measurement taken now
#[utoipa::path(
    post,
    path = "/api/medicoes",
    request_body = MeasurementPayload,
    responses(
        (status = 201, description = "Measurement created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensores"
)]
pub async fn create_measurement(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MeasurementPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let sensor_id = required(payload.sensor_id)?;
    let property_id = required(payload.property_id)?;
    let value = required(payload.value)?;

    if !value.is_finite() {
        return Err(AppError::BadRequest("valor_medicao inválido".to_string()));
    }

    find_sensor(&state, sensor_id).await?;

    // Timestamped by the database clock, like the scheduling columns.
    let row: [SimpleExpr; 4] = [
        Expr::current_timestamp().into(),
        value.into(),
        sensor_id.into(),
        property_id.into(),
    ];
    let mut insert = Query::insert();
    insert
        .into_table(measurements::Entity)
        .columns([
            measurements::Column::TakenAt,
            measurements::Column::Value,
            measurements::Column::SensorId,
            measurements::Column::PropertyId,
        ])
        .values(row)
        .map_err(|e| AppError::Internal(format!("Invalid measurement insert: {e}")))?;

    let backend = state.db.get_database_backend();
    state
        .db
        .execute(backend.build(&insert))
        .await
        .context("Erro ao criar medição")?;

    tracing::debug!(sensor_id, property_id, value, "Measurement recorded");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Medição criada com sucesso")),
    ))
}

/// Measurements of every sensor of a type over the last 24 hours
#[utoipa::path(
    get,
    path = "/api/sensores/tipos/{tipo}/medicoes-recentes",
    params(("tipo" = String, Path, description = "Sensor type label")),
    responses(
        (status = 200, description = "Measurements retrieved successfully", body = Vec<RecentMeasurementResponse>),
        (status = 400, description = "Unknown sensor type"),
    ),
    tag = "sensores"
)]
pub async fn list_recent_by_type(
    State(state): State<AppState>,
    ApiPath(label): ApiPath<String>,
) -> AppResult<Json<Vec<RecentMeasurementResponse>>> {
    let sensor_type = parse_sensor_type(&label)?;

    let rows: Vec<RecentMeasurementRow> = db::fetch_all(
        &*state.db,
        "SELECT m.ID_medicao AS id, m.data_hora AS taken_at, m.valor_medicao AS value, \
                m.ID_sensor_fk AS sensor_id, m.ID_propriedade_fk AS property_id, \
                s.fabricante AS manufacturer, p.nome AS property_name \
         FROM Medicao m \
         JOIN Sensor s ON m.ID_sensor_fk = s.ID_sensor \
         JOIN PropriedadeRural p ON m.ID_propriedade_fk = p.ID_propriedade \
         WHERE s.tipo = ? AND m.data_hora >= DATE_SUB(NOW(), INTERVAL 24 HOUR) \
         ORDER BY m.data_hora DESC",
        vec![sensor_type.to_value().into()],
    )
    .await
    .context("Erro ao buscar medições")?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Sensor counts per type and last-hour averages
#[utoipa::path(
    get,
    path = "/api/dashboard/sensores-resumo",
    responses(
        (status = 200, description = "Summary retrieved successfully", body = SensorSummaryResponse),
    ),
    tag = "sensores"
)]
pub async fn sensor_summary(State(state): State<AppState>) -> AppResult<Json<SensorSummaryResponse>> {
    const CONTEXT: &str = "Erro ao buscar resumo dos sensores";

    let sensores_por_tipo: Vec<SensorTypeCount> = db::fetch_all(
        &*state.db,
        "SELECT tipo, CAST(COUNT(*) AS SIGNED) AS quantidade FROM Sensor GROUP BY tipo",
        vec![],
    )
    .await
    .context(CONTEXT)?;

    let ultimas_medicoes: Vec<SensorTypeAverage> = db::fetch_all(
        &*state.db,
        "SELECT s.tipo, \
                CAST(COALESCE(AVG(m.valor_medicao), 0) AS DOUBLE) AS valor_medio, \
                MAX(m.data_hora) AS ultima_medicao \
         FROM Sensor s \
         JOIN Medicao m ON s.ID_sensor = m.ID_sensor_fk \
         WHERE m.data_hora >= DATE_SUB(NOW(), INTERVAL 1 HOUR) \
         GROUP BY s.tipo",
        vec![],
    )
    .await
    .context(CONTEXT)?;

    Ok(Json(SensorSummaryResponse {
        sensores_por_tipo,
        ultimas_medicoes,
    }))
}
