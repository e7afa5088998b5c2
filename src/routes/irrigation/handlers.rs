use axum::{Json, extract::State, response::Response};
use sea_orm::{
    ActiveEnum, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::common::{ApiQuery, AppState, format, placeholders};
use crate::db;
use crate::entity::{
    DecisionType, IrrigatorStatus, ai_decisions, crops, irrigators, sectors, zones,
};
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{
    AiDecisionResponse, AiSummary, AiSummaryResponse, AreaStatsResponse, AreaStatsRow, ClockRow,
    DashboardStatsResponse, DecisionsQuery, IrrigationStatsResponse, IrrigationSummaryResponse,
    IrrigatorCounts, IrrigatorDetail, IrrigatorStatsResponse, IrrigatorStatsRow,
    IrrigatorStatusCard, IrrigatorStatusRow, RecentDecision, SectorCountsRow, SectorIrrigation,
    StatusCount, TodayRow, UpcomingIrrigation, ZoneDetail,
};

/// AI decisions with their zone name, newest first
#[utoipa::path(
    get,
    path = "/api/decisoes-ia",
    params(DecisionsQuery),
    responses(
        (status = 200, description = "Decisions retrieved successfully", body = Vec<AiDecisionResponse>),
    ),
    tag = "irrigacao"
)]
pub async fn list_ai_decisions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecisionsQuery>,
) -> AppResult<Json<Vec<AiDecisionResponse>>> {
    let rows = ai_decisions::Entity::find()
        .find_also_related(zones::Entity)
        .order_by_desc(ai_decisions::Column::DecidedAt)
        .limit(query.limit())
        .all(&*state.db)
        .await
        .context("Erro ao buscar decisões da IA")?;

    Ok(Json(
        rows.into_iter()
            .map(|(decision, zone)| AiDecisionResponse::new(decision, zone))
            .collect(),
    ))
}

/// Irrigator status counts, the next five scheduled runs and total savings
#[utoipa::path(
    get,
    path = "/api/dashboard/irrigacao-resumo",
    responses(
        (status = 200, description = "Summary retrieved successfully", body = IrrigationSummaryResponse),
    ),
    tag = "irrigacao"
)]
pub async fn irrigation_summary(
    State(state): State<AppState>,
) -> AppResult<Json<IrrigationSummaryResponse>> {
    const CONTEXT: &str = "Erro ao buscar resumo da irrigação";

    let status_irrigadores: Vec<StatusCount> = db::fetch_all(
        &*state.db,
        "SELECT status_, CAST(COUNT(*) AS SIGNED) AS quantidade FROM Irrigador GROUP BY status_",
        vec![],
    )
    .await
    .context(CONTEXT)?;

    let proximas_irrigacoes: Vec<UpcomingIrrigation> = db::fetch_all(
        &*state.db,
        "SELECT nome, proxima_irrigacao, cultura FROM Setor \
         WHERE proxima_irrigacao > NOW() \
         ORDER BY proxima_irrigacao ASC LIMIT 5",
        vec![],
    )
    .await
    .context(CONTEXT)?;

    let economia_total = db::fetch_f64(
        &*state.db,
        "SELECT CAST(SUM(economia) AS DOUBLE) AS value FROM Zona",
        vec![],
    )
    .await
    .context(CONTEXT)?
    .unwrap_or(0.0);

    Ok(Json(IrrigationSummaryResponse {
        status_irrigadores,
        proximas_irrigacoes,
        economia_total,
    }))
}

/// Today's AI activity and the four most recent decisions
#[utoipa::path(
    get,
    path = "/api/dashboard/ai-summary",
    responses(
        (status = 200, description = "Summary retrieved successfully", body = AiSummaryResponse),
    ),
    tag = "irrigacao"
)]
pub async fn ai_summary(State(state): State<AppState>) -> AppResult<Json<AiSummaryResponse>> {
    const CONTEXT: &str = "Erro ao buscar resumo da IA";

    let today: Option<TodayRow> = db::fetch_one(
        &*state.db,
        "SELECT \
            CAST((SELECT COUNT(*) FROM DecisaoIA WHERE DATE(data_hora) = CURDATE()) AS SIGNED) AS decisions_today, \
            CAST(COALESCE((SELECT SUM(volume_economizado) FROM DecisaoIA WHERE DATE(data_hora) = CURDATE()), 0) AS DOUBLE) AS water_saved_today, \
            CAST(COALESCE((SELECT AVG(confianca) FROM DecisaoIA), 0) AS DOUBLE) AS average_confidence",
        vec![],
    )
    .await
    .context(CONTEXT)?;

    let summary = today.map_or(
        AiSummary {
            decisions_today: 0,
            water_saved_today: 0,
            average_confidence: 0.0,
        },
        |row| AiSummary {
            decisions_today: row.decisions_today,
            // Whole litres, truncated
            water_saved_today: row.water_saved_today.trunc() as i64,
            average_confidence: format::round_to(row.average_confidence, 1),
        },
    );

    let recent = ai_decisions::Entity::find()
        .find_also_related(zones::Entity)
        .order_by_desc(ai_decisions::Column::DecidedAt)
        .limit(4)
        .all(&*state.db)
        .await
        .context(CONTEXT)?;

    let recent_decisions = recent
        .into_iter()
        .map(|(d, zone)| RecentDecision {
            id: d.id,
            timestamp: format::clock(d.decided_at),
            zone: zone.map(|z| z.name),
            outcome: DecisionType::dashboard_outcome(&d.decision_type.to_value()).to_string(),
            decision: d.description,
            confidence: d.confidence,
            reasoning: d.decision_type,
            water_saved: d.volume_saved,
        })
        .collect();

    Ok(Json(AiSummaryResponse {
        summary,
        recent_decisions,
    }))
}

/// Headline numbers of the main dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = DashboardStatsResponse),
    ),
    tag = "dashboard"
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStatsResponse>> {
    const CONTEXT: &str = "Erro ao buscar estatísticas do dashboard";

    let total = irrigators::Entity::find()
        .count(&*state.db)
        .await
        .context(CONTEXT)?;

    let active = irrigators::Entity::find()
        .filter(irrigators::Column::Status.ne(IrrigatorStatus::Maintenance))
        .count(&*state.db)
        .await
        .context(CONTEXT)?;

    let learning_cultures = crops::Entity::find()
        .filter(crops::Column::AiStatus.eq(crops::AI_STATUS_LEARNING))
        .count(&*state.db)
        .await
        .context(CONTEXT)?;

    let efficiency = db::fetch_f64(
        &*state.db,
        "SELECT CAST(AVG(eficiencia_hidrica) AS DOUBLE) AS value FROM Irrigador WHERE status_ <> ?",
        vec![IrrigatorStatus::Maintenance.to_value().into()],
    )
    .await
    .context(CONTEXT)?
    .unwrap_or(0.0);

    let coverage = db::fetch_f64(
        &*state.db,
        "SELECT CAST(SUM(hectares) AS DOUBLE) AS value FROM Zona",
        vec![],
    )
    .await
    .context(CONTEXT)?
    .unwrap_or(0.0);

    Ok(Json(DashboardStatsResponse {
        irrigators: IrrigatorCounts { active, total },
        efficiency: format::round_to(efficiency, 1),
        learning_cultures,
        coverage,
    }))
}

/// Status cards for the first three irrigators
#[utoipa::path(
    get,
    path = "/api/dashboard/irrigators-status",
    responses(
        (status = 200, description = "Irrigator cards retrieved successfully", body = Vec<IrrigatorStatusCard>),
    ),
    tag = "dashboard"
)]
pub async fn irrigators_status(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<IrrigatorStatusCard>>> {
    // Each zone contributes its first sector, and each sector its first crop.
    let rows: Vec<IrrigatorStatusRow> = db::fetch_all(
        &*state.db,
        "SELECT i.ID_irrigador AS id, i.nome AS name, z.nome AS zone, \
                c.nome AS culture, c.statusIA AS ai_status, \
                i.eficiencia_hidrica AS efficiency, \
                (SELECT d.descricao FROM DecisaoIA d WHERE d.ID_zona_fk = z.ID_zona \
                 ORDER BY d.data_hora DESC LIMIT 1) AS last_decision, \
                s.proxima_irrigacao AS next_irrigation, \
                s.umidade_atual AS soil_moisture, \
                z.hectares AS coverage \
         FROM Irrigador i \
         JOIN Zona z ON i.ID_zona_fk = z.ID_zona \
         LEFT JOIN Setor s ON s.ID_setor = \
              (SELECT MIN(s2.ID_setor) FROM Setor s2 WHERE s2.ID_zona_fk = z.ID_zona) \
         LEFT JOIN Cultura c ON c.ID_cultura = \
              (SELECT MIN(c2.ID_cultura) FROM Cultura c2 WHERE c2.ID_setor_fk = s.ID_setor) \
         ORDER BY i.ID_irrigador \
         LIMIT 3",
        vec![],
    )
    .await
    .context("Erro ao buscar status dos irrigadores")?;

    let cards = rows
        .into_iter()
        .map(|r| IrrigatorStatusCard {
            id: r.id,
            name: r.name,
            culture: r.culture,
            zone: r.zone,
            ai_status: r.ai_status,
            efficiency: format::percent(r.efficiency.unwrap_or(0.0)),
            last_decision: r.last_decision,
            next_action: r.next_irrigation.map_or_else(
                || "Sem irrigação programada".to_string(),
                |at| format!("Irrigação programada {}", format::clock(at)),
            ),
            soil_moisture: format::percent(r.soil_moisture.unwrap_or(0.0)),
            coverage: format::hectares(r.coverage),
        })
        .collect();

    Ok(Json(cards))
}

/// Sector counts and timing for the irrigation page
#[utoipa::path(
    get,
    path = "/api/irrigation/stats",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = IrrigationStatsResponse),
    ),
    tag = "dashboard"
)]
pub async fn irrigation_stats(State(state): State<AppState>) -> AppResult<Response> {
    const CONTEXT: &str = "Erro ao buscar estatísticas de irrigação";

    let counts: SectorCountsRow = db::fetch_one(
        &*state.db,
        "SELECT CAST(COUNT(*) AS SIGNED) AS total_sectors, \
                CAST(COALESCE(SUM(CASE WHEN proxima_irrigacao > NOW() \
                                        AND ultima_irrigacao < NOW() THEN 1 ELSE 0 END), 0) AS SIGNED) AS active_sectors, \
                CAST(TIMESTAMPDIFF(MINUTE, NOW(), \
                     MIN(CASE WHEN proxima_irrigacao > NOW() THEN proxima_irrigacao END)) AS SIGNED) AS next_irrigation_minutes \
         FROM Setor",
        vec![],
    )
    .await
    .context(CONTEXT)?
    .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))?;

    let avg_efficiency = db::fetch_f64(
        &*state.db,
        "SELECT CAST(AVG(z.eficiencia) AS DOUBLE) AS value FROM Zona z \
         WHERE EXISTS (SELECT 1 FROM Setor s WHERE s.ID_zona_fk = z.ID_zona)",
        vec![],
    )
    .await
    .context(CONTEXT)?
    .unwrap_or(0.0);

    Ok(placeholders::flagged(
        &["dailyConsumption"],
        IrrigationStatsResponse {
            active_sectors: counts.active_sectors,
            total_sectors: counts.total_sectors,
            daily_consumption: placeholders::DAILY_CONSUMPTION_L,
            next_irrigation_minutes: counts.next_irrigation_minutes,
            avg_efficiency: format::round_to(avg_efficiency, 1),
        },
    ))
}

/// Irrigation state of every sector
#[utoipa::path(
    get,
    path = "/api/irrigation/zones",
    responses(
        (status = 200, description = "Sectors retrieved successfully", body = Vec<SectorIrrigation>),
    ),
    tag = "dashboard"
)]
pub async fn irrigation_zones(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SectorIrrigation>>> {
    const CONTEXT: &str = "Erro ao buscar zonas de irrigação";

    // Sector times are stored in the database's clock.
    let clock: ClockRow = db::fetch_one(&*state.db, "SELECT NOW() AS now", vec![])
        .await
        .context(CONTEXT)?
        .ok_or_else(|| AppError::Internal("NOW() returned no row".to_string()))?;

    let rows = sectors::Entity::find()
        .order_by_asc(sectors::Column::Id)
        .all(&*state.db)
        .await
        .context(CONTEXT)?;

    Ok(Json(
        rows.into_iter()
            .map(|sector| SectorIrrigation::new(sector, clock.now))
            .collect(),
    ))
}

/// Zone coverage, efficiency and weekly savings
#[utoipa::path(
    get,
    path = "/api/areas/stats",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = AreaStatsResponse),
    ),
    tag = "dashboard"
)]
pub async fn area_stats(State(state): State<AppState>) -> AppResult<Json<AreaStatsResponse>> {
    let row: AreaStatsRow = db::fetch_one(
        &*state.db,
        "SELECT \
            CAST((SELECT COUNT(DISTINCT i.ID_zona_fk) FROM Irrigador i WHERE i.status_ = ?) AS SIGNED) AS active_zones, \
            CAST((SELECT COUNT(*) FROM Zona) AS SIGNED) AS total_zones, \
            CAST(COALESCE((SELECT SUM(hectares) FROM Zona), 0) AS DOUBLE) AS total_coverage, \
            CAST(COALESCE((SELECT AVG(eficiencia) FROM Zona), 0) AS DOUBLE) AS avg_efficiency, \
            CAST(COALESCE((SELECT SUM(volume_economizado) FROM DecisaoIA \
                           WHERE data_hora >= NOW() - INTERVAL 7 DAY), 0) AS DOUBLE) AS weekly_savings",
        vec![IrrigatorStatus::Active.to_value().into()],
    )
    .await
    .context("Erro ao buscar estatísticas das áreas")?
    .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))?;

    Ok(Json(AreaStatsResponse {
        active_zones: row.active_zones,
        total_zones: row.total_zones,
        total_coverage: row.total_coverage,
        avg_efficiency: format::round_to(row.avg_efficiency, 1),
        weekly_savings: row.weekly_savings,
    }))
}

/// Zones with their first irrigator, sector and crop
#[utoipa::path(
    get,
    path = "/api/areas/zones",
    responses(
        (status = 200, description = "Zones retrieved successfully", body = Vec<ZoneDetail>),
    ),
    tag = "dashboard"
)]
pub async fn area_zones(State(state): State<AppState>) -> AppResult<Json<Vec<ZoneDetail>>> {
    let rows: Vec<ZoneDetail> = db::fetch_all(
        &*state.db,
        "SELECT z.ID_zona AS id, z.nome AS name, c.nome AS crop, z.hectares AS area, \
                i.nome AS irrigator, c.statusIA AS ai_status, z.eficiencia AS efficiency, \
                s.umidade_atual AS soil_moisture, c.padroes_ml AS patterns_learned, \
                z.economia AS water_saved, i.status_ AS status \
         FROM Zona z \
         LEFT JOIN Irrigador i ON i.ID_irrigador = \
              (SELECT MIN(i2.ID_irrigador) FROM Irrigador i2 WHERE i2.ID_zona_fk = z.ID_zona) \
         LEFT JOIN Setor s ON s.ID_setor = \
              (SELECT MIN(s2.ID_setor) FROM Setor s2 WHERE s2.ID_zona_fk = z.ID_zona) \
         LEFT JOIN Cultura c ON c.ID_cultura = \
              (SELECT MIN(c2.ID_cultura) FROM Cultura c2 WHERE c2.ID_setor_fk = s.ID_setor) \
         ORDER BY z.ID_zona",
        vec![],
    )
    .await
    .context("Erro ao buscar lista de zonas")?;

    Ok(Json(rows))
}

/// Headline numbers of the irrigator page
#[utoipa::path(
    get,
    path = "/api/sensors/stats",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = IrrigatorStatsResponse),
    ),
    tag = "dashboard"
)]
pub async fn irrigator_stats(
    State(state): State<AppState>,
) -> AppResult<Json<IrrigatorStatsResponse>> {
    let active = IrrigatorStatus::Active.to_value();

    let row: IrrigatorStatsRow = db::fetch_one(
        &*state.db,
        "SELECT \
            CAST((SELECT COUNT(*) FROM Irrigador WHERE status_ = ?) AS SIGNED) AS active_irrigators, \
            CAST((SELECT COUNT(*) FROM Irrigador) AS SIGNED) AS total_irrigators, \
            CAST(COALESCE((SELECT AVG(eficiencia_hidrica) FROM Irrigador WHERE status_ = ?), 0) AS DOUBLE) AS avg_efficiency, \
            CAST(COALESCE((SELECT SUM(z.hectares) FROM Zona z WHERE EXISTS \
                 (SELECT 1 FROM Irrigador i WHERE i.ID_zona_fk = z.ID_zona AND i.status_ = ?)), 0) AS DOUBLE) AS total_coverage, \
            CAST(COALESCE((SELECT SUM(volume_economizado) FROM DecisaoIA \
                           WHERE data_hora >= NOW() - INTERVAL 7 DAY), 0) AS DOUBLE) AS weekly_savings, \
            CAST(COALESCE((SELECT AVG(confianca) FROM DecisaoIA \
                           WHERE data_hora >= NOW() - INTERVAL 7 DAY), 0) AS DOUBLE) AS avg_confidence",
        vec![active.clone().into(), active.clone().into(), active.into()],
    )
    .await
    .context("Erro ao buscar estatísticas dos irrigadores")?
    .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))?;

    Ok(Json(row.into()))
}

/// Every irrigator with battery, learned patterns and savings
#[utoipa::path(
    get,
    path = "/api/sensors/irrigators",
    responses(
        (status = 200, description = "Irrigators retrieved successfully", body = Vec<IrrigatorDetail>),
    ),
    tag = "dashboard"
)]
pub async fn irrigator_details(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<IrrigatorDetail>>> {
    let rows: Vec<IrrigatorDetail> = db::fetch_all(
        &*state.db,
        "SELECT i.ID_irrigador AS id, i.nome AS name, z.nome AS zone, \
                c.nome AS culture, c.statusIA AS ai_status, \
                i.eficiencia_hidrica AS efficiency, z.hectares AS coverage, \
                s.umidade_atual AS soil_moisture, i.bateria AS battery, \
                (SELECT d.descricao FROM DecisaoIA d WHERE d.ID_zona_fk = z.ID_zona \
                 ORDER BY d.data_hora DESC LIMIT 1) AS last_decision, \
                c.padroes_ml AS patterns_learned, i.economia AS water_saved, \
                i.status_ AS status \
         FROM Irrigador i \
         JOIN Zona z ON i.ID_zona_fk = z.ID_zona \
         LEFT JOIN Setor s ON s.ID_setor = \
              (SELECT MIN(s2.ID_setor) FROM Setor s2 WHERE s2.ID_zona_fk = z.ID_zona) \
         LEFT JOIN Cultura c ON c.ID_cultura = \
              (SELECT MIN(c2.ID_cultura) FROM Cultura c2 WHERE c2.ID_setor_fk = s.ID_setor) \
         ORDER BY i.ID_irrigador",
        vec![],
    )
    .await
    .context("Erro ao buscar lista de irrigadores")?;

    Ok(Json(rows))
}
