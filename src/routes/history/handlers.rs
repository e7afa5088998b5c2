use axum::{Json, extract::State, response::Response};
use chrono::Local;
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};

use crate::common::{ApiQuery, AppState, format, placeholders};
use crate::db;
use crate::entity::{ai_decisions, learned_patterns, productivity_history, zones};
use crate::error::{AppError, AppResult, QueryContext};

use super::types::{
    AiPerformanceSummary, CultureAnalysis, CultureRow, DecisionFlowStep, EnvironmentRow,
    HourlyConditions, HourlyRow, Improvement, LearningPoint, LearningRow, MonthsQuery,
    PerformanceRow, ProductivityEvolution, ProductivityPoint, RecentPattern, ReportCard,
    ReportRow, ScheduleSummaryStats, ScheduledDecision, ScheduledDecisionRow,
    SensorDatabaseStats, SensorStatsRow,
};

/// Last five AI decisions, oldest first, with the readings that preceded them
#[utoipa::path(
    get,
    path = "/api/history/decision-flow",
    responses(
        (status = 200, description = "Decision flow retrieved successfully", body = Vec<DecisionFlowStep>),
    ),
    tag = "historico"
)]
pub async fn decision_flow(State(state): State<AppState>) -> AppResult<Response> {
    const CONTEXT: &str = "Erro ao buscar dados de fluxo de decisão da IA";

    let decisions = ai_decisions::Entity::find()
        .find_also_related(zones::Entity)
        .order_by_desc(ai_decisions::Column::DecidedAt)
        .limit(5)
        .all(&*state.db)
        .await
        .context(CONTEXT)?;

    let mut steps = Vec::with_capacity(decisions.len());
    for (decision, zone) in decisions {
        let env = match zone {
            Some(zone) => db::fetch_one::<EnvironmentRow, _>(
                &*state.db,
                "SELECT \
                    AVG(CASE WHEN s.tipo = 'Reservatorio' THEN m.valor_medicao END) AS water_level, \
                    AVG(CASE WHEN s.tipo = 'Umidade' THEN m.valor_medicao END) AS soil_moisture, \
                    AVG(CASE WHEN s.tipo = 'pH' THEN m.valor_medicao END) AS ph, \
                    AVG(CASE WHEN s.tipo = 'Temperatura' THEN m.valor_medicao END) AS temperature, \
                    AVG(CASE WHEN s.tipo = 'LuzSolar' THEN m.valor_medicao END) AS sun_intensity \
                 FROM Medicao m \
                 JOIN Sensor s ON m.ID_sensor_fk = s.ID_sensor \
                 WHERE m.ID_propriedade_fk = ? \
                   AND m.data_hora BETWEEN (? - INTERVAL 15 MINUTE) AND ?",
                vec![
                    zone.property_id.into(),
                    decision.decided_at.into(),
                    decision.decided_at.into(),
                ],
            )
            .await
            .context(CONTEXT)?
            .unwrap_or_default(),
            None => EnvironmentRow::default(),
        };

        steps.push(DecisionFlowStep::new(
            decision.decided_at,
            decision.description,
            env,
        ));
    }
    steps.reverse();

    Ok(placeholders::flagged(&["isRaining", "duration"], steps))
}

/// Hourly sensor averages over the last 24 hours
#[utoipa::path(
    get,
    path = "/api/history/environmental-correlation",
    responses(
        (status = 200, description = "Hourly averages retrieved successfully", body = Vec<HourlyConditions>),
    ),
    tag = "historico"
)]
pub async fn environmental_correlation(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<HourlyConditions>>> {
    let rows: Vec<HourlyRow> = db::fetch_all(
        &*state.db,
        "SELECT \
            CAST(HOUR(m.data_hora) AS SIGNED) AS hour_of_day, \
            AVG(CASE WHEN s.tipo = 'LuzSolar' THEN m.valor_medicao END) AS sun_intensity, \
            AVG(CASE WHEN s.tipo = 'Temperatura' THEN m.valor_medicao END) AS temperature, \
            AVG(CASE WHEN s.tipo = 'Umidade' THEN m.valor_medicao END) AS soil_moisture, \
            AVG(CASE WHEN s.tipo = 'pH' THEN m.valor_medicao END) AS ph \
         FROM Medicao m \
         JOIN Sensor s ON m.ID_sensor_fk = s.ID_sensor \
         WHERE m.data_hora BETWEEN (NOW() - INTERVAL 24 HOUR) AND NOW() \
           AND s.tipo IN ('LuzSolar', 'Temperatura', 'Umidade', 'pH') \
         GROUP BY hour_of_day \
         ORDER BY hour_of_day",
        vec![],
    )
    .await
    .context("Erro ao buscar dados de correlação ambiental")?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Every AI decision with its irrigator, zone and crop model
#[utoipa::path(
    get,
    path = "/api/schedule/ai-decisions",
    responses(
        (status = 200, description = "Decisions retrieved successfully", body = Vec<ScheduledDecision>),
    ),
    tag = "agendamentos"
)]
pub async fn schedule_ai_decisions(State(state): State<AppState>) -> AppResult<Response> {
    // One irrigator per zone and one crop per zone (through its first sector).
    let rows: Vec<ScheduledDecisionRow> = db::fetch_all(
        &*state.db,
        "SELECT d.ID_decisao AS id, i.nome AS irrigator, z.nome AS zone, \
                d.descricao AS decision, d.tipo AS reason, d.data_hora AS decided_at, \
                d.confianca AS confidence, d.volume_economizado AS water_saved, \
                c.statusIA AS ai_model \
         FROM DecisaoIA d \
         JOIN Zona z ON d.ID_zona_fk = z.ID_zona \
         LEFT JOIN Irrigador i ON i.ID_irrigador = \
              (SELECT MIN(i2.ID_irrigador) FROM Irrigador i2 WHERE i2.ID_zona_fk = z.ID_zona) \
         LEFT JOIN Setor s ON s.ID_setor = \
              (SELECT MIN(s2.ID_setor) FROM Setor s2 WHERE s2.ID_zona_fk = z.ID_zona) \
         LEFT JOIN Cultura c ON c.ID_cultura = \
              (SELECT MIN(c2.ID_cultura) FROM Cultura c2 WHERE c2.ID_setor_fk = s.ID_setor) \
         ORDER BY d.data_hora DESC",
        vec![],
    )
    .await
    .context("Erro ao buscar decisões da IA")?;

    let decisions: Vec<ScheduledDecision> = rows.into_iter().map(Into::into).collect();

    Ok(placeholders::flagged(&["aiModel"], decisions))
}

async fn performance(state: &AppState, context: &'static str) -> AppResult<PerformanceRow> {
    db::fetch_one(
        &*state.db,
        "SELECT \
            CAST(COALESCE((SELECT SUM(padroes_ml) FROM Cultura), 0) AS DOUBLE) AS learned_patterns, \
            CAST(COALESCE((SELECT AVG(eficiencia) FROM Cultura), 0) AS DOUBLE) AS average_efficiency, \
            CAST(COALESCE((SELECT SUM(volume_economizado) FROM DecisaoIA \
                           WHERE YEAR(data_hora) = YEAR(CURDATE()) \
                             AND MONTH(data_hora) = MONTH(CURDATE())), 0) AS DOUBLE) AS monthly_savings, \
            CAST(COALESCE((SELECT AVG(confianca) FROM DecisaoIA), 0) AS DOUBLE) AS decision_accuracy",
        vec![],
    )
    .await
    .context(context)?
    .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))
}

/// Learned patterns, crop efficiency, monthly savings and decision accuracy
#[utoipa::path(
    get,
    path = "/api/history/ai-performance-summary",
    responses(
        (status = 200, description = "Summary retrieved successfully", body = AiPerformanceSummary),
    ),
    tag = "historico"
)]
pub async fn ai_performance_summary(
    State(state): State<AppState>,
) -> AppResult<Json<AiPerformanceSummary>> {
    let row = performance(&state, "Erro ao buscar resumo de performance da IA").await?;

    Ok(Json(AiPerformanceSummary {
        learned_patterns: row.learned_patterns.trunc() as i64,
        average_efficiency: format::round_to(row.average_efficiency, 1),
        water_saved: row.monthly_savings.trunc() as i64,
        decision_accuracy: format::round_to(row.decision_accuracy, 1),
    }))
}

/// Summary cards of the schedule page
#[utoipa::path(
    get,
    path = "/api/schedule/ai-summary-stats",
    responses(
        (status = 200, description = "Summary retrieved successfully", body = ScheduleSummaryStats),
    ),
    tag = "agendamentos"
)]
pub async fn schedule_summary_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ScheduleSummaryStats>> {
    let row = performance(&state, "Erro ao buscar resumo para agendamentos").await?;

    Ok(Json(ScheduleSummaryStats {
        learned_patterns: row.learned_patterns.trunc() as i64,
        water_efficiency: format::round_to(row.average_efficiency, 1),
        monthly_savings: row.monthly_savings.trunc() as i64,
        decision_accuracy: format::round_to(row.decision_accuracy, 1),
    }))
}

/// Report cards for the AI section of the reports page
#[utoipa::path(
    get,
    path = "/api/history/ai-reports",
    responses(
        (status = 200, description = "Report cards retrieved successfully", body = Vec<ReportCard>),
    ),
    tag = "historico"
)]
pub async fn ai_reports(State(state): State<AppState>) -> AppResult<Response> {
    let stats: ReportRow = db::fetch_one(
        &*state.db,
        "SELECT \
            CAST((SELECT COUNT(*) FROM DecisaoIA WHERE data_hora >= NOW() - INTERVAL 7 DAY) AS SIGNED) AS new_decisions_last_week, \
            CAST(COALESCE((SELECT AVG(eficiencia) FROM Cultura), 0) AS DOUBLE) AS global_efficiency, \
            CAST(COALESCE((SELECT SUM(volume_economizado) FROM DecisaoIA \
                           WHERE YEAR(data_hora) = YEAR(CURDATE()) \
                             AND MONTH(data_hora) = MONTH(CURDATE())), 0) AS DOUBLE) AS monthly_savings, \
            CAST(COALESCE((SELECT AVG(confianca) FROM DecisaoIA), 0) AS DOUBLE) AS decision_accuracy",
        vec![],
    )
    .await
    .context("Erro ao buscar dados para relatórios de IA")?
    .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))?;

    let cards = vec![
        ReportCard::new(
            "Padrões de Aprendizado da IA",
            "ai-learning",
            "Última semana",
            format!("{} novos", stats.new_decisions_last_week),
            placeholders::CHANGE_LEARNING,
            "Novos padrões identificados pelo machine learning",
        ),
        ReportCard::new(
            "Eficiência Hídrica Global",
            "efficiency",
            "Média geral",
            format::percent(stats.global_efficiency),
            placeholders::CHANGE_EFFICIENCY,
            "Eficiência média de todas as culturas com IA",
        ),
        ReportCard::new(
            "Economia por IA",
            "ai-savings",
            "Este mês",
            format!("{}L", stats.monthly_savings.trunc() as i64),
            placeholders::CHANGE_SAVINGS,
            "Água economizada pelas decisões inteligentes da IA",
        ),
        ReportCard::new(
            "Precisão das Decisões",
            "accuracy",
            "Média geral",
            format::percent(stats.decision_accuracy),
            placeholders::CHANGE_ACCURACY,
            "Acurácia das decisões de irrigação da IA",
        ),
    ];

    Ok(placeholders::flagged(&["change", "trend"], cards))
}

/// Per-crop AI statistics
#[utoipa::path(
    get,
    path = "/api/history/culture-analysis",
    responses(
        (status = 200, description = "Crop analysis retrieved successfully", body = Vec<CultureAnalysis>),
    ),
    tag = "historico"
)]
pub async fn culture_analysis(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CultureAnalysis>>> {
    let rows: Vec<CultureRow> = db::fetch_all(
        &*state.db,
        "SELECT c.nome AS culture, \
                CAST((SELECT COUNT(*) FROM Irrigador i \
                      JOIN Setor s ON i.ID_zona_fk = s.ID_zona_fk \
                      WHERE s.ID_setor = c.ID_setor_fk) AS SIGNED) AS irrigators, \
                c.padroes_ml AS patterns_learned, c.eficiencia AS efficiency, \
                c.economia AS water_saved, c.statusIA AS ai_status \
         FROM Cultura c \
         ORDER BY c.nome",
        vec![],
    )
    .await
    .context("Erro ao buscar análise por cultura")?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// The three most recently learned patterns
#[utoipa::path(
    get,
    path = "/api/schedule/recent-patterns",
    responses(
        (status = 200, description = "Patterns retrieved successfully", body = Vec<RecentPattern>),
    ),
    tag = "agendamentos"
)]
pub async fn recent_patterns(State(state): State<AppState>) -> AppResult<Json<Vec<RecentPattern>>> {
    let rows = learned_patterns::Entity::find()
        .order_by_desc(learned_patterns::Column::LearnedOn)
        .limit(3)
        .all(&*state.db)
        .await
        .context("Erro ao buscar padrões de aprendizado")?;

    let today = Local::now().date_naive();

    Ok(Json(
        rows.into_iter()
            .map(|p| RecentPattern::new(p, today))
            .collect(),
    ))
}

/// Measurement volume and sensor fleet status
#[utoipa::path(
    get,
    path = "/api/history/sensor-database-stats",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = SensorDatabaseStats),
    ),
    tag = "historico"
)]
pub async fn sensor_database_stats(State(state): State<AppState>) -> AppResult<Response> {
    let row: SensorStatsRow = db::fetch_one(
        &*state.db,
        "SELECT \
            CAST((SELECT COUNT(*) FROM Medicao) AS SIGNED) AS total_records, \
            CAST((SELECT COUNT(*) FROM Medicao WHERE data_hora >= NOW() - INTERVAL 24 HOUR) AS SIGNED) AS records_today, \
            CAST((SELECT COUNT(*) FROM Sensor WHERE tipo = 'Reservatorio') AS SIGNED) AS reservoir_sensors, \
            CAST((SELECT COUNT(*) FROM Sensor WHERE tipo = 'Umidade') AS SIGNED) AS humidity_sensors, \
            CAST((SELECT COUNT(*) FROM Sensor WHERE tipo = 'pH') AS SIGNED) AS ph_sensors, \
            CAST((SELECT COUNT(*) FROM Sensor WHERE tipo = 'Temperatura') AS SIGNED) AS temperature_sensors, \
            CAST((SELECT COUNT(*) FROM Sensor WHERE tipo = 'LuzSolar') AS SIGNED) AS light_sensors",
        vec![],
    )
    .await
    .context("Erro ao buscar estatísticas do banco de dados de sensores")?
    .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))?;

    let (stats, fallback) = SensorDatabaseStats::new(&row);

    let mut fields = vec!["sensorAccuracy", "storageUsed", "sensorStatus"];
    if fallback {
        fields.push("measurementsPerDay");
    }

    Ok(placeholders::flagged(&fields, stats))
}

/// Monthly productivity against the traditional baseline
#[utoipa::path(
    get,
    path = "/api/history/productivity-evolution",
    params(MonthsQuery),
    responses(
        (status = 200, description = "Productivity retrieved successfully", body = ProductivityEvolution),
    ),
    tag = "historico"
)]
pub async fn productivity_evolution(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthsQuery>,
) -> AppResult<Response> {
    let mut rows = productivity_history::Entity::find()
        .order_by_desc(productivity_history::Column::Month)
        .limit(query.months())
        .all(&*state.db)
        .await
        .context("Erro ao buscar dados de produtividade")?;

    let improvements = Improvement::from_latest(rows.first());
    rows.reverse();

    let body = ProductivityEvolution {
        chart_data: rows.iter().map(ProductivityPoint::from).collect(),
        improvements,
    };

    Ok(placeholders::flagged(&["improvements"], body))
}

/// Monthly decision count and mean confidence, oldest first
#[utoipa::path(
    get,
    path = "/api/reports/learning-evolution",
    params(MonthsQuery),
    responses(
        (status = 200, description = "Learning evolution retrieved successfully", body = Vec<LearningPoint>),
    ),
    tag = "historico"
)]
pub async fn learning_evolution(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthsQuery>,
) -> AppResult<Json<Vec<LearningPoint>>> {
    let mut rows: Vec<LearningRow> = db::fetch_all(
        &*state.db,
        "SELECT DATE_FORMAT(data_hora, '%Y-%m') AS month, \
                CAST(COUNT(*) AS SIGNED) AS decisions, \
                CAST(AVG(confianca) AS DOUBLE) AS confidence \
         FROM DecisaoIA \
         GROUP BY month \
         ORDER BY month DESC \
         LIMIT ?",
        vec![query.months().into()],
    )
    .await
    .context("Erro ao buscar evolução do aprendizado")?;
    rows.reverse();

    Ok(Json(rows.into_iter().map(LearningPoint::from).collect()))
}
