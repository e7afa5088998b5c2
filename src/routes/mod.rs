pub mod farmers;
pub mod health;
pub mod history;
pub mod irrigation;
pub mod irrigators;
pub mod sectors;
pub mod sensors;
pub mod weather;
pub mod zones;

use std::path::Path;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::{AppState, MessageResponse};
use crate::error::AppError;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        farmers::list_farmers,
        farmers::get_farmer,
        farmers::create_farmer,
        farmers::update_farmer,
        farmers::delete_farmer,
        sensors::list_sensors,
        sensors::get_sensor,
        sensors::create_sensor,
        sensors::update_sensor,
        sensors::delete_sensor,
        sensors::list_sensor_measurements,
        sensors::create_measurement,
        sensors::list_recent_by_type,
        sensors::sensor_summary,
        zones::list_zones,
        zones::get_zone,
        zones::create_zone,
        zones::update_zone,
        zones::delete_zone,
        irrigators::list_irrigators,
        irrigators::get_irrigator,
        irrigators::create_irrigator,
        irrigators::update_irrigator,
        irrigators::update_irrigator_status,
        irrigators::delete_irrigator,
        sectors::list_sectors,
        sectors::get_sector,
        sectors::create_sector,
        sectors::update_sector,
        sectors::delete_sector,
        sectors::schedule_irrigation,
        irrigation::list_ai_decisions,
        irrigation::irrigation_summary,
        irrigation::ai_summary,
        irrigation::dashboard_stats,
        irrigation::irrigators_status,
        irrigation::irrigation_stats,
        irrigation::irrigation_zones,
        irrigation::area_stats,
        irrigation::area_zones,
        irrigation::irrigator_stats,
        irrigation::irrigator_details,
        history::decision_flow,
        history::environmental_correlation,
        history::schedule_ai_decisions,
        history::ai_performance_summary,
        history::schedule_summary_stats,
        history::ai_reports,
        history::culture_analysis,
        history::recent_patterns,
        history::sensor_database_stats,
        history::productivity_evolution,
        history::learning_evolution,
        weather::current,
        weather::recommendations,
    ),
    components(
        schemas(
            MessageResponse,
            health::HealthResponse,
            farmers::FarmerResponse,
            farmers::FarmerPayload,
            sensors::SensorResponse,
            sensors::SensorPayload,
            sensors::MeasurementResponse,
            sensors::MeasurementPayload,
            sensors::RecentMeasurementResponse,
            sensors::SensorSummaryResponse,
            sensors::SensorTypeCount,
            sensors::SensorTypeAverage,
            zones::ZoneResponse,
            zones::ZonePayload,
            irrigators::IrrigatorResponse,
            irrigators::IrrigatorPayload,
            irrigators::StatusPayload,
            sectors::SectorResponse,
            sectors::SectorPayload,
            sectors::SchedulePayload,
            irrigation::AiDecisionResponse,
            irrigation::IrrigationSummaryResponse,
            irrigation::StatusCount,
            irrigation::UpcomingIrrigation,
            irrigation::AiSummaryResponse,
            irrigation::AiSummary,
            irrigation::RecentDecision,
            irrigation::DashboardStatsResponse,
            irrigation::IrrigatorCounts,
            irrigation::IrrigatorStatusCard,
            irrigation::IrrigationStatsResponse,
            irrigation::SectorIrrigation,
            irrigation::SectorStatus,
            irrigation::AreaStatsResponse,
            irrigation::ZoneDetail,
            irrigation::IrrigatorStatsResponse,
            irrigation::IrrigatorDetail,
            history::DecisionFlowStep,
            history::HourlyConditions,
            history::ScheduledDecision,
            history::AiPerformanceSummary,
            history::ScheduleSummaryStats,
            history::ReportCard,
            history::CultureAnalysis,
            history::RecentPattern,
            history::SensorDatabaseStats,
            history::SensorGroupStatus,
            history::ProductivityEvolution,
            history::ProductivityPoint,
            history::Improvement,
            history::LearningPoint,
            weather::CurrentWeather,
            weather::Recommendation,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "agricultores", description = "Farmers"),
        (name = "sensores", description = "Sensors and measurements"),
        (name = "irrigacao", description = "Zones, irrigators, sectors and AI decisions"),
        (name = "dashboard", description = "Dashboard statistics"),
        (name = "historico", description = "History and reports"),
        (name = "agendamentos", description = "Schedule page"),
        (name = "clima", description = "Weather panel"),
    ),
    info(
        title = "RaizTech API",
        description = "Data and reporting API for the irrigation dashboard",
        version = "0.1.0"
    )
)]
struct ApiDoc;

async fn api_not_found() -> AppError {
    AppError::NotFound("Rota não encontrada".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route(
            "/agricultores",
            get(farmers::list_farmers).post(farmers::create_farmer),
        )
        .route(
            "/agricultores/{id}",
            get(farmers::get_farmer)
                .put(farmers::update_farmer)
                .delete(farmers::delete_farmer),
        )
        .route(
            "/sensores",
            get(sensors::list_sensors).post(sensors::create_sensor),
        )
        .route(
            "/sensores/{id}",
            get(sensors::get_sensor)
                .put(sensors::update_sensor)
                .delete(sensors::delete_sensor),
        )
        .route(
            "/sensores/{id}/medicoes",
            get(sensors::list_sensor_measurements),
        )
        .route(
            "/sensores/tipos/{tipo}/medicoes-recentes",
            get(sensors::list_recent_by_type),
        )
        .route("/medicoes", post(sensors::create_measurement))
        .route("/dashboard/sensores-resumo", get(sensors::sensor_summary))
        .route("/zonas", get(zones::list_zones).post(zones::create_zone))
        .route(
            "/zonas/{id}",
            get(zones::get_zone)
                .put(zones::update_zone)
                .delete(zones::delete_zone),
        )
        .route(
            "/irrigadores",
            get(irrigators::list_irrigators).post(irrigators::create_irrigator),
        )
        .route(
            "/irrigadores/{id}",
            get(irrigators::get_irrigator)
                .put(irrigators::update_irrigator)
                .delete(irrigators::delete_irrigator),
        )
        .route(
            "/irrigadores/{id}/status",
            put(irrigators::update_irrigator_status),
        )
        .route(
            "/setores",
            get(sectors::list_sectors).post(sectors::create_sector),
        )
        .route(
            "/setores/{id}",
            get(sectors::get_sector)
                .put(sectors::update_sector)
                .delete(sectors::delete_sector),
        )
        .route(
            "/setores/{id}/irrigacao",
            post(sectors::schedule_irrigation),
        )
        .route("/decisoes-ia", get(irrigation::list_ai_decisions))
        .route(
            "/dashboard/irrigacao-resumo",
            get(irrigation::irrigation_summary),
        )
        .route("/dashboard/ai-summary", get(irrigation::ai_summary))
        .route("/dashboard/stats", get(irrigation::dashboard_stats))
        .route(
            "/dashboard/irrigators-status",
            get(irrigation::irrigators_status),
        )
        .route("/irrigation/stats", get(irrigation::irrigation_stats))
        .route("/irrigation/zones", get(irrigation::irrigation_zones))
        .route("/areas/stats", get(irrigation::area_stats))
        .route("/areas/zones", get(irrigation::area_zones))
        .route("/sensors/stats", get(irrigation::irrigator_stats))
        .route("/sensors/irrigators", get(irrigation::irrigator_details))
        .route("/history/decision-flow", get(history::decision_flow))
        .route(
            "/history/environmental-correlation",
            get(history::environmental_correlation),
        )
        .route(
            "/history/ai-performance-summary",
            get(history::ai_performance_summary),
        )
        .route("/history/ai-reports", get(history::ai_reports))
        .route("/history/culture-analysis", get(history::culture_analysis))
        .route(
            "/history/sensor-database-stats",
            get(history::sensor_database_stats),
        )
        .route(
            "/history/productivity-evolution",
            get(history::productivity_evolution),
        )
        .route(
            "/reports/learning-evolution",
            get(history::learning_evolution),
        )
        .route(
            "/schedule/ai-decisions",
            get(history::schedule_ai_decisions),
        )
        .route(
            "/schedule/ai-summary-stats",
            get(history::schedule_summary_stats),
        )
        .route("/schedule/recent-patterns", get(history::recent_patterns))
        .route("/weather/current", get(weather::current))
        .route("/weather/recommendations", get(weather::recommendations))
        .fallback(api_not_found)
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Bundled front end; unknown paths get index.html for client-side routing
    let static_dir = Path::new(&state.config.static_dir);
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .merge(docs_routes)
        .fallback_service(frontend)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
