mod handlers;
mod types;

pub use handlers::{
    ai_summary, area_stats, area_zones, dashboard_stats, irrigation_stats, irrigation_summary,
    irrigation_zones, irrigator_details, irrigator_stats, irrigators_status, list_ai_decisions,
};
pub use types::{
    AiDecisionResponse, AiSummary, AiSummaryResponse, AreaStatsResponse, DashboardStatsResponse,
    IrrigationStatsResponse, IrrigationSummaryResponse, IrrigatorCounts, IrrigatorDetail,
    IrrigatorStatsResponse, IrrigatorStatusCard, RecentDecision, SectorIrrigation, SectorStatus,
    StatusCount, UpcomingIrrigation, ZoneDetail,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_ai_summary, __path_area_stats, __path_area_zones, __path_dashboard_stats,
    __path_irrigation_stats, __path_irrigation_summary, __path_irrigation_zones,
    __path_irrigator_details, __path_irrigator_stats, __path_irrigators_status,
    __path_list_ai_decisions,
};
