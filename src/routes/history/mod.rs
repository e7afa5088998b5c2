mod handlers;
mod types;

pub use handlers::{
    ai_performance_summary, ai_reports, culture_analysis, decision_flow,
    environmental_correlation, learning_evolution, productivity_evolution, recent_patterns,
    schedule_ai_decisions, schedule_summary_stats, sensor_database_stats,
};
pub use types::{
    AiPerformanceSummary, CultureAnalysis, DecisionFlowStep, HourlyConditions, Improvement,
    LearningPoint, ProductivityEvolution, ProductivityPoint, RecentPattern, ReportCard,
    ScheduleSummaryStats, ScheduledDecision, SensorDatabaseStats, SensorGroupStatus,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_ai_performance_summary, __path_ai_reports, __path_culture_analysis,
    __path_decision_flow, __path_environmental_correlation, __path_learning_evolution,
    __path_productivity_evolution, __path_recent_patterns, __path_schedule_ai_decisions,
    __path_schedule_summary_stats, __path_sensor_database_stats,
};
