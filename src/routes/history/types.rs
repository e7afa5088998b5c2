use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::{format, placeholders};
use crate::entity::{DecisionType, learned_patterns, productivity_history};

#[derive(Debug, Default, FromQueryResult)]
pub(super) struct EnvironmentRow {
    pub water_level: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub sun_intensity: Option<f64>,
}

/// One AI decision with the conditions measured shortly before it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionFlowStep {
    /// `HH:MM`
    pub time: String,
    pub water_level: i64,
    pub is_raining: bool,
    pub soil_moisture: i64,
    pub ph: f64,
    pub temperature: i64,
    /// Solar reading divided by 10
    pub sun_intensity: i64,
    pub decision: String,
    /// Minutes
    pub duration: i64,
}

impl DecisionFlowStep {
    pub fn new(decided_at: NaiveDateTime, decision: String, env: EnvironmentRow) -> Self {
        Self {
            time: format::clock(decided_at),
            water_level: format::round_int(
                env.water_level.unwrap_or(placeholders::DEFAULT_WATER_LEVEL),
            ),
            is_raining: placeholders::IS_RAINING,
            soil_moisture: format::round_int(
                env.soil_moisture.unwrap_or(placeholders::DEFAULT_SOIL_MOISTURE),
            ),
            ph: format::round_to(env.ph.unwrap_or(placeholders::DEFAULT_PH), 1),
            temperature: format::round_int(
                env.temperature.unwrap_or(placeholders::DEFAULT_TEMPERATURE),
            ),
            sun_intensity: format::round_int(
                env.sun_intensity.unwrap_or(placeholders::DEFAULT_SUN_INTENSITY) / 10.0,
            ),
            decision,
            duration: placeholders::DECISION_DURATION_MIN,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct HourlyRow {
    pub hour_of_day: i64,
    pub sun_intensity: Option<f64>,
    pub temperature: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub ph: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyConditions {
    /// Zero-padded hour of day
    pub hour: String,
    pub sun_intensity: i64,
    pub temperature: i64,
    pub soil_moisture: i64,
    pub ph: f64,
}

impl From<HourlyRow> for HourlyConditions {
    fn from(r: HourlyRow) -> Self {
        Self {
            hour: format::hour_label(r.hour_of_day),
            sun_intensity: r.sun_intensity.map_or(0, format::round_int),
            temperature: r.temperature.map_or(0, format::round_int),
            soil_moisture: r.soil_moisture.map_or(0, format::round_int),
            ph: r.ph.map_or(0.0, |ph| format::round_to(ph, 1)),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct ScheduledDecisionRow {
    pub id: i32,
    pub irrigator: Option<String>,
    pub zone: String,
    pub decision: String,
    pub reason: String,
    pub decided_at: NaiveDateTime,
    pub confidence: f64,
    pub water_saved: f64,
    pub ai_model: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledDecision {
    pub id: i32,
    pub irrigator: Option<String>,
    pub zone: String,
    pub decision: String,
    /// Decision type
    pub reason: String,
    /// `HH:MM:SS`
    pub time: String,
    /// `N%`
    pub confidence: String,
    /// `NL`
    pub water_saved: String,
    pub ai_model: String,
    /// `executed`, `active`, `scheduled`, `warning` or `pending`
    pub status: String,
}

impl From<ScheduledDecisionRow> for ScheduledDecision {
    fn from(r: ScheduledDecisionRow) -> Self {
        Self {
            status: DecisionType::schedule_status(&r.reason).to_string(),
            id: r.id,
            irrigator: r.irrigator,
            zone: r.zone,
            decision: r.decision,
            reason: r.reason,
            time: format::clock_seconds(r.decided_at),
            confidence: format::percent(r.confidence),
            water_saved: format::liters(r.water_saved),
            ai_model: r
                .ai_model
                .unwrap_or_else(|| placeholders::BASIC_AI_MODEL.to_string()),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct PerformanceRow {
    pub learned_patterns: f64,
    pub average_efficiency: f64,
    pub monthly_savings: f64,
    pub decision_accuracy: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiPerformanceSummary {
    pub learned_patterns: i64,
    pub average_efficiency: f64,
    /// Litres saved this month
    pub water_saved: i64,
    pub decision_accuracy: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummaryStats {
    pub learned_patterns: i64,
    pub water_efficiency: f64,
    pub monthly_savings: i64,
    pub decision_accuracy: f64,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct ReportRow {
    pub new_decisions_last_week: i64,
    pub global_efficiency: f64,
    pub monthly_savings: f64,
    pub decision_accuracy: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCard {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub period: String,
    pub value: String,
    pub change: String,
    pub trend: String,
    pub description: String,
}

impl ReportCard {
    pub(super) fn new(
        title: &str,
        kind: &str,
        period: &str,
        value: String,
        change: &str,
        description: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            kind: kind.to_string(),
            period: period.to_string(),
            value,
            change: change.to_string(),
            trend: placeholders::TREND_UP.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct CultureRow {
    pub culture: String,
    pub irrigators: i64,
    pub patterns_learned: i32,
    pub efficiency: f64,
    pub water_saved: f64,
    pub ai_status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CultureAnalysis {
    pub culture: String,
    /// Irrigators in the zone of the crop's sector
    pub irrigators: i64,
    pub patterns_learned: i32,
    /// `N%`
    pub efficiency: String,
    /// `NL/semana`
    pub water_saved: String,
    pub ai_status: String,
}

impl From<CultureRow> for CultureAnalysis {
    fn from(r: CultureRow) -> Self {
        Self {
            culture: r.culture,
            irrigators: r.irrigators,
            patterns_learned: r.patterns_learned,
            efficiency: format::percent(r.efficiency),
            water_saved: format!("{}L/semana", r.water_saved.trunc() as i64),
            ai_status: r.ai_status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentPattern {
    pub pattern: String,
    pub description: String,
    pub cultures_affected: Vec<String>,
    /// `+N%`
    pub efficiency: String,
    /// `há N dias`
    pub learned: String,
}

impl RecentPattern {
    pub fn new(p: learned_patterns::Model, today: NaiveDate) -> Self {
        Self {
            cultures_affected: format::split_list(&p.affected_crops),
            efficiency: format::signed_percent(p.efficiency_gain),
            learned: format::days_ago(p.learned_on, today),
            pattern: p.name,
            description: p.description,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct SensorStatsRow {
    pub total_records: i64,
    pub records_today: i64,
    pub reservoir_sensors: i64,
    pub humidity_sensors: i64,
    pub ph_sensors: i64,
    pub temperature_sensors: i64,
    pub light_sensors: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorGroupStatus {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorDatabaseStats {
    pub total_records: i64,
    pub measurements_per_day: i64,
    pub sensor_accuracy: f64,
    /// Megabytes
    pub storage_used: i64,
    pub sensor_status: Vec<SensorGroupStatus>,
}

impl SensorDatabaseStats {
    /// Also reports whether `measurementsPerDay` fell back to the fixed rate.
    pub(super) fn new(r: &SensorStatsRow) -> (Self, bool) {
        let group = |label: &str, count: i64, status: &str| SensorGroupStatus {
            name: format!("{label} ({count} sensores)"),
            status: status.to_string(),
        };
        let fallback = r.records_today <= 0;

        let stats = Self {
            total_records: r.total_records,
            measurements_per_day: if fallback {
                placeholders::MEASUREMENTS_PER_DAY
            } else {
                r.records_today
            },
            sensor_accuracy: placeholders::SENSOR_ACCURACY,
            storage_used: placeholders::STORAGE_USED_MB,
            sensor_status: vec![
                group("Nível de Água", r.reservoir_sensors, placeholders::SENSOR_ONLINE),
                group("Umidade do Solo", r.humidity_sensors, placeholders::SENSOR_ONLINE),
                group("pH do Solo", r.ph_sensors, placeholders::PH_SENSOR_STATUS),
                group("Temperatura", r.temperature_sensors, placeholders::SENSOR_ONLINE),
                group("Intensidade Solar", r.light_sensors, placeholders::SENSOR_ONLINE),
            ],
        };
        (stats, fallback)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthsQuery {
    /// Number of months, 1 to 120 (default: 6)
    pub months: Option<i64>,
}

impl MonthsQuery {
    #[must_use]
    pub fn months(&self) -> u64 {
        self.months.unwrap_or(6).clamp(1, 120).unsigned_abs()
    }
}

/// Productivity relative to the traditional baseline of 100.
pub const TRADITIONAL_BASELINE: f64 = 100.0;
/// pH efficiency before AI control, in percent.
pub const PH_BASELINE: f64 = 70.0;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityPoint {
    /// `Mon/yy`
    pub period: String,
    pub traditional: f64,
    #[serde(rename = "withAI")]
    pub with_ai: f64,
    pub increase: f64,
}

impl From<&productivity_history::Model> for ProductivityPoint {
    fn from(m: &productivity_history::Model) -> Self {
        Self {
            period: format::month_label(m.month),
            traditional: TRADITIONAL_BASELINE,
            with_ai: m.ai_productivity,
            increase: format::round_to(m.ai_productivity - TRADITIONAL_BASELINE, 2),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Improvement {
    pub metric: String,
    pub before: String,
    pub after: String,
    pub improvement: String,
}

impl Improvement {
    fn new(metric: &str, before: &str, after: String, improvement: String) -> Self {
        Self {
            metric: metric.to_string(),
            before: before.to_string(),
            after,
            improvement,
        }
    }

    /// Three metrics from the newest snapshot followed by the fixed rows.
    #[must_use]
    pub fn from_latest(latest: Option<&productivity_history::Model>) -> Vec<Self> {
        let (productivity, water, ph) = latest.map_or((0.0, 0.0, 0.0), |m| {
            (m.ai_productivity, m.ai_water_savings, m.ai_ph_efficiency)
        });

        let mut rows = vec![
            Self::new(
                "Produtividade",
                "100%",
                format::percent(productivity),
                format::signed_percent(productivity - TRADITIONAL_BASELINE),
            ),
            Self::new(
                "Economia de Água",
                "0%",
                format::percent(water),
                format::signed_percent(water),
            ),
            Self::new(
                "Eficiência pH",
                "70%",
                format::percent(ph),
                format::signed_percent(ph - PH_BASELINE),
            ),
        ];
        rows.extend(
            placeholders::FIXED_IMPROVEMENTS
                .iter()
                .map(|(metric, before, after, improvement)| {
                    Self::new(metric, before, (*after).to_string(), (*improvement).to_string())
                }),
        );
        rows
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityEvolution {
    pub chart_data: Vec<ProductivityPoint>,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct LearningRow {
    pub month: String,
    pub decisions: i64,
    pub confidence: f64,
}

/// One month of AI activity; keys match the chart series labels.
#[derive(Debug, Serialize, ToSchema)]
pub struct LearningPoint {
    /// `YYYY-MM`
    pub month: String,
    #[serde(rename = "Padrões")]
    pub decisions: i64,
    #[serde(rename = "Eficiência (%)")]
    pub confidence: f64,
}

impl From<LearningRow> for LearningPoint {
    fn from(row: LearningRow) -> Self {
        Self {
            month: row.month,
            decisions: row.decisions,
            confidence: format::round_to(row.confidence, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn decision_flow_uses_defaults_without_readings() {
        let step = DecisionFlowStep::new(at(6, 30), "Irrigar".into(), EnvironmentRow::default());
        assert_eq!(step.time, "06:30");
        assert_eq!(step.water_level, 70);
        assert_eq!(step.soil_moisture, 60);
        assert_eq!(step.ph, 6.5);
        assert_eq!(step.temperature, 25);
        assert_eq!(step.sun_intensity, 50);
        assert!(!step.is_raining);
        assert_eq!(step.duration, 30);
    }

    #[test]
    fn decision_flow_rounds_readings() {
        let env = EnvironmentRow {
            water_level: Some(81.6),
            soil_moisture: Some(44.2),
            ph: Some(6.84),
            temperature: Some(27.5),
            sun_intensity: Some(734.0),
        };
        let step = DecisionFlowStep::new(at(14, 0), "Adiar".into(), env);
        assert_eq!(step.water_level, 82);
        assert_eq!(step.soil_moisture, 44);
        assert_eq!(step.ph, 6.8);
        assert_eq!(step.temperature, 28);
        assert_eq!(step.sun_intensity, 73);
    }

    #[test]
    fn hourly_conditions_default_missing_to_zero() {
        let row = HourlyRow {
            hour_of_day: 6,
            sun_intensity: None,
            temperature: Some(21.4),
            soil_moisture: None,
            ph: None,
        };
        let hour = HourlyConditions::from(row);
        assert_eq!(hour.hour, "06");
        assert_eq!(hour.sun_intensity, 0);
        assert_eq!(hour.temperature, 21);
        assert_eq!(hour.ph, 0.0);
    }

    #[test]
    fn scheduled_decision_formats_fields() {
        let row = ScheduledDecisionRow {
            id: 7,
            irrigator: None,
            zone: "Zona Norte".into(),
            decision: "Reduzir volume".into(),
            reason: "Economia".into(),
            decided_at: at(8, 5),
            confidence: 92.5,
            water_saved: 0.0,
            ai_model: None,
        };
        let decision = ScheduledDecision::from(row);
        assert_eq!(decision.time, "08:05:00");
        assert_eq!(decision.confidence, "92.5%");
        assert_eq!(decision.water_saved, "0L");
        assert_eq!(decision.ai_model, "Básico");
        assert_eq!(decision.status, "active");
    }

    #[test]
    fn sensor_stats_fall_back_without_records_today() {
        let row = SensorStatsRow {
            total_records: 10,
            records_today: 0,
            reservoir_sensors: 2,
            humidity_sensors: 3,
            ph_sensors: 1,
            temperature_sensors: 1,
            light_sensors: 0,
        };
        let (stats, fallback) = SensorDatabaseStats::new(&row);
        assert!(fallback);
        assert_eq!(stats.measurements_per_day, 2880);
        assert_eq!(stats.sensor_status[0].name, "Nível de Água (2 sensores)");
        assert_eq!(stats.sensor_status[2].status, "Calibrando");
    }

    #[test]
    fn improvements_compare_against_baselines() {
        let latest = productivity_history::Model {
            id: 1,
            month: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            ai_productivity: 123.0,
            ai_water_savings: 31.5,
            ai_ph_efficiency: 88.0,
        };
        let rows = Improvement::from_latest(Some(&latest));
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].after, "123%");
        assert_eq!(rows[0].improvement, "+23%");
        assert_eq!(rows[1].improvement, "+31.5%");
        assert_eq!(rows[2].improvement, "+18%");
        assert_eq!(rows[3].metric, "Aproveitamento Solar");

        let point = ProductivityPoint::from(&latest);
        assert_eq!(point.period, "Aug/25");
        assert_eq!(point.increase, 23.0);
    }

    #[test]
    fn months_are_bounded() {
        assert_eq!(MonthsQuery { months: None }.months(), 6);
        assert_eq!(MonthsQuery { months: Some(-2) }.months(), 1);
    }

    #[test]
    fn learning_points_use_chart_labels() {
        let point = LearningPoint::from(LearningRow {
            month: "2025-08".into(),
            decisions: 42,
            confidence: 87.25,
        });
        assert_eq!(
            serde_json::to_value(point).unwrap(),
            serde_json::json!({"month": "2025-08", "Padrões": 42, "Eficiência (%)": 87.3})
        );
    }
}
