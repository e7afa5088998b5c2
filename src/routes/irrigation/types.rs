use chrono::NaiveDateTime;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::format;
use crate::entity::{DecisionType, IrrigatorStatus, ai_decisions, sectors, zones};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DecisionsQuery {
    /// Maximum number of decisions, 1 to 1000 (default: 20)
    pub limit: Option<i64>,
}

impl DecisionsQuery {
    pub const DEFAULT_LIMIT: i64 = 20;

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, 1000)
            .unsigned_abs()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AiDecisionResponse {
    #[serde(rename = "ID_decisao")]
    pub id: i32,
    #[serde(rename = "data_hora")]
    pub decided_at: NaiveDateTime,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub decision_type: DecisionType,
    #[serde(rename = "confianca")]
    pub confidence: f64,
    #[serde(rename = "volume_economizado")]
    pub volume_saved: f64,
    #[serde(rename = "ID_zona_fk")]
    pub zone_id: i32,
    #[serde(rename = "zona_nome")]
    pub zone_name: Option<String>,
}

impl AiDecisionResponse {
    pub fn new(decision: ai_decisions::Model, zone: Option<zones::Model>) -> Self {
        Self {
            id: decision.id,
            decided_at: decision.decided_at,
            description: decision.description,
            decision_type: decision.decision_type,
            confidence: decision.confidence,
            volume_saved: decision.volume_saved,
            zone_id: decision.zone_id,
            zone_name: zone.map(|z| z.name),
        }
    }
}

#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct StatusCount {
    pub status_: String,
    pub quantidade: i64,
}

#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct UpcomingIrrigation {
    pub nome: String,
    pub proxima_irrigacao: NaiveDateTime,
    pub cultura: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IrrigationSummaryResponse {
    pub status_irrigadores: Vec<StatusCount>,
    pub proximas_irrigacoes: Vec<UpcomingIrrigation>,
    /// Sum of zone savings in litres
    pub economia_total: f64,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct TodayRow {
    pub decisions_today: i64,
    pub water_saved_today: f64,
    pub average_confidence: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    pub decisions_today: i64,
    pub water_saved_today: i64,
    pub average_confidence: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentDecision {
    pub id: i32,
    /// `HH:MM`
    pub timestamp: String,
    pub zone: Option<String>,
    pub decision: String,
    pub confidence: f64,
    pub reasoning: DecisionType,
    /// `success`, `pending` or `warning`
    pub outcome: String,
    pub water_saved: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiSummaryResponse {
    pub summary: AiSummary,
    pub recent_decisions: Vec<RecentDecision>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IrrigatorCounts {
    /// Irrigators not under maintenance
    pub active: u64,
    pub total: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub irrigators: IrrigatorCounts,
    /// Mean water efficiency of irrigators not under maintenance
    pub efficiency: f64,
    pub learning_cultures: u64,
    /// Total hectares across zones
    pub coverage: f64,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct IrrigatorStatusRow {
    pub id: i32,
    pub name: String,
    pub zone: String,
    pub culture: Option<String>,
    pub ai_status: Option<String>,
    pub efficiency: Option<f64>,
    pub last_decision: Option<String>,
    pub next_irrigation: Option<NaiveDateTime>,
    pub soil_moisture: Option<f64>,
    pub coverage: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IrrigatorStatusCard {
    pub id: i32,
    pub name: String,
    pub culture: Option<String>,
    pub zone: String,
    pub ai_status: Option<String>,
    /// `N%`
    pub efficiency: String,
    pub last_decision: Option<String>,
    pub next_action: String,
    /// `N%`
    pub soil_moisture: String,
    /// `N hectares`
    pub coverage: String,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct SectorCountsRow {
    pub total_sectors: i64,
    pub active_sectors: i64,
    pub next_irrigation_minutes: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationStatsResponse {
    pub active_sectors: i64,
    pub total_sectors: i64,
    /// Litres per day
    pub daily_consumption: i64,
    /// `null` when nothing is scheduled
    pub next_irrigation_minutes: Option<i64>,
    pub avg_efficiency: f64,
}

/// Irrigation state of a sector relative to the database clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectorStatus {
    /// Inside the window of the last irrigation run
    Active,
    Scheduled,
    Paused,
}

impl SectorStatus {
    #[must_use]
    pub fn of(sector: &sectors::Model, now: NaiveDateTime) -> Self {
        if let (Some(last), Some(minutes)) = (sector.last_irrigation, sector.irrigation_duration) {
            let end = last + chrono::Duration::minutes(i64::from(minutes));
            if last <= now && now <= end {
                return Self::Active;
            }
        }
        match sector.next_irrigation {
            Some(next) if next > now => Self::Scheduled,
            _ => Self::Paused,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectorIrrigation {
    pub id: i32,
    pub name: String,
    pub status: SectorStatus,
    pub humidity: Option<f64>,
    pub next_irrigation_minutes: Option<i64>,
    pub last_irrigation_hours: Option<i64>,
    /// Minutes per run
    pub duration: Option<i32>,
}

impl SectorIrrigation {
    pub fn new(sector: sectors::Model, now: NaiveDateTime) -> Self {
        Self {
            status: SectorStatus::of(&sector, now),
            id: sector.id,
            name: sector.name,
            humidity: sector.current_humidity,
            next_irrigation_minutes: sector.next_irrigation.map(|next| (next - now).num_minutes()),
            last_irrigation_hours: sector.last_irrigation.map(|last| (now - last).num_hours()),
            duration: sector.irrigation_duration,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct ClockRow {
    pub now: NaiveDateTime,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct AreaStatsRow {
    pub active_zones: i64,
    pub total_zones: i64,
    pub total_coverage: f64,
    pub avg_efficiency: f64,
    pub weekly_savings: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaStatsResponse {
    /// Zones with at least one active irrigator
    pub active_zones: i64,
    pub total_zones: i64,
    pub total_coverage: f64,
    pub avg_efficiency: f64,
    /// Litres saved by decisions in the last 7 days
    pub weekly_savings: f64,
}

#[derive(Debug, FromQueryResult)]
pub(super) struct IrrigatorStatsRow {
    pub active_irrigators: i64,
    pub total_irrigators: i64,
    pub avg_efficiency: f64,
    pub total_coverage: f64,
    pub weekly_savings: f64,
    pub avg_confidence: f64,
}

/// Headline numbers of the irrigator page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IrrigatorStatsResponse {
    pub active_irrigators: i64,
    pub total_irrigators: i64,
    /// Mean water efficiency of active irrigators
    pub avg_efficiency: f64,
    /// Hectares of zones served by an active irrigator
    pub total_coverage: f64,
    /// Litres saved by decisions in the last 7 days
    pub weekly_savings: f64,
    /// Mean decision confidence over the last 7 days
    pub avg_confidence: f64,
}

impl From<IrrigatorStatsRow> for IrrigatorStatsResponse {
    fn from(row: IrrigatorStatsRow) -> Self {
        Self {
            active_irrigators: row.active_irrigators,
            total_irrigators: row.total_irrigators,
            avg_efficiency: format::round_to(row.avg_efficiency, 1),
            total_coverage: row.total_coverage,
            weekly_savings: row.weekly_savings,
            avg_confidence: format::round_to(row.avg_confidence, 1),
        }
    }
}

/// An irrigator with its zone, the zone's first sector and that sector's crop.
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IrrigatorDetail {
    pub id: i32,
    pub name: String,
    pub zone: String,
    pub culture: Option<String>,
    pub ai_status: Option<String>,
    pub efficiency: Option<f64>,
    /// Zone hectares
    pub coverage: f64,
    pub soil_moisture: Option<f64>,
    /// Percent
    pub battery: Option<i32>,
    pub last_decision: Option<String>,
    pub patterns_learned: Option<i32>,
    pub water_saved: Option<f64>,
    pub status: IrrigatorStatus,
}

/// A zone with its first irrigator, first sector and that sector's crop.
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetail {
    pub id: i32,
    pub name: String,
    pub crop: Option<String>,
    /// Hectares
    pub area: f64,
    pub irrigator: Option<String>,
    pub ai_status: Option<String>,
    pub efficiency: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub patterns_learned: Option<i32>,
    pub water_saved: f64,
    /// `null` for zones without an irrigator
    pub status: Option<IrrigatorStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sector(
        last: Option<NaiveDateTime>,
        duration: Option<i32>,
        next: Option<NaiveDateTime>,
    ) -> sectors::Model {
        sectors::Model {
            id: 1,
            name: "Setor A".into(),
            crop_name: "Milho".into(),
            irrigation_duration: duration,
            last_irrigation: last,
            next_irrigation: next,
            current_humidity: Some(55.0),
            property_id: 1,
            zone_id: None,
        }
    }

    #[test]
    fn running_sector_is_active() {
        let s = sector(Some(at(10, 0)), Some(30), Some(at(22, 0)));
        assert_eq!(SectorStatus::of(&s, at(10, 15)), SectorStatus::Active);
        assert_eq!(SectorStatus::of(&s, at(10, 30)), SectorStatus::Active);
    }

    #[test]
    fn finished_run_with_future_slot_is_scheduled() {
        let s = sector(Some(at(10, 0)), Some(30), Some(at(22, 0)));
        assert_eq!(SectorStatus::of(&s, at(11, 0)), SectorStatus::Scheduled);
    }

    #[test]
    fn sector_without_future_slot_is_paused() {
        let s = sector(Some(at(6, 0)), Some(30), Some(at(9, 0)));
        assert_eq!(SectorStatus::of(&s, at(11, 0)), SectorStatus::Paused);
        assert_eq!(SectorStatus::of(&sector(None, None, None), at(11, 0)), SectorStatus::Paused);
    }

    #[test]
    fn sector_row_reports_relative_times() {
        let s = sector(Some(at(6, 0)), Some(30), Some(at(12, 30)));
        let row = SectorIrrigation::new(s, at(11, 0));
        assert_eq!(row.next_irrigation_minutes, Some(90));
        assert_eq!(row.last_irrigation_hours, Some(5));
        assert_eq!(
            serde_json::to_value(row.status).unwrap(),
            serde_json::json!("scheduled")
        );
    }

    #[test]
    fn irrigator_stats_round_averages_only() {
        let stats = IrrigatorStatsResponse::from(IrrigatorStatsRow {
            active_irrigators: 2,
            total_irrigators: 3,
            avg_efficiency: 91.26,
            total_coverage: 12.75,
            weekly_savings: 1530.5,
            avg_confidence: 88.04,
        });
        assert_eq!(stats.avg_efficiency, 91.3);
        assert_eq!(stats.avg_confidence, 88.0);
        assert_eq!(stats.total_coverage, 12.75);
        assert_eq!(stats.weekly_savings, 1530.5);
    }
}
