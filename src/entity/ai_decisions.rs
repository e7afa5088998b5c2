use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum DecisionType {
    #[sea_orm(string_value = "Otimização")]
    #[serde(rename = "Otimização")]
    Optimization,
    #[sea_orm(string_value = "Economia")]
    #[serde(rename = "Economia")]
    Savings,
    #[sea_orm(string_value = "Prevenção")]
    #[serde(rename = "Prevenção")]
    Prevention,
    #[sea_orm(string_value = "Alerta")]
    #[serde(rename = "Alerta")]
    Alert,
}

impl DecisionType {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.to_value() == label)
    }

    /// Outcome badge on the main dashboard. Unknown labels are `pending`.
    #[must_use]
    pub fn dashboard_outcome(label: &str) -> &'static str {
        match Self::from_label(label) {
            Some(Self::Optimization | Self::Savings) => "success",
            Some(Self::Alert) => "warning",
            Some(Self::Prevention) | None => "pending",
        }
    }

    /// Status column of the schedule page. Unknown labels are `pending`.
    #[must_use]
    pub fn schedule_status(label: &str) -> &'static str {
        match Self::from_label(label) {
            Some(Self::Optimization) => "executed",
            Some(Self::Savings) => "active",
            Some(Self::Prevention) => "scheduled",
            Some(Self::Alert) => "warning",
            None => "pending",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "DecisaoIA")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_decisao")]
    pub id: i32,
    #[sea_orm(column_name = "data_hora")]
    pub decided_at: DateTime,
    #[sea_orm(column_name = "descricao", column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "tipo")]
    pub decision_type: DecisionType,
    /// Confidence in percent
    #[sea_orm(column_name = "confianca")]
    pub confidence: f64,
    /// Litres saved by the decision
    #[sea_orm(column_name = "volume_economizado")]
    pub volume_saved: f64,
    #[sea_orm(column_name = "ID_zona_fk")]
    pub zone_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::zones::Entity",
        from = "Column::ZoneId",
        to = "super::zones::Column::Id"
    )]
    Zone,
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_outcome_follows_decision_type() {
        assert_eq!(DecisionType::dashboard_outcome("Otimização"), "success");
        assert_eq!(DecisionType::dashboard_outcome("Economia"), "success");
        assert_eq!(DecisionType::dashboard_outcome("Prevenção"), "pending");
        assert_eq!(DecisionType::dashboard_outcome("Alerta"), "warning");
        assert_eq!(DecisionType::dashboard_outcome("Outro"), "pending");
    }

    #[test]
    fn schedule_status_follows_decision_type() {
        assert_eq!(DecisionType::schedule_status("Otimização"), "executed");
        assert_eq!(DecisionType::schedule_status("Economia"), "active");
        assert_eq!(DecisionType::schedule_status("Prevenção"), "scheduled");
        assert_eq!(DecisionType::schedule_status("Alerta"), "warning");
        assert_eq!(DecisionType::schedule_status(""), "pending");
    }
}
