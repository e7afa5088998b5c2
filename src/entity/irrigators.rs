use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operational status of an irrigator, stored with the dashboard's labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum IrrigatorStatus {
    #[sea_orm(string_value = "Ativo")]
    #[serde(rename = "Ativo")]
    Active,
    #[sea_orm(string_value = "Ocioso")]
    #[serde(rename = "Ocioso")]
    Idle,
    #[sea_orm(string_value = "Manutenção")]
    #[serde(rename = "Manutenção")]
    Maintenance,
}

impl IrrigatorStatus {
    /// Parse a stored/wire label. Matching is exact.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|status| status.to_value() == label)
    }

    /// Every accepted label, in declaration order.
    #[must_use]
    pub fn labels() -> Vec<String> {
        Self::iter().map(|status| status.to_value()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Irrigador")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_irrigador")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "status_")]
    pub status: IrrigatorStatus,
    #[sea_orm(column_name = "eficiencia_hidrica")]
    pub water_efficiency: Option<f64>,
    #[sea_orm(column_name = "bateria")]
    pub battery: Option<i32>,
    #[sea_orm(column_name = "economia")]
    pub savings: Option<f64>,
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
    fn status_labels_round_trip() {
        assert_eq!(IrrigatorStatus::from_label("Ativo"), Some(IrrigatorStatus::Active));
        assert_eq!(IrrigatorStatus::from_label("Ocioso"), Some(IrrigatorStatus::Idle));
        assert_eq!(
            IrrigatorStatus::from_label("Manutenção"),
            Some(IrrigatorStatus::Maintenance)
        );
        assert_eq!(IrrigatorStatus::from_label("Quebrado"), None);
        assert_eq!(IrrigatorStatus::from_label("ativo"), None);
    }

    #[test]
    fn labels_list_every_status() {
        assert_eq!(IrrigatorStatus::labels(), vec!["Ativo", "Ocioso", "Manutenção"]);
    }
}
