use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum SensorType {
    #[sea_orm(string_value = "Reservatorio")]
    #[serde(rename = "Reservatorio")]
    Reservoir,
    #[sea_orm(string_value = "Umidade")]
    #[serde(rename = "Umidade")]
    Humidity,
    #[sea_orm(string_value = "pH")]
    #[serde(rename = "pH")]
    Ph,
    #[sea_orm(string_value = "Temperatura")]
    #[serde(rename = "Temperatura")]
    Temperature,
    #[sea_orm(string_value = "LuzSolar")]
    #[serde(rename = "LuzSolar")]
    SolarLight,
}

impl SensorType {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.to_value() == label)
    }

    #[must_use]
    pub fn labels() -> Vec<String> {
        Self::iter().map(|kind| kind.to_value()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Sensor")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_sensor")]
    pub id: i32,
    #[sea_orm(column_name = "tipo")]
    pub sensor_type: SensorType,
    #[sea_orm(column_name = "fabricante")]
    pub manufacturer: Option<String>,
    #[sea_orm(column_name = "ID_PropriedadeRural_fk")]
    pub property_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Property,
    #[sea_orm(has_many = "super::measurements::Entity")]
    Measurements,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::measurements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Measurements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_types_parse_from_column_labels() {
        assert_eq!(SensorType::from_label("pH"), Some(SensorType::Ph));
        assert_eq!(SensorType::from_label("LuzSolar"), Some(SensorType::SolarLight));
        assert_eq!(SensorType::from_label("ph"), None);
        assert_eq!(
            SensorType::labels(),
            ["Reservatorio", "Umidade", "pH", "Temperatura", "LuzSolar"]
        );
    }
}
