use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Medicao")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_medicao")]
    pub id: i64,
    #[sea_orm(column_name = "data_hora")]
    pub taken_at: DateTime,
    #[sea_orm(column_name = "valor_medicao")]
    pub value: f64,
    #[sea_orm(column_name = "ID_sensor_fk")]
    pub sensor_id: i32,
    #[sea_orm(column_name = "ID_propriedade_fk")]
    pub property_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sensors::Entity",
        from = "Column::SensorId",
        to = "super::sensors::Column::Id"
    )]
    Sensor,
}

impl Related<super::sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
