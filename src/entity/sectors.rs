use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Setor")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_setor")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "cultura")]
    pub crop_name: String,
    /// Minutes per irrigation run
    #[sea_orm(column_name = "duracao_irrigacao")]
    pub irrigation_duration: Option<i32>,
    #[sea_orm(column_name = "ultima_irrigacao")]
    pub last_irrigation: Option<DateTime>,
    #[sea_orm(column_name = "proxima_irrigacao")]
    pub next_irrigation: Option<DateTime>,
    #[sea_orm(column_name = "umidade_atual")]
    pub current_humidity: Option<f64>,
    #[sea_orm(column_name = "ID_propriedade_fk")]
    pub property_id: i32,
    #[sea_orm(column_name = "ID_zona_fk")]
    pub zone_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::zones::Entity",
        from = "Column::ZoneId",
        to = "super::zones::Column::Id"
    )]
    Zone,
    #[sea_orm(has_many = "super::crops::Entity")]
    Crops,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::crops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
