use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "PropriedadeRural")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_propriedade")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::zones::Entity")]
    Zones,
    #[sea_orm(has_many = "super::sectors::Entity")]
    Sectors,
    #[sea_orm(has_many = "super::sensors::Entity")]
    Sensors,
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zones.def()
    }
}

impl Related<super::sectors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sectors.def()
    }
}

impl Related<super::sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
