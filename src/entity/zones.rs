use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Zona")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_zona")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "hectares")]
    pub area_hectares: f64,
    /// Accumulated water savings in litres
    #[sea_orm(column_name = "economia")]
    pub savings: f64,
    #[sea_orm(column_name = "eficiencia")]
    pub efficiency: Option<f64>,
    #[sea_orm(column_name = "ID_propriedade_fk")]
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
    #[sea_orm(has_many = "super::irrigators::Entity")]
    Irrigators,
    #[sea_orm(has_many = "super::ai_decisions::Entity")]
    AiDecisions,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::irrigators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Irrigators.def()
    }
}

impl Related<super::ai_decisions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiDecisions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
