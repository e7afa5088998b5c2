use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `statusIA` value of crops whose model is still training.
pub const AI_STATUS_LEARNING: &str = "Aprendendo";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Cultura")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_cultura")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "padroes_ml")]
    pub ml_patterns: i32,
    #[sea_orm(column_name = "eficiencia")]
    pub efficiency: f64,
    #[sea_orm(column_name = "economia")]
    pub savings: f64,
    #[sea_orm(column_name = "statusIA")]
    pub ai_status: String,
    #[sea_orm(column_name = "ID_setor_fk")]
    pub sector_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sectors::Entity",
        from = "Column::SectorId",
        to = "super::sectors::Column::Id"
    )]
    Sector,
}

impl Related<super::sectors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
