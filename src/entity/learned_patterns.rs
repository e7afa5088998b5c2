use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "PadroesAprendidos")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_padrao")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "descricao", column_type = "Text")]
    pub description: String,
    /// Comma-separated crop names
    #[sea_orm(column_name = "culturas_afetadas")]
    pub affected_crops: String,
    #[sea_orm(column_name = "ganho_eficiencia")]
    pub efficiency_gain: f64,
    #[sea_orm(column_name = "data_aprendizado")]
    pub learned_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
