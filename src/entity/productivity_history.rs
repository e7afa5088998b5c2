use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly productivity snapshot. Percentages are relative to the
/// traditional (pre-AI) baseline of 100.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "HistoricoProdutividade")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_historico")]
    pub id: i32,
    #[sea_orm(column_name = "mes_ano")]
    pub month: Date,
    #[sea_orm(column_name = "produtividade_ia")]
    pub ai_productivity: f64,
    #[sea_orm(column_name = "economia_agua_ia")]
    pub ai_water_savings: f64,
    #[sea_orm(column_name = "eficiencia_ph_ia")]
    pub ai_ph_efficiency: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
