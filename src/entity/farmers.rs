use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Agricultor")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_agricultor")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "CPF", unique)]
    pub tax_id: String,
    #[sea_orm(column_name = "data_nascimento")]
    pub birth_date: Date,
    #[sea_orm(column_name = "telefones_de_conato")]
    pub phones: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
