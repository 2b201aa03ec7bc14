use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::client;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sell")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity).from(Column::ClientId).to(client::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
