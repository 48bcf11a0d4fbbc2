use anyhow::Result;
use contracts::domain::unit_of_measure::aggregate::UnitOfMeasure;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "unit_of_measure")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UnitOfMeasure {
    fn from(m: Model) -> Self {
        UnitOfMeasure {
            id: m.id,
            description: m.description,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> Result<Vec<UnitOfMeasure>> {
    let mut items: Vec<UnitOfMeasure> = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.description
            .to_lowercase()
            .cmp(&b.description.to_lowercase())
    });
    Ok(items)
}

pub async fn find_by_id(id: &str) -> Result<Option<UnitOfMeasure>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(uom: &UnitOfMeasure) -> Result<()> {
    let active = ActiveModel {
        id: Set(uom.id.clone()),
        description: Set(uom.description.clone()),
    };
    active.insert(conn()).await?;
    Ok(())
}
