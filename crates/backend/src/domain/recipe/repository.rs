use anyhow::Result;
use chrono::Utc;
use contracts::domain::recipe::aggregate::{Ingredient, Recipe};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub ingredients_json: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Recipe {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let ingredients: Vec<Ingredient> = serde_json::from_str(&m.ingredients_json)
            .map_err(|e| anyhow::anyhow!("Corrupt ingredients_json for recipe {}: {}", m.id, e))?;
        Ok(Recipe {
            id: m.id,
            description: m.description,
            ingredients,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Number of stored recipes. Used by startup seeding only; the ingredient
/// service consumes nothing beyond `find_by_id` and `save`.
pub async fn count() -> Result<u64> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find().count(conn()).await?)
}

pub async fn find_by_id(id: &str) -> Result<Option<Recipe>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    model.map(Recipe::try_from).transpose()
}

/// Upsert keyed by recipe id: the whole row is overwritten, including the
/// serialized ingredient collection. Assigns store ids to the aggregate and
/// to any new ingredient, then returns the persisted state re-read from the
/// store.
pub async fn save(mut recipe: Recipe) -> Result<Recipe> {
    recipe.assign_missing_ids();
    let ingredients_json = serde_json::to_string(&recipe.ingredients)?;
    let now = Utc::now();

    let active = ActiveModel {
        id: Set(recipe.id.clone()),
        description: Set(recipe.description.clone()),
        ingredients_json: Set(ingredients_json),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([
                    Column::Description,
                    Column::IngredientsJson,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(conn())
        .await?;

    find_by_id(&recipe.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Recipe {} missing after save", recipe.id))
}
