use serde::{Deserialize, Serialize};

use super::aggregate::{Ingredient, Recipe};
use crate::domain::unit_of_measure::command::UnitOfMeasureCommand;

// ============================================================================
// Commands (boundary DTOs)
// ============================================================================

/// Boundary-facing copy of an [`Ingredient`].
///
/// Unlike the domain entity it carries the owning recipe's id, because an
/// ingredient command travels on its own, outside the recipe aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientCommand {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "recipeId", default)]
    pub recipe_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub uom: UnitOfMeasureCommand,
}

/// Boundary-facing copy of a [`Recipe`] with its full ingredient set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeCommand {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientCommand>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&Ingredient> for IngredientCommand {
    /// Does not know the owning recipe; callers set `recipe_id` themselves.
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id.clone(),
            recipe_id: String::new(),
            description: ingredient.description.clone(),
            amount: ingredient.amount,
            uom: UnitOfMeasureCommand::from(&ingredient.uom),
        }
    }
}

impl From<&IngredientCommand> for Ingredient {
    /// The storage side has no recipe-id field; `recipe_id` stays behind.
    fn from(command: &IngredientCommand) -> Self {
        Self {
            id: command.id.clone(),
            description: command.description.clone(),
            amount: command.amount,
            uom: (&command.uom).into(),
        }
    }
}

impl From<&Recipe> for RecipeCommand {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            description: recipe.description.clone(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| {
                    let mut command = IngredientCommand::from(ingredient);
                    command.recipe_id = recipe.id.clone();
                    command
                })
                .collect(),
        }
    }
}
