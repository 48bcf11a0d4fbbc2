use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::unit_of_measure::aggregate::UnitOfMeasure;

// ============================================================================
// Aggregate Root
// ============================================================================

/// A recipe and the ingredient collection it owns, persisted as one unit.
///
/// Ingredients have no existence outside their recipe: every mutation loads
/// the whole aggregate, edits the collection in memory and writes the whole
/// aggregate back. Membership is by ingredient id; ordering is irrelevant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    /// Empty until the store assigns an id on first save.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            description: description.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    /// Linear scan by id, first match wins. The store never produces
    /// duplicate ids within one recipe, so first-match is deterministic.
    pub fn ingredient_by_id(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn ingredient_by_id_mut(&mut self, id: &str) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.id == id)
    }

    /// Removes every ingredient with the given id. Returns whether anything
    /// was removed; a miss is a no-op, not an error.
    pub fn remove_ingredient(&mut self, id: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.id != id);
        self.ingredients.len() != before
    }

    /// Assigns store ids to the aggregate and to any ingredient that does
    /// not have one yet. Called by the repository on save.
    pub fn assign_missing_ids(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        for ingredient in &mut self.ingredients {
            if ingredient.id.is_empty() {
                ingredient.id = Uuid::new_v4().to_string();
            }
        }
    }
}

// ============================================================================
// Owned entity
// ============================================================================

/// An ingredient line inside a recipe. Carries a value-copy of its unit of
/// measure rather than a live reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Empty until the owning recipe is saved; unique within the recipe
    /// afterwards. Id equality is the sole identity criterion.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub uom: UnitOfMeasure,
}

impl Ingredient {
    pub fn new(description: impl Into<String>, amount: f64, uom: UnitOfMeasure) -> Self {
        Self {
            id: String::new(),
            description: description.into(),
            amount,
            uom,
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}
