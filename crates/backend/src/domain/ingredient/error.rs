use thiserror::Error;

/// Failure kinds of the ingredient service. None of these is fatal to the
/// process; handlers translate them into status codes.
#[derive(Debug, Error)]
pub enum IngredientError {
    #[error("recipe {0} not found")]
    RecipeNotFound(String),

    #[error("ingredient {ingredient_id} not found in recipe {recipe_id}")]
    IngredientNotFound {
        recipe_id: String,
        ingredient_id: String,
    },

    /// The ingredient could not be located in the persisted aggregate after
    /// a save. Distinct from a plain not-found so the miss is visible to
    /// callers instead of silently yielding nothing.
    #[error("saved ingredient could not be correlated in recipe {0}")]
    SaveCorrelation(String),

    #[error("store unavailable: {0}")]
    Store(#[from] anyhow::Error),
}

impl IngredientError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IngredientError::RecipeNotFound(_) | IngredientError::IngredientNotFound { .. }
        )
    }
}
