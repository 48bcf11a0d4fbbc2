//! Ingredient operations expressed as operations on the owning recipe
//! aggregate. There is no ingredient-level lookup in the store: every
//! operation loads the whole recipe, scans or mutates its collection in
//! memory and, for mutations, writes the whole recipe back.

use contracts::domain::recipe::aggregate::Ingredient;
use contracts::domain::recipe::command::IngredientCommand;
use contracts::domain::unit_of_measure::aggregate::UnitOfMeasure;

use super::error::IngredientError;
use crate::domain::{recipe, unit_of_measure};

/// Look up one ingredient inside its recipe. Read-only: one aggregate read,
/// one O(n) scan, first match wins.
pub async fn find_by_recipe_id_and_ingredient_id(
    recipe_id: &str,
    ingredient_id: &str,
) -> Result<IngredientCommand, IngredientError> {
    let recipe = recipe::repository::find_by_id(recipe_id)
        .await?
        .ok_or_else(|| IngredientError::RecipeNotFound(recipe_id.to_string()))?;

    let ingredient = recipe.ingredient_by_id(ingredient_id).ok_or_else(|| {
        IngredientError::IngredientNotFound {
            recipe_id: recipe_id.to_string(),
            ingredient_id: ingredient_id.to_string(),
        }
    })?;

    // the converter does not know the owning recipe; set it here
    let mut command = IngredientCommand::from(ingredient);
    command.recipe_id = recipe.id.clone();
    Ok(command)
}

/// Save-or-update an ingredient within its recipe.
///
/// A command with an id matching an existing ingredient overwrites that
/// ingredient's fields in place; anything else is appended as a new
/// ingredient and gets its id from the store on save. After the save the
/// *persisted* aggregate is re-scanned for the saved ingredient: by id
/// first, then by description + amount + unit-of-measure id for the insert
/// path, where no id was known beforehand. That fallback matches by value:
/// if two ingredients in one recipe share description, amount and unit, the
/// wrong one may be picked.
///
/// The correlation miss maps to [`IngredientError::SaveCorrelation`]. The
/// bundled sqlite repository re-reads exactly what was written, so with it
/// the re-scan always succeeds; the error arm guards against a store that
/// rewrites ids or drops entries when echoing a saved aggregate back.
pub async fn save_ingredient_command(
    command: IngredientCommand,
) -> Result<IngredientCommand, IngredientError> {
    let Some(mut recipe) = recipe::repository::find_by_id(&command.recipe_id).await? else {
        tracing::error!(recipe_id = %command.recipe_id, "recipe not found, ingredient not saved");
        return Err(IngredientError::RecipeNotFound(command.recipe_id));
    };

    match recipe
        .ingredients
        .iter()
        .position(|i| i.id == command.id)
    {
        Some(index) => {
            // resolve the unit from reference data; forms only post its id.
            // An unknown id falls back to the command's value-copy.
            let uom = match unit_of_measure::repository::find_by_id(&command.uom.id).await? {
                Some(found) => found,
                None => UnitOfMeasure::from(&command.uom),
            };
            let existing = &mut recipe.ingredients[index];
            existing.description = command.description.clone();
            existing.amount = command.amount;
            existing.uom = uom;
        }
        None => {
            recipe.add_ingredient(Ingredient::from(&command));
        }
    }

    let saved = recipe::repository::save(recipe).await?;

    let saved_ingredient = saved.ingredient_by_id(&command.id).or_else(|| {
        saved.ingredients.iter().find(|i| {
            i.description == command.description
                && i.amount == command.amount
                && i.uom.id == command.uom.id
        })
    });

    let Some(saved_ingredient) = saved_ingredient else {
        tracing::error!(recipe_id = %saved.id, "saved ingredient not found in persisted recipe");
        return Err(IngredientError::SaveCorrelation(saved.id));
    };

    let mut result = IngredientCommand::from(saved_ingredient);
    result.recipe_id = saved.id.clone();
    Ok(result)
}

/// Remove an ingredient from its recipe and persist the recipe. A missing
/// ingredient id is a no-op (the recipe is still re-saved); a missing recipe
/// is an error and no write happens.
pub async fn delete_by_id(recipe_id: &str, ingredient_id: &str) -> Result<(), IngredientError> {
    let Some(mut recipe) = recipe::repository::find_by_id(recipe_id).await? else {
        tracing::error!(recipe_id, "recipe not found, ingredient not deleted");
        return Err(IngredientError::RecipeNotFound(recipe_id.to_string()));
    };

    if recipe.remove_ingredient(ingredient_id) {
        tracing::debug!(recipe_id, ingredient_id, "removed ingredient");
    }
    recipe::repository::save(recipe).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use contracts::domain::recipe::aggregate::Recipe;
    use contracts::domain::unit_of_measure::command::UnitOfMeasureCommand;

    async fn seed_recipe(description: &str, ingredients: Vec<Ingredient>) -> Recipe {
        db::initialize_test_database().await.unwrap();
        let mut recipe = Recipe::new(description);
        for ingredient in ingredients {
            recipe.add_ingredient(ingredient);
        }
        recipe::repository::save(recipe).await.unwrap()
    }

    fn ingredient_with_id(id: &str) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn find_returns_each_ingredient_by_its_id() {
        let recipe = seed_recipe(
            "find each",
            vec![
                Ingredient::new("Avocado", 2.0, UnitOfMeasure::new("u-each", "Each")),
                Ingredient::new("Salt", 0.5, UnitOfMeasure::new("u-tsp", "Teaspoon")),
            ],
        )
        .await;

        for ingredient in &recipe.ingredients {
            let found = find_by_recipe_id_and_ingredient_id(&recipe.id, &ingredient.id)
                .await
                .unwrap();
            assert_eq!(found.id, ingredient.id);
            assert_eq!(found.description, ingredient.description);
            assert_eq!(found.recipe_id, recipe.id);
        }
    }

    #[tokio::test]
    async fn find_with_duplicate_ids_is_deterministic() {
        // duplicate ids should not occur, but the scan must still return
        // the requested id, not an arbitrary entry
        let recipe = seed_recipe(
            "duplicates",
            vec![
                ingredient_with_id("1"),
                ingredient_with_id("1"),
                ingredient_with_id("3"),
            ],
        )
        .await;

        let found = find_by_recipe_id_and_ingredient_id(&recipe.id, "3")
            .await
            .unwrap();
        assert_eq!(found.id, "3");
    }

    #[tokio::test]
    async fn find_misses_map_to_not_found_kinds() {
        let recipe = seed_recipe("misses", vec![ingredient_with_id("1")]).await;

        let err = find_by_recipe_id_and_ingredient_id("unknown-recipe", "1")
            .await
            .unwrap_err();
        assert!(matches!(err, IngredientError::RecipeNotFound(_)));

        let err = find_by_recipe_id_and_ingredient_id(&recipe.id, "unknown-ingredient")
            .await
            .unwrap_err();
        assert!(matches!(err, IngredientError::IngredientNotFound { .. }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn save_with_empty_id_appends_new_ingredient() {
        let recipe = seed_recipe("append", vec![ingredient_with_id("1")]).await;

        let command = IngredientCommand {
            recipe_id: recipe.id.clone(),
            description: "Freshly grated lime zest".into(),
            amount: 2.0,
            uom: UnitOfMeasureCommand {
                id: "u-tbsp".into(),
                description: "Tablespoon".into(),
            },
            ..Default::default()
        };

        let saved = save_ingredient_command(command).await.unwrap();
        assert!(!saved.id.is_empty(), "store assigns the id on insert");
        assert_eq!(saved.description, "Freshly grated lime zest");
        assert_eq!(saved.amount, 2.0);
        assert_eq!(saved.uom.id, "u-tbsp");
        assert_eq!(saved.recipe_id, recipe.id);

        let persisted = recipe::repository::find_by_id(&recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.ingredients.len(), 2);
    }

    #[tokio::test]
    async fn save_with_existing_id_overwrites_in_place() {
        db::initialize_test_database().await.unwrap();
        crate::domain::unit_of_measure::repository::insert(&UnitOfMeasure::new(
            "u-pinch", "Pinch",
        ))
        .await
        .unwrap();

        let recipe = seed_recipe(
            "overwrite",
            vec![
                Ingredient::new("Salt", 0.5, UnitOfMeasure::new("u-tsp", "Teaspoon")),
                Ingredient::new("Cumin", 1.0, UnitOfMeasure::new("u-tsp", "Teaspoon")),
            ],
        )
        .await;
        let target_id = recipe.ingredients[0].id.clone();
        let untouched_id = recipe.ingredients[1].id.clone();

        let command = IngredientCommand {
            id: target_id.clone(),
            recipe_id: recipe.id.clone(),
            description: "Sea salt".into(),
            amount: 1.5,
            // only the id is posted; description resolves from reference data
            uom: UnitOfMeasureCommand {
                id: "u-pinch".into(),
                description: String::new(),
            },
            ..Default::default()
        };

        let saved = save_ingredient_command(command).await.unwrap();
        assert_eq!(saved.id, target_id, "identity preserved on update");
        assert_eq!(saved.uom.description, "Pinch");

        let persisted = recipe::repository::find_by_id(&recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.ingredients.len(), 2, "no append on update");
        let updated = persisted.ingredient_by_id(&target_id).unwrap();
        assert_eq!(updated.description, "Sea salt");
        assert_eq!(updated.amount, 1.5);
        let untouched = persisted.ingredient_by_id(&untouched_id).unwrap();
        assert_eq!(untouched.description, "Cumin");
    }

    #[tokio::test]
    async fn save_with_preassigned_id_correlates_by_id() {
        // the command carries id "3" which the recipe does not contain yet;
        // the converted ingredient keeps that id and the post-save scan must
        // find it by id, not by the field-equality fallback
        let recipe = seed_recipe("preassigned", vec![]).await;

        let command = IngredientCommand {
            id: "3".into(),
            recipe_id: recipe.id.clone(),
            uom: UnitOfMeasureCommand {
                id: "some id".into(),
                description: String::new(),
            },
            ..Default::default()
        };

        let saved = save_ingredient_command(command).await.unwrap();
        assert_eq!(saved.id, "3");
    }

    #[tokio::test]
    async fn save_against_unknown_recipe_is_recipe_not_found() {
        db::initialize_test_database().await.unwrap();

        let command = IngredientCommand {
            recipe_id: "unknown-recipe".into(),
            description: "Lime".into(),
            ..Default::default()
        };
        let err = save_ingredient_command(command).await.unwrap_err();
        assert!(matches!(err, IngredientError::RecipeNotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_ingredient_and_persists_empty_collection() {
        let recipe = seed_recipe("delete one", vec![ingredient_with_id("3")]).await;

        delete_by_id(&recipe.id, "3").await.unwrap();

        let persisted = recipe::repository::find_by_id(&recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert!(persisted.ingredients.is_empty());
        assert!(persisted.ingredient_by_id("3").is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_tolerates_unknown_ids() {
        let recipe = seed_recipe(
            "delete twice",
            vec![ingredient_with_id("3"), ingredient_with_id("4")],
        )
        .await;

        delete_by_id(&recipe.id, "3").await.unwrap();
        // second delete of the same id is a no-op, not an error
        delete_by_id(&recipe.id, "3").await.unwrap();

        let persisted = recipe::repository::find_by_id(&recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.ingredients.len(), 1);
        assert_eq!(persisted.ingredients[0].id, "4");
    }

    #[tokio::test]
    async fn delete_against_unknown_recipe_writes_nothing() {
        db::initialize_test_database().await.unwrap();

        let err = delete_by_id("unknown-recipe", "3").await.unwrap_err();
        assert!(matches!(err, IngredientError::RecipeNotFound(_)));
    }
}
