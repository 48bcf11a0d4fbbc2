use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use contracts::domain::recipe::command::{IngredientCommand, RecipeCommand};
use contracts::domain::unit_of_measure::command::UnitOfMeasureCommand;
use serde::Serialize;

use crate::domain::ingredient::error::IngredientError;
use crate::domain::{ingredient, recipe, unit_of_measure};

/// Model for the new/update ingredient forms: the command being edited plus
/// the selectable units of measure.
#[derive(Debug, Serialize)]
pub struct IngredientForm {
    pub ingredient: IngredientCommand,
    #[serde(rename = "uomList")]
    pub uom_list: Vec<UnitOfMeasureCommand>,
}

fn status_for(err: &IngredientError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// GET /recipe/:recipe_id/ingredients
pub async fn list(Path(recipe_id): Path<String>) -> Result<Json<RecipeCommand>, StatusCode> {
    tracing::debug!(%recipe_id, "listing ingredients");
    match recipe::service::find_command_by_id(&recipe_id).await {
        Ok(Some(command)) => Ok(Json(command)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /recipe/:recipe_id/ingredient/:id/show
pub async fn show(
    Path((recipe_id, id)): Path<(String, String)>,
) -> Result<Json<IngredientCommand>, StatusCode> {
    match ingredient::service::find_by_recipe_id_and_ingredient_id(&recipe_id, &id).await {
        Ok(command) => Ok(Json(command)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /recipe/:recipe_id/ingredient/new
///
/// A blank command pre-seeded with the recipe id and an empty unit of
/// measure, plus the full unit list for the form selector.
pub async fn new_form(Path(recipe_id): Path<String>) -> Result<Json<IngredientForm>, StatusCode> {
    let recipe_command = match recipe::service::find_command_by_id(&recipe_id).await {
        Ok(Some(command)) => command,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    let uom_list = unit_of_measure::service::list_all()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let ingredient = IngredientCommand {
        recipe_id: recipe_command.id,
        uom: UnitOfMeasureCommand::default(),
        ..Default::default()
    };
    Ok(Json(IngredientForm {
        ingredient,
        uom_list,
    }))
}

/// GET /recipe/:recipe_id/ingredient/:id/update
pub async fn update_form(
    Path((recipe_id, id)): Path<(String, String)>,
) -> Result<Json<IngredientForm>, StatusCode> {
    let ingredient = ingredient::service::find_by_recipe_id_and_ingredient_id(&recipe_id, &id)
        .await
        .map_err(|e| status_for(&e))?;
    let uom_list = unit_of_measure::service::list_all()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(IngredientForm {
        ingredient,
        uom_list,
    }))
}

/// POST /recipe/:recipe_id/ingredient
pub async fn save_or_update(
    Path(recipe_id): Path<String>,
    Json(mut command): Json<IngredientCommand>,
) -> Result<Redirect, StatusCode> {
    // a body without a recipe id inherits the path's
    if command.recipe_id.is_empty() {
        command.recipe_id = recipe_id;
    }

    let saved = ingredient::service::save_ingredient_command(command)
        .await
        .map_err(|e| status_for(&e))?;

    tracing::debug!(ingredient_id = %saved.id, "saved ingredient");
    // redirect to the recipe the ingredient was actually saved into
    Ok(Redirect::to(&format!(
        "/recipe/{}/ingredient/{}/show",
        saved.recipe_id, saved.id
    )))
}

/// GET /recipe/:recipe_id/ingredient/:id/delete
pub async fn delete(
    Path((recipe_id, id)): Path<(String, String)>,
) -> Result<Redirect, StatusCode> {
    tracing::debug!(ingredient_id = %id, "deleting ingredient");
    ingredient::service::delete_by_id(&recipe_id, &id)
        .await
        .map_err(|e| status_for(&e))?;

    Ok(Redirect::to(&format!("/recipe/{}/ingredients", recipe_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use axum::http::header::LOCATION;
    use axum::response::IntoResponse;
    use contracts::domain::recipe::aggregate::Recipe;

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn save_redirect_targets_the_recipe_saved_into() {
        db::initialize_test_database().await.unwrap();
        let path_recipe = recipe::repository::save(Recipe::new("redirect via path"))
            .await
            .unwrap();
        let body_recipe = recipe::repository::save(Recipe::new("redirect via body"))
            .await
            .unwrap();

        // the body names a different recipe than the path; the save goes to
        // the body's recipe, so the redirect must point there too
        let command = IngredientCommand {
            recipe_id: body_recipe.id.clone(),
            description: "Chopped cilantro".into(),
            amount: 2.0,
            ..Default::default()
        };

        let redirect = save_or_update(Path(path_recipe.id.clone()), Json(command))
            .await
            .unwrap();
        let location = location(redirect);
        assert!(
            location.starts_with(&format!("/recipe/{}/ingredient/", body_recipe.id)),
            "redirect was {}",
            location
        );
        assert!(location.ends_with("/show"));

        let persisted = recipe::repository::find_by_id(&body_recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.ingredients.len(), 1);
        let untouched = recipe::repository::find_by_id(&path_recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert!(untouched.ingredients.is_empty());
    }

    #[tokio::test]
    async fn save_body_without_recipe_id_inherits_the_path() {
        db::initialize_test_database().await.unwrap();
        let recipe = recipe::repository::save(Recipe::new("redirect inherits path"))
            .await
            .unwrap();

        let command = IngredientCommand {
            description: "Lime wedges".into(),
            amount: 4.0,
            ..Default::default()
        };

        let redirect = save_or_update(Path(recipe.id.clone()), Json(command))
            .await
            .unwrap();
        assert!(location(redirect).starts_with(&format!("/recipe/{}/ingredient/", recipe.id)));
    }
}
