use contracts::domain::recipe::command::RecipeCommand;

use super::repository;

/// Command-object view of a recipe, used by the boundary instead of the raw
/// aggregate.
pub async fn find_command_by_id(id: &str) -> anyhow::Result<Option<RecipeCommand>> {
    Ok(repository::find_by_id(id)
        .await?
        .map(|recipe| RecipeCommand::from(&recipe)))
}
