use contracts::domain::unit_of_measure::command::UnitOfMeasureCommand;

use super::repository;

/// All units of measure, for the ingredient form selectors.
pub async fn list_all() -> anyhow::Result<Vec<UnitOfMeasureCommand>> {
    Ok(repository::list_all()
        .await?
        .iter()
        .map(UnitOfMeasureCommand::from)
        .collect())
}
