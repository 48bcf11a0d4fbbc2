use serde::{Deserialize, Serialize};

use super::aggregate::UnitOfMeasure;

/// Boundary-facing copy of [`UnitOfMeasure`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitOfMeasureCommand {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

impl From<&UnitOfMeasure> for UnitOfMeasureCommand {
    fn from(uom: &UnitOfMeasure) -> Self {
        Self {
            id: uom.id.clone(),
            description: uom.description.clone(),
        }
    }
}

impl From<&UnitOfMeasureCommand> for UnitOfMeasure {
    fn from(command: &UnitOfMeasureCommand) -> Self {
        Self {
            id: command.id.clone(),
            description: command.description.clone(),
        }
    }
}
