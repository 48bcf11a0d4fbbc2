use serde::{Deserialize, Serialize};

/// Reference data: a unit of measure an ingredient amount is expressed in.
///
/// Read-only from the ingredient service's perspective; the set of units is
/// seeded once and never mutated through the boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

impl UnitOfMeasure {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
