//! Startup seeding: reference data and a couple of sample recipes so a
//! fresh database is immediately browsable.

use contracts::domain::recipe::aggregate::{Ingredient, Recipe};
use contracts::domain::unit_of_measure::aggregate::UnitOfMeasure;
use uuid::Uuid;

use crate::domain::{recipe, unit_of_measure};

const UNIT_DESCRIPTIONS: [&str; 8] = [
    "Teaspoon",
    "Tablespoon",
    "Cup",
    "Pinch",
    "Ounce",
    "Each",
    "Dash",
    "Pint",
];

/// Seed the unit-of-measure table when it is empty.
pub async fn seed_units_of_measure() -> anyhow::Result<()> {
    if !unit_of_measure::repository::list_all().await?.is_empty() {
        return Ok(());
    }

    tracing::info!("Seeding units of measure");
    for description in UNIT_DESCRIPTIONS {
        let uom = UnitOfMeasure::new(Uuid::new_v4().to_string(), description);
        unit_of_measure::repository::insert(&uom).await?;
    }
    Ok(())
}

/// Seed two sample recipes when no recipes exist yet.
pub async fn seed_sample_recipes() -> anyhow::Result<()> {
    if recipe::repository::count().await? > 0 {
        return Ok(());
    }

    tracing::info!("Seeding sample recipes");
    let units = unit_of_measure::repository::list_all().await?;
    let unit = |description: &str| -> UnitOfMeasure {
        units
            .iter()
            .find(|u| u.description == description)
            .cloned()
            .unwrap_or_default()
    };

    let mut guacamole = Recipe::new("Perfect Guacamole");
    guacamole.add_ingredient(Ingredient::new("Ripe avocados", 2.0, unit("Each")));
    guacamole.add_ingredient(Ingredient::new("Kosher salt", 0.5, unit("Teaspoon")));
    guacamole.add_ingredient(Ingredient::new(
        "Fresh lime or lemon juice",
        1.0,
        unit("Tablespoon"),
    ));
    guacamole.add_ingredient(Ingredient::new(
        "Minced red onion or thinly sliced green onion",
        2.0,
        unit("Tablespoon"),
    ));
    recipe::repository::save(guacamole).await?;

    let mut tacos = Recipe::new("Spicy Grilled Chicken Tacos");
    tacos.add_ingredient(Ingredient::new("Ancho chili powder", 2.0, unit("Tablespoon")));
    tacos.add_ingredient(Ingredient::new("Dried oregano", 1.0, unit("Teaspoon")));
    tacos.add_ingredient(Ingredient::new("Dried cumin", 1.0, unit("Teaspoon")));
    tacos.add_ingredient(Ingredient::new("Sugar", 1.0, unit("Teaspoon")));
    tacos.add_ingredient(Ingredient::new("Clove of garlic, chopped", 1.0, unit("Each")));
    recipe::repository::save(tacos).await?;

    Ok(())
}
