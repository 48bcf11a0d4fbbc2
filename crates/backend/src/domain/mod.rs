pub mod ingredient;
pub mod recipe;
pub mod unit_of_measure;
