pub mod aggregate;
pub mod command;
