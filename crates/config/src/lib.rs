#[macro_use]
mod config_macro;
mod configuration;

pub use configuration::{Configuration, RawConfiguration};
