// file: src/exporter/mod.rs
// description: index snapshot export module exports
// reference: internal module structure

pub mod json;

pub use json::{IndexSnapshot, JsonExporter};
