// file: src/repository/mod.rs
// description: site manifest, page sources and manifest generation
// reference: Internal module structure

pub mod manifest;
pub mod scanner;
pub mod source;

pub use manifest::Manifest;
pub use scanner::ManifestGenerator;
pub use source::{LinkResolver, SiteSource};
