// file: src/repository/manifest.rs
// description: site content manifest listing the pages to index
// reference: https://docs.rs/serde_json

use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub pages: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestShape {
    List(Vec<String>),
    Object { pages: Vec<String> },
}

impl Manifest {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Accepts either a bare array of paths or an object with a `pages` array.
    /// Blank entries are dropped.
    pub fn parse(json: &str) -> Result<Self> {
        let shape: ManifestShape = serde_json::from_str(json)
            .map_err(|e| ChatError::Manifest(format!("invalid manifest: {}", e)))?;

        let pages = match shape {
            ManifestShape::List(pages) | ManifestShape::Object { pages } => pages,
        };

        Ok(Self {
            pages: pages
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.pages)?)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
