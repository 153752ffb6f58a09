// file: src/exporter/json.rs
// description: json snapshots of a built site index for offline querying

use crate::error::{ChatError, Result};
use crate::index::SiteIndex;
use crate::models::{PageEntry, PageRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub exported_at: String,
    pub base_url: String,
    pub total_pages: usize,
    pub pages: Vec<PageRecord>,
}

impl IndexSnapshot {
    pub fn from_index(index: &SiteIndex, base_url: impl Into<String>) -> Self {
        let pages: Vec<PageRecord> = index.pages().iter().map(PageEntry::to_record).collect();
        Self {
            exported_at: Utc::now().to_rfc3339(),
            base_url: base_url.into(),
            total_pages: pages.len(),
            pages,
        }
    }

    /// Rebuilds token counts and document frequencies from the stored page text.
    pub fn into_index(self) -> SiteIndex {
        let entries: Vec<PageEntry> = self
            .pages
            .into_iter()
            .map(|record| {
                let stored_hash = record.content_hash.clone();
                let entry = PageEntry::from_record(record);
                if entry.content_hash != stored_hash {
                    warn!("Content hash mismatch for {}, snapshot may be edited", entry.path);
                }
                entry
            })
            .collect();
        SiteIndex::new(entries)
    }
}

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let output_path = output_path.into();
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { output_path })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, index: &SiteIndex, base_url: &str, pretty: bool) -> Result<IndexSnapshot> {
        info!("Exporting index snapshot to {:?}", self.output_path);

        let snapshot = IndexSnapshot::from_index(index, base_url);
        let json = if pretty {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string(&snapshot)?
        };
        fs::write(&self.output_path, json)?;

        info!("Export complete: {} pages exported", snapshot.total_pages);
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<IndexSnapshot> {
        let content = fs::read_to_string(path)?;
        let snapshot: IndexSnapshot = serde_json::from_str(&content)?;

        if snapshot.total_pages != snapshot.pages.len() {
            return Err(ChatError::Validation(format!(
                "snapshot {} declares {} pages but holds {}",
                path.display(),
                snapshot.total_pages,
                snapshot.pages.len()
            )));
        }

        info!(
            "Loaded snapshot of {} pages exported at {}",
            snapshot.total_pages, snapshot.exported_at
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn index() -> SiteIndex {
        SiteIndex::new(vec![
            PageEntry::new(
                "membership.html".to_string(),
                "https://example.org/membership.html".to_string(),
                "Membership".to_string(),
                "Become a member by completing the registration form.".to_string(),
            ),
            PageEntry::new(
                "contact-us.html".to_string(),
                "https://example.org/contact-us.html".to_string(),
                "Contact Us".to_string(),
                "Email the committee for help.".to_string(),
            ),
        ])
    }

    #[test]
    fn test_export_then_load_restores_rankings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshots/index.json");
        let original = index();

        let exporter = JsonExporter::new(&path).unwrap();
        let written = exporter
            .export(&original, "https://example.org/", true)
            .unwrap();
        assert_eq!(written.total_pages, 2);
        assert!(path.exists());

        let loaded = JsonExporter::load(&path).unwrap();
        assert_eq!(loaded.base_url, "https://example.org/");
        assert_eq!(loaded.pages, written.pages);

        let restored = loaded.into_index();
        assert_eq!(restored.vocabulary_size(), original.vocabulary_size());
        let ranked = restored.rank_pages("registration", 3);
        assert_eq!(ranked[0].entry.path, "membership.html");
    }

    #[test]
    fn test_load_rejects_inconsistent_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"exported_at":"2025-01-01T00:00:00Z","base_url":"","total_pages":3,"pages":[]}"#,
        )
        .unwrap();

        assert!(matches!(
            JsonExporter::load(&path).unwrap_err(),
            ChatError::Validation(_)
        ));
        assert!(JsonExporter::load(&dir.path().join("missing.json")).is_err());
    }
}
