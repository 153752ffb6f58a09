// file: src/repository/scanner.rs
// description: directory walking that discovers html pages and writes the content manifest
// reference: https://docs.rs/walkdir

use crate::error::Result;
use crate::repository::manifest::Manifest;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

pub const DEFAULT_SKIP_PATTERNS: &[&str] = &["assets/", "node_modules/", ".git/", "*.bak"];

pub struct ManifestGenerator {
    skip_patterns: Vec<String>,
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_PATTERNS.iter().map(|p| p.to_string()).collect())
    }
}

impl ManifestGenerator {
    pub fn new(skip_patterns: Vec<String>) -> Self {
        Self { skip_patterns }
    }

    /// Every `.html`/`.htm` file under `root`, as sorted `/`-separated relative paths.
    pub fn scan_directory(&self, root: &Path) -> Result<Manifest> {
        info!("Scanning site directory: {}", root.display());
        let mut pages = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_html = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
            if !is_html {
                continue;
            }

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if self.should_skip(&relative_path) {
                debug!("Skipping page: {}", relative_path);
                continue;
            }

            pages.push(relative_path);
        }

        pages.sort();
        info!("Found {} html pages", pages.len());
        Ok(Manifest::new(pages))
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        for pattern in &self.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if relative_path.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if relative_path.starts_with(pattern.as_str())
                || relative_path.contains(&format!("/{}", pattern))
            {
                return true;
            }
        }

        false
    }

    /// Scans `root` and writes the manifest to `output`, creating parent directories.
    pub fn write_manifest(&self, root: &Path, output: &Path) -> Result<Manifest> {
        let manifest = self.scan_directory(root)?;

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, manifest.to_json()?)?;

        info!(
            "Wrote manifest with {} pages to {}",
            manifest.len(),
            output.display()
        );
        Ok(manifest)
    }
}
