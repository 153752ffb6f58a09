// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ChatError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    pub fetch: FetchConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Root URL the manifest and pages are served from.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Local checkout of the site; used when no `base_url` is set.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default = "default_contact_page")]
    pub contact_page: String,
    #[serde(default = "default_membership_page")]
    pub membership_page: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub parallel_workers: usize,
    pub timeout_secs: u64,
    pub max_page_size_kb: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    pub rank_limit: usize,
    pub max_bullets: usize,
    pub confidence_threshold: f64,
    pub min_sentence_chars: usize,
    pub snippet_chars: usize,
}

fn default_manifest_path() -> String {
    "assets/content_manifest.json".to_string()
}

fn default_site_name() -> String {
    "Anidaso".to_string()
}

fn default_contact_page() -> String {
    "contact-us.html".to_string()
}

fn default_membership_page() -> String {
    "membership.html".to_string()
}

fn default_user_agent() -> String {
    format!("sitechat/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rank_limit: 3,
            max_bullets: 4,
            confidence_threshold: 0.55,
            min_sentence_chars: 40,
            snippet_chars: 220,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SITECHAT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            site: SiteConfig {
                base_url: None,
                root_dir: Some(PathBuf::from("./site")),
                manifest_path: default_manifest_path(),
                name: default_site_name(),
                contact_page: default_contact_page(),
                membership_page: default_membership_page(),
            },
            fetch: FetchConfig {
                parallel_workers: 4,
                timeout_secs: 10,
                max_page_size_kb: 2048,
                user_agent: default_user_agent(),
            },
            retrieval: RetrievalConfig::default(),
        }
    }

    /// Points the site at `target`, which is either an http(s) URL or a directory.
    pub fn override_site(&mut self, target: &str) {
        if target.starts_with("http://") || target.starts_with("https://") {
            self.site.base_url = Some(target.to_string());
            self.site.root_dir = None;
        } else {
            self.site.base_url = None;
            self.site.root_dir = Some(PathBuf::from(target));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.parallel_workers == 0 {
            return Err(ChatError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.rank_limit == 0 {
            return Err(ChatError::Config(
                "rank_limit must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.max_bullets == 0 {
            return Err(ChatError::Config(
                "max_bullets must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.retrieval.confidence_threshold) {
            return Err(ChatError::Config(
                "confidence_threshold must be between 0 and 1".to_string(),
            ));
        }

        if let Some(base_url) = &self.site.base_url {
            Validator::validate_url(base_url)?;
        }

        if self.site.base_url.is_none() && self.site.root_dir.is_none() {
            return Err(ChatError::Config(
                "either site.base_url or site.root_dir must be set".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.retrieval.rank_limit, 3);
        assert_eq!(config.site.manifest_path, "assets/content_manifest.json");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_config();
        config.fetch.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = Config::default_config();
        config.retrieval.confidence_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_override_site() {
        let mut config = Config::default_config();
        config.override_site("https://example.org/");
        assert_eq!(config.site.base_url.as_deref(), Some("https://example.org/"));
        assert!(config.site.root_dir.is_none());

        config.override_site("./public");
        assert!(config.site.base_url.is_none());
        assert_eq!(config.site.root_dir, Some(PathBuf::from("./public")));
    }

    #[test]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sitechat.toml");
        fs::write(
            &path,
            r#"
[site]
base_url = "https://example.org/"
name = "Example"

[fetch]
parallel_workers = 2
timeout_secs = 5
max_page_size_kb = 512

[retrieval]
rank_limit = 5
max_bullets = 3
confidence_threshold = 0.5
min_sentence_chars = 40
snippet_chars = 200
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.site.name, "Example");
        assert_eq!(config.site.contact_page, "contact-us.html");
        assert_eq!(config.fetch.parallel_workers, 2);
        assert_eq!(config.retrieval.rank_limit, 5);
    }
}
