// file: src/repository/source.rs
// description: page sources over http or a local site directory, and page link resolution
// reference: https://docs.rs/reqwest

use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::repository::manifest::Manifest;
use crate::utils::Validator;
use reqwest::{Client, Url};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Turns manifest paths into absolute page links.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    base: Option<Url>,
}

impl LinkResolver {
    pub fn new(base: Option<Url>) -> Self {
        Self { base }
    }

    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)
            .map_err(|e| ChatError::Validation(format!("invalid base url {}: {}", base_url, e)))?;
        Ok(Self::new(Some(url)))
    }

    pub fn from_directory(root: &Path) -> Result<Self> {
        let canonical = root.canonicalize()?;
        let url = Url::from_directory_path(&canonical).map_err(|_| {
            ChatError::Validation(format!(
                "cannot build a file url for {}",
                canonical.display()
            ))
        })?;
        Ok(Self::new(Some(url)))
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Joins `path` (minus one leading `/`) onto the base. Without a base, or when
    /// the join fails, the path comes back unchanged.
    pub fn resolve(&self, path: &str) -> String {
        let Some(base) = &self.base else {
            return path.to_string();
        };
        let clean = path.strip_prefix('/').unwrap_or(path);
        base.join(clean)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| path.to_string())
    }
}

#[derive(Debug, Clone)]
pub enum SiteSource {
    Http {
        client: Client,
        resolver: LinkResolver,
        manifest_path: String,
        max_bytes: usize,
    },
    Directory {
        root: PathBuf,
        resolver: LinkResolver,
        manifest_path: String,
        max_bytes: usize,
    },
}

impl SiteSource {
    /// A configured `base_url` wins over `root_dir`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let manifest_path = config.site.manifest_path.clone();
        let max_bytes = config.fetch.max_page_size_kb.saturating_mul(1024);

        if let Some(base_url) = &config.site.base_url {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.fetch.timeout_secs))
                .user_agent(config.fetch.user_agent.clone())
                .build()
                .map_err(|e| ChatError::Config(format!("failed to build http client: {}", e)))?;

            return Ok(Self::Http {
                client,
                resolver: LinkResolver::from_base_url(base_url)?,
                manifest_path,
                max_bytes,
            });
        }

        if let Some(root) = &config.site.root_dir {
            Validator::validate_directory(root)?;
            return Ok(Self::Directory {
                root: root.clone(),
                resolver: LinkResolver::from_directory(root)?,
                manifest_path,
                max_bytes,
            });
        }

        Err(ChatError::Config(
            "either site.base_url or site.root_dir must be set".to_string(),
        ))
    }

    pub fn resolver(&self) -> &LinkResolver {
        match self {
            Self::Http { resolver, .. } | Self::Directory { resolver, .. } => resolver,
        }
    }

    /// Where pages come from, for log lines and snapshots.
    pub fn location(&self) -> String {
        match self {
            Self::Http { resolver, .. } => resolver
                .base()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            Self::Directory { root, .. } => root.display().to_string(),
        }
    }

    pub async fn fetch_manifest(&self) -> Result<Manifest> {
        let manifest_path = match self {
            Self::Http { manifest_path, .. } | Self::Directory { manifest_path, .. } => {
                manifest_path
            }
        };

        let body = self
            .fetch_page(manifest_path)
            .await
            .map_err(|e| ChatError::Manifest(e.to_string()))?;
        let manifest = Manifest::parse(&body)?;

        debug!("Manifest lists {} pages", manifest.len());
        Ok(manifest)
    }

    pub async fn fetch_page(&self, path: &str) -> Result<String> {
        match self {
            Self::Http {
                client,
                resolver,
                max_bytes,
                ..
            } => fetch_http(client, &resolver.resolve(path), *max_bytes).await,
            Self::Directory {
                root, max_bytes, ..
            } => read_local(root, path, *max_bytes).await,
        }
    }
}

async fn fetch_http(client: &Client, url: &str, max_bytes: usize) -> Result<String> {
    debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ChatError::fetch(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChatError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(length) = response.content_length()
        && length as usize > max_bytes
    {
        return Err(ChatError::fetch(
            url,
            format!("response of {} bytes exceeds limit of {}", length, max_bytes),
        ));
    }

    let bytes = response.bytes().await.map_err(|e| ChatError::fetch(url, e))?;
    if bytes.len() > max_bytes {
        return Err(ChatError::fetch(
            url,
            format!("response of {} bytes exceeds limit of {}", bytes.len(), max_bytes),
        ));
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn read_local(root: &Path, path: &str, max_bytes: usize) -> Result<String> {
    let relative = Path::new(path.strip_prefix('/').unwrap_or(path));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(ChatError::Validation(format!(
            "page path escapes the site root: {}",
            path
        )));
    }

    let full = root.join(relative);
    let display = full.display().to_string();

    let metadata = tokio::fs::metadata(&full)
        .await
        .map_err(|e| ChatError::fetch(&display, e))?;
    if metadata.len() as usize > max_bytes {
        return Err(ChatError::fetch(
            &display,
            format!("file of {} bytes exceeds limit of {}", metadata.len(), max_bytes),
        ));
    }

    let bytes = tokio::fs::read(&full)
        .await
        .map_err(|e| ChatError::fetch(&display, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
