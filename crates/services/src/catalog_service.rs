use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use reqwest::Client;
use storage::repository::CatalogRepository;
use study_core::Catalog;
use thiserror::Error;

use crate::error::CatalogError;

/// Where the catalog shown to learners comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// The catalog compiled into the app.
    #[default]
    Bundled,
    /// The bundled level skeleton with stored subjects overlaid by level tag.
    Store,
    /// A levels document fetched over HTTP.
    Remote(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown catalog source `{0}` (expected bundled, store or an http(s) URL)")]
pub struct UnknownCatalogSource(pub String);

impl FromStr for CatalogSource {
    type Err = UnknownCatalogSource;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        match value {
            "bundled" => Ok(Self::Bundled),
            "store" => Ok(Self::Store),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Self::Remote(url.to_owned()))
            }
            _ => Err(UnknownCatalogSource(raw.to_owned())),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled"),
            Self::Store => f.write_str("store"),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Loads the catalog from the configured source.
#[derive(Clone)]
pub struct CatalogService {
    source: CatalogSource,
    subjects: Arc<dyn CatalogRepository>,
    client: Client,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: CatalogSource, subjects: Arc<dyn CatalogRepository>) -> Self {
        Self {
            source,
            subjects,
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Load a fresh catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if stored subjects cannot be read,
    /// `CatalogError::Validation` for an invalid document, and
    /// `CatalogError::Http`/`HttpStatus` when a remote fetch fails.
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let catalog = match &self.source {
            CatalogSource::Bundled => Catalog::bundled()?,
            CatalogSource::Store => self.load_from_store().await?,
            CatalogSource::Remote(url) => self.fetch(url).await?,
        };
        tracing::info!(
            source = %self.source,
            levels = catalog.levels().len(),
            lectures = catalog.all_lectures().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    async fn load_from_store(&self) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::bundled()?;
        let stored = self.subjects.list_subjects().await?;
        let unplaced = catalog.merge_subjects(stored);
        for id in &unplaced {
            tracing::warn!(subject = %id, "stored subject has no matching level tag");
        }
        Ok(catalog)
    }

    async fn fetch(&self, url: &str) -> Result<Catalog, CatalogError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus(response.status()));
        }
        let body = response.text().await?;
        Ok(Catalog::from_json(&body)?)
    }
}
