use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use named_colors_shared::neighbors::{NUM_NEIGHBORS, build_neighbor_report};
use named_colors_shared::{Catalog, CatalogError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to serialize catalog payloads: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Built-in catalog unless `path` points at a replacement JSON file.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin()?);
    };
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Catalog::from_json(&raw)?)
}

/// Catalog payloads serialized once at startup and shared by every request.
#[derive(Debug)]
pub struct PreSerialized {
    pub colors_json: Bytes,
    pub colors_etag: String,
    pub tags_json: Bytes,
    /// Keyed by color keyword.
    pub neighbors_json: HashMap<String, Bytes>,
}

impl PreSerialized {
    fn build(catalog: &Catalog) -> Result<Self, serde_json::Error> {
        let colors_json = Bytes::from(serde_json::to_vec(catalog.colors())?);
        let colors_etag = format!("\"colors-{:08x}\"", crc32fast::hash(&colors_json));
        let tags_json = Bytes::from(serde_json::to_vec(&serde_json::json!({
            "level": catalog.level_tags(),
            "descriptive": catalog.descriptive_tags(),
        }))?);

        let mut neighbors_json = HashMap::with_capacity(catalog.len());
        for color in catalog.colors() {
            let report = build_neighbor_report(color, catalog.colors(), NUM_NEIGHBORS);
            neighbors_json.insert(color.keyword.clone(), Bytes::from(serde_json::to_vec(&report)?));
        }

        Ok(Self {
            colors_json,
            colors_etag,
            tags_json,
            neighbors_json,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub payloads: Arc<PreSerialized>,
    /// Root of the client bundle served for non-API paths.
    pub static_dir: Arc<PathBuf>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    color_requests_total: AtomicU64,
    neighbor_requests_total: AtomicU64,
    not_found_total: AtomicU64,
    bad_requests_total: AtomicU64,
    not_modified_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct ObservabilitySnapshot {
    pub color_requests_total: u64,
    pub neighbor_requests_total: u64,
    pub not_found_total: u64,
    pub bad_requests_total: u64,
    pub not_modified_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            color_requests_total: self.color_requests_total.load(Ordering::Relaxed),
            neighbor_requests_total: self.neighbor_requests_total.load(Ordering::Relaxed),
            not_found_total: self.not_found_total.load(Ordering::Relaxed),
            bad_requests_total: self.bad_requests_total.load(Ordering::Relaxed),
            not_modified_total: self.not_modified_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_color_request(&self) {
        self.color_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_neighbor_request(&self) {
        self.neighbor_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bad_request(&self) {
        self.bad_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_modified(&self) {
        self.not_modified_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(catalog: Catalog, static_dir: PathBuf) -> Result<Self, CatalogLoadError> {
        let payloads = PreSerialized::build(&catalog)?;
        tracing::debug!(
            colors = catalog.len(),
            bytes = payloads.colors_json.len(),
            etag = %payloads.colors_etag,
            "catalog payloads prepared"
        );
        Ok(Self {
            catalog: Arc::new(catalog),
            payloads: Arc::new(payloads),
            static_dir: Arc::new(static_dir),
            observability: Arc::new(ObservabilityCounters::default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_builtin_catalog_without_path() {
        let catalog = load_catalog(None).expect("builtin catalog");
        assert_eq!(catalog.len(), 148);
    }

    #[test]
    fn reports_missing_catalog_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/colors.json")))
            .expect_err("missing file should fail");
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }

    #[test]
    fn payloads_cover_every_keyword_with_stable_etag() {
        let state = AppState::new(load_catalog(None).expect("catalog"), PathBuf::from("dist"))
            .expect("state");
        assert_eq!(state.payloads.neighbors_json.len(), state.catalog.len());
        assert!(state.payloads.colors_etag.starts_with("\"colors-"));

        let again = AppState::new(load_catalog(None).expect("catalog"), PathBuf::from("dist"))
            .expect("state");
        assert_eq!(state.payloads.colors_etag, again.payloads.colors_etag);
    }
}
