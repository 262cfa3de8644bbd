//! Ontology loading: JSON source with a transparent binary cache.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::OntologyError;
use crate::store::{cache_is_fresh, read_cache, write_cache};

use super::{Ontology, OntologyData};

const CACHE_MAGIC: &[u8; 8] = b"OSIFONTO";

/// Parse the JSON source format.
pub fn load_json(path: &Path) -> Result<OntologyData, OntologyError> {
    let content = std::fs::read_to_string(path).map_err(|e| OntologyError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| OntologyError::Parse {
        message: e.to_string(),
    })
}

impl Ontology {
    /// Load from the JSON source, preferring `cache` when it is fresh.
    ///
    /// A stale, missing, or unreadable cache silently falls back to the JSON
    /// source and is rewritten afterwards; only the source itself failing is
    /// an error.
    pub fn load(source: &Path, cache: Option<&Path>) -> Result<Self, OntologyError> {
        let started = Instant::now();

        if let Some(cache_path) = cache {
            if cache_is_fresh(cache_path, source) {
                match read_cache::<OntologyData>(cache_path, CACHE_MAGIC) {
                    Ok(data) => {
                        let ontology = Self::from_data(data)?;
                        info!(
                            topics = ontology.len(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "loaded ontology from cache"
                        );
                        return Ok(ontology);
                    }
                    Err(e) => {
                        warn!(error = %e, "ontology cache unreadable, rebuilding from JSON");
                    }
                }
            }
        }

        let data = load_json(source)?;
        if let Some(cache_path) = cache {
            match write_cache(cache_path, CACHE_MAGIC, &data) {
                Ok(()) => debug!(path = %cache_path.display(), "wrote ontology cache"),
                Err(e) => warn!(error = %e, "could not write ontology cache"),
            }
        }

        let ontology = Self::from_data(data)?;
        info!(
            topics = ontology.len(),
            edges = ontology.stats().broader_edges,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded ontology"
        );
        Ok(ontology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"{
        "topics": ["neural networks", "machine learning"],
        "primary_labels": {},
        "broaders": {"neural networks": ["machine learning"]}
    }"#;

    #[test]
    fn loads_from_json_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ontology.json");
        std::fs::write(&path, SOURCE).unwrap();

        let ontology = Ontology::load(&path, None).unwrap();
        assert_eq!(ontology.len(), 2);
        assert_eq!(ontology.broaders_of("neural networks"), ["machine learning"]);
    }

    #[test]
    fn writes_then_prefers_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ontology.json");
        let cache = dir.path().join("ontology.bin");
        std::fs::write(&source, SOURCE).unwrap();

        let first = Ontology::load(&source, Some(&cache)).unwrap();
        assert!(cache.exists());

        // Source removed: a fresh load must come from the cache alone.
        std::fs::remove_file(&source).unwrap();
        let second = Ontology::load(&source, Some(&cache)).unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn corrupt_cache_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ontology.json");
        let cache = dir.path().join("ontology.bin");
        std::fs::write(&source, SOURCE).unwrap();
        std::fs::write(&cache, b"garbage that is long enough to pass nothing").unwrap();

        let ontology = Ontology::load(&source, Some(&cache)).unwrap();
        assert_eq!(ontology.len(), 2);
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Ontology::load(&dir.path().join("absent.json"), None);
        assert!(matches!(result, Err(OntologyError::Io { .. })));
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ontology.json");
        std::fs::write(&path, "not json").unwrap();

        let result = Ontology::load(&path, None);
        assert!(matches!(result, Err(OntologyError::Parse { .. })));
    }
}
