//! Loading the embedding model from JSON, with a binary fast path.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{EmbeddingModel, ModelData};
use crate::error::ModelError;
use crate::store::{cache_is_fresh, read_cache, write_cache};

/// Identifies a model cache file.
pub const CACHE_MAGIC: &[u8; 8] = b"OSIFMODL";

fn load_json(path: &Path) -> Result<ModelData, ModelError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|err| ModelError::Parse {
        message: err.to_string(),
    })
}

impl EmbeddingModel {
    /// Load the model, preferring a fresh binary cache over the JSON source.
    ///
    /// A stale or unreadable cache falls back to the JSON source and is
    /// rewritten from it.
    pub fn load(source: &Path, cache: Option<&Path>) -> Result<Self, ModelError> {
        let started = Instant::now();

        if let Some(cache_path) = cache {
            if cache_is_fresh(cache_path, source) {
                match read_cache::<ModelData>(cache_path, CACHE_MAGIC) {
                    Ok(data) => {
                        let model = Self::from_data(data);
                        info!(
                            keys = model.len(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "loaded embedding model from cache"
                        );
                        return Ok(model);
                    }
                    Err(err) => {
                        warn!(cache = %cache_path.display(), error = %err, "model cache unreadable, falling back to source");
                    }
                }
            }
        }

        let data = load_json(source)?;
        if let Some(cache_path) = cache {
            match write_cache(cache_path, CACHE_MAGIC, &data) {
                Ok(()) => debug!(cache = %cache_path.display(), "model cache written"),
                Err(err) => {
                    warn!(cache = %cache_path.display(), error = %err, "could not write model cache")
                }
            }
        }

        let model = Self::from_data(data);
        info!(
            keys = model.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded embedding model"
        );
        Ok(model)
    }
}
