//! XDG-compliant path resolution for ontosift.
//!
//! Provides `SiftPaths`: the global config/data/cache directories and the
//! fixed locations of the ontology and embedding-model files within them,
//! following the XDG Base Directory Specification.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(ontosift::paths::no_home),
        help("Set the HOME environment variable or ensure a valid user profile exists.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(ontosift::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Global XDG-compliant directories for ontosift.
#[derive(Debug, Clone)]
pub struct SiftPaths {
    /// `$XDG_CONFIG_HOME/ontosift/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/ontosift/`
    pub data_dir: PathBuf,
    /// `$XDG_CACHE_HOME/ontosift/`
    pub cache_dir: PathBuf,
}

impl SiftPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("ontosift");

        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/share"))
            .join("ontosift");

        let cache_dir = std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".cache"))
            .join("ontosift");

        Ok(Self {
            config_dir,
            data_dir,
            cache_dir,
        })
    }

    /// Create all base directories. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [&self.config_dir, &self.data_dir, &self.cache_dir] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("ontosift.toml")
    }

    /// Path to the ontology JSON source.
    pub fn ontology_file(&self) -> PathBuf {
        self.data_dir.join("ontology.json")
    }

    /// Path to the embedding model JSON source.
    pub fn model_file(&self) -> PathBuf {
        self.data_dir.join("model.json")
    }

    /// Path to the binary ontology cache.
    pub fn ontology_cache(&self) -> PathBuf {
        self.cache_dir.join("ontology.bin")
    }

    /// Path to the binary embedding model cache.
    pub fn model_cache(&self) -> PathBuf {
        self.cache_dir.join("model.bin")
    }
}
