//! Binary cache files for the loaded stores.
//!
//! A cache file is an 8-byte magic, a little-endian u32 format version, four
//! reserved bytes, then a bincode payload. Reads go through `memmap2` so a
//! large ontology or model deserializes straight out of the page cache.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const CACHE_VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;

/// Cache I/O failures. Callers fold these into their subsystem errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Format(String),
}

/// Read a bincode payload from a cache file, validating magic and version.
pub fn read_cache<T: DeserializeOwned>(path: &Path, magic: &[u8; 8]) -> Result<T, CacheError> {
    let file = File::open(path)?;
    // Safety: cache files are replaced atomically by full rewrites, never
    // mutated while mapped.
    let mmap = unsafe { Mmap::map(&file) }.map_err(CacheError::Io)?;

    if mmap.len() < HEADER_SIZE {
        return Err(CacheError::Format("cache file truncated".into()));
    }
    if &mmap[..8] != magic {
        return Err(CacheError::Format(
            "invalid cache header, not an ontosift cache file".into(),
        ));
    }
    let version = u32::from_le_bytes(mmap[8..12].try_into().expect("4 bytes for version"));
    if version != CACHE_VERSION {
        return Err(CacheError::Format(format!(
            "cache version {version} != expected {CACHE_VERSION}"
        )));
    }

    bincode::deserialize(&mmap[HEADER_SIZE..]).map_err(|e| CacheError::Format(e.to_string()))
}

/// Write a value as a cache file, header included.
pub fn write_cache<T: Serialize>(path: &Path, magic: &[u8; 8], value: &T) -> Result<(), CacheError> {
    let payload = bincode::serialize(value).map_err(|e| CacheError::Format(e.to_string()))?;
    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(magic);
    bytes.extend_from_slice(&CACHE_VERSION.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 4]);
    bytes.extend_from_slice(&payload);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// A cache is fresh when it is at least as new as its JSON source. With no
/// source present, an existing cache stands alone.
pub fn cache_is_fresh(cache: &Path, source: &Path) -> bool {
    let Ok(cache_meta) = std::fs::metadata(cache) else {
        return false;
    };
    let Ok(source_meta) = std::fs::metadata(source) else {
        return true;
    };
    match (cache_meta.modified(), source_meta.modified()) {
        (Ok(cache_time), Ok(source_time)) => cache_time >= source_time,
        _ => false,
    }
}
