//! Download and unpacking of the ontology and model bundle.

use std::io::Read;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::info;

use crate::error::AssetError;
use crate::paths::SiftPaths;

/// Release bundle holding `ontology.json` and `model.json`.
pub const DEFAULT_BUNDLE_URL: &str =
    "https://github.com/Toasterson/ontosift/releases/latest/download/ontosift-data.tar.gz";

/// Check that the ontology and model sources are in place.
pub fn ensure_assets(paths: &SiftPaths) -> Result<(), AssetError> {
    for path in [paths.ontology_file(), paths.model_file()] {
        if !path.is_file() {
            return Err(AssetError::Missing {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Download the data bundle and unpack it into the data directory.
///
/// Does nothing when the assets are already present, unless `force` is set.
pub fn setup(paths: &SiftPaths, url: &str, force: bool) -> Result<(), AssetError> {
    if !force && ensure_assets(paths).is_ok() {
        info!("assets already present, nothing to do");
        return Ok(());
    }

    info!(url, "downloading data bundle");
    let bytes = download(url)?;
    info!(bytes = bytes.len(), "unpacking bundle");
    unpack(&bytes, &paths.data_dir)?;
    ensure_assets(paths)
}

fn download(url: &str) -> Result<Vec<u8>, AssetError> {
    let response = ureq::get(url).call().map_err(|e| AssetError::Download {
        url: url.into(),
        message: e.to_string(),
    })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| AssetError::Download {
            url: url.into(),
            message: e.to_string(),
        })?;
    Ok(bytes)
}

/// Unpack a gzipped tar into `dest`, refusing entries that step outside it.
fn unpack(bytes: &[u8], dest: &Path) -> Result<(), AssetError> {
    std::fs::create_dir_all(dest).map_err(|source| AssetError::Io {
        path: dest.display().to_string(),
        source,
    })?;

    let mut archive = Archive::new(GzDecoder::new(bytes));
    let entries = archive.entries().map_err(|e| AssetError::Extract {
        message: e.to_string(),
    })?;
    for entry in entries {
        let mut entry = entry.map_err(|e| AssetError::Extract {
            message: e.to_string(),
        })?;
        let relative = entry
            .path()
            .map_err(|e| AssetError::Extract {
                message: e.to_string(),
            })?
            .into_owned();
        if !is_contained(&relative) {
            return Err(AssetError::UnsafePath {
                entry: relative.display().to_string(),
            });
        }

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AssetError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        entry.unpack(&target).map_err(|source| AssetError::Io {
            path: target.display().to_string(),
            source,
        })?;
    }
    Ok(())
}

fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
