use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    config::ManifestConfig,
    error::{ResourceError, ResourceResult},
    objects::{Object, ObjectResource},
};

impl ObjectResource {
    /// Decode a single YAML (or JSON) document.
    pub fn from_slice(bytes: &[u8]) -> ResourceResult<Self> {
        decode(bytes).map_err(|source| ResourceError::Parse {
            file: None,
            source,
        })
    }

    /// Decode the document stored at `path`,
    /// remembering its raw content and where it came from.
    pub fn from_file(path: &Path) -> ResourceResult<Self> {
        let template = fs::read(path).map_err(|source| ResourceError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut object = decode(&template).map_err(|source| ResourceError::Parse {
            file: Some(path.to_owned()),
            source,
        })?;
        object.template = template;
        object.file_name = path.to_string_lossy().into_owned();
        tracing::debug!("Loaded {} from {}", object.key(), object.file_name);
        Ok(object)
    }

    pub fn to_yaml(&self) -> ResourceResult<String> {
        serde_yaml::to_string(self).map_err(ResourceError::Encode)
    }
}

/// Only the first document of a stream is decoded.
/// A stream without documents, or a null document, is the zero object.
fn decode(bytes: &[u8]) -> Result<ObjectResource, serde_yaml::Error> {
    match serde_yaml::Deserializer::from_slice(bytes).next() {
        Some(document) => {
            let object = Option::<ObjectResource>::deserialize(document)?;
            Ok(object.unwrap_or_default())
        },
        None => Ok(ObjectResource::default()),
    }
}

/// Load every manifest found in the configured directory,
/// in lexical order of file names.
pub fn load_dir(config: &ManifestConfig) -> ResourceResult<Vec<ObjectResource>> {
    let paths = manifest_files(config)?;
    let mut keys = HashSet::new();
    let mut objects = Vec::with_capacity(paths.len());
    for path in paths {
        let object = ObjectResource::from_file(&path)?;
        if object.resource_kind().is_none() {
            tracing::warn!(
                "Unrecognized kind {:?} in {}",
                object.kind,
                object.file_name
            );
        }
        if !keys.insert(object.key()) {
            tracing::warn!("Duplicate object {} in {}", object.key(), object.file_name);
        }
        objects.push(object);
    }
    tracing::info!(
        "Loaded {} objects from {}",
        objects.len(),
        config.manifest_path.display()
    );
    Ok(objects)
}

/// Manifest files `load_dir` would read, without decoding them.
pub fn manifest_files(config: &ManifestConfig) -> ResourceResult<Vec<PathBuf>> {
    let dir = &config.manifest_path;
    let mut paths = fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|source| ResourceError::Io {
            path: dir.to_owned(),
            source,
        })?;
    paths.retain(|path| {
        let keep = path.is_file() && config.is_manifest(path);
        if !keep {
            tracing::debug!("Skipping {}", path.display());
        }
        keep
    });
    paths.sort();
    Ok(paths)
}
