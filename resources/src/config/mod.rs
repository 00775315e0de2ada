use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::ResourceResult;

/// Prefix of environment variables overriding file settings,
/// e.g. `KUBE_OBJECTS_MANIFEST_PATH`.
pub const ENV_PREFIX: &str = "KUBE_OBJECTS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestConfig {
    /// Directory containing the manifests to load.
    /// Defaults to "/etc/kube-objects/manifests".
    pub manifest_path: PathBuf,
    /// Extensions of the files considered manifests,
    /// without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            manifest_path: PathBuf::from("/etc/kube-objects/manifests"),
            extensions: vec!["yaml".to_string(), "yml".to_string(), "json".to_string()],
        }
    }
}

impl ManifestConfig {
    pub fn load(path: &Path) -> ResourceResult<Self> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<ManifestConfig>()?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!("Failed to load config {}: {}, using defaults", path.display(), err);
            ManifestConfig::default()
        })
    }

    pub fn is_manifest(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}
