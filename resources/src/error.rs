use std::path::PathBuf;

pub type ResourceResult<T = (), E = ResourceError> = Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The document does not have the shape of an object resource,
    /// typically a field holding the wrong primitive type.
    #[error("Invalid resource document{}: {source}", display_file(.file))]
    Parse {
        file: Option<PathBuf>,
        source: serde_yaml::Error,
    },
    #[error("Failed to encode resource: {0}")]
    Encode(#[source] serde_yaml::Error),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

fn display_file(file: &Option<PathBuf>) -> String {
    match file {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}
