use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("invalid dimension {width}x{height}: sides must be finite and positive")]
    InvalidDimension { width: f32, height: f32 },

    #[error("failed to decode image '{name}': {source}")]
    DecodeFailure {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no file selected")]
    NoFileSelected,

    #[error("picture loader thread is not running")]
    WorkerUnavailable,
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// Short message for the overlay status line
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::InvalidDimension { width, height } => {
                format!("Image has an unusable size ({}x{})", width, height)
            }
            ViewerError::DecodeFailure { name, .. } => {
                format!("Could not decode '{}'", name)
            }
            ViewerError::Io { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            ViewerError::Config { path, .. } => {
                format!("Bad config file {}", path.display())
            }
            ViewerError::NoFileSelected => "No file selected".to_string(),
            ViewerError::WorkerUnavailable => {
                "Picture loader stopped; restart to load images".to_string()
            }
        }
    }
}
