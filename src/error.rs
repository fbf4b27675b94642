use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown style profile `{0}` (expected standard, academic or official)")]
    UnknownProfile(String),

    #[error("Unsupported output format for {0} (expected .pdf, .svg or .typ)")]
    UnsupportedOutput(PathBuf),

    #[error("No such {0} in document")]
    InvalidHandle(String),

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("{format} generation failed: {message}")]
    Export {
        format: &'static str,
        message: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
