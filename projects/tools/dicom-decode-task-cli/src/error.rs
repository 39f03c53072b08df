use dicom_decode_task_api::{ConfigurationError, TaskError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Invalid task file {}: {source}", .path.display())]
    TaskFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read pixel data {}: {source}", .path.display())]
    PixelData {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write task summary {}: {source}", .path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: {source}", .path.display())]
    Task {
        path: PathBuf,
        #[source]
        source: TaskError,
    },
}
