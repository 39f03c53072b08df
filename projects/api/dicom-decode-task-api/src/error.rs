//! Error types for the decode task.
//!
//! Every fatal error ends the task it occurred in; nothing in this crate
//! retries. Strict mode validation never produces an error, see
//! [`crate::validate::ValidationWarning`].

use crate::task::TaskState;
use dicom_decode_task_api_common::{InitError, MalformedPixelDataError};
use dicom_decode_task_common::FrameError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for codec loading operations
pub type CodecLoadResult<T> = Result<T, CodecLoadError>;

/// Result type for decode dispatch operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors in the worker's configuration. Fatal at initialization.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// `codecsPath` is empty.
    #[error("Task configuration has no codecs path")]
    MissingCodecsPath,

    /// The configuration payload could not be parsed.
    #[error("Invalid task configuration payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("Failed to read task configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The worker was already initialized; its configuration is immutable.
    #[error("Worker is already initialized")]
    AlreadyInitialized,

    /// A task arrived before the worker was initialized.
    #[error("Worker has not been initialized")]
    NotInitialized,
}

/// Errors loading, linking or initializing the codec bundle.
///
/// Fatal for the task that triggered the load. The registry is left as it was
/// before the failing step.
#[derive(Debug, Error)]
pub enum CodecLoadError {
    /// The configuration does not allow loading.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The bundle manifest could not be read.
    #[error("Failed to fetch codec bundle {}: {source}", .path.display())]
    Fetch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bundle manifest is not valid.
    #[error("Invalid codec bundle manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The bundle lists no codecs.
    #[error("Codec bundle {} lists no codecs", .path.display())]
    EmptyBundle { path: PathBuf },

    /// The bundle names a codec this worker has no engine for.
    #[error("Codec bundle names unknown codec engine '{name}'")]
    Link { name: String },

    /// Two engines in the bundle claim the same transfer syntax.
    #[error("Transfer syntax {syntax} is claimed by both '{first}' and '{second}'")]
    DuplicateTransferSyntax {
        syntax: String,
        first: String,
        second: String,
    },

    /// An engine failed to initialize.
    #[error("Failed to initialize codec engine '{name}': {source}")]
    Initialize {
        name: String,
        #[source]
        source: InitError,
    },
}

/// No engine is registered for the requested transfer syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported transfer syntax: {transfer_syntax}")]
pub struct UnsupportedTransferSyntaxError {
    pub transfer_syntax: String,
}

/// Errors routing a frame to its engine or accepting the engine's output.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No engine is registered for the transfer syntax.
    #[error(transparent)]
    UnsupportedTransferSyntax(#[from] UnsupportedTransferSyntaxError),

    /// The engine rejected the pixel data.
    #[error("Malformed pixel data: {0}")]
    MalformedPixelData(#[from] MalformedPixelDataError),

    /// The frame descriptor does not describe a decodable frame.
    #[error("Invalid frame descriptor: {0}")]
    InvalidFrame(#[from] FrameError),

    /// The engine could not be initialized on first use.
    #[error(transparent)]
    CodecLoad(#[from] CodecLoadError),

    /// The engine returned a buffer of the wrong size.
    #[error("Codec engine '{engine}' produced {actual} bytes, frame requires {expected} bytes")]
    SampleLengthMismatch {
        engine: String,
        expected: usize,
        actual: usize,
    },
}

/// The error a failed task ends with.
#[derive(Debug, Error)]
pub enum TaskErrorKind {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    CodecLoad(#[from] CodecLoadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A task that reached [`TaskState::Error`].
///
/// Carries the state the task was in when it failed, and the originating error.
#[derive(Debug, Error)]
#[error("Decode task failed in state '{stage}': {kind}")]
pub struct TaskError {
    stage: TaskState,
    #[source]
    kind: TaskErrorKind,
}

impl TaskError {
    pub(crate) fn new(stage: TaskState, kind: TaskErrorKind) -> Self {
        Self { stage, kind }
    }

    /// State the task was in when it failed.
    #[inline]
    pub fn stage(&self) -> TaskState {
        self.stage
    }

    #[inline]
    pub fn kind(&self) -> &TaskErrorKind {
        &self.kind
    }

    #[inline]
    pub fn into_kind(self) -> TaskErrorKind {
        self.kind
    }

    /// Whether the task failed because no engine handles its transfer syntax.
    pub fn is_unsupported_transfer_syntax(&self) -> bool {
        matches!(
            self.kind,
            TaskErrorKind::Decode(DecodeError::UnsupportedTransferSyntax(_))
        )
    }
}
