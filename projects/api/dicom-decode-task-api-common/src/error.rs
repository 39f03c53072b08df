use dicom_decode_task_common::FrameError;
use thiserror::Error;

/// Errors raised while preparing a codec engine for use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The engine's entry in `codecOptions` could not be understood.
    #[error("Invalid codec options: {reason}")]
    InvalidOptions {
        /// Why the options were rejected.
        reason: String,
    },

    /// The engine cannot run in this process (missing backend, unsupported CPU, ...).
    #[error("Codec engine unavailable: {reason}")]
    Unavailable {
        /// Why the engine is unavailable.
        reason: String,
    },
}

/// The engine rejected its input as invalid pixel data.
///
/// Surfaced to the task caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPixelDataError {
    /// Not enough input to decode the frame.
    #[error("Pixel data too short: required at least {required} bytes, got {actual} bytes")]
    InputTooShort {
        /// Bytes needed.
        required: usize,
        /// Bytes provided.
        actual: usize,
    },

    /// An encoding specific header is invalid.
    #[error("Invalid pixel data header: {0}")]
    InvalidHeader(&'static str),

    /// An encoded segment decodes past the space reserved for it.
    #[error("Segment {segment} overruns its output plane")]
    SegmentOverrun {
        /// Zero based index of the offending segment.
        segment: usize,
    },

    /// An encoded segment ends before its output plane is filled.
    #[error("Segment {segment} ends before filling its output plane")]
    SegmentTruncated {
        /// Zero based index of the offending segment.
        segment: usize,
    },

    /// The frame descriptor describes something this engine cannot produce.
    #[error("Unsupported frame: {0}")]
    UnsupportedFrame(#[from] FrameError),

    /// Any other decoder specific failure.
    #[error("{0}")]
    Other(String),
}
