//! Codec engine contract for the DICOM decode task.
//!
//! Codec engines (JPEG 2000, JPEG-LS, RLE, native/raw, ...) live in their own
//! crates and depend only on this one. The decode task handler in
//! `dicom-decode-task-api` discovers them through an engine catalog and routes
//! frames to them by transfer syntax.
//!
//! # Example
//!
//! ```
//! use dicom_decode_task_api_common::engine::{CodecEngine, EngineInput};
//! use dicom_decode_task_api_common::error::MalformedPixelDataError;
//! use dicom_decode_task_common::SampleBuffer;
//!
//! /// Decodes a made up transfer syntax where every frame is all zeros.
//! struct ZeroEngine;
//!
//! impl CodecEngine for ZeroEngine {
//!     fn name(&self) -> &str {
//!         "zero"
//!     }
//!
//!     fn transfer_syntaxes(&self) -> &[&'static str] {
//!         &["1.2.3.4.5"]
//!     }
//!
//!     fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
//!         Ok(SampleBuffer::zeroed(input.frame.expected_len()?))
//!     }
//! }
//! ```

#![warn(missing_docs)]

/// The engine trait and the input handed to it.
pub mod engine;
/// Errors raised by codec engines.
pub mod error;
/// Option maps passed to engines.
pub mod options;
/// Well known transfer syntax identifiers.
pub mod transfer_syntax;

pub use engine::{CodecEngine, EngineInput};
pub use error::{InitError, MalformedPixelDataError};
pub use options::{CodecOptions, DecodeOptions};
