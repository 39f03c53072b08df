//! Worker-side decode task for compressed DICOM pixel frames.
//!
//! A [`DecodeWorker`] receives its [`TaskConfig`] once, then runs decode tasks:
//!
//! 1. [`CodecLoader::ensure_loaded`] loads the codec bundle on first use (once per worker).
//! 2. [`DecodeDispatcher::decode`] routes the compressed frame to the engine
//!    registered for its transfer syntax.
//! 3. [`MinMaxValidator::apply`] computes the intensity extrema and either
//!    overwrites or checks the declared range.
//! 4. [`ResultPackager::package`] moves the decoded samples into the [`TaskResult`].
//!
//! Codec engines implement [`dicom_decode_task_api_common::CodecEngine`] in
//! their own crates and are made available to a worker through an [`EngineCatalog`].
//!
//! # Example
//!
//! ```
//! use dicom_decode_task_api::{DecodeRequest, DecodeWorker, EngineCatalog, Handoff, TaskConfig};
//! use dicom_decode_task_common::{ImageFrameInfo, PixelRepresentation};
//! use dicom_decode_task_raw::RawDecoder;
//!
//! let dir = tempfile::tempdir()?;
//! let bundle = dir.path().join("bundle.json");
//! std::fs::write(&bundle, r#"{ "codecs": ["raw"] }"#)?;
//!
//! let catalog = EngineCatalog::new().with_engine(RawDecoder::NAME, RawDecoder::new);
//! let worker = DecodeWorker::new(catalog);
//! worker.initialize(TaskConfig::new(&bundle))?;
//!
//! // 2x2 unsigned 16-bit samples, declared range is wrong.
//! let frame = ImageFrameInfo::new(2, 2, 16, 1, PixelRepresentation::Unsigned)
//!     .with_declared_range(0, 10);
//! let pixel_data = vec![0x00, 0x00, 0x10, 0x00, 0x00, 0x01, 0xFF, 0x0F];
//! let result = worker.handle(DecodeRequest::new(frame, "1.2.840.10008.1.2.1", pixel_data))?;
//!
//! assert_eq!(result.handoff(), Handoff::Moved);
//! assert_eq!(result.image_frame.smallest_pixel_value, Some(0));
//! assert_eq!(result.image_frame.largest_pixel_value, Some(4095));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod package;
pub mod registry;
pub mod task;
pub mod validate;

// Re-export key APIs
pub use catalog::EngineCatalog;
pub use config::TaskConfig;
pub use dispatch::DecodeDispatcher;
pub use error::*;
pub use loader::{CodecBundle, CodecLoader};
pub use package::{Handoff, ResultPackager, TaskResult, TransferredBuffer};
pub use registry::{CodecRegistry, CodecState, EngineSlot};
pub use task::{DecodeRequest, DecodeWorker, TaskOutcome, TaskState};
pub use validate::{Diagnostic, MinMaxPolicy, MinMaxValidator, PixelValueField, ValidationWarning};

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_prelude;
