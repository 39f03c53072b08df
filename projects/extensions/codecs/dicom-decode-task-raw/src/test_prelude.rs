//! Common test imports and utilities for the raw engine's tests.
#![allow(unused_imports)]

use dicom_decode_task_api_common::{
    CodecEngine, DecodeOptions, EngineInput, MalformedPixelDataError,
};
use dicom_decode_task_common::{ImageFrameInfo, SampleBuffer};

pub use dicom_decode_task_common::PixelRepresentation;

// External crates commonly used in tests
pub use rstest::rstest;

/// A single row frame of `columns` single-sample pixels.
pub fn frame(columns: u16, bits_allocated: u16, representation: PixelRepresentation) -> ImageFrameInfo {
    ImageFrameInfo::new(1, columns, bits_allocated, 1, representation)
}

/// Runs `engine` on `compressed` with no decode options.
pub fn decode(
    engine: &dyn CodecEngine,
    transfer_syntax: &str,
    frame: &ImageFrameInfo,
    compressed: Vec<u8>,
) -> Result<SampleBuffer, MalformedPixelDataError> {
    let options = DecodeOptions::new();
    engine.decode(EngineInput {
        transfer_syntax,
        compressed: compressed.into(),
        frame,
        options: &options,
    })
}
