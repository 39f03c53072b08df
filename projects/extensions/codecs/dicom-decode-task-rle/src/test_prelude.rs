//! Common test imports and utilities for the RLE engine's tests.
#![allow(unused_imports)]

use crate::rle::constants::{MAX_SEGMENTS, RLE_HEADER_SIZE, SEGMENT_COUNT_OFFSET, SEGMENT_OFFSETS_OFFSET};
use dicom_decode_task_api_common::transfer_syntax::RLE_LOSSLESS;
use dicom_decode_task_api_common::{
    CodecEngine, DecodeOptions, EngineInput, MalformedPixelDataError,
};
use dicom_decode_task_common::{ImageFrameInfo, PixelRepresentation, SampleBuffer};
use endian_writer::{EndianWriter, LittleEndianWriter};

// External crates commonly used in tests
pub use rstest::rstest;

/// An unsigned frame descriptor.
pub fn frame(rows: u16, columns: u16, bits_allocated: u16, samples_per_pixel: u16) -> ImageFrameInfo {
    ImageFrameInfo::new(
        rows,
        columns,
        bits_allocated,
        samples_per_pixel,
        PixelRepresentation::Unsigned,
    )
}

/// Writes an RLE header with `count` segments at `offsets` into `data`.
pub fn write_header(data: &mut [u8], count: u32, offsets: &[u32]) {
    assert!(data.len() >= RLE_HEADER_SIZE);
    assert!(offsets.len() <= MAX_SEGMENTS);

    let mut writer = unsafe { LittleEndianWriter::new(data.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(count, SEGMENT_COUNT_OFFSET as isize);
        for (index, &offset) in offsets.iter().enumerate() {
            writer.write_u32_at(offset, (SEGMENT_OFFSETS_OFFSET + index * 4) as isize);
        }
    }
}

/// Builds an RLE frame from already PackBits encoded segments.
pub fn encode_frame(segments: &[&[u8]]) -> Vec<u8> {
    let mut offsets = Vec::with_capacity(segments.len());
    let mut data = vec![0u8; RLE_HEADER_SIZE];
    for segment in segments {
        offsets.push(data.len() as u32);
        data.extend_from_slice(segment);
    }

    write_header(&mut data, segments.len() as u32, &offsets);
    data
}

/// Runs `engine` on an RLE frame with no decode options.
pub fn decode(
    engine: &dyn CodecEngine,
    frame: &ImageFrameInfo,
    compressed: Vec<u8>,
) -> Result<SampleBuffer, MalformedPixelDataError> {
    let options = DecodeOptions::new();
    engine.decode(EngineInput {
        transfer_syntax: RLE_LOSSLESS,
        compressed: compressed.into(),
        frame,
        options: &options,
    })
}
