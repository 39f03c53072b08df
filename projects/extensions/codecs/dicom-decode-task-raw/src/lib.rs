//! Codec engine for native (uncompressed) DICOM pixel data.
//!
//! Native pixel data is already a flat array of samples, so decoding is at
//! most a byte swap. The engine works in place: the buffer it returns is the
//! allocation it was given, trimmed to the frame length.
//!
//! | Transfer syntax | Byte order |
//! |-----------------|------------|
//! | `1.2.840.10008.1.2` (Implicit VR Little Endian) | little |
//! | `1.2.840.10008.1.2.1` (Explicit VR Little Endian) | little |
//! | `1.2.840.10008.1.2.1.99` (Deflated Explicit VR Little Endian) | little |
//! | `1.2.840.10008.1.2.2` (Explicit VR Big Endian) | big, swapped to little |
//!
//! Deflate applies to the whole dataset and has been undone by the time pixel
//! data reaches a decode task.

#![warn(missing_docs)]

#[cfg(test)]
pub mod test_prelude;

use dicom_decode_task_api_common::transfer_syntax::{
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN, EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN,
    IMPLICIT_VR_LITTLE_ENDIAN,
};
use dicom_decode_task_api_common::{CodecEngine, EngineInput, MalformedPixelDataError};
use dicom_decode_task_common::SampleBuffer;

/// Decoder for the native transfer syntaxes.
///
/// Declares in-place buffer reuse: the returned [`SampleBuffer`] shares its
/// allocation with the compressed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawDecoder;

impl RawDecoder {
    /// Name used in codec bundles.
    pub const NAME: &'static str = "raw";

    const TRANSFER_SYNTAXES: &'static [&'static str] = &[
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
    ];

    /// Creates a new native pixel data decoder.
    pub fn new() -> Self {
        Self
    }
}

impl CodecEngine for RawDecoder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        Self::TRANSFER_SYNTAXES
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        let format = input.frame.sample_format()?;
        let expected = input.frame.expected_len()?;

        if input.compressed.len() < expected {
            return Err(MalformedPixelDataError::InputTooShort {
                required: expected,
                actual: input.compressed.len(),
            });
        }

        // No copy when the input was handed over by value.
        let mut samples = input.compressed.into_owned();

        // Odd length values carry a trailing pad byte, multi-frame objects the next frame.
        if samples.len() > expected {
            log::trace!("Dropping {} bytes past end of frame", samples.len() - expected);
            samples.truncate(expected);
        }

        if input.transfer_syntax == EXPLICIT_VR_BIG_ENDIAN {
            swap_to_little_endian(&mut samples, format.bytes_per_sample());
        }

        Ok(SampleBuffer::from_vec(samples))
    }

    fn reuses_input_buffer(&self) -> bool {
        true
    }
}

/// Reverses the byte order of every `width` byte sample in `bytes`.
fn swap_to_little_endian(bytes: &mut [u8], width: usize) {
    if width < 2 {
        return;
    }

    for sample in bytes.chunks_exact_mut(width) {
        sample.reverse();
    }
}
