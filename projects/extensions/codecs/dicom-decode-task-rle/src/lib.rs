//! Codec engine for DICOM RLE Lossless (`1.2.840.10008.1.2.5`).
//!
//! Decodes the PackBits segments of a frame and reassembles their byte
//! planes into little-endian samples in a freshly allocated buffer.
//!
//! # Options
//!
//! The engine's `codecOptions` entry accepts:
//!
//! ```json
//! { "strictSegmentCount": true }
//! ```
//!
//! With `strictSegmentCount` a frame must have exactly one segment per byte
//! plane. Otherwise (the default) surplus segments are ignored.

#![warn(missing_docs)]

pub mod rle;

#[cfg(test)]
pub mod test_prelude;

use dicom_decode_task_api_common::transfer_syntax::RLE_LOSSLESS;
use dicom_decode_task_api_common::{
    CodecEngine, CodecOptions, EngineInput, InitError, MalformedPixelDataError,
};
use dicom_decode_task_common::{FrameError, SampleBuffer};
use rle::header::RleHeader;
use rle::packbits::decode_segment;
use rle::planes::PlaneLayout;
use serde::Deserialize;
use std::sync::OnceLock;

/// Settings taken from the engine's `codecOptions` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RleOptions {
    /// Reject frames with more segments than byte planes.
    pub strict_segment_count: bool,
}

impl RleOptions {
    /// Reads the options from a `codecOptions` entry; `null` means defaults.
    pub fn from_codec_options(options: &CodecOptions) -> Result<Self, InitError> {
        if options.is_null() {
            return Ok(Self::default());
        }

        serde_json::from_value(options.clone()).map_err(|e| InitError::InvalidOptions {
            reason: e.to_string(),
        })
    }
}

/// Decoder for RLE Lossless.
#[derive(Debug, Default)]
pub struct RleDecoder {
    options: OnceLock<RleOptions>,
}

impl RleDecoder {
    /// Name used in codec bundles.
    pub const NAME: &'static str = "rle";

    /// Creates a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with the given options, skipping initialization.
    pub fn with_options(options: RleOptions) -> Self {
        Self {
            options: OnceLock::from(options),
        }
    }

    fn options(&self) -> RleOptions {
        self.options.get().copied().unwrap_or_default()
    }

    /// Decodes one RLE frame described by `layout`.
    ///
    /// # Errors
    ///
    /// - [`MalformedPixelDataError::UnsupportedFrame`] if the frame size overflows `usize`.
    /// - [`MalformedPixelDataError::InvalidHeader`] if the segment table does not fit `layout`.
    /// - Any segment decoding error.
    pub fn decode_frame(
        &self,
        data: &[u8],
        layout: &PlaneLayout,
    ) -> Result<SampleBuffer, MalformedPixelDataError> {
        let frame_len = layout.frame_len().ok_or(FrameError::SizeOverflow)?;
        let header = RleHeader::parse(data)?;
        let planes = layout.plane_count();

        if header.segment_count() < planes {
            return Err(MalformedPixelDataError::InvalidHeader(
                "fewer segments than byte planes",
            ));
        }
        if header.segment_count() > planes {
            if self.options().strict_segment_count {
                return Err(MalformedPixelDataError::InvalidHeader(
                    "more segments than byte planes",
                ));
            }
            log::debug!(
                "Ignoring {} surplus RLE segments",
                header.segment_count() - planes
            );
        }

        let mut out = SampleBuffer::zeroed(frame_len);
        if layout.is_single_plane() {
            decode_segment(&data[header.segment_range(0, data.len())], out.as_bytes_mut(), 0)?;
            return Ok(out);
        }

        let mut plane = vec![0u8; layout.pixels];
        for segment in 0..planes {
            decode_segment(&data[header.segment_range(segment, data.len())], &mut plane, segment)?;
            layout.scatter(segment, &plane, out.as_bytes_mut());
        }

        Ok(out)
    }
}

impl CodecEngine for RleDecoder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        &[RLE_LOSSLESS]
    }

    fn initialize(&self, options: &CodecOptions) -> Result<(), InitError> {
        let options = RleOptions::from_codec_options(options)?;
        // Already set means options were given up front; those win.
        let _ = self.options.set(options);
        Ok(())
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        let format = input.frame.sample_format()?;
        input.frame.validate()?;

        let layout = PlaneLayout {
            pixels: input.frame.pixel_count(),
            samples_per_pixel: input.frame.samples_per_pixel as usize,
            bytes_per_sample: format.bytes_per_sample(),
            planar_configuration: input.frame.planar_configuration,
        };
        self.decode_frame(&input.compressed, &layout)
    }
}
