//! A decoded frame: descriptor plus owned samples.

use crate::frame::{FrameError, ImageFrameInfo};
use crate::min_max::MinMax;
use crate::sample::{SampleBuffer, SampleFormat, SampleView};

/// A decoded pixel frame.
///
/// Holds the invariant that the sample buffer is exactly as long as the
/// descriptor implies (`rows * columns * samples_per_pixel * bytes per sample`).
/// The invariant is checked on construction, and afterwards only the intensity
/// range fields of the descriptor can change.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageFrame {
    info: ImageFrameInfo,
    pixel_data: SampleBuffer,
    format: SampleFormat,
}

impl ImageFrame {
    /// Pairs a descriptor with its decoded samples.
    ///
    /// Fails if the descriptor is invalid or the buffer length does not match it.
    pub fn new(info: ImageFrameInfo, pixel_data: SampleBuffer) -> Result<Self, FrameError> {
        info.validate()?;
        let format = info.sample_format()?;
        let expected = info.expected_len()?;
        if pixel_data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: pixel_data.len(),
            });
        }

        Ok(Self {
            info,
            pixel_data,
            format,
        })
    }

    #[inline]
    pub fn info(&self) -> &ImageFrameInfo {
        &self.info
    }

    #[inline]
    pub fn pixel_data(&self) -> &SampleBuffer {
        &self.pixel_data
    }

    /// Typed view of the samples.
    #[inline]
    pub fn samples(&self) -> SampleView<'_> {
        // Length and format were validated in `new` and are immutable since.
        SampleView::from_validated(self.pixel_data.as_bytes(), self.format)
    }

    #[inline]
    pub fn sample_format(&self) -> SampleFormat {
        self.format
    }

    /// Overwrites the declared intensity range.
    #[inline]
    pub fn set_pixel_range(&mut self, range: MinMax) {
        self.info.smallest_pixel_value = Some(range.min);
        self.info.largest_pixel_value = Some(range.max);
    }

    /// Splits the frame into its descriptor and samples.
    #[inline]
    pub fn into_parts(self) -> (ImageFrameInfo, SampleBuffer) {
        (self.info, self.pixel_data)
    }
}
