//! Descriptive metadata of a single pixel frame.

use crate::sample::SampleFormat;
use alloc::string::String;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Photometric interpretation assumed when a descriptor is built in code.
pub const DEFAULT_PHOTOMETRIC_INTERPRETATION: &str = "MONOCHROME2";

/// Errors raised when a frame descriptor cannot describe a decodable frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Rows, columns or samples per pixel is zero.
    #[error("Frame has no samples: {rows} rows x {columns} columns x {samples_per_pixel} samples per pixel")]
    EmptyFrame {
        rows: u16,
        columns: u16,
        samples_per_pixel: u16,
    },

    /// Bits allocated is not a whole byte width we can expose as typed samples.
    #[error("Unsupported bits allocated: {0}. Supported widths are 8, 16 and 32")]
    UnsupportedBitsAllocated(u16),

    /// The frame's sample count overflows the address space.
    #[error("Frame dimensions overflow the addressable buffer size")]
    SizeOverflow,

    /// A sample buffer does not match the length implied by the descriptor.
    #[error("Sample buffer length mismatch: expected {expected} bytes, got {actual} bytes")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Signedness of stored samples (DICOM `PixelRepresentation`, tag 0028,0103).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum PixelRepresentation {
    /// `0`: unsigned integer samples.
    #[default]
    Unsigned,
    /// `1`: two's complement signed integer samples.
    Signed,
}

impl PixelRepresentation {
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, PixelRepresentation::Signed)
    }
}

impl TryFrom<u16> for PixelRepresentation {
    type Error = InvalidEnumValue;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PixelRepresentation::Unsigned),
            1 => Ok(PixelRepresentation::Signed),
            other => Err(InvalidEnumValue {
                field: "pixelRepresentation",
                value: other,
            }),
        }
    }
}

impl From<PixelRepresentation> for u16 {
    fn from(value: PixelRepresentation) -> Self {
        match value {
            PixelRepresentation::Unsigned => 0,
            PixelRepresentation::Signed => 1,
        }
    }
}

/// Layout of multi-sample pixels (DICOM `PlanarConfiguration`, tag 0028,0006).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum PlanarConfiguration {
    /// `0`: samples of a pixel are adjacent (R1 G1 B1 R2 G2 B2 ...).
    #[default]
    Interleaved,
    /// `1`: each sample forms its own plane (R1 R2 ... G1 G2 ... B1 B2 ...).
    Planar,
}

impl TryFrom<u16> for PlanarConfiguration {
    type Error = InvalidEnumValue;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlanarConfiguration::Interleaved),
            1 => Ok(PlanarConfiguration::Planar),
            other => Err(InvalidEnumValue {
                field: "planarConfiguration",
                value: other,
            }),
        }
    }
}

impl From<PlanarConfiguration> for u16 {
    fn from(value: PlanarConfiguration) -> Self {
        match value {
            PlanarConfiguration::Interleaved => 0,
            PlanarConfiguration::Planar => 1,
        }
    }
}

/// An out of range value for one of the enumerated descriptor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid value {value} for {field}")]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub value: u16,
}

/// Descriptive metadata of a pixel frame.
///
/// This is the `imageFrame` shape exchanged with the host: it travels in with
/// the compressed pixel data and back out with the decoded samples. Decoding
/// never changes the dimensions or sample format; only the intensity range
/// fields are rewritten, and only by the min/max validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFrameInfo {
    pub rows: u16,
    pub columns: u16,
    pub bits_allocated: u16,
    pub samples_per_pixel: u16,
    #[serde(default = "default_photometric_interpretation")]
    pub photometric_interpretation: String,
    #[serde(default)]
    pub pixel_representation: PixelRepresentation,
    #[serde(default)]
    pub planar_configuration: PlanarConfiguration,
    /// Declared smallest sample value, if the dataset carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smallest_pixel_value: Option<i64>,
    /// Declared largest sample value, if the dataset carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub largest_pixel_value: Option<i64>,
}

fn default_photometric_interpretation() -> String {
    String::from(DEFAULT_PHOTOMETRIC_INTERPRETATION)
}

impl ImageFrameInfo {
    /// Creates a descriptor with no declared intensity range.
    pub fn new(
        rows: u16,
        columns: u16,
        bits_allocated: u16,
        samples_per_pixel: u16,
        pixel_representation: PixelRepresentation,
    ) -> Self {
        Self {
            rows,
            columns,
            bits_allocated,
            samples_per_pixel,
            photometric_interpretation: default_photometric_interpretation(),
            pixel_representation,
            planar_configuration: PlanarConfiguration::Interleaved,
            smallest_pixel_value: None,
            largest_pixel_value: None,
        }
    }

    /// Sets the declared intensity range.
    pub fn with_declared_range(mut self, smallest: i64, largest: i64) -> Self {
        self.smallest_pixel_value = Some(smallest);
        self.largest_pixel_value = Some(largest);
        self
    }

    /// Sets the photometric interpretation.
    pub fn with_photometric_interpretation(mut self, value: impl Into<String>) -> Self {
        self.photometric_interpretation = value.into();
        self
    }

    /// Sets the planar configuration.
    pub fn with_planar_configuration(mut self, value: PlanarConfiguration) -> Self {
        self.planar_configuration = value;
        self
    }

    /// The typed sample format implied by `bits_allocated` and `pixel_representation`.
    pub fn sample_format(&self) -> Result<SampleFormat, FrameError> {
        SampleFormat::from_descriptor(self.bits_allocated, self.pixel_representation)
    }

    /// Number of pixels in the frame.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Number of samples in the frame (`rows * columns * samples_per_pixel`).
    pub fn sample_count(&self) -> Result<usize, FrameError> {
        self.pixel_count()
            .checked_mul(self.samples_per_pixel as usize)
            .ok_or(FrameError::SizeOverflow)
    }

    /// Length in bytes a decoded sample buffer for this frame must have.
    pub fn expected_len(&self) -> Result<usize, FrameError> {
        let format = self.sample_format()?;
        self.sample_count()?
            .checked_mul(format.bytes_per_sample())
            .ok_or(FrameError::SizeOverflow)
    }

    /// Checks the descriptor describes a non-empty frame with a supported
    /// sample format.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.rows == 0 || self.columns == 0 || self.samples_per_pixel == 0 {
            return Err(FrameError::EmptyFrame {
                rows: self.rows,
                columns: self.columns,
                samples_per_pixel: self.samples_per_pixel,
            });
        }

        self.expected_len().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(8, PixelRepresentation::Unsigned, 512 * 512)]
    #[case(16, PixelRepresentation::Unsigned, 512 * 512 * 2)]
    #[case(16, PixelRepresentation::Signed, 512 * 512 * 2)]
    #[case(32, PixelRepresentation::Signed, 512 * 512 * 4)]
    fn expected_len_follows_bits_allocated(
        #[case] bits_allocated: u16,
        #[case] representation: PixelRepresentation,
        #[case] expected: usize,
    ) {
        let frame = ImageFrameInfo::new(512, 512, bits_allocated, 1, representation);
        assert_eq!(frame.expected_len().unwrap(), expected);
    }

    #[test]
    fn expected_len_accounts_for_samples_per_pixel() {
        let frame = ImageFrameInfo::new(2, 3, 8, 3, PixelRepresentation::Unsigned);
        assert_eq!(frame.expected_len().unwrap(), 18);
    }

    #[rstest]
    #[case(1)]
    #[case(12)]
    #[case(24)]
    #[case(64)]
    fn unsupported_bits_allocated_is_rejected(#[case] bits_allocated: u16) {
        let frame = ImageFrameInfo::new(4, 4, bits_allocated, 1, PixelRepresentation::Unsigned);
        assert_eq!(
            frame.validate(),
            Err(FrameError::UnsupportedBitsAllocated(bits_allocated))
        );
    }

    #[rstest]
    #[case(0, 4, 1)]
    #[case(4, 0, 1)]
    #[case(4, 4, 0)]
    fn empty_frames_are_rejected(#[case] rows: u16, #[case] columns: u16, #[case] spp: u16) {
        let frame = ImageFrameInfo::new(rows, columns, 8, spp, PixelRepresentation::Unsigned);
        assert!(matches!(
            frame.validate(),
            Err(FrameError::EmptyFrame { .. })
        ));
    }

    #[test]
    fn deserializes_host_payload() {
        let json = r#"{
            "rows": 2,
            "columns": 2,
            "bitsAllocated": 16,
            "samplesPerPixel": 1,
            "photometricInterpretation": "MONOCHROME1",
            "pixelRepresentation": 1,
            "smallestPixelValue": -5,
            "largestPixelValue": 100
        }"#;

        let frame: ImageFrameInfo = serde_json::from_str(json).unwrap();
        assert_eq!(frame.pixel_representation, PixelRepresentation::Signed);
        assert_eq!(frame.photometric_interpretation, "MONOCHROME1");
        assert_eq!(frame.planar_configuration, PlanarConfiguration::Interleaved);
        assert_eq!(frame.smallest_pixel_value, Some(-5));
        assert_eq!(frame.largest_pixel_value, Some(100));
    }

    #[test]
    fn rejects_unknown_pixel_representation() {
        let json = r#"{"rows":1,"columns":1,"bitsAllocated":8,"samplesPerPixel":1,"pixelRepresentation":2}"#;
        assert!(serde_json::from_str::<ImageFrameInfo>(json).is_err());
    }

    #[test]
    fn absent_range_is_not_serialized() {
        let frame = ImageFrameInfo::new(1, 1, 8, 1, PixelRepresentation::Unsigned);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(!json.contains("smallestPixelValue"));
        assert!(json.contains("\"pixelRepresentation\":0"));
    }
}
