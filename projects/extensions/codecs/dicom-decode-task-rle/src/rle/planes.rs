//! Reassembly of decoded byte planes into samples.

use dicom_decode_task_common::PlanarConfiguration;

/// Where the byte planes of a frame go in the little-endian output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Pixels in the frame (`rows * columns`).
    pub pixels: usize,
    /// Samples per pixel.
    pub samples_per_pixel: usize,
    /// Bytes per sample.
    pub bytes_per_sample: usize,
    /// Order of samples in the output.
    pub planar_configuration: PlanarConfiguration,
}

impl PlaneLayout {
    /// Number of byte planes, which is the number of segments a frame needs.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.samples_per_pixel * self.bytes_per_sample
    }

    /// Size in bytes of the decoded frame, or [`None`] if it overflows `usize`.
    #[inline]
    pub fn frame_len(&self) -> Option<usize> {
        self.samples_per_pixel
            .checked_mul(self.bytes_per_sample)?
            .checked_mul(self.pixels)
    }

    /// Whether plane 0 can be decoded straight into the output.
    #[inline]
    pub fn is_single_plane(&self) -> bool {
        self.plane_count() == 1
    }

    /// Copies byte plane `segment` into its place in `out`.
    ///
    /// Segments run sample by sample, most significant byte first; `out` holds
    /// little-endian samples, either interleaved by pixel or grouped by sample.
    pub fn scatter(&self, segment: usize, plane: &[u8], out: &mut [u8]) {
        let sample = segment / self.bytes_per_sample;
        let byte = self.bytes_per_sample - 1 - segment % self.bytes_per_sample;

        let (region, offset, stride) = match self.planar_configuration {
            PlanarConfiguration::Interleaved => (
                &mut out[..],
                sample * self.bytes_per_sample + byte,
                self.plane_count(),
            ),
            PlanarConfiguration::Planar => {
                let len = self.pixels * self.bytes_per_sample;
                (
                    &mut out[sample * len..(sample + 1) * len],
                    byte,
                    self.bytes_per_sample,
                )
            }
        };

        for (dst, &value) in region.iter_mut().skip(offset).step_by(stride).zip(plane) {
            *dst = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn layout(
        pixels: usize,
        samples_per_pixel: usize,
        bytes_per_sample: usize,
        planar_configuration: PlanarConfiguration,
    ) -> PlaneLayout {
        PlaneLayout {
            pixels,
            samples_per_pixel,
            bytes_per_sample,
            planar_configuration,
        }
    }

    #[test]
    fn sixteen_bit_planes_land_little_endian() {
        let layout = layout(2, 1, 2, PlanarConfiguration::Interleaved);
        let mut out = vec![0u8; 4];

        layout.scatter(0, &[0x12, 0x56], &mut out);
        layout.scatter(1, &[0x34, 0x78], &mut out);

        assert_eq!(out, vec![0x34, 0x12, 0x78, 0x56]);
    }

    #[rstest]
    #[case::interleaved(PlanarConfiguration::Interleaved, vec![1, 10, 100, 2, 20, 200])]
    #[case::planar(PlanarConfiguration::Planar, vec![1, 2, 10, 20, 100, 200])]
    fn rgb_planes_follow_planar_configuration(
        #[case] planar_configuration: PlanarConfiguration,
        #[case] expected: Vec<u8>,
    ) {
        let layout = layout(2, 3, 1, planar_configuration);
        let mut out = vec![0u8; 6];

        layout.scatter(0, &[1, 2], &mut out);
        layout.scatter(1, &[10, 20], &mut out);
        layout.scatter(2, &[100, 200], &mut out);

        assert_eq!(out, expected);
    }

    #[test]
    fn frame_len_overflow_is_none() {
        assert_eq!(layout(4, 3, 2, PlanarConfiguration::Planar).frame_len(), Some(24));
        assert_eq!(layout(usize::MAX, 3, 1, PlanarConfiguration::Interleaved).frame_len(), None);
        assert_eq!(layout(2, usize::MAX, 2, PlanarConfiguration::Interleaved).frame_len(), None);
    }

    #[test]
    fn plane_count_is_samples_times_bytes() {
        assert_eq!(layout(4, 3, 2, PlanarConfiguration::Planar).plane_count(), 6);
        assert!(layout(4, 1, 1, PlanarConfiguration::Interleaved).is_single_plane());
    }
}
