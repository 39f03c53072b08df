#![no_main]

// Decodes arbitrary bytes as an RLE frame; malformed input must be rejected, never panic.

use dicom_decode_task_common::PlanarConfiguration;
use dicom_decode_task_rle::rle::planes::PlaneLayout;
use dicom_decode_task_rle::{RleDecoder, RleOptions};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct RleInput {
    pub pixels: u8,
    pub rgb: bool,
    pub sixteen_bit: bool,
    pub planar: bool,
    pub strict_segment_count: bool,
    pub data: Vec<u8>,
}

fuzz_target!(|input: RleInput| {
    let layout = PlaneLayout {
        pixels: input.pixels as usize,
        samples_per_pixel: if input.rgb { 3 } else { 1 },
        bytes_per_sample: if input.sixteen_bit { 2 } else { 1 },
        planar_configuration: if input.planar {
            PlanarConfiguration::Planar
        } else {
            PlanarConfiguration::Interleaved
        },
    };
    let decoder = RleDecoder::with_options(RleOptions {
        strict_segment_count: input.strict_segment_count,
    });

    if let Ok(samples) = decoder.decode_frame(&input.data, &layout) {
        assert_eq!(samples.len(), layout.pixels * layout.plane_count());
    }
});
