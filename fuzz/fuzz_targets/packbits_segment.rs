#![no_main]

// Decodes arbitrary bytes as one PackBits segment into a fixed size plane.

use dicom_decode_task_rle::rle::packbits::decode_segment;
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct SegmentInput {
    pub plane_len: u16,
    pub segment: Vec<u8>,
}

fuzz_target!(|input: SegmentInput| {
    let mut plane = vec![0u8; input.plane_len as usize];
    let _ = decode_segment(&input.segment, &mut plane, 0);
});
