//! Parsing of the RLE segment table.

use super::constants::*;
use core::ops::Range;
use dicom_decode_task_api_common::MalformedPixelDataError;
use endian_writer::{EndianReader, LittleEndianReader};

/// The segment table at the start of an RLE encoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleHeader {
    segment_count: usize,
    offsets: [u32; MAX_SEGMENTS],
}

impl RleHeader {
    /// Parses and validates the header of an RLE encoded frame.
    ///
    /// # Errors
    ///
    /// - [`MalformedPixelDataError::InputTooShort`] if `data` cannot hold a header.
    /// - [`MalformedPixelDataError::InvalidHeader`] if the segment count is out
    ///   of range, or a used segment offset is out of order or past the end of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, MalformedPixelDataError> {
        if data.len() < RLE_HEADER_SIZE {
            return Err(MalformedPixelDataError::InputTooShort {
                required: RLE_HEADER_SIZE,
                actual: data.len(),
            });
        }

        // SAFETY: We checked data.len() >= RLE_HEADER_SIZE (64), every read below is within it.
        let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
        let segment_count = unsafe { reader.read_u32_at(SEGMENT_COUNT_OFFSET as isize) } as usize;
        if segment_count == 0 || segment_count > MAX_SEGMENTS {
            return Err(MalformedPixelDataError::InvalidHeader(
                "segment count must be between 1 and 15",
            ));
        }

        let mut offsets = [0u32; MAX_SEGMENTS];
        for (index, offset) in offsets.iter_mut().enumerate() {
            let position = SEGMENT_OFFSETS_OFFSET + index * 4;
            *offset = unsafe { reader.read_u32_at(position as isize) };
        }

        if offsets[0] as usize != RLE_HEADER_SIZE {
            return Err(MalformedPixelDataError::InvalidHeader(
                "first segment does not start after the header",
            ));
        }

        let used = &offsets[..segment_count];
        if used.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(MalformedPixelDataError::InvalidHeader(
                "segment offsets are not in ascending order",
            ));
        }

        if used.iter().any(|&offset| offset as usize > data.len()) {
            return Err(MalformedPixelDataError::InvalidHeader(
                "segment offset points past the end of the data",
            ));
        }

        Ok(Self {
            segment_count,
            offsets,
        })
    }

    /// Number of segments in the frame.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Byte range of segment `index` within a frame of `data_len` bytes.
    ///
    /// The last segment runs to the end of the frame.
    pub fn segment_range(&self, index: usize, data_len: usize) -> Range<usize> {
        let start = self.offsets[index] as usize;
        let end = if index + 1 < self.segment_count {
            self.offsets[index + 1] as usize
        } else {
            data_len
        };
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn parses_segment_table() {
        let data = encode_frame(&[&[0x00, 1], &[0x01, 2, 3], &[0xFF, 4]]);
        let header = RleHeader::parse(&data).unwrap();

        assert_eq!(header.segment_count(), 3);
        assert_eq!(header.segment_range(0, data.len()), 64..66);
        assert_eq!(header.segment_range(1, data.len()), 66..69);
        assert_eq!(header.segment_range(2, data.len()), 69..71);
    }

    #[test]
    fn short_input_is_rejected() {
        let result = RleHeader::parse(&[0u8; 63]);
        assert_eq!(
            result,
            Err(MalformedPixelDataError::InputTooShort {
                required: 64,
                actual: 63
            })
        );
    }

    #[rstest]
    #[case::no_segments(0)]
    #[case::too_many_segments(16)]
    fn segment_count_out_of_range_is_rejected(#[case] count: u32) {
        let mut data = vec![0u8; 64];
        write_header(&mut data, count, &[64]);

        assert!(matches!(
            RleHeader::parse(&data),
            Err(MalformedPixelDataError::InvalidHeader(_))
        ));
    }

    #[rstest]
    #[case::first_not_after_header(&[60])]
    #[case::descending(&[64, 70, 66])]
    #[case::past_end(&[64, 200])]
    fn bad_offsets_are_rejected(#[case] offsets: &[u32]) {
        let mut data = vec![0u8; 80];
        write_header(&mut data, offsets.len() as u32, offsets);

        assert!(matches!(
            RleHeader::parse(&data),
            Err(MalformedPixelDataError::InvalidHeader(_))
        ));
    }
}
