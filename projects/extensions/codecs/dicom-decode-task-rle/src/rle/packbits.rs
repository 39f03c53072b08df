//! PackBits run-length decoding of a single segment.

use super::constants::PACKBITS_NOOP;
use dicom_decode_task_api_common::MalformedPixelDataError;

/// Decodes PackBits segment `index` until `out` is full.
///
/// Input left over once `out` is full is ignored; encoders pad segments to an
/// even length.
///
/// # Errors
///
/// - [`MalformedPixelDataError::SegmentOverrun`] if a run crosses the end of `out`.
/// - [`MalformedPixelDataError::SegmentTruncated`] if `segment` ends before `out` is full.
pub fn decode_segment(
    segment: &[u8],
    out: &mut [u8],
    index: usize,
) -> Result<(), MalformedPixelDataError> {
    let truncated = || MalformedPixelDataError::SegmentTruncated { segment: index };
    let overrun = || MalformedPixelDataError::SegmentOverrun { segment: index };

    let mut read = 0;
    let mut written = 0;
    while written < out.len() {
        let header = *segment.get(read).ok_or_else(truncated)? as i8;
        read += 1;

        if header >= 0 {
            // Literal run of header + 1 bytes.
            let len = header as usize + 1;
            let literal = segment.get(read..read + len).ok_or_else(truncated)?;
            out.get_mut(written..written + len)
                .ok_or_else(overrun)?
                .copy_from_slice(literal);
            read += len;
            written += len;
        } else if header != PACKBITS_NOOP {
            // Next byte repeated 1 - header times.
            let len = (1 - header as isize) as usize;
            let value = *segment.get(read).ok_or_else(truncated)?;
            out.get_mut(written..written + len)
                .ok_or_else(overrun)?
                .fill(value);
            read += 1;
            written += len;
        }
    }

    Ok(())
}
