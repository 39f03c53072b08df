//! Layout constants of the RLE header and PackBits encoding.

/// Size of the RLE header: the segment count followed by 15 segment offsets.
pub const RLE_HEADER_SIZE: usize = 64;
/// Maximum number of segments an RLE frame can have.
pub const MAX_SEGMENTS: usize = 15;

/// Offset of the segment count within the header.
pub const SEGMENT_COUNT_OFFSET: usize = 0;
/// Offset of the first of the 15 segment offsets within the header.
pub const SEGMENT_OFFSETS_OFFSET: usize = 4;

/// PackBits header byte that encodes nothing.
pub const PACKBITS_NOOP: i8 = -128;
