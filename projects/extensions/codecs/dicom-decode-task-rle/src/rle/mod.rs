//! DICOM RLE Lossless frame layout.
//!
//! A frame is a 64 byte header followed by up to 15 PackBits segments. Each
//! segment holds one byte plane: for every sample of a pixel, one segment per
//! byte of the sample, most significant byte first.

pub mod constants;
pub mod header;
pub mod packbits;
pub mod planes;
