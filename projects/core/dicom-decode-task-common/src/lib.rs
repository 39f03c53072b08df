//! Shared data model for the DICOM decode task crates.
//!
//! This crate holds the parts of the decode task that have no dependency on
//! the codec engines or the task handler itself:
//!
//! - [`ImageFrameInfo`]: the descriptive metadata of a single pixel frame.
//! - [`SampleBuffer`]: the owned byte arena holding decoded samples.
//! - [`SampleView`]: a validated, typed view over a [`SampleBuffer`].
//! - [`MinMax`]: the one-pass pixel intensity extrema scan.
//!
//! # Example
//!
//! ```
//! use dicom_decode_task_common::{ImageFrameInfo, PixelRepresentation, SampleBuffer, SampleView};
//!
//! let frame = ImageFrameInfo::new(1, 4, 16, 1, PixelRepresentation::Unsigned);
//! let buffer = SampleBuffer::from_vec(vec![0, 0, 10, 0, 255, 0, 1, 1]);
//!
//! let view = SampleView::for_frame(&buffer, &frame)?;
//! let extrema = view.min_max().unwrap();
//! assert_eq!((extrema.min, extrema.max), (0, 257));
//! # Ok::<(), dicom_decode_task_common::FrameError>(())
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod frame;
pub mod image_frame;
pub mod min_max;
pub mod sample;

#[cfg(test)]
pub mod test_prelude;

pub use frame::{FrameError, ImageFrameInfo, PixelRepresentation, PlanarConfiguration};
pub use image_frame::ImageFrame;
pub use min_max::MinMax;
pub use sample::{Sample, SampleBuffer, SampleFormat, SampleView, TypedSamples};
