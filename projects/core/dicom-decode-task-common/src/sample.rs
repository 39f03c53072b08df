//! Owned sample storage and typed views over it.
//!
//! Decoded pixel data is kept as raw little-endian bytes in a [`SampleBuffer`].
//! Reading it as numbers goes through [`SampleView`], which validates the
//! buffer length against the frame descriptor before any typed access is
//! handed out, and [`TypedSamples`], which decodes elements of one concrete
//! [`Sample`] type.

use crate::frame::{FrameError, ImageFrameInfo, PixelRepresentation};
use crate::min_max::MinMax;
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::Range;

/// Concrete numeric type of a single decoded sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
}

impl SampleFormat {
    /// Derives the sample format from DICOM `BitsAllocated` and `PixelRepresentation`.
    pub fn from_descriptor(
        bits_allocated: u16,
        pixel_representation: PixelRepresentation,
    ) -> Result<Self, FrameError> {
        let signed = pixel_representation.is_signed();
        match (bits_allocated, signed) {
            (8, false) => Ok(SampleFormat::U8),
            (8, true) => Ok(SampleFormat::I8),
            (16, false) => Ok(SampleFormat::U16),
            (16, true) => Ok(SampleFormat::I16),
            (32, false) => Ok(SampleFormat::U32),
            (32, true) => Ok(SampleFormat::I32),
            (other, _) => Err(FrameError::UnsupportedBitsAllocated(other)),
        }
    }

    /// Size of one sample in bytes.
    #[inline]
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::U8 | SampleFormat::I8 => 1,
            SampleFormat::U16 | SampleFormat::I16 => 2,
            SampleFormat::U32 | SampleFormat::I32 => 4,
        }
    }

    /// Inclusive range of values a sample of this format can hold.
    pub const fn value_range(self) -> (i64, i64) {
        match self {
            SampleFormat::U8 => (u8::MIN as i64, u8::MAX as i64),
            SampleFormat::I8 => (i8::MIN as i64, i8::MAX as i64),
            SampleFormat::U16 => (u16::MIN as i64, u16::MAX as i64),
            SampleFormat::I16 => (i16::MIN as i64, i16::MAX as i64),
            SampleFormat::U32 => (u32::MIN as i64, u32::MAX as i64),
            SampleFormat::I32 => (i32::MIN as i64, i32::MAX as i64),
        }
    }
}

/// A numeric type that decoded samples can be read as.
pub trait Sample: Copy + Into<i64> + 'static {
    /// The format this type reads.
    const FORMAT: SampleFormat;

    /// Reads one sample from exactly `FORMAT.bytes_per_sample()` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_sample {
    ($ty:ty, $format:expr) => {
        impl Sample for $ty {
            const FORMAT: SampleFormat = $format;

            #[inline(always)]
            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }
        }
    };
}

impl_sample!(u8, SampleFormat::U8);
impl_sample!(i8, SampleFormat::I8);
impl_sample!(u16, SampleFormat::U16);
impl_sample!(i16, SampleFormat::I16);
impl_sample!(u32, SampleFormat::U32);
impl_sample!(i32, SampleFormat::I32);

/// Owned byte arena holding the decoded samples of one frame.
///
/// Samples are stored little-endian regardless of the transfer syntax they
/// were decoded from. The buffer is deliberately not [`Clone`]: a decoded
/// frame has exactly one owner at a time, and handing it to the caller is a
/// move.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SampleBuffer {
    bytes: Vec<u8>,
}

impl SampleBuffer {
    /// Wraps an existing allocation without copying it.
    #[inline]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Allocates a zero filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: alloc::vec![0u8; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Address range occupied by the samples.
    ///
    /// Used to prove that two buffers do not share memory.
    #[inline]
    pub fn address_range(&self) -> Range<usize> {
        byte_range(&self.bytes)
    }

    /// Releases the underlying allocation.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for SampleBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

#[inline]
fn byte_range(bytes: &[u8]) -> Range<usize> {
    let start = bytes.as_ptr() as usize;
    start..start + bytes.len()
}

/// A validated view of a sample buffer as samples of one [`SampleFormat`].
#[derive(Debug, Clone, Copy)]
pub struct SampleView<'a> {
    bytes: &'a [u8],
    format: SampleFormat,
}

impl<'a> SampleView<'a> {
    /// Creates a view of `bytes` as `sample_count` samples of `format`.
    ///
    /// Fails unless the length is exactly `sample_count * format.bytes_per_sample()`.
    pub fn new(
        bytes: &'a [u8],
        format: SampleFormat,
        sample_count: usize,
    ) -> Result<Self, FrameError> {
        let expected = sample_count
            .checked_mul(format.bytes_per_sample())
            .ok_or(FrameError::SizeOverflow)?;
        if bytes.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self { bytes, format })
    }

    /// Creates a view over bytes whose length is already known to be a whole
    /// number of `format` samples.
    #[inline]
    pub(crate) fn from_validated(bytes: &'a [u8], format: SampleFormat) -> Self {
        debug_assert_eq!(bytes.len() % format.bytes_per_sample(), 0);
        Self { bytes, format }
    }

    /// Creates a view of `buffer` as the samples of `frame`.
    pub fn for_frame(buffer: &'a SampleBuffer, frame: &ImageFrameInfo) -> Result<Self, FrameError> {
        Self::new(buffer.as_bytes(), frame.sample_format()?, frame.sample_count()?)
    }

    #[inline]
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Number of samples in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() / self.format.bytes_per_sample()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Typed access to the samples, if `T` matches the view's format.
    #[inline]
    pub fn typed<T: Sample>(&self) -> Option<TypedSamples<'a, T>> {
        (T::FORMAT == self.format).then_some(TypedSamples {
            bytes: self.bytes,
            _sample: PhantomData,
        })
    }

    /// Smallest and largest sample in a single pass.
    ///
    /// Returns [`None`] for an empty view.
    pub fn min_max(&self) -> Option<MinMax> {
        match self.format {
            SampleFormat::U8 => MinMax::scan(self.typed::<u8>()?.iter()),
            SampleFormat::I8 => MinMax::scan(self.typed::<i8>()?.iter()),
            SampleFormat::U16 => MinMax::scan(self.typed::<u16>()?.iter()),
            SampleFormat::I16 => MinMax::scan(self.typed::<i16>()?.iter()),
            SampleFormat::U32 => MinMax::scan(self.typed::<u32>()?.iter()),
            SampleFormat::I32 => MinMax::scan(self.typed::<i32>()?.iter()),
        }
    }
}

/// Samples of a [`SampleView`] read as concrete type `T`.
#[derive(Debug, Clone, Copy)]
pub struct TypedSamples<'a, T: Sample> {
    bytes: &'a [u8],
    _sample: PhantomData<T>,
}

impl<'a, T: Sample> TypedSamples<'a, T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() / T::FORMAT.bytes_per_sample()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Sample at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<T> {
        let size = T::FORMAT.bytes_per_sample();
        let start = index.checked_mul(size)?;
        self.bytes.get(start..start + size).map(T::from_le_slice)
    }

    /// Iterates the samples in storage order.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.bytes
            .chunks_exact(T::FORMAT.bytes_per_sample())
            .map(T::from_le_slice)
    }
}
