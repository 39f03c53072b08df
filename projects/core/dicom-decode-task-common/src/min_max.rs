//! Pixel intensity extrema.

use crate::sample::Sample;

/// Smallest and largest sample value of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMax {
    pub min: i64,
    pub max: i64,
}

impl MinMax {
    /// Scans `samples` once, tracking both extrema.
    ///
    /// Returns [`None`] if `samples` is empty.
    #[inline]
    pub fn scan<T: Sample>(samples: impl Iterator<Item = T>) -> Option<MinMax> {
        let mut samples = samples.map(Into::<i64>::into);
        let first = samples.next()?;

        let (min, max) = samples.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        Some(MinMax { min, max })
    }

    /// Whether `smallest` and `largest` match this range exactly.
    #[inline]
    pub fn matches(&self, smallest: Option<i64>, largest: Option<i64>) -> bool {
        smallest == Some(self.min) && largest == Some(self.max)
    }
}
