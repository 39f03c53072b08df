use bytesize::ByteSize;
use core::fmt;
use core::time::Duration;

/// Bytes processed per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Throughput(pub ByteSize);

impl Throughput {
    /// Creates a new [`Throughput`] from bytes per second.
    pub fn from_bytes_per_sec(bytes_per_sec: u64) -> Self {
        Self(ByteSize(bytes_per_sec))
    }

    /// Throughput of `bytes` processed over `elapsed`.
    pub fn from_elapsed(bytes: u64, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            return Self::from_bytes_per_sec(0);
        }
        Self::from_bytes_per_sec((bytes as f64 / secs).round() as u64)
    }

    /// Returns the raw bytes per second value.
    pub fn bytes_per_sec(&self) -> u64 {
        self.0 .0
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", self.0)
    }
}
