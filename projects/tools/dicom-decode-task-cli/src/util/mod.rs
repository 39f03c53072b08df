mod core;
mod throughput;

pub use self::core::*;
pub use self::throughput::*;
