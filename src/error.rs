//! Error taxonomy for a benchmark run.

use thiserror::Error;

/// Fatal conditions that abort the current benchmark run.
///
/// A correctness mismatch between the two strategies is *not* an error;
/// it is reported through [`crate::bench::BenchReport::matches`].
#[derive(Debug, Error)]
pub enum BenchError {
    /// The requested dimension exceeds the supported maximum. Rejected
    /// before any generation or device work happens.
    #[error("matrix dimension {dimension} exceeds the supported maximum {max}")]
    DimensionTooLarge {
        /// The dimension that was requested.
        dimension: usize,
        /// The configured upper bound.
        max: usize,
    },

    /// No compute-capable GPU adapter is available on this host.
    #[error("no compatible GPU adapter available")]
    NoAdapter,

    /// The adapter was found but refused to open a device.
    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Device memory allocation failed.
    #[error("GPU buffer allocation failed: {0}")]
    OutOfMemory(String),

    /// The device rejected the compute kernel or pipeline.
    #[error("compute kernel rejected by the device: {0}")]
    Kernel(String),

    /// Copying the result back to host memory failed.
    #[error("result readback failed: {0}")]
    Readback(String),
}
