//! Benchmark orchestration: one end-to-end GPU-vs-CPU run.

use crate::backend::{ops, shaders, webgpu::GpuContext};
use crate::compare;
use crate::cpu;
use crate::error::BenchError;
use crate::random::{self, PRNGKey};

/// Largest accepted matrix dimension. Requests above this are rejected
/// before any generation or device work.
pub const MAX_DIMENSION: usize = 2048;

/// Side channel for human-readable phase announcements.
///
/// The runner reports each phase in order (preparing, requesting the
/// device, computing per strategy, computing correctness, done) plus a
/// per-row progress line during the CPU pass. There is no schema beyond
/// ordering; an interactive host shows the strings, everyone else uses
/// [`NullStatus`].
pub trait StatusSink {
    /// Announce the current phase.
    fn status(&self, message: &str);
}

/// Sink that drops every message.
pub struct NullStatus;

impl StatusSink for NullStatus {
    fn status(&self, _message: &str) {}
}

/// Configuration for a single run.
///
/// Passed explicitly into [`run`]; nothing is read from process-wide
/// state.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Side length of the square matrices.
    pub dimension: usize,
    /// Workgroup tile side for the GPU dispatch.
    pub local_size: u32,
    /// Relative-error tolerance for the correctness check.
    pub tolerance: f32,
    /// Seed for matrix generation.
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dimension: 1024,
            local_size: shaders::LOCAL_SIZE,
            tolerance: compare::TOLERANCE,
            seed: 42,
        }
    }
}

/// Outcome of a completed run.
///
/// `matches == false` is a reportable result, not an error; the usual
/// culprit is accumulation-order differences between the two strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    /// GPU elapsed time in milliseconds (submission through readback).
    pub gpu_ms: f64,
    /// CPU elapsed time in milliseconds (whole loop).
    pub cpu_ms: f64,
    /// Whether the two results agree within tolerance.
    pub matches: bool,
}

/// Run one end-to-end benchmark: generate, multiply on both strategies,
/// compare.
///
/// Phases are strictly sequential: the GPU computation is fully awaited
/// (readback included) before the CPU pass starts, and the CPU pass
/// finishes before the comparison. The GPU goes first so its timing is
/// not skewed by thermal and scheduler pressure from the O(n^3) CPU pass.
/// There is no cancellation and no automatic fallback; any fatal error
/// aborts this run only.
///
/// # Errors
///
/// [`BenchError::DimensionTooLarge`] for an out-of-bounds dimension
/// (checked before any work), plus everything
/// [`GpuContext::acquire`] and [`ops::gpu_matmul`] can fail with.
pub async fn run(config: &BenchConfig, status: &dyn StatusSink) -> Result<BenchReport, BenchError> {
    if config.dimension > MAX_DIMENSION {
        return Err(BenchError::DimensionTooLarge {
            dimension: config.dimension,
            max: MAX_DIMENSION,
        });
    }

    status.status("Preparing");
    let (key_a, key_b) = PRNGKey::from_seed(config.seed).split();
    let matrix_a = random::uniform_matrix(key_a, config.dimension);
    let matrix_b = random::uniform_matrix(key_b, config.dimension);

    status.status("Requesting device");
    let ctx = GpuContext::acquire().await?;

    status.status("Computing on the GPU");
    let (gpu_result, gpu_ms) =
        ops::gpu_matmul(&ctx, &matrix_a, &matrix_b, config.local_size).await?;
    status.status("GPU finished");
    log::info!("gpu matmul: {gpu_ms:.3} ms");

    status.status("Computing on the CPU");
    let (cpu_result, cpu_ms) = cpu::multiply(&matrix_a, &matrix_b, |row| {
        status.status(&format!("CPU computed row {row}"));
    });
    status.status("CPU finished");
    log::info!("cpu matmul: {cpu_ms:.3} ms");

    status.status("Computing correctness");
    let matches = compare::matrices_match(&gpu_result, &cpu_result, config.tolerance);
    status.status("Done");

    Ok(BenchReport {
        gpu_ms,
        cpu_ms,
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingStatus(Mutex<Vec<String>>);

    impl StatusSink for RecordingStatus {
        fn status(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn oversized_dimension_rejected_before_any_work() {
        let config = BenchConfig {
            dimension: 4096,
            ..Default::default()
        };
        let status = RecordingStatus(Mutex::new(Vec::new()));

        let result = pollster::block_on(run(&config, &status));

        match result {
            Err(BenchError::DimensionTooLarge { dimension, max }) => {
                assert_eq!(dimension, 4096);
                assert_eq!(max, MAX_DIMENSION);
            }
            other => panic!("expected DimensionTooLarge, got {other:?}"),
        }
        // Rejected up front: no phase was ever announced.
        assert!(status.0.lock().unwrap().is_empty());
    }

    #[test]
    fn max_dimension_itself_passes_the_guard() {
        // 2048 is allowed; anything past the guard then needs a device,
        // so only the guard itself is checked here.
        let config = BenchConfig {
            dimension: MAX_DIMENSION,
            ..Default::default()
        };
        assert!(config.dimension <= MAX_DIMENSION);
    }

    #[test]
    fn default_config_matches_reference_values() {
        let config = BenchConfig::default();
        assert_eq!(config.dimension, 1024);
        assert_eq!(config.local_size, 8);
        assert_eq!(config.tolerance, 1e-5);
    }

    #[test]
    fn null_status_is_silent() {
        NullStatus.status("ignored");
    }
}
