//! # matmul-bench: GPU vs CPU matrix multiplication
//!
//! Benchmarks square-matrix multiplication on a WebGPU compute pipeline
//! against a naive sequential CPU loop, then checks the two results
//! against each other elementwise.
//!
//! Both strategies run the identical row-major reduction loop; the GPU
//! kernel computes one output cell per invocation, tiled into
//! `local_size x local_size` workgroups. A run is one strictly sequential
//! pass: generate inputs, multiply on the GPU (fully awaited, readback
//! included), multiply on the CPU, compare within a relative tolerance.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matmul_bench::{bench, BenchConfig, NullStatus};
//!
//! let report = pollster::block_on(bench::run(&BenchConfig::default(), &NullStatus))
//!     .expect("benchmark failed");
//! println!("gpu {:.3} ms, cpu {:.3} ms, match: {}",
//!     report.gpu_ms, report.cpu_ms, report.matches);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod bench;
pub mod compare;
pub mod cpu;
pub mod error;
pub mod matrix;
pub mod random;

// Public exports
pub use bench::{BenchConfig, BenchReport, NullStatus, StatusSink, MAX_DIMENSION};
pub use error::BenchError;
pub use matrix::Matrix;
