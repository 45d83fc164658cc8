//! Command-line front end for the benchmark.
//!
//! Run with: cargo run --release --bin benchmark [dimension]

use matmul_bench::{bench, BenchConfig, StatusSink};

struct StdoutStatus;

impl StatusSink for StdoutStatus {
    fn status(&self, message: &str) {
        println!("[status] {message}");
    }
}

fn main() {
    env_logger::init();

    let mut config = BenchConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(dimension) => config.dimension = dimension,
            Err(_) => {
                eprintln!("invalid dimension: {arg}");
                std::process::exit(2);
            }
        }
    }

    println!(
        "Multiplying two {0}x{0} matrices (GPU, then CPU)",
        config.dimension
    );

    match pollster::block_on(bench::run(&config, &StdoutStatus)) {
        Ok(report) => {
            println!("GPU time: {:.3}s", report.gpu_ms / 1000.0);
            println!("CPU time: {:.3}s", report.cpu_ms / 1000.0);
            if report.matches {
                println!("Computations match!");
            } else {
                println!("Computations don't match (float addition issue?)");
            }
        }
        Err(error) => {
            eprintln!("benchmark failed: {error}");
            std::process::exit(1);
        }
    }
}
