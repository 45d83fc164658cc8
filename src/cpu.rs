//! Sequential reference matrix multiplication.

use std::time::Instant;

use crate::matrix::Matrix;

/// Rows between progress checkpoints in [`multiply`].
pub const CHECKPOINT_ROWS: usize = 10;

/// Compute `C = A x B` with the naive triple loop on a single thread.
///
/// Returns the product and the elapsed wall-clock milliseconds, measured
/// start-to-finish around the whole loop (unlike the GPU path, which times
/// only submission through readback — see
/// [`crate::backend::ops::gpu_matmul`]).
///
/// `progress` is invoked with the current row index every
/// [`CHECKPOINT_ROWS`] rows so an interactive host can stay responsive;
/// pass `|_| {}` when nobody is listening. The index arithmetic here is
/// the ground truth the GPU kernel must reproduce: row `x` of `a` dotted
/// with column `y` of `b`, everything row-major.
///
/// # Panics
///
/// Panics if the operands do not share a dimension.
pub fn multiply<F>(a: &Matrix, b: &Matrix, mut progress: F) -> (Matrix, f64)
where
    F: FnMut(usize),
{
    assert_eq!(
        a.dimension(),
        b.dimension(),
        "operands must share a dimension"
    );
    let dimension = a.dimension();
    let a = a.as_slice();
    let b = b.as_slice();

    let mut result = vec![0.0f32; dimension * dimension];
    let start = Instant::now();

    for x in 0..dimension {
        for y in 0..dimension {
            let mut sum = 0.0f32;
            for i in 0..dimension {
                sum += a[i + x * dimension] * b[y + i * dimension];
            }
            result[y + x * dimension] = sum;
        }

        if x % CHECKPOINT_ROWS == 0 {
            log::trace!("cpu matmul reached row {x}");
            progress(x);
        }
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (Matrix::from_vec(result, dimension), elapsed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_one_is_exact() {
        let a = Matrix::from_vec(vec![3.0], 1);
        let b = Matrix::from_vec(vec![4.0], 1);
        let (c, elapsed_ms) = multiply(&a, &b, |_| {});
        assert_eq!(c.as_slice(), &[12.0]);
        assert!(elapsed_ms >= 0.0);
    }

    #[test]
    fn dimension_two_known_product() {
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2);
        let b = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2);
        let (c, _) = multiply(&a, &b, |_| {});
        // [[1,2],[3,4]] @ [[5,6],[7,8]] = [[19,22],[43,50]]
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn identity_is_neutral() {
        let a = Matrix::from_vec((1..=9).map(|i| i as f32).collect(), 3);
        let mut eye = vec![0.0f32; 9];
        for i in 0..3 {
            eye[i + i * 3] = 1.0;
        }
        let (c, _) = multiply(&a, &Matrix::from_vec(eye, 3), |_| {});
        assert_eq!(c.as_slice(), a.as_slice());
    }

    #[test]
    fn progress_fires_every_ten_rows() {
        let a = Matrix::zeros(25);
        let b = Matrix::zeros(25);
        let mut rows = Vec::new();
        let _ = multiply(&a, &b, |row| rows.push(row));
        assert_eq!(rows, vec![0, 10, 20]);
    }

    #[test]
    #[should_panic(expected = "share a dimension")]
    fn mismatched_dimensions_rejected() {
        let a = Matrix::zeros(2);
        let b = Matrix::zeros(3);
        let _ = multiply(&a, &b, |_| {});
    }
}
