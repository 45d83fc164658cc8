//! Elementwise correctness comparison between the two strategies.

use crate::matrix::Matrix;

/// Reference relative-error tolerance for the correctness check.
pub const TOLERANCE: f32 = 1e-5;

/// `true` when every element of `result` is within `tolerance` relative
/// error of the corresponding element of `reference`.
///
/// The check is `|1 - result[i] / reference[i]| <= tolerance`. A reference
/// element with magnitude at most `f32::EPSILON` cannot anchor a relative
/// error, so for that cell the check degrades to
/// `|result[i]| <= tolerance`: near-zero against near-zero matches, zero
/// against anything large does not.
///
/// # Panics
///
/// Panics if the matrices do not share a dimension.
pub fn matrices_match(result: &Matrix, reference: &Matrix, tolerance: f32) -> bool {
    assert_eq!(
        result.dimension(),
        reference.dimension(),
        "compared matrices must share a dimension"
    );

    result
        .as_slice()
        .iter()
        .zip(reference.as_slice())
        .all(|(&r, &c)| {
            if c.abs() <= f32::EPSILON {
                r.abs() <= tolerance
            } else {
                (1.0 - r / c).abs() <= tolerance
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_matrices_match() {
        let m = Matrix::from_vec(vec![1.0, 2.5, -3.0, 4.0], 2);
        assert!(matrices_match(&m, &m, TOLERANCE));
    }

    #[test]
    fn single_large_deviation_fails() {
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2);
        let mut data = a.as_slice().to_vec();
        data[2] *= 1.0 + 100.0 * TOLERANCE;
        let b = Matrix::from_vec(data, 2);
        assert!(!matrices_match(&b, &a, TOLERANCE));
    }

    #[test]
    fn deviation_within_tolerance_matches() {
        let a = Matrix::from_vec(vec![10.0, 20.0, 30.0, 40.0], 2);
        let data = a.as_slice().iter().map(|&x| x * (1.0 + 1e-6)).collect();
        let b = Matrix::from_vec(data, 2);
        assert!(matrices_match(&b, &a, TOLERANCE));
    }

    #[test]
    fn zero_reference_against_zero_matches() {
        let a = Matrix::zeros(2);
        let b = Matrix::zeros(2);
        assert!(matrices_match(&b, &a, TOLERANCE));
    }

    #[test]
    fn zero_reference_against_large_value_fails() {
        let reference = Matrix::zeros(2);
        let result = Matrix::from_vec(vec![0.0, 5.0, 0.0, 0.0], 2);
        assert!(!matrices_match(&result, &reference, TOLERANCE));
    }
}
