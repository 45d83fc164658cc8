//! Flat row-major storage for square matrices.

/// Square matrix of `f32` values stored row-major in a flat vector.
///
/// The element at `(row, column)` lives at index `column + row * dimension`.
/// Both multiplication strategies and the comparator rely on this
/// linearization being used consistently for every operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    dimension: usize,
}

impl Matrix {
    /// Wrap a flat row-major vector as a `dimension x dimension` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != dimension * dimension`.
    pub fn from_vec(data: Vec<f32>, dimension: usize) -> Self {
        assert_eq!(
            data.len(),
            dimension * dimension,
            "matrix data length must equal dimension^2"
        );
        Self { data, dimension }
    }

    /// A `dimension x dimension` matrix of zeros.
    pub fn zeros(dimension: usize) -> Self {
        Self::from_vec(vec![0.0; dimension * dimension], dimension)
    }

    /// Side length of the matrix.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of elements (`dimension^2`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for the degenerate zero-dimension matrix.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the elements.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Value at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> f32 {
        assert!(row < self.dimension && column < self.dimension);
        self.data[column + row * self.dimension]
    }
}
