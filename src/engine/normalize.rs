use super::matrix::DecisionMatrix;

/// Decision matrix with every column divided by its Euclidean norm.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    n_rows: usize,
    n_cols: usize,
    denominators: Vec<f64>,
    cells: Vec<f64>,
}

impl NormalizedMatrix {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.n_cols + col]
    }

    pub fn denominators(&self) -> &[f64] {
        &self.denominators
    }
}

/// `denom[j] = sqrt(sum_i M[i][j]^2)`. A zero column normalizes to zeros.
///
/// The norm is accumulated with `hypot` so very large or very small finite
/// values neither overflow to infinity nor underflow to zero.
pub fn normalize(matrix: &DecisionMatrix) -> NormalizedMatrix {
    let n_rows = matrix.n_rows();
    let n_cols = matrix.n_cols();

    let denominators = (0..n_cols)
        .map(|col| matrix.column(col).fold(0.0_f64, f64::hypot))
        .collect::<Vec<_>>();

    let mut cells = vec![0.0; n_rows * n_cols];
    for row in 0..n_rows {
        for (col, &denom) in denominators.iter().enumerate() {
            if denom > 0.0 {
                cells[row * n_cols + col] = matrix.value(row, col) / denom;
            }
        }
    }

    NormalizedMatrix {
        n_rows,
        n_cols,
        denominators,
        cells,
    }
}
