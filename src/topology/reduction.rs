//! Boundary Matrix Reduction
//!
//! Standard persistence algorithm (Edelsbrunner, Letscher, Zomorodian 2002):
//! process columns left to right and, while an earlier column has the same
//! low, add it into the current one. Afterwards every non-zero column has a
//! distinct low, which is what pairs births with deaths.
//!
//! A column only ever absorbs earlier columns, and for a strictly upper
//! triangular input every addition lowers `low(j)`, so the loop terminates.

use std::collections::{HashMap, HashSet};

use log::debug;
use ndarray::Array2;

use super::boundary::{BoundaryMatrix, SparseColumn};

/// Boundary matrix after reduction, with its pivot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedMatrix {
    matrix: BoundaryMatrix,
    /// low row -> column owning that low
    low_to_col: HashMap<usize, usize>,
}

impl ReducedMatrix {
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn column(&self, j: usize) -> &SparseColumn {
        self.matrix.column(j)
    }

    pub fn low(&self, j: usize) -> Option<usize> {
        self.matrix.low(j)
    }

    pub fn is_zero_column(&self, j: usize) -> bool {
        self.matrix.column(j).is_zero()
    }

    /// Column whose low is `row`, if any.
    pub fn pivot_column(&self, row: usize) -> Option<usize> {
        self.low_to_col.get(&row).copied()
    }

    /// Number of non-zero (pivot) columns
    pub fn n_pivots(&self) -> usize {
        self.low_to_col.len()
    }

    /// Check the reduction invariant from the columns themselves.
    pub fn has_unique_lows(&self) -> bool {
        let mut seen = HashSet::new();
        self.matrix
            .columns()
            .iter()
            .filter_map(SparseColumn::low)
            .all(|low| seen.insert(low))
    }

    pub fn matrix(&self) -> &BoundaryMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> BoundaryMatrix {
        self.matrix
    }

    pub fn to_dense(&self) -> Array2<u8> {
        self.matrix.to_dense()
    }
}

/// Reduce a boundary matrix.
///
/// # Panics
/// If the matrix is not strictly upper triangular. Such a matrix cannot
/// come out of a filtration and indicates a broken caller.
pub fn reduce(mut matrix: BoundaryMatrix) -> ReducedMatrix {
    let low_to_col = reduce_in_place(&mut matrix);
    ReducedMatrix { matrix, low_to_col }
}

/// Reduce `matrix` in place and return its pivot table (low row -> column).
///
/// # Panics
/// If the matrix is not strictly upper triangular.
pub fn reduce_in_place(matrix: &mut BoundaryMatrix) -> HashMap<usize, usize> {
    assert!(
        matrix.is_strictly_upper_triangular(),
        "boundary matrix must be strictly upper triangular in filtration order"
    );

    let columns = matrix.columns_mut();
    let mut low_to_col: HashMap<usize, usize> = HashMap::with_capacity(columns.len() / 2);
    let mut additions = 0usize;

    for j in 0..columns.len() {
        // Reduce column using previously reduced columns
        while let Some(low_idx) = columns[j].low() {
            match low_to_col.get(&low_idx) {
                Some(&pivot_col) => {
                    let (earlier, rest) = columns.split_at_mut(j);
                    rest[0].add_assign(&earlier[pivot_col]);
                    additions += 1;
                }
                None => {
                    low_to_col.insert(low_idx, j);
                    break;
                }
            }
        }
    }

    debug!(
        "Reduced {} columns: {} pivots, {} column additions",
        columns.len(),
        low_to_col.len(),
        additions
    );

    low_to_col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::DistanceMatrix;
    use crate::test_support::{init, textbook_boundary};
    use crate::topology::{assemble, FiltrationBuilder};
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_textbook_reduction() {
        init();
        let reduced = reduce(textbook_boundary());

        let expected = array![
            [0u8, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        ];
        assert_eq!(reduced.to_dense(), expected);

        let lows: Vec<Option<usize>> = (0..11).map(|j| reduced.low(j)).collect();
        assert_eq!(
            lows,
            vec![None, None, None, None, Some(2), Some(3), Some(1), None, None, Some(8), Some(7)]
        );
        assert_eq!(reduced.pivot_column(8), Some(9));
        assert_eq!(reduced.pivot_column(0), None);
        assert_eq!(reduced.n_pivots(), 5);
        assert!(reduced.has_unique_lows());
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let once = reduce(textbook_boundary());
        let twice = reduce(once.clone().into_matrix());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_and_empty_matrices() {
        let reduced = reduce(BoundaryMatrix::zeros(4));
        assert_eq!(reduced.n_pivots(), 0);
        assert!((0..4).all(|j| reduced.is_zero_column(j)));

        let empty = reduce(BoundaryMatrix::zeros(0));
        assert!(empty.is_empty());
        assert!(empty.has_unique_lows());
    }

    #[test]
    #[should_panic(expected = "strictly upper triangular")]
    fn test_rejects_lower_triangular_input() {
        let matrix = BoundaryMatrix::from_columns(vec![vec![1], vec![]]).unwrap();
        reduce(matrix);
    }

    #[test]
    fn test_random_complexes_reduce_with_unique_lows() {
        init();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..4 {
            let points = Array2::from_shape_fn((14, 3), |_| rng.gen_range(-1.0..1.0));
            let dm = DistanceMatrix::euclidean(&points).unwrap();
            let complex = FiltrationBuilder::new(3).build(&dm).unwrap();
            let (boundary, _) = assemble(&complex).unwrap();

            let reduced = reduce(boundary.clone());
            assert!(reduced.has_unique_lows());

            // Columns only absorb earlier columns: lows never move down and
            // the result stays strictly upper triangular
            assert!(reduced.matrix().is_strictly_upper_triangular());
            for j in 0..boundary.len() {
                match (boundary.low(j), reduced.low(j)) {
                    (None, after) => assert_eq!(after, None),
                    (Some(before), Some(after)) => assert!(after <= before),
                    (Some(_), None) => {}
                }
            }

            let twice = reduce(reduced.clone().into_matrix());
            assert_eq!(twice, reduced);
        }
    }
}
