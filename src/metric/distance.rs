//! Pairwise Distance Matrices
//!
//! The filtration only ever reads `d(i, j)` for `i < j`, but the matrix is
//! stored symmetric so callers can index it either way round.

use ndarray::{Array2, ArrayView1, Zip};

use crate::error::{PersistenceError, Result};

/// Symmetric, zero-diagonal matrix of non-negative distances.
///
/// Off-diagonal entries may be `+∞` (the pair never connects); NaN and
/// negative values are rejected at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// Wrap a precomputed matrix.
    ///
    /// Only the strict upper triangle is read; it is mirrored into the lower
    /// triangle and the diagonal is set to zero. This accepts both fully
    /// symmetric input and matrices that only populate `i < j`.
    pub fn from_array(distances: Array2<f64>) -> Result<Self> {
        let (rows, cols) = distances.dim();
        if rows != cols {
            return Err(PersistenceError::NotSquare { rows, cols });
        }

        let mut out = distances;
        for i in 0..rows {
            out[[i, i]] = 0.0;
            for j in i + 1..rows {
                let value = out[[i, j]];
                if value.is_nan() || value < 0.0 {
                    return Err(PersistenceError::InvalidDistance { row: i, col: j, value });
                }
                // -0.0 sorts before 0.0 under total_cmp
                let value = if value == 0.0 { 0.0 } else { value };
                out[[i, j]] = value;
                out[[j, i]] = value;
            }
        }

        Ok(Self { distances: out })
    }

    /// Euclidean distance matrix of a point cloud (one point per row).
    pub fn euclidean(points: &Array2<f64>) -> Result<Self> {
        check_points(points)?;
        Ok(Self {
            distances: euclidean_matrix(points),
        })
    }

    /// Internal constructor for matrices that are valid by construction.
    pub(crate) fn from_valid(distances: Array2<f64>) -> Self {
        debug_assert!(distances.is_square());
        Self { distances }
    }

    /// Distance between points `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    /// Number of points the matrix is defined over.
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.distances
    }

    /// Sorted, deduplicated finite values over the strict upper triangle.
    ///
    /// These are the radii swept by the filtration.
    pub fn distinct_radii(&self) -> Vec<f64> {
        let n = self.n_points();
        let mut radii: Vec<f64> = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in i + 1..n {
                let d = self.distances[[i, j]];
                if d.is_finite() {
                    radii.push(d);
                }
            }
        }
        radii.sort_by(f64::total_cmp);
        radii.dedup();
        radii
    }

    /// Largest finite off-diagonal distance, 0 when there is none.
    pub fn max_finite(&self) -> f64 {
        self.distinct_radii().last().copied().unwrap_or(0.0)
    }
}

/// Euclidean distance between two points
#[inline]
pub fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Full pairwise Euclidean matrix, filled in parallel.
pub(crate) fn euclidean_matrix(points: &Array2<f64>) -> Array2<f64> {
    let n = points.nrows();
    let mut dm = Array2::<f64>::zeros((n, n));

    Zip::indexed(&mut dm).par_for_each(|(i, j), d| {
        if i != j {
            *d = euclidean(points.row(i), points.row(j));
        }
    });

    dm
}

/// Reject empty clouds and non-finite coordinates.
pub(crate) fn check_points(points: &Array2<f64>) -> Result<()> {
    if points.nrows() == 0 {
        return Err(PersistenceError::EmptyPointSet);
    }
    for (row, point) in points.outer_iter().enumerate() {
        if point.iter().any(|x| !x.is_finite()) {
            return Err(PersistenceError::NonFinitePoint { row });
        }
    }
    Ok(())
}
