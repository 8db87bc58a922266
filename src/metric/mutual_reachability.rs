//! Mutual Reachability Distance
//!
//! Density-aware metric used by HDBSCAN-style methods:
//!
//!   d_mr(a, b) = max(core_k(a), core_k(b), ‖a - b‖)
//!
//! where core_k(p) is the distance from p to its k-th nearest neighbour.
//! Points in sparse regions are pushed away from everything else, so
//! isolated noise points enter the filtration late.

use log::debug;
use ndarray::{Array1, Array2, Zip};
use rayon::prelude::*;

use super::distance::{check_points, euclidean_matrix, DistanceMatrix};
use crate::error::{PersistenceError, Result};

/// Core distance of every point: the k-th smallest distance to another point.
///
/// With fewer than `k` other points the farthest available neighbour is
/// used, and a lone point has core distance 0.
pub fn core_distances(points: &Array2<f64>, k: usize) -> Result<Array1<f64>> {
    check_k(k)?;
    check_points(points)?;
    let euclid = euclidean_matrix(points);
    Ok(core_distances_from(&euclid, k))
}

/// Mutual reachability distance matrix of a point cloud (one point per row).
pub fn mutual_reachability(points: &Array2<f64>, k: usize) -> Result<DistanceMatrix> {
    check_k(k)?;
    check_points(points)?;

    let n = points.nrows();
    let euclid = euclidean_matrix(points);
    let core = core_distances_from(&euclid, k);
    debug!(
        "Core distances for {} points (k={}): max {:.4}",
        n,
        k,
        core.iter().cloned().fold(0.0, f64::max)
    );

    let mut mr = Array2::<f64>::zeros((n, n));
    Zip::indexed(&mut mr).par_for_each(|(i, j), d| {
        if i != j {
            *d = core[i].max(core[j]).max(euclid[[i, j]]);
        }
    });

    Ok(DistanceMatrix::from_valid(mr))
}

fn core_distances_from(euclid: &Array2<f64>, k: usize) -> Array1<f64> {
    let n = euclid.nrows();
    let core: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut others: Vec<f64> = (0..n)
                .filter(|&j| j != i)
                .map(|j| euclid[[i, j]])
                .collect();
            if others.is_empty() {
                return 0.0;
            }
            let kth = k.min(others.len()) - 1;
            let (_, value, _) = others.select_nth_unstable_by(kth, f64::total_cmp);
            *value
        })
        .collect();
    Array1::from(core)
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(PersistenceError::InvalidConfig(
            "k nearest neighbours must be at least 1".into(),
        ));
    }
    Ok(())
}
