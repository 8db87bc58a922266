//! # mr-persistence
//!
//! Persistent homology of point clouds over GF(2), using a Vietoris-Rips
//! filtration built on the mutual reachability metric.
//!
//! ## Pipeline
//!
//! 1. **Metric**: pairwise Euclidean distances, adjusted by k-nearest
//!    neighbour core distances (mutual reachability) so that sparse
//!    regions enter the filtration late
//!
//! 2. **Filtration**: sweep the distinct distances in increasing order and
//!    add every clique of the neighbourhood graph up to a maximum
//!    dimension, giving each simplex an id in order of appearance
//!
//! 3. **Boundary matrix**: column j lists the faces of simplex j; entries
//!    live in Z/2Z
//!
//! 4. **Reduction**: the standard column algorithm, leaving every non-zero
//!    column with a distinct lowest row
//!
//! 5. **Pairs**: zero columns give births, pivots give deaths, and the
//!    filtration values turn index pairs into a barcode
//!
//! ```no_run
//! use mr_persistence::{PersistenceConfig, PersistencePipeline};
//! use ndarray::array;
//!
//! let points = array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! let pipeline = PersistencePipeline::new(PersistenceConfig::default().with_k(1));
//! let output = pipeline.fit(&points).unwrap();
//!
//! for interval in output.barcode.dim(1) {
//!     println!("H1 [{:.3}, {:.3})", interval.birth, interval.death);
//! }
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Edelsbrunner, Letscher, Zomorodian, "Topological Persistence and
//!   Simplification" (2002)
//! - Campello, Moulavi, Sander, "Density-Based Clustering Based on
//!   Hierarchical Density Estimates" (2013) - mutual reachability

pub mod config;
pub mod error;
pub mod metric;
pub mod pipeline;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use config::PersistenceConfig;
pub use error::{PersistenceError, Result};

// Re-exports from metric
pub use metric::{core_distances, mutual_reachability, DistanceMatrix};

// Re-exports from topology
pub use topology::{
    // Filtration
    FiltrationBuilder,
    FilteredComplex,
    Simplex,
    // Boundary matrix and reduction
    assemble,
    reduce,
    reduce_in_place,
    BoundaryMatrix,
    ReducedMatrix,
    SparseColumn,
    // Pairs and barcode
    extract,
    Barcode,
    BarcodeInterval,
    Death,
    Pairing,
    PersistencePair,
};

pub use pipeline::{PersistenceOutput, PersistencePipeline};
