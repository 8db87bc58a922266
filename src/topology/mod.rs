//! Topology Module: Filtered Complexes and Persistent Homology
//!
//! Implements the pipeline from a distance matrix to persistence pairs:
//! - Vietoris-Rips filtration over the distinct pairwise distances
//! - GF(2) boundary matrix assembly
//! - boundary matrix reduction (standard algorithm)
//! - persistence pair and barcode extraction
//!
//! ## Mathematical Background
//!
//! For a point cloud X we build the nested sequence of complexes VR_r(X)
//! indexed by the scale r. Each simplex gets an id in the order it enters
//! the filtration, which makes the boundary matrix strictly upper
//! triangular. Reducing it over Z/2Z pairs every simplex that kills a
//! homology class with the simplex that created it; unpaired creators are
//! essential classes.

mod barcode;
mod boundary;
mod filtration;
mod pairs;
mod reduction;
mod simplex;

pub use barcode::{Barcode, BarcodeInterval};
pub use boundary::{assemble, BoundaryMatrix, SparseColumn};
pub use filtration::{edges_within, FiltrationBuilder};
pub use pairs::{extract, Death, Pairing, PersistencePair};
pub use reduction::{reduce, reduce_in_place, ReducedMatrix};
pub use simplex::{FilteredComplex, Simplex};
