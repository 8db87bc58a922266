//! Metric Module: Distances Between Points
//!
//! Produces the [`DistanceMatrix`] that drives the filtration:
//! - plain Euclidean distances (classic Vietoris-Rips)
//! - mutual reachability distances, which smooth the metric by local
//!   density through k-nearest-neighbour core distances
//!
//! Both are computed in parallel across points.

mod distance;
mod mutual_reachability;

pub use distance::{euclidean, DistanceMatrix};
pub use mutual_reachability::{core_distances, mutual_reachability};
