//! End-to-end persistence pipeline
//!
//! points → mutual reachability → filtration → boundary matrix →
//! reduction → persistence pairs and barcode

use log::info;
use ndarray::Array2;

use crate::config::PersistenceConfig;
use crate::error::Result;
use crate::metric::{mutual_reachability, DistanceMatrix};
use crate::topology::{
    assemble, extract, reduce, Barcode, BoundaryMatrix, FilteredComplex, FiltrationBuilder,
    PersistencePair, ReducedMatrix,
};

/// Everything computed for one point cloud.
#[derive(Debug, Clone)]
pub struct PersistenceOutput {
    pub complex: FilteredComplex,
    pub boundary: BoundaryMatrix,
    /// Dimension of every column of `boundary`
    pub dimensions: Vec<usize>,
    pub reduced: ReducedMatrix,
    pub pairs: Vec<PersistencePair>,
    pub barcode: Barcode,
}

/// Runs the full computation with one configuration.
#[derive(Debug, Clone, Default)]
pub struct PersistencePipeline {
    config: PersistenceConfig,
}

impl PersistencePipeline {
    pub fn new(config: PersistenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Persistence of a point cloud (one point per row) under the mutual
    /// reachability metric.
    pub fn fit(&self, points: &Array2<f64>) -> Result<PersistenceOutput> {
        self.config.validate()?;
        info!(
            "Fitting {} points in {} dimensions (k={}, max_dimension={})",
            points.nrows(),
            points.ncols(),
            self.config.k,
            self.config.max_dimension
        );
        let distances = mutual_reachability(points, self.config.k)?;
        self.run(&distances)
    }

    /// Persistence of a precomputed distance matrix.
    pub fn fit_distances(&self, distances: DistanceMatrix) -> Result<PersistenceOutput> {
        self.config.validate()?;
        info!(
            "Fitting precomputed {}x{} distance matrix (max_dimension={})",
            distances.n_points(),
            distances.n_points(),
            self.config.max_dimension
        );
        self.run(&distances)
    }

    fn run(&self, distances: &DistanceMatrix) -> Result<PersistenceOutput> {
        let mut builder = FiltrationBuilder::new(self.config.max_dimension);
        if let Some(limit) = self.config.max_simplices {
            builder = builder.with_max_simplices(limit);
        }
        let complex = builder.build(distances)?;

        let (boundary, dimensions) = assemble(&complex)?;
        let reduced = reduce(boundary.clone());

        let birth_values = complex.birth_values();
        let pairing = extract(&reduced, &dimensions, Some(&birth_values))?;
        let barcode = pairing.barcode.unwrap_or_default();

        info!(
            "Persistence: {} pairs, {} essential",
            pairing.pairs.len(),
            pairing.pairs.iter().filter(|p| p.is_essential()).count()
        );

        Ok(PersistenceOutput {
            complex,
            boundary,
            dimensions,
            reduced,
            pairs: pairing.pairs,
            barcode,
        })
    }
}
