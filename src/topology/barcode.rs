//! Barcodes
//!
//! A persistence interval [b, d) records a topological feature that is
//! "born" at filtration radius b and "dies" at radius d; essential
//! features have d = +∞.
//!
//! ## Interpretation
//!
//! - Long-lived features (large d-b) represent robust topological structure
//! - Short-lived features may be noise or transient phenomena

/// A persistence interval [birth, death)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeInterval {
    pub birth: f64,
    pub death: f64,
    pub dimension: usize,
}

impl BarcodeInterval {
    pub fn new(birth: f64, death: f64, dimension: usize) -> Self {
        Self { birth, death, dimension }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// Alive at `radius`: birth ≤ radius < death
    pub fn contains(&self, radius: f64) -> bool {
        self.birth <= radius && radius < self.death
    }
}

/// Barcode: collection of intervals across dimensions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Barcode {
    intervals: Vec<BarcodeInterval>,
}

impl Barcode {
    pub fn new(intervals: Vec<BarcodeInterval>) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &[BarcodeInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Highest dimension with an interval
    pub fn max_dimension(&self) -> Option<usize> {
        self.intervals.iter().map(|i| i.dimension).max()
    }

    /// Get all intervals for a given dimension
    pub fn dim(&self, d: usize) -> Vec<&BarcodeInterval> {
        self.intervals.iter().filter(|i| i.dimension == d).collect()
    }

    /// Intervals of dimension d that die, excluding zero-length ones
    pub fn finite_intervals(&self, d: usize) -> Vec<&BarcodeInterval> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && !i.is_essential() && i.persistence() > 0.0)
            .collect()
    }

    /// Number of essential classes in dimension d
    pub fn essential_count(&self, d: usize) -> usize {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && i.is_essential())
            .count()
    }

    /// Betti number β_d of the complex at `radius`
    pub fn betti_at(&self, radius: f64, d: usize) -> usize {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && i.contains(radius))
            .count()
    }

    /// Total persistence in dimension d
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && !i.is_essential())
            .map(|i| i.persistence())
            .sum()
    }

    /// Largest finite death value, if any interval dies
    pub fn max_finite_death(&self) -> Option<f64> {
        self.intervals
            .iter()
            .filter(|i| !i.is_essential())
            .map(|i| i.death)
            .max_by(f64::total_cmp)
    }

    /// Copy with every +∞ death replaced by `max_finite_death + offset`.
    ///
    /// Diagram plots, persistence images and landscapes all need finite
    /// coordinates. When nothing dies, the largest birth stands in for the
    /// maximum death.
    pub fn clip_essential(&self, offset: f64) -> Barcode {
        let ceiling = self
            .max_finite_death()
            .or_else(|| self.intervals.iter().map(|i| i.birth).max_by(f64::total_cmp))
            .unwrap_or(0.0)
            + offset;

        Barcode::new(
            self.intervals
                .iter()
                .map(|i| BarcodeInterval {
                    death: if i.is_essential() { ceiling } else { i.death },
                    ..*i
                })
                .collect(),
        )
    }

    /// `(birth, death, dimension)` rows as a diagram renderer expects them
    pub fn rows(&self) -> Vec<(f64, f64, usize)> {
        self.intervals
            .iter()
            .map(|i| (i.birth, i.death, i.dimension))
            .collect()
    }
}
