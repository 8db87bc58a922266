//! Vietoris-Rips Filtration Construction
//!
//! The Vietoris-Rips complex VR_r(X) is the clique (flag) complex of the
//! graph whose edges are the pairs at distance ≤ r:
//! - 0-simplices are the points of X, born at r = 0
//! - a k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ r for all i, j
//!
//! The filtration sweeps r over the distinct pairwise distances. At each
//! radius the new simplices are exactly the cliques that contain one of
//! the edges born at that radius, so they are grown from the new edges
//! through common neighbourhoods instead of re-enumerating every vertex
//! subset.
//!
//! Ordering within a radius: all new edges, then all new triangles, and
//! so on, each dimension in lexicographic vertex order.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, trace};
use rayon::prelude::*;

use super::simplex::FilteredComplex;
use crate::error::{PersistenceError, Result};
use crate::metric::DistanceMatrix;

/// Vietoris-Rips filtration builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiltrationBuilder {
    /// Highest simplex dimension to build
    max_dimension: usize,
    /// Ceiling on the total number of simplices
    max_simplices: Option<usize>,
}

impl FiltrationBuilder {
    pub fn new(max_dimension: usize) -> Self {
        Self {
            max_dimension,
            max_simplices: None,
        }
    }

    /// Fail with [`PersistenceError::ComplexTooLarge`] instead of growing
    /// the complex past `limit` simplices.
    pub fn with_max_simplices(mut self, limit: usize) -> Self {
        self.max_simplices = Some(limit);
        self
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Build the filtered complex of `distances`.
    pub fn build(&self, distances: &DistanceMatrix) -> Result<FilteredComplex> {
        let n = distances.n_points();
        if n == 0 {
            return Err(PersistenceError::EmptyPointSet);
        }
        self.check_budget(0, n)?;

        let mut complex = FilteredComplex::with_vertices(n);
        if self.max_dimension == 0 {
            info!("Filtration: {} vertices, no higher simplices requested", n);
            return Ok(complex);
        }

        let edges = sorted_edges(distances);
        let mut graph = Graph::new(n);
        let mut radii_swept = 0usize;

        let mut start = 0;
        while start < edges.len() {
            let radius = edges[start].0;
            let end = start
                + edges[start..]
                    .iter()
                    .take_while(|(d, _, _)| *d == radius)
                    .count();
            let new_edges: Vec<(usize, usize)> =
                edges[start..end].iter().map(|&(_, a, b)| (a, b)).collect();
            start = end;
            radii_swept += 1;

            self.check_budget(complex.len(), new_edges.len())?;
            graph.begin_step();
            for &(a, b) in &new_edges {
                graph.connect(a, b);
            }

            // Every new clique is emitted once, from the smallest new edge it
            // contains, and counted against the ceiling as it is emitted.
            let mut by_dimension: Vec<Vec<Vec<usize>>> = vec![Vec::new(); self.max_dimension + 1];
            if self.max_dimension >= 2 {
                let budget = Budget::new(self.max_simplices, complex.len() + new_edges.len());
                let found: Vec<Vec<Vec<usize>>> = new_edges
                    .par_iter()
                    .map(|&(a, b)| graph.cofaces_through(a, b, self.max_dimension, &budget))
                    .collect::<Result<_>>()?;
                for simplex in found.into_iter().flatten() {
                    let dim = simplex.len() - 1;
                    by_dimension[dim].push(simplex);
                }
                for simplices in &mut by_dimension {
                    simplices.sort_unstable();
                }
            }

            let n_new = new_edges.len() + by_dimension.iter().map(Vec::len).sum::<usize>();

            for (a, b) in new_edges.iter().copied() {
                trace!("r={:.6}: edge [{}, {}]", radius, a, b);
                complex.insert_unchecked(vec![a, b], radius);
            }
            for simplices in by_dimension.into_iter().skip(2) {
                for vertices in simplices {
                    trace!("r={:.6}: {}-simplex {:?}", radius, vertices.len() - 1, vertices);
                    complex.insert_unchecked(vertices, radius);
                }
            }

            debug!(
                "Radius {:.6}: +{} simplices ({} edges), total {}",
                radius,
                n_new,
                new_edges.len(),
                complex.len()
            );
        }

        info!(
            "Filtration: {} simplices over {} radii ({})",
            complex.len(),
            radii_swept,
            (0..=self.max_dimension)
                .map(|d| format!("dim {}: {}", d, complex.count_in_dimension(d)))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(complex)
    }

    fn check_budget(&self, current: usize, adding: usize) -> Result<()> {
        match self.max_simplices {
            Some(limit) if current + adding > limit => {
                Err(PersistenceError::ComplexTooLarge { limit })
            }
            _ => Ok(()),
        }
    }
}

/// All pairs `i < j` at distance ≤ `radius`.
pub fn edges_within(distances: &DistanceMatrix, radius: f64) -> Vec<(usize, usize)> {
    let n = distances.n_points();
    let mut edges = Vec::new();

    for i in 0..n {
        for j in i + 1..n {
            if distances.get(i, j) <= radius {
                edges.push((i, j));
            }
        }
    }

    edges
}

/// Finite edges sorted by (distance, i, j).
fn sorted_edges(distances: &DistanceMatrix) -> Vec<(f64, usize, usize)> {
    let n = distances.n_points();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            let d = distances.get(i, j);
            if d.is_finite() {
                edges.push((d, i, j));
            }
        }
    }
    edges.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)).then(x.2.cmp(&y.2)));
    edges
}

/// Simplices still allowed in the current radius step, shared by the
/// parallel enumeration.
struct Budget {
    limit: Option<usize>,
    remaining: usize,
    taken: AtomicUsize,
}

impl Budget {
    fn new(limit: Option<usize>, used: usize) -> Self {
        Self {
            limit,
            remaining: limit.map_or(usize::MAX, |l| l.saturating_sub(used)),
            taken: AtomicUsize::new(0),
        }
    }

    /// Claim one simplex, failing once the ceiling is crossed.
    fn take(&self) -> Result<()> {
        match self.limit {
            Some(limit) if self.taken.fetch_add(1, Ordering::Relaxed) >= self.remaining => {
                Err(PersistenceError::ComplexTooLarge { limit })
            }
            _ => Ok(()),
        }
    }
}

/// Growing neighbourhood graph of the current radius.
///
/// Each pair remembers the sweep step that connected it (0 = not
/// connected), which tells the edges of the current radius apart.
struct Graph {
    n: usize,
    step: u32,
    connected_at: Vec<u32>,
    neighbours: Vec<Vec<usize>>,
}

impl Graph {
    fn new(n: usize) -> Self {
        Self {
            n,
            step: 0,
            connected_at: vec![0; n * n],
            neighbours: vec![Vec::new(); n],
        }
    }

    fn begin_step(&mut self) {
        self.step += 1;
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.connected_at[a * self.n + b] = self.step;
        self.connected_at[b * self.n + a] = self.step;
        self.neighbours[a].push(b);
        self.neighbours[b].push(a);
    }

    #[inline]
    fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.connected_at[a * self.n + b] != 0
    }

    /// Pair (x, y) is an edge of the current step ordered before `edge`.
    #[inline]
    fn precedes(&self, x: usize, y: usize, edge: (usize, usize)) -> bool {
        self.connected_at[x * self.n + y] == self.step && (x.min(y), x.max(y)) < edge
    }

    /// Every clique of dimension 2..=max_dimension whose smallest edge of
    /// the current step is (a, b), as sorted vertex tuples.
    fn cofaces_through(
        &self,
        a: usize,
        b: usize,
        max_dimension: usize,
        budget: &Budget,
    ) -> Result<Vec<Vec<usize>>> {
        let (small, other) = if self.neighbours[a].len() <= self.neighbours[b].len() {
            (a, b)
        } else {
            (b, a)
        };
        let mut common: Vec<usize> = self.neighbours[small]
            .iter()
            .copied()
            .filter(|&c| {
                c != other
                    && self.is_adjacent(c, other)
                    && !self.precedes(c, a, (a, b))
                    && !self.precedes(c, b, (a, b))
            })
            .collect();
        common.sort_unstable();

        let mut found = Vec::new();
        let mut extra = Vec::with_capacity(max_dimension - 1);
        self.grow(&mut extra, &common, max_dimension - 1, (a, b), budget, &mut found)?;
        Ok(found)
    }

    /// Extend `extra` by candidates in increasing order; every candidate is
    /// adjacent to a, b and all of `extra`, and none of those pairs is a
    /// current edge smaller than (a, b).
    fn grow(
        &self,
        extra: &mut Vec<usize>,
        candidates: &[usize],
        max_extra: usize,
        edge: (usize, usize),
        budget: &Budget,
        found: &mut Vec<Vec<usize>>,
    ) -> Result<()> {
        for (idx, &c) in candidates.iter().enumerate() {
            budget.take()?;
            extra.push(c);

            let mut vertices = Vec::with_capacity(extra.len() + 2);
            vertices.push(edge.0);
            vertices.push(edge.1);
            vertices.extend_from_slice(extra);
            vertices.sort_unstable();
            found.push(vertices);

            if extra.len() < max_extra {
                let next: Vec<usize> = candidates[idx + 1..]
                    .iter()
                    .copied()
                    .filter(|&x| self.is_adjacent(c, x) && !self.precedes(c, x, edge))
                    .collect();
                if !next.is_empty() {
                    self.grow(extra, &next, max_extra, edge, budget, found)?;
                }
            }

            extra.pop();
        }
        Ok(())
    }
}
