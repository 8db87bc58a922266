//! Simplices and Filtered Complexes
//!
//! A filtered complex is an arena of [`Simplex`] records in filtration
//! order plus a hashed face index (sorted vertex tuple → id). The tuple
//! length already encodes the dimension, so the tuple alone is the key.

use std::collections::HashMap;

use crate::error::{PersistenceError, Result};

/// A simplex of the filtration.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex {
    /// Position in the filtration
    pub id: usize,
    /// 0 = vertex, 1 = edge, 2 = triangle, ...
    pub dimension: usize,
    /// Sorted vertex indices, `dimension + 1` of them
    pub vertices: Vec<usize>,
    /// Radius at which the simplex entered the complex
    pub birth_radius: f64,
}

impl Simplex {
    /// Codimension-1 faces, obtained by dropping one vertex at a time.
    ///
    /// Vertex order is preserved, so each face is already a valid key.
    pub fn faces(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        let vertices = &self.vertices;
        let n_faces = if self.dimension == 0 { 0 } else { vertices.len() };
        (0..n_faces).map(move |skip| {
            vertices
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &v)| v)
                .collect()
        })
    }
}

/// Simplices in filtration order with O(1) face lookup.
///
/// Invariants: ids are dense and equal to positions, birth radii never
/// decrease with id, and every face of a simplex precedes it.
#[derive(Debug, Clone, Default)]
pub struct FilteredComplex {
    simplices: Vec<Simplex>,
    index: HashMap<Vec<usize>, usize>,
    by_dimension: Vec<Vec<usize>>,
    n_points: usize,
}

impl FilteredComplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complex holding one vertex per point, all born at radius 0.
    pub fn with_vertices(n_points: usize) -> Self {
        let mut complex = Self::new();
        for v in 0..n_points {
            complex.insert_unchecked(vec![v], 0.0);
        }
        complex
    }

    /// Append a simplex after validating it against the complex.
    ///
    /// Fails if the vertices are empty or not strictly increasing, if the
    /// simplex is already present, if a face is missing, or if `birth`
    /// would break monotonicity of the filtration.
    pub fn push(&mut self, vertices: Vec<usize>, birth: f64) -> Result<usize> {
        if vertices.is_empty() {
            return Err(PersistenceError::InvalidSimplex("no vertices".into()));
        }
        if vertices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PersistenceError::InvalidSimplex(format!(
                "vertices {:?} are not strictly increasing",
                vertices
            )));
        }
        if birth.is_nan() || birth < 0.0 {
            return Err(PersistenceError::InvalidSimplex(format!(
                "birth radius {} is not a valid radius",
                birth
            )));
        }
        if let Some(last) = self.simplices.last() {
            if birth < last.birth_radius {
                return Err(PersistenceError::InvalidSimplex(format!(
                    "birth radius {} precedes {} of simplex {}",
                    birth, last.birth_radius, last.id
                )));
            }
        }
        if self.index.contains_key(&vertices) {
            return Err(PersistenceError::InvalidSimplex(format!(
                "simplex {:?} already present",
                vertices
            )));
        }
        let id = self.simplices.len();
        if vertices.len() > 1 {
            for skip in 0..vertices.len() {
                let face: Vec<usize> = vertices
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v)
                    .collect();
                if !self.index.contains_key(&face) {
                    return Err(PersistenceError::MissingFace { simplex: id, face });
                }
            }
        }
        Ok(self.insert_unchecked(vertices, birth))
    }

    /// Append without validation; callers guarantee the invariants.
    pub(crate) fn insert_unchecked(&mut self, vertices: Vec<usize>, birth: f64) -> usize {
        let id = self.simplices.len();
        let dimension = vertices.len() - 1;

        if dimension == 0 {
            self.n_points = self.n_points.max(vertices[0] + 1);
        }
        if self.by_dimension.len() <= dimension {
            self.by_dimension.resize_with(dimension + 1, Vec::new);
        }
        self.by_dimension[dimension].push(id);
        self.index.insert(vertices.clone(), id);
        self.simplices.push(Simplex {
            id,
            dimension,
            vertices,
            birth_radius: birth,
        });
        id
    }

    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Number of points spanned by the vertex set
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Look up a simplex by its sorted vertex tuple.
    pub fn find(&self, vertices: &[usize]) -> Option<&Simplex> {
        self.id_of(vertices).map(|id| &self.simplices[id])
    }

    pub fn id_of(&self, vertices: &[usize]) -> Option<usize> {
        self.index.get(vertices).copied()
    }

    pub fn contains(&self, vertices: &[usize]) -> bool {
        self.index.contains_key(vertices)
    }

    /// Ids of all simplices of dimension `d`, in filtration order.
    pub fn ids_in_dimension(&self, d: usize) -> &[usize] {
        self.by_dimension.get(d).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_in_dimension(&self, d: usize) -> usize {
        self.ids_in_dimension(d).len()
    }

    /// Highest dimension present, `None` for an empty complex.
    pub fn max_dimension(&self) -> Option<usize> {
        self.by_dimension.iter().rposition(|ids| !ids.is_empty())
    }

    /// Filtration value of every simplex, indexed by id.
    pub fn birth_values(&self) -> Vec<f64> {
        self.simplices.iter().map(|s| s.birth_radius).collect()
    }

    /// Dimension of every simplex, indexed by id.
    pub fn dimensions(&self) -> Vec<usize> {
        self.simplices.iter().map(|s| s.dimension).collect()
    }

    /// Check that birth radii never decrease along the filtration.
    pub fn is_monotone(&self) -> bool {
        self.simplices
            .windows(2)
            .all(|w| w[0].birth_radius <= w[1].birth_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faces_preserve_order() {
        let triangle = Simplex {
            id: 0,
            dimension: 2,
            vertices: vec![1, 4, 7],
            birth_radius: 0.0,
        };
        let faces: Vec<_> = triangle.faces().collect();
        assert_eq!(faces, vec![vec![4, 7], vec![1, 7], vec![1, 4]]);

        let vertex = Simplex {
            id: 0,
            dimension: 0,
            vertices: vec![3],
            birth_radius: 0.0,
        };
        assert_eq!(vertex.faces().count(), 0);
    }

    #[test]
    fn test_push_builds_index() {
        let mut complex = FilteredComplex::with_vertices(3);
        assert_eq!(complex.push(vec![0, 1], 1.0).unwrap(), 3);
        assert_eq!(complex.push(vec![1, 2], 1.0).unwrap(), 4);
        assert_eq!(complex.push(vec![0, 2], 2.0).unwrap(), 5);
        assert_eq!(complex.push(vec![0, 1, 2], 2.0).unwrap(), 6);

        assert_eq!(complex.len(), 7);
        assert_eq!(complex.n_points(), 3);
        assert_eq!(complex.id_of(&[1, 2]), Some(4));
        assert!(complex.contains(&[0, 2]));
        assert!(!complex.contains(&[2, 0]));
        assert_eq!(complex.find(&[0, 1, 2]).map(|s| s.dimension), Some(2));
        assert_eq!(complex.ids_in_dimension(1), &[3, 4, 5]);
        assert_eq!(complex.max_dimension(), Some(2));
        assert_eq!(complex.birth_values(), vec![0.0, 0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        assert!(complex.is_monotone());
    }

    #[test]
    fn test_push_rejects_invalid_simplices() {
        let mut complex = FilteredComplex::with_vertices(3);
        complex.push(vec![0, 1], 1.0).unwrap();

        assert!(matches!(
            complex.push(vec![0, 1, 2], 1.0),
            Err(PersistenceError::MissingFace { .. })
        ));
        assert!(matches!(
            complex.push(vec![1, 0], 1.0),
            Err(PersistenceError::InvalidSimplex(_))
        ));
        assert!(matches!(
            complex.push(vec![0, 1], 1.0),
            Err(PersistenceError::InvalidSimplex(_))
        ));
        assert!(matches!(
            complex.push(vec![1, 2], 0.5),
            Err(PersistenceError::InvalidSimplex(_))
        ));
        assert!(complex.push(vec![], 2.0).is_err());
    }

    #[test]
    fn test_empty_complex() {
        let complex = FilteredComplex::new();
        assert!(complex.is_empty());
        assert_eq!(complex.max_dimension(), None);
        assert!(complex.ids_in_dimension(4).is_empty());
    }
}
