//! Boundary Matrix over GF(2)
//!
//! Column j holds the codimension-1 faces of simplex j. With Z/2Z
//! coefficients every entry is 0 or 1 and column addition is symmetric
//! difference, so columns are stored sparsely as sets of row indices.

use std::collections::BTreeSet;

use log::info;
use ndarray::Array2;

use super::simplex::FilteredComplex;
use crate::error::{PersistenceError, Result};

/// One column of a GF(2) matrix, held as the set of rows equal to 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseColumn {
    /// Ordered so that `low` is the last element
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    pub fn new() -> Self {
        Self { rows: BTreeSet::new() }
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut column = Self::new();
        for row in indices {
            column.toggle(row);
        }
        column
    }

    pub fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest row equal to 1, `None` for a zero column.
    pub fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    /// Flip a single entry (add 1 mod 2).
    pub fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    /// `self += other` over Z/2Z.
    pub fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }

    /// Non-zero rows in increasing order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn nnz(&self) -> usize {
        self.rows.len()
    }
}

/// Square GF(2) matrix indexed by simplex id on both axes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryMatrix {
    columns: Vec<SparseColumn>,
}

impl BoundaryMatrix {
    /// All-zero `n × n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            columns: vec![SparseColumn::new(); n],
        }
    }

    /// Build from the non-zero rows of each column.
    ///
    /// Repeated rows cancel (mod 2). Rows outside the matrix are rejected.
    pub fn from_columns(columns: Vec<Vec<usize>>) -> Result<Self> {
        let n = columns.len();
        let mut out = Vec::with_capacity(n);
        for (j, rows) in columns.into_iter().enumerate() {
            if let Some(&row) = rows.iter().find(|&&r| r >= n) {
                return Err(PersistenceError::RowOutOfRange { row, col: j, size: n });
            }
            out.push(SparseColumn::from_indices(rows));
        }
        Ok(Self { columns: out })
    }

    /// Build from a dense 0/1 matrix.
    pub fn from_dense(dense: &Array2<u8>) -> Result<Self> {
        let (rows, cols) = dense.dim();
        if rows != cols {
            return Err(PersistenceError::NotSquare { rows, cols });
        }

        let mut columns = vec![SparseColumn::new(); cols];
        for ((row, col), &value) in dense.indexed_iter() {
            match value {
                0 => {}
                1 => columns[col].toggle(row),
                _ => return Err(PersistenceError::NonBinaryEntry { row, col, value }),
            }
        }
        Ok(Self { columns })
    }

    /// Dense 0/1 copy, mainly for inspection and small fixtures.
    pub fn to_dense(&self) -> Array2<u8> {
        let n = self.len();
        let mut dense = Array2::<u8>::zeros((n, n));
        for (j, column) in self.columns.iter().enumerate() {
            for i in column.rows() {
                dense[[i, j]] = 1;
            }
        }
        dense
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, j: usize) -> &SparseColumn {
        &self.columns[j]
    }

    pub fn columns(&self) -> &[SparseColumn] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [SparseColumn] {
        &mut self.columns
    }

    /// Entry (i, j)
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.columns[j].contains(i)
    }

    /// Largest non-zero row of column j, `None` for a zero column.
    pub fn low(&self, j: usize) -> Option<usize> {
        self.columns[j].low()
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.columns.iter().map(SparseColumn::nnz).sum()
    }

    /// Every non-zero entry (i, j) has i < j.
    pub fn is_strictly_upper_triangular(&self) -> bool {
        self.columns
            .iter()
            .enumerate()
            .all(|(j, column)| column.low().map_or(true, |low| low < j))
    }
}

/// Boundary matrix of a filtered complex and the dimension of each column.
///
/// Faces are resolved through the complex's hashed index, so assembly is
/// linear in the number of (simplex, face) incidences.
pub fn assemble(complex: &FilteredComplex) -> Result<(BoundaryMatrix, Vec<usize>)> {
    let mut matrix = BoundaryMatrix::zeros(complex.len());

    for simplex in complex.simplices() {
        for face in simplex.faces() {
            let face_id = complex
                .id_of(&face)
                .ok_or_else(|| PersistenceError::MissingFace {
                    simplex: simplex.id,
                    face: face.clone(),
                })?;
            matrix.columns[simplex.id].toggle(face_id);
        }
    }

    let dimensions = complex.dimensions();
    info!(
        "Boundary matrix: {}x{} with {} non-zeros",
        matrix.len(),
        matrix.len(),
        matrix.nnz()
    );
    debug_assert!(matrix.is_strictly_upper_triangular());

    Ok((matrix, dimensions))
}
