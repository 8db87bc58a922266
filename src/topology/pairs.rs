//! Persistence Pairs
//!
//! Reading the reduced matrix column by column:
//! - a zero column j creates a class (birth at j)
//! - a non-zero column j with low(j) = i kills the class born at i
//!
//! Classes never killed are essential and live forever.

use log::debug;

use super::barcode::{Barcode, BarcodeInterval};
use super::reduction::ReducedMatrix;
use crate::error::{PersistenceError, Result};

/// Where a class dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Death {
    /// Killed by the simplex with this id
    Finite(usize),
    /// Never killed
    Essential,
}

impl Death {
    pub fn is_essential(&self) -> bool {
        matches!(self, Death::Essential)
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Death::Finite(j) => Some(*j),
            Death::Essential => None,
        }
    }
}

/// A homology class in filtration-index terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersistencePair {
    pub birth: usize,
    pub death: Death,
    pub dimension: usize,
}

impl PersistencePair {
    pub fn new(birth: usize, death: Death, dimension: usize) -> Self {
        Self { birth, death, dimension }
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_essential()
    }
}

/// Pairs read off a reduced matrix, plus the barcode when filtration
/// values were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairing {
    /// One pair per zero column, in birth order
    pub pairs: Vec<PersistencePair>,
    pub barcode: Option<Barcode>,
}

/// Extract persistence pairs from a reduced boundary matrix.
///
/// `dimensions[j]` is the dimension of simplex j; `birth_values[j]`, when
/// given, is its filtration value and turns the pairs into a barcode.
pub fn extract(
    reduced: &ReducedMatrix,
    dimensions: &[usize],
    birth_values: Option<&[f64]>,
) -> Result<Pairing> {
    let n = reduced.len();
    check_len("dimensions", n, dimensions.len())?;
    if let Some(values) = birth_values {
        check_len("birth values", n, values.len())?;
    }

    // Position in `pairs` of the class born at each index
    let mut born_at: Vec<Option<usize>> = vec![None; n];
    let mut pairs: Vec<PersistencePair> = Vec::new();

    for j in 0..n {
        match reduced.low(j) {
            None => {
                born_at[j] = Some(pairs.len());
                pairs.push(PersistencePair::new(j, Death::Essential, dimensions[j]));
            }
            Some(i) => {
                // low(j) < j, so column i has already been read. For a true
                // boundary matrix (∂∂ = 0) a pivot row is always a zero column.
                let pos = born_at[i].ok_or(PersistenceError::NotABirth { column: j, row: i })?;
                pairs[pos].death = Death::Finite(j);
            }
        }
    }

    let barcode = birth_values.map(|values| {
        Barcode::new(
            pairs
                .iter()
                .map(|p| BarcodeInterval {
                    birth: values[p.birth],
                    death: p.death.index().map_or(f64::INFINITY, |d| values[d]),
                    dimension: p.dimension,
                })
                .collect(),
        )
    });

    debug!(
        "Extracted {} pairs ({} essential) from {} columns",
        pairs.len(),
        pairs.iter().filter(|p| p.is_essential()).count(),
        n
    );

    Ok(Pairing { pairs, barcode })
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(PersistenceError::LengthMismatch { what, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{textbook_boundary, TEXTBOOK_DIMENSIONS};
    use crate::topology::reduce;
    use std::collections::HashSet;

    #[test]
    fn test_textbook_pairs() {
        let reduced = reduce(textbook_boundary());
        let pairing = extract(&reduced, &TEXTBOOK_DIMENSIONS, None).unwrap();

        let got: HashSet<PersistencePair> = pairing.pairs.iter().copied().collect();
        let expected: HashSet<PersistencePair> = [
            PersistencePair::new(0, Death::Essential, 0),
            PersistencePair::new(2, Death::Finite(4), 0),
            PersistencePair::new(3, Death::Finite(5), 0),
            PersistencePair::new(1, Death::Finite(6), 0),
            PersistencePair::new(8, Death::Finite(9), 1),
            PersistencePair::new(7, Death::Finite(10), 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(got, expected);
        assert_eq!(pairing.pairs.len(), 6);
        assert!(pairing.barcode.is_none());
    }

    #[test]
    fn test_every_index_accounted_for_once() {
        let reduced = reduce(textbook_boundary());
        let pairing = extract(&reduced, &TEXTBOOK_DIMENSIONS, None).unwrap();

        let mut seen = vec![0usize; reduced.len()];
        for pair in &pairing.pairs {
            seen[pair.birth] += 1;
            if let Some(d) = pair.death.index() {
                seen[d] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));

        let zero_columns = (0..reduced.len()).filter(|&j| reduced.is_zero_column(j)).count();
        assert_eq!(pairing.pairs.len(), zero_columns);
    }

    #[test]
    fn test_barcode_substitutes_values() {
        let reduced = reduce(textbook_boundary());
        let values = [0.0, 0.0, 0.0, 0.0, 1.0, 1.5, 2.0, 2.0, 2.5, 3.0, 4.0];
        let pairing = extract(&reduced, &TEXTBOOK_DIMENSIONS, Some(&values)).unwrap();
        let barcode = pairing.barcode.unwrap();

        assert_eq!(barcode.len(), pairing.pairs.len());
        for (pair, interval) in pairing.pairs.iter().zip(barcode.intervals()) {
            assert_eq!(interval.birth, values[pair.birth]);
            assert_eq!(interval.dimension, pair.dimension);
            match pair.death {
                Death::Finite(d) => assert_eq!(interval.death, values[d]),
                Death::Essential => assert!(interval.death.is_infinite()),
            }
        }

        // The 1-cycle born by edge 7 at 2.0 is filled by triangle 10 at 4.0
        let h1 = barcode.dim(1);
        assert!(h1.iter().any(|i| i.birth == 2.0 && i.death == 4.0));
    }

    #[test]
    fn test_length_mismatch() {
        let reduced = reduce(textbook_boundary());
        assert_eq!(
            extract(&reduced, &[0, 0, 0], None),
            Err(PersistenceError::LengthMismatch {
                what: "dimensions",
                expected: 11,
                actual: 3
            })
        );
        assert!(extract(&reduced, &TEXTBOOK_DIMENSIONS, Some(&[0.0; 4])).is_err());
    }

    #[test]
    fn test_non_boundary_matrix_is_rejected() {
        // Column 2 has low 1, but column 1 is not a zero column
        let matrix = crate::topology::BoundaryMatrix::from_columns(vec![vec![], vec![0], vec![1]])
            .unwrap();
        let reduced = reduce(matrix);
        assert_eq!(
            extract(&reduced, &[0, 1, 2], None),
            Err(PersistenceError::NotABirth { column: 2, row: 1 })
        );
    }
}
