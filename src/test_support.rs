//! Shared test fixtures

use std::sync::Once;

use ndarray::array;

use crate::topology::BoundaryMatrix;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("debug");

        // don't panic if called multiple times across binaries
        let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
    });
}

/// Dimensions of the textbook complex: four vertices, five edges, two triangles.
pub const TEXTBOOK_DIMENSIONS: [usize; 11] = [0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2];

/// Boundary matrix of the textbook complex
pub fn textbook_boundary() -> BoundaryMatrix {
    let dense = array![
        [0u8, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    ];
    BoundaryMatrix::from_dense(&dense).unwrap()
}
