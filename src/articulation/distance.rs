use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::Category;
use crate::error::ScoringError;

/// Rows and columns follow [`super::Place`] declaration order.
pub const PLACE_DISTANCES: [[u32; 11]; 11] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
    [1, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [2, 1, 0, 1, 2, 3, 4, 5, 6, 7, 8],
    [3, 2, 1, 0, 1, 2, 3, 4, 5, 6, 7],
    [4, 3, 2, 1, 0, 1, 2, 3, 4, 5, 6],
    [5, 4, 3, 2, 1, 0, 1, 2, 3, 4, 5],
    [6, 5, 4, 3, 2, 1, 0, 1, 2, 3, 4],
    [7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 3],
    [8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1],
    [10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Rows and columns follow [`super::Manner`] declaration order.
pub const MANNER_DISTANCES: [[u32; 9]; 9] = [
    [0, 1, 2, 3, 3, 3, 3, 2, 1],
    [1, 0, 1, 2, 2, 3, 3, 3, 2],
    [2, 1, 0, 1, 1, 2, 2, 3, 3],
    [3, 2, 1, 0, 1, 1, 2, 2, 3],
    [3, 2, 1, 1, 0, 2, 1, 2, 3],
    [3, 3, 2, 1, 2, 0, 1, 1, 2],
    [3, 3, 2, 2, 1, 1, 0, 1, 2],
    [2, 3, 3, 2, 2, 1, 1, 0, 1],
    [1, 2, 3, 3, 3, 2, 2, 1, 0],
];

/// Any backness mismatch costs one point.
pub const BACKNESS_DISTANCES: [[u32; 3]; 3] = [[0, 1, 1], [1, 0, 1], [1, 1, 0]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    /// Authored matrix lookup.
    #[default]
    Matrix,
    /// `|index(a) - index(b)|` along the category order.
    IndexDifference,
}

/// Distance lookup for one category dimension.
#[derive(Debug, Clone)]
pub struct DistanceTable<C> {
    matrix: Option<Vec<Vec<u32>>>,
    _category: PhantomData<C>,
}

impl<C: Category> DistanceTable<C> {
    pub fn index_difference() -> Self {
        Self {
            matrix: None,
            _category: PhantomData,
        }
    }

    /// Accepts only square `ORDER.len()` matrices with a zero diagonal that are symmetric.
    pub fn from_matrix(rows: Vec<Vec<u32>>) -> Result<Self, ScoringError> {
        let n = C::ORDER.len();
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(ScoringError::invalid_input(format!(
                "{} distance matrix must be {n}x{n}",
                C::DIMENSION
            )));
        }
        for i in 0..n {
            if rows[i][i] != 0 {
                return Err(ScoringError::invalid_input(format!(
                    "{} distance matrix has non-zero self-distance for {}",
                    C::DIMENSION,
                    C::ORDER[i].code()
                )));
            }
            for j in (i + 1)..n {
                if rows[i][j] != rows[j][i] {
                    return Err(ScoringError::invalid_input(format!(
                        "{} distance matrix is asymmetric at ({}, {})",
                        C::DIMENSION,
                        C::ORDER[i].code(),
                        C::ORDER[j].code()
                    )));
                }
            }
        }
        Ok(Self {
            matrix: Some(rows),
            _category: PhantomData,
        })
    }

    pub fn from_authored<const N: usize>(authored: &[[u32; N]; N]) -> Result<Self, ScoringError> {
        Self::from_matrix(authored.iter().map(|row| row.to_vec()).collect())
    }

    /// Matrix mode uses `authored`; index mode ignores it.
    pub fn with_mode<const N: usize>(
        mode: DistanceMode,
        authored: &[[u32; N]; N],
    ) -> Result<Self, ScoringError> {
        match mode {
            DistanceMode::Matrix => Self::from_authored(authored),
            DistanceMode::IndexDifference => Ok(Self::index_difference()),
        }
    }

    pub fn mode(&self) -> DistanceMode {
        if self.matrix.is_some() {
            DistanceMode::Matrix
        } else {
            DistanceMode::IndexDifference
        }
    }

    pub fn lookup(&self, a: C, b: C) -> u32 {
        match &self.matrix {
            // from_matrix guarantees ORDER.len() rows and columns
            Some(matrix) => matrix[a.index()][b.index()],
            None => a.index().abs_diff(b.index()) as u32,
        }
    }

    /// Largest distance any pair of categories can incur.
    pub fn max_distance(&self) -> u32 {
        C::ORDER
            .iter()
            .flat_map(|&a| C::ORDER.iter().map(move |&b| (a, b)))
            .map(|(a, b)| self.lookup(a, b))
            .max()
            .unwrap_or(0)
    }
}

/// Distance between two categories of the same dimension.
pub fn distance<C: Category>(table: &DistanceTable<C>, a: C, b: C) -> u32 {
    table.lookup(a, b)
}
