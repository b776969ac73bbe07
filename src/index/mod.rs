//! In-memory similarity index over encoded place records.
//!
//! Exact inner-product search: every query scans the full catalog, so with
//! unit-normalized vectors scores are cosine similarities in [-1, 1].
//! The index is immutable once built; there is no incremental insert or
//! delete.


use tracing::debug;

use crate::catalog::PlaceRecord;
use crate::{PlannerError, Result};

/// Immutable vector index over the place catalog.
#[derive(Debug)]
pub struct PlaceIndex {
    records: Vec<PlaceRecord>,
    vectors: Vec<Vec<f32>>,
    dimension: Option<usize>,
}

/// One ranked search hit: a catalog record and its similarity score.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub place: &'a PlaceRecord,
    pub score: f32,
}

impl PlaceIndex {
    /// Build the index from records and their embedding vectors, 1:1.
    ///
    /// Every vector must share one dimension; a mismatch is fatal at build
    /// ([`PlannerError::DimensionMismatch`]). An empty catalog builds an
    /// empty index whose searches return nothing.
    #[inline]
    pub fn build(records: Vec<PlaceRecord>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if records.len() != vectors.len() {
            return Err(PlannerError::Encoding(format!(
                "Encoder returned {} vectors for {} records",
                vectors.len(),
                records.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len);
        if let Some(expected) = dimension {
            for vector in &vectors {
                if vector.len() != expected {
                    return Err(PlannerError::DimensionMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }
            }
        }

        debug!(
            "Built place index: {} records, dimension {:?}",
            records.len(),
            dimension
        );

        Ok(Self {
            records,
            vectors,
            dimension,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    /// Top-k records by inner-product similarity to the query vector.
    ///
    /// Results are ordered by non-increasing score; equal scores keep
    /// catalog insertion order. `k` greater than the catalog size clamps
    /// silently; `k == 0` yields an empty result.
    #[inline]
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit<'_>>> {
        if k == 0 || self.records.is_empty() {
            return Ok(Vec::new());
        }

        let dimension = self.dimension.unwrap_or(0);
        if query.len() != dimension {
            return Err(PlannerError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .records
            .iter()
            .zip(self.vectors.iter())
            .map(|(place, vector)| SearchHit {
                place,
                score: dot(query, vector),
            })
            .collect();

        // Stable sort keeps insertion order for tied scores.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k.min(self.records.len()));

        Ok(hits)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
