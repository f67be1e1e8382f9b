//! Flat (exhaustive, exact) nearest-neighbor index over embedding vectors.

use crate::errors::{KnowledgeError, KnowledgeResult};

/// Exact nearest-neighbor index using squared Euclidean distance.
///
/// Vectors are stored contiguously; the id of a vector is its insertion
/// position. The index is built once and never mutated.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dim: usize,
    data: Vec<f32>,
}

/// A neighbor returned by [`FlatL2Index::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: usize,
    pub distance: f32,
}

impl FlatL2Index {
    /// Build an index from vectors that all share the same dimension.
    pub fn build(vectors: Vec<Vec<f32>>) -> KnowledgeResult<Self> {
        let Some(first) = vectors.first() else {
            return Err(KnowledgeError::EmptyKnowledgeBase);
        };
        let dim = first.len();
        if dim == 0 {
            return Err(KnowledgeError::Embedding(
                "embedding vectors are empty".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(dim * vectors.len());
        for vector in vectors {
            if vector.len() != dim {
                return Err(KnowledgeError::EmbeddingDimMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            data.extend(vector);
        }

        Ok(Self { dim, data })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector stored under `id`.
    pub fn vector(&self, id: usize) -> Option<&[f32]> {
        self.data.chunks_exact(self.dim).nth(id)
    }

    /// Return up to `k` nearest vectors, closest first.
    ///
    /// Equal distances are ordered by id.
    pub fn search(&self, query: &[f32], k: usize) -> KnowledgeResult<Vec<Neighbor>> {
        if query.len() != self.dim {
            return Err(KnowledgeError::EmbeddingDimMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(id, vector)| Neighbor {
                id,
                distance: squared_l2(query, vector),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.id.cmp(&b.id))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
