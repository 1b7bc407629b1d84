//! Distance functions for ranking dump records.
//!
//! Names and formulas follow the engine-native space names stored in a
//! collection's `meta.json`: `l2`, `cosine`, `ip`. Lower is always closer.

use serde::{Deserialize, Serialize};

/// Distance space of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[serde(alias = "euclidean")]
    L2,
    /// 1 - cosine similarity.
    #[default]
    Cosine,
    /// 1 - inner product.
    #[serde(alias = "dot")]
    Ip,
}

impl DistanceMetric {
    /// Computes the distance between two vectors of equal length.
    #[inline]
    pub fn compute(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::L2 => euclidean_distance_squared(a, b),
            DistanceMetric::Cosine => cosine_distance(a, b),
            DistanceMetric::Ip => 1.0 - dot_product(a, b),
        }
    }
}

/// Computes squared Euclidean distance.
#[inline]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Computes cosine distance. Zero vectors are treated as orthogonal.
#[inline]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let norm_a = dot_product(a, a).sqrt();
    let norm_b = dot_product(b, b).sqrt();

    let denominator = norm_a * norm_b;
    if denominator == 0.0 {
        return 1.0;
    }

    1.0 - dot_product(a, b) / denominator
}

/// Computes the inner product.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
