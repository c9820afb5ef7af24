use crate::vectors::{SparseVector, VectorSpace};

use std::cmp::Ordering;
use rayon::prelude::*;
use serde::Serialize;


#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
}

/// Cosine similarity of two sparse vectors, keys missing on one side count as 0.
/// Empty or zero-norm vectors on either side give 0.
pub fn cosine<A: SparseVector + ?Sized, B: SparseVector + ?Sized>(v1: &A, v2: &B) -> f64 {

    if v1.is_empty() || v2.is_empty() {
        return 0.0;
    }

    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 == 0.0 || n2 == 0.0 {
        return 0.0;
    }

    // only shared keys contribute to the dot product, walk the shorter vector
    let dot: f64 = if v1.len() <= v2.len() {
        v1.entries().map(|(k, w)| w * v2.weight(k)).sum()
    } else {
        v2.entries().map(|(k, w)| w * v1.weight(k)).sum()
    };

    (dot / (n1 * n2)).min(1.0)
}

fn by_score_then_word(a: &Candidate, b: &Candidate) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word))
}

pub struct SimilarityRanker {}

impl SimilarityRanker {

    /// Scores every center word of `space` against `vector`, best first.
    /// Equal scores are ordered by word.
    pub fn rank<V: SparseVector + Sync + ?Sized>(vector: &V, space: &VectorSpace) -> Vec<Candidate> {

        let mut candidates: Vec<Candidate> = space
            .par_iter()
            .map(|(word, context)| Candidate { word: word.to_owned(), score: cosine(vector, context) })
            .collect();

        // sort by most similar in descending order
        candidates.par_sort_by(by_score_then_word);
        candidates
    }

    pub fn top_k<V: SparseVector + Sync + ?Sized>(vector: &V, space: &VectorSpace, k: usize) -> Vec<Candidate> {
        let mut candidates = Self::rank(vector, space);
        candidates.truncate(k);
        candidates
    }
}
