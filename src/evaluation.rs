use crate::projection::CrossLingualProjector;
use crate::similarity::{Candidate, SimilarityRanker};
use crate::testset::TestCase;
use crate::vectors::VectorSpace;

use std::collections::HashSet;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

pub const DEFAULT_TOP_K: usize = 10;


/// Outcome of one evaluated test case.
#[derive(Clone, Debug, Serialize)]
pub struct EvaluationRecord {
    pub source: String,
    pub gold: String,
    pub candidates: Vec<Candidate>,
    pub hit: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct EvaluationReport {
    pub top_k: usize,
    pub hits: usize,
    pub evaluated: usize,
    /// Cases whose source word has no context vector. They count nowhere else.
    pub skipped: usize,
    pub records: Vec<EvaluationRecord>,
}

impl EvaluationReport {
    pub fn precision_at_k(&self) -> f64 {
        if self.evaluated == 0 {
            return 0.0;
        }
        self.hits as f64 / self.evaluated as f64
    }
}

pub struct Evaluator<'a> {
    source_space: &'a VectorSpace,
    target_space: &'a VectorSpace,
    projector: &'a CrossLingualProjector<'a>,
    target_stopwords: &'a HashSet<String>,
    top_k: usize,
}

impl<'a> Evaluator<'a> {

    pub fn new(source_space: &'a VectorSpace,
        target_space: &'a VectorSpace,
        projector: &'a CrossLingualProjector<'a>,
        target_stopwords: &'a HashSet<String>) -> Evaluator<'a> {

        Self { source_space, target_space, projector, target_stopwords, top_k: DEFAULT_TOP_K }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Ranked target candidates for one source word, `None` when the word has no context vector.
    pub fn candidates(&self, source: &str) -> Option<Vec<Candidate>> {
        let vector = self.source_space.get(source)?;
        let projected = self.projector.project(vector, self.target_stopwords);
        Some(SimilarityRanker::top_k(&projected, self.target_space, self.top_k))
    }

    fn evaluate_case(&self, case: &TestCase) -> Option<EvaluationRecord> {
        let candidates = match self.candidates(&case.source) {
            Some(candidates) => candidates,
            None => {
                debug!("skipping '{}', not in source vector space", case.source);
                return None;
            }
        };
        let hit = candidates.iter().any(|c| c.word == case.gold);
        Some(EvaluationRecord { source: case.source.clone(), gold: case.gold.clone(), candidates, hit })
    }

    pub fn evaluate(&self, cases: &[TestCase]) -> EvaluationReport {

        // cases are independent; collect keeps them in test-set order
        let outcomes: Vec<Option<EvaluationRecord>> = cases
            .par_iter()
            .map(|case| self.evaluate_case(case))
            .collect();

        let mut report = EvaluationReport { top_k: self.top_k, ..Default::default() };
        for outcome in outcomes {
            match outcome {
                Some(record) => {
                    report.evaluated += 1;
                    if record.hit {
                        report.hits += 1;
                    }
                    report.records.push(record);
                },
                None => report.skipped += 1,
            }
        }
        report
    }
}
