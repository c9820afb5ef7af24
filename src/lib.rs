pub mod error;
pub mod config;
pub mod vectors;
pub mod cooccurrence;
pub mod dictionary;
pub mod projection;
pub mod similarity;
pub mod evaluation;
pub mod corpus;
pub mod testset;
pub mod cognates;
pub mod pipeline;

pub use config::{files_handling, Config, Params};
pub use cooccurrence::{FrequencyTable, VectorSpaceBuilder};
pub use dictionary::BilingualDictionary;
pub use error::{LexiconError, Result};
pub use evaluation::{EvaluationRecord, EvaluationReport, Evaluator};
pub use pipeline::{Pipeline, Resources};
pub use projection::CrossLingualProjector;
pub use similarity::{cosine, Candidate, SimilarityRanker};
pub use vectors::{ContextVector, ProjectedVector, SparseVector, VectorSpace, UNK};

use env_logger::Target;
use log::LevelFilter;

/// Logs to stdout at info level unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::builder()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
