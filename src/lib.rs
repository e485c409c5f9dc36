pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluate;
pub mod normalize;
pub mod rank;
pub mod similarity;

pub use config::{BuildConfig, EvalConfig, Metric, SolverConfig};
pub use corpus::{Corpus, CorpusKind, load_corpus, load_golden_standard};
pub use error::{Result, SolverError};
pub use evaluate::{AggregateStatistics, CorrectMatch, EvaluationResult, Evaluator};
pub use normalize::{TokenSet, normalize};
pub use rank::{Candidate, RankOptions, Ranker};
pub use similarity::{Cosine, Jaccard, Scorer, jaccard};
