use crate::corpus::CorpusKind;
use crate::evaluate::Evaluator;
use crate::rank::Ranker;
use crate::similarity::{Cosine, Jaccard, Scorer};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Jaccard,
    Cosine,
}

impl Metric {
    pub fn scorer(self) -> Box<dyn Scorer> {
        match self {
            Metric::Jaccard => Box::new(Jaccard),
            Metric::Cosine => Box::new(Cosine),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    pub samples: usize,
    pub loops: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            samples: 10,
            loops: 1,
        }
    }
}

/// A saved API dump to fold into one of the corpus files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub kind: CorpusKind,
    pub dump: PathBuf,
    /// Word list file and the inclusive, zero-based line range to keep.
    pub words: Option<(PathBuf, usize, usize)>,
}

/// Run configuration handed to the ranker and evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub debug: bool,
    pub metric: Metric,
    pub corpus: CorpusKind,
    pub data_dir: PathBuf,
    /// `Some` switches the run from interactive solving to evaluation.
    pub eval: Option<EvalConfig>,
    /// `Some` rebuilds a corpus file instead of solving or evaluating.
    pub build: Option<BuildConfig>,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            debug: false,
            metric: Metric::default(),
            corpus: CorpusKind::default(),
            data_dir: PathBuf::from("data"),
            eval: None,
            build: None,
            seed: None,
            parallel: true,
        }
    }
}

impl SolverConfig {
    pub fn corpus_path(&self) -> PathBuf {
        self.corpus.path_in(&self.data_dir)
    }

    pub fn golden_path(&self) -> PathBuf {
        CorpusKind::Golden.path_in(&self.data_dir)
    }

    pub fn ranker(&self) -> Ranker {
        Ranker::new(self.metric.scorer())
    }

    pub fn evaluator(&self) -> Evaluator {
        let evaluator = Evaluator::new(self.ranker()).with_parallel(self.parallel);
        match self.seed {
            Some(seed) => evaluator.with_seed(seed),
            None => evaluator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.metric, Metric::Jaccard);
        assert_eq!(config.corpus_path(), Path::new("data").join("definition_data.json"));
        assert_eq!(config.golden_path(), Path::new("data").join("answer_clue_data.json"));
        assert_eq!(EvalConfig::default(), EvalConfig { samples: 10, loops: 1 });
    }

    #[test]
    fn test_metric_selects_scorer() {
        assert_eq!(Metric::Jaccard.scorer().name(), "jaccard");
        assert_eq!(Metric::Cosine.scorer().name(), "cosine");
        let config = SolverConfig {
            metric: Metric::Cosine,
            ..SolverConfig::default()
        };
        assert_eq!(config.ranker().scorer().name(), "cosine");
        assert_eq!(config.evaluator().ranker().scorer().name(), "cosine");
    }
}
