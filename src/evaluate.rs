use crate::corpus::Corpus;
use crate::error::{Result, SolverError};
use crate::rank::Ranker;
use rand::rngs::SmallRng;
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// A golden answer that the ranker placed in its suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectMatch {
    pub word: String,
    pub score: f64,
    pub snippet: String,
    /// Golden clue used as the hint.
    pub clue: String,
    /// Score of the first-ranked candidate for that clue.
    pub top_score: f64,
    /// `top_score - score`, never negative.
    pub score_gap: f64,
}

/// Outcome of one evaluation trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub sample_count: usize,
    pub correct: Vec<CorrectMatch>,
    /// Answers present in the working corpus but not suggested.
    pub misses: Vec<String>,
    /// Answers absent from the working corpus.
    pub absent: usize,
}

impl EvaluationResult {
    /// Number of sampled answers that exist in the working corpus.
    pub fn within(&self) -> usize {
        self.sample_count.saturating_sub(self.absent)
    }
}

/// Averages over every trial of an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStatistics {
    pub loops: usize,
    pub sample_count: usize,
    /// Mean share of in-corpus answers that were suggested.
    pub correct_fraction: f64,
    /// Mean share of in-corpus answers that were not suggested.
    pub miss_fraction: f64,
    /// Mean share of sampled answers present in the working corpus.
    pub within_fraction: f64,
    /// Mean score gap over all correct matches of all trials; 0 when there are none.
    pub score_gap: f64,
    pub correct_matches: usize,
    pub trials: Vec<EvaluationResult>,
}

impl AggregateStatistics {
    pub fn from_trials(sample_count: usize, trials: Vec<EvaluationResult>) -> Self {
        let loops = trials.len();
        let mut correct_sum = 0.0;
        let mut miss_sum = 0.0;
        let mut within_sum = 0.0;
        let mut gap_sum = 0.0;
        let mut correct_matches = 0;

        for trial in &trials {
            let within = trial.within();
            if within == 0 {
                continue;
            }
            correct_sum += trial.correct.len() as f64 / within as f64;
            miss_sum += trial.misses.len() as f64 / within as f64;
            within_sum += within as f64 / sample_count as f64;
            gap_sum += trial.correct.iter().map(|m| m.score_gap).sum::<f64>();
            correct_matches += trial.correct.len();
        }

        let per_loop = |sum: f64| if loops == 0 { 0.0 } else { sum / loops as f64 };
        AggregateStatistics {
            loops,
            sample_count,
            correct_fraction: per_loop(correct_sum),
            miss_fraction: per_loop(miss_sum),
            within_fraction: per_loop(within_sum),
            score_gap: if correct_matches > 0 {
                gap_sum / correct_matches as f64
            } else {
                0.0
            },
            correct_matches,
            trials,
        }
    }
}

/// Measures how often the ranker recovers golden answers from their clues.
pub struct Evaluator {
    ranker: Ranker,
    seed: Option<u64>,
    parallel: bool,
}

impl Evaluator {
    pub fn new(ranker: Ranker) -> Self {
        Evaluator {
            ranker,
            seed: None,
            parallel: true,
        }
    }

    /// Fixes the random draws; loop `i` uses `seed + i`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    fn rng_for(&self, loop_index: usize) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(loop_index as u64)),
            None => SmallRng::from_entropy(),
        }
    }

    /// Runs a single trial over `sample_count` random golden answers.
    ///
    /// Draws come from the RNG of loop 0: with a fixed seed every call
    /// samples the same answers and clues. Use `evaluate` for fresh samples
    /// per trial, or `evaluate_once_with_rng` to drive the draws yourself.
    pub fn evaluate_once(
        &self,
        corpus: &Corpus,
        golden: &Corpus,
        sample_count: usize,
    ) -> Result<EvaluationResult> {
        let mut rng = self.rng_for(0);
        self.evaluate_once_with_rng(corpus, golden, sample_count, &mut rng)
    }

    pub fn evaluate_once_with_rng<R: Rng + ?Sized>(
        &self,
        corpus: &Corpus,
        golden: &Corpus,
        sample_count: usize,
        rng: &mut R,
    ) -> Result<EvaluationResult> {
        if sample_count == 0 || sample_count > golden.len() {
            return Err(SolverError::InvalidSampleSize {
                requested: sample_count,
                available: golden.len(),
            });
        }

        let mut result = EvaluationResult {
            sample_count,
            ..EvaluationResult::default()
        };

        for idx in index::sample(rng, golden.len(), sample_count) {
            let Some((answer, clues)) = golden.get_index(idx) else {
                continue;
            };
            let clue = clues.choose(rng).map(String::as_str).unwrap_or("");
            let ranked = self.ranker.rank(corpus, answer.chars().count(), clue);

            if let Some(hit) = ranked.iter().find(|c| &c.word == answer) {
                let top_score = ranked[0].score;
                debug!("{} CORRECT with {:.3} (top {:.3})", answer, hit.score, top_score);
                result.correct.push(CorrectMatch {
                    word: answer.clone(),
                    score: hit.score,
                    snippet: hit.snippet.clone(),
                    clue: clue.to_string(),
                    top_score,
                    score_gap: top_score - hit.score,
                });
            } else if corpus.contains_key(answer) {
                debug!("{} INCORRECT (in corpus)", answer);
                result.misses.push(answer.clone());
            } else {
                debug!("{} INCORRECT (not in corpus)", answer);
                result.absent += 1;
            }
        }

        Ok(result)
    }

    /// Runs `loops` independent trials and aggregates their statistics.
    pub fn evaluate(
        &self,
        corpus: &Corpus,
        golden: &Corpus,
        sample_count: usize,
        loops: usize,
    ) -> Result<AggregateStatistics> {
        if loops == 0 {
            return Err(SolverError::InvalidLoopCount);
        }

        let run = |loop_index: usize| {
            let mut rng = self.rng_for(loop_index);
            self.evaluate_once_with_rng(corpus, golden, sample_count, &mut rng)
        };
        let trials: Vec<EvaluationResult> = if self.parallel {
            (0..loops).into_par_iter().map(run).collect::<Result<_>>()?
        } else {
            (0..loops).map(run).collect::<Result<_>>()?
        };

        let stats = AggregateStatistics::from_trials(sample_count, trials);
        info!(
            "evaluated {} loops of {} samples with {}: {:.3} correct, {:.3} within corpus",
            loops,
            sample_count,
            self.ranker.scorer().name(),
            stats.correct_fraction,
            stats.within_fraction
        );
        Ok(stats)
    }
}
