use crate::corpus::Corpus;
use crate::normalize::normalize;
use crate::similarity::{Jaccard, Scorer};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 10;

/// A ranked answer suggestion for one hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
    /// The corpus snippet for `word` that best matched the hint.
    pub snippet: String,
    pub hint: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub limit: usize,
    pub keep_zero_scores: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        RankOptions {
            limit: DEFAULT_LIMIT,
            keep_zero_scores: false,
        }
    }
}

pub struct Ranker {
    scorer: Box<dyn Scorer>,
    options: RankOptions,
}

impl Default for Ranker {
    fn default() -> Self {
        Ranker::new(Box::new(Jaccard))
    }
}

impl Ranker {
    pub fn new(scorer: Box<dyn Scorer>) -> Self {
        Self::with_options(scorer, RankOptions::default())
    }

    pub fn with_options(scorer: Box<dyn Scorer>, options: RankOptions) -> Self {
        Ranker { scorer, options }
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    pub fn options(&self) -> RankOptions {
        self.options
    }

    /// Ranks the corpus words of exactly `target_len` characters against `hint`.
    ///
    /// Each word scores the best similarity among its snippets; the first
    /// snippet to reach that best score is reported. Results are sorted by
    /// score, highest first, with ties kept in corpus order, and capped at
    /// the configured limit.
    pub fn rank(&self, corpus: &Corpus, target_len: usize, hint: &str) -> Vec<Candidate> {
        let hint_tokens = normalize(hint);

        let mut candidates: Vec<Candidate> = corpus
            .iter()
            .filter(|(word, _)| word.chars().count() == target_len)
            .filter_map(|(word, snippets)| {
                let mut best_score = 0.0;
                let mut best_snippet: Option<&String> = None;
                for snippet in snippets {
                    let score = self.scorer.score_tokens(&hint_tokens, &normalize(snippet));
                    if score > best_score {
                        best_score = score;
                        best_snippet = Some(snippet);
                    }
                }

                if best_score <= 0.0 && !self.options.keep_zero_scores {
                    return None;
                }
                let snippet = best_snippet
                    .or_else(|| snippets.first())
                    .cloned()
                    .unwrap_or_default();
                Some(Candidate {
                    word: word.clone(),
                    score: best_score,
                    snippet,
                    hint: hint.to_string(),
                })
            })
            .collect();

        // `sort_by` is stable, so equal scores keep corpus order.
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.options.limit);

        debug!(
            "ranked {} candidates of length {} for {:?} with {}",
            candidates.len(),
            target_len,
            hint,
            self.scorer.name()
        );
        candidates
    }

    /// Ranks a batch of `(length, hint)` queries in parallel, preserving order.
    pub fn rank_many(&self, corpus: &Corpus, queries: &[(usize, String)]) -> Vec<Vec<Candidate>> {
        queries
            .par_iter()
            .map(|(target_len, hint)| self.rank(corpus, *target_len, hint))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::Cosine;

    fn corpus(entries: &[(&str, &[&str])]) -> Corpus {
        entries
            .iter()
            .map(|(w, s)| (w.to_string(), s.iter().map(|x| x.to_string()).collect()))
            .collect()
    }

    fn pets() -> Corpus {
        corpus(&[
            ("cat", &["a small domesticated animal"]),
            ("dog", &["a domesticated canine"]),
        ])
    }

    #[test]
    fn test_rank_exact_match_first() {
        let ranked = Ranker::default().rank(&pets(), 3, "small domesticated animal");
        assert_eq!(ranked[0].word, "cat");
        assert_eq!(ranked[0].score, 1.0);
        assert_eq!(ranked[0].snippet, "a small domesticated animal");
        assert_eq!(ranked[0].hint, "small domesticated animal");
        // dog shares "domesticated": 1 / 4
        assert_eq!(ranked[1].word, "dog");
        assert!((ranked[1].score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_rank_no_words_of_length() {
        assert!(Ranker::default().rank(&pets(), 5, "xyz completely unrelated").is_empty());
    }

    #[test]
    fn test_rank_drops_zero_scores_by_default() {
        assert!(Ranker::default().rank(&pets(), 3, "xyz").is_empty());

        let keep = Ranker::with_options(
            Box::new(Jaccard),
            RankOptions {
                keep_zero_scores: true,
                ..RankOptions::default()
            },
        );
        let ranked = keep.rank(&pets(), 3, "xyz");
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| c.score == 0.0));
        assert_eq!(ranked[0].snippet, "a small domesticated animal");
    }

    #[test]
    fn test_rank_only_target_length() {
        let c = corpus(&[
            ("cat", &["feline"]),
            ("lion", &["big feline"]),
            ("tiger", &["striped feline"]),
            ("éte", &["feline summer"]),
        ]);
        let ranked = Ranker::default().rank(&c, 3, "feline");
        let words: Vec<&str> = ranked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, ["cat", "éte"]);
        assert!(ranked.iter().all(|c| c.word.chars().count() == 3));
    }

    #[test]
    fn test_rank_caps_and_sorts() {
        let entries: Vec<(String, Vec<String>)> = (0..25)
            .map(|i| {
                let word = format!("w{:03}", i);
                let snippet = if i % 2 == 0 { "red apple pie".to_string() } else { "red car".to_string() };
                (word, vec![snippet])
            })
            .collect();
        let c: Corpus = entries.into_iter().collect();
        let ranked = Ranker::default().rank(&c, 4, "red apple");
        assert_eq!(ranked.len(), DEFAULT_LIMIT);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        // ties keep corpus order
        assert_eq!(ranked[0].word, "w000");
        assert_eq!(ranked[1].word, "w002");
    }

    #[test]
    fn test_first_best_snippet_wins_ties() {
        let c = corpus(&[("emu", &["unrelated", "flightless bird", "bird flightless", "flightless bird"])]);
        let ranked = Ranker::default().rank(&c, 3, "flightless bird");
        assert_eq!(ranked[0].snippet, "flightless bird");
        let c = corpus(&[("emu", &["large bird", "fast bird"])]);
        let ranked = Ranker::default().rank(&c, 3, "bird");
        assert_eq!(ranked[0].snippet, "large bird");
    }

    #[test]
    fn test_rank_with_cosine() {
        let ranker = Ranker::new(Box::new(Cosine));
        let ranked = ranker.rank(&pets(), 3, "domesticated");
        assert_eq!(ranked.len(), 2);
        // dog has the shorter snippet, so cosine prefers it
        assert_eq!(ranked[0].word, "dog");
        assert_eq!(ranker.scorer().name(), "cosine");
    }

    #[test]
    fn test_rank_many_preserves_query_order() {
        let queries = vec![
            (3, "domesticated canine".to_string()),
            (5, "anything".to_string()),
            (3, "small animal".to_string()),
        ];
        let results = Ranker::default().rank_many(&pets(), &queries);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0][0].word, "dog");
        assert!(results[1].is_empty());
        assert_eq!(results[2][0].word, "cat");
    }
}
