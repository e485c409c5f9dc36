use crate::normalize::{TokenSet, normalize};

/// A symmetric similarity metric over normalized token sets.
///
/// Implementations must return a value in `[0, 1]` and treat empty sets as
/// having no similarity to anything.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score_tokens(&self, a: &TokenSet, b: &TokenSet) -> f64;

    fn score(&self, a: &str, b: &str) -> f64 {
        self.score_tokens(&normalize(a), &normalize(b))
    }
}

/// Jaccard index: `|A ∩ B| / |A ∪ B|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl Scorer for Jaccard {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn score_tokens(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        let shared = a.intersection(b).count();
        let union = a.len() + b.len() - shared;
        if union == 0 {
            return 0.0;
        }
        shared as f64 / union as f64
    }
}

/// Cosine similarity of binary bag-of-words vectors, `|A ∩ B| / sqrt(|A| |B|)`.
///
/// Purely lexical. It rewards short hints that are fully contained in a
/// longer snippet more than Jaccard does.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Scorer for Cosine {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn score_tokens(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let shared = a.intersection(b).count() as f64;
        (shared / ((a.len() * b.len()) as f64).sqrt()).min(1.0)
    }
}

/// Jaccard similarity of two raw strings.
pub fn jaccard(a: &str, b: &str) -> f64 {
    Jaccard.score(a, b)
}
