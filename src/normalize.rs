use std::collections::HashSet;
use std::sync::LazyLock;

pub type TokenSet = HashSet<String>;

// NLTK English stopword list. Matching is exact and case-sensitive.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

fn is_stripped(c: char) -> bool {
    c.is_ascii_punctuation() && c != '-'
}

/// Cleans a hint or snippet into a single comparable string.
///
/// Space runs collapse, exact stopwords are dropped, then the survivors
/// are lowercased and every ASCII punctuation mark except `-` is removed.
/// Stopword matching happens before lowercasing, so `"The"` survives as
/// `"the"`.
pub fn clean(text: &str) -> String {
    let kept: Vec<&str> = text
        .split(' ')
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .collect();

    kept.join(" ")
        .chars()
        .filter(|c| !is_stripped(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalizes text into the set of tokens used for similarity scoring.
pub fn normalize(text: &str) -> TokenSet {
    clean(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> TokenSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_normalize_drops_stopwords_and_punctuation() {
        assert_eq!(
            normalize("a small, domesticated animal!"),
            set(&["small", "domesticated", "animal"])
        );
    }

    #[test]
    fn test_normalize_collapses_spaces() {
        assert_eq!(normalize("big    red   dog"), set(&["big", "red", "dog"]));
        assert_eq!(normalize("  leading and trailing  "), set(&["leading", "trailing"]));
    }

    #[test]
    fn test_stopwords_are_case_sensitive() {
        // "The" is not an exact stopword, so it survives and is lowercased.
        assert_eq!(normalize("The cat"), set(&["the", "cat"]));
        assert_eq!(normalize("the cat"), set(&["cat"]));
    }

    #[test]
    fn test_hyphen_is_preserved() {
        assert_eq!(normalize("Well-known (fact)"), set(&["well-known", "fact"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(normalize("echo Echo ECHO"), set(&["echo"]));
    }

    #[test]
    fn test_degenerate_inputs_are_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize("the of and").is_empty());
        assert!(normalize("... !!! ?").is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent_on_clean_text() {
        let once = clean("Sweet, sugary treat -- often  frozen");
        assert_eq!(normalize(&once), normalize(&clean(&once)));
        assert_eq!(normalize("ice-cold frozen treat"), normalize(&clean("ice-cold frozen treat")));
    }

    #[test]
    fn test_is_stopword() {
        assert!(is_stopword("the"));
        assert!(is_stopword("don't"));
        assert!(!is_stopword("The"));
        assert!(!is_stopword("dog"));
    }
}
