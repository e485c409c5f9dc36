use crate::error::Result;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

/// Word -> snippets (definitions, synonyms or clues), kept in file order.
pub type Corpus = IndexMap<String, Vec<String>>;

/// Which precomputed corpus to read from a data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorpusKind {
    #[default]
    Dictionary,
    Thesaurus,
    Golden,
}

impl CorpusKind {
    pub fn file_name(self) -> &'static str {
        match self {
            CorpusKind::Dictionary => "definition_data.json",
            CorpusKind::Thesaurus => "synonym_data.json",
            CorpusKind::Golden => "answer_clue_data.json",
        }
    }

    pub fn path_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dictionary" => Some(CorpusKind::Dictionary),
            "thesaurus" => Some(CorpusKind::Thesaurus),
            "golden" => Some(CorpusKind::Golden),
            _ => None,
        }
    }
}

/// Reads a corpus, failing on i/o or json errors. An empty file is an
/// empty corpus.
pub fn try_load_corpus(path: &Path) -> Result<Corpus> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Corpus::new());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Reads a corpus, degrading to an empty one when the file is missing,
/// unreadable or malformed.
pub fn load_corpus(path: &Path) -> Corpus {
    match try_load_corpus(path) {
        Ok(corpus) => {
            info!("loaded {} words from {}", corpus.len(), path.display());
            corpus
        }
        Err(e) => {
            warn!("could not load corpus {}: {}, using an empty corpus", path.display(), e);
            Corpus::new()
        }
    }
}

/// Golden standards share the corpus file shape and loading contract.
pub fn load_golden_standard(path: &Path) -> Corpus {
    load_corpus(path)
}

pub fn save_corpus(path: &Path, corpus: &Corpus) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string(corpus)?;
    fs::write(path, json)?;
    Ok(())
}

/// Combines two corpora. Words present in `new` replace their old entry.
pub fn merge_corpus(old: Corpus, new: Corpus) -> Corpus {
    let mut merged = old;
    for (word, snippets) in new {
        merged.insert(word, snippets);
    }
    merged
}

/// Folds `(answer, clue)` pairs into a golden standard. Answers are
/// lowercased and a clue is only recorded once per answer.
pub fn golden_from_pairs<I, A, C>(existing: Corpus, pairs: I) -> Corpus
where
    I: IntoIterator<Item = (A, C)>,
    A: AsRef<str>,
    C: Into<String>,
{
    let mut golden = existing;
    for (answer, clue) in pairs {
        let answer = answer.as_ref().trim().to_lowercase();
        if answer.is_empty() {
            continue;
        }
        let clue = clue.into();
        let clues = golden.entry(answer).or_default();
        if !clues.contains(&clue) {
            clues.push(clue);
        }
    }
    golden
}

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[|\w\s]*\}").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^-\w\s]").unwrap());

/// Strips dictionary markup such as `{bc}` or `{it|word}`, then all
/// punctuation except dashes, and trims the result.
pub fn clean_definition(definition: &str) -> String {
    let without_markup = MARKUP.replace_all(definition, "");
    NON_WORD.replace_all(&without_markup, "").trim().to_string()
}

/// Every value stored under `key`, searched depth-first through objects
/// and arrays. A matching value is not searched further.
pub fn find_key<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_key(value, key, &mut found);
    found
}

fn collect_key<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v);
                } else {
                    collect_key(v, key, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_key(item, key, found);
            }
        }
        _ => {}
    }
}

/// Cleaned definitions from a dictionary API entry.
///
/// Each `dt` ("defining text") array holds `["text", "..."]` pairs; the
/// text of the first pair is kept when it is a string.
pub fn reformat_definitions(entry: &Value) -> Vec<String> {
    find_key(entry, "dt")
        .into_iter()
        .filter_map(|dt| dt.get(0)?.get(1)?.as_str())
        .map(clean_definition)
        .filter(|definition| !definition.is_empty())
        .collect()
}

/// Synonyms then related words (`syn_list` / `rel_list` -> `wd`) from a
/// thesaurus API entry.
pub fn reformat_synonyms(entry: &Value) -> Vec<String> {
    ["syn_list", "rel_list"]
        .iter()
        .flat_map(|list| find_key(entry, list))
        .flat_map(|list| find_key(list, "wd"))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

/// Lines `start..=end` (zero-based) of a word list, trimmed. An unreadable
/// file gives no words.
pub fn get_words(path: &Path, start: usize, end: usize) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .enumerate()
            .filter(|(line, _)| (start..=end).contains(line))
            .map(|(_, word)| word.trim().to_string())
            .collect(),
        Err(e) => {
            warn!("word file {} could not be opened: {}", path.display(), e);
            Vec::new()
        }
    }
}

pub fn read_dump(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Folds a saved API dump into an existing corpus of the same kind.
///
/// Dictionary and thesaurus dumps map each word to its raw API json and
/// replace the existing entry for that word. Golden dumps are a list of
/// `[answer, clue]` pairs. When `words` is given, only those words are
/// taken from the dump.
pub fn build_from_dump(
    kind: CorpusKind,
    existing: Corpus,
    dump: &Value,
    words: Option<&[String]>,
) -> Corpus {
    let wanted = |word: &str| words.is_none_or(|list| list.iter().any(|w| w == word));

    match kind {
        CorpusKind::Dictionary | CorpusKind::Thesaurus => {
            let reformat = match kind {
                CorpusKind::Thesaurus => reformat_synonyms,
                _ => reformat_definitions,
            };
            let fresh: Corpus = dump
                .as_object()
                .into_iter()
                .flatten()
                .filter(|(word, _)| wanted(word))
                .map(|(word, entry)| (word.clone(), reformat(entry)))
                .collect();
            info!("reformatted {} {:?} entries", fresh.len(), kind);
            merge_corpus(existing, fresh)
        }
        CorpusKind::Golden => {
            let pairs: Vec<(&str, &str)> = dump
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|pair| Some((pair.get(0)?.as_str()?, pair.get(1)?.as_str()?)))
                .filter(|(answer, _)| wanted(&answer.to_lowercase()))
                .collect();
            info!("folding {} answer/clue pairs into the golden standard", pairs.len());
            golden_from_pairs(existing, pairs)
        }
    }
}
