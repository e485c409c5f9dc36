use anyhow::{Context, bail};
use clap::Parser;
use cluesolve::corpus::{build_from_dump, get_words, read_dump, save_corpus};
use cluesolve::{
    AggregateStatistics, BuildConfig, Candidate, CorpusKind, EvalConfig, EvaluationResult, Metric,
    SolverConfig, load_corpus, load_golden_standard,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cluesolve", about = "Suggest crossword answers from a word length and a hint")]
struct Cli {
    /// Verbose logging and per-trial tables
    #[arg(long)]
    debug: bool,
    /// Score with Jaccard similarity (default)
    #[arg(long, conflicts_with = "cosine")]
    jaccard: bool,
    /// Score with bag-of-words cosine similarity
    #[arg(long)]
    cosine: bool,
    /// Evaluate against the golden standard instead of prompting
    #[arg(long, num_args = 1..=2, value_names = ["SAMPLES", "LOOPS"])]
    eval: Option<Vec<usize>>,
    /// Use dictionary definitions as the working corpus (default)
    #[arg(long, conflicts_with_all = ["thesaurus", "golden"])]
    dictionary: bool,
    /// Use thesaurus synonyms as the working corpus
    #[arg(long, conflicts_with = "golden")]
    thesaurus: bool,
    /// Use the golden clue corpus as the working corpus
    #[arg(long)]
    golden: bool,
    /// Fold a saved API dump into a corpus file: KIND (dictionary, thesaurus, golden) and DUMP
    #[arg(long, num_args = 2, value_names = ["KIND", "DUMP"], conflicts_with = "eval")]
    build: Option<Vec<String>>,
    /// Word list restricting which dump entries are built
    #[arg(long, requires = "build")]
    words: Option<PathBuf>,
    /// Inclusive, zero-based line range of the word list to build
    #[arg(long, num_args = 2, value_names = ["START", "END"], requires = "words")]
    word_range: Option<Vec<usize>>,
    /// Directory holding the corpus json files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Seed for reproducible evaluation samples
    #[arg(long)]
    seed: Option<u64>,
    /// Run evaluation loops one after another
    #[arg(long)]
    sequential: bool,
    /// Print evaluation statistics as json
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<SolverConfig> {
        let metric = if self.cosine { Metric::Cosine } else { Metric::Jaccard };
        let corpus = if self.golden {
            CorpusKind::Golden
        } else if self.thesaurus {
            CorpusKind::Thesaurus
        } else {
            CorpusKind::Dictionary
        };
        let eval = match self.eval.as_deref() {
            None => None,
            Some([samples]) => Some(EvalConfig { samples: *samples, loops: 1 }),
            Some([samples, loops]) => Some(EvalConfig { samples: *samples, loops: *loops }),
            Some(other) => bail!("--eval takes SAMPLES [LOOPS], got {} values", other.len()),
        };
        let build = match self.build.as_deref() {
            None => None,
            Some([kind, dump]) => {
                let Some(kind) = CorpusKind::parse(kind) else {
                    bail!("unknown corpus kind {kind:?} for --build");
                };
                let words = match (self.words, self.word_range.as_deref()) {
                    (None, _) => None,
                    (Some(path), None) => Some((path, 0, usize::MAX)),
                    (Some(path), Some([start, end])) => Some((path, *start, *end)),
                    (Some(_), Some(_)) => bail!("--word-range takes START END"),
                };
                Some(BuildConfig {
                    kind,
                    dump: PathBuf::from(dump),
                    words,
                })
            }
            Some(_) => bail!("--build takes KIND DUMP"),
        };
        Ok(SolverConfig {
            debug: self.debug,
            metric,
            corpus,
            data_dir: self.data_dir,
            eval,
            build,
            seed: self.seed,
            parallel: !self.sequential,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let json = cli.json;
    let config = cli.into_config()?;
    info!("using {:?} metric over the {:?} corpus", config.metric, config.corpus);

    if let Some(build) = &config.build {
        return build_corpus(&config, build);
    }

    let corpus = load_corpus(&config.corpus_path());

    match config.eval {
        Some(eval) => {
            let golden = load_golden_standard(&config.golden_path());
            let stats = config
                .evaluator()
                .evaluate(&corpus, &golden, eval.samples, eval.loops)
                .context("evaluation failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                if config.debug || eval.loops == 1 {
                    for trial in &stats.trials {
                        print_trial(trial);
                    }
                }
                print_statistics(&stats);
            }
        }
        None => prompt_loop(&config, &corpus)?,
    }
    Ok(())
}

fn build_corpus(config: &SolverConfig, build: &BuildConfig) -> anyhow::Result<()> {
    let dump = read_dump(&build.dump)
        .with_context(|| format!("could not read dump {}", build.dump.display()))?;
    let words = build
        .words
        .as_ref()
        .map(|(path, start, end)| get_words(path, *start, *end));

    let target = build.kind.path_in(&config.data_dir);
    let existing = load_corpus(&target);
    let before = existing.len();
    let built = build_from_dump(build.kind, existing, &dump, words.as_deref());
    save_corpus(&target, &built).with_context(|| format!("could not save {}", target.display()))?;
    info!("{} now holds {} words ({} before)", target.display(), built.len(), before);
    Ok(())
}

fn prompt_loop(config: &SolverConfig, corpus: &cluesolve::Corpus) -> io::Result<()> {
    let ranker = config.ranker();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(length) = ask(&mut lines, "Length of mystery word: ")? else {
            break;
        };
        let length: usize = match length.trim().parse() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("Please enter a positive number.");
                continue;
            }
        };
        let Some(hint) = ask(&mut lines, "Hint for mystery word: ")? else {
            break;
        };

        print_candidates(&ranker.rank(corpus, length, &hint));

        match ask(&mut lines, "\nContinue? (y/n) ")? {
            Some(answer) if answer.trim() == "y" => {}
            _ => break,
        }
    }
    Ok(())
}

fn ask<B: BufRead>(lines: &mut io::Lines<B>, prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    lines.next().transpose()
}

fn print_candidates(candidates: &[Candidate]) {
    println!("\nPossible words:");
    if candidates.is_empty() {
        println!("  (none)");
    }
    for (i, c) in candidates.iter().enumerate() {
        println!("  {:>2}. {:<12} {:.3}  {}", i + 1, c.word, c.score, c.snippet);
    }
}

fn print_trial(trial: &EvaluationResult) {
    println!("\nWord results");
    println!("  within correct:   {}", join_words(trial.correct.iter().map(|m| m.word.as_str())));
    println!("  within incorrect: {}", join_words(trial.misses.iter().map(String::as_str)));
    println!("  without:          {}", trial.absent);

    if trial.correct.is_empty() {
        return;
    }
    println!("\nCorrect matches");
    println!(
        "  {:<12} {:>6} {:>6} {:>6}  {:<35} {}",
        "word", "score", "top", "gap", "matching corpus value", "hint"
    );
    for m in &trial.correct {
        println!(
            "  {:<12} {:>6.3} {:>6.3} {:>6.3}  {:<35} {}",
            m.word,
            m.score,
            m.top_score,
            m.score_gap,
            truncate(&m.snippet, 35),
            m.clue
        );
    }
}

fn print_statistics(stats: &AggregateStatistics) {
    println!("\nStatistics ({} loops x {} samples)", stats.loops, stats.sample_count);
    println!("  average within correct:   {:.4}", stats.correct_fraction);
    println!("  average within incorrect: {:.4}", stats.miss_fraction);
    println!("  average within:           {:.4}", stats.within_fraction);
    println!("  average score gap:        {:.4}", stats.score_gap);
}

fn join_words<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let words: Vec<&str> = words.collect();
    if words.is_empty() { "-".to_string() } else { words.join(", ") }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
