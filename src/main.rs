//! Puzzle Solver - CLI
//!
//! Transposals, letter banks and cryptogram tools over a dictionary trie.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use puzzle_solver::{
    commands::{
        WordListKind, analyze_frequencies, caesar, find_word_lists, generate_ngrams, run_hillclimb,
        run_repl, solve_cipher,
    },
    config::{FileConfig, HillclimbConfig, SearchBounds, SubstitutionConfig},
    dictionary::{load_dictionary_file, load_frequency_file, open_input},
    logging::setup_logging,
    ngrams::DEFAULT_NGRAM_SIZE,
    output::{
        print_caesar_result, print_frequency_result, print_hillclimb_result, print_json,
        print_ngram_summary, print_substitution_result, print_word_list_result,
    },
    solver::SearchControl,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "puzzle_solver",
    about = "Word puzzle and cryptogram solver: transposals, letter banks, substitution ciphers",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with default settings for each command
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Stop backtracking searches after this many node visits
    #[arg(long, global = true)]
    budget: Option<usize>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// No log output at all
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find multi-word anagrams using every letter exactly once
    Transposal {
        #[command(flatten)]
        search: WordSearchArgs,
    },

    /// Find words and phrases using exactly the given set of letters
    LetterBank {
        #[command(flatten)]
        search: WordSearchArgs,
    },

    /// Solve a substitution cipher by matching word shapes against a dictionary
    Substitution {
        /// Dictionary file, one word per line (- for stdin)
        #[arg(short, long)]
        dictionary: PathBuf,

        /// Workers the first word's candidates are split across
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// N-gram frequency table used to rank solutions
        #[arg(short = 'f', long)]
        frequency_file: Option<PathBuf>,

        /// The ciphertext
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Work through a substitution cipher by hand
    Repl {
        /// The ciphertext
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Search for a substitution key by hill climbing on n-gram statistics
    Hillclimb {
        /// N-gram frequency table (- for stdin)
        #[arg(short = 'f', long)]
        frequency_file: PathBuf,

        #[command(flatten)]
        tuning: HillclimbArgs,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,

        /// The ciphertext
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Build an n-gram frequency table from a corpus
    Ngrams {
        /// Corpus file (- for stdin)
        #[arg(short, long)]
        corpus: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// N-gram length
        #[arg(short = 'n', long, default_value_t = DEFAULT_NGRAM_SIZE)]
        ngram_length: usize,
    },

    /// Print every Caesar shift of the text
    Caesar {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the frequency of each upper case letter
    Freq {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(Args)]
struct WordSearchArgs {
    /// Dictionary file, one word per line (- for stdin)
    #[arg(short, long)]
    dictionary: PathBuf,

    #[arg(long)]
    min_word_length: Option<usize>,

    #[arg(long)]
    max_word_length: Option<usize>,

    #[arg(long)]
    min_words: Option<usize>,

    #[arg(long)]
    max_words: Option<usize>,

    /// Letters to use
    #[arg(required = true)]
    text: Vec<String>,
}

impl WordSearchArgs {
    /// Flags win over the file's values
    fn bounds(&self, defaults: SearchBounds) -> SearchBounds {
        SearchBounds {
            min_word_len: self.min_word_length.unwrap_or(defaults.min_word_len),
            max_word_len: self.max_word_length.unwrap_or(defaults.max_word_len),
            min_words: self.min_words.unwrap_or(defaults.min_words),
            max_words: self.max_words.unwrap_or(defaults.max_words),
        }
    }
}

#[derive(Args)]
struct HillclimbArgs {
    /// Generations to run
    #[arg(short, long)]
    generations: Option<usize>,

    /// Random swaps per mutation
    #[arg(short, long)]
    mutations: Option<usize>,

    /// Iterations without improvement before starting from a new random key
    #[arg(short, long)]
    regen_after: Option<usize>,

    /// Number of top candidates to keep
    #[arg(short, long)]
    candidates: Option<usize>,

    /// Neighbours evaluated at each step
    #[arg(short, long)]
    local_lookaround: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl HillclimbArgs {
    fn config(&self, defaults: HillclimbConfig) -> HillclimbConfig {
        HillclimbConfig {
            generations: self.generations.unwrap_or(defaults.generations),
            mutations: self.mutations.unwrap_or(defaults.mutations),
            regen_after: self.regen_after.unwrap_or(defaults.regen_after),
            candidate_count: self.candidates.unwrap_or(defaults.candidate_count),
            local_lookaround: self.local_lookaround.unwrap_or(defaults.local_lookaround),
            seed: self.seed.or(defaults.seed),
        }
    }
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet).context("failed to initialise logging")?;

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FileConfig::default(),
    };
    let control = cli
        .budget
        .map_or_else(SearchControl::new, SearchControl::with_budget);

    match cli.command {
        Commands::Transposal { search } => run_word_list_command(
            WordListKind::Transposal,
            &search,
            file_config.transposal,
            &control,
            cli.json,
        ),
        Commands::LetterBank { search } => run_word_list_command(
            WordListKind::LetterBank,
            &search,
            file_config.letter_bank,
            &control,
            cli.json,
        ),
        Commands::Substitution {
            dictionary,
            concurrency,
            frequency_file,
            text,
        } => {
            let config = SubstitutionConfig {
                concurrency: concurrency.unwrap_or(file_config.substitution.concurrency),
            };
            run_substitution_command(
                &dictionary,
                frequency_file.as_deref(),
                &text.join(" "),
                &config,
                &control,
                cli.json,
            )
        }
        Commands::Repl { text } => {
            run_repl(&text.join(" "), io::stdin().lock(), io::stdout().lock())
                .context("interactive session failed")?;
            Ok(())
        }
        Commands::Hillclimb {
            frequency_file,
            tuning,
            no_progress,
            text,
        } => {
            let config = tuning.config(file_config.hillclimb);
            let model = load_frequency_file(&frequency_file).with_context(|| {
                format!("failed to load frequency table {}", frequency_file.display())
            })?;
            let show_progress = !no_progress && !cli.json && !cli.quiet;
            let result = run_hillclimb(&text.join(" "), &model, &config, &control, show_progress);

            if cli.json {
                print_json(&result)?;
            } else {
                print_hillclimb_result(&result);
            }
            Ok(())
        }
        Commands::Ngrams {
            corpus,
            output,
            ngram_length,
        } => run_ngrams_command(&corpus, output.as_deref(), ngram_length, cli.json),
        Commands::Caesar { text } => {
            let result = caesar(&text.join(" "));
            if cli.json {
                print_json(&result)?;
            } else {
                print_caesar_result(&result);
            }
            Ok(())
        }
        Commands::Freq { text } => {
            let result = analyze_frequencies(&text.join(" "));
            if cli.json {
                print_json(&result)?;
            } else {
                print_frequency_result(&result);
            }
            Ok(())
        }
    }
}

fn run_word_list_command(
    kind: WordListKind,
    search: &WordSearchArgs,
    defaults: SearchBounds,
    control: &SearchControl,
    json: bool,
) -> Result<()> {
    let dictionary = load_dictionary_file(&search.dictionary).with_context(|| {
        format!("failed to load dictionary {}", search.dictionary.display())
    })?;
    let bounds = search.bounds(defaults);
    let result = find_word_lists(kind, &search.text.join(" "), &dictionary, &bounds, control);

    if json {
        print_json(&result)?;
    } else {
        print_word_list_result(&result);
    }
    Ok(())
}

fn run_substitution_command(
    dictionary: &Path,
    frequency_file: Option<&Path>,
    ciphertext: &str,
    config: &SubstitutionConfig,
    control: &SearchControl,
    json: bool,
) -> Result<()> {
    let trie = load_dictionary_file(dictionary)
        .with_context(|| format!("failed to load dictionary {}", dictionary.display()))?;
    let model = frequency_file
        .map(|path| {
            load_frequency_file(path)
                .with_context(|| format!("failed to load frequency table {}", path.display()))
        })
        .transpose()?;

    let result = solve_cipher(ciphertext, &trie, config, model.as_ref(), control);
    if json {
        print_json(&result)?;
    } else {
        print_substitution_result(&result);
    }
    Ok(())
}

fn run_ngrams_command(
    corpus: &Path,
    output: Option<&Path>,
    ngram_length: usize,
    json: bool,
) -> Result<()> {
    let reader = open_input(corpus)
        .with_context(|| format!("failed to open corpus {}", corpus.display()))?;

    let summary = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let summary = generate_ngrams(reader, ngram_length, &mut writer)?;
            writer.flush()?;
            summary
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            let summary = generate_ngrams(reader, ngram_length, &mut writer)?;
            writer.flush()?;
            summary
        }
    };

    if json {
        // stdout may hold the table itself, so the summary goes to stderr
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_ngram_summary(&summary);
    }
    Ok(())
}
