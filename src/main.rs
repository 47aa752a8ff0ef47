use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use prime_anagram::api::recursive_anagrams;
use prime_anagram::context::Context;
use prime_anagram::dictionary::{read_word_list, Dictionary, DictionaryBuilder};
use prime_anagram::error::Result;
use prime_anagram::format::format_combination;
use prime_anagram::search::{CombinationSearch, SearchConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLELISM};

const DEFAULT_DICTIONARY: &str = "dictionary.json";

/// Find anagrams of a given word or phrase.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the signature dictionary from a newline-separated word list
    Build {
        /// Word list to build the dictionary from
        #[arg(short = 'f', long = "file", default_value = "20k_words.txt")]
        file: PathBuf,

        /// Allow-list for two to four letter words
        #[arg(short = 's', long, default_value = "scrabble_words.txt")]
        short_words: PathBuf,

        /// Where to write the dictionary
        #[arg(short = 'o', long, default_value = DEFAULT_DICTIONARY)]
        output: PathBuf,
    },

    /// Decompose the phrase recursively into chains of words
    Recursive {
        /// The word(s) to find anagrams for. Spaces are ignored.
        #[arg(required = true)]
        words: Vec<String>,

        /// Write the output as JSON
        #[arg(long)]
        json: bool,

        #[arg(short = 'd', long, default_value = DEFAULT_DICTIONARY)]
        dictionary: PathBuf,
    },

    /// Search word combinations in parallel, one anagram per line
    Iterative {
        /// The word(s) to find anagrams for. Spaces are ignored.
        #[arg(required = true)]
        words: Vec<String>,

        #[arg(short = 'd', long, default_value = DEFAULT_DICTIONARY)]
        dictionary: PathBuf,

        /// Worker threads
        #[arg(short = 't', long, default_value_t = DEFAULT_PARALLELISM)]
        threads: usize,

        /// Exclusive bound on words per anagram (default depends on phrase length)
        #[arg(short = 'm', long)]
        max_words: Option<usize>,

        /// Candidates checked per worker task
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
}

fn main() -> ExitCode {
    let debug_enabled = std::env::var(prime_anagram::log::DEBUG_ENV).is_ok();
    prime_anagram::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    match Cli::parse().command {
        Command::Build {
            file,
            short_words,
            output,
        } => build(&file, &short_words, &output),
        Command::Recursive {
            words,
            json,
            dictionary,
        } => recursive(&words, json, &dictionary),
        Command::Iterative {
            words,
            dictionary,
            threads,
            max_words,
            batch_size,
        } => {
            let config = SearchConfig {
                max_words,
                parallelism: threads,
                batch_size,
            };
            iterative(&words, config, &dictionary)
        }
    }
}

fn build(file: &Path, short_words: &Path, output: &Path) -> Result<()> {
    let t_build = Instant::now();
    let short_list = read_word_list(short_words)?;
    let mut builder = DictionaryBuilder::new().with_short_words(short_list.lines());
    let kept = builder.add_word_list(&read_word_list(file)?);
    let dictionary = builder.build();
    dictionary.save(output)?;
    log::info!(
        "Kept {kept} words in {} signatures; wrote {} in {:.3}s",
        dictionary.len(),
        output.display(),
        t_build.elapsed().as_secs_f64()
    );
    Ok(())
}

fn load(path: &Path) -> Result<Dictionary> {
    let t_load = Instant::now();
    let dictionary = Dictionary::load(path)?;
    log::info!(
        "Loaded {} signatures in {:.3}s",
        dictionary.len(),
        t_load.elapsed().as_secs_f64()
    );
    Ok(dictionary)
}

fn recursive(words: &[String], json: bool, path: &Path) -> Result<()> {
    let dictionary = load(path)?;

    let t_solve = Instant::now();
    let decomposition = recursive_anagrams(&dictionary, words)?;
    log::info!("Solved in {:.3}s", t_solve.elapsed().as_secs_f64());

    if json {
        println!("{}", decomposition.to_json(&dictionary)?);
    } else {
        print!("{}", decomposition.to_tree(&dictionary));
    }
    Ok(())
}

fn iterative(words: &[String], config: SearchConfig, path: &Path) -> Result<()> {
    let dictionary = load(path)?;
    let ctx = Context::new(&dictionary, words)?;

    let t_solve = Instant::now();
    let count = CombinationSearch::new(config).for_each(&ctx, |combination| {
        println!("{}", format_combination(&combination, &dictionary));
    })?;
    if count == 0 {
        log::info!("No anagrams found for {:?}", ctx.phrase);
    }
    log::info!("Searched in {:.3}s", t_solve.elapsed().as_secs_f64());
    Ok(())
}
