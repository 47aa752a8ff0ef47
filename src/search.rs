//! Iterative anagram search.
//!
//! Combinations of the phrase's sub-signatures are tried by increasing size. Each
//! size-`k` subset goes through two filters:
//!
//! 1. the letter counts of its words must add up to the phrase length (cheap);
//! 2. the product of its signatures must equal the phrase signature (exact).
//!
//! Both stages run on a dedicated rayon pool. Stage one produces batches of candidates
//! that passed the letter-count test; stage two checks whole batches at a time so the
//! pool is not flooded with tiny tasks. Results arrive in no particular order.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use smallvec::SmallVec;

use crate::context::Context;
use crate::dictionary::Dictionary;
use crate::error::{AnagramError, Result};
use crate::letters::Signature;

pub const DEFAULT_PARALLELISM: usize = 8;
pub const DEFAULT_BATCH_SIZE: usize = 250;
/// Upper bound of the word-count heuristic.
pub const MAX_WORDS_CAP: usize = 5;

/// Indices into the context's sub-signatures, in increasing order.
type Candidate = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Exclusive bound on words per anagram; `None` picks it from the phrase length.
    pub max_words: Option<usize>,
    /// Worker threads.
    pub parallelism: usize,
    /// Candidates per filter task.
    pub batch_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_words: None,
            parallelism: DEFAULT_PARALLELISM,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SearchConfig {
    pub fn max_words_for(&self, phrase_len: usize) -> usize {
        self.max_words
            .unwrap_or_else(|| default_max_words(phrase_len))
    }
}

/// `min(round(len / 4) + 1, 5)`, rounding halves to even.
///
/// Combination sizes `1..max_words` are searched, so short phrases only get one- or
/// two-word anagrams. Phrases of one or two letters get none at all.
pub const fn default_max_words(phrase_len: usize) -> usize {
    let quarter = phrase_len / 4;
    let rem = phrase_len % 4;
    let rounded = if rem > 2 || (rem == 2 && quarter % 2 == 1) {
        quarter + 1
    } else {
        quarter
    };
    if rounded + 1 < MAX_WORDS_CAP {
        rounded + 1
    } else {
        MAX_WORDS_CAP
    }
}

/// A set of distinct sub-signatures whose words use exactly the phrase's letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    signatures: SmallVec<[Signature; 4]>,
}

impl Combination {
    /// Members are kept largest first, the order the search produces them in.
    pub fn new(signatures: impl IntoIterator<Item = Signature>) -> Self {
        let mut signatures: SmallVec<[Signature; 4]> = signatures.into_iter().collect();
        signatures.sort_unstable_by(|a, b| b.cmp(a));
        Combination { signatures }
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Product of the member signatures.
    pub fn product(&self) -> Signature {
        self.signatures.iter().product()
    }

    pub fn letter_count(&self, dictionary: &Dictionary) -> usize {
        self.signatures
            .iter()
            .filter_map(|s| dictionary.word_len(s))
            .sum()
    }

    /// The anagram class behind each member signature.
    pub fn word_groups<'d>(&self, dictionary: &'d Dictionary) -> Vec<&'d [String]> {
        self.signatures
            .iter()
            .filter_map(|s| dictionary.get(s))
            .collect()
    }
}

/// Runs the two-stage combination search on its own worker pool.
#[derive(Debug, Clone, Default)]
pub struct CombinationSearch {
    config: SearchConfig,
}

impl CombinationSearch {
    pub fn new(config: SearchConfig) -> Self {
        CombinationSearch { config }
    }

    fn pool(&self) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.config.parallelism.max(1))
            .thread_name(|idx| format!("anagram-worker-{idx}"))
            .build()
            .map_err(|e| AnagramError::ThreadPool(e.to_string()))
    }

    /// All accepted combinations, in arbitrary order.
    pub fn search(&self, ctx: &Context<'_>) -> Result<Vec<Combination>> {
        let pool = self.pool()?;
        let max_words = self.log_start(ctx);
        let found: Vec<Combination> =
            pool.install(|| accepted(ctx, max_words, self.batch_size()).collect());
        log::info!("Found {} combination(s)", found.len());
        Ok(found)
    }

    /// Hand each accepted combination to `sink` as soon as a worker finds it.
    ///
    /// `sink` runs on the worker threads, concurrently and in no particular order.
    /// Returns the number of combinations delivered.
    pub fn for_each<F>(&self, ctx: &Context<'_>, sink: F) -> Result<usize>
    where
        F: Fn(Combination) + Sync + Send,
    {
        let pool = self.pool()?;
        let max_words = self.log_start(ctx);
        let count = pool.install(|| {
            accepted(ctx, max_words, self.batch_size())
                .map(|combination| sink(combination))
                .count()
        });
        log::info!("Found {count} combination(s)");
        Ok(count)
    }

    fn batch_size(&self) -> usize {
        self.config.batch_size.max(1)
    }

    fn log_start(&self, ctx: &Context<'_>) -> usize {
        let max_words = self.config.max_words_for(ctx.phrase_len());
        log::info!(
            "Searching {:?}: {} sub-signature(s), up to {} word(s), {} thread(s)",
            ctx.phrase,
            ctx.sub_signatures.len(),
            max_words.saturating_sub(1),
            self.config.parallelism.max(1)
        );
        max_words
    }
}

fn accepted<'c>(
    ctx: &'c Context<'c>,
    max_words: usize,
    batch_size: usize,
) -> impl ParallelIterator<Item = Combination> + 'c {
    let target = &ctx.signature;
    let lengths: Vec<usize> = ctx.sub_signatures.iter().map(|s| ctx.word_len(s)).collect();
    let phrase_len = ctx.phrase_len();
    let tasks: Vec<(usize, usize)> = (1..max_words)
        .flat_map(|size| (0..lengths.len()).map(move |first| (size, first)))
        .collect();

    tasks
        .into_par_iter()
        .flat_map(move |(size, first)| {
            pre_filtered(&lengths, phrase_len, size, first, batch_size).into_par_iter()
        })
        .flat_map_iter(move |batch| {
            batch.into_iter().filter_map(move |candidate| {
                let members = candidate.iter().map(move |&idx| &ctx.sub_signatures[idx]);
                if members.clone().product::<Signature>() == *target {
                    Some(Combination::new(members.cloned()))
                } else {
                    None
                }
            })
        })
}

/// Every size-`size` subset whose smallest index is `first` and whose word lengths
/// add up to the phrase length, packed into batches.
///
/// Word lengths are positive, so a branch whose partial sum already leaves too few
/// letters for the remaining slots can be cut without losing any subset that would
/// pass the length test.
fn pre_filtered(
    lengths: &[usize],
    phrase_len: usize,
    size: usize,
    first: usize,
    batch_size: usize,
) -> Vec<Vec<Candidate>> {
    let mut batches = Batches::new(batch_size);
    let first_len = lengths[first];
    if first_len == 0 || first_len > phrase_len {
        return Vec::new();
    }
    let mut current: Candidate = SmallVec::new();
    current.push(first);
    extend(lengths, first + 1, size - 1, phrase_len - first_len, &mut current, &mut batches);
    batches.finish()
}

fn extend(
    lengths: &[usize],
    start: usize,
    slots: usize,
    letters: usize,
    current: &mut Candidate,
    batches: &mut Batches,
) {
    if slots == 0 {
        if letters == 0 {
            batches.push(current.clone());
        }
        return;
    }
    for (idx, &len) in lengths.iter().enumerate().skip(start) {
        if len == 0 || len > letters || letters - len < slots - 1 {
            continue;
        }
        current.push(idx);
        extend(lengths, idx + 1, slots - 1, letters - len, current, batches);
        current.pop();
    }
}

struct Batches {
    size: usize,
    current: Vec<Candidate>,
    full: Vec<Vec<Candidate>>,
}

impl Batches {
    fn new(size: usize) -> Self {
        Batches {
            size,
            current: Vec::new(),
            full: Vec::new(),
        }
    }

    fn push(&mut self, candidate: Candidate) {
        self.current.push(candidate);
        if self.current.len() >= self.size {
            let batch = std::mem::take(&mut self.current);
            self.full.push(batch);
        }
    }

    fn finish(mut self) -> Vec<Vec<Candidate>> {
        if !self.current.is_empty() {
            self.full.push(self.current);
        }
        self.full
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::encode;
    use hashbrown::HashSet;
    use std::sync::Mutex;

    fn sig(word: &str) -> Signature {
        encode(word).unwrap()
    }

    fn sorted_letters<'a>(words: impl IntoIterator<Item = &'a str>) -> Vec<char> {
        let mut letters: Vec<char> = words.into_iter().flat_map(str::chars).collect();
        letters.sort_unstable();
        letters
    }

    #[test]
    fn max_words_heuristic_rounds_half_to_even() {
        let expected = [
            (1, 1),
            (2, 1),
            (3, 2),
            (4, 2),
            (5, 2),
            (6, 3),
            (8, 3),
            (10, 3),
            (12, 4),
            (14, 5),
            (16, 5),
            (40, 5),
        ];
        for (len, max) in expected {
            assert_eq!(default_max_words(len), max, "phrase length {len}");
        }
        let config = SearchConfig { max_words: Some(4), ..SearchConfig::default() };
        assert_eq!(config.max_words_for(2), 4);
    }

    #[test]
    fn listen_yields_one_class_of_three_words() {
        let dict = Dictionary::from_words(["silent", "enlist", "tinsel", "stone", "tin", "lens"]);
        let ctx = Context::new(&dict, &["listen"]).unwrap();
        let found = CombinationSearch::default().search(&ctx).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].signatures(), [sig("listen")]);
        assert_eq!(found[0].word_groups(&dict), vec![&["silent", "enlist", "tinsel"][..]]);
    }

    #[test]
    fn multi_word_combinations_are_found() {
        let dict = Dictionary::from_words(["dormitory", "dirty", "room", "dirt", "moor", "rod", "my"]);
        let ctx = Context::new(&dict, &["dirty room"]).unwrap();
        let found: HashSet<Combination> = CombinationSearch::default()
            .search(&ctx)
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<Combination> = [
            Combination::new([sig("dormitory")]),
            Combination::new([sig("room"), sig("dirty")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn every_result_reconstructs_the_phrase() {
        let dict = Dictionary::from_words([
            "astronomer", "moon", "starer", "no", "more", "stars", "moonstar", "rare", "ant",
            "mores", "nor", "roam", "stone", "tan", "rest", "master", "on", "ram", "treason",
            "senator", "a", "atone", "morn", "sort", "snore", "mart", "oars", "tomes",
        ]);
        let ctx = Context::new(&dict, &["moon starer"]).unwrap();
        let config = SearchConfig { max_words: Some(4), parallelism: 4, batch_size: 3 };
        let found = CombinationSearch::new(config).search(&ctx).unwrap();
        assert!(!found.is_empty());
        let phrase_letters = sorted_letters([ctx.phrase.as_str()]);
        for combination in &found {
            assert_eq!(combination.letter_count(&dict), ctx.phrase_len());
            assert_eq!(combination.product(), ctx.signature);
            let words = combination
                .word_groups(&dict)
                .into_iter()
                .map(|group| group[0].as_str());
            assert_eq!(sorted_letters(words), phrase_letters);
        }
    }

    #[test]
    fn results_do_not_depend_on_pool_size() {
        let dict = Dictionary::from_words([
            "dormitory", "dirty", "room", "dirt", "moor", "my", "rod", "tidy", "dry", "motor",
            "tom", "i", "dim", "tory", "rot", "rid", "dory",
        ]);
        let ctx = Context::new(&dict, &["dirtyroom"]).unwrap();
        let run = |parallelism, batch_size| {
            let config = SearchConfig { max_words: Some(5), parallelism, batch_size };
            CombinationSearch::new(config)
                .search(&ctx)
                .unwrap()
                .into_iter()
                .collect::<HashSet<_>>()
        };
        let single = run(1, 1);
        assert_eq!(single, run(8, 250));
        assert_eq!(single, run(3, 2));
    }

    #[test]
    fn for_each_streams_every_result() {
        let dict = Dictionary::from_words(["dormitory", "dirty", "room"]);
        let ctx = Context::new(&dict, &["dirty", "room"]).unwrap();
        let seen = Mutex::new(Vec::new());
        let count = CombinationSearch::default()
            .for_each(&ctx, |c| seen.lock().unwrap().push(c))
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen.into_inner().unwrap().len(), 2);
    }

    #[test]
    fn a_signature_is_never_used_twice() {
        let dict = Dictionary::from_words(["pa"]);
        let ctx = Context::new(&dict, &["papa"]).unwrap();
        let config = SearchConfig { max_words: Some(3), ..SearchConfig::default() };
        assert!(CombinationSearch::new(config).search(&ctx).unwrap().is_empty());
    }

    #[test]
    fn long_phrases_are_searched() {
        let dict = Dictionary::from_words(["clinteastwood", "oldwestaction", "zzz", "old"]);
        let ctx = Context::new(&dict, &["clint eastwood old west action zzz"]).unwrap();
        let config = SearchConfig { max_words: Some(4), ..SearchConfig::default() };
        let found = CombinationSearch::new(config).search(&ctx).unwrap();
        let expected = Combination::new([sig("clinteastwood"), sig("oldwestaction"), sig("zzz")]);
        assert_eq!(found, vec![expected]);
    }

    #[test]
    fn no_sub_signatures_means_no_results() {
        let dict = Dictionary::from_words(["xyz"]);
        let ctx = Context::new(&dict, &["abc"]).unwrap();
        assert!(CombinationSearch::default().search(&ctx).unwrap().is_empty());
    }
}
