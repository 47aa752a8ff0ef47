//! Prime-signature anagram search.
//!
//! Every letter maps to a distinct prime and a word maps to the product of its
//! letters' primes, so two words are anagrams exactly when their signatures are equal.
//! A phrase is searched in two ways:
//!
//! * [`search::CombinationSearch`] (iterative): sets of dictionary words whose letter
//!   counts and signature product match the phrase, checked on a worker pool.
//! * [`factor::factor`] (recursive): every ordered chain of dictionary signatures that
//!   multiplies to the phrase signature, as a memoized forest.

pub mod api;
pub mod context;
pub mod dictionary;
pub mod error;
pub mod factor;
pub mod format;
pub mod letters;
pub mod log;
pub mod search;
pub mod subwords;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use api::{iterative_anagrams, iterative_lines, recursive_anagrams, Decomposition};
pub use context::Context;
pub use dictionary::{Dictionary, DictionaryBuilder};
pub use error::{AnagramError, Result};
pub use factor::{FactorForest, FactorNode, Factorizer};
pub use format::{format_combination, format_factor_tree};
pub use letters::{encode, Signature};
pub use search::{Combination, CombinationSearch, SearchConfig};
