use crate::context::Context;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::factor::{factor, FactorForest};
use crate::format::{format_combination, format_factor_tree};
use crate::search::{Combination, CombinationSearch, SearchConfig};

/// Every multi-word anagram of `words` within the configured word count.
pub fn iterative_anagrams<S: AsRef<str>>(
    dictionary: &Dictionary,
    words: &[S],
    config: SearchConfig,
) -> Result<Vec<Combination>> {
    let ctx = Context::new(dictionary, words)?;
    CombinationSearch::new(config).search(&ctx)
}

/// Same as [`iterative_anagrams`], rendered one anagram per line and sorted.
pub fn iterative_lines<S: AsRef<str>>(
    dictionary: &Dictionary,
    words: &[S],
    config: SearchConfig,
) -> Result<Vec<String>> {
    let mut lines: Vec<String> = iterative_anagrams(dictionary, words, config)?
        .iter()
        .map(|c| format_combination(c, dictionary))
        .collect();
    lines.sort();
    Ok(lines)
}

/// Result of a recursive search.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub phrase: String,
    pub forest: FactorForest,
}

impl Decomposition {
    pub fn to_tree(&self, dictionary: &Dictionary) -> String {
        format_factor_tree(&self.phrase, &self.forest, dictionary)
    }

    pub fn to_json(&self, dictionary: &Dictionary) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.forest.mapping(dictionary))?)
    }
}

/// Every ordered chain of dictionary words whose letters make up `words`.
pub fn recursive_anagrams<S: AsRef<str>>(dictionary: &Dictionary, words: &[S]) -> Result<Decomposition> {
    let ctx = Context::new(dictionary, words)?;
    let forest = factor(&ctx.signature, &ctx.sub_signatures);
    log::info!(
        "Found {} decomposition(s) of {:?}",
        forest.path_count(),
        ctx.phrase
    );
    Ok(Decomposition {
        phrase: ctx.phrase,
        forest,
    })
}
