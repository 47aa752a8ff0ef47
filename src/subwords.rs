use hashbrown::HashSet;

use crate::dictionary::Dictionary;
use crate::letters::{letter_counts, Signature, PRIMES};

/// Signatures of every letter subset of `phrase` that is a dictionary key,
/// largest first. Characters outside `a..z` are ignored.
///
/// Subsets of positions that pick the same letters encode to the same value, so the
/// walk chooses how many of each distinct letter to take instead of which positions.
/// That visits each distinct sub-multiset once: at most `2^len` candidates, and far
/// fewer when letters repeat. Only integers are produced along the way.
pub fn sub_signatures(phrase: &str, dictionary: &Dictionary) -> Vec<Signature> {
    let letters: Vec<(u32, usize)> = letter_counts(phrase)
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(idx, &count)| (PRIMES[idx], count))
        .collect();

    let mut found = HashSet::new();
    walk(&letters, Signature::one(), dictionary, &mut found);
    found.remove(&Signature::one());

    let mut result: Vec<Signature> = found.into_iter().collect();
    result.sort_unstable_by(|a, b| b.cmp(a));
    log::debug!(
        "{} sub-signatures of {:?} out of {} candidates",
        result.len(),
        phrase,
        candidate_count(phrase)
    );
    result
}

fn walk(letters: &[(u32, usize)], product: Signature, dictionary: &Dictionary, found: &mut HashSet<Signature>) {
    let Some((&(prime, count), rest)) = letters.split_first() else {
        if dictionary.contains(&product) {
            found.insert(product);
        }
        return;
    };
    let mut product = product;
    for _ in 0..count {
        walk(rest, product.clone(), dictionary, found);
        product = product * prime;
    }
    walk(rest, product, dictionary, found);
}

/// Number of non-empty distinct letter sub-multisets of `phrase`.
pub fn candidate_count(phrase: &str) -> u128 {
    letter_counts(phrase)
        .iter()
        .fold(1u128, |acc, &count| acc.saturating_mul(count as u128 + 1))
        - 1
}
