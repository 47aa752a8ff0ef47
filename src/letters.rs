use std::fmt;
use std::iter::Product;
use std::ops::Mul;
use std::str::FromStr;

use num_bigint::{BigUint, ParseBigIntError};
use num_traits::{One, Zero};

use crate::error::{AnagramError, Result};

/// The first 26 primes, indexed by `letter - 'a'`.
pub const PRIMES: [u32; 26] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101,
];

/// Product of the primes of a letter multiset.
///
/// By unique factorization two multisets share a signature iff they hold the same
/// letters with the same multiplicities, so anagram tests are integer comparisons.
/// The product is unbounded, so phrases of any length encode exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(BigUint);

impl Signature {
    /// Signature of the empty multiset.
    pub fn one() -> Self {
        Signature(BigUint::one())
    }

    pub fn new(value: u64) -> Self {
        Signature(BigUint::from(value))
    }

    pub fn get(&self) -> &BigUint {
        &self.0
    }

    pub fn is_unit(&self) -> bool {
        self.0.is_one()
    }

    pub fn divides(&self, other: &Signature) -> bool {
        !self.0.is_zero() && (&other.0 % &self.0).is_zero()
    }

    /// `self / divisor` when the division leaves no remainder.
    pub fn checked_div_exact(&self, divisor: &Signature) -> Option<Signature> {
        if divisor.divides(self) {
            Some(Signature(&self.0 / &divisor.0))
        } else {
            None
        }
    }
}

impl Mul<&Signature> for &Signature {
    type Output = Signature;

    fn mul(self, rhs: &Signature) -> Signature {
        Signature(&self.0 * &rhs.0)
    }
}

/// Add one letter, given by its prime.
impl Mul<u32> for Signature {
    type Output = Signature;

    fn mul(self, prime: u32) -> Signature {
        Signature(self.0 * prime)
    }
}

impl<'a> Product<&'a Signature> for Signature {
    fn product<I: Iterator<Item = &'a Signature>>(iter: I) -> Self {
        iter.fold(Signature::one(), |acc, s| &acc * s)
    }
}

impl FromStr for Signature {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(Signature)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a lowercase table letter, `None` for anything else.
pub const fn letter_index(ch: char) -> Option<usize> {
    if ch.is_ascii_lowercase() {
        Some(ch as usize - 'a' as usize)
    } else {
        None
    }
}

pub const fn prime_of(ch: char) -> Option<u32> {
    match letter_index(ch) {
        Some(idx) => Some(PRIMES[idx]),
        None => None,
    }
}

/// Encode a run of lowercase letters as its signature.
pub fn encode(letters: &str) -> Result<Signature> {
    letters.chars().try_fold(Signature::one(), |acc, ch| {
        let prime = prime_of(ch).ok_or_else(|| AnagramError::InvalidCharacter {
            ch,
            input: letters.to_string(),
        })?;
        Ok(acc * prime)
    })
}

/// Join the words of a phrase, dropping whitespace and lowercasing.
///
/// Fails if nothing is left or if a character outside `a..z` remains.
pub fn normalize_phrase<S: AsRef<str>>(words: &[S]) -> Result<String> {
    let phrase: String = words
        .iter()
        .flat_map(|w| w.as_ref().chars())
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if phrase.is_empty() {
        return Err(AnagramError::EmptyPhrase);
    }
    if let Some(ch) = phrase.chars().find(|&c| letter_index(c).is_none()) {
        return Err(AnagramError::InvalidCharacter { ch, input: phrase });
    }
    Ok(phrase)
}

/// Per-letter occurrence counts. Characters outside `a..z` are not counted.
pub fn letter_counts(letters: &str) -> [usize; 26] {
    let mut counts = [0usize; 26];
    for idx in letters.chars().filter_map(letter_index) {
        counts[idx] += 1;
    }
    counts
}
