use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::letters::{encode, normalize_phrase, Signature};
use crate::subwords::sub_signatures;

/// Everything one search needs, computed once per phrase and then only read.
///
/// Both search modes take a `&Context`; nothing in it changes after [`Context::new`],
/// so it can be shared freely across worker threads.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    pub dictionary: &'a Dictionary,
    /// Normalized phrase: lowercase letters only.
    pub phrase: String,
    pub signature: Signature,
    /// Dictionary signatures of letter subsets of the phrase, largest first.
    pub sub_signatures: Vec<Signature>,
}

impl<'a> Context<'a> {
    /// Normalize and validate `words`, then enumerate the phrase's sub-signatures.
    ///
    /// Input errors surface here, before any search work starts.
    pub fn new<S: AsRef<str>>(dictionary: &'a Dictionary, words: &[S]) -> Result<Self> {
        let phrase = normalize_phrase(words)?;
        let signature = encode(&phrase)?;
        let sub_signatures = sub_signatures(&phrase, dictionary);
        Ok(Context {
            dictionary,
            phrase,
            signature,
            sub_signatures,
        })
    }

    pub fn phrase_len(&self) -> usize {
        self.phrase.len()
    }

    /// Letter count of the words behind `signature` (0 if it is not in the dictionary).
    pub fn word_len(&self, signature: &Signature) -> usize {
        self.dictionary.word_len(signature).unwrap_or(0)
    }
}
