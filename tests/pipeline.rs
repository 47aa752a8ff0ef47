//! End-to-end runs of the build -> save -> load -> search pipeline through files.

use std::fs;

use prime_anagram::dictionary::{read_word_list, Dictionary, DictionaryBuilder};
use prime_anagram::{iterative_lines, recursive_anagrams, AnagramError, SearchConfig};

const WORDS: &str = "dormitory\ndirty\nroom\nmoor\ndirt\nI\nx\nmy\nrod\n";
const SHORT_WORDS: &str = "room\nmoor\nmy\nrod\ndirt\n";

fn build_into(dir: &std::path::Path) -> std::path::PathBuf {
    let words = dir.join("words.txt");
    let short = dir.join("short.txt");
    let output = dir.join("dictionary.json");
    fs::write(&words, WORDS).unwrap();
    fs::write(&short, SHORT_WORDS).unwrap();

    let short_list = read_word_list(&short).unwrap();
    let mut builder = DictionaryBuilder::new().with_short_words(short_list.lines());
    builder.add_word_list(&read_word_list(&words).unwrap());
    builder.build().save(&output).unwrap();
    output
}

#[test]
fn built_dictionary_drives_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = Dictionary::load(build_into(dir.path())).unwrap();

    // "x" is a single letter other than a/i
    assert_eq!(dictionary.word_count(), 8);

    let lines = iterative_lines(&dictionary, &["Dirty", "Room"], SearchConfig::default()).unwrap();
    assert_eq!(lines, vec!["[dirty] [room, moor]".to_string(), "[dormitory]".to_string()]);

    let decomposition = recursive_anagrams(&dictionary, &["dirty room"]).unwrap();
    assert!(decomposition.forest.path_count() >= 3);
    let json = decomposition.to_json(&dictionary).unwrap();
    assert!(json.contains("\"[dormitory]\": {}"));
}

#[test]
fn missing_inputs_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_word_list(dir.path().join("absent.txt")),
        Err(AnagramError::Io { .. })
    ));
    assert!(matches!(
        Dictionary::load(dir.path().join("absent.json")),
        Err(AnagramError::DictionaryLoad { .. })
    ));
}
