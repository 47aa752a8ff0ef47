use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use crate::api::recursive_anagrams;
use crate::dictionary::Dictionary;

fn words_from_js(value: JsValue) -> Result<Vec<String>, JsValue> {
    from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Words must be an array of strings: {e}")))
}

/// WebAssembly entry point: decompose `phrase` over the given word list.
///
/// The word list is used as-is (no short-word filtering). Returns the nested
/// `{ "<words>": { ... } }` mapping as a plain JS object.
#[wasm_bindgen]
pub fn recursive_anagrams_js(phrase: String, words: JsValue) -> Result<JsValue, JsValue> {
    crate::log::init_logger(false);
    let words_vec = words_from_js(words)?;
    if words_vec.is_empty() {
        return Err(JsValue::from_str("Please supply at least one dictionary word."));
    }

    let dictionary = Dictionary::from_words(&words_vec);
    let decomposition = recursive_anagrams(&dictionary, &[phrase])
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let serializer = Serializer::json_compatible();
    decomposition
        .forest
        .mapping(&dictionary)
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}
