use itertools::Itertools;

use crate::dictionary::Dictionary;
use crate::factor::{factor_label, FactorForest};
use crate::search::Combination;

/// `[listen, silent, enlist]`
pub fn format_group<S: AsRef<str>>(words: &[S]) -> String {
    format!("[{}]", words.iter().map(<S as AsRef<str>>::as_ref).join(", "))
}

/// One line per combination: its word groups separated by spaces.
pub fn format_combination(combination: &Combination, dictionary: &Dictionary) -> String {
    combination
        .word_groups(dictionary)
        .into_iter()
        .map(format_group)
        .join(" ")
}

/// Draw the decomposition forest under a root line holding the phrase.
///
/// Shared subtrees are printed once per path that reaches them.
pub fn format_factor_tree(phrase: &str, forest: &FactorForest, dictionary: &Dictionary) -> String {
    // Each child gets a branch marker; the prefix carries the vertical rules of its ancestors.
    fn render(forest: &FactorForest, prefix: &str, dictionary: &Dictionary, out: &mut String) {
        let count = forest.len();
        for (idx, node) in forest.nodes().iter().enumerate() {
            let is_last = idx + 1 == count;
            out.push_str(prefix);
            out.push_str(if is_last { "└─ " } else { "├─ " });
            out.push_str(&factor_label(node.factor(), dictionary));
            out.push('\n');

            if !node.is_leaf() {
                let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
                render(node.children(), &child_prefix, dictionary, out);
            }
        }
    }

    let mut out = String::new();
    out.push_str(phrase);
    out.push('\n');
    render(forest, "", dictionary, &mut out);
    out
}
