//! Recursive anagram search: every way to write a signature as a chain of factors.
//!
//! Each remaining value is decomposed once and memoized, so subtrees for equal
//! remainders are the same `Rc` allocation. The forest is therefore a DAG; tree-shaped
//! views ([`FactorForest::paths`], [`crate::format::format_factor_tree`]) expand it on
//! demand, and [`FactorForest::mapping`] serializes it as nested JSON objects.

use std::rc::Rc;

use hashbrown::HashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dictionary::Dictionary;
use crate::format::format_group;
use crate::letters::Signature;

pub type NodeRef = Rc<FactorNode>;

/// One factor of a decomposition and every way to decompose what it leaves over.
///
/// A node with no children is a leaf: its factor used up the remaining value exactly.
#[derive(Debug, PartialEq, Eq)]
pub struct FactorNode {
    factor: Signature,
    children: FactorForest,
}

impl FactorNode {
    pub fn new(factor: Signature, children: FactorForest) -> Self {
        FactorNode { factor, children }
    }

    pub fn leaf(factor: Signature) -> Self {
        FactorNode::new(factor, FactorForest::empty())
    }

    pub fn factor(&self) -> &Signature {
        &self.factor
    }

    pub fn children(&self) -> &FactorForest {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// All decompositions of one value, as sibling nodes in factor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorForest {
    nodes: Rc<[NodeRef]>,
    paths: u64,
}

impl FactorForest {
    pub fn empty() -> Self {
        FactorForest {
            nodes: Rc::from(Vec::new()),
            paths: 0,
        }
    }

    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of root-to-leaf decompositions (saturating).
    pub fn path_count(&self) -> u64 {
        self.paths
    }

    /// Every decomposition spelled out as its chain of factors.
    pub fn paths(&self) -> Vec<Vec<Signature>> {
        let mut out = Vec::new();
        let mut chain = Vec::new();
        collect_paths(self, &mut chain, &mut out);
        out
    }

    /// Nested `{ "<words>": { ... } }` view for serde; leaves map to `{}`.
    pub fn mapping<'f, 'd>(&'f self, dictionary: &'d Dictionary) -> ForestMapping<'f, 'd> {
        ForestMapping {
            forest: self,
            dictionary,
        }
    }
}

fn collect_paths(forest: &FactorForest, chain: &mut Vec<Signature>, out: &mut Vec<Vec<Signature>>) {
    for node in forest.nodes() {
        chain.push(node.factor.clone());
        if node.is_leaf() {
            out.push(chain.clone());
        } else {
            collect_paths(&node.children, chain, out);
        }
        chain.pop();
    }
}

/// Memoized decomposition of values over a fixed, ordered factor list.
pub struct Factorizer<'a> {
    factors: &'a [Signature],
    memo: HashMap<Signature, FactorForest>,
}

impl<'a> Factorizer<'a> {
    pub fn new(factors: &'a [Signature]) -> Self {
        Factorizer {
            factors,
            memo: HashMap::new(),
        }
    }

    /// Distinct remainders decomposed so far.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Decompose `value`, trying factors in list order.
    ///
    /// A factor equal to `value` is a leaf. A proper divisor becomes a node whose
    /// children decompose the quotient, kept only if that quotient decomposes at all.
    /// Factors of 1 are ignored since they never shrink the value.
    pub fn factor(&mut self, value: &Signature) -> FactorForest {
        if let Some(hit) = self.memo.get(value) {
            return hit.clone();
        }

        let factors = self.factors;
        let mut nodes = Vec::new();
        let mut paths: u64 = 0;
        for factor in factors {
            if factor.is_unit() {
                continue;
            }
            if factor == value {
                nodes.push(Rc::new(FactorNode::leaf(factor.clone())));
                paths = paths.saturating_add(1);
            } else if let Some(rest) = value.checked_div_exact(factor) {
                let children = self.factor(&rest);
                if !children.is_empty() {
                    paths = paths.saturating_add(children.paths);
                    nodes.push(Rc::new(FactorNode::new(factor.clone(), children)));
                }
            }
        }

        let forest = FactorForest {
            nodes: Rc::from(nodes),
            paths,
        };
        self.memo.insert(value.clone(), forest.clone());
        forest
    }
}

/// Decompose `value` over `factors` with a fresh memo.
pub fn factor(value: &Signature, factors: &[Signature]) -> FactorForest {
    let mut factorizer = Factorizer::new(factors);
    let forest = factorizer.factor(value);
    log::debug!(
        "Factored {value}: {} decomposition(s), {} distinct remainder(s)",
        forest.path_count(),
        factorizer.memo_len()
    );
    forest
}

/// Serializable view of a [`FactorForest`] with word-group labels.
pub struct ForestMapping<'f, 'd> {
    forest: &'f FactorForest,
    dictionary: &'d Dictionary,
}

impl Serialize for ForestMapping<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.forest.len()))?;
        for node in self.forest.nodes() {
            let label = factor_label(&node.factor, self.dictionary);
            map.serialize_entry(&label, &node.children.mapping(self.dictionary))?;
        }
        map.end()
    }
}

/// Words for a factor, or the bare number if the dictionary has none.
pub fn factor_label(factor: &Signature, dictionary: &Dictionary) -> String {
    match dictionary.get(factor) {
        Some(words) => format_group(words),
        None => factor.to_string(),
    }
}
