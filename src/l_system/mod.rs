//! The l_system module provides the Lindenmayer grammar used to grow trees.
//! Take a look at the [`crate::l_system::LSystem`] struct for details, and
//! [`crate::l_system::catalog`] for the eight stock tree grammars.

use std::collections::HashMap;

pub mod catalog;

pub use catalog::{catalog_entry, random_entry, CATALOG_SIZE};

/// Upper bound for iteration counts coming from the parameter surface.
/// The expander itself does not enforce it.
pub const MAX_ITERATIONS: u32 = 7;

/// Symbol to replacement mapping. Symbols without an entry are fixed points of
/// the rewrite and are copied through unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ruleset {
    rules: HashMap<char, String>,
}

impl Ruleset {
    pub fn new<I, S>(rules: I) -> Ruleset
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Ruleset {
            rules: rules.into_iter().map(|(c, s)| (c, s.into())).collect(),
        }
    }

    /// The replacement for `symbol`, if the grammar rewrites it.
    pub fn replacement(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }
}

/// Rewrites `axiom` with `rules` for `iterations` rounds.
///
/// No length cap is applied. At [`MAX_ITERATIONS`] the largest stock grammar
/// (catalog entry 8) produces roughly 5.5 million symbols, and every extra
/// round multiplies that again; use [`predicted_len`] to check before expanding
/// anything user supplied.
pub fn expand(axiom: &str, rules: &Ruleset, iterations: u32) -> String {
    let mut state = axiom.to_string();
    for _ in 0..iterations {
        let mut next = String::with_capacity(state.len() * 2);
        for c in state.chars() {
            match rules.replacement(c) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(c),
            }
        }
        state = next;
    }
    state
}

/// Exact length (in symbols) of `expand(axiom, rules, iterations)`, computed
/// from per-symbol counts so nothing is materialized.
pub fn predicted_len(axiom: &str, rules: &Ruleset, iterations: u32) -> u128 {
    let mut counts: HashMap<char, u128> = HashMap::new();
    for c in axiom.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    for _ in 0..iterations {
        let mut next: HashMap<char, u128> = HashMap::new();
        for (symbol, count) in counts {
            match rules.replacement(symbol) {
                Some(replacement) => {
                    for c in replacement.chars() {
                        *next.entry(c).or_insert(0) += count;
                    }
                }
                None => *next.entry(symbol).or_insert(0) += count,
            }
        }
        counts = next;
    }
    counts.values().sum()
}

/// # LSystem
///
/// An axiom plus the rules that grow it.
///
/// # Example
///
/// ```rust
/// use aoer_arbor_rs::l_system::{LSystem, Ruleset};
///
/// let tree = LSystem {
///     axiom: "X".to_string(),
///     rules: Ruleset::new([('X', "[F-[[X]+X]+F[+FX]-X]"), ('F', "FF")]),
/// };
/// assert_eq!(tree.expand(1), "[F-[[X]+X]+F[+FX]-X]");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LSystem {
    pub axiom: String,
    pub rules: Ruleset,
}

impl LSystem {
    /// #expand
    ///
    /// Expands the L-system by the requested "order" of iterations. Useful with
    /// [`crate::turtle::interpret`].
    pub fn expand(&self, order: u32) -> String {
        expand(&self.axiom, &self.rules, order)
    }

    pub fn predicted_len(&self, order: u32) -> u128 {
        predicted_len(&self.axiom, &self.rules, order)
    }
}
