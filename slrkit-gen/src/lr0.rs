// LR(0) items, CLOSURE/GOTO, and the canonical collection of item sets.

use crate::grammar::{Grammar, Symbol};
use std::collections::{BTreeSet, HashMap};

/// An LR(0) item: a production with a dot marking how much of its body has
/// been recognized.
///
/// For `E → E + T` with `dot == 1` the item reads `E → E . + T`. The dot
/// ranges over `0..=rhs().len()`, so an empty production only ever has the
/// complete item `A → .`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Index of the production in the grammar.
    pub prod: usize,

    /// Position of the dot within the production's right-hand side.
    pub dot: usize,
}

impl Item {
    /// The symbol right after the dot, if any.
    pub fn next_symbol(&self, grm: &Grammar) -> Option<Symbol> {
        grm.prod(self.prod).rhs().get(self.dot).copied()
    }

    /// True once the dot has passed the whole body.
    pub fn is_complete(&self, grm: &Grammar) -> bool {
        self.dot >= grm.prod(self.prod).rhs().len()
    }

    /// Renders the item as `head → body-with-dot`.
    pub fn render(&self, grm: &Grammar) -> String {
        let prod = grm.prod(self.prod);
        let mut out = format!("{} →", grm.nonterm_name(prod.head));
        for (i, &sym) in prod.rhs().iter().enumerate() {
            if i == self.dot {
                out.push_str(" .");
            }
            out.push(' ');
            out.push_str(grm.sym_name(sym));
        }
        if self.is_complete(grm) {
            out.push_str(" .");
        }
        out
    }
}

/// A set of LR(0) items. Ordered, so equal sets compare and hash equal.
pub type ItemSet = BTreeSet<Item>;

/// Computes the LR(0) *closure* of a set of items.
///
/// Whenever the dot stands before a nonterminal, every production of that
/// nonterminal is added with the dot at its start, until nothing new is
/// added.
///
/// # Parameters
/// - `items`: The initial set of LR(0) items.
/// - `grm`: The augmented grammar the items refer to.
///
/// # Returns
/// The closed set, containing `items` and every item they imply.
pub fn closure(items: &ItemSet, grm: &Grammar) -> ItemSet {
    let mut set = items.clone();
    let mut work: Vec<Item> = items.iter().copied().collect();
    while let Some(item) = work.pop() {
        if let Some(Symbol::NonTerm(nt)) = item.next_symbol(grm) {
            for &prod in grm.rules(nt) {
                let new_item = Item { prod, dot: 0 };
                if set.insert(new_item) {
                    work.push(new_item);
                }
            }
        }
    }
    set
}

/// Computes GOTO(`items`, `sym`).
///
/// # Parameters
/// - `items`: The current set of LR(0) items.
/// - `sym`: The grammar symbol to transition on.
/// - `grm`: The augmented grammar the items refer to.
///
/// # Returns
/// The closure of every item of `items` with the dot moved over `sym`, or
/// an empty set if no item expects `sym`.
pub fn goto(items: &ItemSet, sym: Symbol, grm: &Grammar) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol(grm) == Some(sym))
        .map(|item| Item {
            prod: item.prod,
            dot: item.dot + 1,
        })
        .collect();
    closure(&moved, grm)
}

/// The canonical collection of LR(0) item sets with its transitions.
///
/// State 0 is the closure of `S' → . S`. States are numbered in the order
/// they are discovered and never renumbered; no two states hold the same
/// item set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Automaton {
    states: Vec<ItemSet>,
    /// Outgoing transitions per state, sorted by symbol.
    edges: Vec<Vec<(Symbol, usize)>>,
}

impl Automaton {
    /// Builds the canonical collection of an augmented grammar.
    ///
    /// States are expanded in number order; for each one the symbols are
    /// tried nonterminals first, then terminals, each in grammar order.
    pub fn new(grm: &Grammar) -> Self {
        let start = closure(&ItemSet::from([Item { prod: 0, dot: 0 }]), grm);
        let mut states = vec![start.clone()];
        let mut edges = vec![Vec::new()];
        let mut index: HashMap<ItemSet, usize> = HashMap::from([(start, 0)]);

        let mut i = 0;
        while i < states.len() {
            for sym in grm.iter_symbols() {
                let target = goto(&states[i], sym, grm);
                if target.is_empty() {
                    continue;
                }
                let j = match index.get(&target) {
                    Some(&j) => j,
                    None => {
                        let j = states.len();
                        index.insert(target.clone(), j);
                        states.push(target);
                        edges.push(Vec::new());
                        j
                    }
                };
                // Symbols come in `Symbol` order, so rows stay sorted.
                edges[i].push((sym, j));
            }
            i += 1;
        }
        log::debug!("lr0: {} states", states.len());

        Self { states, edges }
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Item set of state `idx`.
    pub fn state(&self, idx: usize) -> &ItemSet {
        &self.states[idx]
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    /// The state reached from `state` on `sym`, if any.
    pub fn transition(&self, state: usize, sym: Symbol) -> Option<usize> {
        let row = &self.edges[state];
        row.binary_search_by(|(s, _)| s.cmp(&sym))
            .ok()
            .map(|i| row[i].1)
    }

    /// Outgoing transitions of `state`, ordered by symbol.
    pub fn transitions(&self, state: usize) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.edges[state].iter().copied()
    }
}
