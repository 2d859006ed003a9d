//! The `generate` entry point and the [`Slr`] bundle it returns.
//!
//! Runs the whole construction for one grammar text: parse and augment,
//! FIRST/FOLLOW, canonical collection, table. Each stage is kept so callers
//! can inspect or report it.
use crate::error::GrammarError;
use crate::first_follow::FirstFollow;
use crate::grammar::{Grammar, Production, Symbol};
use crate::graph::Graph;
use crate::lr0::Automaton;
use crate::report;
use crate::table::{Conflict, Table};
use std::io::{self, Write};

/// Everything built for one grammar: the augmented grammar, its FIRST/FOLLOW
/// sets, LR(0) automaton and SLR(1) table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slr {
    grammar: Grammar,
    first_follow: FirstFollow,
    automaton: Automaton,
    table: Table,
}

/// Parses grammar text and builds its SLR(1) table.
///
/// # Parameters
/// - `text`: Grammar text, one `HEAD -> alt | alt` rule per line.
///
/// # Returns
/// The built [`Slr`], or the first [`GrammarError`] found in `text`.
/// Conflicts are not errors; they are recorded in the table and listed by
/// [`Slr::conflicts`].
pub fn generate(text: &str) -> Result<Slr, GrammarError> {
    let grammar = Grammar::new(text)?.augment();
    let first_follow = FirstFollow::new(&grammar);
    let automaton = Automaton::new(&grammar);
    let table = Table::new(&grammar, &first_follow, &automaton);
    Ok(Slr {
        grammar,
        first_follow,
        automaton,
        table,
    })
}

impl Slr {
    /// The augmented grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// FIRST and FOLLOW sets of the augmented grammar.
    pub fn first_follow(&self) -> &FirstFollow {
        &self.first_follow
    }

    /// The canonical collection of LR(0) item sets.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The SLR(1) table, conflicts included.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The indexed productions; index 0 is `S' -> S`.
    pub fn productions(&self) -> &[Production] {
        self.grammar.prods()
    }

    /// Table columns holding shift/reduce/accept entries: the terminals,
    /// then the end marker.
    pub fn action_symbols(&self) -> Vec<Symbol> {
        self.grammar
            .iter_terms()
            .chain(std::iter::once(Symbol::Term(self.grammar.eof())))
            .collect()
    }

    /// Table columns holding goto entries: the nonterminals except `S'`.
    pub fn goto_symbols(&self) -> Vec<Symbol> {
        self.grammar
            .iter_nonterms()
            .filter(|&sym| sym != Symbol::NonTerm(self.grammar.start()))
            .collect()
    }

    pub fn conflicts(&self) -> Vec<Conflict> {
        self.table.conflicts()
    }

    pub fn is_slr1(&self) -> bool {
        self.table.is_slr1()
    }

    pub fn graph(&self) -> Graph {
        Graph::new(&self.grammar, &self.automaton)
    }

    /// Writes the productions, FIRST/FOLLOW sets and table; with `states`
    /// the item sets are included too.
    pub fn write_report<W: Write>(&self, out: &mut W, states: bool) -> io::Result<()> {
        report::write_prods(out, &self.grammar)?;
        writeln!(out)?;
        if states {
            report::write_states(out, &self.grammar, &self.automaton)?;
        }
        report::write_first_follow(out, &self.grammar, &self.first_follow)?;
        writeln!(out)?;
        report::write_table(out, &self.grammar, &self.table)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    const EXPR: &str = "E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id";

    #[test]
    fn json_round_trip() {
        let slr = generate(EXPR).unwrap();
        let json = serde_json::to_string(&slr).unwrap();
        let back: Slr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slr);
        assert_eq!(back.grammar().term_idx("id"), slr.grammar().term_idx("id"));
        assert_eq!(back.automaton().transition(0, Symbol::NonTerm(1)), Some(1));
    }

    #[test]
    fn json_is_deterministic() {
        let a = serde_json::to_string(&generate(EXPR).unwrap()).unwrap();
        let b = serde_json::to_string(&generate(EXPR).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn conflicting_table_serializes() {
        let slr = generate("P -> S a\nS -> a S | a").unwrap();
        let back: Slr = serde_json::from_str(&serde_json::to_string(&slr).unwrap()).unwrap();
        assert_eq!(back.conflicts(), slr.conflicts());
    }
}
