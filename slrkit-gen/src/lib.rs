//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! SLR(1) parser table generator.
//!
//! `slrkit-gen` turns a textual context-free grammar into an SLR(1) parse
//! table, keeping every intermediate result around for inspection:
//!
//!  * [`Grammar`] — validated grammar model and its augmented form
//!  * [`FirstFollow`] — FIRST and FOLLOW sets
//!  * [`Automaton`] — the canonical collection of LR(0) item sets
//!  * [`Table`] — the SLR(1) table, conflicts recorded as data
//!  * [`Graph`] — a labelled description of the automaton, with DOT output
//!
//! ```
//! let slr = slrkit_gen::generate("E -> E + T | T\nT -> id").unwrap();
//! assert!(slr.is_slr1());
//! assert_eq!(slr.automaton().len(), 6);
//! ```
//!
//! The `slrkit` crate drives the resulting table over token input.

mod error;
mod first_follow;
mod generate;
mod grammar;
mod graph;
mod lexer;
mod lr0;
mod parser;
pub mod report;
mod symtab;
mod table;

pub use error::GrammarError;
pub use first_follow::FirstFollow;
pub use generate::{Slr, generate};
pub use grammar::{EMPTY, END, Grammar, Production, Symbol, is_nonterm_name};
pub use graph::{ACCEPT_NODE, Edge, EdgeKind, Graph, Node};
pub use lr0::{Automaton, Item, ItemSet, closure, goto};
pub use table::{Action, Conflict, ConflictKind, Table};
