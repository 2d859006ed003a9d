//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! SLR(1) parse driver.
//!
//! `slrkit` runs token input through a table built by
//! [`slrkit_gen`] and returns a step-by-step [`Trace`] of the parse:
//!
//! ```
//! use slrkit::{Parser, slrkit_gen};
//!
//! let slr = slrkit_gen::generate("S -> a S | b").unwrap();
//! let trace = Parser::new(&slr).parse("a a b");
//! assert!(trace.is_accepted());
//! assert_eq!(trace.last().unwrap().action.to_string(), "accept");
//! ```
//!
//! The `slrkit` binary (feature `cli`) prints tables, traces and automaton
//! graphs for a grammar file.

mod error;
mod parser;
mod trace;

pub use error::ParseError;
pub use parser::Parser;
pub use slrkit_gen;
pub use trace::{ParserStats, Step, StepAction, Trace};
