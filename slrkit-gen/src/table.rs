// SLR(1) parse table construction.

use crate::first_follow::FirstFollow;
use crate::grammar::{Grammar, Symbol};
use crate::lr0::Automaton;
use std::fmt;

/// A parse table entry.
///
/// Shift, reduce and accept entries live in terminal columns, goto entries in
/// nonterminal columns. A cell that received more than one distinct entry
/// holds them all in a [`Action::Conflict`], in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Shift the lookahead and go to the given state.
    Shift(usize),
    /// Reduce by the given production.
    Reduce(usize),
    /// Reduce by `S' -> S` on end of input: the parse is complete.
    Accept,
    /// Nonterminal transition to the given state.
    Goto(usize),
    /// Two or more competing entries.
    Conflict(Vec<Action>),
}

impl Action {
    /// Accept is the reduction by production 0 and counts as a reduce.
    fn is_reduce_like(&self) -> bool {
        matches!(self, Action::Reduce(_) | Action::Accept)
    }
}

/// Renders the entry in the usual compact table notation: `s5`, `r2`, `acc`,
/// a bare state number for goto, and `/` between competing entries.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "s{}", s),
            Action::Reduce(p) => write!(f, "r{}", p),
            Action::Accept => write!(f, "acc"),
            Action::Goto(s) => write!(f, "{}", s),
            Action::Conflict(acts) => {
                for (i, act) in acts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "/")?;
                    }
                    write!(f, "{}", act)?;
                }
                Ok(())
            }
        }
    }
}

/// What kind of entries collide in a conflicting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

impl ConflictKind {
    /// Classifies a set of competing entries: two or more reductions make a
    /// reduce-reduce conflict, anything else is shift-reduce.
    pub fn of(actions: &[Action]) -> Self {
        if actions.iter().filter(|a| a.is_reduce_like()).count() >= 2 {
            ConflictKind::ReduceReduce
        } else {
            ConflictKind::ShiftReduce
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::ShiftReduce => "shift-reduce",
            ConflictKind::ReduceReduce => "reduce-reduce",
        })
    }
}

/// One conflicting table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conflict {
    pub state: usize,
    pub symbol: Symbol,
    pub kind: ConflictKind,
    pub actions: Vec<Action>,
}

/// An SLR(1) parse table.
///
/// Rows are automaton states. Columns are the grammar's nonterminals
/// followed by its terminals and finally the end marker, all in grammar
/// order. Conflicts are kept in the table as data; nothing is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    rows: Vec<Vec<Option<Action>>>,
    n_nonterms: usize,
    eof: usize,
}

impl Table {
    /// Builds the SLR(1) table of an augmented grammar.
    ///
    /// # Parameters
    /// - `grm`: The augmented grammar.
    /// - `ff`: Its FIRST/FOLLOW sets; FOLLOW decides where reductions go.
    /// - `lr0`: Its canonical collection, which supplies shift and goto
    ///   targets.
    ///
    /// # Returns
    /// The table with every competing entry kept. Each conflicting cell is
    /// also logged as a warning.
    pub fn new(grm: &Grammar, ff: &FirstFollow, lr0: &Automaton) -> Self {
        let n_nonterms = grm.nonterms_len();
        let eof = grm.eof();
        let width = n_nonterms + eof + 1;

        let mut cells: Vec<Vec<Vec<Action>>> = vec![vec![Vec::new(); width]; lr0.len()];
        let mut add = |state: usize, col: usize, act: Action| {
            let cell: &mut Vec<Action> = &mut cells[state][col];
            if !cell.contains(&act) {
                cell.push(act);
            }
        };

        for (state, items) in lr0.states().iter().enumerate() {
            for item in items {
                match item.next_symbol(grm) {
                    Some(sym @ Symbol::Term(t)) => {
                        if let Some(to) = lr0.transition(state, sym) {
                            add(state, n_nonterms + t, Action::Shift(to));
                        }
                    }
                    Some(_) => {}
                    None => {
                        let head = grm.prod(item.prod).head;
                        if item.prod == 0 {
                            add(state, n_nonterms + eof, Action::Accept);
                        } else {
                            for &t in ff.follow(head) {
                                add(state, n_nonterms + t, Action::Reduce(item.prod));
                            }
                        }
                    }
                }
            }
            for (sym, to) in lr0.transitions(state) {
                if let Symbol::NonTerm(nt) = sym {
                    add(state, nt, Action::Goto(to));
                }
            }
        }

        let rows: Vec<Vec<Option<Action>>> = cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|mut cell| match cell.len() {
                        0 => None,
                        1 => cell.pop(),
                        _ => Some(Action::Conflict(cell)),
                    })
                    .collect()
            })
            .collect();

        let table = Self {
            rows,
            n_nonterms,
            eof,
        };
        let conflicts = table.conflicts();
        for c in &conflicts {
            log::warn!(
                "{} conflict at state {}, symbol {}: {}",
                c.kind,
                c.state,
                grm.sym_name(c.symbol),
                Action::Conflict(c.actions.clone())
            );
        }
        log::debug!(
            "table: {} states x {} columns, {} conflicts",
            table.len(),
            width,
            conflicts.len()
        );
        table
    }

    /// Number of rows (states).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for a table with no states; never the case for a built table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column of `sym`. Terminal `eof` is the end marker.
    fn column(&self, sym: Symbol) -> Option<usize> {
        match sym {
            Symbol::NonTerm(nt) if nt < self.n_nonterms => Some(nt),
            Symbol::Term(t) if t <= self.eof => Some(self.n_nonterms + t),
            _ => None,
        }
    }

    /// Symbol of column `col`.
    fn symbol(&self, col: usize) -> Symbol {
        if col < self.n_nonterms {
            Symbol::NonTerm(col)
        } else {
            Symbol::Term(col - self.n_nonterms)
        }
    }

    /// The entry at (`state`, `sym`), if any.
    pub fn lookup(&self, state: usize, sym: Symbol) -> Option<&Action> {
        let col = self.column(sym)?;
        self.rows.get(state)?.get(col)?.as_ref()
    }

    /// The action entry for `state` on terminal `term`.
    pub fn action(&self, state: usize, term: usize) -> Option<&Action> {
        self.lookup(state, Symbol::Term(term))
    }

    /// The goto target for `state` on nonterminal `nonterm`.
    pub fn goto(&self, state: usize, nonterm: usize) -> Option<usize> {
        match self.lookup(state, Symbol::NonTerm(nonterm))? {
            Action::Goto(to) => Some(*to),
            _ => None,
        }
    }

    /// Non-empty entries of `state`, in column order.
    pub fn row(&self, state: usize) -> impl Iterator<Item = (Symbol, &Action)> + '_ {
        self.rows[state]
            .iter()
            .enumerate()
            .filter_map(move |(col, cell)| cell.as_ref().map(|act| (self.symbol(col), act)))
    }

    /// Every conflicting cell, by state then column.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut out = Vec::new();
        for state in 0..self.rows.len() {
            for (symbol, act) in self.row(state) {
                if let Action::Conflict(actions) = act {
                    out.push(Conflict {
                        state,
                        symbol,
                        kind: ConflictKind::of(actions),
                        actions: actions.clone(),
                    });
                }
            }
        }
        out
    }

    /// True if no cell holds competing entries.
    pub fn is_slr1(&self) -> bool {
        self.rows
            .iter()
            .flatten()
            .all(|cell| !matches!(cell, Some(Action::Conflict(_))))
    }
}
