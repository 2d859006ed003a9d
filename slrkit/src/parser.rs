//! Table-driven SLR(1) parse driver.
//!
//! [`Parser`] runs the classic shift/reduce loop over a table built by
//! [`slrkit_gen::generate`] and records every configuration it passes
//! through. The driver never panics on bad input: unknown tokens, empty
//! table cells and conflicting cells each end the parse with a
//! [`ParseError`] step, and the [`Trace`] up to that point is returned.
use crate::error::ParseError;
use crate::trace::{ParserStats, Step, StepAction, Trace};
use slrkit_gen::{Action, ConflictKind, END, Slr};
use smartstring::alias::String;

pub struct Parser<'a> {
    slr: &'a Slr,
}

/// Driver state between steps.
struct ParserCtx {
    states: Vec<usize>,
    symbols: Vec<String>,
    steps: Vec<Step>,
    stats: ParserStats,
}

impl ParserCtx {
    fn record(&mut self, input: &[String], action: StepAction) {
        self.steps.push(Step {
            states: self.states.clone(),
            symbols: self.symbols.clone(),
            input: input.to_vec(),
            action,
        });
    }

    fn dump_state(&self, input: &[String]) {
        let mut output = std::string::String::new();
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                output.push_str(&format!("{} ", self.symbols[i - 1]));
            }
            output.push_str(&format!("<{}> ", state));
        }
        output.push_str(" <-  ");
        output.push_str(&input.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" "));
        log::trace!("{}", output);
    }

    fn finish(self) -> Trace {
        Trace {
            steps: self.steps,
            stats: self.stats,
        }
    }
}

impl<'a> Parser<'a> {
    pub fn new(slr: &'a Slr) -> Self {
        Self { slr }
    }

    /// Parses whitespace-separated tokens.
    ///
    /// # Parameters
    /// - `input`: The token string, e.g. `"id + id * id"`.
    ///
    /// # Returns
    /// The full [`Trace`]. It ends with an accept step, or with the error
    /// step that stopped the parse.
    pub fn parse(&self, input: &str) -> Trace {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        self.parse_tokens(&tokens)
    }

    /// Parses a token sequence. The end marker is appended here and must not
    /// be part of `tokens`.
    pub fn parse_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Trace {
        let grm = self.slr.grammar();
        let table = self.slr.table();

        let input: Vec<String> = tokens
            .iter()
            .map(|t| String::from(t.as_ref()))
            .chain(std::iter::once(String::from(END)))
            .collect();
        let n_user = tokens.len();

        let mut ctx = ParserCtx {
            states: vec![0],
            symbols: Vec::new(),
            steps: Vec::new(),
            stats: ParserStats::default(),
        };
        let mut pos = 0;
        ctx.stats.tokens += 1;

        loop {
            if log::log_enabled!(log::Level::Trace) {
                ctx.dump_state(&input[pos..]);
            }
            let rest = &input[pos..];
            let name = &input[pos];
            let term = if pos < n_user {
                grm.term_idx(name)
            } else {
                Some(grm.eof())
            };
            let Some(term) = term else {
                log::trace!("Unrecognized {}", name);
                let err = ParseError::UnrecognizedSymbol {
                    symbol: name.clone(),
                    position: pos,
                };
                ctx.record(rest, StepAction::Error(err));
                break;
            };

            let state = ctx.states.last().copied().unwrap_or_default();
            match table.action(state, term) {
                Some(Action::Shift(to)) => {
                    log::trace!("Shift {}", to);
                    ctx.record(rest, StepAction::Shift(*to));
                    ctx.states.push(*to);
                    ctx.symbols.push(name.clone());
                    ctx.stats.shifts += 1;
                    ctx.stats.tokens += 1;
                    pos += 1;
                }

                Some(Action::Reduce(pidx)) => {
                    log::trace!("Reduce {}", pidx);
                    let prod = grm.prod(*pidx);
                    let n = prod.rhs().len();
                    let keep = ctx.states.len().saturating_sub(n).max(1);
                    let exposed = ctx.states[keep - 1];
                    let Some(to) = table.goto(exposed, prod.head) else {
                        let err = ParseError::MissingGoto {
                            state: exposed,
                            nonterm: grm.nonterm_name(prod.head).into(),
                        };
                        ctx.record(rest, StepAction::Error(err));
                        break;
                    };
                    ctx.record(
                        rest,
                        StepAction::Reduce {
                            prod: *pidx,
                            rule: grm.prod_to_string(*pidx).as_str().into(),
                        },
                    );
                    ctx.states.truncate(keep);
                    ctx.symbols.truncate(keep - 1);
                    ctx.states.push(to);
                    ctx.symbols.push(grm.nonterm_name(prod.head).into());
                    ctx.stats.reductions += 1;
                }

                Some(Action::Accept) => {
                    log::trace!("Accept");
                    ctx.record(rest, StepAction::Accept);
                    break;
                }

                Some(Action::Conflict(actions)) => {
                    let kind = ConflictKind::of(actions);
                    log::trace!("Conflict {}", kind);
                    let err = ParseError::Conflict {
                        kind,
                        state,
                        symbol: name.clone(),
                    };
                    ctx.record(rest, StepAction::Error(err));
                    break;
                }

                Some(Action::Goto(_)) | None => {
                    log::trace!("Error on {}", name);
                    let err = ParseError::NoAction {
                        state,
                        symbol: name.clone(),
                    };
                    ctx.record(rest, StepAction::Error(err));
                    break;
                }
            }
        }

        let trace = ctx.finish();
        log::debug!(
            "parse: {} steps, accepted={}, {:?}",
            trace.steps().len(),
            trace.is_accepted(),
            trace.stats()
        );
        trace
    }
}
