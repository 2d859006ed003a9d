// Parse traces: one record per driver step.

use crate::error::ParseError;
use smartstring::alias::String;
use std::fmt;
use std::io::{self, Write};

/// What the driver did at a step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepAction {
    /// Shifted the lookahead and went to the given state.
    Shift(usize),
    /// Reduced by production `prod`, spelled `rule` (`A -> b c`).
    Reduce { prod: usize, rule: String },
    Accept,
    /// The parse stopped here.
    Error(ParseError),
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Shift(_) => write!(f, "shift"),
            StepAction::Reduce { rule, .. } => write!(f, "reduce by {}", rule),
            StepAction::Accept => write!(f, "accept"),
            StepAction::Error(e) => write!(f, "ERROR: {}", e),
        }
    }
}

/// The driver configuration before a step, and the step's action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// State stack, bottom first.
    pub states: Vec<usize>,
    /// Recognized symbols, bottom first.
    pub symbols: Vec<String>,
    /// Unconsumed input, ending with the end marker.
    pub input: Vec<String>,
    pub action: StepAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserStats {
    /// Input tokens read, end marker included.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

/// The outcome of one parse: every step taken, in order.
///
/// A trace ends either with an accept step or with an error step; in the
/// latter case the error is also available from [`Trace::error`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    pub(crate) steps: Vec<Step>,
    pub(crate) stats: ParserStats,
}

impl Trace {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn stats(&self) -> &ParserStats {
        &self.stats
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.last(), Some(Step { action: StepAction::Accept, .. }))
    }

    /// The error that stopped the parse, if any.
    pub fn error(&self) -> Option<&ParseError> {
        match self.last() {
            Some(Step {
                action: StepAction::Error(e),
                ..
            }) => Some(e),
            _ => None,
        }
    }

    /// Writes one `T,<step>,<states>,<symbols>,<input>,<action>` line per
    /// step; stack and input fields are space separated.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "TS,{}\n", self.steps.len())?;
        for (i, step) in self.steps.iter().enumerate() {
            let states: Vec<_> = step.states.iter().map(|s| s.to_string()).collect();
            writeln!(
                out,
                "T,{},{},{},{},{}",
                i,
                states.join(" "),
                join(&step.symbols),
                join(&step.input),
                step.action
            )?;
        }
        Ok(())
    }
}

fn join(names: &[String]) -> std::string::String {
    names.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(action: StepAction) -> Step {
        Step {
            states: vec![0, 3],
            symbols: vec!["a".into()],
            input: vec!["b".into(), "$".into()],
            action,
        }
    }

    #[test]
    fn action_text() {
        assert_eq!(StepAction::Shift(4).to_string(), "shift");
        assert_eq!(
            StepAction::Reduce {
                prod: 3,
                rule: "A -> ^".into()
            }
            .to_string(),
            "reduce by A -> ^"
        );
        assert_eq!(StepAction::Accept.to_string(), "accept");
        let err = ParseError::UnrecognizedSymbol {
            symbol: "x".into(),
            position: 0,
        };
        assert_eq!(
            StepAction::Error(err).to_string(),
            "ERROR: unrecognized symbol x"
        );
    }

    #[test]
    fn outcome() {
        let accepted = Trace {
            steps: vec![step(StepAction::Shift(3)), step(StepAction::Accept)],
            stats: ParserStats::default(),
        };
        assert!(accepted.is_accepted());
        assert!(accepted.error().is_none());

        let err = ParseError::NoAction {
            state: 3,
            symbol: "b".into(),
        };
        let failed = Trace {
            steps: vec![step(StepAction::Error(err.clone()))],
            stats: ParserStats::default(),
        };
        assert!(!failed.is_accepted());
        assert_eq!(failed.error(), Some(&err));
        assert!(!Trace::default().is_accepted());
    }

    #[test]
    fn write_lines() {
        let trace = Trace {
            steps: vec![step(StepAction::Shift(4))],
            stats: ParserStats::default(),
        };
        let mut buf = Vec::new();
        trace.write(&mut buf).unwrap();
        assert_eq!(
            std::string::String::from_utf8(buf).unwrap(),
            "TS,1\n\nT,0,0 3,a,b $,shift\n"
        );
    }
}
