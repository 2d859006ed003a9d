//! Parse-time errors.
//!
//! Each one ends a parse at the step where it occurs. The steps taken so
//! far are still returned in the [`Trace`](crate::Trace).
use slrkit_gen::ConflictKind;
use smartstring::alias::String;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// The lookahead is not a terminal of the grammar.
    #[error("unrecognized symbol {symbol}")]
    UnrecognizedSymbol {
        symbol: String,
        /// Zero-based index of the token in the input.
        position: usize,
    },

    /// The table has no entry for the current state and lookahead.
    #[error("input cannot be parsed by given grammar")]
    NoAction { state: usize, symbol: String },

    /// The table entry for the current state and lookahead is a conflict.
    #[error("{kind} conflict at state {state}, symbol {symbol}")]
    Conflict {
        kind: ConflictKind,
        state: usize,
        symbol: String,
    },

    /// A reduction exposed a state with no goto on the production head.
    /// Cannot happen with a table built from the same grammar.
    #[error("no goto from state {state} on {nonterm}")]
    MissingGoto { state: usize, nonterm: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = ParseError::UnrecognizedSymbol {
            symbol: "x".into(),
            position: 2,
        };
        assert_eq!(e.to_string(), "unrecognized symbol x");

        let e = ParseError::NoAction {
            state: 0,
            symbol: "+".into(),
        };
        assert_eq!(e.to_string(), "input cannot be parsed by given grammar");

        let e = ParseError::Conflict {
            kind: ConflictKind::ShiftReduce,
            state: 3,
            symbol: "a".into(),
        };
        assert_eq!(e.to_string(), "shift-reduce conflict at state 3, symbol a");
    }
}
