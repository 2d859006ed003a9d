//! Grammar-definition errors.
//!
//! Every error produced while turning grammar text into a [`Grammar`] is a
//! [`GrammarError`]. Construction stops at the first violation and no
//! partially built grammar is ever returned, so each variant carries the
//! offending fragment for the caller to show.
//!
//! [`Grammar`]: crate::Grammar
use smartstring::alias::String;
use thiserror::Error;

/// A grammar text that cannot be turned into a [`Grammar`](crate::Grammar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrammarError {
    /// Nothing but whitespace was supplied.
    #[error("Grammar definition cannot be empty.")]
    Empty,

    /// A production head is not spelled with uppercase letters only.
    #[error("Nonterminal head '{head}' must be uppercase.")]
    InvalidHead {
        /// The head as written.
        head: String,
    },

    /// An alternative has no symbols at all (`A -> ` or `A -> a | | b`).
    #[error("'{head} -> ': Cannot have an empty body.")]
    EmptyBody {
        /// Head of the production the empty alternative belongs to.
        head: String,
    },

    /// The empty-string marker shares a body with other symbols.
    #[error("'{head} -> {body}': Empty symbol '^' is not allowed here.")]
    MisplacedEmpty {
        /// Head of the offending production.
        head: String,
        /// The offending body, space separated.
        body: String,
    },

    /// A line is not of the form `HEAD -> alt | alt ...`.
    #[error("'{line}': Expected a production of the form 'HEAD -> body | body'.")]
    Malformed {
        /// The normalized line.
        line: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_fragment() {
        let err = GrammarError::InvalidHead { head: "e".into() };
        assert!(err.to_string().contains("'e'"));

        let err = GrammarError::EmptyBody { head: "A".into() };
        assert_eq!(err.to_string(), "'A -> ': Cannot have an empty body.");

        let err = GrammarError::MisplacedEmpty {
            head: "A".into(),
            body: "a ^".into(),
        };
        assert!(err.to_string().starts_with("'A -> a ^'"));
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn grammar_error_is_send_sync_static() {
        _assert_send_sync_static::<GrammarError>();
    }
}
