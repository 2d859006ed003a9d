//! Lexer for grammar text.
//!
//! Grammar text is processed one normalized line at a time. Each line is
//! split into [`Token`]s by a [`logos`]-derived scanner; words are classified
//! on the spot as nonterminals, terminals, or the empty-string marker and
//! interned into the [`LexContext`] symbol tables, so later stages only ever
//! see dense indices.
//!
//! Classification follows the grammar's naming convention: a word made only
//! of uppercase letters names a nonterminal, `^` is the empty-string marker,
//! and anything else is a terminal.
use crate::error::GrammarError;
use crate::grammar::{EMPTY, is_nonterm_name};
use crate::symtab::Symtab;
use logos::Logos;

/// Symbol tables filled while lexing a grammar.
#[derive(Default, Debug)]
pub struct LexContext {
    /// Terminal spellings, in first-seen order.
    pub terms: Symtab,

    /// Nonterminal spellings, in first-seen order.
    pub nonterms: Symtab,
}

/// Tokens produced by the grammar lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A nonterminal (e.g. `EXPR`).
    NonTerm(usize),

    /// A terminal (e.g. `id`, `+`, `(`).
    Term(usize),

    /// The empty-string marker `^`.
    Empty,

    /// The production arrow `->`.
    Arrow,

    /// The alternative separator `|`.
    Alt,
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\f\r]+")]
enum LogosToken {
    #[token("->")]
    Arrow,

    #[token("|")]
    Alt,

    /// Any other run of non-blank characters.
    #[regex(r"[^ \t\f\r\n|]+")]
    Word,
}

/// Line lexer over a single normalized grammar line.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, LogosToken>,
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }

    /// Returns the next token, `None` at end of line.
    ///
    /// Words are interned into `ctx` as a side effect.
    pub fn next_token(&mut self, ctx: &mut LexContext) -> Option<Result<Token, GrammarError>> {
        let kind = self.inner.next()?;
        let slice = self.inner.slice();
        Some(match kind {
            Ok(LogosToken::Arrow) => Ok(Token::Arrow),
            Ok(LogosToken::Alt) => Ok(Token::Alt),
            Ok(LogosToken::Word) if slice == EMPTY => Ok(Token::Empty),
            Ok(LogosToken::Word) if is_nonterm_name(slice) => {
                Ok(Token::NonTerm(ctx.nonterms.add(slice)))
            }
            Ok(LogosToken::Word) => Ok(Token::Term(ctx.terms.add(slice))),
            Err(()) => Err(GrammarError::Malformed {
                line: self.inner.source().into(),
            }),
        })
    }

    /// Tokenizes a whole line.
    pub fn tokenize_line(
        line: &'source str,
        ctx: &mut LexContext,
    ) -> Result<Vec<Token>, GrammarError> {
        let mut lex = Lexer::new(line);
        let mut out = Vec::new();
        while let Some(tok) = lex.next_token(ctx) {
            out.push(tok?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_words() {
        let mut ctx = LexContext::default();
        let toks = Lexer::tokenize_line("E -> E + T | ( E ) | id | ^", &mut ctx).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::NonTerm(0),
                Token::Arrow,
                Token::NonTerm(0),
                Token::Term(0),
                Token::NonTerm(1),
                Token::Alt,
                Token::Term(1),
                Token::NonTerm(0),
                Token::Term(2),
                Token::Alt,
                Token::Term(3),
                Token::Alt,
                Token::Empty,
            ]
        );
        assert_eq!(ctx.nonterms.sym(1), Some("T"));
        assert_eq!(ctx.terms.sym(3), Some("id"));
    }

    #[test]
    fn alt_splits_without_blanks() {
        let mut ctx = LexContext::default();
        let toks = Lexer::tokenize_line("A -> a|b", &mut ctx).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::NonTerm(0),
                Token::Arrow,
                Token::Term(0),
                Token::Alt,
                Token::Term(1),
            ]
        );
    }

    #[test]
    fn mixed_case_words_are_terminals() {
        let mut ctx = LexContext::default();
        let toks = Lexer::tokenize_line("Expr e1 X1 ^^", &mut ctx).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::Term(0),
                Token::Term(1),
                Token::Term(2),
                Token::Term(3)
            ]
        );
        assert!(ctx.nonterms.is_empty());
    }
}
