//! Line parser for grammar text.
//!
//! Recognises the shape `HEAD -> alt ( | alt )*` over the tokens of one line.
//! The parser is deliberately permissive about *contents*: any symbol may
//! stand in head position and alternatives may be empty, so that the grammar
//! builder can report those cases with a precise message instead of a bare
//! syntax failure.
use crate::grammar::Symbol;
use crate::lexer::Token;
use chumsky::prelude::*;

/// One parsed grammar line.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub head: Symbol,
    pub alts: Vec<Vec<Symbol>>,
}

pub fn parser<'a>() -> impl Parser<'a, &'a [Token], Rule> {
    let symbol = select! {
        Token::NonTerm(n) => Symbol::NonTerm(n),
        Token::Term(t) => Symbol::Term(t),
        Token::Empty => Symbol::Empty,
    }
    .labelled("symbol");

    let body = symbol.clone().repeated().collect::<Vec<_>>();

    let alts = body
        .separated_by(just(Token::Alt))
        .at_least(1)
        .collect::<Vec<_>>();

    symbol
        .then_ignore(just(Token::Arrow))
        .then(alts)
        .then_ignore(end())
        .map(|(head, alts)| Rule { head, alts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_alternative() {
        let tokens = vec![
            Token::NonTerm(0),
            Token::Arrow,
            Token::Term(2),
            Token::NonTerm(3),
        ];
        let rule = parser().parse(tokens.as_slice()).into_result().unwrap();
        assert_eq!(rule.head, Symbol::NonTerm(0));
        assert_eq!(
            rule.alts,
            vec![vec![Symbol::Term(2), Symbol::NonTerm(3)]]
        );
    }

    #[test]
    fn several_alternatives_keep_empty_ones() {
        let tokens = vec![
            Token::NonTerm(0),
            Token::Arrow,
            Token::Term(0),
            Token::Alt,
            Token::Alt,
            Token::Empty,
        ];
        let rule = parser().parse(tokens.as_slice()).into_result().unwrap();
        assert_eq!(
            rule.alts,
            vec![vec![Symbol::Term(0)], vec![], vec![Symbol::Empty]]
        );
    }

    #[test]
    fn missing_body_is_one_empty_alternative() {
        let tokens = vec![Token::NonTerm(0), Token::Arrow];
        let rule = parser().parse(tokens.as_slice()).into_result().unwrap();
        assert_eq!(rule.alts, vec![Vec::<Symbol>::new()]);
    }

    #[test]
    fn lowercase_head_still_parses() {
        let tokens = vec![Token::Term(0), Token::Arrow, Token::Term(1)];
        let rule = parser().parse(tokens.as_slice()).into_result().unwrap();
        assert_eq!(rule.head, Symbol::Term(0));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        let no_arrow = vec![Token::NonTerm(0), Token::Term(0)];
        assert!(parser().parse(no_arrow.as_slice()).has_errors());

        let two_heads = vec![Token::NonTerm(0), Token::NonTerm(1), Token::Arrow];
        assert!(parser().parse(two_heads.as_slice()).has_errors());

        let two_arrows = vec![
            Token::NonTerm(0),
            Token::Arrow,
            Token::Term(0),
            Token::Arrow,
        ];
        assert!(parser().parse(two_arrows.as_slice()).has_errors());
    }
}
