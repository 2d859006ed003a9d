//! Grammar model.
//!
//! A [`Grammar`] is built once from text and is immutable afterwards. It owns
//! the terminal and nonterminal alphabets (both in first-seen order), the
//! start symbol, and a flat, stably indexed production list. Bodies of the
//! same head are deduplicated, first occurrence wins.
//!
//! The text format is one rule per line:
//!
//! ```text
//! E -> E + T | T
//! T -> T * F | F
//! F -> ( E ) | id
//! ```
//!
//! A symbol spelled only with uppercase letters is a nonterminal, `^` stands
//! for the empty body, and every other word is a terminal. The first head
//! becomes the start symbol.
//!
//! [`Grammar::augment`] derives the grammar the table builder works on: a
//! fresh start `S'` with the single production `S' -> S` at index 0. The
//! augmented grammar also owns the end-of-input terminal `$`, which sits one
//! past the last user terminal and is never looked up by spelling.
use crate::error::GrammarError;
use crate::lexer::{LexContext, Lexer};
use crate::parser::parser;
use crate::symtab::Symtab;
use chumsky::Parser;
use smartstring::alias::String;
use std::fmt;

/// Spelling of the empty-string marker.
pub const EMPTY: &str = "^";

/// Spelling of the end-of-input marker.
pub const END: &str = "$";

/// Returns true if `name` follows the nonterminal naming rule.
pub fn is_nonterm_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_uppercase)
}

/// A grammar symbol.
///
/// Indices refer to the owning grammar's nonterminal or terminal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    NonTerm(usize),
    Term(usize),
    /// The empty-string marker. Only ever the sole symbol of a body.
    Empty,
}

/// A production `head -> body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Production {
    pub head: usize,
    /// Never empty; an empty body is `[Symbol::Empty]`.
    pub body: Vec<Symbol>,
}

impl Production {
    /// Returns true for `A -> ^`.
    pub fn is_empty(&self) -> bool {
        self.body == [Symbol::Empty]
    }

    /// The symbols a dot walks over: the body, or nothing for `A -> ^`.
    pub fn rhs(&self) -> &[Symbol] {
        if self.is_empty() { &[] } else { &self.body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grammar {
    nonterms: Symtab,
    terms: Symtab,
    start: usize,
    prods: Vec<Production>,
    /// Production indices of each nonterminal, indexed by nonterminal.
    rules: Vec<Vec<usize>>,
    augmented: bool,
}

/// Collapses blanks inside each line and drops blank lines.
fn normalize(text: &str) -> Vec<std::string::String> {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

impl Grammar {
    /// Parses and validates grammar text.
    pub fn new(text: &str) -> Result<Self, GrammarError> {
        let lines = normalize(text);
        if lines.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut ctx = LexContext::default();
        // Head order decides production numbering; it differs from
        // nonterminal numbering when a body mentions a nonterminal early.
        let mut heads: Vec<usize> = Vec::new();
        let mut bodies: Vec<Vec<Vec<Symbol>>> = Vec::new();

        for line in &lines {
            let tokens = Lexer::tokenize_line(line, &mut ctx)?;
            let rule = parser()
                .parse(tokens.as_slice())
                .into_result()
                .map_err(|_| GrammarError::Malformed {
                    line: line.as_str().into(),
                })?;

            let head = match rule.head {
                Symbol::NonTerm(n) => n,
                Symbol::Term(t) => {
                    return Err(GrammarError::InvalidHead {
                        head: ctx.terms.sym(t).unwrap_or_default().into(),
                    });
                }
                Symbol::Empty => return Err(GrammarError::InvalidHead { head: EMPTY.into() }),
            };
            if !heads.contains(&head) {
                heads.push(head);
            }
            if bodies.len() <= head {
                bodies.resize(head + 1, Vec::new());
            }

            let head_name = || String::from(ctx.nonterms.sym(head).unwrap_or_default());
            for body in rule.alts {
                if body.is_empty() {
                    return Err(GrammarError::EmptyBody { head: head_name() });
                }
                if body.len() > 1 && body.contains(&Symbol::Empty) {
                    let body = body
                        .iter()
                        .map(|&sym| name_in(&ctx.nonterms, &ctx.terms, sym))
                        .collect::<Vec<_>>()
                        .join(" ");
                    return Err(GrammarError::MisplacedEmpty {
                        head: head_name(),
                        body: body.as_str().into(),
                    });
                }
                if !bodies[head].contains(&body) {
                    bodies[head].push(body);
                }
            }
        }

        let LexContext { nonterms, terms } = ctx;
        bodies.resize(nonterms.len(), Vec::new());

        let mut prods = Vec::new();
        let mut rules = vec![Vec::new(); nonterms.len()];
        for &head in &heads {
            for body in &bodies[head] {
                rules[head].push(prods.len());
                prods.push(Production {
                    head,
                    body: body.clone(),
                });
            }
        }

        let grm = Grammar {
            nonterms,
            terms,
            start: heads[0],
            prods,
            rules,
            augmented: false,
        };
        for nt in grm.undefined_nonterms() {
            log::warn!("nonterminal {} has no productions", grm.nonterm_name(nt));
        }
        log::debug!(
            "grammar: {} nonterminals, {} terminals, {} productions",
            grm.nonterms_len(),
            grm.terms_len(),
            grm.prods_len()
        );
        Ok(grm)
    }

    /// Derives the augmented grammar `S' -> S` + this grammar.
    ///
    /// Nonterminal `S'` takes index 0 and production `S' -> S` index 0; all
    /// other nonterminals and productions shift up by one.
    pub fn augment(&self) -> Grammar {
        if self.augmented {
            return self.clone();
        }
        let shift = |sym: &Symbol| match *sym {
            Symbol::NonTerm(n) => Symbol::NonTerm(n + 1),
            other => other,
        };

        let mut nonterms = Symtab::new();
        nonterms.add(&format!("{}'", self.nonterm_name(self.start)));
        for name in self.nonterms.iter() {
            nonterms.add(name);
        }

        let mut prods = vec![Production {
            head: 0,
            body: vec![Symbol::NonTerm(self.start + 1)],
        }];
        prods.extend(self.prods.iter().map(|p| Production {
            head: p.head + 1,
            body: p.body.iter().map(shift).collect(),
        }));

        let mut rules = vec![vec![0]];
        rules.extend(
            self.rules
                .iter()
                .map(|pidxs| pidxs.iter().map(|pidx| pidx + 1).collect()),
        );

        Grammar {
            nonterms,
            terms: self.terms.clone(),
            start: 0,
            prods,
            rules,
            augmented: true,
        }
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// The end-of-input terminal, one past the last user terminal.
    pub fn eof(&self) -> usize {
        self.terms.len()
    }

    pub fn nonterms_len(&self) -> usize {
        self.nonterms.len()
    }

    /// Number of user terminals; `eof()` is not counted.
    pub fn terms_len(&self) -> usize {
        self.terms.len()
    }

    pub fn prods_len(&self) -> usize {
        self.prods.len()
    }

    pub fn prod(&self, pidx: usize) -> &Production {
        &self.prods[pidx]
    }

    pub fn prods(&self) -> &[Production] {
        &self.prods
    }

    /// Production indices whose head is `nonterm`, in body order.
    pub fn rules(&self, nonterm: usize) -> &[usize] {
        &self.rules[nonterm]
    }

    pub fn nonterm_idx(&self, name: &str) -> Option<usize> {
        self.nonterms.idx(name)
    }

    /// Looks a terminal up by spelling. `$` is only found if the grammar
    /// itself declares a terminal spelled that way.
    pub fn term_idx(&self, name: &str) -> Option<usize> {
        self.terms.idx(name)
    }

    pub fn nonterm_name(&self, nonterm: usize) -> &str {
        self.nonterms.sym(nonterm).unwrap_or_default()
    }

    pub fn term_name(&self, term: usize) -> &str {
        if term == self.eof() {
            END
        } else {
            self.terms.sym(term).unwrap_or_default()
        }
    }

    pub fn sym_name(&self, sym: Symbol) -> &str {
        match sym {
            Symbol::NonTerm(n) => self.nonterm_name(n),
            Symbol::Term(t) => self.term_name(t),
            Symbol::Empty => EMPTY,
        }
    }

    /// Nonterminals in index order.
    pub fn iter_nonterms(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.nonterms.len()).map(Symbol::NonTerm)
    }

    /// User terminals in index order, without `$`.
    pub fn iter_terms(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.terms.len()).map(Symbol::Term)
    }

    /// Every grammar symbol: nonterminals first, then terminals.
    pub fn iter_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter_nonterms().chain(self.iter_terms())
    }

    /// Nonterminals that are used in some body but never defined.
    pub fn undefined_nonterms(&self) -> Vec<usize> {
        (0..self.nonterms.len())
            .filter(|&nt| self.rules[nt].is_empty())
            .collect()
    }

    /// `head -> body` with symbol names, `^` for an empty body.
    pub fn prod_to_string(&self, pidx: usize) -> std::string::String {
        let prod = &self.prods[pidx];
        format!("{} -> {}", self.nonterm_name(prod.head), self.body_to_string(pidx))
    }

    /// The body of production `pidx`, space separated.
    pub fn body_to_string(&self, pidx: usize) -> std::string::String {
        self.prods[pidx]
            .body
            .iter()
            .map(|&sym| self.sym_name(sym))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn name_in<'a>(nonterms: &'a Symtab, terms: &'a Symtab, sym: Symbol) -> &'a str {
    match sym {
        Symbol::NonTerm(n) => nonterms.sym(n).unwrap_or_default(),
        Symbol::Term(t) => terms.sym(t).unwrap_or_default(),
        Symbol::Empty => EMPTY,
    }
}

/// Renders the grammar back to text, one line per head in head order.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let skip = usize::from(self.augmented);
        let mut prev: Option<usize> = None;
        for (pidx, prod) in self.prods.iter().enumerate().skip(skip) {
            if prev == Some(prod.head) {
                write!(f, " | {}", self.body_to_string(pidx))?;
                continue;
            }
            if prev.is_some() {
                writeln!(f)?;
            }
            prev = Some(prod.head);
            write!(f, "{}", self.prod_to_string(pidx))?;
        }
        Ok(())
    }
}
