// FIRST and FOLLOW sets over an augmented grammar.

use crate::grammar::{Grammar, Symbol};
use std::collections::BTreeSet;

/// FIRST and FOLLOW sets of every nonterminal.
///
/// Sets hold terminal indices. Membership of the empty-string marker in
/// FIRST is kept separately as the `nullable` flag; FOLLOW may contain the
/// grammar's end-of-input terminal ([`Grammar::eof`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirstFollow {
    first: Vec<BTreeSet<usize>>,
    nullable: Vec<bool>,
    follow: Vec<BTreeSet<usize>>,
}

/// Unions `src` into `dst`, returning true if `dst` grew.
fn union_into(dst: &mut BTreeSet<usize>, src: &BTreeSet<usize>) -> bool {
    let before = dst.len();
    dst.extend(src.iter().copied());
    dst.len() != before
}

impl FirstFollow {
    /// Computes both tables in one coupled fixpoint.
    ///
    /// Each pass scans every production left to right for its FIRST
    /// contribution and right to left for its FOLLOW contribution, and
    /// passes repeat until nothing changes. FOLLOW of the start symbol is
    /// seeded with the end marker.
    pub fn new(grm: &Grammar) -> Self {
        let n = grm.nonterms_len();
        let mut first = vec![BTreeSet::new(); n];
        let mut nullable = vec![false; n];
        let mut follow = vec![BTreeSet::new(); n];
        follow[grm.start()].insert(grm.eof());

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for prod in grm.prods() {
                let head = prod.head;

                let mut reached_end = true;
                for &sym in &prod.body {
                    match sym {
                        Symbol::Empty => {}
                        Symbol::Term(t) => {
                            changed |= first[head].insert(t);
                            reached_end = false;
                            break;
                        }
                        Symbol::NonTerm(nt) => {
                            let src = first[nt].clone();
                            changed |= union_into(&mut first[head], &src);
                            if !nullable[nt] {
                                reached_end = false;
                                break;
                            }
                        }
                    }
                }
                if reached_end && !nullable[head] {
                    nullable[head] = true;
                    changed = true;
                }

                let mut trailing = follow[head].clone();
                for &sym in prod.body.iter().rev() {
                    match sym {
                        Symbol::Empty => {}
                        Symbol::Term(t) => {
                            trailing = BTreeSet::from([t]);
                        }
                        Symbol::NonTerm(nt) => {
                            changed |= union_into(&mut follow[nt], &trailing);
                            if nullable[nt] {
                                trailing.extend(first[nt].iter().copied());
                            } else {
                                trailing = first[nt].clone();
                            }
                        }
                    }
                }
            }
        }
        log::debug!("first/follow: fixpoint after {} passes", passes);

        Self {
            first,
            nullable,
            follow,
        }
    }

    /// FIRST of a nonterminal, without the empty-string marker.
    pub fn first(&self, nonterm: usize) -> &BTreeSet<usize> {
        &self.first[nonterm]
    }

    /// True if the nonterminal derives the empty string.
    pub fn nullable(&self, nonterm: usize) -> bool {
        self.nullable[nonterm]
    }

    /// FOLLOW of a nonterminal; may contain the end marker.
    pub fn follow(&self, nonterm: usize) -> &BTreeSet<usize> {
        &self.follow[nonterm]
    }

    /// FIRST of any symbol, and whether it derives the empty string.
    ///
    /// A terminal yields itself; the empty-string marker yields the empty
    /// set and `true`.
    pub fn first_of(&self, sym: Symbol) -> (BTreeSet<usize>, bool) {
        match sym {
            Symbol::Term(t) => (BTreeSet::from([t]), false),
            Symbol::NonTerm(nt) => (self.first[nt].clone(), self.nullable[nt]),
            Symbol::Empty => (BTreeSet::new(), true),
        }
    }

    /// FIRST of a symbol string, and whether the whole string is nullable.
    pub fn first_of_seq(&self, syms: &[Symbol]) -> (BTreeSet<usize>, bool) {
        let mut set = BTreeSet::new();
        for &sym in syms {
            let (first, nullable) = self.first_of(sym);
            set.extend(first);
            if !nullable {
                return (set, false);
            }
        }
        (set, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(grm: &Grammar, set: &BTreeSet<usize>) -> Vec<String> {
        set.iter().map(|&t| grm.term_name(t).to_string()).collect()
    }

    fn sorted(mut v: Vec<&str>) -> Vec<String> {
        v.sort();
        v.into_iter().map(String::from).collect()
    }

    fn sorted_names(grm: &Grammar, set: &BTreeSet<usize>) -> Vec<String> {
        let mut v = names(grm, set);
        v.sort();
        v
    }

    #[test]
    fn expression_grammar() {
        let grm = Grammar::new("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id")
            .unwrap()
            .augment();
        let ff = FirstFollow::new(&grm);
        let nt = |s: &str| grm.nonterm_idx(s).unwrap();

        for n in ["E'", "E", "T", "F"] {
            assert_eq!(sorted_names(&grm, ff.first(nt(n))), sorted(vec!["(", "id"]));
            assert!(!ff.nullable(nt(n)));
        }
        assert_eq!(sorted_names(&grm, ff.follow(nt("E'"))), sorted(vec!["$"]));
        assert_eq!(
            sorted_names(&grm, ff.follow(nt("E"))),
            sorted(vec!["$", "+", ")"])
        );
        assert_eq!(
            sorted_names(&grm, ff.follow(nt("T"))),
            sorted(vec!["$", "+", "*", ")"])
        );
        assert_eq!(
            sorted_names(&grm, ff.follow(nt("F"))),
            sorted(vec!["$", "+", "*", ")"])
        );
    }

    #[test]
    fn nullable_chain() {
        let grm = Grammar::new("S -> A B c\nA -> a | ^\nB -> b | ^")
            .unwrap()
            .augment();
        let ff = FirstFollow::new(&grm);
        let nt = |s: &str| grm.nonterm_idx(s).unwrap();

        assert!(ff.nullable(nt("A")));
        assert!(ff.nullable(nt("B")));
        assert!(!ff.nullable(nt("S")));
        assert_eq!(
            sorted_names(&grm, ff.first(nt("S"))),
            sorted(vec!["a", "b", "c"])
        );
        assert_eq!(sorted_names(&grm, ff.follow(nt("A"))), sorted(vec!["b", "c"]));
        assert_eq!(sorted_names(&grm, ff.follow(nt("B"))), sorted(vec!["c"]));
        assert_eq!(sorted_names(&grm, ff.follow(nt("S"))), sorted(vec!["$"]));
    }

    #[test]
    fn nullable_start() {
        let grm = Grammar::new("S -> A\nA -> a | ^").unwrap().augment();
        let ff = FirstFollow::new(&grm);
        let nt = |s: &str| grm.nonterm_idx(s).unwrap();
        assert!(ff.nullable(nt("S'")));
        assert!(ff.nullable(nt("S")));
        assert_eq!(sorted_names(&grm, ff.follow(nt("A"))), sorted(vec!["$"]));
    }

    #[test]
    fn terminals_and_sequences() {
        let grm = Grammar::new("S -> A b\nA -> a | ^").unwrap().augment();
        let ff = FirstFollow::new(&grm);
        let a = grm.term_idx("a").unwrap();
        let b = grm.term_idx("b").unwrap();
        assert_eq!(ff.first_of(Symbol::Term(b)), (BTreeSet::from([b]), false));
        assert_eq!(ff.first_of(Symbol::Empty), (BTreeSet::new(), true));

        let seq = grm.prod(1).body.clone();
        assert_eq!(ff.first_of_seq(&seq), (BTreeSet::from([a, b]), false));
        assert_eq!(ff.first_of_seq(&[]), (BTreeSet::new(), true));
    }

    #[test]
    fn follow_of_start_has_end_marker() {
        for text in ["S -> a", "S -> S a | b", "S -> ^"] {
            let grm = Grammar::new(text).unwrap().augment();
            let ff = FirstFollow::new(&grm);
            assert!(ff.follow(grm.start()).contains(&grm.eof()));
            assert!(ff.follow(1).contains(&grm.eof()));
        }
    }

    #[test]
    fn undefined_nonterminal_has_empty_first() {
        let grm = Grammar::new("S -> B a | c").unwrap().augment();
        let ff = FirstFollow::new(&grm);
        let b = grm.nonterm_idx("B").unwrap();
        assert!(ff.first(b).is_empty());
        assert!(!ff.nullable(b));
        assert_eq!(sorted_names(&grm, ff.first(1)), sorted(vec!["c"]));
    }
}
