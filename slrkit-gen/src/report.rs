//! Line-oriented text dumps of the generator's intermediate results.
//!
//! Every line starts with a short record tag followed by comma-separated
//! fields, so the output is both readable and easy to `grep`:
//!
//! ```text
//! PS,<number of productions>
//! P,<index>,<head> -> <body>
//! CS,<number of states>
//! C,<state>,<item>
//! FIRST,<nonterminal>,{<terminals>}
//! FOLLOW,<nonterminal>,{<terminals>}
//! TAB,<state>,<symbol>,<entry>
//! ```
use crate::first_follow::FirstFollow;
use crate::grammar::{EMPTY, Grammar};
use crate::lr0::Automaton;
use crate::table::Table;
use std::io::{self, Write};

/// Writes the indexed production list.
pub fn write_prods<W: Write>(out: &mut W, grm: &Grammar) -> io::Result<()> {
    writeln!(out, "PS,{}\n", grm.prods_len())?;
    for pidx in 0..grm.prods_len() {
        writeln!(out, "P,{},{}", pidx, grm.prod_to_string(pidx))?;
    }
    Ok(())
}

/// Writes every state of the canonical collection, one item per line and a
/// blank line after each state.
pub fn write_states<W: Write>(out: &mut W, grm: &Grammar, lr0: &Automaton) -> io::Result<()> {
    writeln!(out, "CS,{}\n", lr0.len())?;
    for (i, state) in lr0.states().iter().enumerate() {
        for item in state {
            writeln!(out, "C,{},{}", i, item.render(grm))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes FIRST then FOLLOW for every nonterminal. A nullable nonterminal
/// lists the empty-string marker first.
pub fn write_first_follow<W: Write>(out: &mut W, grm: &Grammar, ff: &FirstFollow) -> io::Result<()> {
    for nt in 0..grm.nonterms_len() {
        let mut names = Vec::new();
        if ff.nullable(nt) {
            names.push(EMPTY);
        }
        names.extend(ff.first(nt).iter().map(|&t| grm.term_name(t)));
        writeln!(out, "FIRST,{},{{{}}}", grm.nonterm_name(nt), names.join(", "))?;
    }
    for nt in 0..grm.nonterms_len() {
        let names: Vec<_> = ff.follow(nt).iter().map(|&t| grm.term_name(t)).collect();
        writeln!(out, "FOLLOW,{},{{{}}}", grm.nonterm_name(nt), names.join(", "))?;
    }
    Ok(())
}

/// Writes the non-empty table cells, row by row.
pub fn write_table<W: Write>(out: &mut W, grm: &Grammar, table: &Table) -> io::Result<()> {
    for state in 0..table.len() {
        for (sym, act) in table.row(state) {
            writeln!(out, "TAB,{},{},{}", state, grm.sym_name(sym), act)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prods() {
        let grm = Grammar::new("S -> A\nA -> a | ^").unwrap().augment();
        let text = to_string(|out| write_prods(out, &grm));
        assert_eq!(
            text,
            "PS,4\n\nP,0,S' -> S\nP,1,S -> A\nP,2,A -> a\nP,3,A -> ^\n"
        );
    }

    #[test]
    fn states() {
        let grm = Grammar::new("S -> a").unwrap().augment();
        let lr0 = Automaton::new(&grm);
        let text = to_string(|out| write_states(out, &grm, &lr0));
        assert_eq!(
            text,
            "CS,3\n\nC,0,S' → . S\nC,0,S → . a\n\nC,1,S' → S .\n\nC,2,S → a .\n\n"
        );
    }

    #[test]
    fn first_follow() {
        let grm = Grammar::new("S -> A b\nA -> a | ^").unwrap().augment();
        let ff = FirstFollow::new(&grm);
        let text = to_string(|out| write_first_follow(out, &grm, &ff));
        assert!(text.contains("FIRST,A,{^, a}\n"));
        assert!(text.contains("FIRST,S,{b, a}\n") || text.contains("FIRST,S,{a, b}\n"));
        assert!(text.contains("FOLLOW,A,{b}\n"));
        assert!(text.contains("FOLLOW,S',{$}\n"));
    }

    #[test]
    fn table() {
        let grm = Grammar::new("S -> a").unwrap().augment();
        let ff = FirstFollow::new(&grm);
        let lr0 = Automaton::new(&grm);
        let tab = Table::new(&grm, &ff, &lr0);
        let text = to_string(|out| write_table(out, &grm, &tab));
        assert_eq!(text, "TAB,0,S,1\nTAB,0,a,s2\nTAB,1,$,acc\nTAB,2,$,r1\n");
    }
}
