// Labelled graph of the LR(0) automaton, for an outside renderer.

use crate::grammar::{Grammar, Symbol};
use crate::lr0::{Automaton, Item};
use std::io::{self, Write};

/// Id of the synthetic accept node.
pub const ACCEPT_NODE: &str = "acc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    /// Transition on a terminal.
    Shift,
    /// Transition on a nonterminal.
    Goto,
    /// End marker from the accepting state to the accept node.
    Accept,
}

/// A graph node: one automaton state, or the accept node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// `I0`, `I1`, ... or [`ACCEPT_NODE`].
    pub id: String,
    /// Item lines (`E → E . + T`), or `accept` for the accept node.
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Name of the symbol the transition is taken on.
    pub label: String,
    pub kind: EdgeKind,
}

/// Nodes and labelled edges describing an automaton. Carries no semantics
/// beyond what a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

fn state_id(state: usize) -> String {
    format!("I{}", state)
}

impl Graph {
    /// Describes the automaton of an augmented grammar.
    ///
    /// Edges are listed per state in transition order. The state holding
    /// `S' → S .` gets an extra `$` edge to the accept node.
    pub fn new(grm: &Grammar, lr0: &Automaton) -> Self {
        let mut graph = Graph::default();
        let accepting = Item { prod: 0, dot: 1 };
        let mut has_accept = false;

        for (state, items) in lr0.states().iter().enumerate() {
            graph.nodes.push(Node {
                id: state_id(state),
                lines: items.iter().map(|item| item.render(grm)).collect(),
            });
            for (sym, to) in lr0.transitions(state) {
                graph.edges.push(Edge {
                    from: state_id(state),
                    to: state_id(to),
                    label: grm.sym_name(sym).to_string(),
                    kind: match sym {
                        Symbol::NonTerm(_) => EdgeKind::Goto,
                        _ => EdgeKind::Shift,
                    },
                });
            }
            if items.contains(&accepting) {
                has_accept = true;
                graph.edges.push(Edge {
                    from: state_id(state),
                    to: ACCEPT_NODE.to_string(),
                    label: grm.term_name(grm.eof()).to_string(),
                    kind: EdgeKind::Accept,
                });
            }
        }
        if has_accept {
            graph.nodes.push(Node {
                id: ACCEPT_NODE.to_string(),
                lines: vec!["accept".to_string()],
            });
        }
        graph
    }

    /// Looks a node up by id (`I3`, `acc`).
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Writes the graph in Graphviz DOT syntax.
    pub fn write_dot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "digraph automaton {{")?;
        writeln!(out, "    rankdir=LR;")?;
        writeln!(out, "    node [shape=box, style=rounded];")?;
        for node in &self.nodes {
            let label = node
                .lines
                .iter()
                .map(|line| escape(line))
                .collect::<Vec<_>>()
                .join("\\l");
            if node.id == ACCEPT_NODE {
                writeln!(out, "    \"{}\" [label=\"{}\", shape=doublecircle];", node.id, label)?;
            } else {
                writeln!(
                    out,
                    "    \"{}\" [label=\"{}\\n\\n{}\\l\"];",
                    node.id, node.id, label
                )?;
            }
        }
        for edge in &self.edges {
            let style = match edge.kind {
                EdgeKind::Shift => "",
                EdgeKind::Goto => ", style=dashed",
                EdgeKind::Accept => ", style=bold",
            };
            writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{}\"{}];",
                edge.from,
                edge.to,
                escape(&edge.label),
                style
            )?;
        }
        writeln!(out, "}}")
    }

    /// [`Graph::write_dot`] into a string.
    pub fn to_dot(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_dot(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(text: &str) -> Graph {
        let grm = Grammar::new(text).unwrap().augment();
        let lr0 = Automaton::new(&grm);
        Graph::new(&grm, &lr0)
    }

    #[test]
    fn expression_graph() {
        let g = graph("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id");
        assert_eq!(g.nodes.len(), 13);
        assert_eq!(g.nodes[0].id, "I0");
        assert_eq!(g.nodes[0].lines[0], "E' → . E");
        assert_eq!(g.node("I5").unwrap().lines, vec!["F → id ."]);
        assert_eq!(g.node(ACCEPT_NODE).unwrap().lines, vec!["accept"]);

        let edge = |from: &str, label: &str| {
            g.edges
                .iter()
                .find(|e| e.from == from && e.label == label)
                .cloned()
                .unwrap()
        };
        let e = edge("I0", "E");
        assert_eq!((e.to.as_str(), e.kind), ("I1", EdgeKind::Goto));
        let e = edge("I0", "id");
        assert_eq!((e.to.as_str(), e.kind), ("I5", EdgeKind::Shift));
        let e = edge("I1", "$");
        assert_eq!((e.to.as_str(), e.kind), (ACCEPT_NODE, EdgeKind::Accept));
        assert_eq!(
            g.edges.iter().filter(|e| e.kind == EdgeKind::Accept).count(),
            1
        );
    }

    #[test]
    fn dot_output() {
        let dot = graph("S -> a").to_dot();
        assert!(dot.starts_with("digraph automaton {"));
        assert!(dot.contains("\"I0\" -> \"I1\" [label=\"S\", style=dashed];"));
        assert!(dot.contains("\"I0\" -> \"I2\" [label=\"a\"];"));
        assert!(dot.contains("\"I1\" -> \"acc\" [label=\"$\", style=bold];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn labels_are_escaped() {
        let dot = graph("S -> \" x").to_dot();
        assert!(dot.contains("[label=\"\\\"\"];"));
    }
}
