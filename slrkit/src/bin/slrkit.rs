//! Command-line interface for the SLR(1) generator and parse driver.
//!
//! ```text
//! slrkit table -g expr.g [--states] [--sets]
//! slrkit parse -g expr.g -i "id + id * id"
//! slrkit dot   -g expr.g [-o expr.dot]
//! ```
//!
//! Logging is controlled by `RUST_LOG`.

#[cfg(feature = "cli")]
mod real {
    use anyhow::{Context, Result, bail};
    use clap::{Parser, Subcommand};
    use slrkit::Parser as SlrParser;
    use slrkit::slrkit_gen::{self, Slr, report};
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};

    #[derive(Parser)]
    #[command(about = "Build SLR(1) tables and trace parses")]
    struct Args {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Print the productions and the parse table.
        Table {
            /// Path to the grammar file
            #[arg(short = 'g', long)]
            grammar: PathBuf,

            /// Also print the LR(0) item sets.
            #[arg(long)]
            states: bool,

            /// Also print the FIRST and FOLLOW sets.
            #[arg(long)]
            sets: bool,
        },

        /// Parse whitespace-separated tokens and print the trace.
        Parse {
            /// Path to the grammar file
            #[arg(short = 'g', long)]
            grammar: PathBuf,

            /// Input tokens, e.g. "id + id"
            #[arg(short = 'i', long)]
            input: String,
        },

        /// Write the LR(0) automaton as Graphviz DOT.
        Dot {
            /// Path to the grammar file
            #[arg(short = 'g', long)]
            grammar: PathBuf,

            /// Output file; stdout if omitted
            #[arg(short = 'o', long)]
            output: Option<PathBuf>,
        },
    }

    fn load(path: &Path) -> Result<Slr> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read grammar {}", path.display()))?;
        slrkit_gen::generate(&text).with_context(|| format!("invalid grammar {}", path.display()))
    }

    fn table(slr: &Slr, states: bool, sets: bool) -> Result<()> {
        let grm = slr.grammar();
        let mut out = io::stdout().lock();
        report::write_prods(&mut out, grm)?;
        writeln!(out)?;
        if states {
            report::write_states(&mut out, grm, slr.automaton())?;
        }
        if sets {
            report::write_first_follow(&mut out, grm, slr.first_follow())?;
            writeln!(out)?;
        }
        report::write_table(&mut out, grm, slr.table())?;
        if !slr.is_slr1() {
            writeln!(out, "\n{} conflicts", slr.conflicts().len())?;
        }
        Ok(())
    }

    fn parse(slr: &Slr, input: &str) -> Result<()> {
        let trace = SlrParser::new(slr).parse(input);
        trace.write(&mut io::stdout().lock())?;
        if let Some(err) = trace.error() {
            bail!("{}", err);
        }
        Ok(())
    }

    fn dot(slr: &Slr, output: Option<&Path>) -> Result<()> {
        let graph = slr.graph();
        match output {
            Some(path) => {
                let mut file = std::fs::File::create(path)
                    .with_context(|| format!("cannot create {}", path.display()))?;
                graph.write_dot(&mut file)?;
            }
            None => graph.write_dot(&mut io::stdout().lock())?,
        }
        Ok(())
    }

    pub fn main() -> Result<()> {
        env_logger::init();
        let args = Args::parse();
        match args.command {
            Command::Table {
                grammar,
                states,
                sets,
            } => table(&load(&grammar)?, states, sets),
            Command::Parse { grammar, input } => parse(&load(&grammar)?, &input),
            Command::Dot { grammar, output } => dot(&load(&grammar)?, output.as_deref()),
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    real::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("slrkit disabled (compiled without `cli` feature)");
}
