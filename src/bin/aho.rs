//! Command line front-end for the exact and wildcard searches.
//!
//! Run with: cargo run --features cli --bin aho -- exact < input.txt

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};

use libaho::aho::builder::build_automaton_with_observer;
use libaho::aho::dot::write_dot;
use libaho::aho::{AllWildcardPolicy, Automaton, LogObserver, WildcardMatcher};

#[derive(Parser, Debug)]
#[command(
    about = "Aho-Corasick exact and wildcard pattern search",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Finds all occurrences of several patterns. Input: the text, the number of
    /// patterns n, then n patterns, all separated by whitespace.
    Exact(SearchArgs),
    /// Finds one pattern with a wildcard symbol. Input: the text, the pattern and
    /// the wildcard, each on its own line.
    Wildcard(SearchArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Read the input from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the automaton in Graphviz DOT format to this file.
    #[arg(long)]
    dot: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerbosityFlag {
    #[arg(short, long, global = true, help = "Set the verbosity to quiet")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Set the verbosity to verbose")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Set the verbosity to debug")]
    debug: bool,

    #[arg(short, long, global = true, help = "Set the verbosity to trace")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the log level filter corresponding to the given verbosity flags.
    fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.commands {
        Commands::Exact(args) => {
            let input = read_input(args.input.as_deref())?;
            run_exact(&input, args.dot.as_deref(), &mut out)?;
        }
        Commands::Wildcard(args) => {
            let input = read_input(args.input.as_deref())?;
            run_wildcard(&input, args.dot.as_deref(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Prints one `<position> <pattern-number>` line per occurrence, both numbered from 1.
fn run_exact(
    input: &str,
    dot: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let (text, patterns) = parse_exact_input(input)?;
    info!(
        "Searching {} patterns in a text of {} symbols",
        patterns.len(),
        text.chars().count()
    );

    let automaton: Automaton<char> = build_automaton_with_observer(&patterns, LogObserver)?;
    if let Some(path) = dot {
        render(&automaton, path)?;
    }

    for occurrence in automaton.find_all_with_observer(text, &mut LogObserver) {
        writeln!(out, "{} {}", occurrence.start + 1, occurrence.pattern + 1)?;
    }
    Ok(())
}

/// Prints one position per line, numbered from 1.
fn run_wildcard(
    input: &str,
    dot: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let (text, pattern, wildcard) = parse_wildcard_input(input)?;

    let matcher =
        WildcardMatcher::build_with(pattern, wildcard, AllWildcardPolicy::default(), LogObserver)?;
    if let Some(path) = dot {
        match matcher.automaton() {
            Some(automaton) => render(automaton, path)?,
            None => warn!(
                "Pattern has no literal symbols, there is no automaton to write to {}",
                path.display()
            ),
        }
    }

    for start in matcher.find_starts_with_observer(text, &mut LogObserver) {
        writeln!(out, "{}", start + 1)?;
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    let mut input = String::new();
    match path {
        Some(path) => File::open(path)?.read_to_string(&mut input)?,
        None => io::stdin().read_to_string(&mut input)?,
    };
    Ok(input)
}

/// Parses `<text> <n> <pattern_1> ... <pattern_n>`.
fn parse_exact_input(input: &str) -> Result<(&str, Vec<&str>), Box<dyn Error>> {
    let mut tokens = input.split_whitespace();
    let text = tokens.next().ok_or("missing text")?;
    let count: usize = tokens.next().ok_or("missing pattern count")?.parse()?;
    let patterns: Vec<&str> = tokens.take(count).collect();
    if patterns.len() != count {
        return Err(format!("expected {count} patterns, found {}", patterns.len()).into());
    }
    Ok((text, patterns))
}

/// Parses three lines: text, pattern, and a line whose first character is the wildcard.
fn parse_wildcard_input(input: &str) -> Result<(&str, &str, char), Box<dyn Error>> {
    let mut lines = input.lines().map(str::trim);
    let text = lines.next().ok_or("missing text")?;
    let pattern = lines.next().ok_or("missing pattern")?;
    let wildcard = lines
        .next()
        .and_then(|line| line.chars().next())
        .ok_or("missing wildcard")?;
    Ok((text, pattern, wildcard))
}

fn render(automaton: &Automaton<char>, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = BufWriter::new(File::create(path)?);
    write_dot(automaton, file)?;
    info!("Wrote automaton to {}", path.display());
    Ok(())
}
