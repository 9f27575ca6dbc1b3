use anyhow::{Context, Result};
use clap::Parser as _;
use monkey_parser::{Lexer, Parser};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, Level};

/// Parse Monkey source and print its canonical, fully parenthesised form.
#[derive(clap::Parser, Debug)]
#[command(name = "monkey-parse", version)]
struct Cli {
    /// Source file; stdin is read when omitted
    file: Option<PathBuf>,

    /// Print the syntax tree instead of the canonical rendering
    #[arg(long)]
    debug_ast: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{:?}", err);
            process::exit(2);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let input = read_source(cli.file.as_deref())?;
    let mut parser = Parser::new(Lexer::new(&input));
    let program = parser.parse_program();
    info!(
        statements = program.statements().len(),
        errors = parser.errors().len(),
        "parsed"
    );

    if cli.debug_ast {
        println!("{:#?}", program);
    } else {
        println!("{}", program);
    }

    let errors = parser.errors();
    if errors.is_empty() {
        return Ok(true);
    }
    eprintln!("parser has {} errors:", errors.len());
    for msg in errors {
        eprintln!("\t{}", msg);
    }
    Ok(false)
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
