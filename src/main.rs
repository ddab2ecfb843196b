// teachlang: parser and semantic checker for a small teaching language

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as _;
use tracing_subscriber::{fmt, EnvFilter};

use teachlang::parser::parse;
use teachlang::semantic::Analyzer;

/// Check a teaching-language program for syntax and semantic errors
#[derive(Debug, clap::Parser)]
#[command(name = "teachlang", version, about)]
struct Args {
    /// Source file to check
    file: PathBuf,

    /// Stop after parsing
    #[arg(long)]
    parse_only: bool,

    /// Print the syntax tree after a successful parse
    #[arg(long)]
    dump_ast: bool,

    /// Print the outermost symbol table after a successful analysis
    #[arg(long)]
    dump_symbols: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

/// Returns whether the program was accepted.
fn run(args: &Args) -> anyhow::Result<bool> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;
    tracing::info!(file = %args.file.display(), bytes = source.len(), "checking");

    let program = match parse(&source) {
        Ok(program) => program,
        Err(errors) => {
            for error in &errors {
                println!("{error}");
            }
            return Ok(false);
        }
    };

    if args.dump_ast {
        print!("{program}");
    }
    if args.parse_only {
        println!("Parsed {} statement(s)", program.len());
        return Ok(true);
    }

    let mut analyzer = Analyzer::new();
    if !analyzer.analyze(&program) {
        for error in analyzer.diagnostics() {
            println!("{error}");
        }
        return Ok(false);
    }

    if args.dump_symbols {
        print!("{}", analyzer.symbols().dump());
    }
    println!("No errors found");
    Ok(true)
}
