//! SC Compiler - token scanner for S-C (simple C)
//!
//! Usage: scc [OPTIONS] <input>

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use sc_compiler::driver::read_source;
use sc_compiler::lexer::{DEFAULT_CAPACITY, LexerConfig, Lookahead, TokenStream};
use sc_compiler::DiagnosticReporter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(ClapParser, Debug)]
#[command(name = "scc")]
#[command(author = "S-C Toolchain Team")]
#[command(version)]
#[command(about = "Token scanner for S-C, a restricted subset of C", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Let any run of spaces and tabs separate a name from its `(` or `[`
    #[arg(long)]
    relaxed_lookahead: bool,

    /// Deepest argument list whose contents are tokenized
    #[arg(long, default_value_t = 128)]
    max_nesting: usize,

    /// Initial capacity of the token buffer
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    initial_capacity: usize,

    /// Do not print the token dump
    #[arg(short, long)]
    quiet: bool,

    /// Treat recoverable scan errors as failures
    #[arg(long)]
    deny_warnings: bool,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn lexer_config(&self) -> LexerConfig {
        LexerConfig {
            initial_capacity: self.initial_capacity,
            max_nesting: self.max_nesting,
            lookahead: if self.relaxed_lookahead {
                Lookahead::Blanks
            } else {
                Lookahead::SingleSpace
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "sc_compiler=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Fatal scan errors are rendered here and end in a failing exit code; only errors
/// outside the scan reach `main`.
fn run(args: &Args) -> Result<ExitCode> {
    let mut reporter = DiagnosticReporter::new();
    let source = match read_source(&args.input) {
        Ok(source) => source,
        Err(e) => {
            reporter.report_error(None, &e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let file_id = reporter.add_file(source.name(), source.text());
    let name = source.name().to_string();

    let stream = match TokenStream::lex(source, &args.lexer_config()) {
        Ok(stream) => stream,
        Err(e) => {
            reporter.report_error(Some(file_id), &e);
            return Ok(ExitCode::FAILURE);
        }
    };

    for diagnostic in stream.diagnostics() {
        reporter.report_warning(file_id, diagnostic);
    }

    if !args.quiet {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(stream.dump().as_bytes())
            .context("writing token dump")?;
    }

    tracing::debug!(
        tokens = stream.len(),
        warnings = stream.diagnostics().len(),
        "scanned {name}"
    );

    if args.deny_warnings && !stream.diagnostics().is_empty() {
        anyhow::bail!(
            "{} recoverable scan error(s) in {name}",
            stream.diagnostics().len()
        );
    }

    Ok(ExitCode::SUCCESS)
}
