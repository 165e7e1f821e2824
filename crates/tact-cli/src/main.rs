//! Command-line interface for the Tact expression front-end and round-trip harness.

use clap::{Parser, Subcommand};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tact_roundtrip::{run, HarnessError, RoundtripConfig, TactFrontend};
use tact_syntax::{parse_expression, pretty_print_expr, Expr, ExprKind};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI error with source context for pretty printing.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read file: {message}")]
    IoError { message: String },

    #[error("parse error: {message}")]
    #[diagnostic(code(tact::parse_error))]
    ParseError {
        message: String,
        #[source_code]
        src: NamedSource<Arc<String>>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("generator error: {message}")]
    #[diagnostic(code(tact::generator_error))]
    GeneratorError { message: String },

    #[error("round-trip failed ({kind})")]
    #[diagnostic(code(tact::roundtrip_failure))]
    RoundtripFailure {
        kind: &'static str,
        #[help]
        help: String,
    },

    #[error("round-trip run aborted: {message}")]
    Aborted { message: String },
}

impl CliError {
    fn from_parse_error(e: tact_syntax::ParseError, source: Arc<String>, filename: &str) -> Self {
        let span = e.span();
        CliError::ParseError {
            message: e.to_string(),
            src: NamedSource::new(filename, source),
            span: (span.start, span.len()).into(),
        }
    }

    fn from_harness_error(e: HarnessError, seed: u64) -> Self {
        match e {
            HarnessError::Counterexample(cx) => CliError::RoundtripFailure {
                kind: cx.failure.kind(),
                help: format!("rerun with --seed {} to reproduce", seed),
            },
            HarnessError::Generator(e) => CliError::GeneratorError {
                message: e.to_string(),
            },
            HarnessError::Aborted { reason } => CliError::Aborted { message: reason },
        }
    }
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "tact", version)]
#[command(about = "Tact expression parser, formatter and round-trip harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file holding one Tact expression and show the AST
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the canonical rendering of an expression file
    Fmt {
        /// Input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        write: bool,
    },

    /// Run the randomized render/parse round-trip check
    Roundtrip {
        /// Number of random expressions to check
        #[arg(long, default_value = "1000")]
        cases: u32,

        /// Maximum nesting depth of generated expressions
        #[arg(long, default_value = "4")]
        depth: usize,

        /// Maximum number of call arguments or struct fields
        #[arg(long, default_value = "4")]
        max_args: usize,

        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let filter = if matches!(
        &cli.command,
        Commands::Parse { verbose: true, .. } | Commands::Roundtrip { verbose: true, .. }
    ) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Parse { file, verbose } => cmd_parse(&file, verbose),
        Commands::Fmt { file, write } => cmd_fmt(&file, write),
        Commands::Roundtrip {
            cases,
            depth,
            max_args,
            seed,
            verbose: _,
        } => cmd_roundtrip(RoundtripConfig {
            cases,
            max_depth: depth,
            max_args,
            seed: seed.unwrap_or_else(time_seed),
        }),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn read_and_parse(file: &PathBuf) -> CliResult<Expr> {
    let filename = file.display().to_string();
    let source = Arc::new(fs::read_to_string(file).map_err(|e| CliError::IoError {
        message: e.to_string(),
    })?);

    parse_expression(&source).map_err(|e| CliError::from_parse_error(e, source.clone(), &filename))
}

fn cmd_parse(file: &PathBuf, verbose: bool) -> CliResult<()> {
    let expr = read_and_parse(file)?;

    if verbose {
        println!("{:#?}", expr);
    } else {
        println!("{} (depth {})", expr.node.name(), expr.depth());
        match &expr.node {
            ExprKind::OpUnary { op, .. } => println!("  operator {}", op.symbol()),
            ExprKind::OpBinary { op, .. } => println!("  operator {}", op.symbol()),
            ExprKind::InitOf { contract, args } => {
                println!("  contract {} ({} args)", contract.node, args.len())
            }
            ExprKind::MethodCall { method, args, .. } => {
                println!("  method {} ({} args)", method.node, args.len())
            }
            ExprKind::StaticCall { function, args } => {
                println!("  function {} ({} args)", function.node, args.len())
            }
            ExprKind::FieldAccess { field, .. } => println!("  field {}", field.node),
            ExprKind::StructInstance { ty, args } => {
                println!("  struct {} ({} fields)", ty.node, args.len())
            }
            _ => {}
        }
    }

    Ok(())
}

fn cmd_fmt(file: &PathBuf, write: bool) -> CliResult<()> {
    let expr = read_and_parse(file)?;
    let formatted = pretty_print_expr(&expr);

    if write {
        fs::write(file, format!("{}\n", formatted)).map_err(|e| CliError::IoError {
            message: e.to_string(),
        })?;
        println!("formatted: {}", file.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

fn cmd_roundtrip(config: RoundtripConfig) -> CliResult<()> {
    let summary = run(&TactFrontend, &config).map_err(|e| {
        if let HarnessError::Counterexample(cx) = &e {
            println!("counterexample: {}", cx.rendered);
            println!("{}", cx.failure);
            println!("{:#?}", cx.expr);
        }
        CliError::from_harness_error(e, config.seed)
    })?;
    println!(
        "ok: {} expressions round-tripped (seed {})",
        summary.cases, summary.seed
    );
    Ok(())
}

fn time_seed() -> u64 {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    info!(seed, "no seed given, using clock");
    seed
}
