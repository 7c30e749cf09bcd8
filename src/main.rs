//! Tilwa command line
//!
//! Reads wisp-style source and writes the parenthesized S-expressions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process;

use tilwa::config::DEFAULT_TAB_WIDTH;
use tilwa::feedback::{ErrorReport, TranslationFeedback, TranslationStats};
use tilwa::{Config, Renderer};

/// Tilwa translator
#[derive(Parser, Debug)]
#[command(name = "tilwa")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Tilwa - turns indentation-based wisp syntax into S-expressions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Columns a tab character advances
    #[arg(long, global = true, default_value_t = DEFAULT_TAB_WIDTH)]
    tab_width: NonZeroUsize,

    /// How errors are reported
    #[arg(long, global = true, value_enum, default_value = "human")]
    error_format: ErrorFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a source file
    Translate {
        /// Input source file
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print the lexemes of a source file
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ErrorFormat {
    Human,
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::new(cli.tab_width);

    let result = match &cli.command {
        Some(Commands::Translate { input, output }) => {
            translate_file(Some(input.as_path()), output.as_deref(), &config)
        }
        Some(Commands::Check { input }) => check_file(input, &config, cli.error_format),
        Some(Commands::Tokens { input }) => dump_tokens(input, &config),
        Some(Commands::Version) => {
            println!("tilwa 0.1.0");
            println!("Tilwa wisp translator");
            println!("License: Apache-2.0");
            Ok(())
        }
        None => translate_file(cli.input.as_deref(), cli.output.as_deref(), &config),
    };

    if let Err(err) = result {
        report(&err, &cli);
        process::exit(1);
    }
}

/// Print an error in the requested format
fn report(err: &anyhow::Error, cli: &Cli) {
    match (cli.error_format, err.downcast_ref::<tilwa::Error>()) {
        (ErrorFormat::Json, Some(error)) => {
            let file = input_name(input_of(cli));
            eprintln!("{}", ErrorReport::from_error(error, &file).to_json());
        }
        _ => eprintln!("Error: {:#}", err),
    }
}

fn input_of(cli: &Cli) -> Option<&Path> {
    match &cli.command {
        Some(Commands::Translate { input, .. })
        | Some(Commands::Check { input })
        | Some(Commands::Tokens { input }) => Some(input.as_path()),
        Some(Commands::Version) => None,
        None => cli.input.as_deref(),
    }
}

fn input_name(input: Option<&Path>) -> String {
    input.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

/// Read the whole input, from stdin when no file is given
fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("reading standard input")?;
            Ok(source)
        }
    }
}

/// Translate a source file (or stdin) to a file (or stdout)
fn translate_file(input: Option<&Path>, output: Option<&Path>, config: &Config) -> Result<()> {
    let source = read_source(input)?;
    log::info!("translating {} ({} bytes)", input_name(input), source.len());

    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut renderer = Renderer::new(BufWriter::new(out));
    renderer.render(tilwa::events(&source, config))?;
    Ok(())
}

/// Check a source file for errors without writing output
fn check_file(input: &Path, config: &Config, format: ErrorFormat) -> Result<()> {
    let source = read_source(Some(input))?;
    let file = input_name(Some(input));

    let mut stats = TranslationStats::default();
    let mut failure = None;
    for event in tilwa::events(&source, config) {
        match event {
            Ok(event) => stats.record(&event),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    match (format, failure) {
        (ErrorFormat::Json, None) => {
            println!("{}", TranslationFeedback::success(file, stats).to_json());
            Ok(())
        }
        (ErrorFormat::Json, Some(err)) => {
            let report = ErrorReport::from_error(&err, &file);
            println!("{}", TranslationFeedback::failure(file, vec![report], stats).to_json());
            process::exit(1);
        }
        (ErrorFormat::Human, None) => {
            println!("✅ No errors found ({} groups, {} lines)", stats.groups, stats.lines);
            Ok(())
        }
        (ErrorFormat::Human, Some(err)) => Err(err.into()),
    }
}

/// Print one lexeme per line
fn dump_tokens(input: &Path, config: &Config) -> Result<()> {
    let source = read_source(Some(input))?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for token in tilwa::tokens(&source, config) {
        writeln!(out, "{}", token?)?;
    }
    out.flush()?;
    Ok(())
}
