mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rubrica_core::{
    DocumentSnapshot, ExitCode, RubricConfig, RubricaError, ValidationLevel, ValidationResult,
    load_bibtex,
};
use rubrica_engine::{Validator, format_bibliography, malformed_input_report, render_citations};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "rubrica",
    about = "Validate and score academic project documents",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a project document against the rubric.
    Validate {
        /// Project snapshot (JSON).
        #[arg(long)]
        input: PathBuf,
        /// basic, standard or strict (Spanish names accepted).
        #[arg(long, default_value = "standard")]
        level: ValidationLevel,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Rubric override (.toml or .json).
        #[arg(long)]
        rubric: Option<PathBuf>,
        /// Extra references imported from a BibTeX file.
        #[arg(long)]
        bib: Option<PathBuf>,
    },

    /// Print the APA reference list of a project and/or a BibTeX file.
    Bibliography {
        #[arg(long, required_unless_present = "bib")]
        input: Option<PathBuf>,
        #[arg(long)]
        bib: Option<PathBuf>,
    },

    /// Print section bodies with citation markers rendered in APA style.
    Cite {
        #[arg(long)]
        input: PathBuf,
        /// Only this section.
        #[arg(long)]
        section: Option<String>,
    },

    /// Write the default rubric, ready for editing.
    Rubric {
        /// .toml or .json; stdout (TOML) when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code_for(&err).code());
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Validate {
            input,
            level,
            format,
            output,
            rubric,
            bib,
        } => {
            let config = match rubric {
                Some(path) => RubricConfig::load_from(&path)
                    .with_context(|| format!("cannot load rubric {}", path.display()))?,
                None => RubricConfig::default(),
            };
            let validator = Validator::new(config);

            let (result, code) = match load_project(&input, bib.as_deref()) {
                Ok(snapshot) => {
                    let result = validator.validate(&snapshot, level);
                    tracing::info!(
                        score = result.total_score,
                        max = result.max_score,
                        percentage = result.percentage,
                        passed = result.passed,
                        "validation finished"
                    );
                    let code = if result.passed {
                        ExitCode::Passed
                    } else {
                        ExitCode::Failed
                    };
                    (result, code)
                }
                Err(err) => {
                    tracing::warn!(input = %input.display(), error = %err, "malformed input");
                    let result =
                        malformed_input_report(&err, level, &validator.config().levels, Utc::now());
                    (result, ExitCode::MalformedInput)
                }
            };

            let rendered = render_result(&result, format)?;
            emit(&rendered, output.as_deref())?;
            std::process::exit(code.code());
        }

        Commands::Bibliography { input, bib } => {
            let mut references = match &input {
                Some(path) => load_snapshot(path)?.references,
                None => Vec::new(),
            };
            if let Some(path) = &bib {
                references.extend(
                    load_bibtex(path)
                        .with_context(|| format!("cannot read BibTeX {}", path.display()))?,
                );
            }
            if references.is_empty() {
                eprintln!("No references found");
            } else {
                println!("{}", format_bibliography(&references));
            }
        }

        Commands::Cite { input, section } => {
            let snapshot = load_snapshot(&input)?;
            let sections: Vec<_> = match &section {
                Some(id) => match snapshot.section(id) {
                    Some(found) => vec![found],
                    None => {
                        eprintln!("Section not found: {id}");
                        std::process::exit(ExitCode::MalformedInput.code());
                    }
                },
                None => snapshot.sections.iter().collect(),
            };
            for section in sections {
                println!("## {}\n", section.display_title());
                println!("{}\n", render_citations(&section.body));
            }
        }

        Commands::Rubric { output } => {
            let config = RubricConfig::default();
            match output {
                Some(path) => {
                    config.save_to(&path)?;
                    println!("Rubric written to {}", path.display());
                }
                None => print!("{}", config.to_toml_string()?),
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Errors rooted in `RubricaError` are bad input (rubric, project or BibTeX);
/// anything else is a plain failure.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.chain().any(|cause| cause.is::<RubricaError>()) {
        ExitCode::MalformedInput
    } else {
        ExitCode::Failed
    }
}

/// Snapshot for the read-only subcommands.
fn load_snapshot(path: &Path) -> Result<DocumentSnapshot> {
    DocumentSnapshot::load_from(path)
        .inspect_err(|err| tracing::warn!(input = %path.display(), error = %err, "malformed input"))
        .with_context(|| format!("invalid project {}", path.display()))
}

/// Snapshot plus any BibTeX references appended after its own.
fn load_project(input: &Path, bib: Option<&Path>) -> rubrica_core::Result<DocumentSnapshot> {
    let mut snapshot = DocumentSnapshot::load_from(input)?;
    if let Some(path) = bib {
        snapshot.references.extend(load_bibtex(path)?);
    }
    Ok(snapshot)
}

fn render_result(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Text => render::text_report(result),
    })
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("cannot write report {}", path.display()))?;
            tracing::debug!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
