mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use fieldgate::{Engine, FieldKind, FormDoc, doc_schema};
use report::{StateReport, lint_text};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Inspect and lint declarative show-if/required-if field dependencies",
    long_about = "Loads a form document, runs the dependency engine against it, and reports \
                  visibility/required state, transition events, and condition problems."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a form document and print the resulting field states.
    Eval {
        /// Path to the form document JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Apply a change before reporting: FIELD=VALUE. Checkbox fields
        /// take 1/0 (or true/false); grouped fields take a comma list of
        /// option values. Repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        /// Output mode.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Parse every selector in the document and report condition problems.
    Lint {
        /// Path to the form document JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Output mode.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the JSON Schema of the form document shape.
    Schema,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Eval { form, sets, format } => eval(&form, &sets, format),
        Command::Lint { form, format } => lint(&form, format),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&doc_schema())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn eval(form: &Path, sets: &[String], format: OutputFormat) -> CliResult<ExitCode> {
    let (doc, mut engine) = load_engine(form)?;
    // Setup transitions are part of the initial state, not the report.
    engine.take_events();

    for change in sets {
        apply_set(&mut engine, change)?;
    }
    let events = engine.take_events();

    let report = StateReport::collect(&doc.id, &engine, &events);
    match format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
    }
    Ok(ExitCode::SUCCESS)
}

fn lint(form: &Path, format: OutputFormat) -> CliResult<ExitCode> {
    let (_, engine) = load_engine(form)?;
    let report = engine.lint();
    match format {
        OutputFormat::Text => print!("{}", lint_text(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn load_engine(form: &Path) -> CliResult<(FormDoc, Engine)> {
    let json = fs::read_to_string(form)
        .map_err(|err| format!("cannot read {}: {err}", form.display()))?;
    let doc = FormDoc::from_json(&json)?;
    let registry = doc.build_registry()?;
    Ok((doc, Engine::new(registry)))
}

fn apply_set(engine: &mut Engine, change: &str) -> CliResult<()> {
    let (name, value) = change
        .split_once('=')
        .ok_or_else(|| format!("--set expects FIELD=VALUE, got '{change}'"))?;
    let kind = engine
        .field(name)
        .map(|field| field.kind.clone())
        .ok_or_else(|| format!("--set references unknown field '{name}'"))?;

    match kind {
        FieldKind::Scalar { .. } => engine.set_value(name, value),
        FieldKind::Checkbox { .. } => engine.set_checked(name, truthy(value)),
        FieldKind::RadioGroup { .. } | FieldKind::CheckboxGroup { .. } => {
            let values: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .collect();
            engine.set_group_checked(name, &values);
        }
        FieldKind::Fieldset => {
            return Err(format!("field '{name}' is a fieldset and has no value").into());
        }
    }
    Ok(())
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes" | "y"
    )
}
