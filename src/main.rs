//! hookflow CLI entry point

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hookflow::{analyze, build_graph, Cli, HookflowError, Lang, OutputFormat};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> hookflow::Result<String> {
    let cli = Cli::parse();

    if !cli.path.exists() {
        return Err(HookflowError::FileNotFound {
            path: cli.path.display().to_string(),
        });
    }

    // Validate the extension up front; the library itself falls back to the
    // TSX grammar, but a CLI user pointing at a .py file should hear about it
    let lang = Lang::from_path(&cli.path)?;

    if cli.verbose {
        eprintln!("Detected language: {}", lang.name());
    }

    let source = fs::read_to_string(&cli.path)?;
    let file_name = cli.path.file_name().and_then(|f| f.to_str());

    let analysis = analyze(&source, file_name)?;

    if cli.verbose {
        eprintln!(
            "Component: {} ({} hooks, {} effects, {} callbacks, {} elements)",
            analysis.component_name.as_deref().unwrap_or("<none>"),
            analysis.hooks.len(),
            analysis.effects.len(),
            analysis.callbacks.len(),
            analysis.elements.len()
        );
    }

    if cli.analysis {
        return encode(&analysis, cli.format);
    }

    let layout = build_graph(Some(&analysis));
    encode(&layout, cli.format)
}

fn encode<T: serde::Serialize>(value: &T, format: OutputFormat) -> hookflow::Result<String> {
    let result = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::JsonCompact => serde_json::to_string(value),
    };
    result.map_err(|e| HookflowError::AnalysisFailure {
        message: format!("JSON serialization failed: {}", e),
    })
}
