use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod domain;
mod error;
mod i18n;
mod models;
mod normalize;
mod patterns;
mod processor;
mod render;
mod store;
mod styles;

use config::{Cli, Commands, Config};
use error::AppError;
use models::PersonInput;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "email_finder=debug"
    } else {
        "email_finder=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Results go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Wraps an error with the translated message the user should see.
fn user_error(err: AppError, lang: &str) -> anyhow::Error {
    match err.message_key() {
        Some(key) => anyhow::anyhow!("{} ({})", i18n::translate(lang, key), err),
        None => err.into(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = config::build_config(&cli)?;

    match &cli.command {
        Commands::Generate {
            first_name,
            last_name,
            domain,
        } => {
            let input = PersonInput {
                first_name: Some(first_name.clone()),
                last_name: Some(last_name.clone()),
                full_name: None,
                domain: Some(domain.clone()),
            };
            generate_one(&input, &config)?;
        }
        Commands::Batch { input, .. } => {
            info!("Processing people from {}", input.display());
            process_file(input, &config)?;
        }
        Commands::Search { query } => {
            search(query, &config)?;
        }
        Commands::Serve { .. } => {
            info!("Starting API server on port {}", config.port);
            api::start_api_server(config.port, config.language.clone()).await?;
        }
    }

    Ok(())
}

fn generate_one(input: &PersonInput, config: &Config) -> Result<()> {
    let person =
        processor::admit_person(input).map_err(|e| user_error(e, &config.language))?;
    let report = patterns::generate_for_all(std::slice::from_ref(&person));
    let rendered = render::render_report(&report, config.output_format, &config.language)?;
    write_output(&rendered, None)
}

fn process_file(input: &Path, config: &Config) -> Result<()> {
    let input_data = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let records: Vec<PersonInput> = serde_json::from_str(&input_data)
        .with_context(|| format!("Failed to parse people from {}", input.display()))?;

    info!("Loaded {} records from {}", records.len(), input.display());

    let outcome = processor::process_batch(&records);
    let rendered = render::render_batch(&outcome, config.output_format, &config.language)?;
    write_output(&rendered, config.output_file.as_ref())?;

    if let Some(output) = &config.output_file {
        info!(
            "Wrote {} candidates to {}",
            outcome.report.flattened.len(),
            output.display()
        );
    }
    Ok(())
}

fn search(query: &str, config: &Config) -> Result<()> {
    let search =
        styles::parse_quick_search(query).map_err(|e| user_error(e, &config.language))?;
    let styled = styles::format_all_styles(&search.names, &search.domain);
    let rendered = render::render_styles(&styled, config.output_format, &config.language)?;
    write_output(&rendered, None)
}

fn write_output(content: &str, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => println!("{}", content),
    }
    Ok(())
}
