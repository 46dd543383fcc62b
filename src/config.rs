//! Defines the configuration settings for the email-finder application.

use crate::i18n::{self, FALLBACK_LANGUAGE};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 8080;

/// How results are written.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Translated headings and one block per person.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
    /// Every address on its own line, ready to paste.
    Plain,
}

/// Command line arguments for email-finder
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate the likely corporate email addresses of people", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Interface language (fr, en, es); defaults to the system locale
    #[arg(long, global = true, env = "EMAIL_FINDER_LANG")]
    pub lang: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, env = "EMAIL_FINDER_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML format)
    #[arg(long, global = true, env = "EMAIL_FINDER_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Generate the candidate addresses of a single person
    Generate {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Company domain (e.g. example.com, @example.com or a URL)
        #[arg(short, long)]
        domain: String,
    },
    /// Process a JSON file containing an array of person records
    Batch {
        /// Path to the input JSON file
        #[arg(short, long, env = "EMAIL_FINDER_INPUT")]
        input: PathBuf,

        /// Path to the output file (stdout when omitted)
        #[arg(short, long, env = "EMAIL_FINDER_OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Format "First Last, Other Name @ domain" in every naming style
    Search {
        /// The quick search line
        query: String,
    },
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "EMAIL_FINDER_PORT")]
        port: Option<u16>,
    },
}

/// TOML Configuration file structure
#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    output: Option<OutputConfig>,
    i18n: Option<I18nConfig>,
    server: Option<ServerConfig>,
}

#[derive(Deserialize, Debug, Default)]
struct OutputConfig {
    format: Option<OutputFormat>,
    output_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
struct I18nConfig {
    language: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ServerConfig {
    port: Option<u16>,
}

/// Application configuration settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// Locale used for interface text and user-facing error messages.
    pub language: String,
    /// How results are written.
    pub output_format: OutputFormat,
    /// Where batch results go when the command line does not say.
    pub output_file: Option<PathBuf>,
    /// Port of the API server.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: FALLBACK_LANGUAGE.to_string(),
            output_format: OutputFormat::Text,
            output_file: None,
            port: DEFAULT_PORT,
        }
    }
}

/// Load configuration from a TOML file
fn load_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        tracing::warn!(
            "Configuration file {} not found, using defaults",
            path.display()
        );
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    let config: ConfigFile = toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse TOML configuration from {}",
            path.display()
        )
    })?;

    tracing::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn apply_file_config(config: &mut Config, file_config: &ConfigFile) {
    if let Some(output) = &file_config.output {
        if let Some(format) = output.format {
            config.output_format = format;
        }
        if let Some(file) = &output.output_file {
            config.output_file = Some(file.clone());
        }
    }

    if let Some(i18n) = &file_config.i18n {
        if let Some(language) = &i18n.language {
            config.language = language.clone();
        }
    }

    if let Some(server) = &file_config.server {
        if let Some(port) = server.port {
            config.port = port;
        }
    }
}

/// Apply command line arguments to the Config instance
fn apply_cli_args(config: &mut Config, args: &Cli) {
    if let Some(ref lang) = args.lang {
        config.language = lang.clone();
    }

    if let Some(format) = args.format {
        config.output_format = format;
    }

    match &args.command {
        Commands::Batch {
            output: Some(output),
            ..
        } => config.output_file = Some(output.clone()),
        Commands::Serve { port: Some(port) } => config.port = *port,
        _ => {}
    }
}

fn validate_config(config: &mut Config) {
    let resolved = i18n::resolve_language(&config.language);
    if !i18n::is_supported(&config.language) {
        tracing::warn!(
            "Language '{}' is not supported. Using '{}'.",
            config.language,
            resolved
        );
    }
    config.language = resolved.to_string();

    if config.port == 0 {
        config.port = DEFAULT_PORT;
        tracing::warn!("Port was set to 0. Setting to {}.", DEFAULT_PORT);
    }
}

/// Language of the environment (`LANG`), as a browser would report its own.
fn system_language() -> Option<String> {
    std::env::var("LANG")
        .ok()
        .filter(|lang| !lang.is_empty() && lang != "C" && lang != "POSIX")
}

/// Builds the configuration: defaults, then the TOML file, then the command line.
pub(crate) fn build_config(args: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::default();
    if let Some(lang) = system_language() {
        config.language = lang;
    }

    if let Some(ref file_path) = args.config_file {
        let file_config = load_config_file(file_path)?;
        apply_file_config(&mut config, &file_config);
    } else {
        for path in ["./email-finder.toml", "./config.toml"] {
            let path = Path::new(path);
            if path.exists() {
                match load_config_file(path) {
                    Ok(file_config) => {
                        apply_file_config(&mut config, &file_config);
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load configuration from {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    apply_cli_args(&mut config, args);

    validate_config(&mut config);

    tracing::debug!("Final configuration: {:?}", config);

    Ok(config)
}
