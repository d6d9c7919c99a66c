//! openapi-scout CLI
//!
//! Discovers OpenAPI specs on a hostname and derives artifacts from them:
//! flattened operations, subsets, overviews, skills, call stubs, and a
//! markdown reference.

mod cache;

use anyhow::{bail, Context, Result};
use cache::FileCache;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use openapi_scout_common::SpecLocation;
use openapi_scout_generator::{generate_api_docs, generate_overview, generate_request_stub, OverviewKind};
use openapi_scout_parser::{dereference, flatten, match_operation, needs_upgrade, parse_document, subset, upgrade};
use openapi_scout_probe::{HttpClient, SpecProbe};
use serde_json::Value;
use std::path::PathBuf;

const DEFAULT_LINK_BASE: &str = "https://oapis.org";

#[derive(Parser)]
#[command(name = "openapi-scout")]
#[command(version, about = "Discover OpenAPI specs and derive artifacts from them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for the discovery cache
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Read the spec from a local file instead of probing the hostname
    #[arg(long, global = true)]
    spec: Option<PathBuf>,

    /// URL to attribute the document to (used for server resolution;
    /// defaults to the discovered URL, required with --spec when the
    /// document declares no absolute servers)
    #[arg(long, global = true)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the spec URL for a hostname
    #[command(after_help = "EXAMPLES:\n  \
        # Probe well-known locations and print the discovered location\n  \
        openapi-scout resolve api.github.com\n\n  \
        # Print the raw spec body instead\n  \
        openapi-scout resolve api.github.com --text")]
    Resolve {
        /// Hostname to probe
        hostname: String,

        /// Print the raw spec text instead of the location record
        #[arg(long)]
        text: bool,
    },

    /// Flatten every operation into self-contained JSON records
    #[command(after_help = "EXAMPLES:\n  \
        # All operations\n  \
        openapi-scout operations api.github.com\n\n  \
        # Only specific operation ids\n  \
        openapi-scout operations api.github.com --id repos/get --id repos/create\n\n  \
        # From a local file\n  \
        openapi-scout operations api.github.com --spec ./openapi.json")]
    Operations {
        /// Hostname to resolve
        hostname: String,

        /// Restrict to these operation ids
        #[arg(long = "id")]
        operation_ids: Vec<String>,
    },

    /// Reduce a document to one route or operationId, fully dereferenced
    #[command(after_help = "EXAMPLES:\n  \
        openapi-scout subset api.github.com /repos/{owner}/{repo}\n  \
        openapi-scout subset api.github.com repos/get --format yaml")]
    Subset {
        /// Hostname to resolve
        hostname: String,

        /// Route (leading slash) or operationId
        route: String,

        /// Output serialization
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Tag-grouped one-line overview of every operation
    Overview {
        /// Hostname to resolve
        hostname: String,

        /// Base URL for per-operation detail links
        #[arg(long, default_value = DEFAULT_LINK_BASE)]
        link_base: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Skill file with front matter for agent tooling
    Skills {
        /// Hostname to resolve
        hostname: String,

        /// Base URL for per-operation detail links
        #[arg(long, default_value = DEFAULT_LINK_BASE)]
        link_base: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Markdown API reference, optionally for one route only
    Summary {
        /// Hostname to resolve
        hostname: String,

        /// Route or operationId to restrict the reference to
        route: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// TypeScript call stub for one operation
    #[command(after_help = "EXAMPLES:\n  \
        openapi-scout stub api.github.com repos/get\n  \
        openapi-scout stub api.github.com /repos/{owner}/{repo} --export")]
    Stub {
        /// Hostname to resolve
        hostname: String,

        /// Route (leading slash) or operationId
        route: String,

        /// Emit a default export
        #[arg(long)]
        export: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// A loaded document plus where it (nominally) came from
struct LoadedSpec {
    document: Value,
    openapi_url: String,
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("openapi-scout")
}

fn load_spec(cli: &Cli, hostname: &str, http: &HttpClient) -> Result<LoadedSpec> {
    let raw_location = match &cli.spec {
        Some(path) => {
            if cli.verbose {
                println!("{} Reading local spec: {}", "→".cyan(), path.display());
            }
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            LoadedSpec {
                document: parse_document(&text).context("Failed to parse local spec")?,
                openapi_url: cli
                    .url
                    .clone()
                    .unwrap_or_else(|| format!("https://{hostname}/openapi.json")),
            }
        }
        None => {
            let location = resolve_location(cli, hostname, http)?;
            LoadedSpec {
                document: parse_document(&location.raw_text)
                    .context("Failed to parse discovered spec")?,
                openapi_url: cli.url.clone().unwrap_or(location.resolved_url),
            }
        }
    };

    if needs_upgrade(&raw_location.document) {
        if cli.verbose {
            println!("{} Swagger 2.0 document, converting", "→".cyan());
        }
        let document = upgrade_document(&raw_location, cli, http)?;
        return Ok(LoadedSpec {
            document,
            openapi_url: raw_location.openapi_url,
        });
    }
    Ok(raw_location)
}

fn upgrade_document(spec: &LoadedSpec, cli: &Cli, http: &HttpClient) -> Result<Value> {
    if cli.spec.is_some() && cli.url.is_none() {
        bail!(
            "Local spec is Swagger 2.0; pass --url so the conversion service \
             can fetch it, or convert it beforehand"
        );
    }
    upgrade(&spec.openapi_url, http).context("Swagger conversion failed")
}

fn resolve_location(cli: &Cli, hostname: &str, http: &HttpClient) -> Result<SpecLocation> {
    let cache_dir = cli.cache_dir.clone().unwrap_or_else(default_cache_dir);
    let cache = FileCache::open(&cache_dir)
        .with_context(|| format!("Failed to open cache at {}", cache_dir.display()))?;
    let probe = SpecProbe::new(&cache, http);

    if cli.verbose {
        println!("{} Probing {hostname}", "→".cyan());
    }
    probe
        .resolve(hostname)
        .with_context(|| format!("Probe failed for {hostname}"))?
        .with_context(|| format!("No OpenAPI spec found on {hostname}"))
}

fn emit(text: &str, output: Option<&std::path::Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let http = HttpClient::new().context("Failed to initialize HTTP client")?;

    match &cli.command {
        Commands::Resolve { hostname, text } => {
            let location = resolve_location(&cli, hostname, &http)?;
            if cli.verbose {
                if let Ok(document) = parse_document(&location.raw_text) {
                    eprintln!("{} Base URL: {}", "→".cyan(), location.base_url(&document));
                }
            }
            if *text {
                println!("{}", location.raw_text);
            } else {
                eprintln!(
                    "{} Found {} ({})",
                    "✓".green().bold(),
                    location.resolved_url.yellow(),
                    location.content_type.as_str()
                );
                println!("{}", serde_json::to_string_pretty(&location)?);
            }
        }

        Commands::Operations {
            hostname,
            operation_ids,
        } => {
            let spec = load_spec(&cli, hostname, &http)?;
            let filter = if operation_ids.is_empty() {
                None
            } else {
                Some(operation_ids.as_slice())
            };
            let operations = flatten(&spec.document, Some(hostname.as_str()), &spec.openapi_url, filter)
                .context("Failed to flatten operations")?;
            if cli.verbose {
                eprintln!(
                    "{} {} operations from {}",
                    "✓".green().bold(),
                    operations.len(),
                    spec.openapi_url
                );
            }
            println!("{}", serde_json::to_string_pretty(&operations)?);
        }

        Commands::Subset {
            hostname,
            route,
            format,
        } => {
            let spec = load_spec(&cli, hostname, &http)?;
            let trimmed = subset(&spec.document, route)
                .with_context(|| format!("No operation matching '{route}'"))?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trimmed)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&trimmed)?),
            }
        }

        Commands::Overview {
            hostname,
            link_base,
            output,
        } => {
            let spec = load_spec(&cli, hostname, &http)?;
            let document = dereference(&spec.document);
            let overview = generate_overview(hostname, &document, link_base, OverviewKind::Overview)
                .context("Failed to render overview")?;
            emit(&overview, output.as_deref())?;
        }

        Commands::Skills {
            hostname,
            link_base,
            output,
        } => {
            let spec = load_spec(&cli, hostname, &http)?;
            let document = dereference(&spec.document);
            let skill = generate_overview(hostname, &document, link_base, OverviewKind::Skill)
                .context("Failed to render skill file")?;
            emit(&skill, output.as_deref())?;
        }

        Commands::Summary {
            hostname,
            route,
            output,
        } => {
            let spec = load_spec(&cli, hostname, &http)?;
            let document = match route {
                Some(route) => subset(&spec.document, route)
                    .with_context(|| format!("No operation matching '{route}'"))?,
                None => dereference(&spec.document),
            };
            emit(&generate_api_docs(&document), output.as_deref())?;
        }

        Commands::Stub {
            hostname,
            route,
            export,
        } => {
            let spec = load_spec(&cli, hostname, &http)?;
            let document = dereference(&spec.document);
            let matched = match_operation(&document, route)
                .with_context(|| format!("No operation matching '{route}'"))?;
            let stub = generate_request_stub(
                &document,
                &matched.method.to_lowercase(),
                &matched.operation,
                &matched.path,
                &spec.openapi_url,
                *export,
            )
            .context("Failed to render call stub")?;
            println!("{stub}");
        }
    }

    Ok(())
}
