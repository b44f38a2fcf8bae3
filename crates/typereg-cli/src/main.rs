//! Typereg - versioned type registry
//!
//! Usage:
//!   typereg list                       # Latest version of every type
//!   typereg latest <id>                # Newest version of one type
//!   typereg get <id> --spec ">=2.0"    # Newest version matching a specifier
//!   typereg versions <id>              # Every registered version, newest first
//!   typereg init                       # Write a starter catalog

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use typereg_core::catalog;
use typereg_core::catalog::paths::{global_config_dir, resolve_catalog_path};
use typereg_core::prelude::*;

#[derive(Parser)]
#[command(name = "typereg")]
#[command(about = "Versioned type registry", long_about = None)]
struct Cli {
    /// Catalog file to load (default: ./typereg.toml, then the global catalog)
    #[arg(long, short, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest version of every registered type
    List(FormatArgs),

    /// Show the newest version of a type
    Latest {
        /// Type identifier (e.g. net.nodebox.node.vector.Rect)
        identifier: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Resolve a type by exact version or version specifier
    Get {
        /// Type identifier
        identifier: String,

        /// Exact version (e.g. 2.0)
        #[arg(long, conflicts_with = "spec")]
        version: Option<String>,

        /// Version specifier (e.g. "=2.0", ">=2.0")
        #[arg(long)]
        spec: Option<String>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// List every registered version of a type, newest first
    Versions {
        /// Type identifier
        identifier: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Check whether a version satisfies a specifier
    Check {
        /// Version specifier (e.g. ">=2.0")
        spec: String,

        /// Candidate version (e.g. 2.1)
        version: String,
    },

    /// Write a starter catalog
    Init {
        /// Overwrite an existing catalog
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Args, Clone, Copy)]
struct FormatArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Debug)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Serialize)]
struct TypeRow<'a> {
    identifier: &'a str,
    version: Version,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> From<&'a CatalogType> for TypeRow<'a> {
    fn from(ty: &'a CatalogType) -> Self {
        Self {
            identifier: &ty.identifier,
            version: ty.version,
            name: ty.display_name(),
            category: ty.category.as_deref(),
            description: ty.description.as_deref(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for query output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typereg=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let catalog_path = catalog_path(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Init { force } => run_init(&catalog_path, force),
        Commands::Check { spec, version } => run_check(&spec, &version),
        Commands::List(args) => {
            let registry = load_registry(&catalog_path)?;
            let latest = registry.latest_per_identifier();
            print_types(&latest, args.format, "No types registered")
        }
        Commands::Latest { identifier, format } => {
            let registry = load_registry(&catalog_path)?;
            let ty = registry.latest(&identifier)?;
            print_types(&[ty], format.format, "")
        }
        Commands::Get {
            identifier,
            version,
            spec,
            format,
        } => {
            let registry = load_registry(&catalog_path)?;
            let selector = selector_from_args(version.as_deref(), spec.as_deref())?;
            let ty = registry.resolve(&identifier, &selector)?;
            print_types(&[ty], format.format, "")
        }
        Commands::Versions { identifier, format } => {
            let registry = load_registry(&catalog_path)?;
            let family = registry
                .family(&identifier)
                .ok_or_else(|| RegistryError::NotFound {
                    identifier: identifier.clone(),
                    requested: None,
                })?;
            let all: Vec<_> = family.iter().cloned().collect();
            print_types(&all, format.format, "")
        }
    }
}

fn catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let project_root = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(resolve_catalog_path(None, &project_root, &global_config_dir()?))
}

fn load_registry(path: &Path) -> Result<TypeRegistry<CatalogType>> {
    if !path.exists() {
        anyhow::bail!(
            "Catalog not found: {}. Create one with: typereg init",
            path.display()
        );
    }
    tracing::debug!(path = %path.display(), "loading catalog");
    catalog::parse_catalog(path)?.into_registry()
}

fn selector_from_args(version: Option<&str>, spec: Option<&str>) -> Result<VersionSelector> {
    match (version, spec) {
        (Some(v), _) => Ok(VersionSelector::Exact(v.parse()?)),
        (None, Some(s)) => Ok(VersionSelector::Matching(VersionSpecifier::parse(s)?)),
        (None, None) => Ok(VersionSelector::Latest),
    }
}

fn run_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Catalog already exists: {}. Use --force to overwrite",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = catalog::to_toml(&Catalog::starter())?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote starter catalog");
    println!("✓ Wrote starter catalog to {}", path.display());
    Ok(())
}

fn run_check(spec: &str, version: &str) -> Result<()> {
    let spec = VersionSpecifier::parse(spec)?;
    let version: Version = version.parse()?;

    if spec.matches(version) {
        println!("✓ {version} satisfies {spec}");
    } else {
        println!("✗ {version} does not satisfy {spec}");
        std::process::exit(1);
    }
    Ok(())
}

fn print_types(types: &[Arc<CatalogType>], format: OutputFormat, empty: &str) -> Result<()> {
    let rows: Vec<TypeRow<'_>> = types.iter().map(|t| TypeRow::from(t.as_ref())).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{empty}");
                return Ok(());
            }
            println!("{:<45} {:<8} {:<12} Description", "Identifier", "Version", "Category");
            println!("{}", "-".repeat(90));
            for row in &rows {
                println!(
                    "{:<45} {:<8} {:<12} {}",
                    row.identifier,
                    row.version.to_string(),
                    row.category.unwrap_or("-"),
                    row.description.unwrap_or("")
                );
            }
        }
    }
    Ok(())
}
