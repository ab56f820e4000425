use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use asset_revision::{
  AssetRevision, AssetRevisioning, ResourceKind, RevisionConfig, RevisionSettings,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Inspect asset packages and revisioned URLs
#[derive(Parser)]
#[command(name = "asset-revision")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Configuration file (JSON or YAML); defaults to asset-revision.{json,yaml} in the current directory
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Package manifest JSON
  #[arg(long, global = true)]
  manifest: Option<PathBuf>,

  /// Public document root containing js/min
  #[arg(long, global = true)]
  public_dir: Option<PathBuf>,

  /// Revision token
  #[arg(long, global = true)]
  revision: Option<String>,

  /// Prefer merged artifacts when present
  #[arg(long, global = true)]
  enabled: bool,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List declared packages
  Packages,

  /// Resolve a package into its files
  Resolve {
    /// Package name
    package: String,

    /// Apply revision markers to eligible files of this kind (css or js)
    #[arg(long)]
    stamp: Option<String>,
  },

  /// Apply the revision marker to a single reference
  Stamp {
    /// Resource kind (css or js)
    kind: String,

    /// Reference to stamp
    href: String,
  },
}

#[derive(Serialize)]
struct PackageSummary<'a> {
  name: &'a str,
  valid: bool,
}

#[derive(Serialize)]
struct StampResult<'a> {
  href: &'a str,
  eligible: bool,
  result: String,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let settings = load_settings(&cli)?;
  let service = AssetRevision::from_config(&settings)?;

  match &cli.command {
    Commands::Packages => cmd_packages(&service),
    Commands::Resolve { package, stamp } => cmd_resolve(&service, package, stamp.as_deref()),
    Commands::Stamp { kind, href } => cmd_stamp(&service, kind, href),
  }
}

fn load_settings(cli: &Cli) -> Result<RevisionSettings> {
  let mut settings = match &cli.config {
    Some(path) => RevisionSettings::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => RevisionSettings::discover(Path::new(".")),
  };

  if let Some(manifest) = &cli.manifest {
    settings.manifest_path = Some(manifest.clone());
  }
  if let Some(public_dir) = &cli.public_dir {
    settings.public_dir = Some(public_dir.clone());
  }
  if let Some(revision) = &cli.revision {
    settings.revision = Some(revision.clone());
  }
  settings.enabled |= cli.enabled;

  tracing::debug!(
    enabled = settings.is_enabled(),
    manifest = ?settings.manifest_path(),
    public_dir = ?settings.public_dir(),
    "resolved revision settings"
  );
  Ok(settings)
}

fn cmd_packages(service: &AssetRevision) -> Result<()> {
  let manifest = service.resolver().manifest();
  let packages: Vec<PackageSummary<'_>> = manifest
    .names()
    .map(|name| PackageSummary {
      name,
      valid: manifest.get(name).is_some_and(|group| group.is_valid()),
    })
    .collect();

  print_json(&packages)
}

fn cmd_resolve(service: &AssetRevision, package: &str, stamp: Option<&str>) -> Result<()> {
  if !service.has_package(package) {
    bail!("unknown package {package}");
  }

  let mut resolved = service.package_files(package);
  if let Some(kind) = stamp {
    let kind = parse_kind(kind)?;
    for file in &mut resolved.files {
      if service.is_eligible(kind.as_str(), file) {
        *file = service.rewrite(file);
      }
    }
  }

  print_json(&resolved)
}

fn cmd_stamp(service: &AssetRevision, kind: &str, href: &str) -> Result<()> {
  let eligible = service.is_eligible(kind, href);
  let result = if eligible {
    service.rewrite(href)
  } else {
    href.to_string()
  };

  print_json(&StampResult {
    href,
    eligible,
    result,
  })
}

fn parse_kind(value: &str) -> Result<ResourceKind> {
  ResourceKind::parse(value)
    .with_context(|| format!("unsupported resource kind {value}, expected css or js"))
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("failed to serialise output")?;
  println!("{rendered}");
  Ok(())
}
