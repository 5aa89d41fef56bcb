//! Command line front end for inspecting a theme's build output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wp_assets::{
  AssetResolver, AssetsConfig, EnqueueStrategy, RecordingRegistrar, VERSION, enqueue_bundle,
  get_dependencies,
};

/// Resolve and enqueue bundler-generated theme assets.
#[derive(Parser, Debug)]
#[command(name = "wp-assets")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Configuration file (JSON or YAML); discovered in --root when omitted
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Directory searched for wp-assets.config.json / .yaml
  #[arg(long, value_name = "DIR", default_value = ".", global = true)]
  root: PathBuf,

  /// Theme root URL, overriding the configuration
  #[arg(long, value_name = "URL", global = true)]
  template_url: Option<String>,

  /// Theme root directory, overriding the configuration
  #[arg(long, value_name = "DIR", global = true)]
  template_dir: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the public URL of an asset, falling back to the unresolved name
  Url {
    /// Manifest key, e.g. scripts/main.js
    name: String,
    /// Fail when the asset is not in the manifest
    #[arg(long)]
    strict: bool,
  },
  /// Print the contents of a built asset
  Content {
    /// Manifest key, e.g. styles/critical.css
    name: String,
  },
  /// Print the dependency descriptor of an entry as JSON
  Deps {
    /// Entry name, e.g. main
    entry: String,
  },
  /// Print the registrations an entry would produce as JSON
  Enqueue {
    /// Entry name, e.g. main
    entry: String,
    /// Handle namespace; defaults to the configured namespace for the strategy
    #[arg(long)]
    namespace: Option<String>,
    /// Resolution strategy; defaults to the configured strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
  },
  /// Print the library version
  Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
  Flat,
  Entrypoints,
}

impl From<StrategyArg> for EnqueueStrategy {
  fn from(value: StrategyArg) -> Self {
    match value {
      StrategyArg::Flat => EnqueueStrategy::Flat,
      StrategyArg::Entrypoints => EnqueueStrategy::Entrypoints,
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if matches!(cli.command, Command::Version) {
    println!("{VERSION}");
    return Ok(());
  }

  let config = load_config(&cli)?;
  let resolver = AssetResolver::from_config(&config).context("failed to locate theme output")?;
  info!(
    manifest = %resolver.cache().path().display(),
    base_url = %resolver.paths().base_url,
    "resolving theme assets"
  );

  match cli.command {
    Command::Url { name, strict } => {
      let resolved = match strict {
        true => resolver.must_resolve(&name),
        false => resolver.resolve_asset_url(&name),
      };
      let url = resolved.with_context(|| format!("failed to resolve {name}"))?;
      println!("{url}");
    }
    Command::Content { name } => {
      let content = resolver
        .resolve_asset_content(&name)
        .with_context(|| format!("failed to read {name}"))?;
      print!("{content}");
    }
    Command::Deps { entry } => {
      let descriptor = get_dependencies(&resolver, &entry)
        .with_context(|| format!("failed to resolve dependencies of {entry}"))?;
      println!("{}", serde_json::to_string_pretty(&descriptor)?);
    }
    Command::Enqueue {
      entry,
      namespace,
      strategy,
    } => {
      let strategy = strategy.map(EnqueueStrategy::from).unwrap_or(config.strategy);
      let namespace = namespace.unwrap_or_else(|| config.namespace_for(strategy).to_string());
      let mut host = RecordingRegistrar::new();
      enqueue_bundle(&resolver, &mut host, &entry, &namespace, strategy)
        .with_context(|| format!("failed to enqueue {entry}"))?;
      println!(
        "{}",
        serde_json::to_string_pretty(&host.into_registrations())?
      );
    }
    Command::Version => unreachable!("handled before configuration is loaded"),
  }

  Ok(())
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn load_config(cli: &Cli) -> Result<AssetsConfig> {
  let mut config = match &cli.config {
    Some(path) => AssetsConfig::from_path(path)?,
    None => AssetsConfig::discover(&cli.root),
  };

  if let Some(url) = &cli.template_url {
    config.template_url = url.clone();
  }
  if let Some(dir) = &cli.template_dir {
    config.template_dir = dir.clone();
  }
  if config.template_dir.as_os_str().is_empty() {
    config.template_dir = cli.root.clone();
  }

  Ok(config)
}
