use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use standards_watcher::cli::{Cli, Commands};
use standards_watcher::config::Config;
use standards_watcher::errors::WatcherError;
use standards_watcher::services::{collect, FeedBuilder, RunService};
use standards_watcher::sources::{HttpFetcher, SourceRegistry};
use standards_watcher::storage::FsFeedStore;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tfmt::time::UtcTime::rfc_3339())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(path) = cli.sources {
        config.sources_path = Some(path);
    }
    debug!(?config, "Loaded configuration");

    let registry = SourceRegistry::load(config.sources_path.as_deref()).with_context(|| {
        match &config.sources_path {
            Some(path) => format!("could not load sources from {}", path.display()),
            None => "built-in sources are invalid".to_string(),
        }
    })?;

    match cli.command {
        Commands::Run { out_dir, only } => {
            if let Some(dir) = out_dir {
                config.out_dir = dir;
            }
            cmd_run(&config, &registry, &only)
        }
        Commands::List => cmd_list(&registry),
        Commands::Preview { name } => cmd_preview(&config, &registry, &name),
    }
}

fn cmd_run(config: &Config, registry: &SourceRegistry, only: &[String]) -> anyhow::Result<()> {
    let sources = registry.select(only)?;

    let store = FsFeedStore::init(&config.out_dir).with_context(|| {
        format!("could not create output directory {}", config.out_dir.display())
    })?;
    let fetcher = HttpFetcher::from_config(config)?;
    let service = RunService::new(fetcher, store, FeedBuilder::new(config.publish_base.clone()));

    // Per-source failures are reported in the log, never through the exit code.
    service.run(sources);

    Ok(())
}

fn cmd_list(registry: &SourceRegistry) -> anyhow::Result<()> {
    if registry.is_empty() {
        println!("No sources configured.");
        return Ok(());
    }

    println!("Configured sources:\n");
    for source in registry.sources() {
        println!("  {} - {}", source.name, source.title);
        println!("    URL: {}", source.url);
        if !source.url.starts_with(&source.base_url) {
            println!("    Base: {}", source.base_url);
        }
        println!();
    }

    Ok(())
}

fn cmd_preview(config: &Config, registry: &SourceRegistry, name: &str) -> anyhow::Result<()> {
    let source = registry
        .find(name)
        .ok_or_else(|| WatcherError::SourceNotFound(name.to_string()))?;

    let fetcher = HttpFetcher::from_config(config)?;
    let items = collect(&fetcher, source)
        .with_context(|| format!("could not read items from {}", source.url))?;

    if items.is_empty() {
        println!("No items parsed for {}.", source.name);
        return Ok(());
    }

    println!("{} ({} items):\n", source.title, items.len());
    for item in &items {
        let date = if item.dated {
            item.published.format("%Y-%m-%d").to_string()
        } else {
            "(no date)".to_string()
        };
        println!("  {:<10} {}", date, item.title);
        println!("             {}", item.url);
    }

    let undated = items.iter().filter(|i| !i.dated).count();
    if undated > 0 {
        println!("\n{} items without a parseable date will use the fetch time.", undated);
    }

    Ok(())
}
