//! Git Browser - serve a set of git repositories over a JSON API
//!
//! # Usage
//! ```bash
//! git-browser /srv/git                  # Serve every repository under /srv/git
//! git-browser ~/myproject --open        # Serve one repository and open the browser
//! git-browser --config browser.toml     # Repositories and server from a config file
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_browser::config::Config;
use git_browser::{QueryFacade, RepositoryRegistry, RepositorySource};

/// Git Browser - browse git repositories through a JSON API
#[derive(Parser)]
#[command(name = "git-browser")]
#[command(about = "Serve git repositories over a read-mostly JSON API", long_about = None)]
struct Cli {
    /// A repository, or a directory whose subdirectories are repositories
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

fn exit_with(message: &str, detail: impl std::fmt::Display) -> ! {
    eprintln!("✗ {}", message);
    eprintln!("  {}", detail);
    std::process::exit(1);
}

fn load_config(cli: &Cli) -> git_browser::Result<Config> {
    match (&cli.config, &cli.path) {
        (Some(file), Some(_)) => Config::read(file),
        (Some(file), None) => Config::load(file),
        (None, _) => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.config.is_none() && cli.path.is_none() {
        eprintln!("Usage: git-browser <PATH> [--open]");
        eprintln!("       git-browser --config <FILE>");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  git-browser .                # Serve the current repository");
        eprintln!("  git-browser ~/src -o         # Serve every repository in ~/src");
        std::process::exit(1);
    }

    let config = load_config(&cli).unwrap_or_else(|e| exit_with("Failed to load configuration", e));

    // RUST_LOG wins; otherwise quiet unless debug is set in the config.
    let default_filter = if config.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let source = match &cli.path {
        Some(path) => RepositorySource::from_path(path),
        None => RepositorySource::from_config(config.repositories.as_ref()),
    };
    let registry = source
        .and_then(RepositoryRegistry::from_source)
        .unwrap_or_else(|e| exit_with("Failed to open repositories", e));

    if registry.is_empty() {
        eprintln!("  Warning: no repositories found");
    }

    let names: Vec<String> = registry.list().map(|e| e.name.clone()).collect();
    let facade = Arc::new(QueryFacade::new(registry));
    let app = git_browser::app(facade);

    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.bind_address, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://{}", addr);
    println!();
    println!("  Git Browser");
    println!();
    println!("  Repositories: {}", names.join(", "));
    println!("  Server:       {}/api/v1/repositories", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if cli.open {
        if let Err(e) = open::that(format!("{}/api/v1/repositories", url)) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
