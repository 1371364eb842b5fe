use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use loanapps::{
    backend::HttpPageSource,
    cli::{render_table, Cli, Commands},
    config::Config,
    models::Application,
    pagination::{ListPhase, ListView, Pager},
    tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "loanapps=info");
    }

    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let command = cli.resolved_command();
    init_logging(&config, command != Commands::Tui);

    match command {
        Commands::Tui => {
            info!("Launching TUI interface");

            match tui::run_tui(config).await {
                Ok(_) => info!("TUI exited successfully"),
                Err(e) => {
                    error!("TUI failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::List { .. } => {
            let max_pages = command.max_pages();
            info!("Listing applications from {} (pages: {:?})", config.api_url, max_pages);

            if !list_applications(&config, max_pages).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Log to the configured file, and to stderr unless the TUI owns the screen
fn init_logging(config: &Config, to_stderr: bool) {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let directory = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "loanapps.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();
}

/// Print the requested pages. Returns false when a fetch failed.
async fn list_applications(config: &Config, max_pages: Option<u32>) -> Result<bool> {
    let source: HttpPageSource<Application> = HttpPageSource::new(config)?;
    let mut pager = Pager::new(Arc::new(source), config.page_size);

    let phase = pager.load_until(max_pages).await;

    match pager.list().view() {
        ListView::Error(message) => {
            eprintln!("{}", message);
            Ok(false)
        }
        ListView::Items { items, .. } => {
            if items.is_empty() {
                println!("No applications found");
            } else {
                print!("{}", render_table(items));
                println!();
                println!("Total: {} applications", items.len());
            }
            if phase == ListPhase::Exhausted {
                println!("No more applications");
            }
            Ok(true)
        }
    }
}
