use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::format::{application_cells, fit_width, ROW_LABELS};
use crate::models::Application;

const TABLE_WIDTHS: [usize; 6] = [24, 24, 32, 12, 16, 12];

#[derive(Parser)]
#[command(name = "loanapps")]
#[command(about = "Browse loan applications from a paginated REST API")]
#[command(version)]
pub struct Cli {
    /// Applications endpoint (overrides LOANAPPS_API_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Applications per page, sent as `_limit` (overrides LOANAPPS_PAGE_SIZE)
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Launch the interactive application list (default)
    Tui,

    /// Print applications to stdout and exit
    List {
        /// Number of pages to request
        #[arg(short, long, default_value = "1", conflicts_with = "all")]
        pages: u32,

        /// Keep requesting pages until the backend returns an empty one
        #[arg(long)]
        all: bool,
    },
}

impl Cli {
    /// Apply command line overrides on top of the environment configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.api_url = url.clone();
        }
        if let Some(limit) = self.limit {
            config.page_size = limit;
        }
    }

    pub fn resolved_command(&self) -> Commands {
        match &self.command {
            Some(Commands::List { pages, all }) => Commands::List {
                pages: *pages,
                all: *all,
            },
            Some(Commands::Tui) | None => Commands::Tui,
        }
    }
}

impl Commands {
    /// Page cap for `list`; `None` means follow until exhausted
    pub fn max_pages(&self) -> Option<u32> {
        match self {
            Commands::List { all: true, .. } => None,
            Commands::List { pages, .. } => Some((*pages).max(1)),
            Commands::Tui => None,
        }
    }
}

/// Plain-text table of applications, one row per line
pub fn render_table(applications: &[Application]) -> String {
    let mut out = String::new();

    let header: Vec<String> = ROW_LABELS
        .iter()
        .zip(TABLE_WIDTHS)
        .map(|(label, width)| fit_width(label, width))
        .collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(TABLE_WIDTHS.iter().sum::<usize>() + TABLE_WIDTHS.len() - 1));
    out.push('\n');

    for app in applications {
        let row: Vec<String> = application_cells(app)
            .iter()
            .zip(TABLE_WIDTHS)
            .map(|(cell, width)| fit_width(&cell.value, width))
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }

    out
}
