//! Terminal user interface for browsing applications
//!
//! The list is fetched in the background while the screen keeps redrawing,
//! so the load-more control can show its loading state.

pub mod app;
pub mod components;
pub mod events;
pub mod ui;

pub use app::App;
pub use events::AppEvent;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing::info;

use crate::backend::HttpPageSource;
use crate::config::Config;
use crate::models::Application;

pub async fn run_tui(config: Config) -> Result<()> {
    info!("Starting TUI against {}", config.api_url);

    let source: HttpPageSource<Application> = HttpPageSource::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Arc::new(source));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
