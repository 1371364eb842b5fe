//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::components::{render_load_more, ApplicationList, ApplicationListConfig};
use super::events::{map_key, AppEvent};
use super::ui::{centered_rect, Styles};
use crate::backend::PageSource;
use crate::config::Config;
use crate::models::Application;
use crate::pagination::{spawn_fetch, ListPhase, ListView, PageCompletion, PageRequest, PaginatedList};

const TICK_RATE: Duration = Duration::from_millis(100);

pub type ApplicationSource = dyn PageSource<Item = Application>;

/// Main TUI application state
pub struct App {
    /// Application configuration
    pub config: Config,
    /// Pagination state for the accumulated applications
    pub list: PaginatedList<Application>,
    /// Row selection
    pub applications: ApplicationList,

    source: Arc<ApplicationSource>,
    completions_tx: mpsc::UnboundedSender<PageCompletion<Application>>,
    completions_rx: mpsc::UnboundedReceiver<PageCompletion<Application>>,
    fetch_task: Option<JoinHandle<()>>,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config, source: Arc<ApplicationSource>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            list: PaginatedList::new(config.page_size),
            config,
            applications: ApplicationList::new(ApplicationListConfig::default()),

            source,
            completions_tx,
            completions_rx,
            fetch_task: None,

            should_quit: false,
            show_help_popup: false,
            status_message: None,
        }
    }

    /// Initialize the list and fetch page 1 in the background
    pub fn start(&mut self) {
        let request = self.list.initialize();
        self.dispatch(request);
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        loop {
            self.poll_completions();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(app_event) = map_key(key) {
                        self.handle_event(app_event);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }

        Ok(())
    }

    /// Apply every completion that has already arrived. Returns how many.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the in-flight page, if any, and apply it
    pub async fn wait_for_page(&mut self) -> bool {
        if !self.list.is_loading() {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    fn apply_completion(&mut self, completion: PageCompletion<Application>) {
        self.list.complete(completion.request, completion.outcome);
        self.fetch_task = None;
        self.applications.sync(self.list.items().len());
        self.status_message = None;
    }

    fn dispatch(&mut self, request: Option<PageRequest>) {
        if let Some(request) = request {
            info!("Fetching applications page {}", request.page);
            self.fetch_task = Some(spawn_fetch(
                self.source.clone(),
                request,
                self.completions_tx.clone(),
            ));
        }
    }

    /// Handle an application event
    pub fn handle_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => {
                self.should_quit = true;
                return;
            }
            AppEvent::ToggleHelp => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            AppEvent::Back => {
                if self.show_help_popup {
                    self.show_help_popup = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        if self.show_help_popup {
            return;
        }

        match app_event {
            AppEvent::LoadMore => {
                let request = self.list.request_next_page();
                if request.is_none() {
                    debug!("Load more ignored in phase {:?}", self.list.phase());
                }
                self.dispatch(request);
            }
            AppEvent::Reload => {
                if self.list.is_loading() {
                    self.status_message = Some("Still loading, try again shortly".to_string());
                } else {
                    self.applications.reset();
                    self.status_message = Some("Reloading applications".to_string());
                    let request = self.list.initialize();
                    self.dispatch(request);
                }
            }
            AppEvent::SelectNext => self.applications.next(self.list.items().len()),
            AppEvent::SelectPrevious => self.applications.previous(self.list.items().len()),
            AppEvent::Quit | AppEvent::Back | AppEvent::ToggleHelp => {}
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_content(f, chunks[0]);
        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_content(&mut self, f: &mut Frame, area: Rect) {
        match self.list.view() {
            ListView::Error(message) => {
                let error = Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Styles::error())
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL).border_style(Styles::inactive_border()));
                f.render_widget(error, area);
            }
            ListView::Items { items, load_more } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                self.applications.render(f, chunks[0], items);
                if let Some(control) = load_more {
                    render_load_more(f, chunks[1], control);
                }
            }
        }
    }

    /// Draw status bar with the pagination phase and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let phase = match self.list.phase() {
            ListPhase::Idle => "Ready".to_string(),
            ListPhase::Loading => format!("Fetching page {}", self.list.current_page()),
            ListPhase::Loaded => format!("Page {}", self.list.current_page()),
            ListPhase::Exhausted => "All applications loaded".to_string(),
            ListPhase::Errored => "Fetch failed".to_string(),
        };

        let shown = self.list.items().len();
        let position = match self.applications.selected_index() {
            Some(i) if i < shown => format!("row {}/{}", i + 1, shown),
            _ => format!("{} shown", shown),
        };

        let status_text = match &self.status_message {
            Some(msg) => format!("Status: {}", msg),
            None => format!(
                "{} | {} | Enter: more | R: reload | Q: quit | F1/?: help",
                phase, position
            ),
        };

        let style = match self.list.phase() {
            ListPhase::Errored => Styles::error(),
            ListPhase::Exhausted => Styles::success(),
            _ => Styles::info(),
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(Styles::inactive_border()));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 50, area);

        f.render_widget(Clear, popup_area);

        let help_content = "Shortcuts:\n\
            Enter / Space / m - Load the next page\n\
            ↑/k, ↓/j - Move selection\n\
            r - Reload from the first page\n\
            F1 / ? - Toggle this help\n\
            Esc - Close help / quit\n\
            q - Quit";

        let help_popup = Paragraph::new(help_content)
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .style(Styles::default());

        f.render_widget(help_popup, popup_area);
    }
}
