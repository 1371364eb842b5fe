//! Application list component: one formatted row per application

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    format::{application_cells, fit_width, ROW_LABELS},
    models::Application,
    tui::ui::Styles,
};

/// Configuration for application list display
#[derive(Debug, Clone)]
pub struct ApplicationListConfig {
    pub title: String,
    /// Column widths in row order, see `ROW_LABELS`
    pub column_widths: [usize; 6],
}

impl Default for ApplicationListConfig {
    fn default() -> Self {
        Self {
            title: "Applications".to_string(),
            column_widths: [20, 22, 30, 12, 16, 12],
        }
    }
}

/// Selection state over the accumulated applications. The items themselves
/// belong to the pagination state and are passed in on every call.
pub struct ApplicationList {
    pub state: ListState,
    pub config: ApplicationListConfig,
}

impl ApplicationList {
    pub fn new(config: ApplicationListConfig) -> Self {
        Self {
            state: ListState::default(),
            config,
        }
    }

    /// Select the first row once rows exist; keep an existing selection
    pub fn sync(&mut self, len: usize) {
        match self.state.selected() {
            None if len > 0 => self.state.select(Some(0)),
            Some(i) if i >= len => self.state.select(len.checked_sub(1)),
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.state = ListState::default();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Navigate to next item
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Navigate to previous item
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn header_line(&self) -> Line<'static> {
        let spans: Vec<Span> = ROW_LABELS
            .iter()
            .zip(self.config.column_widths)
            .map(|(label, width)| Span::styled(format!("{} ", fit_width(label, width)), Styles::title()))
            .collect();
        Line::from(spans)
    }

    fn row_line(&self, app: &Application) -> Line<'static> {
        let spans: Vec<Span> = application_cells(app)
            .into_iter()
            .zip(self.config.column_widths)
            .map(|(cell, width)| {
                let style = if cell.label == "Email" {
                    Styles::link()
                } else {
                    Styles::default()
                };
                Span::styled(format!("{} ", fit_width(&cell.value, width)), style)
            })
            .collect();
        Line::from(spans)
    }

    /// Render the rows for `applications`
    pub fn render(&mut self, f: &mut Frame, area: Rect, applications: &[Application]) {
        self.sync(applications.len());

        let items: Vec<ListItem> = applications
            .iter()
            .map(|app| ListItem::new(self.row_line(app)))
            .collect();

        let title = format!("{} ({})", self.config.title, applications.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        f.render_widget(Paragraph::new(self.header_line()), chunks[0]);

        let list = List::new(items).highlight_style(Styles::selected());

        f.render_stateful_widget(list, chunks[1], &mut self.state);
    }
}
