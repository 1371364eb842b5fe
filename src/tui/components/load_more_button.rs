//! The load-more control drawn under the list

use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{pagination::LoadMore, tui::ui::{centered_columns, Styles}};

const BUTTON_WIDTH: u16 = 24;

/// Draw `control` centered in `area`. Disabled controls are greyed out.
pub fn render_load_more(f: &mut Frame, area: Rect, control: LoadMore) {
    let (text_style, border_style) = if control.enabled {
        (Styles::selected(), Styles::active_border())
    } else {
        (Styles::inactive(), Styles::inactive_border())
    };

    let button = Paragraph::new(control.label)
        .alignment(Alignment::Center)
        .style(text_style)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    f.render_widget(button, centered_columns(BUTTON_WIDTH, area));
}
