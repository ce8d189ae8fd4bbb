use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct ProgressBarWidget;

impl ProgressBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let filled = filled_width(app.page_progress(), area.width);
        let rest = area.width.saturating_sub(filled);

        let line = Line::from(vec![
            Span::styled(
                "━".repeat(filled as usize),
                Style::default().fg(app.theme.accent()).bg(app.theme.bg()),
            ),
            Span::styled(
                "─".repeat(rest as usize),
                Style::default().fg(app.theme.muted()).bg(app.theme.bg()),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Cells of the bar covered at `progress`
fn filled_width(progress: f64, width: u16) -> u16 {
    if !progress.is_finite() {
        return 0;
    }
    (progress.clamp(0.0, 1.0) * width as f64).round() as u16
}
