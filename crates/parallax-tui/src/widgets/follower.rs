use ratatui::{layout::Rect, style::Style, Frame};

use crate::app::App;

const GLYPH: &str = "●";

/// Glyph trailing the mouse pointer on a spring
pub struct FollowerWidget;

impl FollowerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let Some((x, y)) = app.follower() else {
            return;
        };
        let Some((column, row)) = cell_at(x, y, area) else {
            return;
        };
        frame.buffer_mut().set_string(
            column,
            row,
            GLYPH,
            Style::default().fg(app.theme.accent()),
        );
    }
}

/// Terminal cell for a position relative to `area`, if inside it
fn cell_at(x: f64, y: f64, area: Rect) -> Option<(u16, u16)> {
    let (x, y) = (x.round(), y.round());
    if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
        return None;
    }
    if x >= area.width as f64 || y >= area.height as f64 {
        return None;
    }
    Some((area.x + x as u16, area.y + y as u16))
}
