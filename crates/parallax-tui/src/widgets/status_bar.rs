use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().bg(theme.color(theme.muted.with_alpha(0.25)));

        let mode_str = if app.config.motion.reduced_motion {
            "REDUCED"
        } else {
            "SMOOTH"
        };

        let section = app.current_section();
        let section_name = app
            .story
            .sections
            .get(section)
            .map(|s| s.id.as_str())
            .unwrap_or("-");

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} {}/{} | {:>3.0}% | v {:+.2}",
                mode_str,
                section_name,
                section + 1,
                app.story.len(),
                app.page_progress() * 100.0,
                app.scroll_velocity(),
            )
        };

        let help_hint = " q:quit j/k:scroll n/p:section gg/G:ends m:motion ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(theme.fg())),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.muted())),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
