mod follower;
mod glow;
mod progress_bar;
mod status_bar;
mod story_view;

pub use follower::FollowerWidget;
pub use glow::GlowWidget;
pub use progress_bar::ProgressBarWidget;
pub use status_bar::StatusBarWidget;
pub use story_view::StoryViewWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, CONTENT_TOP};

/// Draw a whole frame: progress bar, background, story, follower, status bar
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CONTENT_TOP),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    ProgressBarWidget::render(frame, chunks[0], app);
    GlowWidget::render(frame, chunks[1], app);
    StoryViewWidget::render(frame, chunks[1], app);
    FollowerWidget::render(frame, chunks[1], app);
    StatusBarWidget::render(frame, chunks[2], app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::input::Action;
    use crate::story::Story;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_first_section() {
        let mut app = App::new(AppConfig::default(), Story::builtin()).unwrap();
        app.resize(80, 24);
        // Let the lines finish revealing
        for _ in 0..120 {
            app.tick(1.0 / 60.0);
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let screen: Vec<String> = (0..24).map(|y| row_text(&terminal, y)).collect();
        assert!(screen[1..23]
            .iter()
            .any(|row| row.contains("Turning visual ideas into fast interfaces")));
        assert!(!screen.iter().any(|row| row.contains("Most interfaces feel static")));
        assert!(screen[23].contains("hero 1/7"));
        assert!(screen[23].contains("q:quit"));
    }

    #[test]
    fn test_unrevealed_lines_are_not_drawn() {
        let mut app = App::new(AppConfig::default(), Story::builtin()).unwrap();
        app.resize(80, 24);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let screen: Vec<String> = (1..23).map(|y| row_text(&terminal, y)).collect();
        assert!(screen.iter().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_glow_tints_background() {
        let app = App::new(AppConfig::default(), Story::builtin()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        // Center of the first glow, below the progress bar row
        let (x, y) = (16, 5 + CONTENT_TOP);
        assert_ne!(buffer[(x, y)].bg, app.theme.bg());
        assert_eq!(buffer[(x, y)].symbol(), " ");
    }

    #[test]
    fn test_render_follower() {
        let mut config = AppConfig::default();
        config.motion.reduced_motion = true;
        let mut app = App::new(config, Story::builtin()).unwrap();
        app.resize(80, 24);
        app.apply(Action::PointerMoved(2, 22));
        app.tick(1.0 / 60.0);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert_eq!(terminal.backend().buffer()[(2, 22)].symbol(), "●");
    }
}
