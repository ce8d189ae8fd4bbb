use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use parallax_core::AppConfig;
use parallax_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event, Action},
    scroll::ScrollConfigExt,
    widgets, App, Story,
};

/// Longest frame time fed to the animation, in seconds
const MAX_FRAME_SECS: f64 = 0.1;

pub fn run(config: AppConfig, story: Option<&Path>) -> Result<()> {
    let story = match story {
        Some(path) => Story::load(path)?,
        None => Story::builtin(),
    };
    let event_handler = EventHandler::new(
        Duration::from_millis(config.ui.tick_rate_ms),
        config.ui.scroll.animation_tick_duration(),
    );
    let mut app = App::new(config, story)?;
    tracing::info!(title = %app.story.title, sections = app.story.len(), "Starting story");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Parallax"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let mut last_frame = Instant::now();
    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64().min(MAX_FRAME_SECS);
        last_frame = now;
        app.tick(dt);

        terminal.draw(|frame| widgets::render(frame, app))?;

        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    if action != Action::None {
                        app.clear_status();
                    }
                    app.apply(action);
                }
                AppEvent::Mouse(mouse) => app.apply(handle_mouse_event(mouse)),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("Story closed");
    Ok(())
}
