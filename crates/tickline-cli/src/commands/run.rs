use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{info, warn};

use tickline_core::{AppConfig, TickAnimator};
use tickline_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{StatusBarWidget, TickerWidget},
    App,
};

const DEMO_LINES: [&str; 3] = [
    "Breaking: a headline long enough that it has to scroll past the edge of the terminal to be read in full",
    "Nearly fits, so it bounces",
    "Short line",
];

/// Lines from arguments, a file, or the demo set
pub fn collect_lines(text: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    let mut lines = text;
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        lines.extend(
            content
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    Ok(lines)
}

pub async fn run(config: Arc<AppConfig>, lines: Vec<String>) -> Result<()> {
    let lines = if lines.is_empty() {
        DEMO_LINES.iter().map(|l| l.to_string()).collect()
    } else {
        lines
    };
    info!(lines = lines.len(), "Starting interactive ticker");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("tickline"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let animator = Arc::new(TickAnimator::new(config.ui.animation_fps));
    let mut app = App::new(config.clone(), lines, animator);
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    app.activate();
    let result = run_loop(&mut terminal, &mut app, &event_handler).await;
    app.deactivate();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Interactive ticker closed");
    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        app.drain_events();

        // Draw UI; the ticker widget records the widths it drew
        terminal.draw(|frame| {
            let size = frame.area();
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(0),
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(size);

            TickerWidget::render(frame, main_layout[1], app);
            StatusBarWidget::render(frame, main_layout[3], app);
        })?;

        app.sync_layout().await;

        // Poll at frame rate while an animation is running
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => handle_action(app, handle_key_event(key)),
                AppEvent::Scroll(delta) => {
                    app.scroll_by(delta);
                }
                AppEvent::Resize(_, _) => {
                    // The next draw records the new container width
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollBy(delta) => {
            app.scroll_by(delta);
        }
        Action::ScrollHome => {
            app.scroll_to(0);
        }
        Action::ScrollEnd => {
            let end = -app.max_manual_scroll();
            app.scroll_to(end);
        }
        Action::TogglePause => app.toggle_pause(),
        Action::NextLine => app.next_line(),
        Action::PrevLine => app.prev_line(),
        Action::ReloadConfig => match AppConfig::load() {
            Ok(config) => {
                info!(path = %AppConfig::config_path().display(), "Reloaded configuration");
                app.apply_config(config);
            }
            Err(e) => {
                warn!(error = %e, "Failed to reload configuration");
                app.status_message = Some(format!("Reload failed: {}", e));
            }
        },
        Action::None => {}
    }
}
