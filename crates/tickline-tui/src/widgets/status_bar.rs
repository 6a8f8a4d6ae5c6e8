use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let state = app.ticker.state();
        let activity = if state.is_user_scrolling {
            "MANUAL"
        } else if state.animating {
            "RUNNING"
        } else {
            "IDLE"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let metrics = match app.ticker.metrics() {
                Some(m) => format!("{:.0}/{:.0}px", m.content_width, m.container_width),
                None => "unmeasured".to_string(),
            };
            format!(
                " {} | {} | {} | offset {:.1}",
                activity,
                app.display_mode().as_str(),
                metrics,
                app.ticker.offset()
            )
        };

        let help_hint = " q:quit h/l:scroll space:pause n:next r:reload ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let bar = Style::default().bg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(Color::White)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(Color::Gray)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
