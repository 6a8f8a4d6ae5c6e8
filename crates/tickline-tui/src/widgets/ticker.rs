use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use tickline_core::AnimationMode;

use crate::app::App;

/// One terminal column of laid-out text
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Glyph(char, usize),
    /// Right half of a wide glyph
    Continuation,
}

fn layout_columns(text: &str) -> Vec<Column> {
    let mut columns = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if width == 0 {
            continue;
        }
        columns.push(Column::Glyph(ch, width));
        for _ in 1..width {
            columns.push(Column::Continuation);
        }
    }
    columns
}

/// Compose one visible row of `width` columns
///
/// The primary copy starts at `offset` (negative moves it left). With a
/// `gap`, a second copy trails the primary one by that many columns, which is
/// how the scroll loop looks seamless. Wide glyphs cut by either edge are
/// shown as blanks.
pub fn compose_row(text: &str, offset: i64, gap: Option<usize>, width: usize) -> String {
    let columns = layout_columns(text);
    let text_cols = columns.len() as i64;
    let copy_start = gap.map(|gap| text_cols + gap as i64);

    let column_at = |x: i64| -> Option<Column> {
        let pos = x - offset;
        if (0..text_cols).contains(&pos) {
            return Some(columns[pos as usize]);
        }
        let start = copy_start?;
        let pos = pos - start;
        if (0..text_cols).contains(&pos) {
            Some(columns[pos as usize])
        } else {
            None
        }
    };

    let mut row = String::with_capacity(width);
    let mut x = 0;
    while x < width {
        match column_at(x as i64) {
            Some(Column::Glyph(ch, w)) if x + w <= width => {
                row.push(ch);
                x += w;
            }
            _ => {
                row.push(' ');
                x += 1;
            }
        }
    }
    row
}

pub struct TickerWidget;

impl TickerWidget {
    /// Draw the ticker and record the widths the controller measures
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let state = app.ticker.state();
        let border_style = if state.is_user_scrolling {
            Style::default().fg(Color::Yellow)
        } else if state.animating {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(format!(" {} ", app.title()))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        app.record_layout(inner.width as usize);

        let text = app.current_text();
        let row = if app.shows_static_copy() {
            compose_row(text, 0, None, inner.width as usize)
        } else {
            let gap = match app.display_mode() {
                AnimationMode::Scroll => Some(app.spacer_cols()),
                _ => None,
            };
            compose_row(text, app.display_offset_cols(), gap, inner.width as usize)
        };

        let paragraph = Paragraph::new(row).style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(paragraph, Rect { height: inner.height.min(1), ..inner });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_row_truncates() {
        assert_eq!(compose_row("hello world", 0, None, 5), "hello");
        assert_eq!(compose_row("hi", 0, None, 5), "hi   ");
    }

    #[test]
    fn test_offset_moves_text_left() {
        assert_eq!(compose_row("abcdef", -2, None, 4), "cdef");
        assert_eq!(compose_row("abcdef", -4, None, 4), "ef  ");
    }

    #[test]
    fn test_positive_offset_pads_left() {
        assert_eq!(compose_row("abc", 2, None, 5), "  abc");
    }

    #[test]
    fn test_trailing_copy_follows_gap() {
        assert_eq!(compose_row("abc", 0, Some(2), 8), "abc  abc");
        // one full loop (text + gap) lands the copy where the primary started
        assert_eq!(compose_row("abc", -5, Some(2), 3), "abc");
        assert_eq!(compose_row("abc", -4, Some(2), 4), " abc");
    }

    #[test]
    fn test_wide_glyphs_cut_at_edges() {
        assert_eq!(compose_row("日本", 0, None, 3), "日 ");
        assert_eq!(compose_row("日本", -1, None, 3), " 本");
    }
}
