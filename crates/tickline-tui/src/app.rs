use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use tickline_core::ticker::TickerConfigExt;
use tickline_core::{AnimationMode, AppConfig, TickerController, TickerEvent, TimingAnimator};

use crate::region::{self, RenderedRegion};

/// Application state for the interactive ticker
pub struct App {
    pub config: Arc<AppConfig>,
    pub ticker: TickerController,
    /// Lines the user can cycle through
    pub lines: Vec<String>,
    pub current: usize,
    pub container: Arc<RenderedRegion>,
    pub content: Arc<RenderedRegion>,
    events: mpsc::UnboundedReceiver<TickerEvent>,
    /// Manual scroll position in columns, zero or negative
    pub manual_offset: i64,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// A drawn width changed since the last measurement
    layout_dirty: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, lines: Vec<String>, animator: Arc<dyn TimingAnimator>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };

        let container = RenderedRegion::new("container");
        let content = RenderedRegion::new("content");
        let (tx, events) = mpsc::unbounded_channel();
        let ticker = TickerController::new(
            config.ticker.clone(),
            container.clone(),
            content.clone(),
            animator,
        )
        .with_event_sender(tx);
        ticker.set_segments(lines[0].chars().count());

        Self {
            config,
            ticker,
            lines,
            current: 0,
            container,
            content,
            events,
            manual_offset: 0,
            status_message: None,
            should_quit: false,
            layout_dirty: false,
        }
    }

    pub fn activate(&mut self) {
        self.manual_offset = 0;
        self.ticker.activate();
    }

    pub fn deactivate(&mut self) {
        self.ticker.deactivate();
    }

    pub fn current_text(&self) -> &str {
        &self.lines[self.current]
    }

    pub fn title(&self) -> String {
        format!("tickline {}/{}", self.current + 1, self.lines.len())
    }

    /// Record the widths drawn this frame
    pub fn record_layout(&mut self, container_cols: usize) {
        let content_cols = region::display_width(self.current_text());
        let changed = self.container.record(container_cols) | self.content.record(content_cols);
        if changed {
            self.layout_dirty = true;
        }
    }

    /// Re-measure after a drawn width changed
    pub async fn sync_layout(&mut self) {
        if self.layout_dirty && self.ticker.is_alive() {
            self.layout_dirty = false;
            self.ticker.content_size_changed().await;
        }
    }

    /// Apply pending controller notifications
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Ticker event");
            match event {
                TickerEvent::AutoResumed | TickerEvent::Stopped => self.manual_offset = 0,
                TickerEvent::AnimationStarted { .. } => self.status_message = None,
                TickerEvent::MeasurementFailed { reason } => {
                    self.status_message = Some(format!("Measurement failed: {}", reason));
                }
                _ => {}
            }
        }
    }

    pub fn display_mode(&self) -> AnimationMode {
        self.ticker.mode()
    }

    /// Render the text untranslated, without the trailing copy
    pub fn shows_static_copy(&self) -> bool {
        let state = self.ticker.state();
        state.content_fits || (!state.animating && !state.is_user_scrolling)
    }

    /// Offset to draw at, in columns
    pub fn display_offset_cols(&self) -> i64 {
        if self.ticker.state().is_user_scrolling {
            self.manual_offset
        } else {
            region::px_to_cols(self.ticker.offset())
        }
    }

    pub fn spacer_cols(&self) -> usize {
        region::px_to_cols(self.ticker.config().repeat_spacer).max(0) as usize
    }

    /// How far the text can be scrolled manually, in columns
    pub fn max_manual_scroll(&self) -> i64 {
        match (self.content.cols(), self.container.cols()) {
            (Some(content), Some(container)) => content.saturating_sub(container) as i64,
            _ => 0,
        }
    }

    /// Scroll manually by `delta` columns; positive reveals more on the right
    ///
    /// Returns false when interactive scrolling is not available.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let base = if self.ticker.state().is_user_scrolling {
            self.manual_offset
        } else {
            0
        };
        self.scroll_to(base.saturating_sub(delta))
    }

    pub fn scroll_to(&mut self, offset: i64) -> bool {
        if !self.ticker.interactive_scroll_enabled() {
            return false;
        }
        self.manual_offset = offset.clamp(-self.max_manual_scroll(), 0);
        self.ticker.on_user_scroll();
        true
    }

    /// Pause while running or manually scrolled; otherwise start
    pub fn toggle_pause(&mut self) {
        let state = self.ticker.state();
        if state.animating || state.is_user_scrolling {
            self.ticker.stop();
            self.status_message = Some("Paused".to_string());
        } else {
            self.status_message = None;
            self.ticker.start(self.ticker.config().start_delay());
        }
    }

    /// Switch to another line and restart the ticker for it
    pub fn select_line(&mut self, index: usize) {
        if index >= self.lines.len() {
            return;
        }
        self.current = index;
        self.content.clear();
        self.layout_dirty = false;
        self.ticker.set_segments(self.lines[index].chars().count());
        self.restart();
    }

    pub fn next_line(&mut self) {
        self.select_line((self.current + 1) % self.lines.len());
    }

    pub fn prev_line(&mut self) {
        let len = self.lines.len();
        self.select_line((self.current + len - 1) % len);
    }

    /// Use a new configuration from the next activation on, and reactivate
    pub fn apply_config(&mut self, config: AppConfig) {
        self.ticker.set_config(config.ticker.clone());
        self.config = Arc::new(config);
        self.restart();
        self.status_message = Some("Config reloaded".to_string());
    }

    pub fn needs_fast_update(&self) -> bool {
        self.ticker.state().animating
    }

    fn restart(&mut self) {
        self.deactivate();
        self.activate();
    }
}
