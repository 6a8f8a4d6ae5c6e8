//! Measurable regions backed by the last rendered frame
//!
//! A terminal has no layout engine to query, so the widths the controller
//! measures are the ones the widget recorded while drawing. Until the first
//! frame is drawn a region reports itself as unavailable.

use std::sync::{Arc, Mutex};

use tickline_core::{Error, MeasurableRegion, Result};
use unicode_width::UnicodeWidthStr;

/// Pixels per terminal column used to translate between cells and offsets
pub const CELL_WIDTH_PX: f64 = 8.0;

/// Convert a column count to the pixel unit the controller works in
#[inline]
pub fn cols_to_px(cols: usize) -> f64 {
    cols as f64 * CELL_WIDTH_PX
}

/// Convert a pixel offset to whole columns, rounding to the nearest cell
#[inline]
pub fn px_to_cols(px: f64) -> i64 {
    (px / CELL_WIDTH_PX).round() as i64
}

/// Display width of a single line in terminal columns
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// A region whose width is whatever was last drawn into it
pub struct RenderedRegion {
    name: &'static str,
    cols: Mutex<Option<usize>>,
}

impl RenderedRegion {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            cols: Mutex::new(None),
        })
    }

    /// Store the width drawn this frame; returns true if it changed
    pub fn record(&self, cols: usize) -> bool {
        let mut current = self.cols.lock().unwrap_or_else(|p| p.into_inner());
        let changed = *current != Some(cols);
        *current = Some(cols);
        changed
    }

    /// Forget the recorded width, e.g. after the text was replaced
    pub fn clear(&self) {
        *self.cols.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    pub fn cols(&self) -> Option<usize> {
        *self.cols.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait::async_trait]
impl MeasurableRegion for RenderedRegion {
    fn name(&self) -> &str {
        self.name
    }

    async fn measure_width(&self) -> Result<f64> {
        self.cols()
            .map(cols_to_px)
            .ok_or_else(|| Error::measurement(self.name, "not rendered yet"))
    }
}
