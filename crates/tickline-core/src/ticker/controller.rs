//! L2 Organism Layer: Ticker lifecycle controller
//!
//! Owns everything one ticker needs: the active config snapshot, the latest
//! [`Metrics`], the [`TickerState`] flags, the [`OffsetSignal`], the timer
//! slots and a liveness flag. Every timer and animation callback re-checks
//! liveness before it mutates anything, so work that outlives
//! [`TickerController::deactivate`] is a no-op.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::animator::TimingAnimator;
use super::config::{TickerConfig, TickerConfigExt};
use super::metrics::{MeasurableRegion, Metrics, MetricsProbe};
use super::mode::{self, AnimationMode};
use super::signal::OffsetSignal;
use super::timers::TimerRegistry;

/// Flags driven by measurements and user interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickerState {
    /// An automatic animation cycle is active
    pub animating: bool,
    /// The last measurement found no meaningful overflow
    pub content_fits: bool,
    /// The last measurement favours bouncing over scrolling
    pub should_bounce: bool,
    /// The user is scrolling manually; automatic animation is suspended
    pub is_user_scrolling: bool,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum TickerEvent {
    /// Widths were measured and the mode re-evaluated
    Measured { metrics: Metrics, mode: AnimationMode },
    /// The host could not measure this cycle; state was left untouched
    MeasurementFailed { reason: String },
    /// A measured start found overflowing content and began animating
    AnimationStarted { mode: AnimationMode },
    /// One scroll pass or bounce round trip ran to completion
    CycleCompleted { mode: AnimationMode },
    /// First manual scroll of an interaction
    UserScrollStarted,
    /// The quiet period after manual scrolling elapsed
    AutoResumed,
    /// Automatic animation was stopped
    Stopped,
}

/// Mutable per-instance data, guarded as one unit
#[derive(Debug)]
pub(super) struct Record {
    pub alive: bool,
    pub config: Arc<TickerConfig>,
    pub next_config: Option<TickerConfig>,
    pub metrics: Option<Metrics>,
    pub state: TickerState,
    pub mode: AnimationMode,
    pub segments: usize,
    events: Option<mpsc::UnboundedSender<TickerEvent>>,
}

impl Record {
    fn new(config: TickerConfig) -> Self {
        Self {
            alive: false,
            config: Arc::new(config),
            next_config: None,
            metrics: None,
            state: TickerState::default(),
            mode: AnimationMode::None,
            segments: 1,
            events: None,
        }
    }

    /// Forget the last measurement
    fn invalidate(&mut self) {
        self.metrics = None;
        self.state.content_fits = false;
        self.state.should_bounce = false;
        self.mode = AnimationMode::None;
    }

    fn apply_metrics(&mut self, metrics: Metrics) {
        let distance = metrics.distance();
        self.metrics = Some(metrics);
        self.state.content_fits = mode::content_fits(distance);
        self.state.should_bounce = mode::should_bounce(distance, metrics.container_width);
        self.mode = mode::select_with(
            distance,
            metrics.container_width,
            self.config.bounce,
            self.config.animation_type,
        );
    }

    /// Automatic animation may proceed
    pub fn may_animate(&self) -> bool {
        self.alive && self.state.animating && !self.state.is_user_scrolling
    }

    pub fn emit(&self, event: TickerEvent) {
        if let Some(ref tx) = self.events {
            if tx.send(event).is_err() {
                warn!("Failed to send ticker event: receiver dropped");
            }
        }
    }
}

/// State shared between the controller handle and its scheduled callbacks
pub(super) struct Shared {
    record: Mutex<Record>,
    pub timers: TimerRegistry,
    pub signal: OffsetSignal,
    pub probe: MetricsProbe,
    pub animator: Arc<dyn TimingAnimator>,
}

impl Shared {
    pub fn record(&self) -> MutexGuard<'_, Record> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_alive(&self) -> bool {
        self.record().alive
    }

    pub fn emit(&self, event: TickerEvent) {
        self.record().emit(event);
    }

    /// Measure both regions and re-evaluate the mode
    ///
    /// Failures are logged and leave metrics and state untouched; the next
    /// lifecycle trigger measures again.
    pub async fn measure(&self) -> Option<Metrics> {
        if !self.is_alive() {
            return None;
        }

        match self.probe.probe().await {
            Ok(metrics) => {
                let mut record = self.record();
                if !record.alive {
                    return None;
                }
                record.apply_metrics(metrics);
                debug!(
                    container = metrics.container_width,
                    content = metrics.content_width,
                    distance = metrics.distance(),
                    mode = record.mode.as_str(),
                    "Measured ticker"
                );
                let mode = record.mode;
                record.emit(TickerEvent::Measured { metrics, mode });
                Some(metrics)
            }
            Err(e) => {
                warn!(error = %e, "Could not calculate ticker metrics");
                let record = self.record();
                if record.alive {
                    record.emit(TickerEvent::MeasurementFailed {
                        reason: e.to_string(),
                    });
                }
                None
            }
        }
    }

    fn activate(self: &Arc<Self>) {
        // Drop anything left over from a previous cycle
        self.timers.clear_all();

        let (auto_start, delay) = {
            let mut record = self.record();
            if let Some(next) = record.next_config.take() {
                record.config = Arc::new(next);
            }
            record.alive = true;
            record.invalidate();
            record.state.animating = false;
            record.state.is_user_scrolling = false;
            (record.config.auto_start, record.config.start_delay())
        };
        self.signal.set(0.0);
        debug!(auto_start, "Ticker activated");

        if auto_start {
            self.start(delay);
        }
    }

    fn deactivate(&self) {
        self.record().alive = false;
        self.timers.clear_all();
        debug!("Ticker deactivated");
    }
}

/// Handle to one ticker instance
///
/// Cheap to clone; all clones drive the same ticker. Must be used from within
/// a tokio runtime because timers are spawned as tasks.
#[derive(Clone)]
pub struct TickerController {
    pub(super) shared: Arc<Shared>,
}

impl std::fmt::Debug for TickerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let record = self.shared.record();
        f.debug_struct("TickerController")
            .field("alive", &record.alive)
            .field("state", &record.state)
            .field("mode", &record.mode)
            .field("metrics", &record.metrics)
            .field("probe", &self.shared.probe)
            .finish()
    }
}

impl TickerController {
    pub fn new(
        config: TickerConfig,
        container: Arc<dyn MeasurableRegion>,
        content: Arc<dyn MeasurableRegion>,
        animator: Arc<dyn TimingAnimator>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                record: Mutex::new(Record::new(config)),
                timers: TimerRegistry::new(),
                signal: OffsetSignal::new(),
                probe: MetricsProbe::new(container, content),
                animator,
            }),
        }
    }

    /// Set the event sender for presentation notifications
    pub fn with_event_sender(self, tx: mpsc::UnboundedSender<TickerEvent>) -> Self {
        self.shared.record().events = Some(tx);
        self
    }

    /// Mark alive, invalidate metrics and start if `auto_start` is set
    ///
    /// A config passed to [`set_config`](Self::set_config) takes effect here.
    pub fn activate(&self) {
        self.shared.activate();
    }

    /// Mark not alive and clear every timer slot
    pub fn deactivate(&self) {
        self.shared.deactivate();
    }

    /// The host reports that the content or container changed size
    ///
    /// Re-measures and re-evaluates the mode; a running cycle picks up the new
    /// metrics on its next pass.
    pub async fn content_size_changed(&self) {
        self.shared.measure().await;
    }

    /// Measure now, returning the metrics if the host could provide them
    pub async fn measure(&self) -> Option<Metrics> {
        self.shared.measure().await
    }

    /// Begin an automatic cycle: settle, measure, select, animate
    ///
    /// `delay` precedes the first animation pass. No-op while already animating.
    pub fn start(&self, delay: Duration) {
        self.shared.start(delay);
    }

    /// Stop automatic animation and reset the offset
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// The user moved the scroll position manually
    pub fn on_user_scroll(&self) {
        self.shared.on_user_scroll();
    }

    /// Coarse content length used by the per-segment duration policy
    pub fn set_segments(&self, segments: usize) {
        self.shared.record().segments = segments.max(1);
    }

    /// Config for the next activation
    pub fn set_config(&self, config: TickerConfig) {
        self.shared.record().next_config = Some(config);
    }

    /// Config of the current activation
    pub fn config(&self) -> Arc<TickerConfig> {
        Arc::clone(&self.shared.record().config)
    }

    pub fn state(&self) -> TickerState {
        self.shared.record().state
    }

    pub fn mode(&self) -> AnimationMode {
        self.shared.record().mode
    }

    pub fn metrics(&self) -> Option<Metrics> {
        self.shared.record().metrics
    }

    pub fn is_alive(&self) -> bool {
        self.shared.is_alive()
    }

    /// Current horizontal translation
    pub fn offset(&self) -> f64 {
        self.shared.signal.get()
    }

    /// Receiver notified on every offset change
    pub fn subscribe_offset(&self) -> watch::Receiver<f64> {
        self.shared.signal.subscribe()
    }

    /// Whether the host should let the user scroll the content manually
    pub fn interactive_scroll_enabled(&self) -> bool {
        let record = self.shared.record();
        record.config.scroll && record.metrics.is_some() && !record.state.content_fits
    }
}
