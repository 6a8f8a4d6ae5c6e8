//! L3 Molecular Layer: Measuring the container against its content
//!
//! The host supplies [`MeasurableRegion`]s; [`MetricsProbe`] queries both
//! concurrently and turns the widths into [`Metrics`].

use std::sync::Arc;

use crate::Result;

use super::mode::{self, AnimationMode};

/// Host capability: report the rendered pixel width of a region
///
/// Implementations return [`crate::Error::MeasurementUnavailable`] when the
/// region has no usable layout yet.
#[async_trait::async_trait]
pub trait MeasurableRegion: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        "region"
    }

    async fn measure_width(&self) -> Result<f64>;
}

/// Measured widths of one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub container_width: f64,
    pub content_width: f64,
}

impl Metrics {
    pub fn new(container_width: f64, content_width: f64) -> Self {
        Self {
            container_width,
            content_width,
        }
    }

    /// Horizontal overflow; negative when the content is narrower
    #[inline]
    pub fn distance(&self) -> f64 {
        self.content_width - self.container_width
    }

    #[inline]
    pub fn content_fits(&self) -> bool {
        mode::content_fits(self.distance())
    }

    #[inline]
    pub fn should_bounce(&self) -> bool {
        mode::should_bounce(self.distance(), self.container_width)
    }

    pub fn select(&self, bounce_enabled: bool) -> AnimationMode {
        mode::select(self.distance(), self.container_width, bounce_enabled)
    }
}

/// Joins the container and content measurements of the host
#[derive(Clone)]
pub struct MetricsProbe {
    container: Arc<dyn MeasurableRegion>,
    content: Arc<dyn MeasurableRegion>,
}

impl std::fmt::Debug for MetricsProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsProbe")
            .field("container", &self.container.name())
            .field("content", &self.content.name())
            .finish()
    }
}

impl MetricsProbe {
    pub fn new(container: Arc<dyn MeasurableRegion>, content: Arc<dyn MeasurableRegion>) -> Self {
        Self { container, content }
    }

    /// Measure both regions concurrently
    ///
    /// Fails if either measurement fails; no partial metrics are produced.
    pub async fn probe(&self) -> Result<Metrics> {
        let (container_width, content_width) = tokio::join!(
            self.container.measure_width(),
            self.content.measure_width()
        );
        Ok(Metrics::new(
            usable_width(self.container.as_ref(), container_width?)?,
            usable_width(self.content.as_ref(), content_width?)?,
        ))
    }
}

fn usable_width(region: &dyn MeasurableRegion, width: f64) -> Result<f64> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(crate::Error::measurement(
            region.name(),
            format!("host reported width {}", width),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::testing::{FailingRegion, FixedRegion};

    #[test]
    fn test_metrics_invariants() {
        let m = Metrics::new(100.0, 300.0);
        assert_eq!(m.distance(), 200.0);
        assert!(!m.content_fits());
        assert!(!m.should_bounce());
        assert_eq!(m.select(true), AnimationMode::Scroll);

        let m = Metrics::new(100.0, 110.0);
        assert_eq!(m.distance(), 10.0);
        assert!(m.should_bounce());
        assert_eq!(m.select(true), AnimationMode::Bounce);

        let m = Metrics::new(100.0, 101.0);
        assert!(m.content_fits());
        assert!(!m.should_bounce());
    }

    #[tokio::test]
    async fn test_probe_joins_both_widths() {
        let probe = MetricsProbe::new(FixedRegion::shared(100.0), FixedRegion::shared(300.0));
        let metrics = probe.probe().await.unwrap();
        assert_eq!(metrics, Metrics::new(100.0, 300.0));
    }

    #[tokio::test]
    async fn test_probe_fails_if_either_side_fails() {
        let probe = MetricsProbe::new(FixedRegion::shared(100.0), FailingRegion::shared());
        assert!(matches!(
            probe.probe().await,
            Err(crate::Error::MeasurementUnavailable { .. })
        ));

        let probe = MetricsProbe::new(FailingRegion::shared(), FixedRegion::shared(100.0));
        assert!(probe.probe().await.is_err());
    }

    #[tokio::test]
    async fn test_probe_rejects_non_finite_widths() {
        let probe = MetricsProbe::new(FixedRegion::shared(100.0), FixedRegion::shared(f64::NAN));
        assert!(probe.probe().await.is_err());

        let probe = MetricsProbe::new(FixedRegion::shared(-1.0), FixedRegion::shared(10.0));
        assert!(probe.probe().await.is_err());
    }
}
