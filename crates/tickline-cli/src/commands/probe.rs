use std::sync::Arc;

use anyhow::{anyhow, Result};

use tickline_core::ticker::{bounce_targets, scroll_target, timing::leg_duration};
use tickline_core::{
    AnimationMode, AppConfig, MeasurableRegion, TickAnimator, TickerConfig, TickerController,
};

/// Region reporting a width given on the command line
struct GivenWidth(&'static str, f64);

#[async_trait::async_trait]
impl MeasurableRegion for GivenWidth {
    fn name(&self) -> &str {
        self.0
    }

    async fn measure_width(&self) -> tickline_core::Result<f64> {
        Ok(self.1)
    }
}

/// The decision a ticker would make for the given widths
#[derive(Debug)]
pub struct Plan {
    pub distance: f64,
    pub content_fits: bool,
    pub should_bounce: bool,
    pub mode: AnimationMode,
    pub targets: Vec<f64>,
    pub leg_ms: u128,
    pub interactive_scroll: bool,
}

/// Measure through a real controller and derive the animation plan
pub async fn plan(config: &TickerConfig, container: f64, content: f64, segments: usize) -> Result<Plan> {
    let config = TickerConfig {
        auto_start: false,
        ..config.clone()
    };
    let ticker = TickerController::new(
        config.clone(),
        Arc::new(GivenWidth("container", container)),
        Arc::new(GivenWidth("content", content)),
        Arc::new(TickAnimator::default()),
    );
    ticker.set_segments(segments);
    ticker.activate();

    let metrics = ticker.measure().await;
    let state = ticker.state();
    let mode = ticker.mode();
    let interactive_scroll = ticker.interactive_scroll_enabled();
    ticker.deactivate();

    let metrics = metrics.ok_or_else(|| anyhow!("widths must be finite and non-negative"))?;
    let targets = match mode {
        AnimationMode::Scroll => vec![scroll_target(&metrics, &config)],
        AnimationMode::Bounce => bounce_targets(&metrics, &config).to_vec(),
        AnimationMode::None => Vec::new(),
    };

    Ok(Plan {
        distance: metrics.distance(),
        content_fits: state.content_fits,
        should_bounce: state.should_bounce,
        mode,
        targets,
        leg_ms: leg_duration(&config, mode, segments.max(1), metrics.content_width).as_millis(),
        interactive_scroll,
    })
}

pub async fn run(config: &AppConfig, container: f64, content: f64, segments: usize) -> Result<()> {
    let plan = plan(&config.ticker, container, content, segments).await?;

    println!("Container: {:.1}px  Content: {:.1}px", container, content);
    println!("Distance:  {:.1}px", plan.distance);
    println!("Fits:      {}", plan.content_fits);
    println!("Bounce:    {}", plan.should_bounce);
    println!("Mode:      {}", plan.mode.as_str());

    if plan.mode == AnimationMode::None {
        println!("\nContent fits; the ticker stays static.");
        return Ok(());
    }

    let targets: Vec<String> = plan.targets.iter().map(|t| format!("{:.1}", t)).collect();
    println!("Targets:   {}", targets.join(" -> "));
    println!("Leg:       {}ms", plan.leg_ms);
    println!("Manual scrolling: {}", if plan.interactive_scroll { "enabled" } else { "disabled" });

    Ok(())
}
