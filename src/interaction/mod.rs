use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, SeriesId, SeriesPoint};
use crate::error::{ChartError, ChartResult};

/// Number of discrete steps the drawing width is divided into for
/// keyboard navigation.
pub const SCRUB_STEP_COUNT: usize = 100;

/// Step multiplier applied while a modifier key is held.
pub const FAST_STEP_MULTIPLIER: usize = 10;

/// Keyboard input recognized by the scrub session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrubKey {
    /// Arrow-right: one step toward the end.
    Next,
    /// Arrow-left: one step toward the start.
    Prev,
    /// Arrow-up: jump to the first step.
    First,
    /// Arrow-down: jump to the last step.
    Last,
}

/// Host collaborator fired once when a scrub session engages.
pub trait HapticTrigger {
    fn scrub_engaged(&mut self);
}

/// No-op haptics for tests and hosts without feedback hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHaptics;

impl HapticTrigger for NullHaptics {
    fn scrub_engaged(&mut self) {}
}

/// Scrub session state. `highlighted_index` is `None` while not scrubbing
/// and transitions only through [`begin`](Self::begin),
/// [`update_index`](Self::update_index) and [`end`](Self::end); no axis or
/// series computation depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScrubberState {
    engaged: bool,
    highlighted_index: Option<usize>,
    last_pixel_x: Option<f64>,
}

impl ScrubberState {
    #[must_use]
    pub fn is_engaged(self) -> bool {
        self.engaged
    }

    #[must_use]
    pub fn highlighted_index(self) -> Option<usize> {
        self.highlighted_index
    }

    /// Pixel position keyboard navigation resumes from after a pointer
    /// session, maintained through the write throttle.
    #[must_use]
    pub fn last_pixel_x(self) -> Option<f64> {
        self.last_pixel_x
    }

    /// Returns `true` only on the idle-to-engaged transition, so side
    /// effects cannot double-fire on re-entry.
    pub fn begin(&mut self) -> bool {
        if self.engaged {
            return false;
        }
        self.engaged = true;
        true
    }

    pub fn update_index(&mut self, index: usize) {
        self.highlighted_index = Some(index);
    }

    pub fn record_pixel(&mut self, pixel_x: f64) {
        self.last_pixel_x = Some(pixel_x);
    }

    /// Returns `true` only on the engaged-to-idle transition.
    pub fn end(&mut self) -> bool {
        if !self.engaged {
            return false;
        }
        self.engaged = false;
        self.highlighted_index = None;
        true
    }
}

/// Last-accept rate limiter for the internal position cache.
///
/// Only the bookkeeping behind keyboard resume goes through this; the
/// visual update path is never delayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WriteThrottle {
    interval_ms: f64,
    last_accept_ms: Option<f64>,
}

impl WriteThrottle {
    pub fn new(interval_ms: f64) -> ChartResult<Self> {
        if !interval_ms.is_finite() || interval_ms < 0.0 {
            return Err(ChartError::InvalidConfig(
                "throttle interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            interval_ms,
            last_accept_ms: None,
        })
    }

    /// Accepts at most one write per interval. `now_ms` is host-supplied
    /// monotonic time, which keeps the throttle deterministic under test.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_accept_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_accept_ms = Some(now_ms);
                true
            }
        }
    }

    /// Torn down with the interactive session.
    pub fn reset(&mut self) {
        self.last_accept_ms = None;
    }
}

/// Fixed-step keyboard navigation over the drawing width.
///
/// Step positions are precomputed; step 0 sits at the left edge and the
/// last step at the right edge, with both ends clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardNavigator {
    width: f64,
    positions: Vec<f64>,
    current: Option<usize>,
}

impl KeyboardNavigator {
    /// `None` while the drawing width is degenerate.
    #[must_use]
    pub fn new(width: f64, step_count: usize) -> Option<Self> {
        if !width.is_finite() || width <= 0.0 || step_count < 2 {
            return None;
        }
        let positions = (0..step_count)
            .map(|step| width * step as f64 / (step_count - 1) as f64)
            .collect();
        Some(Self {
            width,
            positions,
            current: None,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<usize> {
        self.current
    }

    /// Seeds the current step from the pixel position a pointer session
    /// left off at.
    pub fn seed_from_pixel(&mut self, pixel_x: f64) {
        let nearest = self
            .positions
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - pixel_x)
                    .abs()
                    .total_cmp(&(*b - pixel_x).abs())
            })
            .map(|(step, _)| step);
        self.current = nearest;
    }

    /// Applies a key, returning the pixel position of the resulting step.
    pub fn apply(&mut self, key: ScrubKey, fast: bool) -> f64 {
        let last = self.positions.len() - 1;
        let stride = if fast { FAST_STEP_MULTIPLIER } else { 1 };
        let current = self.current.unwrap_or(0);
        let next = match key {
            ScrubKey::Next => current.saturating_add(stride).min(last),
            ScrubKey::Prev => current.saturating_sub(stride),
            ScrubKey::First => 0,
            ScrubKey::Last => last,
        };
        self.current = Some(next);
        self.positions[next]
    }
}

/// Positioned hover label, clamped to stay inside the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub text: String,
    pub x: f64,
}

/// Clamps a label's left edge to `[padding, width - label_width - padding]`
/// so hover labels never clip at the chart edges.
#[must_use]
pub fn clamp_label_x(desired_x: f64, label_width: f64, chart_width: f64, padding: f64) -> f64 {
    let max = (chart_width - label_width - padding).max(padding);
    desired_x.clamp(padding, max)
}

/// Formats a unix-seconds x value for the hover-date label. Intraday
/// windows show time of day; anything wider shows the calendar date.
#[must_use]
pub fn format_hover_date(x_seconds: f64, intraday: bool) -> Option<String> {
    let millis = (x_seconds * 1000.0).round();
    if !millis.is_finite() {
        return None;
    }
    let time: DateTime<Utc> = Utc.timestamp_millis_opt(millis as i64).single()?;
    let formatted = if intraday {
        time.format("%H:%M").to_string()
    } else {
        time.format("%b %e, %Y").to_string()
    };
    Some(formatted)
}

/// Formats a sample value for the hover-price label, trimming trailing
/// zeros.
#[must_use]
pub fn format_hover_value(value: f64) -> String {
    let rendered = format!("{value:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// One resolved series sample inside a scrub frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubSample {
    pub series: SeriesId,
    pub point: Option<SeriesPoint>,
    pub pixel: Option<PixelPoint>,
}

/// Everything the host needs to reflect one resolved scrub position:
/// indicator/mask transform, per-series samples, and clamped hover labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubFrame {
    pub index: usize,
    pub indicator_x: f64,
    pub samples: Vec<ScrubSample>,
    pub period_label: Option<String>,
    pub date_label: Option<LabelPlacement>,
    pub value_label: Option<LabelPlacement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_end_fire_once() {
        let mut state = ScrubberState::default();
        assert!(state.begin());
        assert!(!state.begin());
        state.update_index(4);
        assert_eq!(state.highlighted_index(), Some(4));
        assert!(state.end());
        assert!(!state.end());
        assert_eq!(state.highlighted_index(), None);
    }

    #[test]
    fn throttle_accepts_at_most_once_per_interval() {
        let mut throttle = WriteThrottle::new(20.0).expect("valid throttle");
        assert!(throttle.accept(0.0));
        assert!(!throttle.accept(10.0));
        assert!(!throttle.accept(19.9));
        assert!(throttle.accept(20.0));
        throttle.reset();
        assert!(throttle.accept(21.0));
    }

    #[test]
    fn label_clamp_keeps_labels_inside_the_chart() {
        assert_eq!(clamp_label_x(-40.0, 60.0, 500.0, 8.0), 8.0);
        assert_eq!(clamp_label_x(490.0, 60.0, 500.0, 8.0), 432.0);
        assert_eq!(clamp_label_x(200.0, 60.0, 500.0, 8.0), 200.0);
    }
}
