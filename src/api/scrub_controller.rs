use serde::{Deserialize, Serialize};

use crate::core::Scale;
use crate::error::ChartResult;
use crate::interaction::{
    HapticTrigger, KeyboardNavigator, LabelPlacement, SCRUB_STEP_COUNT, ScrubFrame, ScrubKey,
    ScrubberState, WriteThrottle, clamp_label_x, format_hover_date, format_hover_value,
};

use super::ChartSession;

/// Scrub session tuning. Label widths are host-measured; text layout is
/// outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubConfig {
    pub throttle_ms: f64,
    pub step_count: usize,
    pub label_padding: f64,
    pub date_label_width: f64,
    pub value_label_width: f64,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 20.0,
            step_count: SCRUB_STEP_COUNT,
            label_padding: 8.0,
            date_label_width: 96.0,
            value_label_width: 64.0,
        }
    }
}

impl ScrubConfig {
    pub fn validate(self) -> ChartResult<Self> {
        WriteThrottle::new(self.throttle_ms)?;
        let widths = [
            self.label_padding,
            self.date_label_width,
            self.value_label_width,
        ];
        if widths.iter().any(|width| !width.is_finite() || *width < 0.0) {
            return Err(crate::error::ChartError::InvalidConfig(
                "label metrics must be finite and >= 0".to_owned(),
            ));
        }
        if self.step_count < 2 {
            return Err(crate::error::ChartError::InvalidConfig(
                "keyboard step count must be >= 2".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Drives one pointer/keyboard scrub session against chart sessions.
///
/// Owns the only mutable state in the subsystem: the scrubber state, the
/// position-cache throttle and the keyboard step table. Geometry is read
/// from the passed-in [`ChartSession`] each event, never cached here.
#[derive(Debug)]
pub struct ScrubController<H: HapticTrigger> {
    config: ScrubConfig,
    state: ScrubberState,
    throttle: WriteThrottle,
    navigator: Option<KeyboardNavigator>,
    /// Set by pointer movement so the next key press resumes from the
    /// cached pointer position instead of the navigator's old step.
    pending_keyboard_seed: bool,
    haptics: H,
}

impl<H: HapticTrigger> ScrubController<H> {
    pub fn new(config: ScrubConfig, haptics: H) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            state: ScrubberState::default(),
            throttle: WriteThrottle::new(config.throttle_ms)?,
            navigator: None,
            pending_keyboard_seed: false,
            haptics,
        })
    }

    #[must_use]
    pub fn state(&self) -> ScrubberState {
        self.state
    }

    #[must_use]
    pub fn highlighted_index(&self) -> Option<usize> {
        self.state.highlighted_index()
    }

    /// Consumes the controller and returns the haptic collaborator.
    #[must_use]
    pub fn into_haptics(self) -> H {
        self.haptics
    }

    /// Starts the session on pointer-enter or focus. Idempotent: the
    /// haptic collaborator fires only on the idle-to-engaged transition.
    pub fn engage(&mut self) -> bool {
        let started = self.state.begin();
        if started {
            self.haptics.scrub_engaged();
        }
        started
    }

    /// Ends the session on pointer-leave or blur. Idempotent; returns
    /// `true` when the host should fade out the indicator and labels.
    pub fn release(&mut self) -> bool {
        let ended = self.state.end();
        if ended {
            self.throttle.reset();
        }
        ended
    }

    /// Resolves a pointer position and produces the frame of visual side
    /// effects. `now_ms` is host monotonic time feeding the position
    /// cache throttle; the frame itself is never delayed.
    pub fn pointer_move(
        &mut self,
        session: &ChartSession<'_>,
        pixel_x: f64,
        now_ms: f64,
    ) -> Option<ScrubFrame> {
        self.engage();
        let index = session.data_index_from_x(pixel_x)?;
        self.state.update_index(index);
        if self.throttle.accept(now_ms) {
            self.state.record_pixel(pixel_x);
            self.pending_keyboard_seed = true;
        }
        self.build_frame(session, index, pixel_x)
    }

    /// Resolves one keyboard step through the same update path as
    /// pointer movement. The step table is rebuilt when the drawing
    /// width changes and seeded from the last pointer position.
    pub fn key_input(
        &mut self,
        session: &ChartSession<'_>,
        key: ScrubKey,
        fast: bool,
    ) -> Option<ScrubFrame> {
        self.engage();
        let rect = session.plot_rect();
        if !rect.is_drawable() {
            return None;
        }

        let stale = self
            .navigator
            .as_ref()
            .is_none_or(|navigator| navigator.width() != rect.width);
        if stale {
            self.navigator = Some(KeyboardNavigator::new(rect.width, self.config.step_count)?);
            self.pending_keyboard_seed = true;
        }

        let navigator = self.navigator.as_mut()?;
        if self.pending_keyboard_seed {
            if let Some(last) = self.state.last_pixel_x() {
                navigator.seed_from_pixel(last - rect.x);
            }
            self.pending_keyboard_seed = false;
        }
        let pixel_x = rect.x + navigator.apply(key, fast);
        let index = session.data_index_from_x(pixel_x)?;
        self.state.update_index(index);
        self.state.record_pixel(pixel_x);
        self.build_frame(session, index, pixel_x)
    }

    fn build_frame(
        &self,
        session: &ChartSession<'_>,
        index: usize,
        pixel_x: f64,
    ) -> Option<ScrubFrame> {
        let rect = session.plot_rect();
        if !rect.is_drawable() {
            return None;
        }

        let indicator_x = session.indicator_position(index, pixel_x);
        let samples = session.scrub_samples(index);

        let date_text = match session.x_axis().category_labels() {
            Some(labels) => labels.get(index).cloned(),
            None => {
                let is_category = matches!(
                    session.x_scale(),
                    Some(Scale::Band(_) | Scale::Point(_))
                );
                if is_category {
                    None
                } else {
                    samples
                        .iter()
                        .find_map(|sample| sample.point)
                        .and_then(|point| format_hover_date(point.x, session.is_intraday()))
                }
            }
        };
        let value_text = samples
            .iter()
            .find_map(|sample| sample.point.and_then(|point| point.y))
            .map(format_hover_value);

        let date_label = date_text.map(|text| LabelPlacement {
            x: self.clamped_label_x(indicator_x, self.config.date_label_width, session),
            text,
        });
        let value_label = value_text.map(|text| LabelPlacement {
            x: self.clamped_label_x(indicator_x, self.config.value_label_width, session),
            text,
        });

        Some(ScrubFrame {
            index,
            indicator_x,
            samples,
            period_label: session.period_label().map(str::to_owned),
            date_label,
            value_label,
        })
    }

    /// Centers a label on the indicator, clamped so it never clips at
    /// the chart edges.
    fn clamped_label_x(
        &self,
        indicator_x: f64,
        label_width: f64,
        session: &ChartSession<'_>,
    ) -> f64 {
        let rect = session.plot_rect();
        let desired = indicator_x - rect.x - label_width / 2.0;
        rect.x + clamp_label_x(desired, label_width, rect.width, self.config.label_padding)
    }
}
