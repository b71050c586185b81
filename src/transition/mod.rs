//! Animates a path attribute between consecutive computed values.
//!
//! The engine owns the previous/current path pair and decides per update
//! whether to tween, apply instantly, or do nothing. The tween itself is
//! an explicit cancelable task the host drives with frame deltas; the
//! engine never schedules frames on its own.

mod path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use path::PathTemplate;

/// Easing applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Tween tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300.0,
            easing: Easing::EaseInOutCubic,
        }
    }
}

impl TransitionConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "transition duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Newly computed paths submitted to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathTarget {
    pub line: String,
    /// Parallel fill-area path, when the series renders an area.
    pub area: Option<String>,
    /// Time-period/bucket tag; a change here cuts instead of morphing.
    pub period: Option<String>,
}

/// One set of path attribute values for the host to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFrame {
    pub line: String,
    pub area: Option<String>,
}

/// What the host should do with a submitted target.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionDecision {
    /// Identical consecutive input; write nothing.
    Unchanged,
    /// Apply this frame immediately, no tween.
    Instant(PathFrame),
    /// A tween was started; drive it via [`PathTransitionEngine::tick`].
    Animated,
}

/// In-flight interpolation task. Dropping or replacing it stops it; no
/// callback outlives the engine.
#[derive(Debug, Clone)]
pub struct PathTween {
    line_pair: Option<(PathTemplate, PathTemplate)>,
    area_pair: Option<(PathTemplate, PathTemplate)>,
    target: PathFrame,
    duration_ms: f64,
    elapsed_ms: f64,
    easing: Easing,
}

impl PathTween {
    fn new(from: &PathFrame, target: PathFrame, config: TransitionConfig) -> Self {
        let line_pair = parse_pair(&from.line, &target.line);
        let area_pair = match (&from.area, &target.area) {
            (Some(from_area), Some(to_area)) => parse_pair(from_area, to_area),
            _ => None,
        };
        if line_pair.is_none() {
            debug!("path skeletons differ; transition degrades to an instant cut");
        }
        Self {
            line_pair,
            area_pair,
            target,
            duration_ms: config.duration_ms,
            elapsed_ms: 0.0,
            easing: config.easing,
        }
    }

    /// Advances by a host frame delta and returns the frame to write.
    /// The final frame is the exact target strings, not a reformatted
    /// interpolation.
    pub fn advance(&mut self, dt_ms: f64) -> PathFrame {
        self.elapsed_ms += dt_ms.max(0.0);
        let progress = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        if self.is_complete() {
            return self.target.clone();
        }
        let eased = self.easing.apply(progress);

        let line = match &self.line_pair {
            Some((from, to)) => path::interpolate(from, to, eased),
            None => self.target.line.clone(),
        };
        let area = match &self.area_pair {
            Some((from, to)) => Some(path::interpolate(from, to, eased)),
            None => self.target.area.clone(),
        };
        PathFrame { line, area }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.line_pair.is_none() || self.elapsed_ms >= self.duration_ms
    }

    #[must_use]
    pub fn target(&self) -> &PathFrame {
        &self.target
    }
}

fn parse_pair(from: &str, to: &str) -> Option<(PathTemplate, PathTemplate)> {
    let from = path::parse_path(from)?;
    let to = path::parse_path(to)?;
    from.compatible(&to).then_some((from, to))
}

/// Decides, per submitted path update, between tweening and cutting.
#[derive(Debug, Default)]
pub struct PathTransitionEngine {
    config: TransitionConfig,
    current: Option<PathFrame>,
    period: Option<String>,
    fallback_displayed: bool,
    tween: Option<PathTween>,
}

impl PathTransitionEngine {
    pub fn new(config: TransitionConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            current: None,
            period: None,
            fallback_displayed: false,
            tween: None,
        })
    }

    /// Records a placeholder path the host displays while real data is
    /// pending. The next submitted target replaces it exactly once
    /// without animating.
    pub fn show_fallback(&mut self, line: String, area: Option<String>) {
        self.tween = None;
        self.current = Some(PathFrame { line, area });
        self.fallback_displayed = true;
    }

    /// Submits a newly computed target.
    ///
    /// `rendered_line`/`rendered_area` are the attribute values currently
    /// on screen; a tween starts from those rather than from the last
    /// submitted value, so rapid overlapping updates compose instead of
    /// jumping. Starting a tween supersedes any in-flight one.
    pub fn submit(
        &mut self,
        target: PathTarget,
        rendered_line: Option<&str>,
        rendered_area: Option<&str>,
    ) -> TransitionDecision {
        let period_changed = self.period != target.period;
        self.period = target.period;
        let next = PathFrame {
            line: target.line,
            area: target.area,
        };

        let Some(current) = self.current.clone() else {
            // Nothing on screen yet: first paint is always direct.
            self.current = Some(next.clone());
            self.fallback_displayed = false;
            return TransitionDecision::Instant(next);
        };

        let line_changed = current.line != next.line;
        let area_changed = current.area != next.area;
        if !line_changed && !area_changed {
            return TransitionDecision::Unchanged;
        }

        let replacing_fallback = self.fallback_displayed;
        self.fallback_displayed = false;
        self.current = Some(next.clone());

        if replacing_fallback || period_changed || !line_changed {
            // Fallback replacement and bucket switches must not morph;
            // an area-only change has no line geometry to tween.
            self.tween = None;
            return TransitionDecision::Instant(next);
        }

        let from = PathFrame {
            line: rendered_line.unwrap_or(&current.line).to_owned(),
            area: rendered_area.map(str::to_owned).or(current.area),
        };
        let tween = PathTween::new(&from, next.clone(), self.config);
        if tween.is_complete() {
            // Structurally incompatible paths cut instead of morphing.
            self.tween = None;
            return TransitionDecision::Instant(next);
        }
        self.tween = Some(tween);
        TransitionDecision::Animated
    }

    /// Advances the active tween, returning the frame to write, or `None`
    /// when nothing is animating. The tween is dropped after its final
    /// frame.
    pub fn tick(&mut self, dt_ms: f64) -> Option<PathFrame> {
        let tween = self.tween.as_mut()?;
        let frame = tween.advance(dt_ms);
        if tween.is_complete() {
            self.tween = None;
        }
        Some(frame)
    }

    /// Stops the active tween; called on teardown so no callback writes
    /// to a detached node.
    pub fn cancel(&mut self) {
        self.tween = None;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Last accepted target, i.e. what the host ends up displaying once
    /// any tween settles.
    #[must_use]
    pub fn current(&self) -> Option<&PathFrame> {
        self.current.as_ref()
    }
}
