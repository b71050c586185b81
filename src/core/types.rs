use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Identifier of a data series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(String);

impl SeriesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of an axis. Sibling axes sharing a layout group are ordered
/// by this id, not by registration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(String);

impl AxisId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Well-known id series are assigned to when no x-axis is given.
    #[must_use]
    pub fn default_x() -> Self {
        Self::new("x")
    }

    /// Well-known id series are assigned to when no y-axis is given.
    #[must_use]
    pub fn default_y() -> Self {
        Self::new("y")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AxisId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a stack group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackId(String);

impl StackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One sample of a series. `y` is `None` for a missing sample; gaps are
/// preserved through stacking and scrubbing instead of being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: Option<f64>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    /// A missing sample at `x`.
    #[must_use]
    pub fn gap(x: f64) -> Self {
        Self { x, y: None }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData("sample value cannot be represented as f64".to_owned())
        })?;
        Ok(Self {
            x: datetime_to_unix_seconds(time),
            y: Some(y),
        })
    }
}

/// A data series with optional axis and stack assignment.
///
/// `points.x` is assumed monotonically non-decreasing; this is not
/// validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub points: Vec<SeriesPoint>,
    #[serde(default)]
    pub x_axis: Option<AxisId>,
    #[serde(default)]
    pub y_axis: Option<AxisId>,
    #[serde(default)]
    pub stack: Option<StackId>,
    #[serde(default)]
    pub stroke: Option<String>,
}

impl Series {
    pub fn new(id: impl Into<SeriesId>, points: Vec<SeriesPoint>) -> Self {
        Self {
            id: id.into(),
            points,
            x_axis: None,
            y_axis: None,
            stack: None,
            stroke: None,
        }
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: impl Into<AxisId>) -> Self {
        self.y_axis = Some(axis.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<StackId>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }
}

/// Measured size of the chart's container element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

impl PlotSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Outer padding between the container edge and axis decorations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub(crate) fn validate(self) -> ChartResult<Self> {
        let sides = [self.top, self.right, self.bottom, self.left];
        if sides.iter().any(|side| !side.is_finite() || *side < 0.0) {
            return Err(ChartError::InvalidConfig(
                "outer padding sides must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Pixel rectangle. Width and height are clamped to zero on construction,
/// never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether the rect has positive area; degenerate rects mean "not
    /// ready" and every derived value resolves to `None`.
    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }
}

/// Projected sample position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}
