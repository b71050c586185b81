//! Chart view facade: owns inputs, recomputes layout reactively, and
//! hands read-only sessions to dependents.

pub mod axis_coordinator;
pub mod axis_registry;
pub mod scrub_controller;
pub mod scrub_resolver;

use indexmap::IndexMap;

use crate::core::{
    AxisId, Insets, PixelPoint, PlotRect, PlotSize, Scale, ScaleOptions, Series, SeriesId,
    StackedSeriesData,
};
use crate::error::{ChartError, ChartResult};

pub use axis_coordinator::{AxisConfig, AxisOverride, ResolvedAxis};
pub use axis_registry::{AxisEdge, AxisKind, AxisRegistry, RegisteredAxis};
pub use scrub_controller::{ScrubConfig, ScrubController};

/// Stroke used when neither the series nor the host picked one; runs
/// through the contrast resolver against the chart background.
pub const DEFAULT_SERIES_STROKE: &str = "#4169e1";

/// Host geometry helper turning projected points into a path string.
pub trait PathBuilder {
    fn path(&self, points: &[PixelPoint]) -> String;
}

/// Host color-accessibility resolver for default stroke colors.
pub trait ContrastResolver {
    fn resolve(&self, background: &str, foreground: &str) -> String;
}

/// Identity resolver for hosts without accessibility adjustment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughContrast;

impl ContrastResolver for PassthroughContrast {
    fn resolve(&self, _background: &str, foreground: &str) -> String {
        foreground.to_owned()
    }
}

/// One layout pass's derived values. Pure data; recomputed whole on every
/// relevant input change and never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub plot_rect: PlotRect,
    pub x_axis: ResolvedAxis,
    pub y_axes: IndexMap<AxisId, ResolvedAxis>,
    pub stacked: StackedSeriesData,
}

/// Owns the chart's inputs and its latest computed layout.
///
/// Every mutator reruns the layout pass synchronously, so dependents
/// always observe padding, rects, scales and stacks from the same pass.
#[derive(Debug, Default)]
pub struct ChartView {
    series: Vec<Series>,
    container: Option<PlotSize>,
    outer_padding: Insets,
    x_override: Option<AxisOverride>,
    y_overrides: IndexMap<AxisId, AxisOverride>,
    registry: AxisRegistry,
    scale_options: ScaleOptions,
    period_label: Option<String>,
    background: Option<String>,
    layout: Option<ChartLayout>,
}

impl ChartView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_series(&mut self, series: Vec<Series>) {
        self.series = series;
        self.recompute();
    }

    /// Applies a measured container size. Degenerate sizes are accepted
    /// and simply leave every derived value not-ready.
    pub fn measure(&mut self, size: PlotSize) {
        self.container = Some(size);
        self.recompute();
    }

    pub fn set_outer_padding(&mut self, padding: Insets) -> ChartResult<()> {
        self.outer_padding = padding.validate()?;
        self.recompute();
        Ok(())
    }

    pub fn set_scale_options(&mut self, options: ScaleOptions) -> ChartResult<()> {
        self.scale_options = options.validate()?;
        self.recompute();
        Ok(())
    }

    pub fn configure_x_axis(&mut self, axis: AxisOverride) -> ChartResult<()> {
        self.x_override = Some(axis.validate()?);
        self.recompute();
        Ok(())
    }

    pub fn configure_y_axis(&mut self, id: impl Into<AxisId>, axis: AxisOverride) -> ChartResult<()> {
        self.y_overrides.insert(id.into(), axis.validate()?);
        self.recompute();
        Ok(())
    }

    /// Registers an axis decoration's space claim (see [`AxisRegistry`]).
    pub fn register_axis(&mut self, axis: RegisteredAxis) -> ChartResult<()> {
        self.registry.register(axis)?;
        self.recompute();
        Ok(())
    }

    /// Releases a decoration's claim on unmount; symmetric with
    /// [`register_axis`](Self::register_axis).
    pub fn unregister_axis(&mut self, id: &AxisId) -> bool {
        let removed = self.registry.unregister(id);
        if removed {
            self.recompute();
        }
        removed
    }

    pub fn set_period_label(&mut self, label: Option<String>) {
        self.period_label = label;
        self.recompute();
    }

    pub fn set_background(&mut self, background: impl Into<String>) {
        self.background = Some(background.into());
        self.recompute();
    }

    #[must_use]
    pub fn registry(&self) -> &AxisRegistry {
        &self.registry
    }

    /// Read-only handle over the latest layout pass.
    ///
    /// Errors only when no pass has run yet; that is a sequencing bug in
    /// the caller, not a degraded-data condition.
    pub fn session(&self) -> ChartResult<ChartSession<'_>> {
        let layout = self.layout.as_ref().ok_or(ChartError::LayoutNotComputed)?;
        Ok(ChartSession {
            view: self,
            layout,
        })
    }

    fn recompute(&mut self) {
        self.layout = Some(self.compute_layout());
    }
}

/// Read-only view of one layout pass, passed down to axis decorations,
/// series renderers and the scrub controller in place of ambient state.
#[derive(Debug, Clone, Copy)]
pub struct ChartSession<'a> {
    view: &'a ChartView,
    layout: &'a ChartLayout,
}

impl<'a> ChartSession<'a> {
    #[must_use]
    pub fn plot_rect(&self) -> PlotRect {
        self.layout.plot_rect
    }

    #[must_use]
    pub fn x_axis(&self) -> &'a ResolvedAxis {
        &self.layout.x_axis
    }

    #[must_use]
    pub fn x_scale(&self) -> Option<&'a Scale> {
        self.layout.x_axis.scale.as_ref()
    }

    #[must_use]
    pub fn y_axis(&self, id: &AxisId) -> Option<&'a ResolvedAxis> {
        self.layout.y_axes.get(id)
    }

    #[must_use]
    pub fn y_scale(&self, id: &AxisId) -> Option<&'a Scale> {
        self.layout.y_axes.get(id)?.scale.as_ref()
    }

    #[must_use]
    pub fn default_y_scale(&self) -> Option<&'a Scale> {
        self.y_scale(&AxisId::default_y())
    }

    #[must_use]
    pub fn series(&self) -> &'a [Series] {
        &self.view.series
    }

    #[must_use]
    pub fn series_by_id(&self, id: &SeriesId) -> Option<&'a Series> {
        self.view.series.iter().find(|series| series.id == *id)
    }

    #[must_use]
    pub fn stacked_series_data(&self) -> &'a StackedSeriesData {
        &self.layout.stacked
    }

    #[must_use]
    pub fn period_label(&self) -> Option<&'a str> {
        self.view.period_label.as_deref()
    }

    /// Pixel strip a registered axis decoration should occupy, offset by
    /// its id-sorted siblings. `None` while unregistered or not ready.
    #[must_use]
    pub fn axis_bounds(&self, id: &AxisId) -> Option<PlotRect> {
        let rect = self.layout.plot_rect;
        if !rect.is_drawable() {
            return None;
        }
        let registry = &self.view.registry;
        let axis = registry.get(id)?;
        let offset = registry.offset_within_group(id)?;
        let rect = match (axis.kind, axis.edge) {
            (AxisKind::Y, AxisEdge::Start) => {
                let group = registry.edge_padding(AxisKind::Y, AxisEdge::Start);
                PlotRect::new(rect.x - group + offset, rect.y, axis.size, rect.height)
            }
            (AxisKind::Y, AxisEdge::End) => {
                PlotRect::new(rect.right() + offset, rect.y, axis.size, rect.height)
            }
            (AxisKind::X, AxisEdge::Start) => {
                let group = registry.edge_padding(AxisKind::X, AxisEdge::Start);
                PlotRect::new(rect.x, rect.y - group + offset, rect.width, axis.size)
            }
            (AxisKind::X, AxisEdge::End) => {
                PlotRect::new(rect.x, rect.bottom() + offset, rect.width, axis.size)
            }
        };
        Some(rect)
    }

    /// Projects a series into pixel space, one entry per data index with
    /// `None` preserving gaps. Stacked series project their band top so
    /// markers sit on the visible line.
    #[must_use]
    pub fn projected_points(&self, id: &SeriesId) -> Option<Vec<Option<PixelPoint>>> {
        let series = self.series_by_id(id)?;
        let x_scale = self.x_scale()?;
        let y_axis = self.view.resolved_y_axis_id(series);
        let y_scale = self.y_scale(&y_axis)?;
        let spans = self.layout.stacked.get(id);

        let projected = series
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let x = match x_scale {
                    Scale::Linear(linear) => Some(linear.position(point.x)),
                    Scale::Band(_) | Scale::Point(_) => x_scale.position_of_index(index),
                }?;
                let value = match spans {
                    Some(spans) => spans.get(index).copied().flatten().map(|span| span.top),
                    None => point.y,
                }?;
                let y = y_scale.position_of_value(value)?;
                Some(PixelPoint { x, y })
            })
            .collect();
        Some(projected)
    }

    /// Builds the series' path via the host geometry helper, skipping
    /// gaps. `None` while the series cannot project.
    #[must_use]
    pub fn series_path(&self, id: &SeriesId, builder: &dyn PathBuilder) -> Option<String> {
        let points: Vec<PixelPoint> = self
            .projected_points(id)?
            .into_iter()
            .flatten()
            .collect();
        if points.is_empty() {
            return None;
        }
        Some(builder.path(&points))
    }

    /// Stroke for a series: its own if set, otherwise the default run
    /// through the host contrast resolver against the chart background.
    #[must_use]
    pub fn stroke_for(&self, id: &SeriesId, resolver: &dyn ContrastResolver) -> Option<String> {
        let series = self.series_by_id(id)?;
        if let Some(stroke) = &series.stroke {
            return Some(stroke.clone());
        }
        let background = self.view.background.as_deref().unwrap_or("#ffffff");
        Some(resolver.resolve(background, DEFAULT_SERIES_STROKE))
    }
}
