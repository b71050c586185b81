use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{
    AxisId, PlotRect, Scale, ScaleDomain, ScaleOptions, ScaleType, Series,
    compute_stacked_series_data, resolve_scale,
};
use crate::error::ChartResult;

use super::axis_registry::{AxisEdge, AxisKind};
use super::{ChartLayout, ChartView};

/// Host-facing partial axis configuration; unset fields derive from data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisOverride {
    #[serde(default)]
    pub scale_type: Option<ScaleType>,
    /// Explicit continuous domain; suppresses data derivation.
    #[serde(default)]
    pub domain: Option<(f64, f64)>,
    /// Ordered category labels for band/point axes.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub options: Option<ScaleOptions>,
}

impl AxisOverride {
    pub(super) fn validate(self) -> ChartResult<Self> {
        if let Some(options) = self.options {
            options.validate()?;
        }
        Ok(self)
    }
}

/// Fully derived per-axis configuration for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub id: AxisId,
    pub scale_type: ScaleType,
    pub domain: Option<ScaleDomain>,
    pub range: (f64, f64),
    pub categories: Option<Vec<String>>,
    pub options: ScaleOptions,
}

/// An axis together with its resolved scale; `scale` is `None` while the
/// axis cannot project (no data, degenerate rect).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAxis {
    pub config: AxisConfig,
    pub scale: Option<Scale>,
}

impl ResolvedAxis {
    /// Tick values for linear axes; `None` when no scale resolved or the
    /// axis is categorical (decorations use `category_labels` there).
    #[must_use]
    pub fn ticks(&self, count: usize) -> Option<Vec<f64>> {
        Some(self.scale.as_ref()?.as_linear()?.ticks(count))
    }

    #[must_use]
    pub fn category_labels(&self) -> Option<&[String]> {
        self.config.categories.as_deref()
    }
}

impl ChartView {
    /// Runs one full layout pass: padding fold, plot rect, then per-axis
    /// domains, ranges and scales, then the stack transform. Padding is
    /// fully accumulated from the registry snapshot before any range is
    /// derived.
    pub(super) fn compute_layout(&self) -> ChartLayout {
        let plot_rect = self.compute_plot_rect();
        let x_axis = self.resolve_x_axis(plot_rect);
        let y_axes = self.resolve_y_axes(plot_rect);
        let stacked = compute_stacked_series_data(&self.series);
        ChartLayout {
            plot_rect,
            x_axis,
            y_axes,
            stacked,
        }
    }

    fn compute_plot_rect(&self) -> PlotRect {
        let Some(container) = self.container.filter(|size| size.is_measurable()) else {
            return PlotRect::new(0.0, 0.0, 0.0, 0.0);
        };
        let pad = &self.registry;
        let left = self.outer_padding.left + pad.edge_padding(AxisKind::Y, AxisEdge::Start);
        let right = self.outer_padding.right + pad.edge_padding(AxisKind::Y, AxisEdge::End);
        let top = self.outer_padding.top + pad.edge_padding(AxisKind::X, AxisEdge::Start);
        let bottom = self.outer_padding.bottom + pad.edge_padding(AxisKind::X, AxisEdge::End);
        PlotRect::new(
            left,
            top,
            container.width - left - right,
            container.height - top - bottom,
        )
    }

    fn resolve_x_axis(&self, plot_rect: PlotRect) -> ResolvedAxis {
        let id = AxisId::default_x();
        let over = self.x_override.clone().unwrap_or_default();
        let scale_type = over.scale_type.unwrap_or(ScaleType::Linear);
        let options = over.options.unwrap_or(self.scale_options);
        let range = (plot_rect.x, plot_rect.right());

        let domain = if !plot_rect.is_drawable() {
            None
        } else {
            match scale_type {
                ScaleType::Linear => over
                    .domain
                    .map(|(min, max)| ScaleDomain::Continuous { min, max })
                    .or_else(|| continuous_domain(&self.series, |point| Some(point.x))),
                ScaleType::Band | ScaleType::Point => {
                    let len = over
                        .categories
                        .as_ref()
                        .map(Vec::len)
                        .unwrap_or_else(|| shared_index_count(&self.series));
                    (len > 0).then_some(ScaleDomain::Discrete { len })
                }
            }
        };

        let scale = domain.and_then(|domain| resolve_scale(domain, range, scale_type, options));
        ResolvedAxis {
            config: AxisConfig {
                id,
                scale_type,
                domain,
                range,
                categories: over.categories,
                options,
            },
            scale,
        }
    }

    fn resolve_y_axes(&self, plot_rect: PlotRect) -> IndexMap<AxisId, ResolvedAxis> {
        // y pixel range is inverted: data origin at the bottom.
        let range = (plot_rect.bottom(), plot_rect.y);

        let mut ids: Vec<AxisId> = vec![AxisId::default_y()];
        for id in self.y_overrides.keys() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }

        let mut axes = IndexMap::new();
        for id in ids {
            let over = self.y_overrides.get(&id).cloned().unwrap_or_default();
            let scale_type = over.scale_type.unwrap_or(ScaleType::Linear);
            let options = over.options.unwrap_or(self.scale_options);

            let domain = if !plot_rect.is_drawable() {
                None
            } else {
                over.domain
                    .map(|(min, max)| ScaleDomain::Continuous { min, max })
                    .or_else(|| {
                        let assigned = self.series_assigned_to_y_axis(&id);
                        continuous_domain_over(&assigned, |point| point.y)
                    })
            };

            let scale = domain.and_then(|domain| resolve_scale(domain, range, scale_type, options));
            axes.insert(
                id.clone(),
                ResolvedAxis {
                    config: AxisConfig {
                        id,
                        scale_type,
                        domain,
                        range,
                        categories: over.categories,
                        options,
                    },
                    scale,
                },
            );
        }
        axes
    }

    /// Series whose y assignment resolves to `axis`. A series naming an
    /// axis that was never configured falls back to the default y axis
    /// rather than failing the chart.
    fn series_assigned_to_y_axis<'a>(&'a self, axis: &AxisId) -> Vec<&'a Series> {
        self.series
            .iter()
            .filter(|series| self.resolved_y_axis_id(series) == *axis)
            .collect()
    }

    pub(super) fn resolved_y_axis_id(&self, series: &Series) -> AxisId {
        match &series.y_axis {
            None => AxisId::default_y(),
            Some(id) if *id == AxisId::default_y() || self.y_overrides.contains_key(id) => {
                id.clone()
            }
            Some(id) => {
                warn!(
                    series = series.id.as_str(),
                    axis = id.as_str(),
                    "series references an unconfigured y axis; using default"
                );
                AxisId::default_y()
            }
        }
    }
}

fn continuous_domain(
    series: &[Series],
    value: impl Fn(&crate::core::SeriesPoint) -> Option<f64>,
) -> Option<ScaleDomain> {
    let refs: Vec<&Series> = series.iter().collect();
    continuous_domain_over(&refs, value)
}

/// Min/max fold across all points of the given series, skipping missing
/// and non-finite samples. `None` when nothing contributes.
fn continuous_domain_over(
    series: &[&Series],
    value: impl Fn(&crate::core::SeriesPoint) -> Option<f64>,
) -> Option<ScaleDomain> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;
    for member in series {
        for point in &member.points {
            if let Some(sample) = value(point).filter(|sample| sample.is_finite()) {
                min = min.min(sample);
                max = max.max(sample);
                seen = true;
            }
        }
    }
    seen.then_some(ScaleDomain::Continuous { min, max })
}

/// Longest point sequence across series; categorical x axes span it.
fn shared_index_count(series: &[Series]) -> usize {
    series
        .iter()
        .map(|member| member.points.len())
        .max()
        .unwrap_or(0)
}
