use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Series, SeriesId, StackId};

/// Cumulative `[bottom, top]` band for one series at one category index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackSpan {
    pub bottom: f64,
    pub top: f64,
}

impl StackSpan {
    /// The series' own contribution at this index.
    #[must_use]
    pub fn value(self) -> f64 {
        self.top - self.bottom
    }
}

/// Stacked bands per series id, one entry per shared category index.
///
/// Insertion order matches first-seen order of the input slice, which is
/// also the visual stacking order.
pub type StackedSeriesData = IndexMap<SeriesId, Vec<Option<StackSpan>>>;

/// Converts stack-grouped series into cumulative bands.
///
/// Series without a `stack` key are excluded from the output entirely.
/// Members of a group are aligned by positional index, not by x value;
/// index-misaligned members therefore produce misleading but non-crashing
/// stacks. A missing sample contributes a `None` band and leaves the
/// running total untouched for the series above it.
#[must_use]
pub fn compute_stacked_series_data(series: &[Series]) -> StackedSeriesData {
    let mut groups: IndexMap<&StackId, Vec<&Series>> = IndexMap::new();
    for member in series {
        if let Some(stack) = &member.stack {
            groups.entry(stack).or_default().push(member);
        }
    }

    let mut stacked = StackedSeriesData::new();
    for members in groups.values() {
        let index_count = members
            .iter()
            .map(|member| member.points.len())
            .max()
            .unwrap_or(0);
        let mut running = vec![0.0_f64; index_count];

        for member in members {
            let mut spans = Vec::with_capacity(index_count);
            for index in 0..index_count {
                let value = member
                    .points
                    .get(index)
                    .and_then(|point| point.y)
                    .filter(|value| value.is_finite());
                match value {
                    Some(value) => {
                        let bottom = running[index];
                        running[index] += value;
                        spans.push(Some(StackSpan {
                            bottom,
                            top: bottom + value,
                        }));
                    }
                    None => spans.push(None),
                }
            }
            stacked.insert(member.id.clone(), spans);
        }
    }

    stacked
}
