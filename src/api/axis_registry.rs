use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::AxisId;
use crate::error::{ChartError, ChartResult};

/// Orientation of a registered axis decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
}

/// Which side of the plot the decoration claims space on: `Start` is
/// left for y axes and top for x axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisEdge {
    Start,
    End,
}

/// Space claim made by an axis-rendering child before any axis content
/// is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredAxis {
    pub id: AxisId,
    pub kind: AxisKind,
    pub edge: AxisEdge,
    /// Thickness in pixels, perpendicular to the plot edge.
    pub size: f64,
}

/// Shared registry of axis decorations, keyed by id.
///
/// Each decoration owns exactly its own entry; register and unregister
/// are the only mutation entry points, and unregistration must mirror
/// registration so unmounted decorations cannot leak padding. All layout
/// reads are pure folds over the current snapshot, ordered by id rather
/// than by arrival, so mount order never changes the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisRegistry {
    entries: IndexMap<AxisId, RegisteredAxis>,
}

impl AxisRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a decoration, replacing any previous claim under the
    /// same id.
    pub fn register(&mut self, axis: RegisteredAxis) -> ChartResult<()> {
        if !axis.size.is_finite() || axis.size < 0.0 {
            return Err(ChartError::InvalidConfig(
                "registered axis size must be finite and >= 0".to_owned(),
            ));
        }
        if self.entries.insert(axis.id.clone(), axis).is_some() {
            debug!("axis re-registered; previous claim replaced");
        }
        Ok(())
    }

    /// Removes a decoration's claim. Returns `false` when the id was not
    /// registered.
    pub fn unregister(&mut self, id: &AxisId) -> bool {
        self.entries.shift_remove(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &AxisId) -> Option<&RegisteredAxis> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAxis> {
        self.entries.values()
    }

    /// Total padding claimed on one side of the plot.
    #[must_use]
    pub fn edge_padding(&self, kind: AxisKind, edge: AxisEdge) -> f64 {
        self.group_sorted(kind, edge)
            .into_iter()
            .map(|axis| axis.size)
            .sum()
    }

    /// Offset of a decoration inside its `(kind, edge)` group: the
    /// cumulative size of siblings that sort before it by id.
    #[must_use]
    pub fn offset_within_group(&self, id: &AxisId) -> Option<f64> {
        let target = self.entries.get(id)?;
        let mut offset = 0.0;
        for axis in self.group_sorted(target.kind, target.edge) {
            if axis.id == *id {
                return Some(offset);
            }
            offset += axis.size;
        }
        None
    }

    fn group_sorted(&self, kind: AxisKind, edge: AxisEdge) -> Vec<&RegisteredAxis> {
        let mut group: Vec<&RegisteredAxis> = self
            .entries
            .values()
            .filter(|axis| axis.kind == kind && axis.edge == edge)
            .collect();
        group.sort_by(|left, right| left.id.cmp(&right.id));
        group
    }
}
