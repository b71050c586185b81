use serde::{Deserialize, Serialize};

/// Categorical scale partitioning a pixel range into evenly sized bands
/// with a fractional gap between them.
///
/// With `n` categories over span `W` the step is `W / n`; each band is
/// `step * (1 - padding)` wide, centered in its step, so all bandwidths
/// plus the gaps between and around them sum back to `W`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    range: (f64, f64),
    len: usize,
    padding: f64,
}

impl BandScale {
    /// `None` when the domain is empty or the range cannot host bands.
    #[must_use]
    pub fn new(range: (f64, f64), len: usize, padding: f64) -> Option<Self> {
        if len == 0 || !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
            return None;
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return None;
        }
        Some(Self {
            range,
            len,
            padding,
        })
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    fn step(self) -> f64 {
        let (r0, r1) = self.range;
        (r1 - r0).abs() / self.len as f64
    }

    fn start(self) -> f64 {
        self.range.0.min(self.range.1)
    }

    /// Pixel width of one band.
    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Leading edge of the band at `index`.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        if index >= self.len {
            return None;
        }
        let step = self.step();
        Some(self.start() + step * index as f64 + step * self.padding / 2.0)
    }

    /// Center of the band at `index`; the scrubber snaps to these.
    #[must_use]
    pub fn center(self, index: usize) -> Option<f64> {
        Some(self.position(index)? + self.bandwidth() / 2.0)
    }
}

/// Categorical scale placing zero-width points with half-step outer
/// padding, for line/point marks over category axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointScale {
    range: (f64, f64),
    len: usize,
}

impl PointScale {
    #[must_use]
    pub fn new(range: (f64, f64), len: usize) -> Option<Self> {
        if len == 0 || !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
            return None;
        }
        Some(Self { range, len })
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    /// Pixel position of the point at `index`.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        if index >= self.len {
            return None;
        }
        let (r0, r1) = self.range;
        let start = r0.min(r1);
        let span = (r1 - r0).abs();
        let step = span / self.len as f64;
        Some(start + step / 2.0 + step * index as f64)
    }
}
