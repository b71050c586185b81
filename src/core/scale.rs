use serde::{Deserialize, Serialize};

use crate::core::category::{BandScale, PointScale};
use crate::error::{ChartError, ChartResult};

/// Mapping family requested for an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleType {
    /// Continuous, invertible linear mapping.
    #[default]
    Linear,
    /// Categorical bands with fractional gaps.
    Band,
    /// Categorical points without band width.
    Point,
}

/// Whether a continuous domain may be rounded outward to tick-friendly
/// bounds. Rounding is only ever outward; the nice domain is a superset of
/// the data domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DomainLimit {
    Nice,
    #[default]
    Strict,
}

/// Resolver options shared by all scale types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    /// Fractional gap between categorical bands, in band-step units.
    pub category_padding: f64,
    pub domain_limit: DomainLimit,
    /// Tick count the nice-domain rounding is computed against.
    pub nice_tick_count: usize,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            category_padding: 0.2,
            domain_limit: DomainLimit::Strict,
            nice_tick_count: 5,
        }
    }
}

impl ScaleOptions {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.category_padding.is_finite()
            || self.category_padding < 0.0
            || self.category_padding >= 1.0
        {
            return Err(ChartError::InvalidConfig(
                "category padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        if self.nice_tick_count == 0 {
            return Err(ChartError::InvalidConfig(
                "nice tick count must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Data-side extent handed to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScaleDomain {
    Continuous { min: f64, max: f64 },
    /// Ordered category domain, identified by index count. Category labels
    /// live on the axis config, not on the scale.
    Discrete { len: usize },
}

/// A resolved bidirectional mapping between data and pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Linear(LinearScale),
    Band(BandScale),
    Point(PointScale),
}

impl Scale {
    #[must_use]
    pub fn as_linear(&self) -> Option<&LinearScale> {
        match self {
            Self::Linear(scale) => Some(scale),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(scale) => Some(scale),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_point(&self) -> Option<&PointScale> {
        match self {
            Self::Point(scale) => Some(scale),
            _ => None,
        }
    }

    /// Pixel position of a categorical index, at the band center for band
    /// scales. `None` for continuous scales or out-of-range indices.
    #[must_use]
    pub fn position_of_index(&self, index: usize) -> Option<f64> {
        match self {
            Self::Linear(_) => None,
            Self::Band(scale) => scale.center(index),
            Self::Point(scale) => scale.position(index),
        }
    }

    /// Pixel position of a continuous data value. `None` for categorical
    /// scales.
    #[must_use]
    pub fn position_of_value(&self, value: f64) -> Option<f64> {
        match self {
            Self::Linear(scale) => Some(scale.position(value)),
            Self::Band(_) | Self::Point(_) => None,
        }
    }
}

/// Resolves a scale, or `None` when the inputs cannot project yet.
///
/// Degenerate inputs (zero-width range, collapsed or empty domain,
/// non-finite bounds) are not errors: callers are required to treat `None`
/// as "skip this render".
#[must_use]
pub fn resolve_scale(
    domain: ScaleDomain,
    range: (f64, f64),
    scale_type: ScaleType,
    options: ScaleOptions,
) -> Option<Scale> {
    match (scale_type, domain) {
        (ScaleType::Linear, ScaleDomain::Continuous { min, max }) => {
            let scale = match options.domain_limit {
                DomainLimit::Nice => {
                    LinearScale::new((min, max), range)?.nice(options.nice_tick_count)
                }
                DomainLimit::Strict => LinearScale::new((min, max), range)?,
            };
            Some(Scale::Linear(scale))
        }
        (ScaleType::Band, ScaleDomain::Discrete { len }) => {
            BandScale::new(range, len, options.category_padding).map(Scale::Band)
        }
        (ScaleType::Point, ScaleDomain::Discrete { len }) => {
            PointScale::new(range, len).map(Scale::Point)
        }
        // A categorical type over a continuous domain (or vice versa)
        // cannot project; the coordinator never builds this pairing.
        _ => None,
    }
}

/// Continuous linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// `None` when domain or range is non-finite or has zero span.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Option<Self> {
        let finite = domain.0.is_finite()
            && domain.1.is_finite()
            && range.0.is_finite()
            && range.1.is_finite();
        if !finite || domain.0 == domain.1 || range.0 == range.1 {
            return None;
        }
        Some(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    /// Maps a data value to a pixel coordinate.
    #[must_use]
    pub fn position(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Maps a pixel coordinate back to a data value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Expands the domain outward to 1/2/5-ladder boundaries sized for
    /// `tick_count` ticks. Never rounds inward.
    #[must_use]
    pub fn nice(self, tick_count: usize) -> Self {
        let (mut min, mut max) = self.domain;
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        let step = nice_step((max - min) / tick_count.max(1) as f64);
        if step <= 0.0 {
            return self;
        }
        let nice_min = (min / step).floor() * step;
        let nice_max = (max / step).ceil() * step;
        if nice_min == nice_max {
            return self;
        }
        let domain = if self.domain.0 <= self.domain.1 {
            (nice_min, nice_max)
        } else {
            (nice_max, nice_min)
        };
        Self {
            domain,
            range: self.range,
        }
    }

    /// Tick values on the same 1/2/5 ladder the nice rounding uses.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if count == 0 {
            return Vec::new();
        }
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        let step = nice_step((max - min) / count.max(1) as f64);
        if step <= 0.0 {
            return vec![min, max];
        }
        let start = (min / step).ceil() * step;
        let mut ticks = Vec::new();
        let mut index = 0_u32;
        loop {
            let tick = start + step * f64::from(index);
            if tick > max + step * 1e-9 || index > 10_000 {
                break;
            }
            ticks.push(tick);
            index += 1;
        }
        ticks
    }
}

/// Rounds a raw step up to the nearest 1/2/5 decade multiple.
fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
