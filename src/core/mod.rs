pub mod category;
pub mod scale;
pub mod stack;
pub mod types;

pub use category::{BandScale, PointScale};
pub use scale::{DomainLimit, LinearScale, Scale, ScaleDomain, ScaleOptions, ScaleType, resolve_scale};
pub use stack::{StackSpan, StackedSeriesData, compute_stacked_series_data};
pub use types::{
    AxisId, Insets, PixelPoint, PlotRect, PlotSize, Series, SeriesId, SeriesPoint, StackId,
    datetime_to_unix_seconds,
};
