use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{LinearScale, PixelPoint, Scale, SeriesId};
use crate::interaction::ScrubSample;

use super::ChartSession;

/// Visible x spans at or under two days format hover labels as time of
/// day instead of calendar dates.
const INTRADAY_SPAN_SECONDS: f64 = 2.0 * 86_400.0;

impl<'a> ChartSession<'a> {
    /// Resolves a pointer/keyboard pixel position to the nearest data
    /// index.
    ///
    /// Categorical x axes snap to the nearest band center; continuous
    /// axes scan the backing data when any series carries points, and
    /// fall back to inverting the scale when none does. Ties resolve to
    /// the lowest index.
    #[must_use]
    pub fn data_index_from_x(&self, pixel_x: f64) -> Option<usize> {
        if !pixel_x.is_finite() || !self.plot_rect().is_drawable() {
            return None;
        }
        match self.x_scale()? {
            Scale::Band(band) => nearest_position(
                (0..band.len()).filter_map(|index| Some((index, band.center(index)?))),
                pixel_x,
            ),
            Scale::Point(point) => nearest_position(
                (0..point.len()).filter_map(|index| Some((index, point.position(index)?))),
                pixel_x,
            ),
            Scale::Linear(linear) => {
                if let Some(index) = self.nearest_backed_index(*linear, pixel_x) {
                    return Some(index);
                }
                // No discrete backing data: invert the pixel directly.
                let (d0, d1) = linear.domain();
                let value = linear
                    .invert(pixel_x)
                    .round()
                    .clamp(d0.min(d1), d0.max(d1));
                Some(value.max(0.0) as usize)
            }
        }
    }

    /// Best candidate per series, then the overall winner. Ties keep the
    /// earliest series and the lowest index within it.
    fn nearest_backed_index(
        &self,
        linear: LinearScale,
        pixel_x: f64,
    ) -> Option<usize> {
        let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 4]> = SmallVec::new();
        for series in self.series() {
            let best = series
                .points
                .iter()
                .enumerate()
                .map(|(index, point)| {
                    (
                        OrderedFloat((linear.position(point.x) - pixel_x).abs()),
                        index,
                    )
                })
                .min_by_key(|(distance, _)| *distance);
            if let Some(best) = best {
                candidates.push(best);
            }
        }
        candidates
            .into_iter()
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, index)| index)
    }

    /// Pixel x the indicator line and its mask snap to for a resolved
    /// index; falls back to the raw pointer position when the index has
    /// no projectable x.
    #[must_use]
    pub fn indicator_position(&self, index: usize, fallback_x: f64) -> f64 {
        let snapped = match self.x_scale() {
            Some(Scale::Band(band)) => band.center(index),
            Some(Scale::Point(point)) => point.position(index),
            Some(Scale::Linear(linear)) => self
                .series()
                .iter()
                .find_map(|series| series.points.get(index))
                .map(|point| linear.position(point.x)),
            None => None,
        };
        snapped.unwrap_or(fallback_x)
    }

    /// Sample and projected position for every series at `index`.
    #[must_use]
    pub fn scrub_samples(&self, index: usize) -> Vec<ScrubSample> {
        self.series()
            .iter()
            .map(|series| ScrubSample {
                series: series.id.clone(),
                point: series.points.get(index).copied(),
                pixel: self.projected_point(&series.id, index),
            })
            .collect()
    }

    /// Projects a single series index; the same mapping as
    /// [`projected_points`](Self::projected_points) without materializing
    /// the whole series.
    #[must_use]
    pub fn projected_point(&self, id: &SeriesId, index: usize) -> Option<PixelPoint> {
        let points = self.projected_points(id)?;
        points.get(index).copied().flatten()
    }

    /// Whether hover-date labels should render time of day.
    #[must_use]
    pub fn is_intraday(&self) -> bool {
        match self.x_scale() {
            Some(Scale::Linear(linear)) => {
                let (d0, d1) = linear.domain();
                (d1 - d0).abs() <= INTRADAY_SPAN_SECONDS
            }
            _ => false,
        }
    }
}

fn nearest_position(
    positions: impl Iterator<Item = (usize, f64)>,
    pixel_x: f64,
) -> Option<usize> {
    positions
        .map(|(index, center)| (OrderedFloat((center - pixel_x).abs()), index))
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, index)| index)
}
