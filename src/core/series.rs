use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// One data point: an ordered x position and a numeric y value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a sample whose x position is a UTC instant in unix seconds.
    #[must_use]
    pub fn at_datetime(time: DateTime<Utc>, y: f64) -> Self {
        Self {
            x: datetime_to_unix_seconds(time),
            y,
        }
    }
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Named, immutable sequence of samples ordered by x.
///
/// A series is never mutated after construction. Replacing data means
/// swapping the `Arc<Series>` held by the owner, so an in-flight render pass
/// sees either the old sequence or the new one in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    samples: Vec<Sample>,
}

impl Series {
    /// Validates ordering and finiteness. Duplicate x positions are allowed
    /// and kept as distinct points.
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> PlotResult<Self> {
        for sample in &samples {
            if !sample.x.is_finite() || !sample.y.is_finite() {
                return Err(PlotError::InvalidData(
                    "series samples must be finite".to_owned(),
                ));
            }
        }
        for pair in samples.windows(2) {
            if pair[1].x < pair[0].x {
                return Err(PlotError::InvalidData(
                    "series samples must be ordered by x".to_owned(),
                ));
            }
        }
        Ok(Self {
            name: name.into(),
            samples,
        })
    }

    /// Convenience constructor that sorts the input by x first.
    pub fn from_unordered(name: impl Into<String>, mut samples: Vec<Sample>) -> PlotResult<Self> {
        samples.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self::new(name, samples)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Full x extent, `None` when the series is empty.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.x, last.x)),
            _ => None,
        }
    }

    /// Min/max of y over samples whose x lies in the inclusive window.
    #[must_use]
    pub fn y_extent_in_window(&self, start: f64, end: f64) -> Option<(f64, f64)> {
        let (start, end) = ordered(start, end);
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for sample in &self.samples {
            if sample.x >= start && sample.x <= end {
                min = min.min(sample.y);
                max = max.max(sample.y);
            }
        }
        (min <= max).then_some((min, max))
    }

    /// Min/max of y over the whole series.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for sample in &self.samples {
            min = min.min(sample.y);
            max = max.max(sample.y);
        }
        (min <= max).then_some((min, max))
    }

    /// Index range of samples inside the window, widened by one sample on
    /// each side so connected lines do not visibly truncate at the viewport
    /// edge.
    #[must_use]
    pub fn index_window_padded(&self, start: f64, end: f64) -> Range<usize> {
        let (start, end) = ordered(start, end);
        let lower = self.samples.partition_point(|s| s.x < start);
        let upper = self.samples.partition_point(|s| s.x <= end);
        lower.saturating_sub(1)..(upper + 1).min(self.samples.len())
    }

    /// Samples strictly inside the inclusive window.
    #[must_use]
    pub fn samples_in_window(&self, start: f64, end: f64) -> &[Sample] {
        let (start, end) = ordered(start, end);
        let lower = self.samples.partition_point(|s| s.x < start);
        let upper = self.samples.partition_point(|s| s.x <= end);
        &self.samples[lower..upper]
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
