//! Statistical summary computation for summary graphs.
//!
//! Everything here is a pure function of its inputs: identical samples and
//! bucketing always produce bit-identical bands, and no state is cached
//! between calls. Callers decide when to recompute and swap the result in
//! wholesale.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::Series;
use crate::error::{PlotError, PlotResult};

/// Percentile ranks (in percent) computed for every bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileSpec {
    ranks: SmallVec<[f64; 4]>,
}

impl Default for PercentileSpec {
    fn default() -> Self {
        Self {
            ranks: smallvec![10.0, 25.0, 75.0, 90.0],
        }
    }
}

impl PercentileSpec {
    /// Ranks must be finite, within `[0, 100]`, and strictly ascending.
    pub fn new(ranks: impl IntoIterator<Item = f64>) -> PlotResult<Self> {
        let ranks: SmallVec<[f64; 4]> = ranks.into_iter().collect();
        for rank in &ranks {
            if !rank.is_finite() || !(0.0..=100.0).contains(rank) {
                return Err(PlotError::InvalidData(
                    "percentile ranks must be finite and in [0, 100]".to_owned(),
                ));
            }
        }
        for pair in ranks.windows(2) {
            if pair[1] <= pair[0] {
                return Err(PlotError::InvalidData(
                    "percentile ranks must be strictly ascending".to_owned(),
                ));
            }
        }
        Ok(Self { ranks })
    }

    #[must_use]
    pub fn ranks(&self) -> &[f64] {
        &self.ranks
    }
}

/// How raw samples are grouped before summarization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bucketing {
    /// Group by fixed data-space intervals of `width` starting at `origin`.
    FixedWidth { width: f64, origin: f64 },
}

impl Bucketing {
    fn validate(self) -> PlotResult<Self> {
        match self {
            Self::FixedWidth { width, origin } => {
                if !width.is_finite() || width <= 0.0 {
                    return Err(PlotError::InvalidData(
                        "bucket width must be finite and > 0".to_owned(),
                    ));
                }
                if !origin.is_finite() {
                    return Err(PlotError::InvalidData(
                        "bucket origin must be finite".to_owned(),
                    ));
                }
                Ok(self)
            }
        }
    }
}

/// Derived summary statistics for one bucket of samples.
///
/// Bands are replaced wholesale on recomputation, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryBand {
    /// Data-space center of the bucket on the x axis.
    pub x_center: f64,
    /// Data-space width of the bucket.
    pub width: f64,
    /// Optional categorical label, set for labeled bucketing.
    pub label: Option<String>,
    pub sample_count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// `(rank, value)` pairs in the order given by the `PercentileSpec`.
    pub percentiles: SmallVec<[(f64, f64); 4]>,
}

/// Summarizes a series into per-bucket bands.
///
/// Buckets with no samples produce no entry. The output depends only on the
/// multiset of samples per bucket, never on their arrival order.
pub fn compute_summary(
    series: &Series,
    bucketing: Bucketing,
    spec: &PercentileSpec,
) -> PlotResult<Vec<SummaryBand>> {
    let Bucketing::FixedWidth { width, origin } = bucketing.validate()?;

    let mut buckets: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for sample in series.samples() {
        let index = ((sample.x - origin) / width).floor() as i64;
        buckets.entry(index).or_default().push(sample.y);
    }

    let bands = buckets
        .into_iter()
        .filter_map(|(index, values)| {
            let x_center = origin + (index as f64 + 0.5) * width;
            summarize_values(x_center, width, None, &values, spec)
        })
        .collect();
    Ok(bands)
}

/// Summarizes explicit per-label value groups, one band per label.
///
/// Bands are laid out one data-space unit apart, centered at `i + 0.5`, so a
/// labeled summary graph spans `[0, groups.len()]` on the x axis. Empty
/// groups are skipped without leaving a gap in the statistics, matching the
/// treatment of empty fixed-width buckets.
pub fn summarize_labeled(
    groups: &[(String, Vec<f64>)],
    spec: &PercentileSpec,
) -> Vec<SummaryBand> {
    groups
        .iter()
        .enumerate()
        .filter_map(|(i, (label, values))| {
            summarize_values(i as f64 + 0.5, 0.6, Some(label.clone()), values, spec)
        })
        .collect()
}

/// Computes one band from a raw value set. Returns `None` when no finite
/// values remain, never a degenerate zero-valued band.
#[must_use]
pub fn summarize_values(
    x_center: f64,
    width: f64,
    label: Option<String>,
    values: &[f64],
    spec: &PercentileSpec,
) -> Option<SummaryBand> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable_by_key(|v| OrderedFloat(*v));

    let n = sorted.len();
    // Summing in sorted order keeps the mean identical across input
    // permutations of the same value multiset.
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let percentiles = spec
        .ranks()
        .iter()
        .map(|&rank| (rank, percentile_of_sorted(&sorted, rank)))
        .collect();

    Some(SummaryBand {
        x_center,
        width,
        label,
        sample_count: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median: percentile_of_sorted(&sorted, 50.0),
        percentiles,
    })
}

/// Rank-based percentile with linear interpolation between order statistics.
///
/// `rank` is in percent; the continuous index is `rank / 100 * (n - 1)`.
fn percentile_of_sorted(sorted: &[f64], rank: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let position = rank / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
