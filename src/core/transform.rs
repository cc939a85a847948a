use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Direction a transform maps its axis onto the pixel surface.
///
/// `Horizontal` maps `view_min` to pixel 0. `Vertical` maps `view_max` to
/// pixel 0 because screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

/// Tuning controls for window clamping on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTuning {
    /// Smallest data-space span a zoom-in may produce. Attempts to go below
    /// are rejected outright, leaving the window untouched.
    pub min_span: f64,
    /// When true, zooming out stops at the full domain span.
    pub max_span_is_domain: bool,
    /// When true, panning may move the window outside the domain.
    pub unbounded_pan: bool,
}

impl Default for AxisTuning {
    fn default() -> Self {
        Self {
            min_span: 1e-9,
            max_span_is_domain: true,
            unbounded_pan: false,
        }
    }
}

impl AxisTuning {
    fn validate(self) -> PlotResult<Self> {
        if !self.min_span.is_finite() || self.min_span <= 0.0 {
            return Err(PlotError::InvalidData(
                "axis min span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Bidirectional data-space / screen-space mapping for one axis.
///
/// `domain_*` tracks the full extent of available data.
/// `view_*` is the currently visible window, kept non-degenerate
/// (`view_min < view_max`) on every mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    domain_min: f64,
    domain_max: f64,
    view_min: f64,
    view_max: f64,
    pixel_extent: f64,
    orientation: AxisOrientation,
    tuning: AxisTuning,
}

impl AxisTransform {
    /// Creates a transform whose view window covers the full domain.
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        pixel_extent: f64,
        orientation: AxisOrientation,
    ) -> PlotResult<Self> {
        Self::with_tuning(
            domain_min,
            domain_max,
            pixel_extent,
            orientation,
            AxisTuning::default(),
        )
    }

    /// Infallible unit-domain transform used for freshly created graphs
    /// before any data-driven range is known.
    #[must_use]
    pub(crate) fn unit(pixel_extent: f64, orientation: AxisOrientation) -> Self {
        Self {
            domain_min: 0.0,
            domain_max: 1.0,
            view_min: 0.0,
            view_max: 1.0,
            pixel_extent: if pixel_extent.is_finite() && pixel_extent > 0.0 {
                pixel_extent
            } else {
                1.0
            },
            orientation,
            tuning: AxisTuning::default(),
        }
    }

    pub fn with_tuning(
        domain_min: f64,
        domain_max: f64,
        pixel_extent: f64,
        orientation: AxisOrientation,
        tuning: AxisTuning,
    ) -> PlotResult<Self> {
        let tuning = tuning.validate()?;
        let (domain_min, domain_max) = normalize_range(domain_min, domain_max)?;
        validate_pixel_extent(pixel_extent)?;
        Ok(Self {
            domain_min,
            domain_max,
            view_min: domain_min,
            view_max: domain_max,
            pixel_extent,
            orientation,
            tuning,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn view(self) -> (f64, f64) {
        (self.view_min, self.view_max)
    }

    #[must_use]
    pub fn view_span(self) -> f64 {
        self.view_max - self.view_min
    }

    #[must_use]
    pub fn domain_span(self) -> f64 {
        self.domain_max - self.domain_min
    }

    #[must_use]
    pub fn pixel_extent(self) -> f64 {
        self.pixel_extent
    }

    #[must_use]
    pub fn orientation(self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn tuning(self) -> AxisTuning {
        self.tuning
    }

    pub fn set_tuning(&mut self, tuning: AxisTuning) -> PlotResult<()> {
        self.tuning = tuning.validate()?;
        Ok(())
    }

    /// Maps a data value to a pixel coordinate under the current view window.
    #[must_use]
    pub fn to_screen(self, value: f64) -> f64 {
        let span = self.view_span();
        match self.orientation {
            AxisOrientation::Horizontal => (value - self.view_min) / span * self.pixel_extent,
            AxisOrientation::Vertical => (self.view_max - value) / span * self.pixel_extent,
        }
    }

    /// Maps a pixel coordinate back to a data value. Exact inverse of
    /// `to_screen` within floating-point tolerance.
    #[must_use]
    pub fn to_data(self, pixel: f64) -> f64 {
        let span = self.view_span();
        let normalized = pixel / self.pixel_extent;
        match self.orientation {
            AxisOrientation::Horizontal => self.view_min + normalized * span,
            AxisOrientation::Vertical => self.view_max - normalized * span,
        }
    }

    /// Shifts the view window by the data-space equivalent of `delta_pixels`.
    ///
    /// Returns `true` when the window actually moved. Clamped to the domain
    /// unless `unbounded_pan` is set; a fully clamped pan returns `false`.
    pub fn pan(&mut self, delta_pixels: f64) -> bool {
        if !delta_pixels.is_finite() {
            return false;
        }
        let per_pixel = self.view_span() / self.pixel_extent;
        let shift = match self.orientation {
            AxisOrientation::Horizontal => delta_pixels * per_pixel,
            AxisOrientation::Vertical => -delta_pixels * per_pixel,
        };
        self.set_view(self.view_min + shift, self.view_max + shift)
    }

    /// Assigns the view window directly, clamping into the domain.
    ///
    /// The window is translated back inside the domain without shrinking, so
    /// repeated cumulative assignments (drag-pan) stay drift-free. Returns
    /// `true` when the stored window changed. Degenerate or non-finite
    /// requests are rejected without touching state.
    pub fn set_view(&mut self, view_min: f64, view_max: f64) -> bool {
        if !view_min.is_finite() || !view_max.is_finite() || view_max <= view_min {
            return false;
        }

        let (mut new_min, mut new_max) = (view_min, view_max);
        if !self.tuning.unbounded_pan {
            let span = new_max - new_min;
            if span >= self.domain_span() {
                if self.tuning.max_span_is_domain {
                    new_min = self.domain_min;
                    new_max = self.domain_max;
                } else if new_min > self.domain_min {
                    let shift = new_min - self.domain_min;
                    new_min -= shift;
                    new_max -= shift;
                } else if new_max < self.domain_max {
                    let shift = self.domain_max - new_max;
                    new_min += shift;
                    new_max += shift;
                }
            } else if new_min < self.domain_min {
                let shift = self.domain_min - new_min;
                new_min += shift;
                new_max += shift;
            } else if new_max > self.domain_max {
                let shift = new_max - self.domain_max;
                new_min -= shift;
                new_max -= shift;
            }
        }

        if new_min == self.view_min && new_max == self.view_max {
            return false;
        }
        self.view_min = new_min;
        self.view_max = new_max;
        true
    }

    /// Rescales the view window around the data value under `anchor_pixel`.
    ///
    /// `factor > 1` zooms in (narrower window), `0 < factor < 1` zooms out.
    /// The anchor pixel is clamped into `[0, pixel_extent]`; the data value
    /// under it stays fixed on screen. A zoom-in that would drop the span
    /// below `min_span` is rejected as an exact no-op. Zooming out clamps at
    /// the full domain when `max_span_is_domain`.
    pub fn zoom(&mut self, anchor_pixel: f64, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let anchor_pixel = if anchor_pixel.is_finite() {
            anchor_pixel.clamp(0.0, self.pixel_extent)
        } else {
            self.pixel_extent / 2.0
        };

        let current_span = self.view_span();
        let mut target_span = current_span / factor;
        if target_span < self.tuning.min_span {
            return false;
        }
        if self.tuning.max_span_is_domain && !self.tuning.unbounded_pan {
            target_span = target_span.min(self.domain_span());
        }
        if target_span == current_span {
            return false;
        }

        let anchor_value = self.to_data(anchor_pixel);
        let left_ratio = (anchor_value - self.view_min) / current_span;
        let new_min = anchor_value - left_ratio * target_span;
        self.set_view(new_min, new_min + target_span)
    }

    /// Updates the pixel extent only. The visible data window is unchanged,
    /// so the same data is drawn at a different visual scale.
    pub fn resize(&mut self, new_pixel_extent: f64) -> PlotResult<()> {
        validate_pixel_extent(new_pixel_extent)?;
        self.pixel_extent = new_pixel_extent;
        Ok(())
    }

    /// Grows the domain to the union with `[min, max]`. Never contracts.
    ///
    /// A view that covered the full domain keeps covering it after the
    /// expansion; any narrower view is left untouched.
    pub fn expand_domain(&mut self, min: f64, max: f64) -> PlotResult<()> {
        let (min, max) = normalize_range(min, max)?;
        let was_full = self.is_view_full_domain();
        self.domain_min = self.domain_min.min(min);
        self.domain_max = self.domain_max.max(max);
        if was_full {
            self.reset_view();
        }
        Ok(())
    }

    /// Replaces the domain outright and resets the view to cover it.
    pub fn reset_domain(&mut self, min: f64, max: f64) -> PlotResult<()> {
        let (min, max) = normalize_range(min, max)?;
        self.domain_min = min;
        self.domain_max = max;
        self.reset_view();
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.view_min = self.domain_min;
        self.view_max = self.domain_max;
    }

    #[must_use]
    pub fn is_view_full_domain(self) -> bool {
        let tol = self.domain_span().abs().max(1.0) * 1e-12;
        (self.view_min - self.domain_min).abs() <= tol
            && (self.view_max - self.domain_max).abs() <= tol
    }
}

fn validate_pixel_extent(extent: f64) -> PlotResult<()> {
    if !extent.is_finite() || extent <= 0.0 {
        return Err(PlotError::InvalidPixelExtent { extent });
    }
    Ok(())
}

/// Orders a range and widens an empty one to a unit span.
fn normalize_range(start: f64, end: f64) -> PlotResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(PlotError::InvalidData(
            "axis range must be finite".to_owned(),
        ));
    }
    if start == end {
        return Ok((start - 0.5, end + 0.5));
    }
    Ok((start.min(end), start.max(end)))
}
