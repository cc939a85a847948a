use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::series::Series;
use crate::core::viewport::Viewport;
use crate::render::{
    BandPrimitive, Color, LayerPrimitives, MarkerPrimitive, MarkerShape, PolylinePrimitive,
    RectPrimitive, TextHAlign, TextPrimitive, TickEdge, TickPrimitive,
};
use crate::summary::SummaryBand;

/// Style for a line layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub stroke_width: f64,
    /// Marker drawn on every visible sample when set.
    pub marker: Option<(MarkerShape, f64)>,
    /// Fills the area between the line and the bottom of the plot when set.
    pub fill: Option<Color>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.12, 0.35, 0.80),
            stroke_width: 1.5,
            marker: None,
            fill: None,
        }
    }
}

/// Style for a bar layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarStyle {
    pub fill: Color,
    pub edge: Option<(f64, Color)>,
    /// Bar width in data-space units.
    pub bar_width: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(0.12, 0.35, 0.80, 0.7),
            edge: Some((0.5, Color::rgb(0.0, 0.0, 0.0))),
            bar_width: 0.8,
        }
    }
}

/// Style for a summary-band layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStyle {
    pub box_fill: Color,
    pub whisker_color: Color,
    pub median_color: Color,
    pub mean_color: Color,
    pub whisker_width: f64,
    pub median_width: f64,
    pub mean_marker_size: f64,
    pub show_minmax: bool,
    pub show_percentiles: bool,
    pub show_median: bool,
    pub show_mean: bool,
}

impl Default for SummaryStyle {
    fn default() -> Self {
        Self {
            box_fill: Color::rgba(0.60, 0.78, 0.91, 0.7),
            whisker_color: Color::rgb(0.5, 0.5, 0.5),
            median_color: Color::rgb(0.0, 0.0, 0.0),
            mean_color: Color::rgb(0.0, 0.0, 0.55),
            whisker_width: 1.0,
            median_width: 2.0,
            mean_marker_size: 6.0,
            show_minmax: true,
            show_percentiles: true,
            show_median: true,
            show_mean: true,
        }
    }
}

/// Style for a grid/axis overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub line_color: Color,
    pub tick_color: Color,
    pub label_color: Color,
    pub tick_length_px: f64,
    pub font_size_px: f64,
    /// Rough number of ticks to aim for on each axis.
    pub target_tick_count: usize,
    pub show_grid_lines: bool,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            line_color: Color::rgba(0.0, 0.0, 0.0, 0.12),
            tick_color: Color::rgb(0.25, 0.25, 0.25),
            label_color: Color::rgb(0.25, 0.25, 0.25),
            tick_length_px: 5.0,
            font_size_px: 11.0,
            target_tick_count: 6,
            show_grid_lines: true,
        }
    }
}

/// Line layer: connects consecutive samples of one series.
#[derive(Debug, Clone)]
pub struct LineLayer {
    pub series: Arc<Series>,
    pub style: LineStyle,
}

/// Bar layer: one rectangle per sample, rising from the zero baseline.
#[derive(Debug, Clone)]
pub struct BarLayer {
    pub series: Arc<Series>,
    pub style: BarStyle,
}

/// Summary layer: box/whisker-like glyph per precomputed band.
#[derive(Debug, Clone)]
pub struct SummaryLayer {
    pub bands: Arc<Vec<SummaryBand>>,
    pub style: SummaryStyle,
}

/// Grid layer: axis ticks, labels, and optional grid lines.
#[derive(Debug, Clone)]
pub struct GridLayer {
    pub style: GridStyle,
}

/// A single renderable contribution to a graph.
///
/// The set of kinds is closed on purpose: a new chart kind is added here and
/// handled in every match below, rather than through open-ended subclassing.
#[derive(Debug, Clone)]
pub enum Layer {
    Line(LineLayer),
    Bar(BarLayer),
    Summary(SummaryLayer),
    Grid(GridLayer),
}

impl Layer {
    #[must_use]
    pub fn line(series: Arc<Series>, style: LineStyle) -> Self {
        Self::Line(LineLayer { series, style })
    }

    #[must_use]
    pub fn bar(series: Arc<Series>, style: BarStyle) -> Self {
        Self::Bar(BarLayer { series, style })
    }

    #[must_use]
    pub fn summary(bands: Arc<Vec<SummaryBand>>, style: SummaryStyle) -> Self {
        Self::Summary(SummaryLayer { bands, style })
    }

    #[must_use]
    pub fn grid(style: GridStyle) -> Self {
        Self::Grid(GridLayer { style })
    }

    /// Series carried by this layer, when it carries one.
    #[must_use]
    pub fn series(&self) -> Option<&Arc<Series>> {
        match self {
            Self::Line(layer) => Some(&layer.series),
            Self::Bar(layer) => Some(&layer.series),
            Self::Summary(_) | Self::Grid(_) => None,
        }
    }

    /// Swaps the series reference. Returns `false` for kinds without one.
    pub fn set_series(&mut self, series: Arc<Series>) -> bool {
        match self {
            Self::Line(layer) => {
                layer.series = series;
                true
            }
            Self::Bar(layer) => {
                layer.series = series;
                true
            }
            Self::Summary(_) | Self::Grid(_) => false,
        }
    }

    /// Replaces the derived bands of a summary layer wholesale.
    pub fn set_bands(&mut self, bands: Arc<Vec<SummaryBand>>) -> bool {
        match self {
            Self::Summary(layer) => {
                layer.bands = bands;
                true
            }
            _ => false,
        }
    }

    /// Full data-space x extent of this layer's data.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Line(layer) => layer.series.x_extent(),
            Self::Bar(layer) => layer.series.x_extent().map(|(min, max)| {
                let half = layer.style.bar_width / 2.0;
                (min - half, max + half)
            }),
            Self::Summary(layer) => {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for band in layer.bands.iter() {
                    min = min.min(band.x_center - band.width / 2.0);
                    max = max.max(band.x_center + band.width / 2.0);
                }
                (min <= max).then_some((min, max))
            }
            Self::Grid(_) => None,
        }
    }

    /// Y extent of data whose x falls inside the window. Bar layers always
    /// include the zero baseline; summary layers span min..max of
    /// intersecting bands.
    #[must_use]
    pub fn y_extent_in_window(&self, start: f64, end: f64) -> Option<(f64, f64)> {
        match self {
            Self::Line(layer) => layer.series.y_extent_in_window(start, end),
            Self::Bar(layer) => layer
                .series
                .y_extent_in_window(start, end)
                .map(|(min, max)| (min.min(0.0), max.max(0.0))),
            Self::Summary(layer) => {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for band in layer.bands.iter() {
                    let half = band.width / 2.0;
                    if band.x_center + half >= start.min(end)
                        && band.x_center - half <= start.max(end)
                    {
                        min = min.min(band.min);
                        max = max.max(band.max);
                    }
                }
                (min <= max).then_some((min, max))
            }
            Self::Grid(_) => None,
        }
    }

    /// Full y extent regardless of the visible window.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Line(layer) => layer.series.y_extent(),
            Self::Bar(layer) => layer
                .series
                .y_extent()
                .map(|(min, max)| (min.min(0.0), max.max(0.0))),
            Self::Summary(_) => self.y_extent_in_window(f64::NEG_INFINITY, f64::INFINITY),
            Self::Grid(_) => None,
        }
    }

    /// Produces this layer's drawing primitives under a viewport snapshot.
    ///
    /// Side-effect free: the viewport is read-only and no layer sees another
    /// layer's output. Composition is purely by paint order.
    #[must_use]
    pub fn primitives(&self, viewport: &Viewport) -> LayerPrimitives {
        match self {
            Self::Line(layer) => line_primitives(layer, viewport),
            Self::Bar(layer) => bar_primitives(layer, viewport),
            Self::Summary(layer) => summary_primitives(layer, viewport),
            Self::Grid(layer) => grid_primitives(layer, viewport),
        }
    }
}

fn line_primitives(layer: &LineLayer, viewport: &Viewport) -> LayerPrimitives {
    let mut out = LayerPrimitives::default();
    let (view_min, view_max) = viewport.x().view();
    let range = layer.series.index_window_padded(view_min, view_max);
    let samples = &layer.series.samples()[range];
    if samples.len() < 2 {
        if let (Some(sample), Some((shape, size))) = (samples.first(), layer.style.marker) {
            let (px, py) = viewport.to_screen(sample.x, sample.y);
            out.markers
                .push(MarkerPrimitive::new(px, py, size, shape, layer.style.color));
        }
        return out;
    }

    let points: Vec<(f64, f64)> = samples
        .iter()
        .map(|sample| viewport.to_screen(sample.x, sample.y))
        .collect();

    if let Some(fill) = layer.style.fill {
        let bottom = viewport.y().pixel_extent();
        let lower = points.iter().map(|&(px, _)| (px, bottom)).collect();
        out.bands.push(BandPrimitive::new(points.clone(), lower, fill));
    }

    if let Some((shape, size)) = layer.style.marker {
        for &(px, py) in &points {
            out.markers
                .push(MarkerPrimitive::new(px, py, size, shape, layer.style.color));
        }
    }

    out.polylines.push(PolylinePrimitive::new(
        points,
        layer.style.stroke_width,
        layer.style.color,
    ));
    out
}

fn bar_primitives(layer: &BarLayer, viewport: &Viewport) -> LayerPrimitives {
    let mut out = LayerPrimitives::default();
    let (view_min, view_max) = viewport.x().view();
    let half = layer.style.bar_width / 2.0;
    let plot_width = viewport.x().pixel_extent();

    // Baseline at y = 0, clamped into the visible y window so bars stay
    // anchored when zero is off screen.
    let (y_min, y_max) = viewport.y().view();
    let baseline = viewport.y().to_screen(0.0f64.clamp(y_min, y_max));

    for sample in layer.series.samples() {
        if sample.x + half < view_min || sample.x - half > view_max {
            continue;
        }
        let left = viewport.x().to_screen(sample.x - half).max(0.0);
        let right = viewport.x().to_screen(sample.x + half).min(plot_width);
        if right <= left {
            continue;
        }
        let top_px = viewport.y().to_screen(sample.y);
        let (y, height) = if top_px <= baseline {
            (top_px, baseline - top_px)
        } else {
            (baseline, top_px - baseline)
        };
        out.rects.push(RectPrimitive {
            x: left,
            y,
            width: right - left,
            height,
            fill: layer.style.fill,
            stroke: layer.style.edge,
        });
    }
    out
}

fn summary_primitives(layer: &SummaryLayer, viewport: &Viewport) -> LayerPrimitives {
    let mut out = LayerPrimitives::default();
    let style = layer.style;
    let (view_min, view_max) = viewport.x().view();

    for band in layer.bands.iter() {
        let half = band.width / 2.0;
        if band.x_center + half < view_min || band.x_center - half > view_max {
            continue;
        }

        let center_px = viewport.x().to_screen(band.x_center);
        let half_px = (viewport.x().to_screen(band.x_center + half) - center_px).abs();

        if style.show_minmax {
            let min_py = viewport.y().to_screen(band.min);
            let max_py = viewport.y().to_screen(band.max);
            out.polylines.push(PolylinePrimitive::new(
                vec![(center_px, min_py), (center_px, max_py)],
                style.whisker_width,
                style.whisker_color,
            ));
            let cap_half = half_px * 0.3;
            for py in [min_py, max_py] {
                out.polylines.push(PolylinePrimitive::new(
                    vec![(center_px - cap_half, py), (center_px + cap_half, py)],
                    style.whisker_width,
                    style.whisker_color,
                ));
            }
        }

        if style.show_percentiles {
            // Pair the ascending rank list from the outside in: widest
            // percentile range first, narrower boxes nested on top with
            // shrinking width and fading fill.
            let ranks = &band.percentiles;
            let pair_count = ranks.len() / 2;
            for i in 0..pair_count {
                let (_, low_value) = ranks[i];
                let (_, high_value) = ranks[ranks.len() - 1 - i];
                let box_half = half_px * (1.0 - i as f64 * 0.15);
                let top = viewport.y().to_screen(high_value);
                let bottom = viewport.y().to_screen(low_value);
                let alpha = (style.box_fill.alpha - i as f64 * 0.15).max(0.1);
                out.rects.push(RectPrimitive {
                    x: center_px - box_half,
                    y: top.min(bottom),
                    width: box_half * 2.0,
                    height: (bottom - top).abs(),
                    fill: style.box_fill.with_alpha(alpha),
                    stroke: Some((style.whisker_width, style.whisker_color)),
                });
            }
        }

        if style.show_median {
            let py = viewport.y().to_screen(band.median);
            out.polylines.push(PolylinePrimitive::new(
                vec![(center_px - half_px, py), (center_px + half_px, py)],
                style.median_width,
                style.median_color,
            ));
        }

        if style.show_mean {
            let py = viewport.y().to_screen(band.mean);
            out.markers.push(MarkerPrimitive::new(
                center_px,
                py,
                style.mean_marker_size,
                MarkerShape::Circle,
                style.mean_color,
            ));
        }

        if let Some(label) = &band.label {
            out.texts.push(TextPrimitive::new(
                label.clone(),
                center_px,
                viewport.y().pixel_extent() + style.mean_marker_size + 10.0,
                11.0,
                style.median_color,
                TextHAlign::Center,
            ));
        }
    }
    out
}

fn grid_primitives(layer: &GridLayer, viewport: &Viewport) -> LayerPrimitives {
    let mut out = LayerPrimitives::default();
    let style = layer.style;
    let (plot_width, plot_height) = viewport.pixel_size();

    for value in tick_values(viewport.x().view(), style.target_tick_count) {
        let px = viewport.x().to_screen(value);
        if !(0.0..=plot_width).contains(&px) {
            continue;
        }
        if style.show_grid_lines {
            out.polylines.push(PolylinePrimitive::new(
                vec![(px, 0.0), (px, plot_height)],
                1.0,
                style.line_color,
            ));
        }
        out.ticks.push(TickPrimitive::new(
            px,
            TickEdge::Bottom,
            style.tick_length_px,
            style.tick_color,
        ));
        out.texts.push(TextPrimitive::new(
            format_tick_label(value),
            px,
            plot_height + style.tick_length_px + style.font_size_px,
            style.font_size_px,
            style.label_color,
            TextHAlign::Center,
        ));
    }

    for value in tick_values(viewport.y().view(), style.target_tick_count) {
        let py = viewport.y().to_screen(value);
        if !(0.0..=plot_height).contains(&py) {
            continue;
        }
        if style.show_grid_lines {
            out.polylines.push(PolylinePrimitive::new(
                vec![(0.0, py), (plot_width, py)],
                1.0,
                style.line_color,
            ));
        }
        out.ticks.push(TickPrimitive::new(
            py,
            TickEdge::Left,
            style.tick_length_px,
            style.tick_color,
        ));
        out.texts.push(TextPrimitive::new(
            format_tick_label(value),
            -style.tick_length_px - 2.0,
            py,
            style.font_size_px,
            style.label_color,
            TextHAlign::Right,
        ));
    }
    out
}

/// Tick positions at a round step (1/2/5 times a power of ten) covering the
/// window, ascending.
#[must_use]
pub fn tick_values((min, max): (f64, f64), target_count: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }
    let step = nice_step(span / target_count.max(2) as f64);
    let mut value = (min / step).ceil() * step;
    let mut out = Vec::new();
    while value <= max + step * 1e-9 {
        // Snap values like 0.30000000000000004 back onto the grid.
        out.push((value / step).round() * step);
        value += step;
    }
    out
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn format_tick_label(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let abs = value.abs();
    if abs >= 1e6 || abs < 1e-3 {
        format!("{value:.2e}")
    } else if abs >= 100.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.3}");
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{format_tick_label, nice_step, tick_values};

    #[test]
    fn nice_step_picks_one_two_five() {
        assert_eq!(nice_step(0.9), 1.0);
        assert_eq!(nice_step(1.4), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(70.0), 100.0);
    }

    #[test]
    fn tick_values_are_ascending_and_within_window() {
        let ticks = tick_values((0.0, 10.0), 6);
        assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!(*ticks.first().expect("first tick") >= 0.0);
        assert!(*ticks.last().expect("last tick") <= 10.0 + 1e-9);
    }

    #[test]
    fn tick_labels_trim_trailing_zeros() {
        assert_eq!(format_tick_label(2.5), "2.5");
        assert_eq!(format_tick_label(2.0), "2");
        assert_eq!(format_tick_label(0.0), "0");
    }
}
