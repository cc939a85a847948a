use std::sync::Arc;

use approx::assert_relative_eq;
use stackplot::core::{AutoFitTuning, BarStyle, LineStyle, Sample, Series};
use stackplot::{Graph, GraphView, Layer, YRangePolicy};

fn doubled_series() -> Arc<Series> {
    // y = 2x at integer x in 0..=10.
    let samples = (0..=10).map(|x| Sample::new(x as f64, 2.0 * x as f64)).collect();
    Arc::new(Series::new("doubled", samples).expect("ordered series"))
}

fn view_with_line_graph() -> GraphView {
    let mut graph = Graph::new("doubled");
    graph.add_layer(Layer::line(doubled_series(), LineStyle::default()));
    let mut view = GraphView::new("autofit");
    view.add_graph("doubled", graph).expect("add graph");
    view
}

fn y_domain(view: &GraphView, name: &str) -> (f64, f64) {
    view.graph(name).expect("graph").y_transform().domain()
}

#[test]
fn auto_fit_follows_the_visible_window_with_padding() {
    let mut view = view_with_line_graph();
    assert!(view.set_x_view(2.0, 4.0));
    view.render().expect("render");

    // Visible y extent is (4, 8); 5% of the range padded on each side.
    let (y_min, y_max) = y_domain(&view, "doubled");
    assert_relative_eq!(y_min, 3.8, max_relative = 1e-12);
    assert_relative_eq!(y_max, 8.2, max_relative = 1e-12);
}

#[test]
fn auto_fit_falls_back_to_the_full_extent_when_nothing_is_visible() {
    let mut view = view_with_line_graph();
    // No integer sample lies inside this window.
    assert!(view.set_x_view(4.2, 4.8));
    view.render().expect("render");

    let (y_min, y_max) = y_domain(&view, "doubled");
    assert_relative_eq!(y_min, -1.0, max_relative = 1e-12);
    assert_relative_eq!(y_max, 21.0, max_relative = 1e-12);
}

#[test]
fn auto_fit_re_fits_after_the_window_moves() {
    let mut view = view_with_line_graph();
    assert!(view.set_x_view(0.0, 2.0));
    view.render().expect("render");
    let narrow = y_domain(&view, "doubled");

    assert!(view.set_x_view(8.0, 10.0));
    view.render().expect("render");
    let shifted = y_domain(&view, "doubled");

    assert!(shifted.0 > narrow.1);
}

#[test]
fn custom_padding_ratio_is_honored() {
    let mut graph = Graph::new("doubled");
    graph.add_layer(Layer::line(doubled_series(), LineStyle::default()));
    graph
        .set_y_range_policy(YRangePolicy::AutoFitVisible(AutoFitTuning {
            padding_ratio: 0.5,
        }))
        .expect("policy");
    let mut view = GraphView::new("autofit");
    view.add_graph("doubled", graph).expect("add graph");

    assert!(view.set_x_view(2.0, 4.0));
    view.render().expect("render");
    let (y_min, y_max) = y_domain(&view, "doubled");
    assert_relative_eq!(y_min, 2.0, max_relative = 1e-12);
    assert_relative_eq!(y_max, 10.0, max_relative = 1e-12);
}

#[test]
fn fixed_policy_never_re_fits() {
    let mut graph = Graph::new("doubled");
    graph.add_layer(Layer::line(doubled_series(), LineStyle::default()));
    let graph = graph
        .with_y_policy(YRangePolicy::Fixed { min: -5.0, max: 30.0 })
        .expect("policy");
    let mut view = GraphView::new("autofit");
    view.add_graph("doubled", graph).expect("add graph");

    assert!(view.set_x_view(2.0, 4.0));
    view.render().expect("render");
    assert_eq!(y_domain(&view, "doubled"), (-5.0, 30.0));
}

#[test]
fn invalid_policies_are_rejected() {
    let mut graph = Graph::new("g");
    assert!(graph
        .set_y_range_policy(YRangePolicy::Fixed { min: 1.0, max: 1.0 })
        .is_err());
    assert!(graph
        .set_y_range_policy(YRangePolicy::Fixed {
            min: 0.0,
            max: f64::NAN,
        })
        .is_err());
    assert!(graph
        .set_y_range_policy(YRangePolicy::AutoFitVisible(AutoFitTuning {
            padding_ratio: -0.1,
        }))
        .is_err());
}

#[test]
fn flat_data_is_widened_instead_of_degenerating() {
    let samples = (0..5).map(|x| Sample::new(x as f64, 5.0)).collect();
    let series = Arc::new(Series::new("flat", samples).expect("ordered series"));
    let mut graph = Graph::new("flat");
    graph.add_layer(Layer::line(series, LineStyle::default()));
    let mut view = GraphView::new("autofit");
    view.add_graph("flat", graph).expect("add graph");

    view.render().expect("render");
    // Zero range: no padding applies, the transform widens to a unit span.
    assert_eq!(y_domain(&view, "flat"), (4.5, 5.5));
}

#[test]
fn bar_layers_keep_the_zero_baseline_in_range() {
    let samples = (0..5).map(|x| Sample::new(x as f64, 3.0 + x as f64)).collect();
    let series = Arc::new(Series::new("bars", samples).expect("ordered series"));
    let mut graph = Graph::new("bars");
    graph.add_layer(Layer::bar(series, BarStyle::default()));
    let mut view = GraphView::new("autofit");
    view.add_graph("bars", graph).expect("add graph");

    view.render().expect("render");
    // Data y spans 3..7 but bars rise from zero, so the fit includes it.
    let (y_min, y_max) = y_domain(&view, "bars");
    assert_relative_eq!(y_min, -0.35, max_relative = 1e-12);
    assert_relative_eq!(y_max, 7.35, max_relative = 1e-12);
}

#[test]
fn graphs_without_data_keep_their_unit_range() {
    let mut view = GraphView::new("autofit");
    let mut placeholder = Graph::new("empty");
    placeholder.add_layer(Layer::grid(Default::default()));
    view.add_graph("empty", placeholder).expect("add graph");
    view.add_graph("doubled", {
        let mut graph = Graph::new("doubled");
        graph.add_layer(Layer::line(doubled_series(), LineStyle::default()));
        graph
    })
    .expect("add graph");

    view.render().expect("render");
    assert_eq!(y_domain(&view, "empty"), (0.0, 1.0));
}
