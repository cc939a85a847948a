use stackplot::core::{AutoFitTuning, AxisTuning, GridStyle, LineStyle, Sample, Series};
use stackplot::interaction::{InputEvent, PointerId, WheelZoomTuning};
use stackplot::render::Color;
use stackplot::summary::{Bucketing, PercentileSpec};
use stackplot::YRangePolicy;

#[test]
fn wheel_tuning_round_trips_and_reads_plain_json() {
    let tuning = WheelZoomTuning {
        zoom_step: 1.25,
        wheel_notch: 100.0,
    };
    let json = serde_json::to_string(&tuning).expect("serialize");
    let back: WheelZoomTuning = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, tuning);

    let parsed: WheelZoomTuning =
        serde_json::from_str(r#"{"zoom_step":1.5,"wheel_notch":120.0}"#).expect("literal");
    assert_eq!(parsed.zoom_step, 1.5);
}

#[test]
fn axis_tuning_round_trips() {
    let tuning = AxisTuning {
        min_span: 0.25,
        max_span_is_domain: false,
        unbounded_pan: true,
    };
    let json = serde_json::to_string(&tuning).expect("serialize");
    let back: AxisTuning = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, tuning);
}

#[test]
fn y_range_policy_uses_tagged_variants() {
    let fixed = YRangePolicy::Fixed {
        min: -1.0,
        max: 4.0,
    };
    let json = serde_json::to_string(&fixed).expect("serialize");
    assert_eq!(json, r#"{"Fixed":{"min":-1.0,"max":4.0}}"#);

    let parsed: YRangePolicy =
        serde_json::from_str(r#"{"AutoFitVisible":{"padding_ratio":0.1}}"#).expect("literal");
    assert_eq!(
        parsed,
        YRangePolicy::AutoFitVisible(AutoFitTuning { padding_ratio: 0.1 })
    );
}

#[test]
fn styles_round_trip_with_nested_colors() {
    let style = LineStyle {
        color: Color::rgba(0.1, 0.2, 0.3, 0.9),
        stroke_width: 2.0,
        marker: None,
        fill: Some(Color::rgb(0.5, 0.5, 0.5)),
    };
    let json = serde_json::to_string(&style).expect("serialize");
    let back: LineStyle = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, style);

    let grid = GridStyle::default();
    let json = serde_json::to_string(&grid).expect("serialize");
    let back: GridStyle = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, grid);
}

#[test]
fn bucketing_and_percentiles_round_trip() {
    let bucketing = Bucketing::FixedWidth {
        width: 3600.0,
        origin: 0.0,
    };
    let json = serde_json::to_string(&bucketing).expect("serialize");
    let back: Bucketing = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, bucketing);

    let spec = PercentileSpec::new([5.0, 50.0, 95.0]).expect("spec");
    let json = serde_json::to_string(&spec).expect("serialize");
    let back: PercentileSpec = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, spec);
}

#[test]
fn series_round_trips_with_samples_intact() {
    let series = Series::new(
        "sensor",
        vec![Sample::new(0.0, 1.5), Sample::new(1.0, 2.5)],
    )
    .expect("ordered series");
    let json = serde_json::to_string(&series).expect("serialize");
    let back: Series = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, series);
    assert_eq!(back.name(), "sensor");
}

#[test]
fn input_events_round_trip_for_replay_logs() {
    let events = [
        InputEvent::PointerDown {
            x: 10.0,
            y: 20.0,
            pointer: PointerId::new(7),
        },
        InputEvent::Wheel {
            x: 400.0,
            delta: -120.0,
        },
        InputEvent::FocusLost,
    ];
    let json = serde_json::to_string(&events).expect("serialize");
    let back: Vec<InputEvent> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.as_slice(), events.as_slice());
}
