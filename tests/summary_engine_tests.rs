use stackplot::core::{Sample, Series};
use stackplot::summary::{
    Bucketing, PercentileSpec, compute_summary, summarize_labeled, summarize_values,
};

fn series_of(values: &[(f64, f64)]) -> Series {
    let samples = values.iter().map(|&(x, y)| Sample::new(x, y)).collect();
    Series::new("s", samples).expect("ordered series")
}

#[test]
fn reference_bucket_statistics_match_linear_interpolation() {
    let spec = PercentileSpec::new([25.0, 75.0]).expect("spec");
    let band = summarize_values(0.5, 1.0, None, &[1.0, 2.0, 3.0, 4.0, 5.0], &spec)
        .expect("non-empty band");

    assert_eq!(band.sample_count, 5);
    assert_eq!(band.min, 1.0);
    assert_eq!(band.max, 5.0);
    assert_eq!(band.mean, 3.0);
    assert_eq!(band.median, 3.0);
    assert_eq!(band.percentiles.as_slice(), &[(25.0, 2.0), (75.0, 4.0)]);
}

#[test]
fn even_sample_count_interpolates_the_median() {
    let spec = PercentileSpec::default();
    let band = summarize_values(0.0, 1.0, None, &[1.0, 2.0, 3.0, 4.0], &spec).expect("band");
    assert!((band.median - 2.5).abs() <= 1e-12);
}

#[test]
fn empty_value_set_produces_no_band() {
    let spec = PercentileSpec::default();
    assert!(summarize_values(0.0, 1.0, None, &[], &spec).is_none());
    assert!(summarize_values(0.0, 1.0, None, &[f64::NAN], &spec).is_none());
}

#[test]
fn summary_is_independent_of_input_order() {
    let spec = PercentileSpec::default();
    let bucketing = Bucketing::FixedWidth {
        width: 10.0,
        origin: 0.0,
    };

    let forward = series_of(&[(1.0, 5.0), (2.0, 1.0), (3.0, 9.0), (12.0, 4.0), (13.0, 2.0)]);
    let shuffled = Series::from_unordered(
        "s",
        vec![
            Sample::new(13.0, 2.0),
            Sample::new(3.0, 9.0),
            Sample::new(1.0, 5.0),
            Sample::new(12.0, 4.0),
            Sample::new(2.0, 1.0),
        ],
    )
    .expect("sortable series");

    let a = compute_summary(&forward, bucketing, &spec).expect("summary");
    let b = compute_summary(&shuffled, bucketing, &spec).expect("summary");
    assert_eq!(a, b);
}

#[test]
fn fixed_width_bucketing_centers_bands_and_skips_empty_buckets() {
    let spec = PercentileSpec::default();
    let bucketing = Bucketing::FixedWidth {
        width: 10.0,
        origin: 0.0,
    };
    // Occupies buckets [0, 10) and [30, 40); everything between is empty.
    let series = series_of(&[(2.0, 1.0), (7.0, 3.0), (34.0, 8.0)]);

    let bands = compute_summary(&series, bucketing, &spec).expect("summary");
    assert_eq!(bands.len(), 2);
    assert!((bands[0].x_center - 5.0).abs() <= 1e-12);
    assert!((bands[1].x_center - 35.0).abs() <= 1e-12);
    assert_eq!(bands[0].sample_count, 2);
    assert_eq!(bands[1].sample_count, 1);
}

#[test]
fn single_sample_bucket_collapses_all_statistics() {
    let spec = PercentileSpec::default();
    let band = summarize_values(0.0, 1.0, None, &[7.5], &spec).expect("band");
    assert_eq!(band.min, 7.5);
    assert_eq!(band.max, 7.5);
    assert_eq!(band.mean, 7.5);
    assert_eq!(band.median, 7.5);
    for &(_, value) in &band.percentiles {
        assert_eq!(value, 7.5);
    }
}

#[test]
fn labeled_groups_lay_out_one_unit_apart() {
    let spec = PercentileSpec::default();
    let groups = vec![
        ("monday".to_owned(), vec![1.0, 2.0, 3.0]),
        ("tuesday".to_owned(), vec![]),
        ("wednesday".to_owned(), vec![4.0, 6.0]),
    ];

    let bands = summarize_labeled(&groups, &spec);
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0].label.as_deref(), Some("monday"));
    assert!((bands[0].x_center - 0.5).abs() <= 1e-12);
    assert_eq!(bands[1].label.as_deref(), Some("wednesday"));
    assert!((bands[1].x_center - 2.5).abs() <= 1e-12);
    assert!((bands[1].mean - 5.0).abs() <= 1e-12);
}

#[test]
fn invalid_bucketing_is_rejected() {
    let spec = PercentileSpec::default();
    let series = series_of(&[(0.0, 1.0)]);
    for width in [0.0, -1.0, f64::NAN] {
        let bucketing = Bucketing::FixedWidth { width, origin: 0.0 };
        assert!(compute_summary(&series, bucketing, &spec).is_err());
    }
}

#[test]
fn recomputation_is_deterministic() {
    let spec = PercentileSpec::default();
    let bucketing = Bucketing::FixedWidth {
        width: 5.0,
        origin: 0.0,
    };
    let series = series_of(&[(0.0, 3.0), (1.0, 1.0), (2.0, 2.0), (6.0, 9.0)]);

    let first = compute_summary(&series, bucketing, &spec).expect("summary");
    let second = compute_summary(&series, bucketing, &spec).expect("summary");
    assert_eq!(first, second);
}
