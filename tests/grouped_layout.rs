use bpchart::chart::{Annotate, augment, bar_offset};
use bpchart::{AGGREGATE_LABEL, AggregateRow, ChartBuilder, ChartConfig, ChartError, Series};
use proptest::prelude::*;

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn end_to_end_single_series() {
    let cats = names(&["A", "B"]);
    let series = vec![Series::new("X", [1.0, 2.0])];
    let agg = AggregateRow::amean([("X", 1.5)]);

    let artifact = ChartBuilder::default().build(&cats, &series, &agg).unwrap();

    assert_eq!(artifact.ticks, names(&["A", "B", "AMEAN"]));
    assert_eq!(artifact.groups.len(), 1);
    assert_eq!(artifact.groups[0].series, "X");
    assert_eq!(artifact.groups[0].bars.len(), 3);
    assert_eq!(artifact.labels.len(), 1);
    let label = &artifact.labels[0];
    assert_eq!(label.text, "1.50");
    assert_eq!(label.category_index, 2);
    assert_eq!(label.x, 2.0);
    assert!(label.y > 1.5);
}

#[test]
fn builtin_table_labels_only_amean() {
    let data = bpchart::dataset::branch_predictor_mpki();
    let artifact = ChartBuilder::default().build_dataset(&data).unwrap();

    assert_eq!(artifact.ticks.len(), 23);
    assert_eq!(artifact.ticks.last().map(String::as_str), Some(AGGREGATE_LABEL));
    let texts: Vec<&str> = artifact.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["7.04", "3.99", "3.80", "3.95", "3.77"]);
    assert!(
        artifact
            .labels
            .iter()
            .all(|l| Some(l.category_index) == artifact.aggregate_index())
    );

    // Staggered offsets from the original figure.
    let gaps: Vec<f64> = artifact
        .labels
        .iter()
        .map(|l| {
            let bar = artifact.groups[l.series_index].bars[l.category_index];
            l.y - bar.height
        })
        .collect();
    for (gap, expected) in gaps.iter().zip([0.5, 2.0, 1.5, 1.0, 0.5]) {
        assert!((gap - expected).abs() < 1e-9);
    }
}

#[test]
fn annotate_all_labels_every_bar() {
    let mut config = ChartConfig::default();
    config.labels.annotate = Annotate::All;
    let cats = names(&["A", "B"]);
    let series = vec![Series::new("X", [1.0, 2.0]), Series::new("Y", [0.5, 0.25])];
    let agg = AggregateRow::amean([("X", 1.5), ("Y", 0.375)]);

    let artifact = ChartBuilder::new(config).build(&cats, &series, &agg).unwrap();
    assert_eq!(artifact.labels.len(), 6);
    assert_eq!(artifact.labels[5].text, "0.38");
}

#[test]
fn mismatched_lengths_fail() {
    let data = bpchart::dataset::branch_predictor_mpki();
    let short_cats = data.categories[..21].to_vec();
    let err = ChartBuilder::default()
        .build(&short_cats, &data.series, &data.aggregate)
        .unwrap_err();
    assert!(matches!(err, ChartError::ShapeMismatch(_)), "{err}");
}

#[test]
fn empty_series_set_fails() {
    let err = ChartBuilder::default()
        .build(&names(&["A"]), &[], &AggregateRow::amean(Vec::<(String, f64)>::new()))
        .unwrap_err();
    assert!(matches!(err, ChartError::EmptySeriesSet));
}

fn series_strategy() -> impl Strategy<Value = (usize, Vec<Vec<f64>>)> {
    (0usize..8, 1usize..7).prop_flat_map(|(n, k)| {
        (
            Just(n),
            prop::collection::vec(prop::collection::vec(0.0f64..50.0, n), k),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn offsets_are_symmetric_and_disjoint(k in 1usize..12, w in 0.01f64..0.08) {
        let offsets: Vec<f64> = (0..k).map(|i| bar_offset(i, k, w)).collect();
        let sum: f64 = offsets.iter().sum();
        prop_assert!(sum.abs() < 1e-9, "sum = {sum}");
        for a in 0..k {
            for b in 0..k {
                if a != b {
                    prop_assert!((offsets[a] - offsets[b]).abs() >= w - 1e-12);
                }
            }
        }
    }

    #[test]
    fn augmentation_preserves_order_and_appends((n, columns) in series_strategy()) {
        let cats: Vec<String> = (0..n).map(|i| format!("bench-{i}")).collect();
        let series: Vec<Series> = columns
            .iter()
            .enumerate()
            .map(|(k, values)| Series::new(format!("cfg-{k}"), values.clone()))
            .collect();
        let agg = AggregateRow::amean(
            series.iter().enumerate().map(|(k, s)| (s.name.clone(), k as f64 + 0.5)),
        );

        let out = augment(&cats, &series, &agg).unwrap();
        prop_assert_eq!(out.categories.len(), n + 1);
        prop_assert_eq!(out.categories.last().unwrap().as_str(), AGGREGATE_LABEL);
        for (k, (orig, aug)) in series.iter().zip(&out.series).enumerate() {
            prop_assert_eq!(&orig.name, &aug.name);
            prop_assert_eq!(aug.values.len(), orig.values.len() + 1);
            prop_assert_eq!(&aug.values[..n], &orig.values[..]);
            prop_assert_eq!(*aug.values.last().unwrap(), k as f64 + 0.5);
        }

        let width = 1.0 / series.len() as f64;
        let mut config = ChartConfig::default();
        config.layout.bar_width = width;
        let artifact = ChartBuilder::new(config).build(&cats, &series, &agg).unwrap();
        prop_assert_eq!(artifact.labels.len(), series.len());
        prop_assert!(artifact.labels.iter().all(|l| l.category_index == n));
    }
}
