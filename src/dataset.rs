//! Input data for a chart: benchmark names, one MPKI series per predictor
//! configuration, and the externally supplied aggregate row.

/// Category label appended after the benchmarks.
pub const AGGREGATE_LABEL: &str = "AMEAN";

/// One predictor configuration's results, one value per benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }
}

/// Synthetic trailing category with one precomputed value per series.
///
/// The values are taken as given; nothing in this crate derives them from the
/// per-benchmark series.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub label: String,
    pub values: Vec<(String, f64)>,
}

impl AggregateRow {
    pub fn new<I, S>(label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Aggregate row labelled `AMEAN`.
    pub fn amean<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::new(AGGREGATE_LABEL, values)
    }

    pub fn get(&self, series: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == series)
            .map(|(_, v)| *v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub aggregate: AggregateRow,
}

const BENCHMARKS: [&str; 22] = [
    "LONG-SPEC2K6-00",
    "LONG-SPEC2K6-01",
    "LONG-SPEC2K6-02",
    "LONG-SPEC2K6-03",
    "LONG-SPEC2K6-04",
    "LONG-SPEC2K6-05",
    "LONG-SPEC2K6-06",
    "LONG-SPEC2K6-07",
    "LONG-SPEC2K6-08",
    "LONG-SPEC2K6-09",
    "SHORT-FP-1",
    "SHORT-FP-2",
    "SHORT-FP-3",
    "SHORT-INT-1",
    "SHORT-INT-2",
    "SHORT-INT-3",
    "SHORT-MM-1",
    "SHORT-MM-2",
    "SHORT-MM-3",
    "SHORT-SERV-1",
    "SHORT-SERV-2",
    "SHORT-SERV-3",
];

const MPKI_ORIGINAL: [f64; 22] = [
    5.339, 8.523, 5.728, 5.868, 10.895, 5.973, 4.180, 19.297, 1.794, 5.520, 3.842, 1.123, 0.442,
    8.056, 8.670, 14.358, 9.297, 11.017, 4.667, 5.900, 5.967, 8.393,
];

const MPKI_TAGE: [f64; 22] = [
    2.193, 8.183, 1.533, 2.560, 9.671, 5.701, 0.930, 9.163, 1.040, 4.667, 1.635, 0.821, 0.435,
    0.732, 5.312, 8.499, 8.592, 10.146, 0.290, 1.160, 1.121, 3.385,
];

const MPKI_SC: [f64; 22] = [
    2.123, 7.594, 1.458, 2.491, 9.016, 5.300, 0.927, 9.085, 0.953, 4.576, 1.620, 0.811, 0.435,
    0.612, 5.303, 8.210, 7.810, 9.692, 0.157, 1.135, 1.106, 3.236,
];

const MPKI_TAGE_LOOP: [f64; 22] = [
    2.187, 8.186, 1.534, 2.556, 9.674, 5.650, 0.809, 9.082, 0.981, 4.669, 1.580, 0.817, 0.073,
    0.731, 5.310, 8.469, 8.480, 10.153, 0.290, 1.157, 1.119, 3.384,
];

const MPKI_CF_LOOP: [f64; 22] = [
    2.117, 7.598, 1.458, 2.486, 9.023, 5.251, 0.806, 9.005, 0.934, 4.577, 1.565, 0.807, 0.073,
    0.612, 5.301, 8.182, 7.706, 9.699, 0.157, 1.131, 1.104, 3.236,
];

/// MPKI of five predictor configurations over the CBP trace set, with the
/// published AMEAN of each configuration.
pub fn branch_predictor_mpki() -> Dataset {
    let series = vec![
        Series::new("Original", MPKI_ORIGINAL),
        Series::new("TAGE", MPKI_TAGE),
        Series::new("SC", MPKI_SC),
        Series::new("TAGE + Loop", MPKI_TAGE_LOOP),
        Series::new("CF + Loop", MPKI_CF_LOOP),
    ];
    let aggregate = AggregateRow::amean([
        ("Original", 7.039),
        ("TAGE", 3.990),
        ("SC", 3.802),
        ("TAGE + Loop", 3.950),
        ("CF + Loop", 3.765),
    ]);
    Dataset {
        categories: BENCHMARKS.iter().map(|s| s.to_string()).collect(),
        series,
        aggregate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_rectangular() {
        let data = branch_predictor_mpki();
        assert_eq!(data.categories.len(), 22);
        assert_eq!(data.series.len(), 5);
        for s in &data.series {
            assert_eq!(s.values.len(), data.categories.len(), "{}", s.name);
            assert!(data.aggregate.get(&s.name).is_some(), "{}", s.name);
        }
        assert_eq!(data.aggregate.label, AGGREGATE_LABEL);
    }

    #[test]
    fn aggregate_lookup_by_name() {
        let row = AggregateRow::amean([("X", 1.5), ("Y", 2.5)]);
        assert_eq!(row.get("Y"), Some(2.5));
        assert_eq!(row.get("Z"), None);
    }
}
