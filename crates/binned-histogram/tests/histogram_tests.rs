//! End-to-end behavior of histogram construction

use approx::assert_relative_eq;
use binned_histogram::{
    histogram, histogram_1d, EdgeSpec, EdgeSpecification, Error, HistogramBuilder, HistogramConfig,
    SampleMatrix,
};

#[test]
fn test_auto_edges_over_integers() {
    let hist = histogram_1d(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 5usize, None).unwrap();

    let edges = hist.edges(0).unwrap();
    assert_eq!(hist.shape(), &[5]);
    // The padding is below the resolution of f64 near 5, so only the
    // closed last bin keeps the maximum in range
    assert!(edges.lower() <= 0.0);
    assert!(edges.upper() >= 5.0);
    assert_eq!(hist.excluded(), 0);
    assert_relative_eq!(hist.sum(), 1.0, max_relative = 1e-9);

    // Widths are equal up to rounding
    let widths = edges.widths();
    for w in &widths {
        assert_relative_eq!(*w, widths[0], max_relative = 1e-9);
    }
}

#[test]
fn test_closed_last_bin() {
    let hist = histogram_1d(&[1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 4.0], None).unwrap();
    for &p in hist.values() {
        assert_relative_eq!(p, 1.0 / 3.0, epsilon = 1e-12);
    }

    let hist = histogram_1d(&[4.0], vec![1.0, 2.0, 3.0, 4.0], None).unwrap();
    assert_eq!(hist.values(), &[0.0, 0.0, 1.0]);
}

#[test]
fn test_weights_select_bin() {
    let hist = histogram_1d(&[1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 4.0], Some(&[0.0, 0.0, 5.0])).unwrap();
    assert_eq!(hist.values(), &[0.0, 0.0, 1.0]);
    assert_eq!(hist.total_weight(), 5.0);
}

#[test]
fn test_two_dimensional_broadcast() {
    let samples = SampleMatrix::from_rows(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
    let hist = histogram(&samples, vec![1.0, 2.0, 3.0, 4.0], None).unwrap();

    assert_eq!(hist.shape(), &[3, 3]);
    for (index, p) in hist.iter() {
        if index[0] == index[1] {
            assert_relative_eq!(p, 1.0 / 3.0, epsilon = 1e-12);
        } else {
            assert_eq!(p, 0.0, "off-diagonal cell {index:?}");
        }
    }
}

#[test]
fn test_everything_excluded_is_empty() {
    let err = histogram_1d(&[-10.0, 10.0], vec![0.0, 1.0, 2.0], None).unwrap_err();
    assert!(matches!(err, Error::EmptyHistogram));
}

#[test]
fn test_per_dimension_edges() {
    let samples = SampleMatrix::from_rows(&[[0.5, 100.0], [1.5, 200.0], [1.5, 300.0]]).unwrap();
    let spec = EdgeSpecification::PerDimension(vec![
        EdgeSpec::Explicit(vec![0.0, 1.0, 2.0]),
        EdgeSpec::Count(4),
    ]);
    let hist = histogram(&samples, spec, None).unwrap();

    assert_eq!(hist.shape(), &[2, 4]);
    assert_eq!(hist.excluded(), 0);
    assert_relative_eq!(hist.get(&[0, 0]).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(hist.get(&[1, 3]).unwrap(), 1.0 / 3.0, epsilon = 1e-12);

    let marginal = hist.marginal(0).unwrap();
    assert_relative_eq!(marginal.values()[0], 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(marginal.values()[1], 2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_per_dimension_length_mismatch() {
    let samples = SampleMatrix::from_rows(&[[0.5, 1.0]]).unwrap();
    let spec = EdgeSpecification::PerDimension(vec![EdgeSpec::Count(2)]);
    assert!(matches!(histogram(&samples, spec, None), Err(Error::Shape(_))));
}

#[test]
fn test_degenerate_edges() {
    let err = histogram_1d(&[1.0], vec![1.0], None).unwrap_err();
    assert!(matches!(err, Error::DegenerateEdges { dimension: 0, .. }));

    let err = histogram_1d(&[1.0], 0usize, None).unwrap_err();
    assert!(matches!(err, Error::DegenerateEdges { .. }));
}

#[test]
fn test_nan_samples_excluded() {
    let hist = histogram_1d(&[1.0, f64::NAN, 2.0, f64::INFINITY], 2usize, None).unwrap();
    assert_eq!(hist.accumulated(), 2);
    assert_eq!(hist.excluded(), 2);
    assert_relative_eq!(hist.sum(), 1.0, max_relative = 1e-9);
}

#[test]
fn test_constant_column() {
    let hist = histogram_1d(&[7.0; 5], 3usize, None).unwrap();
    assert_eq!(hist.excluded(), 0);
    assert_relative_eq!(hist.sum(), 1.0, max_relative = 1e-9);

    let big = histogram_1d(&[1.0e12; 4], 2usize, None).unwrap();
    assert_eq!(big.excluded(), 0);
}

#[test]
fn test_extreme_magnitudes_covered() {
    let hist = histogram_1d(&[-1e308, 0.0, 1e308], 4usize, None).unwrap();
    assert_eq!(hist.excluded(), 0);
    assert_relative_eq!(hist.values()[0], 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(hist.values()[2], 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(hist.values()[3], 1.0 / 3.0, epsilon = 1e-12);

    let values = [f64::MIN, -1.0, 0.0, 1e300, f64::MAX];
    for bins in [1usize, 2, 7, 100] {
        let hist = histogram_1d(&values, bins, None).unwrap();
        assert_eq!(hist.excluded(), 0, "bins = {bins}");
        assert_relative_eq!(hist.sum(), 1.0, max_relative = 1e-9);
    }
}

#[test]
fn test_negative_weights_cancel() {
    let err = histogram_1d(&[1.0, 2.0], vec![0.0, 3.0], Some(&[1.0, -1.0])).unwrap_err();
    assert!(matches!(err, Error::EmptyHistogram));
}

#[test]
fn test_builder_matches_free_function() {
    let values: Vec<f64> = (0..500).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
    let weights: Vec<f64> = (0..500).map(|i| 1.0 + (i % 3) as f64).collect();

    let direct = histogram_1d(&values, 20usize, Some(&weights)).unwrap();
    let built = HistogramBuilder::new(20usize)
        .weights(weights)
        .config(HistogramConfig::sequential().with_chunk_size(64))
        .build(&SampleMatrix::from_column(&values))
        .unwrap();

    assert_eq!(direct.shape(), built.shape());
    for (a, b) in direct.values().iter().zip(built.values()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }
}

#[test]
fn test_histogram_serializes() {
    let hist = histogram_1d(&[1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 4.0], None).unwrap();
    let json = serde_json::to_value(&hist).unwrap();
    assert_eq!(json["layout"]["shape"], serde_json::json!([3]));
    assert_eq!(json["total_weight"], serde_json::json!(3.0));
}
