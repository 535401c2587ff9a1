//! Integration tests of the cross-validation plumbing.

use evalkit_rust::*;

mod common;
use common::*;

#[test]
fn test_learning_curve_with_real_estimator() {
    let (x, y) = synthetic_binary(40);
    let curve = learning_curve(
        &MidpointEstimator,
        &x.view(),
        &y.view(),
        &KFold::new(4).with_seed(3),
        &[0.25, 0.5, 1.0],
        Some(2),
    )
    .unwrap();

    assert_eq!(curve.train_sizes.len(), 3);
    assert_eq!(curve.train_scores.dim(), (3, 4));
    assert_eq!(curve.validation_scores.dim(), (3, 4));

    // Each fold trains on 30 rows; the fractions are ceiled subsets of it.
    assert_eq!(curve.train_sizes, vec![8, 15, 30]);

    // Accuracy scores stay probabilities.
    for &score in curve
        .train_scores
        .iter()
        .chain(curve.validation_scores.iter())
    {
        assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn test_learning_curve_is_reproducible_with_seed() {
    let (x, y) = synthetic_binary(36);
    let run = || {
        learning_curve(
            &MidpointEstimator,
            &x.view(),
            &y.view(),
            &KFold::new(3).with_seed(42),
            &[0.5, 1.0],
            Some(1),
        )
        .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first.train_scores, second.train_scores);
    assert_eq!(first.validation_scores, second.validation_scores);
}

#[test]
fn test_kfold_partitions_the_sample_range() {
    let splits = KFold::new(5).split(23).unwrap();
    let mut seen = vec![false; 23];
    for (train, test) in &splits {
        assert_eq!(train.len() + test.len(), 23);
        for &i in test {
            assert!(!seen[i]);
            seen[i] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_learning_curve_rejects_mismatched_inputs() {
    let (x, _) = synthetic_binary(20);
    let y = ndarray::Array1::zeros(19);
    let err = learning_curve(
        &MidpointEstimator,
        &x.view(),
        &y.view(),
        &KFold::new(2),
        &[1.0],
        None,
    )
    .unwrap_err();
    assert_eq!(err.category(), "dimension_mismatch");
}
