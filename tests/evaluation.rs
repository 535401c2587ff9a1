//! End-to-end tests of the reporting, partitioning, and confidence surface.

use approx::assert_abs_diff_eq;
use evalkit_rust::*;
use ndarray::array;

mod common;
use common::*;

#[test]
fn test_metric_report_end_to_end() {
    let (x, y_true) = synthetic_binary(40);
    let model = MidpointEstimator.fit(&x.view(), &y_true.view()).unwrap();

    let y_pred = model.predict(&x.view()).unwrap();
    let probabilities = model.predict_proba(&x.view()).unwrap();
    let y_score = probabilities.column(1).to_owned();

    let report =
        MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test").unwrap();

    // The data is linearly separable at the fitted threshold.
    assert_abs_diff_eq!(report.accuracy, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.roc_auc, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.f1, 1.0, epsilon = 1e-12);
    assert!(report.log_loss > 0.0);

    let text = report.to_string();
    assert!(text.contains("Model performance on the test dataset:"));
    assert!(text.contains("accuracy...........   1.0000"));
}

#[test]
fn test_confusion_matrix_report_matches_hand_computation() {
    let cm = ConfusionMatrix::from_counts(array![[50u64, 5], [3, 42]]).unwrap();
    let report = ConfusionMatrixReport::from_matrix(&cm).unwrap();

    assert_abs_diff_eq!(report.accuracy, 0.92, epsilon = 1e-12);
    assert_abs_diff_eq!(report.precision, 0.8936, epsilon = 1e-4);
    assert_abs_diff_eq!(report.recall, 0.9333, epsilon = 1e-4);
    assert_abs_diff_eq!(report.misclassification_rate, 0.08, epsilon = 1e-12);
    assert_abs_diff_eq!(report.f1, 0.9130, epsilon = 1e-4);
}

#[test]
fn test_print_confusion_matrix_with_generated_report() {
    let y_true = array![0.0, 0.0, 1.0, 1.0, 1.0, 0.0];
    let y_pred = array![0.0, 1.0, 1.0, 1.0, 0.0, 0.0];

    let cm = ConfusionMatrix::from_labels(&y_true.view(), &y_pred.view(), Some(2)).unwrap();
    let cr = classification_report(&y_true.view(), &y_pred.view(), &["negative", "positive"])
        .unwrap();

    let report = print_confusion_matrix(&cm, &cr, &["negative", "positive"], "test").unwrap();
    assert_eq!(report.true_positive, 2);
    assert_eq!(report.false_negative, 1);
    assert_eq!(report.false_positive, 1);
    assert_eq!(report.true_negative, 2);
}

#[test]
fn test_wrongly_classified_single_error() {
    let y_true = array![0.0, 1.0, 1.0, 0.0];
    let y_pred = array![0.0, 1.0, 0.0, 0.0];
    let x_test = array![[0.0], [1.0], [2.0], [3.0]];

    let wrong = wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), false).unwrap();
    assert_eq!(wrong.indices, vec![2]);
    assert_eq!(wrong.true_label, array![1.0]);
    assert_eq!(wrong.predicted_label, array![0.0]);

    let right = wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), true).unwrap();
    assert_eq!(right.indices, vec![0, 1, 3]);
}

#[test]
fn test_check_model_confidence_end_to_end() {
    let (x, y_true) = synthetic_binary(50);
    let model = MidpointEstimator.fit(&x.view(), &y_true.view()).unwrap();

    let report = check_model_confidence(model.as_ref(), 0.6, &x.view(), &y_true.view()).unwrap();

    // The model is perfect on this data, so every confident answer is right.
    assert_abs_diff_eq!(report.conditional_accuracy, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.baseline_accuracy, 1.0, epsilon = 1e-12);
    assert!(report.coverage > 0.0 && report.coverage <= 1.0);
}

#[test]
fn test_check_prediction_confidence_accounts_for_every_sample() {
    let y_pred = array![
        [0.9, 0.1],
        [0.55, 0.45],
        [0.2, 0.8],
        [0.5, 0.5],
        [0.3, 0.7],
    ];
    let y_test = array![
        [1.0, 0.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [1.0, 0.0],
        [0.0, 1.0],
    ];

    let report = check_prediction_confidence(0.6, &y_pred.view(), &y_test.view()).unwrap();

    // Confident rows: 0 (correct), 2 (correct), 4 (correct); hesitant: 1, 3.
    assert_abs_diff_eq!(report.coverage, 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(report.conditional_accuracy, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.baseline_accuracy, 0.8, epsilon = 1e-12);
}

#[test]
fn test_confidence_boundaries() {
    let y_pred = array![[0.9, 0.1], [0.2, 0.8]];
    let y_test = array![[1.0, 0.0], [0.0, 1.0]];

    // Threshold 0 keeps every sample with a non-zero maximum.
    let everything = check_prediction_confidence(0.0, &y_pred.view(), &y_test.view()).unwrap();
    assert_abs_diff_eq!(everything.coverage, 1.0, epsilon = 1e-12);

    // Threshold 1 keeps nothing and fails loudly.
    let err = check_prediction_confidence(1.0, &y_pred.view(), &y_test.view()).unwrap_err();
    assert_eq!(err.category(), "numerical");
}

#[test]
fn test_report_export_round_trip() {
    let y_true = array![1.0, 1.0, 0.0, 0.0];
    let y_pred = array![1.0, 0.0, 0.0, 0.0];
    let y_score = array![0.8, 0.4, 0.3, 0.1];
    let report =
        MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let csv_path = dir.path().join("report.csv");

    report::export::write_json(&report, &json_path).unwrap();
    report::export::write_csv(&report, &csv_path).unwrap();

    let restored: MetricReport =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(restored, report);

    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv_text.starts_with("metric,value"));
}

#[test]
fn test_errors_propagate_unmodified() {
    // A shape mismatch anywhere in the battery surfaces as-is.
    let y_true = array![1.0, 0.0, 1.0];
    let y_pred = array![1.0, 0.0];
    let y_score = array![0.9, 0.1, 0.8];
    let err = MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test")
        .unwrap_err();
    assert_eq!(err.category(), "dimension_mismatch");
}
