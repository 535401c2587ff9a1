//! Partitioning evaluation data by classification correctness.

use crate::core::error::{EvalError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Row-aligned table of selected samples.
///
/// One entry per selected sample, in the original row order: the predicted
/// label, the true label, the matching feature row, and the sample's
/// position in the input arrays. Rows are selected, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTable {
    /// Predicted hard labels of the selected rows
    pub predicted_label: Array1<f64>,
    /// True labels of the selected rows
    pub true_label: Array1<f64>,
    /// Feature rows of the selected samples
    pub data: Array2<f64>,
    /// Original row positions of the selected samples
    pub indices: Vec<usize>,
}

impl PartitionTable {
    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Convert the table to a polars DataFrame with columns
    /// `predicted_label`, `true_label`, and `data` (a list column holding
    /// each feature row).
    #[cfg(feature = "polars")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame> {
        use polars::prelude::*;

        let predicted = Column::new("predicted_label".into(), self.predicted_label.to_vec());
        let truth = Column::new("true_label".into(), self.true_label.to_vec());
        let rows: Vec<Series> = self
            .data
            .outer_iter()
            .map(|row| Series::new("".into(), row.to_vec()))
            .collect();
        let data = Column::new("data".into(), rows);

        DataFrame::new(vec![predicted, truth, data])
            .map_err(|e| EvalError::internal(e.to_string()))
    }
}

/// Select the feature rows of the wrongly (or correctly) classified points.
///
/// Builds the row-aligned table of predicted label, true label, and feature
/// row, then keeps the rows where predicted ≠ true. Set `return_correct` to
/// keep the matching rows instead. All three inputs must share length N.
pub fn wrongly_classified(
    y_true: &ArrayView1<f64>,
    y_pred: &ArrayView1<f64>,
    x_test: &ArrayView2<f64>,
    return_correct: bool,
) -> Result<PartitionTable> {
    if y_true.len() != y_pred.len() {
        return Err(EvalError::dimension_mismatch(
            format!("y_true: {}", y_true.len()),
            format!("y_pred: {}", y_pred.len()),
        ));
    }
    if x_test.nrows() != y_true.len() {
        return Err(EvalError::dimension_mismatch(
            format!("y_true: {}", y_true.len()),
            format!("x_test rows: {}", x_test.nrows()),
        ));
    }

    let indices: Vec<usize> = y_true
        .iter()
        .zip(y_pred.iter())
        .enumerate()
        .filter(|(_, (&t, &p))| (t == p) == return_correct)
        .map(|(i, _)| i)
        .collect();

    let predicted_label = y_pred.select(Axis(0), &indices);
    let true_label = y_true.select(Axis(0), &indices);
    let data = x_test.select(Axis(0), &indices);

    Ok(PartitionTable {
        predicted_label,
        true_label,
        data,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn fixture() -> (
        ndarray::Array1<f64>,
        ndarray::Array1<f64>,
        ndarray::Array2<f64>,
    ) {
        let y_true = array![0.0, 1.0, 1.0, 0.0];
        let y_pred = array![0.0, 1.0, 0.0, 0.0];
        let x_test = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        (y_true, y_pred, x_test)
    }

    #[test]
    fn test_selects_misclassified_row() {
        let (y_true, y_pred, x_test) = fixture();
        let table =
            wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), false).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.indices, vec![2]);
        assert_eq!(table.true_label, array![1.0]);
        assert_eq!(table.predicted_label, array![0.0]);
        assert_eq!(table.data, array![[3.0, 30.0]]);
    }

    #[test]
    fn test_return_correct_keeps_order() {
        let (y_true, y_pred, x_test) = fixture();
        let table =
            wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), true).unwrap();

        assert_eq!(table.indices, vec![0, 1, 3]);
        assert_eq!(table.data.column(0).to_vec(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_partitions_are_complementary() {
        let (y_true, y_pred, x_test) = fixture();
        let wrong =
            wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), false).unwrap();
        let right =
            wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), true).unwrap();
        assert_eq!(wrong.len() + right.len(), y_true.len());
    }

    #[test]
    fn test_rejects_feature_row_mismatch() {
        let (y_true, y_pred, _) = fixture();
        let x_test = array![[1.0], [2.0], [3.0]];
        let err =
            wrongly_classified(&y_true.view(), &y_pred.view(), &x_test.view(), false).unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }
}
