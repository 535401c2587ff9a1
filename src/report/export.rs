//! Persisting metric reports to disk.

use crate::core::error::Result;
use crate::report::MetricReport;
use std::fs::File;
use std::path::Path;

/// Write a metric report as pretty-printed JSON.
pub fn write_json<P: AsRef<Path>>(report: &MetricReport, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, report)?;
    log::info!("wrote metric report to {}", path.as_ref().display());
    Ok(())
}

/// Write a metric report as a two-column `metric,value` CSV.
pub fn write_csv<P: AsRef<Path>>(report: &MetricReport, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["metric", "value"])?;
    writer.write_record(["dataset", report.mode.as_str()])?;

    let rows = [
        ("accuracy", report.accuracy),
        ("recall", report.recall),
        ("auc", report.roc_auc),
        ("precision", report.precision),
        ("average_precision", report.average_precision),
        ("precision_micro", report.precision_micro),
        ("precision_macro", report.precision_macro),
        ("f1", report.f1),
        ("r2", report.r2),
        ("logloss", report.log_loss),
        ("mse", report.mse),
    ];
    for (name, value) in rows {
        let formatted = format!("{:.6}", value);
        writer.write_record([name, formatted.as_str()])?;
    }
    writer.flush()?;
    log::info!("wrote metric report to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_report() -> MetricReport {
        let y_true = array![1.0, 1.0, 0.0, 0.0];
        let y_pred = array![1.0, 0.0, 0.0, 0.0];
        let y_score = array![0.8, 0.4, 0.3, 0.1];
        MetricReport::compute(&y_true.view(), &y_pred.view(), &y_score.view(), "test").unwrap()
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = sample_report();
        write_json(&report, &path).unwrap();

        let restored: MetricReport =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn test_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_csv(&sample_report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "metric,value");
        assert_eq!(lines[1], "dataset,test");
        // Header, dataset row, eleven metric rows.
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().any(|line| line.starts_with("accuracy,")));
    }
}
