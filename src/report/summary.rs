//! Run summary report: dataset, training set, confusion matrix and accuracy

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    ClassFrequency, CorrelationMatrix, Evaluation, PipelineContext, CLASS_COLUMN,
};
use crate::status;

/// Number of features listed in the correlation section
const TOP_CORRELATIONS: usize = 5;

/// Summary of a full pipeline run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub class_frequency: ClassFrequency,
    pub training_fraud: usize,
    pub training_legit: usize,
    pub evaluation: Option<Evaluation>,
    pub support_vectors: usize,
    pub solver_iterations: usize,
    pub solver_converged: bool,
    pub top_correlations: Vec<(String, f64)>,
    pub load_time: Duration,
    pub pipeline_time: Duration,
}

impl RunSummary {
    pub fn from_context(context: &PipelineContext) -> Self {
        let model = context.model();
        Self {
            class_frequency: context.class_frequency(),
            training_fraud: context.training_set().fraud_count(),
            training_legit: context.training_set().legit_count(),
            evaluation: Some(*context.evaluation()),
            support_vectors: model.support_vectors(),
            solver_iterations: model.iterations(),
            solver_converged: model.converged(),
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_pipeline_time(&mut self, elapsed: Duration) {
        self.pipeline_time = elapsed;
    }

    pub fn set_correlations(&mut self, matrix: &CorrelationMatrix) {
        self.top_correlations = matrix
            .ranked_against(CLASS_COLUMN)
            .into_iter()
            .take(TOP_CORRELATIONS)
            .collect();
    }

    pub fn display(&self) {
        status!();
        status!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        status!("    {}", style("─".repeat(50)).dim());
        status!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Transactions"),
            Cell::new(self.class_frequency.total()),
        ]);
        table.add_row(vec![
            Cell::new("✅ Legit"),
            Cell::new(self.class_frequency.legit),
        ]);
        table.add_row(vec![
            Cell::new("🚨 Fraud"),
            Cell::new(format!(
                "{} ({:.3}%)",
                self.class_frequency.fraud,
                self.class_frequency.fraud_ratio() * 100.0
            ))
            .fg(Color::Red),
        ]);
        table.add_row(vec![
            Cell::new("⚖️  Training Set"),
            Cell::new(format!(
                "{} fraud + {} legit",
                self.training_fraud, self.training_legit
            )),
        ]);
        table.add_row(vec![
            Cell::new("📐 Support Vectors"),
            Cell::new(self.support_vectors),
        ]);
        table.add_row(vec![
            Cell::new("🔁 Solver Iterations"),
            Cell::new(self.solver_iterations).fg(if self.solver_converged {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        if let Some(eval) = &self.evaluation {
            let color = if eval.accuracy >= 95.0 {
                Color::Green
            } else if eval.accuracy >= 80.0 {
                Color::Yellow
            } else {
                Color::Red
            };
            table.add_row(vec![
                Cell::new("🎯 Accuracy"),
                Cell::new(format!("{:.4}%", eval.accuracy))
                    .fg(color)
                    .add_attribute(Attribute::Bold),
            ]);
            for (name, metric) in [
                ("Precision", eval.confusion.precision()),
                ("Recall", eval.confusion.recall()),
                ("F1", eval.confusion.f1()),
            ] {
                table.add_row(vec![
                    Cell::new(format!("   {}", name)),
                    Cell::new(fmt_metric(metric)),
                ]);
            }
        }

        print_indented(&table);

        if let Some(eval) = &self.evaluation {
            status!();
            status!(
                "    {} {}",
                style("🧮").cyan(),
                style("CONFUSION MATRIX").white().bold()
            );
            status!("    {}", style("─".repeat(50)).dim());
            print_indented(&confusion_table(eval));
        }

        if !self.top_correlations.is_empty() {
            status!();
            status!(
                "    {} {}",
                style("🔗").cyan(),
                style("STRONGEST CORRELATIONS WITH CLASS").white().bold()
            );
            status!("    {}", style("─".repeat(50)).dim());
            for (name, r) in &self.top_correlations {
                status!("      {} {:<8} {:>+.4}", style("•").dim(), name, r);
            }
        }

        status!();
        status!(
            "    {}",
            style(format!(
                "Load {:.2}s · Pipeline {:.2}s",
                self.load_time.as_secs_f64(),
                self.pipeline_time.as_secs_f64()
            ))
            .dim()
        );
    }
}

/// Rows are actual classes, columns are predicted classes
pub fn confusion_table(eval: &Evaluation) -> Table {
    let rows = eval.confusion.as_rows();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Predict not fraud").add_attribute(Attribute::Bold),
        Cell::new("Predict fraud").add_attribute(Attribute::Bold),
    ]);
    for (label, row) in ["Actual not fraud", "Actual fraud"].iter().zip(rows.iter()) {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(row[0]).set_alignment(CellAlignment::Right),
            Cell::new(row[1]).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn fmt_metric(metric: Option<f64>) -> String {
    metric.map_or_else(|| "n/a".to_string(), |m| format!("{:.4}", m))
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        status!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ConfusionMatrix;

    #[test]
    fn test_confusion_table_layout() {
        let eval = Evaluation {
            confusion: ConfusionMatrix {
                legit_as_legit: 90,
                legit_as_fraud: 4,
                fraud_as_legit: 1,
                fraud_as_fraud: 5,
            },
            accuracy: 95.0,
        };
        let rendered = confusion_table(&eval).to_string();
        assert!(rendered.contains("Actual not fraud"));
        assert!(rendered.contains("Predict fraud"));
        assert!(rendered.contains("90"));
    }

    #[test]
    fn test_fmt_metric() {
        assert_eq!(fmt_metric(None), "n/a");
        assert_eq!(fmt_metric(Some(0.5)), "0.5000");
    }
}
