//! fraudsvm: Credit Card Fraud Classification CLI
//!
//! Loads a transaction file, derives the hour-of-day feature, trains a linear
//! SVM on a class-balanced subset and reports its accuracy on the full data.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use console::style;

use fraudsvm::cli::predict::{build_form, print_assignments, run_prediction};
use fraudsvm::cli::{Cli, Commands};
use fraudsvm::pipeline::{
    correlation_matrix, load_dataset, load_dataset_with_stats, InferenceRequest,
    InferenceService, PipelineContext, Stage,
};
use fraudsvm::report::{display_controls, export_metrics, MetricsExport, RunSummary};
use fraudsvm::status;
use fraudsvm::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, print_warning,
    set_status_to_stderr,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Keep stdout parseable when the prediction is printed as JSON
    set_status_to_stderr(cli.json);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Controls {
                input,
                assignments,
                infer_schema_length,
            } => run_controls(input, assignments, *infer_schema_length),
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let config = cli.training.pipeline_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, config.sample_size, config.seed, config.svm.c);

    // Step 1: Load dataset and derive the hour feature
    print_step_header(1, "Load & Derive Features");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading transactions...");
    let (dataset, stats) = match load_dataset_with_stats(input, cli.infer_schema_length) {
        Ok(loaded) => loaded,
        Err(e) => {
            finish_with_warning(&spinner, "Failed to load dataset");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let freq = dataset.class_frequency();
    status!("\n    {} Dataset Statistics:", style("✧").cyan());
    status!("      Rows: {}", stats.rows);
    status!("      Columns: {}", stats.columns);
    status!("      Estimated memory: {:.2} MB", stats.memory_mb);
    status!(
        "      Legit / Fraud: {} / {}",
        freq.legit,
        style(freq.fraud).red()
    );
    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    // Steps 2-4: balance, train, evaluate
    let pipeline_start = Instant::now();
    let spinner = create_spinner("Balancing, training and evaluating...");
    let mut timings: Vec<(Stage, Duration)> = Vec::new();
    let built = PipelineContext::build_observed(dataset, &config, |stage, elapsed| {
        timings.push((stage, elapsed));
    });
    let context = match built {
        Ok(context) => Arc::new(context),
        Err(e) => {
            finish_with_warning(&spinner, "Pipeline failed");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Pipeline complete");
    let pipeline_elapsed = pipeline_start.elapsed();

    for (i, (stage, elapsed)) in timings.iter().enumerate() {
        print_step_header(i as u8 + 2, stage.title());
        match stage {
            Stage::Balance => {
                let ts = context.training_set();
                print_success(&format!(
                    "Training set: {} fraud + {} legit",
                    ts.fraud_count(),
                    ts.legit_count()
                ));
            }
            Stage::Train => {
                let model = context.model();
                print_success(&format!(
                    "Fitted hyperplane with {} support vectors",
                    model.support_vectors()
                ));
                if !model.converged() {
                    print_warning(&format!(
                        "Solver hit the iteration limit ({}) before converging",
                        model.iterations()
                    ));
                }
            }
            Stage::Evaluate => {
                print_success(&format!(
                    "Accuracy is {:.4}%",
                    context.evaluation().accuracy
                ));
            }
        }
        print_step_time(*elapsed);
    }

    // Step 5: correlation matrix
    let correlation = if cli.no_correlation {
        None
    } else {
        print_step_header(5, "Correlation Analysis");
        let step_start = Instant::now();
        let spinner = create_spinner("Computing correlation matrix...");
        let matrix = correlation_matrix(context.dataset());
        match &matrix {
            Some(m) => finish_with_success(
                &spinner,
                &format!("Correlation matrix over {} columns", m.columns.len()),
            ),
            None => finish_with_warning(&spinner, "Not enough varying columns for correlation"),
        }
        print_step_time(step_start.elapsed());
        matrix
    };

    let mut summary = RunSummary::from_context(&context);
    summary.set_load_time(load_elapsed);
    summary.set_pipeline_time(pipeline_elapsed);
    if let Some(matrix) = &correlation {
        summary.set_correlations(matrix);
    }
    summary.display();

    if let Some(path) = &cli.export {
        let export = MetricsExport::from_context(
            &context,
            &config,
            &input.display().to_string(),
            correlation,
        );
        export_metrics(&export, path)?;
        print_success(&format!("Metrics written to {}", path.display()));
    }

    let service = InferenceService::ready(Arc::clone(&context));

    if cli.wants_prediction() {
        status!();
        status!(
            "    {} {}",
            style("🔮").cyan(),
            style("PREDICTION").white().bold()
        );
        status!("    {}", style("─".repeat(50)).dim());

        let request = match &cli.vector {
            Some(vector) => InferenceRequest::new(vector.clone()),
            None => {
                let form = build_form(context.dataset(), &cli.assignments)?;
                print_assignments(&form, &cli.assignments)?;
                form.request()
            }
        };
        run_prediction(&service, &request, cli.json)?;
    } else if !cli.assignments.is_empty() {
        print_info("--set values are only used together with --predict");
    }

    print_completion();

    Ok(())
}

/// Show the prediction form for an input file
fn run_controls(
    input: &Path,
    assignments: &[(String, f64)],
    infer_schema_length: usize,
) -> Result<()> {
    let spinner = create_spinner("Loading transactions...");
    let dataset = match load_dataset(input, infer_schema_length) {
        Ok(dataset) => dataset,
        Err(e) => {
            finish_with_warning(&spinner, "Failed to load dataset");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, &format!("Loaded {} transactions", dataset.len()));

    let form = build_form(&dataset, assignments)?;
    status!();
    display_controls(&form);
    status!();
    print_assignments(&form, assignments)?;

    Ok(())
}
