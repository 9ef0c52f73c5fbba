//! Prediction form handling for the command line

use anyhow::Result;
use console::style;

use crate::pipeline::{
    Dataset, FeatureControls, InferenceRequest, InferenceService, PipelineError, Verdict,
};
use crate::status;
use crate::utils::print_warning;

/// Build the prediction form from dataset bounds and apply FIELD=VALUE overrides
pub fn build_form(
    dataset: &Dataset,
    assignments: &[(String, f64)],
) -> Result<FeatureControls, PipelineError> {
    let mut form = FeatureControls::from_dataset(dataset);
    for (field, value) in assignments {
        form.set(field, *value)?;
    }
    Ok(form)
}

/// Print one status line per overridden field, plus bound warnings
pub fn print_assignments(form: &FeatureControls, assignments: &[(String, f64)]) -> Result<()> {
    for (field, _) in assignments {
        status!("      {} {}", style("•").dim(), form.describe(field)?);
    }
    for field in form.out_of_bounds() {
        print_warning(&format!("{} lies outside the range seen in the dataset", field));
    }
    Ok(())
}

/// Run one prediction and print it as text or JSON
pub fn run_prediction(
    service: &InferenceService,
    request: &InferenceRequest,
    as_json: bool,
) -> Result<Verdict> {
    let result = service.infer(request)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let verdict = match result.verdict {
            Verdict::Fraud => style("FRAUD").red().bold(),
            Verdict::Legit => style("LEGIT").green().bold(),
        };
        println!("    Verdict: {}", verdict);
        println!("    {}", style(result.message()).dim());
    }

    Ok(result.verdict)
}
