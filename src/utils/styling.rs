//! Terminal styling utilities

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::{style, Emoji};

use crate::status;

/// When set, status output goes to stderr and stdout only carries results
static STATUS_TO_STDERR: AtomicBool = AtomicBool::new(false);

pub fn set_status_to_stderr(enabled: bool) {
    STATUS_TO_STDERR.store(enabled, Ordering::Relaxed);
}

/// Write one status line to the current status stream. Used by `status!`.
pub fn status_line(args: fmt::Arguments<'_>) {
    if STATUS_TO_STDERR.load(Ordering::Relaxed) {
        eprintln!("{}", args);
    } else {
        println!("{}", args);
    }
}

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SCALES: Emoji<'_, '_> = Emoji("⚖️  ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("🔧 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    status!();
    status!(
        "    {} {}",
        style("fraudsvm").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    status!(
        "    {}",
        style("Balanced linear SVM for card transaction fraud").dim()
    );
    status!("    {}", style("━".repeat(50)).dim());
    status!();
}

/// Print configuration card
pub fn print_config(input: &Path, sample_size: usize, seed: u64, c: f64) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    status!("    ┌{}┐", line);
    status!(
        "    │ {}{}│",
        style("Configuration").cyan().bold(),
        " ".repeat(box_width - 16)
    );
    status!("    ├{}┤", line);
    status!("    │  {} Input:       {:<34}│", FOLDER, truncate_path(input, 33));
    status!(
        "    │  {} Sample size: {:<34}│",
        SCALES,
        style(sample_size).yellow()
    );
    status!("    │  {} Seed:        {:<34}│", DICE, style(seed).yellow());
    status!("    │  {} SVM C:       {:<34}│", GEAR, style(c).yellow());
    status!("    └{}┘", line);
    status!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    status!();
    status!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    status!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    status!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    status!("    {} {}", INFO, message);
}

/// Print a warning to stderr
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", WARN, style(message).yellow());
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    status!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    status!();
    status!(
        "    {} {}",
        ROCKET,
        style("fraudsvm run complete!").green().bold()
    );
    status!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}
