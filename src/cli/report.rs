//! Report formatting and printing utilities.
//!
//! Human output lists each failing job with the checkers that failed it,
//! then a one-line summary. JSON output carries the same data plus the
//! checkers that ran for every job.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::{Value, json};

use super::args::OutputFormat;
use crate::lint::{JobReport, RunReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(report: &RunReport, format: OutputFormat) -> io::Result<()> {
    print_to(report, format, &mut io::stdout().lock())
}

pub fn print_to<W: Write>(report: &RunReport, format: OutputFormat, writer: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Human => print_human(report, writer),
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&compose_json(report))?;
            writeln!(writer, "{}", out)
        }
    }
}

fn print_human<W: Write>(report: &RunReport, writer: &mut W) -> io::Result<()> {
    for job in report.failed_jobs() {
        print_job(report, job, writer)?;
    }
    print_summary(report, writer)
}

fn print_job<W: Write>(report: &RunReport, job: &JobReport, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "{}: job \"{}\" failed {} {}",
        "error".bold().red(),
        job.job,
        job.failures.len(),
        if job.failures.len() == 1 { "check" } else { "checks" }
    )?;
    writeln!(
        writer,
        "  {} {}",
        "-->".blue(),
        report.directory.join(&job.job).display()
    )?;
    for failure in &job.failures {
        match &failure.message {
            Some(message) => writeln!(
                writer,
                "  {} {}: {}",
                "=".blue(),
                failure.checker.cyan(),
                message
            )?,
            None => writeln!(writer, "  {} {}", "=".blue(), failure.checker.cyan())?,
        }
    }
    writeln!(writer)
}

fn print_summary<W: Write>(report: &RunReport, writer: &mut W) -> io::Result<()> {
    let total = report.jobs.len();
    let noun = if total == 1 { "job" } else { "jobs" };
    let failed = report.failed_jobs().count();

    if failed == 0 {
        writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Checked {} {} - no issues found", total, noun).green()
        )
    } else {
        writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} of {} {} failed", failed, total, noun).red()
        )
    }
}

/// Compose the JSON report (pure) for testing/snapshot purposes.
pub fn compose_json(report: &RunReport) -> Value {
    let jobs: Vec<Value> = report
        .jobs
        .iter()
        .map(|job| {
            json!({
                "job": job.job,
                "passed": job.passed(),
                "checked": job.checked,
                "failures": job.failures,
            })
        })
        .collect();
    json!({
        "directory": report.directory,
        "passed": report.passed(),
        "jobs": jobs,
        "summary": {
            "jobs": report.jobs.len(),
            "failed": report.failed_jobs().count(),
        },
    })
}
