use anyhow::Result;
use tracing::debug;

use super::args::Arguments;
use crate::{
    config::Config,
    document::JobDocument,
    lint::{Linter, RunReport, list_jobs},
};

/// Validate the inputs, then lint every job in the directory.
///
/// The directory listing and the config file are both read before any job
/// is parsed, so a bad directory or config file never reaches the linter.
///
/// # Returns
/// - `Ok(RunReport)` once every job has been linted
/// - `Err` for setup errors and unparseable jobs
pub fn run(args: &Arguments) -> Result<RunReport> {
    run_with(args, &Linter::default())
}

pub fn run_with(args: &Arguments, linter: &Linter) -> Result<RunReport> {
    let names = list_jobs(&args.directory)?;
    let config = match &args.conf {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };

    debug!(checkers = ?linter.registry().names(), jobs = names.len(), "starting run");
    let report = linter.lint_entries_with(&args.directory, &names, &config, JobDocument::from_file)?;
    Ok(report)
}
