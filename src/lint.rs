//! Lint orchestration.
//!
//! [`Linter::lint_job`] runs every enabled checker against one document and
//! folds the verdicts into a [`JobReport`]. [`Linter::lint_directory`] does
//! that for each file in a directory, giving each job its own scoped copy of
//! the configuration, and collects the results into a [`RunReport`].

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    checkers::Registry,
    config::{Config, DISABLED_CHECKERS_KEY, LINTER_SECTION, scope_with},
    document::JobDocument,
    error::{DocumentError, LintError},
};

/// A checker that returned FAIL for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    pub checker: String,
    pub message: Option<String>,
}

/// Result of linting one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub job: String,
    /// Checkers that ran, in the order they ran.
    pub checked: Vec<String>,
    pub failures: Vec<CheckFailure>,
}

impl JobReport {
    /// True when no checker failed, including when none ran.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of linting a directory of jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub directory: PathBuf,
    /// One entry per job, sorted by job name.
    pub jobs: Vec<JobReport>,
}

impl RunReport {
    /// True when every job passed; an empty run passes.
    pub fn passed(&self) -> bool {
        self.jobs.iter().all(JobReport::passed)
    }

    pub fn failed_jobs(&self) -> impl Iterator<Item = &JobReport> {
        self.jobs.iter().filter(|job| !job.passed())
    }
}

pub struct Linter {
    registry: Registry,
    defaults: Config,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}

impl Linter {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            defaults: Config::defaults(),
        }
    }

    /// Replace the defaults merged into each job's configuration.
    pub fn with_defaults(mut self, defaults: Config) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every enabled checker against `document`.
    ///
    /// Checkers named in `job_linter.disabled-checker-names` are skipped.
    /// All other checkers run exactly once, even after one has failed, so
    /// the report carries every diagnostic. `job_name` is only used to
    /// attribute log lines and the report.
    pub fn lint_job(&self, job_name: &str, document: &JobDocument, config: &Config) -> JobReport {
        let disabled = config.get_list(LINTER_SECTION, DISABLED_CHECKERS_KEY);
        for name in disabled.iter().filter(|name| !self.registry.contains(name)) {
            warn!(job = job_name, checker = %name, "disabled checker is not registered");
        }

        let mut report = JobReport {
            job: job_name.to_string(),
            checked: Vec::new(),
            failures: Vec::new(),
        };

        for (name, checker) in self.registry.iter() {
            if disabled.iter().any(|d| d == name) {
                debug!(job = job_name, checker = name, "checker disabled");
                continue;
            }

            debug!(job = job_name, checker = name, "running checker");
            let outcome = checker.check(document, config);
            report.checked.push(name.to_string());

            if !outcome.is_pass() {
                warn!(
                    job = job_name,
                    checker = name,
                    message = outcome.message.as_deref().unwrap_or(""),
                    "check failed"
                );
                report.failures.push(CheckFailure {
                    checker: name.to_string(),
                    message: outcome.message,
                });
            }
        }

        report
    }

    /// Lint every entry of `dir`, parsing each with [`JobDocument::from_file`].
    pub fn lint_directory(&self, dir: &Path, global: &Config) -> Result<RunReport, LintError> {
        let names = list_jobs(dir)?;
        self.lint_entries_with(dir, &names, global, JobDocument::from_file)
    }

    /// Lint the named entries of `dir` using `parse` to load each one.
    ///
    /// Entries are processed in parallel; the report keeps the order of
    /// `names`. A parse error aborts the run, and when several entries fail
    /// the error reported is the one for the earliest name.
    pub fn lint_entries_with<F>(
        &self,
        dir: &Path,
        names: &[OsString],
        global: &Config,
        parse: F,
    ) -> Result<RunReport, LintError>
    where
        F: Fn(&Path) -> Result<JobDocument, DocumentError> + Sync,
    {
        let results: Vec<Result<JobReport, LintError>> = names
            .par_iter()
            .map(|name| -> Result<JobReport, LintError> {
                let path = dir.join(name);
                let job = name.to_string_lossy();
                debug!(job = %job, path = %path.display(), "parsing job");
                let document = parse(&path).map_err(|source| LintError::Parse {
                    path: path.clone(),
                    source,
                })?;
                let config = scope_with(global, &self.defaults);
                Ok(self.lint_job(&job, &document, &config))
            })
            .collect();
        let jobs = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        Ok(RunReport {
            directory: dir.to_path_buf(),
            jobs,
        })
    }
}

/// Names of the entries directly inside `dir`, sorted.
pub fn list_jobs(dir: &Path) -> Result<Vec<OsString>, LintError> {
    let metadata = fs::metadata(dir).map_err(|source| LintError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(LintError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry
                .map(|e| e.file_name().to_os_string())
                .map_err(|err| LintError::Directory {
                    path: dir.to_path_buf(),
                    source: err.into(),
                })
        })
        .collect()
}
