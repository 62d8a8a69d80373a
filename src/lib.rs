//! job-linter - lint Jenkins job configuration XML
//!
//! job-linter is a CLI tool and library for checking a directory of job
//! configuration files (one XML document per job) against a set of
//! independent checkers. Each job passes when every enabled checker passes;
//! the run passes when every job passes.
//!
//! ## Module Structure
//!
//! - `checkers`: Checker contract, registry, and the bundled checkers
//! - `cli`: Command-line interface layer (arguments, reporting, exit status)
//! - `config`: Configuration loading, defaults, and per-job scoping
//! - `document`: Job document parsing and queries
//! - `error`: Error types
//! - `lint`: Per-job linting and the directory batch driver

pub mod checkers;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod lint;

pub use checkers::{CheckOutcome, CheckResult, Checker, Registry};
pub use config::{Config, scope, scope_with};
pub use document::JobDocument;
pub use error::{DocumentError, LintError};
pub use lint::{JobReport, Linter, RunReport};
