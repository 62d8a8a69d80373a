//! Timestamper check for freestyle, matrix and maven jobs.
//!
//! Pipeline jobs (`flow-definition`) and other job kinds configure
//! timestamps in their script, so they always pass.

use super::{CheckOutcome, Checker};
use crate::{config::Config, document::JobDocument};

const TIMESTAMPER_WRAPPER: &str = "buildWrappers/hudson.plugins.timestamper.TimestamperBuildWrapper";

const WRAPPED_JOB_KINDS: &[&str] = &["project", "matrix-project", "maven2-moduleset"];

pub struct TimestamperChecker;

impl Checker for TimestamperChecker {
    fn check(&self, document: &JobDocument, _config: &Config) -> CheckOutcome {
        if !WRAPPED_JOB_KINDS.contains(&document.kind()) {
            return CheckOutcome::pass();
        }
        if document.find(TIMESTAMPER_WRAPPER).is_some() {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail("Timestamper build wrapper is not configured")
        }
    }
}
