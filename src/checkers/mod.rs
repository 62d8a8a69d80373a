//! Checker contract and the compiled-in checker registry.
//!
//! A checker inspects one [`JobDocument`] against the scoped [`Config`] and
//! returns PASS or FAIL, optionally with a diagnostic message. Checkers are
//! independent of each other and carry no state between documents.
//!
//! ## Bundled checkers
//!
//! - `check_env_inject`: EnvInject properties are plain `KEY=VALUE` lines
//! - `check_for_empty_shell`: shell build steps have a command
//! - `check_shebang`: shell scripts run with the required shell options
//! - `check_timestamps`: freestyle-style jobs enable the Timestamper wrapper

pub mod env_inject;
pub mod shebang;
pub mod shell;
pub mod timestamps;

use std::collections::BTreeMap;

use crate::{config::Config, document::JobDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Pass,
    Fail,
}

/// Verdict of a single checker for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub result: CheckResult,
    pub message: Option<String>,
}

impl CheckOutcome {
    pub fn pass() -> Self {
        Self {
            result: CheckResult::Pass,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            result: CheckResult::Fail,
            message: Some(message.into()),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.result == CheckResult::Pass
    }
}

pub trait Checker: Send + Sync {
    fn check(&self, document: &JobDocument, config: &Config) -> CheckOutcome;
}

/// Name-ordered set of checkers.
///
/// Built once and then only read. Names are unique; registering a name
/// twice keeps the later checker.
#[derive(Default)]
pub struct Registry {
    checkers: BTreeMap<String, Box<dyn Checker>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The checkers compiled into this build.
    pub fn builtin() -> Self {
        Self::new()
            .with("check_env_inject", env_inject::EnvInjectChecker)
            .with("check_for_empty_shell", shell::EmptyShellChecker)
            .with("check_shebang", shebang::ShebangChecker)
            .with("check_timestamps", timestamps::TimestamperChecker)
    }

    pub fn with(mut self, name: &str, checker: impl Checker + 'static) -> Self {
        self.checkers.insert(name.to_string(), Box::new(checker));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Checker)> {
        self.checkers
            .iter()
            .map(|(name, checker)| (name.as_str(), checker.as_ref()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.checkers.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checkers.contains_key(name)
    }
}
