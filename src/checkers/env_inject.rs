//! EnvInject properties content check.
//!
//! EnvInject reads `propertiesContent` as a Java properties file, not as a
//! shell script. Lines such as `export FOO=bar` or `FOO="$(cmd)"` are
//! silently turned into odd variable names or literal values.

use std::sync::LazyLock;

use regex::Regex;

use super::{CheckOutcome, Checker};
use crate::{config::Config, document::JobDocument};

static PROPERTY_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*\s*=").unwrap());

/// Places EnvInject can appear in a job.
const PROPERTIES_PATHS: &[&str] = &[
    "properties/EnvInjectJobProperty/info/propertiesContent",
    "buildWrappers/EnvInjectBuildWrapper/info/propertiesContent",
    "builders/EnvInjectBuilder/info/propertiesContent",
];

pub struct EnvInjectChecker;

impl Checker for EnvInjectChecker {
    fn check(&self, document: &JobDocument, _config: &Config) -> CheckOutcome {
        let invalid: Vec<&str> = PROPERTIES_PATHS
            .iter()
            .flat_map(|path| document.find_all(path))
            .flat_map(|content| content.text.lines())
            .map(str::trim)
            .filter(|line| !is_valid_line(line))
            .collect();

        if invalid.is_empty() {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail(format!(
                "EnvInject properties must be KEY=VALUE lines, found: {}",
                invalid.join(" | ")
            ))
        }
    }
}

fn is_valid_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || PROPERTY_LINE_REGEX.is_match(line)
}
