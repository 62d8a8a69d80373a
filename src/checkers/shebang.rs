//! Shell step shebang check.
//!
//! Jenkins runs a shell step without a shebang as `/bin/sh -xe`. A custom
//! shebang replaces those flags entirely, so a script starting with plain
//! `#!/bin/bash` keeps going after a failing command. The flags a shell
//! shebang must carry come from `required_shell_options`; whether steps
//! may omit the shebang comes from `allow_default_shebang`.

use std::{collections::BTreeSet, path::Path, sync::LazyLock};

use regex::Regex;

use super::{CheckOutcome, Checker};
use crate::{
    config::{Config, LINTER_SECTION},
    document::JobDocument,
};

static SHEBANG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#!\s*(?P<interpreter>\S+)(?P<args>.*)$").unwrap());

const SHELLS: &[&str] = &["sh", "bash", "dash", "ksh", "zsh"];

pub struct ShebangChecker;

impl Checker for ShebangChecker {
    fn check(&self, document: &JobDocument, config: &Config) -> CheckOutcome {
        let allow_default = config
            .get_bool(LINTER_SECTION, "allow_default_shebang")
            .unwrap_or(true);
        let required: BTreeSet<char> = config
            .get(LINTER_SECTION, "required_shell_options")
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();

        let problems: Vec<String> = document
            .shell_commands()
            .iter()
            .enumerate()
            .filter(|(_, command)| !command.trim().is_empty())
            .filter_map(|(index, command)| {
                check_script(command, allow_default, &required)
                    .map(|problem| format!("shell step #{}: {}", index + 1, problem))
            })
            .collect();

        if problems.is_empty() {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail(problems.join("; "))
        }
    }
}

fn check_script(script: &str, allow_default: bool, required: &BTreeSet<char>) -> Option<String> {
    let first_line = script.lines().next().unwrap_or("").trim_end();
    let Some(caps) = SHEBANG_REGEX.captures(first_line) else {
        return (!allow_default).then(|| "missing shebang".to_string());
    };

    let mut args = caps["args"].split_whitespace();
    let mut interpreter = program_name(&caps["interpreter"]);
    if interpreter == "env" {
        interpreter = args.next().map(program_name).unwrap_or_default();
    }
    if !SHELLS.contains(&interpreter.as_str()) {
        return None;
    }

    let flags: BTreeSet<char> = args
        .filter(|arg| arg.starts_with('-') && !arg.starts_with("--"))
        .flat_map(|arg| arg.chars().skip(1))
        .collect();
    let missing: String = required.difference(&flags).collect();
    if missing.is_empty() {
        None
    } else {
        Some(format!("'{}' is missing option(s) -{}", first_line, missing))
    }
}

fn program_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
