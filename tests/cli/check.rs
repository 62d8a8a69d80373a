use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CLEAN_JOB, CliTest, NO_TIMESTAMPS_JOB, stderr, stdout};

#[test]
fn test_empty_directory_passes() -> Result<()> {
    let test = CliTest::with_jobs_dir()?;

    let output = test.lint_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Checked 0 jobs - no issues found\n");

    Ok(())
}

#[test]
fn test_clean_jobs_pass() -> Result<()> {
    let test = CliTest::with_jobs(&[("some", CLEAN_JOB), ("files", CLEAN_JOB)])?;

    let output = test.lint_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Checked 2 jobs - no issues found\n");

    Ok(())
}

#[test]
fn test_failing_job_exits_one() -> Result<()> {
    let test = CliTest::with_jobs(&[("some", NO_TIMESTAMPS_JOB), ("files", CLEAN_JOB)])?;

    let output = test.lint_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: job \"some\" failed 1 check"), "{}", out);
    assert!(out.contains("= check_timestamps: Timestamper build wrapper is not configured"));
    assert!(!out.contains("job \"files\""));
    assert!(out.ends_with("\u{2718} 1 of 2 jobs failed\n"));

    Ok(())
}

#[test]
fn test_all_failures_reported() -> Result<()> {
    let job = r#"<project>
  <builders>
    <hudson.tasks.Shell><command>#!/bin/bash
make</command></hudson.tasks.Shell>
    <hudson.tasks.Shell><command></command></hudson.tasks.Shell>
  </builders>
</project>"#;
    let test = CliTest::with_jobs(&[("job", job)])?;

    let output = test.lint_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("failed 3 checks"), "{}", out);
    assert!(out.contains("= check_for_empty_shell: Empty shell build step(s): #2"));
    assert!(out.contains("= check_shebang: shell step #1: '#!/bin/bash' is missing option(s) -eux"));
    assert!(out.contains("= check_timestamps:"));

    Ok(())
}

#[test]
fn test_disabled_checker_skipped() -> Result<()> {
    let test = CliTest::with_jobs(&[("some", NO_TIMESTAMPS_JOB), ("files", CLEAN_JOB)])?;
    test.write_file(
        "linter.toml",
        r#"
[jenkins]
url = "https://jenkins.example.com"

[job_linter]
disabled-checker-names = "check_timestamps"
"#,
    )?;

    let output = test.lint_command().args(["--conf", "linter.toml"]).output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));

    Ok(())
}

#[test]
fn test_config_options_reach_checkers() -> Result<()> {
    let test = CliTest::with_jobs(&[("job", NO_TIMESTAMPS_JOB)])?;
    test.write_file(
        "linter.toml",
        r#"
[job_linter]
disabled-checker-names = ["check_timestamps"]
allow_default_shebang = false
"#,
    )?;

    let output = test.lint_command().args(["--conf", "linter.toml"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("= check_shebang: shell step #1: missing shebang"));

    Ok(())
}

#[test]
fn test_malformed_job_is_error() -> Result<()> {
    let test = CliTest::with_jobs(&[("broken", "<project><builders></project>"), ("ok", CLEAN_JOB)])?;

    let output = test.lint_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("Error: failed to parse job"), "{}", err);
    assert!(err.contains("broken"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_jobs(&[("some", NO_TIMESTAMPS_JOB), ("files", CLEAN_JOB)])?;

    let output = test.lint_command().args(["--format", "json"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["passed"], false);
    assert_eq!(json["summary"]["jobs"], 2);
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["jobs"][0]["job"], "files");
    assert_eq!(json["jobs"][1]["job"], "some");
    assert_eq!(json["jobs"][1]["failures"][0]["checker"], "check_timestamps");
    assert_eq!(json["jobs"][0]["checked"].as_array().map(Vec::len), Some(4));

    Ok(())
}

#[test]
fn test_ini_config_shared_with_job_builder() -> Result<()> {
    let test = CliTest::with_jobs(&[("some", NO_TIMESTAMPS_JOB), ("files", CLEAN_JOB)])?;
    test.write_file(
        "jenkins_jobs.ini",
        "[jenkins]\nurl=https://jenkins.example.com\nuser=admin\n\n\
         [job_builder]\nignore_cache=True\n\n\
         [job_linter]\ndisabled-checker-names = check_timestamps\n",
    )?;

    let output = test.lint_command().args(["--conf", "jenkins_jobs.ini"]).output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output), "\u{2713} Checked 2 jobs - no issues found\n");

    Ok(())
}

#[test]
fn test_ini_disable_list_with_unknown_name() -> Result<()> {
    let test = CliTest::with_jobs(&[("job", CLEAN_JOB)])?;
    test.write_file("config.ini", "[job_linter]\ndisabled-checker-names = disable_me\n")?;

    let output = test.lint_command().args(["--conf", "config.ini"]).output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    Ok(())
}
