use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;

const BIN_NAME: &str = "job-linter";

/// Directory, relative to the project root, that holds the job files.
pub const JOBS_DIR: &str = "jobs";

/// A freestyle job every bundled checker accepts.
pub const CLEAN_JOB: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<project>
  <builders>
    <hudson.tasks.Shell>
      <command>#!/bin/bash -eux
make test</command>
    </hudson.tasks.Shell>
  </builders>
  <buildWrappers>
    <hudson.plugins.timestamper.TimestamperBuildWrapper plugin="timestamper@1.8"/>
  </buildWrappers>
</project>
"#;

/// A freestyle job without the Timestamper wrapper.
pub const NO_TIMESTAMPS_JOB: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<project>
  <builders>
    <hudson.tasks.Shell>
      <command>make test</command>
    </hudson.tasks.Shell>
  </builders>
</project>
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with an empty jobs directory.
    pub fn with_jobs_dir() -> Result<Self> {
        let test = Self::new()?;
        fs::create_dir_all(test.project_dir.join(JOBS_DIR))?;
        Ok(test)
    }

    pub fn with_jobs(jobs: &[(&str, &str)]) -> Result<Self> {
        let test = Self::with_jobs_dir()?;
        for (name, content) in jobs {
            test.write_file(&format!("{}/{}", JOBS_DIR, name), content)?;
        }
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn lint_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg(JOBS_DIR);
        cmd
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
