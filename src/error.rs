//! Error types for the lint pipeline.
//!
//! Failing checks are never errors; they are reported through
//! [`crate::lint::JobReport`]. Errors here abort a run.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while turning a job file into a [`crate::document::JobDocument`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    Empty,

    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    #[error("unclosed element <{0}>")]
    Unclosed(String),

    #[error("content after the root element")]
    TrailingContent,
}

/// Errors that stop a lint run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("cannot read directory '{}': {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {message}", path.display())]
    ConfigSyntax { path: PathBuf, message: String },

    #[error("failed to parse job '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

impl LintError {
    /// True for errors detected before any document is linted.
    pub fn is_setup(&self) -> bool {
        !matches!(self, LintError::Parse { .. })
    }
}
