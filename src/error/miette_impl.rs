//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{Stage, TaskError};

/// A diagnostic wrapper for task errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct TaskDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(err: &TaskError) -> Option<String> {
    let text = match err {
        TaskError::Configure(e) if e.stage == Stage::Open => {
            "Check that the input path exists and is readable"
        }
        TaskError::Configure(_) => {
            "The stream failed while skipping committed records; restart the task to retry from the committed offset"
        }
        TaskError::Drain(_) => "Reconfigure the task; it resumes from the last committed offset",
        TaskError::InvalidState { .. } => "Call start() before poll()",
        TaskError::Store(_) => "Check the offset store path and its permissions",
        TaskError::Config(_) => "Check the task configuration file",
    };
    Some(text.into())
}

impl From<TaskError> for TaskDiagnostic {
    fn from(err: TaskError) -> Self {
        let help = help_for(&err);
        match err {
            TaskError::Configure(e) | TaskError::Drain(e) => TaskDiagnostic {
                message: format!("[{}] on '{}' at offset {}", e.stage, e.target, e.offset),
                source: Some(e.error),
                help,
                severity: Severity::Error,
            },
            other => TaskDiagnostic {
                message: other.to_string(),
                source: None,
                help,
                severity: Severity::Error,
            },
        }
    }
}

impl From<TaskError> for miette::Report {
    fn from(err: TaskError) -> Self {
        miette::Report::new(TaskDiagnostic::from(err))
    }
}
