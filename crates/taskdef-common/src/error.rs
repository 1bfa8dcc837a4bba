//! Unified error types for the taskdef workspace.
//!
//! Every failure is terminal for a run: the CLI reports it on stderr and
//! exits non-zero without writing partial output.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::UpdateKind;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum TaskDefError {
    /// The descriptor does not have the structure needed to locate containers.
    #[error("no valid task definition found: {message}")]
    MalformedDescriptor {
        /// Description of the structural problem.
        message: String,
    },

    /// An update string violates its grammar.
    #[error("{kind} update parameter format is incorrect ({reason}): {directive}")]
    DirectiveFormat {
        /// Which of the four update strings failed.
        kind: UpdateKind,
        /// What the parser expected.
        reason: String,
        /// The offending update string, verbatim.
        directive: String,
    },

    /// A directive names a container absent from the descriptor.
    #[error("the container {container} named in the {kind} updates is not defined in the existing task definition")]
    UnknownContainer {
        /// The unresolved container name.
        container: String,
        /// Which update string referenced it.
        kind: UpdateKind,
    },

    /// The task definition file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl TaskDefError {
    /// Builds a [`TaskDefError::DirectiveFormat`] for `directive`.
    #[must_use]
    pub fn directive(kind: UpdateKind, reason: impl Into<String>, directive: &str) -> Self {
        Self::DirectiveFormat {
            kind,
            reason: reason.into(),
            directive: directive.to_owned(),
        }
    }

    /// Builds a [`TaskDefError::MalformedDescriptor`].
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TaskDefError>;
