//! Domain primitive types used across the taskdef workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four independent update strings a run accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateKind {
    /// Container image updates.
    Image,
    /// Environment variable updates.
    Environment,
    /// Docker label updates.
    DockerLabel,
    /// Secret updates.
    Secret,
}

impl UpdateKind {
    /// Order in which update strings are applied during a run.
    pub const APPLY_ORDER: [Self; 4] = [
        Self::Environment,
        Self::DockerLabel,
        Self::Secret,
        Self::Image,
    ];
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image name"),
            Self::Environment => write!(f, "environment variable"),
            Self::DockerLabel => write!(f, "docker label"),
            Self::Secret => write!(f, "secret"),
        }
    }
}
