// SPDX-License-Identifier: CEPL-1.0
use std::fmt;

use thiserror::Error;

use crate::LifecycleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapabilityKind {
    Extension,
    Layer,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Extension => f.write_str("extension"),
            CapabilityKind::Layer => f.write_str("layer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("initialization failed: {0}")]
    Initialization(String),

    #[error("{kind} {name} is not supported!")]
    UnsupportedCapability { kind: CapabilityKind, name: String },

    #[error("diagnostics setup failed: could not resolve {0}")]
    DiagnosticsSetup(&'static str),

    #[error("no suitable physical device ({candidates} inspected)")]
    NoSuitableDevice { candidates: usize },

    #[error("{call} failed: {reason}")]
    Api { call: &'static str, reason: String },

    #[error("renderer is {0}, not ready")]
    NotReady(LifecycleState),

    #[error("renderer already initialized ({0})")]
    AlreadyInitialized(LifecycleState),
}

impl RenderError {
    pub fn unsupported(kind: CapabilityKind, name: impl Into<String>) -> Self {
        RenderError::UnsupportedCapability {
            kind,
            name: name.into(),
        }
    }
}
