// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle policy configuration
//!
//! The policy picks between behaviors the state machine deliberately leaves
//! open. It is loaded once from TOML and passed to the lifecycle manager at
//! construction.

use crate::status::RequestStatus;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a policy file
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which statuses a request may be converted from.
///
/// `ApprovedOnly` is the hardened rule. `AnyActive` accepts every
/// non-terminal status and exists for deployments that relied on converting
/// straight from `Enviada` or `En revisión`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionGate {
    #[default]
    ApprovedOnly,
    AnyActive,
}

impl ConversionGate {
    pub fn allows(self, status: RequestStatus) -> bool {
        match self {
            Self::ApprovedOnly => status == RequestStatus::Approved,
            Self::AnyActive => !status.is_terminal(),
        }
    }
}

/// Behavioral knobs for the lifecycle manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    #[serde(default)]
    pub conversion_gate: ConversionGate,
}

impl LifecyclePolicy {
    /// Parse a policy from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, PolicyError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a policy from a TOML file
    pub fn from_path(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
