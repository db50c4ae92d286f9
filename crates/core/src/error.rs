// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for lifecycle operations.
//!
//! Every fallible operation surfaces one of four categories so callers can
//! map failures uniformly: `Validation` for rejected input or an illegal
//! transition, `NotFound` for missing records, `Conflict` for concurrent
//! interference, and `Store` for backend faults.

use crate::ports::{BridgeError, CatalogError, StoreError};
use thiserror::Error;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl LifecycleError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            StoreError::StaleStatus { expected, actual } => Self::Conflict(format!(
                "status changed concurrently: expected {expected}, found {actual}"
            )),
            other => Self::Store(other),
        }
    }
}

impl From<BridgeError> for LifecycleError {
    fn from(err: BridgeError) -> Self {
        match err {
            // The bridge re-checks state under its own lock; a rejection after
            // our own validation passed means the request changed underneath us.
            BridgeError::Rejected(reason) => Self::Conflict(reason),
            BridgeError::Backend(message) => Self::Store(StoreError::Backend(message)),
        }
    }
}

impl From<CatalogError> for LifecycleError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Backend(message) => Self::Store(StoreError::Backend(message)),
        }
    }
}
