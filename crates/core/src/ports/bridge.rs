// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion bridge port
//!
//! Converting a request into a service is a compound mutation: create the
//! service row, flip the request to `Convertida`, link the two. The backend
//! performs all of it atomically behind a single call; this crate never
//! issues the individual writes itself.

use crate::catalog::ServiceTypeId;
use crate::request::RequestId;
use crate::service::ServiceId;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Arguments for one conversion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionCall {
    pub request_id: RequestId,
    pub service_type_id: ServiceTypeId,
    /// Acting admin, recorded on the service as the assigned technician
    pub admin_id: String,
    /// Defaults to the current day when absent
    pub service_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Errors from the conversion procedure
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The procedure's own checks refused the conversion; nothing changed
    #[error("conversion rejected: {0}")]
    Rejected(String),

    #[error("bridge backend failure: {0}")]
    Backend(String),
}

/// The atomic conversion procedure.
///
/// One call per conversion attempt, never retried automatically: the
/// procedure is not idempotent, and a second call after an ambiguous
/// failure could convert twice.
#[async_trait]
pub trait ConversionBridge: Clone + Send + Sync + 'static {
    async fn convert(&self, call: ConversionCall) -> Result<ServiceId, BridgeError>;
}
