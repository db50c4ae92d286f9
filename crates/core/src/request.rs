// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service request entity and input normalization

use crate::catalog::EquipmentId;
use crate::error::LifecycleError;
use crate::service::ServiceId;
use crate::status::RequestStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RequestId = i64;

/// Maximum accepted length for free-text fields, in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// A service request as stored.
///
/// `service_id` is set if and only if the request is `Convertida`; the link
/// is written by the conversion procedure, never directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub equipment_id: EquipmentId,
    pub requester_id: String,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub service_id: Option<ServiceId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for filing a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequest {
    pub equipment_id: EquipmentId,
    pub requester_id: String,
    pub description: Option<String>,
}

/// Normalize a free-text field: trim, store blank input as absent, reject
/// oversize input. Blank text is never persisted as an empty string.
pub fn normalize_text(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<String>, LifecycleError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(LifecycleError::Validation(format!(
            "{field} exceeds {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Normalize a request description
pub fn normalize_description(raw: Option<&str>) -> Result<Option<String>, LifecycleError> {
    normalize_text("description", raw)
}
