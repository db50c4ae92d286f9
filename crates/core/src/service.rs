// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service work orders produced by converting an approved request

use crate::catalog::{EquipmentId, ServiceTypeId};
use crate::request::RequestId;
use chrono::{DateTime, NaiveDate, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive as _;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

pub type ServiceId = i64;

/// Work-order progress, persisted as a bare integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(i32)]
pub enum ServiceStatus {
    Pendiente = 1,
    EnAtencion = 2,
    Atendido = 3,
}

impl ServiceStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_i32(code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::EnAtencion => "En atención",
            Self::Atendido => "Atendido",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ServiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for ServiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("invalid service status code: {code}")))
    }
}

/// A scheduled unit of work. Conversion creates services in `Pendiente` with
/// the converting admin recorded as the assigned technician and the request's
/// equipment and description carried over.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub equipment_id: EquipmentId,
    pub service_type_id: ServiceTypeId,
    pub technician_id: Option<String>,
    pub request_id: Option<RequestId>,
    pub status: ServiceStatus,
    pub service_date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
