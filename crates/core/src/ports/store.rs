// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence ports for requests and services
//!
//! One parameterized contract per entity instead of one repository per
//! screen. Listings are always paginated with a fixed page size and a
//! stable newest-first ordering.

use crate::catalog::{EquipmentId, ServiceTypeId};
use crate::request::{RequestId, ServiceRequest};
use crate::service::{Service, ServiceId, ServiceStatus};
use crate::status::RequestStatus;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed page size for every listing
pub const PAGE_SIZE: usize = 10;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A compare-and-set write found a different status than the caller read
    #[error("stale status: expected {expected}, found {actual}")]
    StaleStatus { expected: i32, actual: i32 },

    /// An integrity rule rejected the write (ownership, linkage, codes)
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// One page of a listing, with the total row count across all pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }

    /// Number of pages needed to cover `total` rows
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(PAGE_SIZE as u64)
    }
}

/// Listing filter for requests. All criteria are conjunctive; absent fields
/// do not filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    /// 1-based page number
    pub page: u32,
    /// Case-insensitive substring match on the description
    pub search: Option<String>,
    pub status: Option<RequestStatus>,
    pub requester_id: Option<String>,
    /// Inclusive lower bound on the creation day
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation day
    pub date_to: Option<NaiveDate>,
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            status: None,
            requester_id: None,
            date_from: None,
            date_to: None,
        }
    }
}

/// Listing filter for services, same shape as [`RequestFilter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFilter {
    /// 1-based page number
    pub page: u32,
    pub status: Option<ServiceStatus>,
    pub service_type_id: Option<ServiceTypeId>,
    pub technician_id: Option<String>,
    pub equipment_id: Option<EquipmentId>,
    /// Inclusive lower bound on the service date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the service date
    pub date_to: Option<NaiveDate>,
}

impl Default for ServiceFilter {
    fn default() -> Self {
        Self {
            page: 1,
            status: None,
            service_type_id: None,
            technician_id: None,
            equipment_id: None,
            date_from: None,
            date_to: None,
        }
    }
}

/// Fields the store needs to insert a request. The store assigns the id and
/// always starts the row at `Submitted` with no linked service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequestRow {
    pub equipment_id: EquipmentId,
    pub requester_id: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields the store needs to insert a service. The store assigns the id and
/// starts the row at `Pendiente`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRow {
    pub equipment_id: EquipmentId,
    pub service_type_id: ServiceTypeId,
    pub technician_id: Option<String>,
    pub request_id: Option<RequestId>,
    pub service_date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persistence contract for service requests
#[async_trait]
pub trait RequestStore: Clone + Send + Sync + 'static {
    /// Insert a new request at `Submitted`, returning the stored row
    async fn insert_request(&self, row: NewRequestRow) -> Result<ServiceRequest, StoreError>;

    /// Fetch one request by id
    async fn request(&self, id: RequestId) -> Result<Option<ServiceRequest>, StoreError>;

    /// List requests matching the filter, newest-created first (ties broken
    /// by id descending so pagination is stable)
    async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Page<ServiceRequest>, StoreError>;

    /// Write a new status and refresh `updated_at`.
    ///
    /// `expected` of `Some(status)` makes the write compare-and-set: the
    /// store rejects with [`StoreError::StaleStatus`] if the row's status no
    /// longer matches, leaving the row untouched. `Converted` is refused
    /// here; that flip happens only inside the conversion procedure, which
    /// also links the service row.
    async fn update_status(
        &self,
        id: RequestId,
        to: RequestStatus,
        updated_at: DateTime<Utc>,
        expected: Option<RequestStatus>,
    ) -> Result<ServiceRequest, StoreError>;
}

/// Persistence contract for services
#[async_trait]
pub trait ServiceStore: Clone + Send + Sync + 'static {
    /// Insert a new service at `Pendiente`, returning the stored row
    async fn insert_service(&self, row: NewServiceRow) -> Result<Service, StoreError>;

    /// Fetch one service by id
    async fn service(&self, id: ServiceId) -> Result<Option<Service>, StoreError>;

    /// List services matching the filter, latest service date first (ties
    /// broken by id descending)
    async fn list_services(&self, filter: &ServiceFilter) -> Result<Page<Service>, StoreError>;

    /// Move a service to a new progress status
    async fn set_service_status(
        &self,
        id: ServiceId,
        to: ServiceStatus,
    ) -> Result<Service, StoreError>;
}
