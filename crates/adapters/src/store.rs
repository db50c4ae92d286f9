// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fault-injecting store wrapper for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sisgemec_core::ports::{NewRequestRow, Page, RequestFilter, RequestStore, StoreError};
use sisgemec_core::{RequestId, RequestStatus, ServiceRequest};
use std::sync::{Arc, Mutex};

/// Wrapper that fails the next N writes with a backend error.
///
/// Reads always pass through. Used to prove that a failed write leaves the
/// caller's view of the row untouched.
#[derive(Clone)]
pub struct FaultyStore<S> {
    inner: S,
    failures_left: Arc<Mutex<u32>>,
}

impl<S> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failures_left: Arc::new(Mutex::new(0)),
        }
    }

    /// Make the next `count` writes fail
    pub fn fail_writes(&self, count: u32) {
        *self.failures_left.lock().unwrap_or_else(|e| e.into_inner()) = count;
    }

    fn take_failure(&self) -> bool {
        let mut left = self.failures_left.lock().unwrap_or_else(|e| e.into_inner());
        if *left > 0 {
            *left -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl<S: RequestStore> RequestStore for FaultyStore<S> {
    async fn insert_request(&self, row: NewRequestRow) -> Result<ServiceRequest, StoreError> {
        if self.take_failure() {
            return Err(StoreError::Backend("injected write fault".to_string()));
        }
        self.inner.insert_request(row).await
    }

    async fn request(&self, id: RequestId) -> Result<Option<ServiceRequest>, StoreError> {
        self.inner.request(id).await
    }

    async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Page<ServiceRequest>, StoreError> {
        self.inner.list_requests(filter).await
    }

    async fn update_status(
        &self,
        id: RequestId,
        to: RequestStatus,
        updated_at: DateTime<Utc>,
        expected: Option<RequestStatus>,
    ) -> Result<ServiceRequest, StoreError> {
        if self.take_failure() {
            return Err(StoreError::Backend("injected write fault".to_string()));
        }
        self.inner.update_status(id, to, updated_at, expected).await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
