// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced port wrappers for consistent observability
//!
//! The lifecycle core stays free of logging; wrapping its store and bridge
//! in these decorators gives every mutation a span with timing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sisgemec_core::ports::{
    BridgeError, ConversionBridge, ConversionCall, NewRequestRow, Page, RequestFilter,
    RequestStore, StoreError,
};
use sisgemec_core::{RequestId, RequestStatus, ServiceId, ServiceRequest};
use tracing::Instrument;

/// Wrapper that adds tracing to any RequestStore
#[derive(Clone)]
pub struct TracedRequestStore<S> {
    inner: S,
}

impl<S> TracedRequestStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: RequestStore> RequestStore for TracedRequestStore<S> {
    async fn insert_request(&self, row: NewRequestRow) -> Result<ServiceRequest, StoreError> {
        let span = tracing::info_span!(
            "request.insert",
            equipment_id = row.equipment_id,
            requester_id = %row.requester_id,
        );

        async move {
            tracing::info!(has_description = row.description.is_some(), "inserting");

            let start = std::time::Instant::now();
            let result = self.inner.insert_request(row).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(stored) => tracing::info!(
                    id = stored.id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "request filed"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "insert failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn request(&self, id: RequestId) -> Result<Option<ServiceRequest>, StoreError> {
        let result = self.inner.request(id).await;
        tracing::trace!(id, found = ?result.as_ref().map(|r| r.is_some()).ok(), "fetched");
        result
    }

    async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Page<ServiceRequest>, StoreError> {
        let span = tracing::info_span!("request.list", page = filter.page);

        async move {
            let result = self.inner.list_requests(filter).await;
            tracing::debug!(
                rows = result.as_ref().map(|p| p.rows.len()).ok(),
                total = result.as_ref().map(|p| p.total).ok(),
                "listed"
            );

            result
        }
        .instrument(span)
        .await
    }

    async fn update_status(
        &self,
        id: RequestId,
        to: RequestStatus,
        updated_at: DateTime<Utc>,
        expected: Option<RequestStatus>,
    ) -> Result<ServiceRequest, StoreError> {
        let span = tracing::info_span!(
            "request.update_status",
            id,
            to = to.code(),
            checked = expected.is_some(),
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.update_status(id, to, updated_at, expected).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(row) => tracing::info!(
                    status = %row.status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "status updated"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "update failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ConversionBridge
#[derive(Clone)]
pub struct TracedConversionBridge<B> {
    inner: B,
}

impl<B> TracedConversionBridge<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: ConversionBridge> ConversionBridge for TracedConversionBridge<B> {
    async fn convert(&self, call: ConversionCall) -> Result<ServiceId, BridgeError> {
        let span = tracing::info_span!(
            "bridge.convert",
            request_id = call.request_id,
            service_type_id = call.service_type_id,
            admin_id = %call.admin_id,
        );

        async move {
            tracing::info!("converting");

            let start = std::time::Instant::now();
            let result = self.inner.convert(call).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(service_id) => tracing::info!(
                    service_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "request converted"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "conversion failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
