// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion bridge doubles for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use sisgemec_core::ports::{BridgeError, ConversionBridge, ConversionCall};
use sisgemec_core::ServiceId;
use std::sync::{Arc, Mutex};

/// Scriptable bridge that records every call.
///
/// Succeeds by default, handing out sequential service ids. A scripted
/// error applies to the next call only.
#[derive(Clone, Default)]
pub struct FakeBridge {
    calls: Arc<Mutex<Vec<ConversionCall>>>,
    next_error: Arc<Mutex<Option<BridgeError>>>,
    next_id: Arc<Mutex<ServiceId>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls, failed attempts included
    pub fn calls(&self) -> Vec<ConversionCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Script the next call to fail as rejected by the procedure
    pub fn reject_next(&self, reason: impl Into<String>) {
        *self.next_error.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(BridgeError::Rejected(reason.into()));
    }

    /// Script the next call to fail with a backend fault
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.next_error.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(BridgeError::Backend(message.into()));
    }
}

#[async_trait]
impl ConversionBridge for FakeBridge {
    async fn convert(&self, call: ConversionCall) -> Result<ServiceId, BridgeError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        if let Some(err) = self
            .next_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            return Err(err);
        }
        let mut next_id = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
        *next_id += 1;
        Ok(*next_id)
    }
}

/// Wrapper that records calls while delegating to a real bridge
#[derive(Clone)]
pub struct RecordingBridge<B> {
    inner: B,
    calls: Arc<Mutex<Vec<ConversionCall>>>,
}

impl<B> RecordingBridge<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all recorded calls, failed attempts included
    pub fn calls(&self) -> Vec<ConversionCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl<B: ConversionBridge> ConversionBridge for RecordingBridge<B> {
    async fn convert(&self, call: ConversionCall) -> Result<ServiceId, BridgeError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.clone());
        self.inner.convert(call).await
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
