// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Decorators and doubles around the lifecycle ports

pub mod catalog;
pub mod traced;

pub use catalog::EmptyCatalog;
pub use traced::{TracedConversionBridge, TracedRequestStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod bridge;
#[cfg(any(test, feature = "test-support"))]
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub use bridge::{FakeBridge, RecordingBridge};
#[cfg(any(test, feature = "test-support"))]
pub use store::FaultyStore;
