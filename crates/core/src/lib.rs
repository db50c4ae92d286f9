// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sisgemec-core: request lifecycle for the SISGEMEC equipment fleet
//!
//! This crate provides:
//! - The request status state machine (codes 1-5) and its transition rules
//! - The lifecycle manager coordinating stores and the conversion bridge
//! - Catalog lookup for denormalizing ids into display labels
//! - Port traits for the backing store, the conversion procedure, and catalogs

pub mod actor;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod policy;
pub mod ports;
pub mod request;
pub mod service;
pub mod status;

// Re-exports
pub use actor::{Actor, Role};
pub use catalog::{
    CatalogLookup, Equipment, EquipmentId, Profile, RequestView, ServiceType, ServiceTypeId,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{LifecycleError, LifecycleResult};
pub use lifecycle::{ConversionInput, RequestLifecycle};
pub use policy::{ConversionGate, LifecyclePolicy, PolicyError};
pub use request::{NewRequest, RequestId, ServiceRequest, MAX_DESCRIPTION_LEN};
pub use service::{Service, ServiceId, ServiceStatus};
pub use status::RequestStatus;

// Re-export ports
pub use ports::{
    BridgeError, CatalogError, CatalogSource, ConversionBridge, ConversionCall, NewRequestRow,
    NewServiceRow, Page, RequestFilter, RequestStore, ServiceFilter, ServiceStore, StoreError,
    PAGE_SIZE,
};
