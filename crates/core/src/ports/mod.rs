// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boundary contracts between the lifecycle core and its backends

mod bridge;
mod catalog;
mod store;

pub use bridge::{BridgeError, ConversionBridge, ConversionCall};
pub use catalog::{CatalogError, CatalogSource};
pub use store::{
    NewRequestRow, NewServiceRow, Page, RequestFilter, RequestStore, ServiceFilter, ServiceStore,
    StoreError, PAGE_SIZE,
};
