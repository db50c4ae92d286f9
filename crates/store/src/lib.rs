// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sisgemec-store: in-memory reference backend
//!
//! Models the hosted backend behind the lifecycle's ports: the request and
//! service tables, the catalog tables, row-level ownership on request
//! inserts, and the atomic conversion procedure. Everything lives behind one
//! lock, so the conversion's compound mutation is indivisible exactly like
//! the hosted procedure it stands in for.

pub mod memory;

pub use memory::MemoryBackend;
