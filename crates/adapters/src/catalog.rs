// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Null catalog source

use async_trait::async_trait;
use sisgemec_core::ports::{CatalogError, CatalogSource};
use sisgemec_core::{Equipment, EquipmentId, Profile, ServiceType, ServiceTypeId};

/// Catalog source that resolves nothing.
///
/// Every lookup comes back empty, so annotation falls through to its
/// fallback labels. Useful for deployments without catalog access and for
/// exercising the fallback paths.
#[derive(Clone, Default)]
pub struct EmptyCatalog;

impl EmptyCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogSource for EmptyCatalog {
    async fn equipment_by_ids(&self, _ids: &[EquipmentId]) -> Result<Vec<Equipment>, CatalogError> {
        Ok(Vec::new())
    }

    async fn profiles_by_ids(&self, _ids: &[String]) -> Result<Vec<Profile>, CatalogError> {
        Ok(Vec::new())
    }

    async fn service_types_by_ids(
        &self,
        _ids: &[ServiceTypeId],
    ) -> Result<Vec<ServiceType>, CatalogError> {
        Ok(Vec::new())
    }

    async fn equipment_owned_by(&self, _owner_id: &str) -> Result<Vec<Equipment>, CatalogError> {
        Ok(Vec::new())
    }
}
