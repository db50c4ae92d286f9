// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog source port

use crate::catalog::{Equipment, EquipmentId, Profile, ServiceType, ServiceTypeId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from catalog reads
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog backend failure: {0}")]
    Backend(String),
}

/// Batch reads over the catalog tables.
///
/// Ids that do not resolve are simply absent from the result; a partial miss
/// is not an error.
#[async_trait]
pub trait CatalogSource: Clone + Send + Sync + 'static {
    async fn equipment_by_ids(&self, ids: &[EquipmentId]) -> Result<Vec<Equipment>, CatalogError>;

    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, CatalogError>;

    async fn service_types_by_ids(
        &self,
        ids: &[ServiceTypeId],
    ) -> Result<Vec<ServiceType>, CatalogError>;

    /// Equipment currently assigned to one responsible user
    async fn equipment_owned_by(&self, owner_id: &str) -> Result<Vec<Equipment>, CatalogError>;
}
