// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog entities and label lookup
//!
//! List and detail views never persist display labels. They are resolved at
//! read time from the catalog tables and substituted with fallbacks when an
//! id does not resolve, so a stale or missing catalog row can never break a
//! listing.

use crate::actor::Role;
use crate::ports::{CatalogError, CatalogSource};
use crate::request::ServiceRequest;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type EquipmentId = i64;
pub type ServiceTypeId = i64;

/// An equipment item as the catalog exposes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub kind: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    /// Responsible user this equipment is assigned to, if any
    pub owner_id: Option<String>,
}

impl Equipment {
    /// Display label: kind, brand and model space-joined, serial in
    /// parentheses. A missing kind falls back to the generic "Equipo".
    pub fn label(&self) -> String {
        let kind = self.kind.as_deref().unwrap_or("Equipo");
        let brand_model: Vec<&str> = [self.brand.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        let mut parts = vec![kind.to_string()];
        if !brand_model.is_empty() {
            parts.push(brand_model.join(" "));
        }
        if let Some(serial) = self.serial_no.as_deref() {
            parts.push(format!("({serial})"));
        }
        parts.join(" ")
    }
}

/// A user profile as the catalog exposes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub active: bool,
}

/// A service type catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: ServiceTypeId,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// A request enriched with display labels, computed at read time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: ServiceRequest,
    pub equipment_label: String,
    pub requester_name: String,
    pub status_label: String,
}

/// Batch id-to-label resolution over a catalog source.
///
/// Lookups omit ids that do not resolve; only a total backend failure is an
/// error. Callers substitute fallbacks for omitted ids.
#[derive(Clone)]
pub struct CatalogLookup<K> {
    source: K,
}

impl<K: CatalogSource> CatalogLookup<K> {
    pub fn new(source: K) -> Self {
        Self { source }
    }

    /// Resolve equipment ids to display labels. Unknown ids are omitted.
    pub async fn equipment_labels(
        &self,
        ids: &[EquipmentId],
    ) -> Result<HashMap<EquipmentId, String>, CatalogError> {
        let rows = self.source.equipment_by_ids(ids).await?;
        Ok(rows.into_iter().map(|e| (e.id, e.label())).collect())
    }

    /// Resolve user ids to display names.
    ///
    /// Only active responsible users with a recorded name resolve; everyone
    /// else is omitted and callers fall back to the raw id.
    pub async fn responsible_names(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, String>, CatalogError> {
        let rows = self.source.profiles_by_ids(ids).await?;
        Ok(rows
            .into_iter()
            .filter(|p| p.role == Role::Responsable && p.active)
            .filter_map(|p| p.full_name.map(|name| (p.user_id, name)))
            .collect())
    }

    /// Equipment assigned to one responsible user, for the self-service
    /// request form.
    pub async fn owned_equipment(&self, owner_id: &str) -> Result<Vec<Equipment>, CatalogError> {
        self.source.equipment_owned_by(owner_id).await
    }

    /// Resolve service type ids to names. Unknown ids are omitted.
    pub async fn service_type_names(
        &self,
        ids: &[ServiceTypeId],
    ) -> Result<HashMap<ServiceTypeId, String>, CatalogError> {
        let rows = self.source.service_types_by_ids(ids).await?;
        Ok(rows.into_iter().map(|t| (t.id, t.name)).collect())
    }

    /// Enrich request rows with display labels for list/detail views.
    ///
    /// Fallbacks: `Equipo #<id>` for unknown equipment, the raw user id for
    /// an unresolved requester.
    pub async fn annotate(
        &self,
        rows: Vec<ServiceRequest>,
    ) -> Result<Vec<RequestView>, CatalogError> {
        let equipment_ids: Vec<EquipmentId> = rows
            .iter()
            .map(|r| r.equipment_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let requester_ids: Vec<String> = rows
            .iter()
            .map(|r| r.requester_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (equipment, requesters) = tokio::join!(
            self.equipment_labels(&equipment_ids),
            self.responsible_names(&requester_ids),
        );
        let (equipment, requesters) = (equipment?, requesters?);

        Ok(rows
            .into_iter()
            .map(|request| {
                let equipment_label = equipment
                    .get(&request.equipment_id)
                    .cloned()
                    .unwrap_or_else(|| format!("Equipo #{}", request.equipment_id));
                let requester_name = requesters
                    .get(&request.requester_id)
                    .cloned()
                    .unwrap_or_else(|| request.requester_id.clone());
                let status_label = request.status.label().to_string();
                RequestView {
                    request,
                    equipment_label,
                    requester_name,
                    status_label,
                }
            })
            .collect())
    }
}
