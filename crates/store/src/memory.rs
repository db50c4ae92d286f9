// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory backend implementing every core port
//!
//! One `Mutex` guards all tables. Port methods never await while holding the
//! lock, and the conversion procedure performs its compound mutation inside
//! a single critical section.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sisgemec_core::clock::{Clock, SystemClock};
use sisgemec_core::ports::{
    BridgeError, CatalogError, CatalogSource, ConversionBridge, ConversionCall, NewRequestRow,
    NewServiceRow, Page, RequestFilter, RequestStore, ServiceFilter, ServiceStore, StoreError,
    PAGE_SIZE,
};
use sisgemec_core::{
    Equipment, EquipmentId, Profile, RequestId, RequestStatus, Service, ServiceId, ServiceRequest,
    ServiceStatus, ServiceType, ServiceTypeId,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    requests: BTreeMap<RequestId, ServiceRequest>,
    services: BTreeMap<ServiceId, Service>,
    equipment: BTreeMap<EquipmentId, Equipment>,
    profiles: BTreeMap<String, Profile>,
    service_types: BTreeMap<ServiceTypeId, ServiceType>,
    next_request_id: RequestId,
    next_service_id: ServiceId,
    next_equipment_id: EquipmentId,
    next_service_type_id: ServiceTypeId,
}

/// In-memory stand-in for the hosted backend.
///
/// Implements [`RequestStore`], [`ServiceStore`], [`CatalogSource`] and
/// [`ConversionBridge`] over shared tables, including the integrity rules
/// the hosted side enforces: row-level equipment ownership on request
/// inserts, foreign keys, and the atomicity of the conversion procedure.
#[derive(Clone)]
pub struct MemoryBackend<C = SystemClock> {
    tables: Arc<Mutex<Tables>>,
    clock: C,
}

impl MemoryBackend<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryBackend<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryBackend<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add an equipment row, assigning its id (the given id is ignored)
    pub fn add_equipment(&self, equipment: Equipment) -> EquipmentId {
        let mut tables = self.tables();
        tables.next_equipment_id += 1;
        let id = tables.next_equipment_id;
        tables.equipment.insert(id, Equipment { id, ..equipment });
        id
    }

    /// Add or replace a profile, keyed by its user id
    pub fn add_profile(&self, profile: Profile) {
        let mut tables = self.tables();
        tables.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Add a service type row, assigning its id (the given id is ignored)
    pub fn add_service_type(&self, service_type: ServiceType) -> ServiceTypeId {
        let mut tables = self.tables();
        tables.next_service_type_id += 1;
        let id = tables.next_service_type_id;
        tables
            .service_types
            .insert(id, ServiceType { id, ..service_type });
        id
    }
}

/// Slice one page out of pre-filtered, pre-sorted rows. Out-of-range pages
/// come back empty with the total still correct.
fn paginate<T>(rows: Vec<T>, page: u32) -> Page<T> {
    let total = rows.len() as u64;
    let start = page.saturating_sub(1) as usize * PAGE_SIZE;
    let rows = rows.into_iter().skip(start).take(PAGE_SIZE).collect();
    Page { rows, total }
}

fn matches_request(row: &ServiceRequest, filter: &RequestFilter) -> bool {
    if let Some(search) = filter.search.as_deref() {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystack = row.description.as_deref().unwrap_or("").to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
    }
    if let Some(status) = filter.status {
        if row.status != status {
            return false;
        }
    }
    if let Some(requester_id) = filter.requester_id.as_deref() {
        if row.requester_id != requester_id {
            return false;
        }
    }
    if let Some(from) = filter.date_from {
        if row.created_at.date_naive() < from {
            return false;
        }
    }
    if let Some(to) = filter.date_to {
        if row.created_at.date_naive() > to {
            return false;
        }
    }
    true
}

fn matches_service(row: &Service, filter: &ServiceFilter) -> bool {
    if let Some(status) = filter.status {
        if row.status != status {
            return false;
        }
    }
    if let Some(service_type_id) = filter.service_type_id {
        if row.service_type_id != service_type_id {
            return false;
        }
    }
    if let Some(technician_id) = filter.technician_id.as_deref() {
        if row.technician_id.as_deref() != Some(technician_id) {
            return false;
        }
    }
    if let Some(equipment_id) = filter.equipment_id {
        if row.equipment_id != equipment_id {
            return false;
        }
    }
    if let Some(from) = filter.date_from {
        if row.service_date < from {
            return false;
        }
    }
    if let Some(to) = filter.date_to {
        if row.service_date > to {
            return false;
        }
    }
    true
}

#[async_trait]
impl<C: Clock + 'static> RequestStore for MemoryBackend<C> {
    async fn insert_request(&self, row: NewRequestRow) -> Result<ServiceRequest, StoreError> {
        let mut tables = self.tables();
        if !tables.profiles.contains_key(&row.requester_id) {
            return Err(StoreError::Constraint(format!(
                "unknown requester {}",
                row.requester_id
            )));
        }
        let owner_id = tables
            .equipment
            .get(&row.equipment_id)
            .ok_or_else(|| {
                StoreError::Constraint(format!("unknown equipment {}", row.equipment_id))
            })?
            .owner_id
            .clone();
        if owner_id.as_deref() != Some(row.requester_id.as_str()) {
            return Err(StoreError::Constraint(format!(
                "equipment {} is not assigned to {}",
                row.equipment_id, row.requester_id
            )));
        }

        tables.next_request_id += 1;
        let id = tables.next_request_id;
        let stored = ServiceRequest {
            id,
            equipment_id: row.equipment_id,
            requester_id: row.requester_id,
            description: row.description,
            status: RequestStatus::Submitted,
            service_id: None,
            created_at: row.created_at,
            updated_at: row.created_at,
        };
        tables.requests.insert(id, stored.clone());
        Ok(stored)
    }

    async fn request(&self, id: RequestId) -> Result<Option<ServiceRequest>, StoreError> {
        Ok(self.tables().requests.get(&id).cloned())
    }

    async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Page<ServiceRequest>, StoreError> {
        let tables = self.tables();
        let mut rows: Vec<ServiceRequest> = tables
            .requests
            .values()
            .filter(|row| matches_request(row, filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(rows, filter.page))
    }

    async fn update_status(
        &self,
        id: RequestId,
        to: RequestStatus,
        updated_at: DateTime<Utc>,
        expected: Option<RequestStatus>,
    ) -> Result<ServiceRequest, StoreError> {
        if to == RequestStatus::Converted {
            return Err(StoreError::Constraint(
                "status 5 can only be set by the conversion procedure".to_string(),
            ));
        }
        let mut tables = self.tables();
        let row = tables
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("request", id))?;
        if let Some(expected) = expected {
            if row.status != expected {
                return Err(StoreError::StaleStatus {
                    expected: expected.code(),
                    actual: row.status.code(),
                });
            }
        }
        row.status = to;
        row.updated_at = updated_at;
        Ok(row.clone())
    }
}

#[async_trait]
impl<C: Clock + 'static> ServiceStore for MemoryBackend<C> {
    async fn insert_service(&self, row: NewServiceRow) -> Result<Service, StoreError> {
        let mut tables = self.tables();
        {
            let service_type = tables.service_types.get(&row.service_type_id).ok_or_else(
                || StoreError::Constraint(format!("unknown service type {}", row.service_type_id)),
            )?;
            if !service_type.active {
                return Err(StoreError::Constraint(format!(
                    "service type {} is inactive",
                    row.service_type_id
                )));
            }
        }
        if !tables.equipment.contains_key(&row.equipment_id) {
            return Err(StoreError::Constraint(format!(
                "unknown equipment {}",
                row.equipment_id
            )));
        }
        if let Some(technician_id) = row.technician_id.as_deref() {
            if !tables.profiles.contains_key(technician_id) {
                return Err(StoreError::Constraint(format!(
                    "unknown technician {technician_id}"
                )));
            }
        }
        if let Some(request_id) = row.request_id {
            if !tables.requests.contains_key(&request_id) {
                return Err(StoreError::Constraint(format!(
                    "unknown request {request_id}"
                )));
            }
        }

        tables.next_service_id += 1;
        let id = tables.next_service_id;
        let stored = Service {
            id,
            equipment_id: row.equipment_id,
            service_type_id: row.service_type_id,
            technician_id: row.technician_id,
            request_id: row.request_id,
            status: ServiceStatus::Pendiente,
            service_date: row.service_date,
            description: row.description,
            notes: row.notes,
            created_at: row.created_at,
        };
        tables.services.insert(id, stored.clone());
        Ok(stored)
    }

    async fn service(&self, id: ServiceId) -> Result<Option<Service>, StoreError> {
        Ok(self.tables().services.get(&id).cloned())
    }

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Page<Service>, StoreError> {
        let tables = self.tables();
        let mut rows: Vec<Service> = tables
            .services
            .values()
            .filter(|row| matches_service(row, filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.service_date.cmp(&a.service_date).then(b.id.cmp(&a.id)));
        Ok(paginate(rows, filter.page))
    }

    async fn set_service_status(
        &self,
        id: ServiceId,
        to: ServiceStatus,
    ) -> Result<Service, StoreError> {
        let mut tables = self.tables();
        let row = tables
            .services
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("service", id))?;
        row.status = to;
        Ok(row.clone())
    }
}

#[async_trait]
impl<C: Clock + 'static> CatalogSource for MemoryBackend<C> {
    async fn equipment_by_ids(&self, ids: &[EquipmentId]) -> Result<Vec<Equipment>, CatalogError> {
        let tables = self.tables();
        Ok(ids
            .iter()
            .filter_map(|id| tables.equipment.get(id).cloned())
            .collect())
    }

    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, CatalogError> {
        let tables = self.tables();
        Ok(ids
            .iter()
            .filter_map(|id| tables.profiles.get(id).cloned())
            .collect())
    }

    async fn service_types_by_ids(
        &self,
        ids: &[ServiceTypeId],
    ) -> Result<Vec<ServiceType>, CatalogError> {
        let tables = self.tables();
        Ok(ids
            .iter()
            .filter_map(|id| tables.service_types.get(id).cloned())
            .collect())
    }

    async fn equipment_owned_by(&self, owner_id: &str) -> Result<Vec<Equipment>, CatalogError> {
        let tables = self.tables();
        Ok(tables
            .equipment
            .values()
            .filter(|equipment| equipment.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect())
    }
}

/// The conversion procedure. Validates, then creates the service, flips the
/// request to `Convertida` and links both rows, all inside one critical
/// section. A rejection leaves every table exactly as it was.
#[async_trait]
impl<C: Clock + 'static> ConversionBridge for MemoryBackend<C> {
    async fn convert(&self, call: ConversionCall) -> Result<ServiceId, BridgeError> {
        let mut tables = self.tables();

        let (equipment_id, description, status) = {
            let request = tables.requests.get(&call.request_id).ok_or_else(|| {
                BridgeError::Rejected(format!("request {} not found", call.request_id))
            })?;
            (
                request.equipment_id,
                request.description.clone(),
                request.status,
            )
        };
        match status {
            RequestStatus::Converted => {
                return Err(BridgeError::Rejected(format!(
                    "request {} is already converted",
                    call.request_id
                )));
            }
            RequestStatus::Rejected => {
                return Err(BridgeError::Rejected(format!(
                    "request {} was rejected and cannot be converted",
                    call.request_id
                )));
            }
            _ => {}
        }
        {
            let service_type = tables.service_types.get(&call.service_type_id).ok_or_else(
                || {
                    BridgeError::Rejected(format!(
                        "unknown service type {}",
                        call.service_type_id
                    ))
                },
            )?;
            if !service_type.active {
                return Err(BridgeError::Rejected(format!(
                    "service type {} is inactive",
                    call.service_type_id
                )));
            }
        }
        if !tables.profiles.contains_key(&call.admin_id) {
            return Err(BridgeError::Rejected(format!(
                "unknown admin {}",
                call.admin_id
            )));
        }

        let now = self.clock.now();
        tables.next_service_id += 1;
        let service_id = tables.next_service_id;
        let service = Service {
            id: service_id,
            equipment_id,
            service_type_id: call.service_type_id,
            technician_id: Some(call.admin_id),
            request_id: Some(call.request_id),
            status: ServiceStatus::Pendiente,
            service_date: call.service_date.unwrap_or_else(|| now.date_naive()),
            description,
            notes: call.notes,
            created_at: now,
        };
        tables.services.insert(service_id, service);
        if let Some(request) = tables.requests.get_mut(&call.request_id) {
            request.status = RequestStatus::Converted;
            request.service_id = Some(service_id);
            request.updated_at = now;
        }
        Ok(service_id)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
