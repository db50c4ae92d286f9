// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request lifecycle manager
//!
//! All mutations of a service request go through here: filing, triage status
//! changes, and conversion into a service. Every operation takes the acting
//! user explicitly; there is no ambient session. Operations are plain
//! futures with no background work, so dropping one before its store write
//! is issued leaves no partial state.

use crate::actor::{Actor, Role};
use crate::catalog::ServiceTypeId;
use crate::clock::Clock;
use crate::error::{LifecycleError, LifecycleResult};
use crate::policy::LifecyclePolicy;
use crate::ports::{
    ConversionBridge, ConversionCall, NewRequestRow, Page, RequestFilter, RequestStore,
};
use crate::request::{normalize_description, normalize_text, NewRequest, RequestId, ServiceRequest};
use crate::service::ServiceId;
use crate::status::RequestStatus;
use chrono::NaiveDate;

/// Caller-supplied fields for one conversion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionInput {
    pub request_id: RequestId,
    pub service_type_id: ServiceTypeId,
    /// Defaults to the current day when absent
    pub service_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Coordinates request mutations over a store, a conversion bridge, and a
/// clock, under a fixed [`LifecyclePolicy`].
#[derive(Clone)]
pub struct RequestLifecycle<S, B, C> {
    store: S,
    bridge: B,
    clock: C,
    policy: LifecyclePolicy,
}

impl<S, B, C> RequestLifecycle<S, B, C>
where
    S: RequestStore,
    B: ConversionBridge,
    C: Clock,
{
    pub fn new(store: S, bridge: B, clock: C, policy: LifecyclePolicy) -> Self {
        Self {
            store,
            bridge,
            clock,
            policy,
        }
    }

    /// File a new request on behalf of the acting user.
    ///
    /// Only responsible users can file, and only for themselves. The
    /// description is trimmed and stored as absent when blank. The row
    /// starts at `Enviada` with creation and update time set to now.
    pub async fn create_request(
        &self,
        actor: &Actor,
        new: NewRequest,
    ) -> LifecycleResult<ServiceRequest> {
        if actor.role != Role::Responsable {
            return Err(LifecycleError::Validation(
                "only responsible users can file requests".to_string(),
            ));
        }
        if actor.user_id != new.requester_id {
            return Err(LifecycleError::Validation(
                "requests can only be filed for oneself".to_string(),
            ));
        }
        let description = normalize_description(new.description.as_deref())?;
        let row = NewRequestRow {
            equipment_id: new.equipment_id,
            requester_id: new.requester_id,
            description,
            created_at: self.clock.now(),
        };
        Ok(self.store.insert_request(row).await?)
    }

    /// Fetch one request
    pub async fn get(&self, id: RequestId) -> LifecycleResult<ServiceRequest> {
        self.store
            .request(id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("request", id))
    }

    /// List requests matching the filter
    pub async fn list(&self, filter: &RequestFilter) -> LifecycleResult<Page<ServiceRequest>> {
        Ok(self.store.list_requests(filter).await?)
    }

    /// Move a request to a new triage status.
    ///
    /// Admin-only. The write is last-writer-wins: the transition is checked
    /// against the status read here, and a concurrent change between read
    /// and write is silently overwritten. Use [`Self::set_status_checked`]
    /// when that race must surface instead.
    pub async fn set_status(
        &self,
        actor: &Actor,
        id: RequestId,
        target: RequestStatus,
    ) -> LifecycleResult<ServiceRequest> {
        self.prepare_transition(actor, id, target).await?;
        Ok(self
            .store
            .update_status(id, target, self.clock.now(), None)
            .await?)
    }

    /// Like [`Self::set_status`], but the write only lands if the status is
    /// still the one read here; otherwise the row is left untouched and the
    /// race surfaces as [`LifecycleError::Conflict`].
    pub async fn set_status_checked(
        &self,
        actor: &Actor,
        id: RequestId,
        target: RequestStatus,
    ) -> LifecycleResult<ServiceRequest> {
        let current = self.prepare_transition(actor, id, target).await?;
        Ok(self
            .store
            .update_status(id, target, self.clock.now(), Some(current.status))
            .await?)
    }

    /// Convert a request into a scheduled service.
    ///
    /// Admin-only, gated by the policy's [`ConversionGate`]. The compound
    /// mutation (create service, flip to `Convertida`, link both rows) is
    /// delegated to the bridge in exactly one call and never retried; on
    /// failure nothing has changed. The acting admin is recorded on the
    /// service as the assigned technician.
    ///
    /// [`ConversionGate`]: crate::policy::ConversionGate
    pub async fn convert_to_service(
        &self,
        actor: &Actor,
        input: ConversionInput,
    ) -> LifecycleResult<ServiceId> {
        if !actor.is_admin() {
            return Err(LifecycleError::Validation(
                "only admins can convert requests".to_string(),
            ));
        }
        let current = self.get(input.request_id).await?;
        if !self.policy.conversion_gate.allows(current.status) {
            return Err(LifecycleError::Validation(format!(
                "request {} is {} and cannot be converted",
                current.id, current.status
            )));
        }
        let notes = normalize_text("notes", input.notes.as_deref())?;
        let call = ConversionCall {
            request_id: input.request_id,
            service_type_id: input.service_type_id,
            admin_id: actor.user_id.clone(),
            service_date: input.service_date,
            notes,
        };
        Ok(self.bridge.convert(call).await?)
    }

    /// Shared validation for status changes: admin actor, existing row,
    /// legal non-trivial transition. Returns the row as read.
    async fn prepare_transition(
        &self,
        actor: &Actor,
        id: RequestId,
        target: RequestStatus,
    ) -> LifecycleResult<ServiceRequest> {
        if !actor.is_admin() {
            return Err(LifecycleError::Validation(
                "only admins can change request status".to_string(),
            ));
        }
        if target == RequestStatus::Converted {
            return Err(LifecycleError::Validation(
                "conversion goes through convert_to_service".to_string(),
            ));
        }
        let current = self.get(id).await?;
        if current.status == target {
            return Err(LifecycleError::Validation(format!(
                "request {} is already {}",
                id, target
            )));
        }
        if !current.status.can_transition_to(target) {
            return Err(LifecycleError::Validation(format!(
                "cannot move request {} from {} to {}",
                id, current.status, target
            )));
        }
        Ok(current)
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
