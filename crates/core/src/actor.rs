// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acting-user identity
//!
//! Every lifecycle operation takes the acting user as an explicit argument.
//! There is no ambient "current user"; callers authenticate upstream and
//! hand the resolved identity in.

use serde::{Deserialize, Serialize};

/// Role held by a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Tecnico,
    Responsable,
}

/// The authenticated user performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn responsable(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Responsable)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
