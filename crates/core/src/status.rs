//! Request status state machine
//!
//! A request moves through five statuses persisted as integer codes 1-5.
//! The codes and their labels are a fixed wire contract shared with the
//! backend and must be reproduced exactly. Status only ever moves forward;
//! `Rechazada` and `Convertida` are terminal.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive as _;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of a service request, stored as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum RequestStatus {
    Submitted = 1,
    InReview = 2,
    Approved = 3,
    Rejected = 4,
    Converted = 5,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Submitted,
        RequestStatus::InReview,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Converted,
    ];

    /// The persisted integer code (1-5)
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Parse a persisted code; anything outside 1-5 is rejected
    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_i32(code)
    }

    /// The fixed user-facing label for this status
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Submitted => "Enviada",
            RequestStatus::InReview => "En revisión",
            RequestStatus::Approved => "Aprobada",
            RequestStatus::Rejected => "Rechazada",
            RequestStatus::Converted => "Convertida",
        }
    }

    /// Terminal statuses have no outbound transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Converted)
    }

    /// Whether the state diagram permits moving from `self` to `target`.
    ///
    /// `Approved -> Converted` is listed here for completeness but is only
    /// ever taken through the conversion flow, never by a direct update.
    pub fn can_transition_to(self, target: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, target),
            (Submitted, InReview)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (InReview, Approved)
                | (InReview, Rejected)
                | (Approved, Converted)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Serialized as the bare integer code so rows round-trip against the
// backend's wire format.
impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("invalid request status code: {code}")))
    }
}
