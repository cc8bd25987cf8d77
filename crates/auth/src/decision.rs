//! Explained authorization decisions.
//!
//! Every predicate on [`AccessPolicy`](crate::AccessPolicy) is computed as a
//! [`Decision`] first; the boolean `can_*` form is derived from it, so the
//! explanation and the answer cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::UserField;

/// Operation being authorized (for audit records and error messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ViewEntity,
    EditEvent,
    ApproveEvent,
    DeleteEvent,
    CreateEventFor,
    ManageUser(UserField),
    CreateUser,
    DeactivateUser,
    ManageGroup,
    ManageCompany,
    ManageConfig,
    AccessApprovals,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operation::ViewEntity => f.write_str("view_entity"),
            Operation::EditEvent => f.write_str("edit_event"),
            Operation::ApproveEvent => f.write_str("approve_event"),
            Operation::DeleteEvent => f.write_str("delete_event"),
            Operation::CreateEventFor => f.write_str("create_event_for"),
            Operation::ManageUser(field) => write!(f, "manage_user.{field}"),
            Operation::CreateUser => f.write_str("create_user"),
            Operation::DeactivateUser => f.write_str("deactivate_user"),
            Operation::ManageGroup => f.write_str("manage_group"),
            Operation::ManageCompany => f.write_str("manage_company"),
            Operation::ManageConfig => f.write_str("manage_config"),
            Operation::AccessApprovals => f.write_str("access_approvals"),
        }
    }
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    // Grants
    StaffAdmin,
    GroupManager,
    ManagerAuthority,
    Owner,
    ReferenceData,

    // Denials
    Unauthenticated,
    AdminOnly,
    NotPending,
    OwnerLockedAfterDecision,
    OutsideScope,
    NoElevatedAuthority,
    OwnPrivileges,
    SelfDeactivation,
    SelfApproval,
    RoleNotAssignable,
    GroupNotAssignable,
}

impl DecisionReason {
    pub fn message(self) -> &'static str {
        match self {
            DecisionReason::StaffAdmin => "actor is a staff admin",
            DecisionReason::GroupManager => "actor manages the record's group",
            DecisionReason::ManagerAuthority => "actor holds the manager flag",
            DecisionReason::Owner => "actor owns the record",
            DecisionReason::ReferenceData => "reference data is visible to every authenticated actor",
            DecisionReason::Unauthenticated => "no authenticated actor",
            DecisionReason::AdminOnly => "restricted to staff admins",
            DecisionReason::NotPending => "event has already been decided",
            DecisionReason::OwnerLockedAfterDecision => "owners can only change pending events",
            DecisionReason::OutsideScope => "record is outside the actor's scope",
            DecisionReason::NoElevatedAuthority => "actor is neither a staff admin nor a manager",
            DecisionReason::OwnPrivileges => "actors cannot change their own role, group or manager flag",
            DecisionReason::SelfDeactivation => "managers cannot deactivate their own account",
            DecisionReason::SelfApproval => "actors cannot decide their own events",
            DecisionReason::RoleNotAssignable => "actor cannot assign this role",
            DecisionReason::GroupNotAssignable => "managers can only place users in their own group",
        }
    }
}

impl core::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a single policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub granted: bool,
    pub reason: DecisionReason,
}

impl Decision {
    pub const fn allow(reason: DecisionReason) -> Self {
        Self { granted: true, reason }
    }

    pub const fn deny(reason: DecisionReason) -> Self {
        Self { granted: false, reason }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// First granted decision wins; otherwise `self` (the primary denial).
    pub fn or_else(self, other: impl FnOnce() -> Decision) -> Decision {
        if self.granted {
            return self;
        }
        let other = other();
        if other.granted { other } else { self }
    }
}
