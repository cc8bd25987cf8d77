//! Enforcement: turn decisions into results and keep an audit trail.
//!
//! Predicates stay pure; this is the seam where a denial becomes an error and
//! every decision is logged.

use thiserror::Error;

use tooff_core::DomainError;

use crate::decision::{Decision, DecisionReason, Operation};
use crate::{AccessPolicy, Actor, EntityRef, EventView, UserField, UserView};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthenticated: {operation} requires a signed-in actor")]
    Unauthenticated { operation: Operation },

    #[error("forbidden: {operation} ({reason})")]
    Forbidden {
        operation: Operation,
        reason: DecisionReason,
    },
}

impl AuthzError {
    pub fn operation(&self) -> Operation {
        match self {
            AuthzError::Unauthenticated { operation } | AuthzError::Forbidden { operation, .. } => *operation,
        }
    }
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::unauthorized(value.to_string())
    }
}

/// Log `decision` for `operation` and convert it into a result.
pub fn enforce(actor: Option<&Actor>, operation: Operation, decision: Decision) -> Result<(), AuthzError> {
    let actor_id = actor.map(|a| a.id.to_string()).unwrap_or_else(|| "anonymous".to_string());

    if decision.granted {
        tracing::debug!(
            actor = %actor_id,
            operation = %operation,
            reason = ?decision.reason,
            "access granted"
        );
        return Ok(());
    }

    tracing::warn!(
        actor = %actor_id,
        operation = %operation,
        reason = ?decision.reason,
        "access denied"
    );

    if decision.reason == DecisionReason::Unauthenticated {
        Err(AuthzError::Unauthenticated { operation })
    } else {
        Err(AuthzError::Forbidden {
            operation,
            reason: decision.reason,
        })
    }
}

/// Result-returning front for [`AccessPolicy`], for request handlers and
/// aggregates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyGuard {
    policy: AccessPolicy,
}

impl PolicyGuard {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn view(&self, actor: Option<&Actor>, entity: EntityRef<'_>) -> Result<(), AuthzError> {
        enforce(actor, Operation::ViewEntity, self.policy.explain_view_entity(actor, entity))
    }

    pub fn edit_event(&self, actor: Option<&Actor>, event: &EventView) -> Result<(), AuthzError> {
        enforce(actor, Operation::EditEvent, self.policy.explain_edit_event(actor, event))
    }

    pub fn delete_event(&self, actor: Option<&Actor>, event: &EventView) -> Result<(), AuthzError> {
        enforce(actor, Operation::DeleteEvent, self.policy.explain_delete_event(actor, event))
    }

    pub fn approve_event(&self, actor: Option<&Actor>, event: &EventView) -> Result<(), AuthzError> {
        enforce(actor, Operation::ApproveEvent, self.policy.explain_approve_event(actor, event))
    }

    pub fn create_event_for(&self, actor: Option<&Actor>, owner: &UserView) -> Result<(), AuthzError> {
        enforce(actor, Operation::CreateEventFor, self.policy.explain_create_event_for(actor, owner))
    }

    pub fn manage_user(&self, actor: Option<&Actor>, target: &UserView, field: UserField) -> Result<(), AuthzError> {
        enforce(
            actor,
            Operation::ManageUser(field),
            self.policy.explain_manage_user(actor, target, field),
        )
    }

    pub fn deactivate_user(&self, actor: Option<&Actor>, target: &UserView) -> Result<(), AuthzError> {
        enforce(actor, Operation::DeactivateUser, self.policy.explain_deactivate_user(actor, target))
    }

    pub fn manage_group(&self, actor: Option<&Actor>) -> Result<(), AuthzError> {
        enforce(actor, Operation::ManageGroup, self.policy.explain_manage_group(actor))
    }

    pub fn manage_company(&self, actor: Option<&Actor>) -> Result<(), AuthzError> {
        enforce(actor, Operation::ManageCompany, self.policy.explain_manage_company(actor))
    }

    pub fn manage_config(&self, actor: Option<&Actor>) -> Result<(), AuthzError> {
        enforce(actor, Operation::ManageConfig, self.policy.explain_manage_config(actor))
    }

    pub fn access_approvals(&self, actor: Option<&Actor>) -> Result<(), AuthzError> {
        enforce(actor, Operation::AccessApprovals, self.policy.explain_access_approvals(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tooff_core::{AbsenceEventId, AbsenceStatus, GroupId, PersonId};

    use crate::Role;

    fn approved_event() -> EventView {
        EventView {
            id: AbsenceEventId::new(1),
            owner_id: PersonId::new(100),
            owner_group_id: Some(GroupId::new(2)),
            status: AbsenceStatus::Approved,
        }
    }

    #[test]
    fn anonymous_actor_is_unauthenticated() {
        let guard = PolicyGuard::default();
        let err = guard.edit_event(None, &approved_event()).unwrap_err();
        assert_eq!(
            err,
            AuthzError::Unauthenticated {
                operation: Operation::EditEvent
            }
        );
    }

    #[test]
    fn denial_carries_reason() {
        let guard = PolicyGuard::default();
        let owner = Actor::new(PersonId::new(100), Role::Regular).in_group(GroupId::new(2));
        let err = guard.approve_event(Some(&owner), &approved_event()).unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                operation: Operation::ApproveEvent,
                reason: DecisionReason::NotPending,
            }
        );
        assert_eq!(err.operation(), Operation::ApproveEvent);
    }

    #[test]
    fn converts_into_domain_unauthorized() {
        let guard = PolicyGuard::default();
        let err: DomainError = guard.manage_config(None).unwrap_err().into();
        assert!(matches!(err, DomainError::Unauthorized(msg) if msg.contains("manage_config")));
    }
}
