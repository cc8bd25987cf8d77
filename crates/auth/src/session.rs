//! Session claims → actor resolution.
//!
//! Token decoding and signature checks belong to the auth system; this module
//! only validates the decoded claims and turns them into an [`Actor`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tooff_core::{GroupId, PersonId};

use crate::{Actor, ActorProvider, Role};

/// Claims carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the person number.
    pub sub: PersonId,
    pub role: Role,
    #[serde(default)]
    pub manager_flag: bool,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims against `now`.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Resolve the acting principal for a request.
///
/// Missing or invalid claims yield `None`, which every predicate denies.
pub fn resolve_actor(claims: Option<&SessionClaims>, now: DateTime<Utc>) -> Option<Actor> {
    let claims = claims?;
    if let Err(err) = validate_claims(claims, now) {
        tracing::warn!(subject = %claims.sub, error = %err, "rejecting session claims");
        return None;
    }
    Some(Actor {
        id: claims.sub,
        role: claims.role.clone(),
        is_manager_flag: claims.manager_flag,
        group_id: claims.group_id,
    })
}

/// Per-request actor provider backed by decoded session claims.
#[derive(Debug, Clone)]
pub struct SessionActorProvider {
    claims: Option<SessionClaims>,
    now: DateTime<Utc>,
}

impl SessionActorProvider {
    pub fn new(claims: Option<SessionClaims>, now: DateTime<Utc>) -> Self {
        Self { claims, now }
    }
}

impl ActorProvider for SessionActorProvider {
    fn current_actor(&self) -> Option<Actor> {
        resolve_actor(self.claims.as_ref(), self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(now: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            sub: PersonId::new(100),
            role: Role::Regular,
            manager_flag: true,
            group_id: Some(GroupId::new(2)),
            issued_at: now - Duration::minutes(5),
            expires_at: now + Duration::minutes(55),
        }
    }

    #[test]
    fn valid_claims_resolve_to_actor() {
        let now = Utc::now();
        let actor = resolve_actor(Some(&claims(now)), now).unwrap();
        assert_eq!(actor.id, PersonId::new(100));
        assert!(actor.manages_group(Some(GroupId::new(2))));
    }

    #[test]
    fn expired_claims_resolve_to_none() {
        let now = Utc::now();
        let c = claims(now);
        let later = c.expires_at;
        assert_eq!(validate_claims(&c, later), Err(TokenValidationError::Expired));
        assert!(resolve_actor(Some(&c), later).is_none());
    }

    #[test]
    fn future_and_inverted_windows_are_rejected() {
        let now = Utc::now();
        let c = claims(now);
        assert_eq!(
            validate_claims(&c, c.issued_at - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );

        let mut inverted = c.clone();
        inverted.expires_at = inverted.issued_at;
        assert_eq!(validate_claims(&inverted, now), Err(TokenValidationError::InvalidTimeWindow));
    }

    #[test]
    fn provider_without_claims_is_unauthenticated() {
        let provider = SessionActorProvider::new(None, Utc::now());
        assert!(provider.current_actor().is_none());
    }
}
