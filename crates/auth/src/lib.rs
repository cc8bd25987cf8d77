//! `tooff-auth`: the access-control decision engine for absence management.
//!
//! Everything here is pure: the acting [`Actor`] and the target record are
//! passed in by the caller, and every predicate answers from those inputs
//! alone. Callers that need a `Result` (aggregates, request handlers) go
//! through [`guard`], which also writes the audit log.

pub mod actor;
pub mod config;
pub mod decision;
pub mod entity;
pub mod guard;
pub mod policy;
pub mod roles;
pub mod scope;
pub mod session;
pub mod user;

pub use actor::{Actor, ActorProvider};
pub use config::{ConfigError, PolicyOptions};
pub use decision::{Decision, DecisionReason, Operation};
pub use entity::{ConfigKind, EntityRef, EventView, GroupView, UserField, UserView};
pub use guard::{AuthzError, PolicyGuard, enforce};
pub use policy::AccessPolicy;
pub use roles::{Role, UnrecognizedRole};
pub use scope::VisibilityScope;
pub use session::{SessionActorProvider, SessionClaims, TokenValidationError, resolve_actor, validate_claims};
pub use user::{User, UserCommand, UserEvent};
