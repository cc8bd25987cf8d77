//! `tooff-core`: shared vocabulary for the absence management domain.
//!
//! Identifiers, the absence status lifecycle, and the error model used by every
//! other crate. No IO, no policy decisions.

pub mod aggregate;
pub mod error;
pub mod id;
pub mod status;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use error::{DomainError, DomainResult};
pub use id::{AbsenceEventId, CompanyId, GroupId, PersonId, ReferenceId};
pub use status::AbsenceStatus;
pub use value_object::ValueObject;
