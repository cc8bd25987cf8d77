//! Organizational records: companies, their groups, and the reference tables
//! (absence types, holidays, shifts, region codes) the rest of the system
//! looks things up in.
//!
//! Mutations are reserved for staff admins; reads are open to any signed-in
//! actor except where noted.

pub mod company;
pub mod contact;
pub mod group;
pub mod reference;

pub use company::{Company, CompanyCommand, CompanyEvent, RegisterCompany, UpdateCompany};
pub use contact::ContactInfo;
pub use group::{ActivateGroup, CreateGroup, DeactivateGroup, Group, GroupCommand, GroupEvent, UpdateGroup};
pub use reference::{AbsenceType, Holiday, ReferenceCatalog, Region, Shift};
