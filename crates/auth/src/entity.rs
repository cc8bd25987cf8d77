//! Minimal projections of the records the policy decides on.
//!
//! Callers fetch the full records from the API and pass these views in; the
//! policy never loads anything itself.

use serde::{Deserialize, Serialize};

use tooff_core::{AbsenceEventId, AbsenceStatus, CompanyId, GroupId, PersonId};

use crate::Role;

/// Projection of an absence event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub id: AbsenceEventId,
    pub owner_id: PersonId,
    pub owner_group_id: Option<GroupId>,
    pub status: AbsenceStatus,
}

/// Projection of a managed user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: PersonId,
    pub group_id: Option<GroupId>,
    pub role: Role,
    pub is_manager_flag: bool,
    pub active: bool,
}

/// Projection of an organizational group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: GroupId,
    pub company_id: CompanyId,
    pub active: bool,
}

/// Reference tables maintained by staff admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    AbsenceType,
    Holiday,
    Shift,
    RegionCode,
}

/// Anything `can_view_entity` can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef<'a> {
    AbsenceEvent(&'a EventView),
    User(&'a UserView),
    Group(&'a GroupView),
    Company(CompanyId),
    Config(ConfigKind),
}

impl<'a> From<&'a EventView> for EntityRef<'a> {
    fn from(value: &'a EventView) -> Self {
        EntityRef::AbsenceEvent(value)
    }
}

impl<'a> From<&'a UserView> for EntityRef<'a> {
    fn from(value: &'a UserView) -> Self {
        EntityRef::User(value)
    }
}

impl<'a> From<&'a GroupView> for EntityRef<'a> {
    fn from(value: &'a GroupView) -> Self {
        EntityRef::Group(value)
    }
}

impl From<ConfigKind> for EntityRef<'_> {
    fn from(value: ConfigKind) -> Self {
        EntityRef::Config(value)
    }
}

/// Editable fields of a user record, for field-level decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Name,
    Email,
    RegionCode,
    ManagerFlag,
    Role,
    Group,
}

impl UserField {
    pub const ALL: [UserField; 6] = [
        UserField::Name,
        UserField::Email,
        UserField::RegionCode,
        UserField::ManagerFlag,
        UserField::Role,
        UserField::Group,
    ];

    /// Personal profile data a person may always edit on their own record.
    pub fn is_profile_field(self) -> bool {
        matches!(self, UserField::Name | UserField::Email | UserField::RegionCode)
    }

    /// Fields only staff admins may change.
    pub fn is_admin_only(self) -> bool {
        matches!(self, UserField::Role | UserField::Group)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::RegionCode => "region_code",
            UserField::ManagerFlag => "manager_flag",
            UserField::Role => "role",
            UserField::Group => "group",
        }
    }
}

impl core::fmt::Display for UserField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
