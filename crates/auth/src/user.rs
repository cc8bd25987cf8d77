//! Managed user records.
//!
//! Every command carries the acting principal and is authorized field by
//! field through the access policy before any event is emitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tooff_core::{Aggregate, AggregateRoot, DomainError, GroupId, PersonId};
use tooff_events::Event;

use crate::decision::Operation;
use crate::{AccessPolicy, Actor, PolicyGuard, Role, UserField, UserView, enforce};

// ─────────────────────────────────────────────────────────────────────────────
// User Status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

// ─────────────────────────────────────────────────────────────────────────────
// User Aggregate
// ─────────────────────────────────────────────────────────────────────────────

/// A person's account in the absence system.
///
/// # Invariants
/// - The person id is immutable.
/// - Only recognized roles are stored.
/// - Inactive users cannot be edited until reactivated.
///
/// Nothing prevents the last staff admin from being demoted or deactivated.
#[derive(Debug, Clone)]
pub struct User {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub region_code: Option<String>,
    pub group_id: Option<GroupId>,
    pub role: Role,
    pub is_manager_flag: bool,
    pub status: UserStatus,
    pub version: u64,
    pub created: bool,
    guard: PolicyGuard,
}

impl User {
    /// Not-yet-created instance for rehydration, using the default policy.
    pub fn empty(id: PersonId) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            region_code: None,
            group_id: None,
            role: Role::Regular,
            is_manager_flag: false,
            status: UserStatus::Active,
            version: 0,
            created: false,
            guard: PolicyGuard::default(),
        }
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.guard = PolicyGuard::new(policy);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Projection used for policy decisions about this user.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            group_id: self.group_id,
            role: self.role.clone(),
            is_manager_flag: self.is_manager_flag,
            active: self.is_active(),
        }
    }

    fn ensure_exists(&self, user_id: PersonId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::NotFound);
        }
        if user_id != self.id {
            return Err(DomainError::inconsistent(format!(
                "command for user {user_id} applied to user {}",
                self.id
            )));
        }
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::invariant("user is inactive"));
        }
        Ok(())
    }
}

impl AggregateRoot for User {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub actor: Option<Actor>,
    pub user_id: PersonId,
    pub name: String,
    pub email: String,
    pub region_code: Option<String>,
    pub group_id: GroupId,
    pub role: Role,
    pub is_manager_flag: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Change profile fields; `None` keeps the current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub actor: Option<Actor>,
    pub user_id: PersonId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub region_code: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetManagerFlag {
    pub actor: Option<Actor>,
    pub user_id: PersonId,
    pub is_manager_flag: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Move a user to another role and/or group (staff admins only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reassign {
    pub actor: Option<Actor>,
    pub user_id: PersonId,
    pub role: Option<Role>,
    pub group_id: Option<GroupId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateUser {
    pub actor: Option<Actor>,
    pub user_id: PersonId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateUser {
    pub actor: Option<Actor>,
    pub user_id: PersonId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserCommand {
    Create(CreateUser),
    UpdateProfile(UpdateProfile),
    SetManagerFlag(SetManagerFlag),
    Reassign(Reassign),
    Deactivate(DeactivateUser),
    Activate(ActivateUser),
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreated {
    pub user_id: PersonId,
    pub created_by: PersonId,
    pub name: String,
    pub email: String,
    pub region_code: Option<String>,
    pub group_id: GroupId,
    pub role: Role,
    pub is_manager_flag: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdated {
    pub user_id: PersonId,
    pub updated_by: PersonId,
    pub name: String,
    pub email: String,
    pub region_code: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerFlagChanged {
    pub user_id: PersonId,
    pub changed_by: PersonId,
    pub is_manager_flag: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReassigned {
    pub user_id: PersonId,
    pub changed_by: PersonId,
    pub role: Role,
    pub group_id: Option<GroupId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeactivated {
    pub user_id: PersonId,
    pub deactivated_by: PersonId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivated {
    pub user_id: PersonId,
    pub activated_by: PersonId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserEvent {
    Created(UserCreated),
    ProfileUpdated(ProfileUpdated),
    ManagerFlagChanged(ManagerFlagChanged),
    Reassigned(UserReassigned),
    Deactivated(UserDeactivated),
    Activated(UserActivated),
}

impl Event for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Created(_) => "auth.user.created",
            UserEvent::ProfileUpdated(_) => "auth.user.profile_updated",
            UserEvent::ManagerFlagChanged(_) => "auth.user.manager_flag_changed",
            UserEvent::Reassigned(_) => "auth.user.reassigned",
            UserEvent::Deactivated(_) => "auth.user.deactivated",
            UserEvent::Activated(_) => "auth.user.activated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Created(e) => e.occurred_at,
            UserEvent::ProfileUpdated(e) => e.occurred_at,
            UserEvent::ManagerFlagChanged(e) => e.occurred_at,
            UserEvent::Reassigned(e) => e.occurred_at,
            UserEvent::Deactivated(e) => e.occurred_at,
            UserEvent::Activated(e) => e.occurred_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for User {
    type Command = UserCommand;
    type Event = UserEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            UserEvent::Created(e) => {
                self.id = e.user_id;
                self.name = e.name.clone();
                self.email = e.email.clone();
                self.region_code = e.region_code.clone();
                self.group_id = Some(e.group_id);
                self.role = e.role.clone();
                self.is_manager_flag = e.is_manager_flag;
                self.status = UserStatus::Active;
                self.created = true;
            }
            UserEvent::ProfileUpdated(e) => {
                self.name = e.name.clone();
                self.email = e.email.clone();
                self.region_code = e.region_code.clone();
            }
            UserEvent::ManagerFlagChanged(e) => self.is_manager_flag = e.is_manager_flag,
            UserEvent::Reassigned(e) => {
                self.role = e.role.clone();
                self.group_id = e.group_id;
            }
            UserEvent::Deactivated(_) => self.status = UserStatus::Inactive,
            UserEvent::Activated(_) => self.status = UserStatus::Active,
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            UserCommand::Create(cmd) => self.handle_create(cmd),
            UserCommand::UpdateProfile(cmd) => self.handle_update_profile(cmd),
            UserCommand::SetManagerFlag(cmd) => self.handle_set_manager_flag(cmd),
            UserCommand::Reassign(cmd) => self.handle_reassign(cmd),
            UserCommand::Deactivate(cmd) => self.handle_deactivate(cmd),
            UserCommand::Activate(cmd) => self.handle_activate(cmd),
        }
    }
}

impl User {
    // ─────────────────────────────────────────────────────────────────────────
    // Command Handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_create(&self, cmd: &CreateUser) -> Result<Vec<UserEvent>, DomainError> {
        if self.created {
            return Err(DomainError::invariant("user already exists"));
        }
        if cmd.user_id != self.id {
            return Err(DomainError::inconsistent("user id does not match the record being created"));
        }

        let actor = cmd.actor.as_ref();
        let policy = self.guard.policy();
        enforce(actor, Operation::CreateUser, policy.explain_create_user_for(actor, cmd.group_id))?;
        enforce(actor, Operation::CreateUser, policy.explain_place_user_in_group(actor, cmd.group_id))?;
        enforce(actor, Operation::ManageUser(UserField::Role), policy.explain_assign_role(actor, &cmd.role))?;
        let created_by = acting_person(actor)?;

        let email = normalize_email(&cmd.email)?;
        let name = normalize_name(&cmd.name)?;

        Ok(vec![UserEvent::Created(UserCreated {
            user_id: cmd.user_id,
            created_by,
            name,
            email,
            region_code: normalize_region(cmd.region_code.as_deref()),
            group_id: cmd.group_id,
            role: cmd.role.clone(),
            is_manager_flag: cmd.is_manager_flag,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_profile(&self, cmd: &UpdateProfile) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_exists(cmd.user_id)?;

        let actor = cmd.actor.as_ref();
        let view = self.view();
        let changes = [
            (UserField::Name, cmd.name.is_some()),
            (UserField::Email, cmd.email.is_some()),
            (UserField::RegionCode, cmd.region_code.is_some()),
        ];
        if changes.iter().all(|(_, changed)| !changed) {
            return Err(DomainError::validation("no profile fields to update"));
        }
        for (field, _) in changes.iter().filter(|(_, changed)| *changed) {
            self.guard.manage_user(actor, &view, *field)?;
        }
        let updated_by = acting_person(actor)?;
        self.ensure_active()?;

        let name = match &cmd.name {
            Some(name) => normalize_name(name)?,
            None => self.name.clone(),
        };
        let email = match &cmd.email {
            Some(email) => normalize_email(email)?,
            None => self.email.clone(),
        };
        let region_code = match &cmd.region_code {
            Some(region) => normalize_region(Some(region)),
            None => self.region_code.clone(),
        };

        Ok(vec![UserEvent::ProfileUpdated(ProfileUpdated {
            user_id: self.id,
            updated_by,
            name,
            email,
            region_code,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_manager_flag(&self, cmd: &SetManagerFlag) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_exists(cmd.user_id)?;

        let actor = cmd.actor.as_ref();
        self.guard.manage_user(actor, &self.view(), UserField::ManagerFlag)?;
        let changed_by = acting_person(actor)?;
        self.ensure_active()?;

        if self.is_manager_flag == cmd.is_manager_flag {
            return Err(DomainError::invariant("manager flag already has this value"));
        }

        Ok(vec![UserEvent::ManagerFlagChanged(ManagerFlagChanged {
            user_id: self.id,
            changed_by,
            is_manager_flag: cmd.is_manager_flag,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_reassign(&self, cmd: &Reassign) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_exists(cmd.user_id)?;

        let actor = cmd.actor.as_ref();
        let view = self.view();
        if cmd.role.is_none() && cmd.group_id.is_none() {
            return Err(DomainError::validation("nothing to reassign"));
        }
        if cmd.role.is_some() {
            self.guard.manage_user(actor, &view, UserField::Role)?;
        }
        if cmd.group_id.is_some() {
            self.guard.manage_user(actor, &view, UserField::Group)?;
        }
        let changed_by = acting_person(actor)?;
        self.ensure_active()?;

        let role = cmd.role.clone().unwrap_or_else(|| self.role.clone());
        if !role.is_recognized() {
            return Err(DomainError::validation(format!("unknown role '{role}'")));
        }

        Ok(vec![UserEvent::Reassigned(UserReassigned {
            user_id: self.id,
            changed_by,
            role,
            group_id: cmd.group_id.or(self.group_id),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivateUser) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_exists(cmd.user_id)?;

        let actor = cmd.actor.as_ref();
        self.guard.deactivate_user(actor, &self.view())?;
        let deactivated_by = acting_person(actor)?;

        if !self.is_active() {
            return Err(DomainError::invariant("user already inactive"));
        }

        Ok(vec![UserEvent::Deactivated(UserDeactivated {
            user_id: self.id,
            deactivated_by,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_activate(&self, cmd: &ActivateUser) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_exists(cmd.user_id)?;

        let actor = cmd.actor.as_ref();
        self.guard.deactivate_user(actor, &self.view())?;
        let activated_by = acting_person(actor)?;

        if self.is_active() {
            return Err(DomainError::invariant("user already active"));
        }

        Ok(vec![UserEvent::Activated(UserActivated {
            user_id: self.id,
            activated_by,
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// The guard has already rejected anonymous actors; this only extracts the id.
fn acting_person(actor: Option<&Actor>) -> Result<PersonId, DomainError> {
    actor
        .map(|a| a.id)
        .ok_or_else(|| DomainError::unauthorized("no authenticated actor"))
}

fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email)
}

fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(name.to_string())
}

/// Region codes are two-letter state codes, stored upper-case.
fn normalize_region(raw: Option<&str>) -> Option<String> {
    raw.map(|r| r.trim().to_uppercase()).filter(|r| !r.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn admin() -> Actor {
        Actor::new(PersonId::new(1), Role::StaffAdmin).in_group(GroupId::new(9))
    }

    fn manager_of(group: u64) -> Actor {
        Actor::new(PersonId::new(200), Role::Regular)
            .in_group(GroupId::new(group))
            .with_manager_flag(true)
    }

    fn create(actor: Actor, user_id: u64, group: u64, role: Role) -> UserCommand {
        UserCommand::Create(CreateUser {
            actor: Some(actor),
            user_id: PersonId::new(user_id),
            name: " Ana Souza ".to_string(),
            email: "Ana@Example.com".to_string(),
            region_code: Some("sp".to_string()),
            group_id: GroupId::new(group),
            role,
            is_manager_flag: false,
            occurred_at: now(),
        })
    }

    fn created_user(user_id: u64, group: u64) -> User {
        let mut user = User::empty(PersonId::new(user_id));
        for event in user.handle(&create(admin(), user_id, group, Role::Regular)).unwrap() {
            user.apply(&event);
        }
        user
    }

    #[test]
    fn admin_creates_user_with_normalized_fields() {
        let user = created_user(100, 2);
        assert!(user.created);
        assert_eq!(user.name, "Ana Souza");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.region_code.as_deref(), Some("SP"));
        assert_eq!(user.version, 1);
    }

    #[test]
    fn manager_cannot_create_user_outside_group() {
        let user = User::empty(PersonId::new(100));
        let err = user.handle(&create(manager_of(2), 100, 3, Role::Regular)).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(msg) if msg.contains("create_user")));

        assert!(user.handle(&create(manager_of(2), 100, 2, Role::Regular)).is_ok());
    }

    #[test]
    fn manager_cannot_create_staff_admin() {
        let user = User::empty(PersonId::new(100));
        let err = user.handle(&create(manager_of(2), 100, 2, Role::StaffAdmin)).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[test]
    fn regular_cannot_create_users() {
        let user = User::empty(PersonId::new(100));
        let regular = Actor::new(PersonId::new(5), Role::Regular).in_group(GroupId::new(2));
        assert!(user.handle(&create(regular, 100, 2, Role::Regular)).is_err());
    }

    #[test]
    fn self_profile_edit_allowed_but_not_own_flag() {
        let mut user = created_user(100, 2);
        let me = Actor::new(PersonId::new(100), Role::Regular).in_group(GroupId::new(2));

        let update = UserCommand::UpdateProfile(UpdateProfile {
            actor: Some(me.clone()),
            user_id: PersonId::new(100),
            name: Some("Ana S.".to_string()),
            email: None,
            region_code: None,
            occurred_at: now(),
        });
        for event in user.handle(&update).unwrap() {
            user.apply(&event);
        }
        assert_eq!(user.name, "Ana S.");
        assert_eq!(user.email, "ana@example.com");

        let flag = UserCommand::SetManagerFlag(SetManagerFlag {
            actor: Some(me),
            user_id: PersonId::new(100),
            is_manager_flag: true,
            occurred_at: now(),
        });
        let err = user.handle(&flag).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[test]
    fn group_manager_toggles_member_flag() {
        let mut user = created_user(100, 2);
        let cmd = UserCommand::SetManagerFlag(SetManagerFlag {
            actor: Some(manager_of(2)),
            user_id: PersonId::new(100),
            is_manager_flag: true,
            occurred_at: now(),
        });
        for event in user.handle(&cmd).unwrap() {
            user.apply(&event);
        }
        assert!(user.is_manager_flag);

        let err = user.handle(&cmd).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn only_admin_reassigns_role_or_group() {
        let mut user = created_user(100, 2);
        let by_manager = UserCommand::Reassign(Reassign {
            actor: Some(manager_of(2)),
            user_id: PersonId::new(100),
            role: None,
            group_id: Some(GroupId::new(3)),
            occurred_at: now(),
        });
        assert!(matches!(user.handle(&by_manager).unwrap_err(), DomainError::Unauthorized(_)));

        let by_admin = UserCommand::Reassign(Reassign {
            actor: Some(admin()),
            user_id: PersonId::new(100),
            role: Some(Role::Manager),
            group_id: Some(GroupId::new(3)),
            occurred_at: now(),
        });
        for event in user.handle(&by_admin).unwrap() {
            user.apply(&event);
        }
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.group_id, Some(GroupId::new(3)));
    }

    #[test]
    fn unknown_role_is_rejected_on_reassign() {
        let user = created_user(100, 2);
        let cmd = UserCommand::Reassign(Reassign {
            actor: Some(admin()),
            user_id: PersonId::new(100),
            role: Some(Role::parse("superuser")),
            group_id: None,
            occurred_at: now(),
        });
        assert!(matches!(user.handle(&cmd).unwrap_err(), DomainError::Validation(_)));
    }

    #[test]
    fn deactivate_then_activate() {
        let mut user = created_user(100, 2);
        let deactivate = UserCommand::Deactivate(DeactivateUser {
            actor: Some(manager_of(2)),
            user_id: PersonId::new(100),
            reason: Some("left the company".to_string()),
            occurred_at: now(),
        });
        for event in user.handle(&deactivate).unwrap() {
            user.apply(&event);
        }
        assert_eq!(user.status, UserStatus::Inactive);
        assert!(matches!(user.handle(&deactivate).unwrap_err(), DomainError::InvariantViolation(_)));

        let activate = UserCommand::Activate(ActivateUser {
            actor: Some(admin()),
            user_id: PersonId::new(100),
            occurred_at: now(),
        });
        for event in user.handle(&activate).unwrap() {
            user.apply(&event);
        }
        assert!(user.is_active());
    }

    #[test]
    fn inactive_user_cannot_be_edited() {
        let mut user = created_user(100, 2);
        let deactivate = UserCommand::Deactivate(DeactivateUser {
            actor: Some(admin()),
            user_id: PersonId::new(100),
            reason: None,
            occurred_at: now(),
        });
        for event in user.handle(&deactivate).unwrap() {
            user.apply(&event);
        }

        let update = UserCommand::UpdateProfile(UpdateProfile {
            actor: Some(admin()),
            user_id: PersonId::new(100),
            name: None,
            email: Some("new@example.com".to_string()),
            region_code: None,
            occurred_at: now(),
        });
        let err = user.handle(&update).unwrap_err();
        assert!(err.to_string().contains("inactive"));
    }

    #[test]
    fn mismatched_user_id_is_inconsistent() {
        let user = created_user(100, 2);
        let cmd = UserCommand::Activate(ActivateUser {
            actor: Some(admin()),
            user_id: PersonId::new(101),
            occurred_at: now(),
        });
        assert!(matches!(user.handle(&cmd).unwrap_err(), DomainError::InconsistentData(_)));
    }

    #[test]
    fn anonymous_commands_are_rejected() {
        let user = created_user(100, 2);
        let cmd = UserCommand::Deactivate(DeactivateUser {
            actor: None,
            user_id: PersonId::new(100),
            reason: None,
            occurred_at: now(),
        });
        assert!(matches!(user.handle(&cmd).unwrap_err(), DomainError::Unauthorized(_)));
    }
}
