use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tooff_auth::{AccessPolicy, Actor, EntityRef, GroupView, PolicyGuard};
use tooff_core::{Aggregate, AggregateRoot, CompanyId, DomainError, GroupId, PersonId};
use tooff_events::Event;

use crate::ContactInfo;

/// Aggregate root: an organizational unit inside a company.
///
/// # Invariants
/// - A group belongs to exactly one company for its whole life.
/// - Inactive groups keep their members but accept no detail changes.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    company_id: Option<CompanyId>,
    name: String,
    description: Option<String>,
    contact: ContactInfo,
    active: bool,
    version: u64,
    created: bool,
    guard: PolicyGuard,
}

impl Group {
    pub fn empty(id: GroupId) -> Self {
        Self {
            id,
            company_id: None,
            name: String::new(),
            description: None,
            contact: ContactInfo::default(),
            active: true,
            version: 0,
            created: false,
            guard: PolicyGuard::default(),
        }
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.guard = PolicyGuard::new(policy);
        self
    }

    pub fn id_typed(&self) -> GroupId {
        self.id
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Projection for policy decisions; `None` until created.
    pub fn view(&self) -> Option<GroupView> {
        Some(GroupView {
            id: self.id,
            company_id: self.company_id?,
            active: self.active,
        })
    }

    /// Fails unless `actor` may read this group.
    pub fn ensure_visible_to(&self, actor: Option<&Actor>) -> Result<(), DomainError> {
        let view = self.view().ok_or(DomainError::NotFound)?;
        self.guard.view(actor, EntityRef::Group(&view))?;
        Ok(())
    }

    fn ensure_exists(&self, group_id: GroupId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::NotFound);
        }
        if group_id != self.id {
            return Err(DomainError::inconsistent(format!(
                "command for group {group_id} applied to group {}",
                self.id
            )));
        }
        Ok(())
    }
}

impl AggregateRoot for Group {
    type Id = GroupId;

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
pub struct CreateGroup {
    pub actor: Option<Actor>,
    pub group_id: GroupId,
    pub company_id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

/// `None` keeps the current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroup {
    pub actor: Option<Actor>,
    pub group_id: GroupId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact: Option<ContactInfo>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateGroup {
    pub actor: Option<Actor>,
    pub group_id: GroupId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateGroup {
    pub actor: Option<Actor>,
    pub group_id: GroupId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GroupCommand {
    Create(CreateGroup),
    Update(UpdateGroup),
    Deactivate(DeactivateGroup),
    Activate(ActivateGroup),
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCreated {
    pub group_id: GroupId,
    pub company_id: CompanyId,
    pub created_by: PersonId,
    pub name: String,
    pub description: Option<String>,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdated {
    pub group_id: GroupId,
    pub updated_by: PersonId,
    pub name: String,
    pub description: Option<String>,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStatusChanged {
    pub group_id: GroupId,
    pub changed_by: PersonId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupEvent {
    Created(GroupCreated),
    Updated(GroupUpdated),
    Deactivated(GroupStatusChanged),
    Activated(GroupStatusChanged),
}

impl Event for GroupEvent {
    fn event_type(&self) -> &'static str {
        match self {
            GroupEvent::Created(_) => "org.group.created",
            GroupEvent::Updated(_) => "org.group.updated",
            GroupEvent::Deactivated(_) => "org.group.deactivated",
            GroupEvent::Activated(_) => "org.group.activated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            GroupEvent::Created(e) => e.occurred_at,
            GroupEvent::Updated(e) => e.occurred_at,
            GroupEvent::Deactivated(e) | GroupEvent::Activated(e) => e.occurred_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for Group {
    type Command = GroupCommand;
    type Event = GroupEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            GroupEvent::Created(e) => {
                self.id = e.group_id;
                self.company_id = Some(e.company_id);
                self.name = e.name.clone();
                self.description = e.description.clone();
                self.contact = e.contact.clone();
                self.active = true;
                self.created = true;
            }
            GroupEvent::Updated(e) => {
                self.name = e.name.clone();
                self.description = e.description.clone();
                self.contact = e.contact.clone();
            }
            GroupEvent::Deactivated(_) => self.active = false,
            GroupEvent::Activated(_) => self.active = true,
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            GroupCommand::Create(cmd) => self.handle_create(cmd),
            GroupCommand::Update(cmd) => self.handle_update(cmd),
            GroupCommand::Deactivate(cmd) => {
                self.ensure_exists(cmd.group_id)?;
                let changed_by = self.authorize(cmd.actor.as_ref())?;
                if !self.active {
                    return Err(DomainError::invariant("group already inactive"));
                }
                Ok(vec![GroupEvent::Deactivated(GroupStatusChanged {
                    group_id: self.id,
                    changed_by,
                    occurred_at: cmd.occurred_at,
                })])
            }
            GroupCommand::Activate(cmd) => {
                self.ensure_exists(cmd.group_id)?;
                let changed_by = self.authorize(cmd.actor.as_ref())?;
                if self.active {
                    return Err(DomainError::invariant("group already active"));
                }
                Ok(vec![GroupEvent::Activated(GroupStatusChanged {
                    group_id: self.id,
                    changed_by,
                    occurred_at: cmd.occurred_at,
                })])
            }
        }
    }
}

impl Group {
    fn authorize(&self, actor: Option<&Actor>) -> Result<PersonId, DomainError> {
        self.guard.manage_group(actor)?;
        actor
            .map(|a| a.id)
            .ok_or_else(|| DomainError::unauthorized("no authenticated actor"))
    }

    fn handle_create(&self, cmd: &CreateGroup) -> Result<Vec<GroupEvent>, DomainError> {
        if self.created {
            return Err(DomainError::invariant("group already exists"));
        }
        if cmd.group_id != self.id {
            return Err(DomainError::inconsistent("group id does not match the record being created"));
        }
        let created_by = self.authorize(cmd.actor.as_ref())?;

        Ok(vec![GroupEvent::Created(GroupCreated {
            group_id: cmd.group_id,
            company_id: cmd.company_id,
            created_by,
            name: required_name(&cmd.name)?,
            description: normalize_description(cmd.description.as_deref()),
            contact: cmd.contact.clone().normalized(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateGroup) -> Result<Vec<GroupEvent>, DomainError> {
        self.ensure_exists(cmd.group_id)?;
        let updated_by = self.authorize(cmd.actor.as_ref())?;
        if !self.active {
            return Err(DomainError::invariant("group is inactive"));
        }
        if cmd.name.is_none() && cmd.description.is_none() && cmd.contact.is_none() {
            return Err(DomainError::validation("nothing to update"));
        }

        let name = match cmd.name.as_deref() {
            Some(raw) => required_name(raw)?,
            None => self.name.clone(),
        };
        let description = match cmd.description.as_deref() {
            Some(raw) => normalize_description(Some(raw)),
            None => self.description.clone(),
        };

        Ok(vec![GroupEvent::Updated(GroupUpdated {
            group_id: self.id,
            updated_by,
            name,
            description,
            contact: cmd
                .contact
                .clone()
                .map(ContactInfo::normalized)
                .unwrap_or_else(|| self.contact.clone()),
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn required_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("group name cannot be empty"));
    }
    Ok(name.to_string())
}

fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string)
}
