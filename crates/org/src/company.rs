use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tooff_auth::{AccessPolicy, Actor, EntityRef, PolicyGuard};
use tooff_core::{Aggregate, AggregateRoot, CompanyId, DomainError, PersonId};
use tooff_events::Event;

use crate::ContactInfo;

/// Aggregate root: the employer that owns groups.
///
/// Only staff admins register, read or change companies.
#[derive(Debug, Clone)]
pub struct Company {
    id: CompanyId,
    tax_id: u64,
    name: String,
    contact: ContactInfo,
    active: bool,
    version: u64,
    created: bool,
    guard: PolicyGuard,
}

impl Company {
    pub fn empty(id: CompanyId) -> Self {
        Self {
            id,
            tax_id: 0,
            name: String::new(),
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

    pub fn id_typed(&self) -> CompanyId {
        self.id
    }

    /// National registration number.
    pub fn tax_id(&self) -> u64 {
        self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fails unless `actor` may read this company's details.
    pub fn ensure_visible_to(&self, actor: Option<&Actor>) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::NotFound);
        }
        self.guard.view(actor, EntityRef::Company(self.id))?;
        Ok(())
    }
}

impl AggregateRoot for Company {
    type Id = CompanyId;

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
pub struct RegisterCompany {
    pub actor: Option<Actor>,
    pub company_id: CompanyId,
    pub tax_id: u64,
    pub name: String,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

/// `None` keeps the current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCompany {
    pub actor: Option<Actor>,
    pub company_id: CompanyId,
    pub name: Option<String>,
    pub contact: Option<ContactInfo>,
    pub active: Option<bool>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompanyCommand {
    Register(RegisterCompany),
    Update(UpdateCompany),
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistered {
    pub company_id: CompanyId,
    pub registered_by: PersonId,
    pub tax_id: u64,
    pub name: String,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyUpdated {
    pub company_id: CompanyId,
    pub updated_by: PersonId,
    pub name: String,
    pub contact: ContactInfo,
    pub active: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyEvent {
    Registered(CompanyRegistered),
    Updated(CompanyUpdated),
}

impl Event for CompanyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CompanyEvent::Registered(_) => "org.company.registered",
            CompanyEvent::Updated(_) => "org.company.updated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CompanyEvent::Registered(e) => e.occurred_at,
            CompanyEvent::Updated(e) => e.occurred_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for Company {
    type Command = CompanyCommand;
    type Event = CompanyEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CompanyEvent::Registered(e) => {
                self.id = e.company_id;
                self.tax_id = e.tax_id;
                self.name = e.name.clone();
                self.contact = e.contact.clone();
                self.active = true;
                self.created = true;
            }
            CompanyEvent::Updated(e) => {
                self.name = e.name.clone();
                self.contact = e.contact.clone();
                self.active = e.active;
            }
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CompanyCommand::Register(cmd) => {
                if self.created {
                    return Err(DomainError::invariant("company already registered"));
                }
                if cmd.company_id != self.id {
                    return Err(DomainError::inconsistent("company id does not match the record"));
                }
                let registered_by = authorize(&self.guard, cmd.actor.as_ref())?;
                if cmd.tax_id == 0 {
                    return Err(DomainError::validation("tax id is required"));
                }

                Ok(vec![CompanyEvent::Registered(CompanyRegistered {
                    company_id: cmd.company_id,
                    registered_by,
                    tax_id: cmd.tax_id,
                    name: required_name(&cmd.name)?,
                    contact: cmd.contact.clone().normalized(),
                    occurred_at: cmd.occurred_at,
                })])
            }
            CompanyCommand::Update(cmd) => {
                if !self.created {
                    return Err(DomainError::NotFound);
                }
                if cmd.company_id != self.id {
                    return Err(DomainError::inconsistent(format!(
                        "command for company {} applied to company {}",
                        cmd.company_id, self.id
                    )));
                }
                let updated_by = authorize(&self.guard, cmd.actor.as_ref())?;
                if cmd.name.is_none() && cmd.contact.is_none() && cmd.active.is_none() {
                    return Err(DomainError::validation("nothing to update"));
                }

                let name = match cmd.name.as_deref() {
                    Some(raw) => required_name(raw)?,
                    None => self.name.clone(),
                };
                Ok(vec![CompanyEvent::Updated(CompanyUpdated {
                    company_id: self.id,
                    updated_by,
                    name,
                    contact: cmd
                        .contact
                        .clone()
                        .map(ContactInfo::normalized)
                        .unwrap_or_else(|| self.contact.clone()),
                    active: cmd.active.unwrap_or(self.active),
                    occurred_at: cmd.occurred_at,
                })])
            }
        }
    }
}

fn authorize(guard: &PolicyGuard, actor: Option<&Actor>) -> Result<PersonId, DomainError> {
    guard.manage_company(actor)?;
    actor
        .map(|a| a.id)
        .ok_or_else(|| DomainError::unauthorized("no authenticated actor"))
}

fn required_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("company name cannot be empty"));
    }
    Ok(name.to_string())
}
