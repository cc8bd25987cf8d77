use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tooff_auth::{AccessPolicy, Actor, EventView, PolicyGuard, UserView};
use tooff_core::{
    AbsenceEventId, AbsenceStatus, Aggregate, AggregateRoot, DomainError, ExpectedVersion, GroupId, PersonId,
    ReferenceId,
};
use tooff_events::Event;

use crate::DateRange;

/// Aggregate root: an absence request.
///
/// # Invariants
/// - `status` leaves `Pending` at most once, to `Approved` or `Rejected`.
/// - Decided events are never re-opened; a new request must be filed.
/// - A deleted event accepts no further commands.
#[derive(Debug, Clone)]
pub struct AbsenceEvent {
    id: AbsenceEventId,
    owner_id: Option<PersonId>,
    owner_group_id: Option<GroupId>,
    status: AbsenceStatus,
    date_range: Option<DateRange>,
    absence_type_id: Option<ReferenceId>,
    submitted_by: Option<PersonId>,
    decided_by: Option<PersonId>,
    decision_notes: Option<String>,
    version: u64,
    created: bool,
    deleted: bool,
    guard: PolicyGuard,
}

impl AbsenceEvent {
    /// Create an empty, not-yet-submitted instance for rehydration.
    pub fn empty(id: AbsenceEventId) -> Self {
        Self {
            id,
            owner_id: None,
            owner_group_id: None,
            status: AbsenceStatus::Pending,
            date_range: None,
            absence_type_id: None,
            submitted_by: None,
            decided_by: None,
            decision_notes: None,
            version: 0,
            created: false,
            deleted: false,
            guard: PolicyGuard::default(),
        }
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.guard = PolicyGuard::new(policy);
        self
    }

    pub fn id_typed(&self) -> AbsenceEventId {
        self.id
    }

    pub fn owner_id(&self) -> Option<PersonId> {
        self.owner_id
    }

    pub fn owner_group_id(&self) -> Option<GroupId> {
        self.owner_group_id
    }

    pub fn status(&self) -> AbsenceStatus {
        self.status
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn absence_type_id(&self) -> Option<ReferenceId> {
        self.absence_type_id
    }

    pub fn submitted_by(&self) -> Option<PersonId> {
        self.submitted_by
    }

    pub fn decided_by(&self) -> Option<PersonId> {
        self.decided_by
    }

    pub fn decision_notes(&self) -> Option<&str> {
        self.decision_notes.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.created && !self.deleted
    }

    /// Projection for policy decisions; `None` until submitted or once deleted.
    pub fn view(&self) -> Option<EventView> {
        if !self.is_live() {
            return None;
        }
        Some(EventView {
            id: self.id,
            owner_id: self.owner_id?,
            owner_group_id: self.owner_group_id,
            status: self.status,
        })
    }

    fn live_view(&self, event_id: AbsenceEventId) -> Result<EventView, DomainError> {
        if event_id != self.id {
            return Err(DomainError::inconsistent(format!(
                "command for absence {event_id} applied to absence {}",
                self.id
            )));
        }
        self.view().ok_or(DomainError::NotFound)
    }
}

impl AggregateRoot for AbsenceEvent {
    type Id = AbsenceEventId;

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

/// File a new request, for oneself or on behalf of `owner`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAbsence {
    pub actor: Option<Actor>,
    pub event_id: AbsenceEventId,
    pub owner: UserView,
    pub date_range: DateRange,
    pub absence_type_id: ReferenceId,
    pub occurred_at: DateTime<Utc>,
}

/// Change dates and/or type; `None` keeps the current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditAbsence {
    pub actor: Option<Actor>,
    pub event_id: AbsenceEventId,
    pub date_range: Option<DateRange>,
    pub absence_type_id: Option<ReferenceId>,
    #[serde(skip)]
    pub expected_version: ExpectedVersion,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveAbsence {
    pub actor: Option<Actor>,
    pub event_id: AbsenceEventId,
    pub notes: Option<String>,
    #[serde(skip)]
    pub expected_version: ExpectedVersion,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectAbsence {
    pub actor: Option<Actor>,
    pub event_id: AbsenceEventId,
    pub notes: Option<String>,
    #[serde(skip)]
    pub expected_version: ExpectedVersion,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAbsence {
    pub actor: Option<Actor>,
    pub event_id: AbsenceEventId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AbsenceCommand {
    Submit(SubmitAbsence),
    Edit(EditAbsence),
    Approve(ApproveAbsence),
    Reject(RejectAbsence),
    Delete(DeleteAbsence),
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceSubmitted {
    pub event_id: AbsenceEventId,
    pub owner_id: PersonId,
    pub owner_group_id: Option<GroupId>,
    pub submitted_by: PersonId,
    pub date_range: DateRange,
    pub absence_type_id: ReferenceId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceEdited {
    pub event_id: AbsenceEventId,
    pub edited_by: PersonId,
    pub date_range: DateRange,
    pub absence_type_id: ReferenceId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceApproved {
    pub event_id: AbsenceEventId,
    pub decided_by: PersonId,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRejected {
    pub event_id: AbsenceEventId,
    pub decided_by: PersonId,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceDeleted {
    pub event_id: AbsenceEventId,
    pub deleted_by: PersonId,
    pub occurred_at: DateTime<Utc>,
}

/// State changes of an absence request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceChange {
    Submitted(AbsenceSubmitted),
    Edited(AbsenceEdited),
    Approved(AbsenceApproved),
    Rejected(AbsenceRejected),
    Deleted(AbsenceDeleted),
}

impl Event for AbsenceChange {
    fn event_type(&self) -> &'static str {
        match self {
            AbsenceChange::Submitted(_) => "absences.event.submitted",
            AbsenceChange::Edited(_) => "absences.event.edited",
            AbsenceChange::Approved(_) => "absences.event.approved",
            AbsenceChange::Rejected(_) => "absences.event.rejected",
            AbsenceChange::Deleted(_) => "absences.event.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AbsenceChange::Submitted(e) => e.occurred_at,
            AbsenceChange::Edited(e) => e.occurred_at,
            AbsenceChange::Approved(e) => e.occurred_at,
            AbsenceChange::Rejected(e) => e.occurred_at,
            AbsenceChange::Deleted(e) => e.occurred_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for AbsenceEvent {
    type Command = AbsenceCommand;
    type Event = AbsenceChange;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AbsenceChange::Submitted(e) => {
                self.id = e.event_id;
                self.owner_id = Some(e.owner_id);
                self.owner_group_id = e.owner_group_id;
                self.status = AbsenceStatus::Pending;
                self.date_range = Some(e.date_range);
                self.absence_type_id = Some(e.absence_type_id);
                self.submitted_by = Some(e.submitted_by);
                self.created = true;
            }
            AbsenceChange::Edited(e) => {
                self.date_range = Some(e.date_range);
                self.absence_type_id = Some(e.absence_type_id);
            }
            AbsenceChange::Approved(e) => self.record_decision(AbsenceStatus::Approved, e.decided_by, e.notes.as_deref()),
            AbsenceChange::Rejected(e) => self.record_decision(AbsenceStatus::Rejected, e.decided_by, e.notes.as_deref()),
            AbsenceChange::Deleted(_) => self.deleted = true,
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AbsenceCommand::Submit(cmd) => self.handle_submit(cmd),
            AbsenceCommand::Edit(cmd) => self.handle_edit(cmd),
            AbsenceCommand::Approve(cmd) => {
                let decided_by = self.decide(
                    cmd.actor.as_ref(),
                    cmd.event_id,
                    cmd.expected_version,
                    AbsenceStatus::Approved,
                )?;
                Ok(vec![AbsenceChange::Approved(AbsenceApproved {
                    event_id: self.id,
                    decided_by,
                    notes: normalize_notes(cmd.notes.as_deref()),
                    occurred_at: cmd.occurred_at,
                })])
            }
            AbsenceCommand::Reject(cmd) => {
                let decided_by = self.decide(
                    cmd.actor.as_ref(),
                    cmd.event_id,
                    cmd.expected_version,
                    AbsenceStatus::Rejected,
                )?;
                Ok(vec![AbsenceChange::Rejected(AbsenceRejected {
                    event_id: self.id,
                    decided_by,
                    notes: normalize_notes(cmd.notes.as_deref()),
                    occurred_at: cmd.occurred_at,
                })])
            }
            AbsenceCommand::Delete(cmd) => self.handle_delete(cmd),
        }
    }
}

impl AbsenceEvent {
    /// Logged here rather than in `handle` so only decisions that were
    /// actually recorded show up.
    fn record_decision(&mut self, status: AbsenceStatus, decided_by: PersonId, notes: Option<&str>) {
        self.status = status;
        self.decided_by = Some(decided_by);
        self.decision_notes = notes.map(str::to_string);
        tracing::info!(
            event_id = %self.id,
            decided_by = %decided_by,
            status = %status,
            "absence decided"
        );
    }

    fn handle_submit(&self, cmd: &SubmitAbsence) -> Result<Vec<AbsenceChange>, DomainError> {
        if self.created {
            return Err(DomainError::invariant("absence already submitted"));
        }
        if cmd.event_id != self.id {
            return Err(DomainError::inconsistent("event id does not match the record being submitted"));
        }

        let actor = cmd.actor.as_ref();
        self.guard.create_event_for(actor, &cmd.owner)?;
        let submitted_by = acting_person(actor)?;

        if !cmd.owner.active {
            return Err(DomainError::invariant("cannot file an absence for an inactive user"));
        }

        Ok(vec![AbsenceChange::Submitted(AbsenceSubmitted {
            event_id: cmd.event_id,
            owner_id: cmd.owner.id,
            owner_group_id: cmd.owner.group_id,
            submitted_by,
            date_range: cmd.date_range,
            absence_type_id: cmd.absence_type_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_edit(&self, cmd: &EditAbsence) -> Result<Vec<AbsenceChange>, DomainError> {
        let view = self.live_view(cmd.event_id)?;

        let actor = cmd.actor.as_ref();
        self.guard.edit_event(actor, &view)?;
        let edited_by = acting_person(actor)?;
        cmd.expected_version.check(self.version)?;

        let (Some(current_range), Some(current_type)) = (self.date_range, self.absence_type_id) else {
            return Err(DomainError::inconsistent("submitted absence is missing its dates or type"));
        };
        if cmd.date_range.is_none() && cmd.absence_type_id.is_none() {
            return Err(DomainError::validation("nothing to edit"));
        }

        Ok(vec![AbsenceChange::Edited(AbsenceEdited {
            event_id: self.id,
            edited_by,
            date_range: cmd.date_range.unwrap_or(current_range),
            absence_type_id: cmd.absence_type_id.unwrap_or(current_type),
            occurred_at: cmd.occurred_at,
        })])
    }

    /// Shared checks for approve/reject. Returns the deciding person.
    fn decide(
        &self,
        actor: Option<&Actor>,
        event_id: AbsenceEventId,
        expected_version: ExpectedVersion,
        next: AbsenceStatus,
    ) -> Result<PersonId, DomainError> {
        let view = self.live_view(event_id)?;

        if !self.status.can_transition_to(next) {
            return Err(DomainError::invariant(format!(
                "absence already {}; cannot become {next}",
                self.status
            )));
        }
        self.guard.approve_event(actor, &view)?;
        let decided_by = acting_person(actor)?;
        expected_version.check(self.version)?;
        Ok(decided_by)
    }

    fn handle_delete(&self, cmd: &DeleteAbsence) -> Result<Vec<AbsenceChange>, DomainError> {
        let view = self.live_view(cmd.event_id)?;

        let actor = cmd.actor.as_ref();
        self.guard.delete_event(actor, &view)?;
        let deleted_by = acting_person(actor)?;

        Ok(vec![AbsenceChange::Deleted(AbsenceDeleted {
            event_id: self.id,
            deleted_by,
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn acting_person(actor: Option<&Actor>) -> Result<PersonId, DomainError> {
    actor
        .map(|a| a.id)
        .ok_or_else(|| DomainError::unauthorized("no authenticated actor"))
}

fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string)
}
