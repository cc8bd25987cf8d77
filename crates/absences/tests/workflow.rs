//! End-to-end absence workflows across submission, review and correction.

use chrono::{DateTime, NaiveDate, Utc};

use tooff_absences::{
    AbsenceCommand, AbsenceEvent, ApproveAbsence, DateRange, DeleteAbsence, EditAbsence, RejectAbsence,
    SubmitAbsence, approval_queue,
};
use tooff_auth::{AccessPolicy, Actor, PolicyOptions, Role, UserView};
use tooff_core::{
    AbsenceEventId, AbsenceStatus, Aggregate, AggregateRoot, DomainError, ExpectedVersion, GroupId, PersonId,
    ReferenceId,
};
use tooff_events::EventStream;

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn july(from: u32, to: u32) -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 7, from).unwrap(),
        NaiveDate::from_ymd_opt(2024, 7, to).unwrap(),
    )
    .unwrap()
}

fn member(id: u64, group: u64) -> UserView {
    UserView {
        id: PersonId::new(id),
        group_id: Some(GroupId::new(group)),
        role: Role::Regular,
        is_manager_flag: false,
        active: true,
    }
}

fn regular(id: u64, group: u64) -> Actor {
    Actor::new(PersonId::new(id), Role::Regular).in_group(GroupId::new(group))
}

fn manager(id: u64, group: u64) -> Actor {
    regular(id, group).with_manager_flag(true)
}

fn hr() -> Actor {
    Actor::new(PersonId::new(1), Role::StaffAdmin)
}

fn run(event: &mut AbsenceEvent, cmd: AbsenceCommand) -> Result<(), DomainError> {
    for change in event.handle(&cmd)? {
        event.apply(&change);
    }
    Ok(())
}

fn submit(policy: AccessPolicy, id: u64, actor: Actor, owner: UserView) -> AbsenceEvent {
    let mut event = AbsenceEvent::empty(AbsenceEventId::new(id)).with_policy(policy);
    run(
        &mut event,
        AbsenceCommand::Submit(SubmitAbsence {
            actor: Some(actor),
            event_id: AbsenceEventId::new(id),
            owner,
            date_range: july(1, 10),
            absence_type_id: ReferenceId::new(1),
            occurred_at: now(),
        }),
    )
    .unwrap();
    event
}

fn approve(id: u64, actor: Actor) -> AbsenceCommand {
    AbsenceCommand::Approve(ApproveAbsence {
        actor: Some(actor),
        event_id: AbsenceEventId::new(id),
        notes: None,
        expected_version: ExpectedVersion::Any,
        occurred_at: now(),
    })
}

#[test]
fn manager_files_on_behalf_and_hr_rejects() {
    let policy = AccessPolicy::default();
    let mut event = submit(policy, 1, manager(200, 2), member(100, 2));
    assert_eq!(event.submitted_by(), Some(PersonId::new(200)));
    assert_eq!(event.owner_id(), Some(PersonId::new(100)));

    run(
        &mut event,
        AbsenceCommand::Reject(RejectAbsence {
            actor: Some(hr()),
            event_id: AbsenceEventId::new(1),
            notes: Some("overlaps closing week".to_string()),
            expected_version: ExpectedVersion::Exact(1),
            occurred_at: now(),
        }),
    )
    .unwrap();

    assert_eq!(event.status(), AbsenceStatus::Rejected);
    assert_eq!(event.decided_by(), Some(PersonId::new(1)));
}

#[test]
fn manager_cannot_file_for_other_group() {
    let mut event = AbsenceEvent::empty(AbsenceEventId::new(1));
    let err = run(
        &mut event,
        AbsenceCommand::Submit(SubmitAbsence {
            actor: Some(manager(200, 2)),
            event_id: AbsenceEventId::new(1),
            owner: member(100, 3),
            date_range: july(1, 2),
            absence_type_id: ReferenceId::new(1),
            occurred_at: now(),
        }),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

#[test]
fn self_approval_can_be_disabled() {
    let strict = AccessPolicy::new(PolicyOptions {
        allow_self_approval: false,
    });
    let mut own = submit(strict, 1, manager(200, 2), member(200, 2));
    assert!(matches!(
        run(&mut own, approve(1, manager(200, 2))).unwrap_err(),
        DomainError::Unauthorized(_)
    ));

    let mut observed = submit(AccessPolicy::default(), 2, manager(200, 2), member(200, 2));
    run(&mut observed, approve(2, manager(200, 2))).unwrap();
    assert_eq!(observed.status(), AbsenceStatus::Approved);
}

#[test]
fn anonymous_actor_cannot_touch_anything() {
    let mut event = submit(AccessPolicy::default(), 1, regular(100, 2), member(100, 2));
    let err = run(
        &mut event,
        AbsenceCommand::Delete(DeleteAbsence {
            actor: None,
            event_id: AbsenceEventId::new(1),
            occurred_at: now(),
        }),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(msg) if msg.contains("unauthenticated")));
}

#[test]
fn owner_loses_edit_and_delete_after_approval() {
    let mut event = submit(AccessPolicy::default(), 1, regular(100, 2), member(100, 2));
    run(&mut event, approve(1, hr())).unwrap();

    let edit = AbsenceCommand::Edit(EditAbsence {
        actor: Some(regular(100, 2)),
        event_id: AbsenceEventId::new(1),
        date_range: Some(july(2, 3)),
        absence_type_id: None,
        expected_version: ExpectedVersion::Any,
        occurred_at: now(),
    });
    let delete = AbsenceCommand::Delete(DeleteAbsence {
        actor: Some(regular(100, 2)),
        event_id: AbsenceEventId::new(1),
        occurred_at: now(),
    });
    assert!(matches!(run(&mut event, edit).unwrap_err(), DomainError::Unauthorized(_)));
    assert!(matches!(run(&mut event, delete).unwrap_err(), DomainError::Unauthorized(_)));

    run(
        &mut event,
        AbsenceCommand::Delete(DeleteAbsence {
            actor: Some(manager(200, 2)),
            event_id: AbsenceEventId::new(1),
            occurred_at: now(),
        }),
    )
    .unwrap();
    assert!(!event.is_live());
}

#[test]
fn approval_queue_is_scoped_by_group() {
    let policy = AccessPolicy::default();
    let mut events = vec![
        submit(policy, 1, regular(100, 2), member(100, 2)),
        submit(policy, 2, regular(101, 2), member(101, 2)),
        submit(policy, 3, regular(300, 3), member(300, 3)),
    ];
    run(&mut events[1], approve(2, hr())).unwrap();

    let pending = approval_queue(&policy, Some(&manager(200, 2)), &events, AbsenceStatus::Pending);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].event.owner_id(), Some(PersonId::new(100)));
    assert!(pending[0].can_approve);

    let approved = approval_queue(&policy, Some(&manager(200, 2)), &events, AbsenceStatus::Approved);
    assert_eq!(approved.len(), 1);
    assert!(!approved[0].can_approve);
    assert!(approved[0].can_edit);

    let everything = approval_queue(&policy, Some(&hr()), &events, AbsenceStatus::Pending);
    assert_eq!(everything.len(), 2);

    assert!(approval_queue(&policy, Some(&regular(100, 2)), &events, AbsenceStatus::Pending).is_empty());
    assert!(approval_queue(&policy, None, &events, AbsenceStatus::Pending).is_empty());
}

#[test]
fn history_rebuilds_the_request() {
    let policy = AccessPolicy::default();
    let mut live = AbsenceEvent::empty(AbsenceEventId::new(9)).with_policy(policy);
    let mut history = EventStream::new();

    let submit = AbsenceCommand::Submit(SubmitAbsence {
        actor: Some(regular(100, 2)),
        event_id: AbsenceEventId::new(9),
        owner: member(100, 2),
        date_range: july(15, 19),
        absence_type_id: ReferenceId::new(2),
        occurred_at: now(),
    });
    for cmd in [submit, approve(9, manager(200, 2))] {
        let changes = live.handle(&cmd).unwrap();
        for recorded in history.append(ExpectedVersion::Exact(live.version()), changes).unwrap() {
            live.apply(recorded.payload());
        }
    }
    assert_eq!(history.version(), 2);

    let mut rebuilt = AbsenceEvent::empty(AbsenceEventId::new(9));
    history.replay_into(&mut rebuilt);
    assert_eq!(rebuilt.status(), AbsenceStatus::Approved);
    assert_eq!(rebuilt.date_range(), live.date_range());
    assert_eq!(rebuilt.decided_by(), Some(PersonId::new(200)));
    assert_eq!(rebuilt.version(), live.version());

    let stale = history.append(ExpectedVersion::Exact(1), Vec::new());
    assert!(matches!(stale.unwrap_err(), DomainError::Conflict(_)));
}
