//! The approval queue: what a staff admin or manager sees on the approvals
//! screen, with the controls they may use on each row.

use tooff_auth::{AccessPolicy, Actor};
use tooff_core::AbsenceStatus;

use crate::AbsenceEvent;

/// One row of the approval queue.
#[derive(Debug, Clone, Copy)]
pub struct QueueEntry<'a> {
    pub event: &'a AbsenceEvent,
    pub can_approve: bool,
    pub can_edit: bool,
}

/// Events in `status` that `actor` reviews, in input order.
///
/// Empty for actors without access to the approvals screen. Rows are limited
/// to the actor's visibility scope, so managers only see their group.
pub fn approval_queue<'a>(
    policy: &AccessPolicy,
    actor: Option<&Actor>,
    events: &'a [AbsenceEvent],
    status: AbsenceStatus,
) -> Vec<QueueEntry<'a>> {
    if !policy.can_access_approvals(actor) {
        return Vec::new();
    }
    let scope = policy.visibility_scope(actor);

    events
        .iter()
        .filter_map(|event| {
            let view = event.view()?;
            if view.status != status || !scope.admits(view.owner_id, view.owner_group_id) {
                return None;
            }
            Some(QueueEntry {
                event,
                can_approve: policy.can_approve_event(actor, &view),
                can_edit: policy.can_edit_event(actor, &view),
            })
        })
        .collect()
}
