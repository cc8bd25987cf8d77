use serde::{Deserialize, Serialize};

use tooff_core::{GroupId, PersonId};

use crate::Actor;

/// Which records an actor may list.
///
/// Mirrors `can_view_entity` for events and users so repositories can push
/// the filter down to the query instead of checking row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VisibilityScope {
    Everything,
    /// Records of one group, plus the manager's own records.
    Group { group_id: GroupId, member: PersonId },
    Own { person_id: PersonId },
    Nothing,
}

impl VisibilityScope {
    pub fn for_actor(actor: Option<&Actor>) -> Self {
        let Some(actor) = actor else {
            return VisibilityScope::Nothing;
        };
        if actor.is_staff_admin() {
            return VisibilityScope::Everything;
        }
        match actor.group_id {
            Some(group_id) if actor.is_manager_flag => VisibilityScope::Group {
                group_id,
                member: actor.id,
            },
            _ => VisibilityScope::Own { person_id: actor.id },
        }
    }

    /// Whether a record owned by `owner` in `group` falls inside this scope.
    pub fn admits(&self, owner: PersonId, group: Option<GroupId>) -> bool {
        match *self {
            VisibilityScope::Everything => true,
            VisibilityScope::Group { group_id, member } => group == Some(group_id) || owner == member,
            VisibilityScope::Own { person_id } => owner == person_id,
            VisibilityScope::Nothing => false,
        }
    }

    /// Group filter to send to the API, if any.
    pub fn group_filter(&self) -> Option<GroupId> {
        match *self {
            VisibilityScope::Group { group_id, .. } => Some(group_id),
            _ => None,
        }
    }
}
