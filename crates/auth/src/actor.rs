use serde::{Deserialize, Serialize};

use tooff_core::{GroupId, PersonId};

use crate::Role;

/// The authenticated principal a decision is made for.
///
/// Field names follow the session contract (`isManagerFlag`, `groupId`), so
/// an actor can be deserialized straight from the session payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: PersonId,
    pub role: Role,
    #[serde(default)]
    pub is_manager_flag: bool,
    /// `None` when the session did not carry a group; such an actor never
    /// matches any group-scoped rule.
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl Actor {
    pub fn new(id: PersonId, role: Role) -> Self {
        Self {
            id,
            role,
            is_manager_flag: false,
            group_id: None,
        }
    }

    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_manager_flag(mut self, flag: bool) -> Self {
        self.is_manager_flag = flag;
        self
    }

    pub fn is_staff_admin(&self) -> bool {
        self.role.is_staff_admin()
    }

    /// Whether this actor holds manager authority over `group`.
    ///
    /// Missing group ids on either side never match.
    pub fn manages_group(&self, group: Option<GroupId>) -> bool {
        self.is_manager_flag && self.group_id.is_some() && self.group_id == group
    }

    pub fn is_person(&self, person: PersonId) -> bool {
        self.id == person
    }
}

/// Source of the current actor (the session collaborator).
///
/// `None` means the request is unauthenticated.
pub trait ActorProvider {
    fn current_actor(&self) -> Option<Actor>;
}

impl ActorProvider for Option<Actor> {
    fn current_actor(&self) -> Option<Actor> {
        self.clone()
    }
}
