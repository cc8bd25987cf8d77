//! The access policy: one place that decides who may do what.
//!
//! - No IO
//! - No panics
//! - No hidden state: the same inputs always give the same answer
//!
//! A missing actor denies everything. Missing group ids never match. Unknown
//! roles get no authority beyond what ownership gives.

use tooff_core::{GroupId, PersonId};

use crate::decision::{Decision, DecisionReason as Reason};
use crate::{Actor, EntityRef, EventView, PolicyOptions, Role, UserField, UserView, VisibilityScope};

/// Stateless authorization oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    options: PolicyOptions,
}

impl AccessPolicy {
    pub const fn new(options: PolicyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PolicyOptions {
        self.options
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visibility
    // ─────────────────────────────────────────────────────────────────────────

    pub fn explain_view_entity(&self, actor: Option<&Actor>, entity: EntityRef<'_>) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if actor.is_staff_admin() {
            return Decision::allow(Reason::StaffAdmin);
        }

        match entity {
            EntityRef::Config(_) => Decision::allow(Reason::ReferenceData),
            EntityRef::AbsenceEvent(event) => owned_or_managed(actor, event.owner_id, event.owner_group_id),
            EntityRef::User(user) => owned_or_managed(actor, user.id, user.group_id),
            EntityRef::Group(_) if actor.is_manager_flag => Decision::allow(Reason::ManagerAuthority),
            EntityRef::Group(_) => Decision::deny(Reason::OutsideScope),
            EntityRef::Company(_) => Decision::deny(Reason::AdminOnly),
        }
    }

    pub fn can_view_entity(&self, actor: Option<&Actor>, entity: EntityRef<'_>) -> bool {
        self.explain_view_entity(actor, entity).is_granted()
    }

    /// Listing filter consistent with [`can_view_entity`](Self::can_view_entity).
    pub fn visibility_scope(&self, actor: Option<&Actor>) -> VisibilityScope {
        VisibilityScope::for_actor(actor)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Absence events
    // ─────────────────────────────────────────────────────────────────────────

    /// Staff admins and group managers may always edit; owners only while the
    /// event is pending.
    pub fn explain_edit_event(&self, actor: Option<&Actor>, event: &EventView) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if actor.is_staff_admin() {
            return Decision::allow(Reason::StaffAdmin);
        }
        if actor.manages_group(event.owner_group_id) {
            return Decision::allow(Reason::GroupManager);
        }
        if actor.is_person(event.owner_id) {
            return if event.status.is_pending() {
                Decision::allow(Reason::Owner)
            } else {
                Decision::deny(Reason::OwnerLockedAfterDecision)
            };
        }
        Decision::deny(Reason::OutsideScope)
    }

    pub fn can_edit_event(&self, actor: Option<&Actor>, event: &EventView) -> bool {
        self.explain_edit_event(actor, event).is_granted()
    }

    /// Delete shares its authorization with edit.
    pub fn explain_delete_event(&self, actor: Option<&Actor>, event: &EventView) -> Decision {
        self.explain_edit_event(actor, event)
    }

    pub fn can_delete_event(&self, actor: Option<&Actor>, event: &EventView) -> bool {
        self.explain_delete_event(actor, event).is_granted()
    }

    /// Only pending events can be decided, and only by staff admins or holders
    /// of the manager flag. Group membership is not checked.
    pub fn explain_approve_event(&self, actor: Option<&Actor>, event: &EventView) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if !event.status.is_pending() {
            return Decision::deny(Reason::NotPending);
        }
        let granted = elevated(actor);
        if !granted.is_granted() {
            return granted;
        }
        if !self.options.allow_self_approval && actor.is_person(event.owner_id) {
            return Decision::deny(Reason::SelfApproval);
        }
        granted
    }

    pub fn can_approve_event(&self, actor: Option<&Actor>, event: &EventView) -> bool {
        self.explain_approve_event(actor, event).is_granted()
    }

    /// Who may file an event on someone's behalf: the person themself, staff
    /// admins, and managers for members of their group.
    pub fn explain_create_event_for(&self, actor: Option<&Actor>, owner: &UserView) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if actor.is_staff_admin() {
            return Decision::allow(Reason::StaffAdmin);
        }
        owned_or_managed(actor, owner.id, owner.group_id)
    }

    pub fn can_create_event_for(&self, actor: Option<&Actor>, owner: &UserView) -> bool {
        self.explain_create_event_for(actor, owner).is_granted()
    }

    /// Gate for the approval queue.
    pub fn explain_access_approvals(&self, actor: Option<&Actor>) -> Decision {
        match actor {
            Some(actor) => elevated(actor),
            None => Decision::deny(Reason::Unauthenticated),
        }
    }

    pub fn can_access_approvals(&self, actor: Option<&Actor>) -> bool {
        self.explain_access_approvals(actor).is_granted()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// Field-level authorization on a user record.
    ///
    /// Role and group are staff-admin only. A person may edit their own
    /// profile fields but never their own privileges. Managers may edit the
    /// profile and manager flag of other members of their group.
    pub fn explain_manage_user(&self, actor: Option<&Actor>, target: &UserView, field: UserField) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if actor.is_staff_admin() {
            return Decision::allow(Reason::StaffAdmin);
        }
        if field.is_admin_only() {
            return Decision::deny(Reason::AdminOnly);
        }
        if actor.is_person(target.id) {
            return if field.is_profile_field() {
                Decision::allow(Reason::Owner)
            } else {
                Decision::deny(Reason::OwnPrivileges)
            };
        }
        if actor.manages_group(target.group_id) {
            return Decision::allow(Reason::GroupManager);
        }
        Decision::deny(Reason::OutsideScope)
    }

    pub fn can_manage_user(&self, actor: Option<&Actor>, target: &UserView, field: UserField) -> bool {
        self.explain_manage_user(actor, target, field).is_granted()
    }

    /// Fields of `target` the actor may change, in declaration order.
    pub fn editable_user_fields(&self, actor: Option<&Actor>, target: &UserView) -> Vec<UserField> {
        UserField::ALL
            .into_iter()
            .filter(|field| self.can_manage_user(actor, target, *field))
            .collect()
    }

    /// Staff admins and managers may create users. The group a manager may
    /// place the new user in is narrowed separately by
    /// [`explain_place_user_in_group`](Self::explain_place_user_in_group);
    /// callers combine both (see [`creatable_user_groups`](Self::creatable_user_groups)).
    pub fn explain_create_user_for(&self, actor: Option<&Actor>, _target_group: GroupId) -> Decision {
        match actor {
            Some(actor) => elevated(actor),
            None => Decision::deny(Reason::Unauthenticated),
        }
    }

    pub fn can_create_user_for(&self, actor: Option<&Actor>, target_group: GroupId) -> bool {
        self.explain_create_user_for(actor, target_group).is_granted()
    }

    /// Staff admins may use any group; managers only their own.
    pub fn explain_place_user_in_group(&self, actor: Option<&Actor>, group: GroupId) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if actor.is_staff_admin() {
            return Decision::allow(Reason::StaffAdmin);
        }
        if actor.manages_group(Some(group)) {
            return Decision::allow(Reason::GroupManager);
        }
        Decision::deny(Reason::GroupNotAssignable)
    }

    /// Groups the actor may pick when creating a user: the intersection of
    /// `groups` with what the policy allows.
    pub fn creatable_user_groups(
        &self,
        actor: Option<&Actor>,
        groups: impl IntoIterator<Item = GroupId>,
    ) -> Vec<GroupId> {
        groups
            .into_iter()
            .filter(|group| {
                self.can_create_user_for(actor, *group)
                    && self.explain_place_user_in_group(actor, *group).is_granted()
            })
            .collect()
    }

    /// Roles the actor may give to a new user.
    pub fn assignable_roles(&self, actor: Option<&Actor>) -> Vec<Role> {
        match actor {
            Some(actor) if actor.is_staff_admin() => Role::ASSIGNABLE.to_vec(),
            Some(actor) if actor.is_manager_flag => vec![Role::Manager, Role::Regular],
            _ => Vec::new(),
        }
    }

    pub fn explain_assign_role(&self, actor: Option<&Actor>, role: &Role) -> Decision {
        let Some(current) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if self.assignable_roles(actor).contains(role) {
            elevated(current)
        } else {
            Decision::deny(Reason::RoleNotAssignable)
        }
    }

    /// Staff admins, or managers of the target's group acting on someone else.
    pub fn explain_deactivate_user(&self, actor: Option<&Actor>, target: &UserView) -> Decision {
        let Some(actor) = actor else {
            return Decision::deny(Reason::Unauthenticated);
        };
        if actor.is_staff_admin() {
            return Decision::allow(Reason::StaffAdmin);
        }
        if !actor.manages_group(target.group_id) {
            return Decision::deny(Reason::OutsideScope);
        }
        if actor.is_person(target.id) {
            return Decision::deny(Reason::SelfDeactivation);
        }
        Decision::allow(Reason::GroupManager)
    }

    pub fn can_deactivate_user(&self, actor: Option<&Actor>, target: &UserView) -> bool {
        self.explain_deactivate_user(actor, target).is_granted()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin-only gates
    // ─────────────────────────────────────────────────────────────────────────

    pub fn explain_manage_group(&self, actor: Option<&Actor>) -> Decision {
        admin_only(actor)
    }

    pub fn can_manage_group(&self, actor: Option<&Actor>) -> bool {
        self.explain_manage_group(actor).is_granted()
    }

    pub fn explain_manage_company(&self, actor: Option<&Actor>) -> Decision {
        admin_only(actor)
    }

    pub fn can_manage_company(&self, actor: Option<&Actor>) -> bool {
        self.explain_manage_company(actor).is_granted()
    }

    /// Absence types, holidays, shifts and region codes.
    pub fn explain_manage_config(&self, actor: Option<&Actor>) -> Decision {
        admin_only(actor)
    }

    pub fn can_manage_config(&self, actor: Option<&Actor>) -> bool {
        self.explain_manage_config(actor).is_granted()
    }
}

fn admin_only(actor: Option<&Actor>) -> Decision {
    match actor {
        None => Decision::deny(Reason::Unauthenticated),
        Some(actor) if actor.is_staff_admin() => Decision::allow(Reason::StaffAdmin),
        Some(_) => Decision::deny(Reason::AdminOnly),
    }
}

fn elevated(actor: &Actor) -> Decision {
    if actor.is_staff_admin() {
        Decision::allow(Reason::StaffAdmin)
    } else if actor.is_manager_flag {
        Decision::allow(Reason::ManagerAuthority)
    } else {
        Decision::deny(Reason::NoElevatedAuthority)
    }
}

fn owned_or_managed(actor: &Actor, owner: PersonId, group: Option<GroupId>) -> Decision {
    let managed = if actor.manages_group(group) {
        Decision::allow(Reason::GroupManager)
    } else {
        Decision::deny(Reason::OutsideScope)
    };
    managed.or_else(|| {
        if actor.is_person(owner) {
            Decision::allow(Reason::Owner)
        } else {
            Decision::deny(Reason::OutsideScope)
        }
    })
}
