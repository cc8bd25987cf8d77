//! Staff-admin setup of a company, its groups and reference tables.

use chrono::Utc;

use tooff_auth::{AccessPolicy, Actor, ConfigKind, EntityRef, Role};
use tooff_core::{Aggregate, CompanyId, DomainError, GroupId, PersonId, ReferenceId};
use tooff_events::Event;
use tooff_org::{
    AbsenceType, Company, CompanyCommand, ContactInfo, CreateGroup, Group, GroupCommand, ReferenceCatalog,
    RegisterCompany,
};

fn hr() -> Actor {
    Actor::new(PersonId::new(1), Role::StaffAdmin)
}

fn manager() -> Actor {
    Actor::new(PersonId::new(2), Role::Manager)
        .in_group(GroupId::new(10))
        .with_manager_flag(true)
}

#[test]
fn staff_admin_sets_up_the_organization() {
    let policy = AccessPolicy::default();

    let mut company = Company::empty(CompanyId::new(1)).with_policy(policy);
    let registered = company
        .handle(&CompanyCommand::Register(RegisterCompany {
            actor: Some(hr()),
            company_id: CompanyId::new(1),
            tax_id: 11_222_333_000_181,
            name: "Acme".to_string(),
            contact: ContactInfo {
                email: Some("HR@ACME.COM".to_string()),
                ..ContactInfo::default()
            },
            occurred_at: Utc::now(),
        }))
        .unwrap();
    assert_eq!(registered[0].event_type(), "org.company.registered");
    for e in &registered {
        company.apply(e);
    }
    assert_eq!(company.contact().email.as_deref(), Some("hr@acme.com"));

    let mut group = Group::empty(GroupId::new(10)).with_policy(policy);
    for e in group
        .handle(&GroupCommand::Create(CreateGroup {
            actor: Some(hr()),
            group_id: GroupId::new(10),
            company_id: company.id_typed(),
            name: "Field team".to_string(),
            description: None,
            contact: ContactInfo::default(),
            occurred_at: Utc::now(),
        }))
        .unwrap()
    {
        group.apply(&e);
    }

    let view = group.view().unwrap();
    assert!(policy.can_view_entity(Some(&manager()), EntityRef::Group(&view)));
    assert!(!policy.can_view_entity(Some(&manager()), EntityRef::Company(company.id_typed())));

    let mut catalog = ReferenceCatalog::new(policy);
    catalog
        .upsert_absence_type(
            Some(&hr()),
            AbsenceType {
                id: ReferenceId::new(1),
                description: "Vacation".to_string(),
                uses_shift: false,
            },
        )
        .unwrap();
    assert!(policy.can_view_entity(Some(&manager()), ConfigKind::AbsenceType.into()));
    assert_eq!(catalog.absence_types(Some(&manager())).unwrap()[0].description, "Vacation");
}

#[test]
fn nobody_but_staff_admin_mutates_org_data() {
    let policy = AccessPolicy::default();
    let mut catalog = ReferenceCatalog::new(policy);

    for actor in [None, Some(manager())] {
        let err = catalog
            .remove_absence_type(actor.as_ref(), ReferenceId::new(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    // Authorization comes before the existence check.
    assert_eq!(
        catalog.remove_absence_type(Some(&hr()), ReferenceId::new(1)).unwrap_err(),
        DomainError::NotFound
    );
}
