//! Reference tables maintained by staff admins.
//!
//! Every signed-in actor may read them; only staff admins change them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tooff_auth::{AccessPolicy, Actor, ConfigKind, EntityRef, PolicyGuard};
use tooff_core::{DomainError, DomainResult, ReferenceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceType {
    pub id: ReferenceId,
    pub description: String,
    /// Whether the dashboard asks for a shift with this type. Stored only.
    pub uses_shift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ReferenceId,
    pub description: String,
}

/// A state/region, identified by its two-letter abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: u32,
    pub abbreviation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub region: String,
    pub description: String,
}

/// In-memory catalog of reference data, guarded by the access policy.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    absence_types: BTreeMap<ReferenceId, AbsenceType>,
    shifts: BTreeMap<ReferenceId, Shift>,
    regions: BTreeMap<String, Region>,
    holidays: BTreeMap<(NaiveDate, String), Holiday>,
    guard: PolicyGuard,
}

impl ReferenceCatalog {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            guard: PolicyGuard::new(policy),
            ..Self::default()
        }
    }

    fn readable(&self, actor: Option<&Actor>, kind: ConfigKind) -> DomainResult<()> {
        self.guard.view(actor, EntityRef::Config(kind))?;
        Ok(())
    }

    fn writable(&self, actor: Option<&Actor>) -> DomainResult<()> {
        self.guard.manage_config(actor)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Absence types
    // ─────────────────────────────────────────────────────────────────────

    pub fn absence_types(&self, actor: Option<&Actor>) -> DomainResult<Vec<&AbsenceType>> {
        self.readable(actor, ConfigKind::AbsenceType)?;
        Ok(self.absence_types.values().collect())
    }

    pub fn absence_type(&self, actor: Option<&Actor>, id: ReferenceId) -> DomainResult<&AbsenceType> {
        self.readable(actor, ConfigKind::AbsenceType)?;
        self.absence_types.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn upsert_absence_type(&mut self, actor: Option<&Actor>, mut absence_type: AbsenceType) -> DomainResult<()> {
        self.writable(actor)?;
        absence_type.description = required_description(&absence_type.description)?;
        tracing::info!(id = %absence_type.id, "absence type saved");
        self.absence_types.insert(absence_type.id, absence_type);
        Ok(())
    }

    pub fn remove_absence_type(&mut self, actor: Option<&Actor>, id: ReferenceId) -> DomainResult<AbsenceType> {
        self.writable(actor)?;
        let removed = self.absence_types.remove(&id).ok_or(DomainError::NotFound)?;
        tracing::info!(id = %id, "absence type removed");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shifts
    // ─────────────────────────────────────────────────────────────────────

    pub fn shifts(&self, actor: Option<&Actor>) -> DomainResult<Vec<&Shift>> {
        self.readable(actor, ConfigKind::Shift)?;
        Ok(self.shifts.values().collect())
    }

    pub fn upsert_shift(&mut self, actor: Option<&Actor>, mut shift: Shift) -> DomainResult<()> {
        self.writable(actor)?;
        shift.description = required_description(&shift.description)?;
        tracing::info!(id = %shift.id, "shift saved");
        self.shifts.insert(shift.id, shift);
        Ok(())
    }

    pub fn remove_shift(&mut self, actor: Option<&Actor>, id: ReferenceId) -> DomainResult<Shift> {
        self.writable(actor)?;
        let removed = self.shifts.remove(&id).ok_or(DomainError::NotFound)?;
        tracing::info!(id = %id, "shift removed");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Regions
    // ─────────────────────────────────────────────────────────────────────

    pub fn regions(&self, actor: Option<&Actor>) -> DomainResult<Vec<&Region>> {
        self.readable(actor, ConfigKind::RegionCode)?;
        Ok(self.regions.values().collect())
    }

    pub fn upsert_region(&mut self, actor: Option<&Actor>, mut region: Region) -> DomainResult<()> {
        self.writable(actor)?;
        region.abbreviation = normalize_abbreviation(&region.abbreviation)?;
        if let Some(other) = self
            .regions
            .values()
            .find(|r| r.code == region.code && r.abbreviation != region.abbreviation)
        {
            return Err(DomainError::conflict(format!(
                "region code {} already used by {}",
                region.code, other.abbreviation
            )));
        }
        tracing::info!(region = %region.abbreviation, code = region.code, "region saved");
        self.regions.insert(region.abbreviation.clone(), region);
        Ok(())
    }

    /// Regions still referenced by holidays cannot be removed.
    pub fn remove_region(&mut self, actor: Option<&Actor>, abbreviation: &str) -> DomainResult<Region> {
        self.writable(actor)?;
        let key = normalize_abbreviation(abbreviation)?;
        if !self.regions.contains_key(&key) {
            return Err(DomainError::NotFound);
        }
        if self.holidays.values().any(|h| h.region == key) {
            return Err(DomainError::conflict(format!("region {key} still has holidays")));
        }
        let removed = self.regions.remove(&key).ok_or(DomainError::NotFound)?;
        tracing::info!(region = %key, "region removed");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Holidays
    // ─────────────────────────────────────────────────────────────────────

    /// Holidays in `[from, to]`, optionally limited to one region, by date.
    pub fn holidays_between(
        &self,
        actor: Option<&Actor>,
        region: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<&Holiday>> {
        self.readable(actor, ConfigKind::Holiday)?;
        if to < from {
            return Err(DomainError::validation("holiday window ends before it starts"));
        }
        let region = region.map(normalize_abbreviation).transpose()?;

        Ok(self
            .holidays
            .values()
            .filter(|h| h.date >= from && h.date <= to)
            .filter(|h| region.as_ref().is_none_or(|r| &h.region == r))
            .collect())
    }

    pub fn upsert_holiday(&mut self, actor: Option<&Actor>, mut holiday: Holiday) -> DomainResult<()> {
        self.writable(actor)?;
        holiday.region = normalize_abbreviation(&holiday.region)?;
        holiday.description = required_description(&holiday.description)?;
        if !self.regions.contains_key(&holiday.region) {
            return Err(DomainError::validation(format!("unknown region '{}'", holiday.region)));
        }
        tracing::info!(date = %holiday.date, region = %holiday.region, "holiday saved");
        self.holidays.insert((holiday.date, holiday.region.clone()), holiday);
        Ok(())
    }

    pub fn remove_holiday(&mut self, actor: Option<&Actor>, date: NaiveDate, region: &str) -> DomainResult<Holiday> {
        self.writable(actor)?;
        let key = (date, normalize_abbreviation(region)?);
        let removed = self.holidays.remove(&key).ok_or(DomainError::NotFound)?;
        tracing::info!(date = %date, region = %key.1, "holiday removed");
        Ok(removed)
    }
}

fn required_description(raw: &str) -> DomainResult<String> {
    let description = raw.trim();
    if description.is_empty() {
        return Err(DomainError::validation("description cannot be empty"));
    }
    Ok(description.to_string())
}

fn normalize_abbreviation(raw: &str) -> DomainResult<String> {
    let abbreviation = raw.trim().to_uppercase();
    if abbreviation.len() != 2 || !abbreviation.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::validation(format!(
            "region must be a two-letter abbreviation, got '{raw}'"
        )));
    }
    Ok(abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tooff_auth::Role;
    use tooff_core::{GroupId, PersonId};

    fn hr() -> Actor {
        Actor::new(PersonId::new(1), Role::StaffAdmin)
    }

    fn regular() -> Actor {
        Actor::new(PersonId::new(5), Role::Regular).in_group(GroupId::new(2))
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn seeded() -> ReferenceCatalog {
        let mut catalog = ReferenceCatalog::default();
        let admin = hr();
        catalog
            .upsert_region(Some(&admin), Region { code: 35, abbreviation: "sp".to_string() })
            .unwrap();
        catalog
            .upsert_region(Some(&admin), Region { code: 33, abbreviation: "RJ".to_string() })
            .unwrap();
        catalog
            .upsert_holiday(
                Some(&admin),
                Holiday {
                    date: date(7, 9),
                    region: "SP".to_string(),
                    description: "Revolucao Constitucionalista".to_string(),
                },
            )
            .unwrap();
        catalog
            .upsert_holiday(
                Some(&admin),
                Holiday {
                    date: date(4, 23),
                    region: "rj".to_string(),
                    description: "Sao Jorge".to_string(),
                },
            )
            .unwrap();
        catalog
    }

    #[test]
    fn any_signed_in_actor_reads_reference_data() {
        let catalog = seeded();
        assert_eq!(catalog.regions(Some(&regular())).unwrap().len(), 2);
        assert!(catalog.absence_types(Some(&regular())).unwrap().is_empty());
        assert!(matches!(catalog.regions(None).unwrap_err(), DomainError::Unauthorized(_)));
    }

    #[test]
    fn only_staff_admins_write() {
        let mut catalog = seeded();
        let err = catalog
            .upsert_shift(
                Some(&regular()),
                Shift {
                    id: ReferenceId::new(1),
                    description: "Morning".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let manager = regular().with_manager_flag(true);
        assert!(catalog.remove_region(Some(&manager), "RJ").is_err());
    }

    #[test]
    fn absence_types_are_trimmed_and_replaced() {
        let mut catalog = ReferenceCatalog::default();
        let admin = hr();
        let vacation = AbsenceType {
            id: ReferenceId::new(1),
            description: " Vacation ".to_string(),
            uses_shift: false,
        };
        catalog.upsert_absence_type(Some(&admin), vacation.clone()).unwrap();
        catalog
            .upsert_absence_type(
                Some(&admin),
                AbsenceType {
                    uses_shift: true,
                    ..vacation
                },
            )
            .unwrap();

        let stored = catalog.absence_type(Some(&regular()), ReferenceId::new(1)).unwrap();
        assert_eq!(stored.description, "Vacation");
        assert!(stored.uses_shift);
        assert_eq!(catalog.absence_types(Some(&admin)).unwrap().len(), 1);
    }

    #[test]
    fn holidays_filter_by_window_and_region() {
        let catalog = seeded();
        let all = catalog
            .holidays_between(Some(&regular()), None, date(1, 1), date(12, 31))
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].region, "RJ");

        let sp = catalog
            .holidays_between(Some(&regular()), Some("sp"), date(7, 1), date(7, 31))
            .unwrap();
        assert_eq!(sp.len(), 1);
        assert_eq!(sp[0].date, date(7, 9));

        assert!(catalog
            .holidays_between(Some(&regular()), None, date(7, 31), date(7, 1))
            .is_err());
    }

    #[test]
    fn holidays_need_a_known_region() {
        let mut catalog = seeded();
        let err = catalog
            .upsert_holiday(
                Some(&hr()),
                Holiday {
                    date: date(1, 25),
                    region: "MG".to_string(),
                    description: "Local".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn regions_in_use_cannot_be_removed() {
        let mut catalog = seeded();
        let admin = hr();
        assert!(matches!(
            catalog.remove_region(Some(&admin), "sp").unwrap_err(),
            DomainError::Conflict(_)
        ));
        catalog.remove_holiday(Some(&admin), date(7, 9), "SP").unwrap();
        assert_eq!(catalog.remove_region(Some(&admin), "sp").unwrap().code, 35);
    }

    #[test]
    fn region_codes_are_unique() {
        let mut catalog = seeded();
        let err = catalog
            .upsert_region(Some(&hr()), Region { code: 35, abbreviation: "MG".to_string() })
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(catalog
            .upsert_region(Some(&hr()), Region { code: 1, abbreviation: "Sao".to_string() })
            .is_err());
    }
}
