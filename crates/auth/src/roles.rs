use serde::{Deserialize, Serialize};

/// Role of a person in the absence system.
///
/// Role and the manager flag are orthogonal: a `Regular` person can hold the
/// manager flag for their group, and only the flag confers group authority.
/// Values the policy does not recognize are kept verbatim and grant nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// HR staff: unrestricted authority over every record.
    StaffAdmin,
    Manager,
    Regular,
    /// A role string the policy does not know. Treated like `Regular`.
    Unrecognized(UnrecognizedRole),
}

/// A role name that matched none of the known roles or their aliases.
///
/// Only [`Role::parse`] builds one, so it can never hold a canonical name and
/// a serialize/deserialize round-trip cannot promote it to a real role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnrecognizedRole(String);

impl UnrecognizedRole {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Role {
    /// Roles that can be stored on a user record.
    pub const ASSIGNABLE: [Role; 3] = [Role::StaffAdmin, Role::Manager, Role::Regular];

    /// Parse a role name. Accepts the API's legacy names (`rh`, `gestor`,
    /// `comum`) as aliases.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "staff_admin" | "rh" => Role::StaffAdmin,
            "manager" | "gestor" => Role::Manager,
            "regular" | "comum" => Role::Regular,
            _ => Role::Unrecognized(UnrecognizedRole(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::StaffAdmin => "staff_admin",
            Role::Manager => "manager",
            Role::Regular => "regular",
            Role::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_staff_admin(&self) -> bool {
        matches!(self, Role::StaffAdmin)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::parse(value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_aliases_map_to_roles() {
        assert_eq!(Role::parse("rh"), Role::StaffAdmin);
        assert_eq!(Role::parse("Gestor"), Role::Manager);
        assert_eq!(Role::parse(" comum "), Role::Regular);
    }

    #[test]
    fn unknown_role_is_preserved() {
        let role = Role::parse("superuser");
        assert!(matches!(&role, Role::Unrecognized(raw) if raw.as_str() == "superuser"));
        assert!(!role.is_recognized());
        assert_eq!(role.to_string(), "superuser");
    }

    #[test]
    fn serde_uses_canonical_names() {
        let role: Role = serde_json::from_str("\"rh\"").unwrap();
        assert_eq!(role, Role::StaffAdmin);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"staff_admin\"");
    }

    #[test]
    fn unrecognized_role_survives_round_trip() {
        for raw in ["superuser", "Admin ", "hr"] {
            let role = Role::parse(raw);
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role, "{raw}");
            assert!(!back.is_recognized());
        }
    }
}
