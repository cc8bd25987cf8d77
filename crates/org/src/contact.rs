use serde::{Deserialize, Serialize};

/// Contact details shared by companies and groups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactInfo {
    /// Trim every field, dropping the ones left empty; emails are lowercased.
    pub fn normalized(self) -> Self {
        Self {
            email: clean(self.email).map(|e| e.to_lowercase()),
            phone: clean(self.phone),
            address: clean(self.address),
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
