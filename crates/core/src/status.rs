//! Absence request lifecycle status.

use serde::{Deserialize, Serialize};

/// Status of an absence event.
///
/// `Pending` is the only non-terminal state. `Approved` and `Rejected` are
/// reached exactly once and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsenceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl AbsenceStatus {
    pub fn is_pending(self) -> bool {
        self == AbsenceStatus::Pending
    }

    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }

    /// Whether `self -> next` is a legal lifecycle transition.
    pub fn can_transition_to(self, next: AbsenceStatus) -> bool {
        matches!(
            (self, next),
            (AbsenceStatus::Pending, AbsenceStatus::Approved)
                | (AbsenceStatus::Pending, AbsenceStatus::Rejected)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AbsenceStatus::Pending => "pending",
            AbsenceStatus::Approved => "approved",
            AbsenceStatus::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for AbsenceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_transitions_out() {
        use AbsenceStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
        for terminal in [Approved, Rejected] {
            for next in [Pending, Approved, Rejected] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&AbsenceStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
    }
}
