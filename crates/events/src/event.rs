use chrono::{DateTime, Utc};

/// A recorded state change of an absence, user or organization record.
///
/// Never mutated once emitted; corrections are new events.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, `<crate>.<record>.<change>` (e.g. "absences.event.approved").
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32;

    /// Business time of the change, as supplied by the command.
    fn occurred_at(&self) -> DateTime<Utc>;
}
