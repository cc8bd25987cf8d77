//! Per-record event history.

use serde::{Deserialize, Serialize};

use tooff_core::{Aggregate, DomainResult, ExpectedVersion};

use crate::Event;

/// An event with its position in the record's history (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recorded<E> {
    sequence: u64,
    payload: E,
}

impl<E> Recorded<E> {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

/// Append-only history of a single record.
///
/// Appends are checked against an [`ExpectedVersion`], so two writers acting
/// on the same snapshot cannot both succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStream<E> {
    events: Vec<Recorded<E>>,
}

impl<E> Default for EventStream<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E: Event> EventStream<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number of the last event, `0` when empty.
    pub fn version(&self) -> u64 {
        self.events.last().map(|e| e.sequence).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recorded<E>> {
        self.events.iter()
    }

    /// Append `events` if the stream is still at `expected`.
    ///
    /// Returns the newly recorded slice.
    pub fn append(&mut self, expected: ExpectedVersion, events: Vec<E>) -> DomainResult<&[Recorded<E>]> {
        let current = self.version();
        expected.check(current)?;

        let start = self.events.len();
        for (offset, payload) in events.into_iter().enumerate() {
            tracing::trace!(
                event_type = payload.event_type(),
                sequence = current + offset as u64 + 1,
                "event recorded"
            );
            self.events.push(Recorded {
                sequence: current + offset as u64 + 1,
                payload,
            });
        }
        Ok(&self.events[start..])
    }

    /// Rebuild state by applying every recorded event to a fresh aggregate.
    pub fn replay_into<A>(&self, aggregate: &mut A)
    where
        A: Aggregate<Event = E>,
    {
        for recorded in &self.events {
            aggregate.apply(&recorded.payload);
        }
    }
}
