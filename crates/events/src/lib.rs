//! `tooff-events`: domain event contract and per-record history.
//!
//! Aggregates in the absence, user and organization crates describe every
//! state change as an [`Event`]; an [`EventStream`] keeps one record's
//! history and rebuilds it on demand.

pub mod event;
pub mod stream;

pub use event::Event;
pub use stream::{EventStream, Recorded};
