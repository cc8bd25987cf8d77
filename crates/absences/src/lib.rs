//! Absence requests (vacations, leave, time off) and their approval workflow.
//!
//! Pure domain logic: every command names the acting principal and is checked
//! against the access policy before any event is produced.

pub mod absence;
pub mod date_range;
pub mod queue;

pub use absence::{
    AbsenceApproved, AbsenceChange, AbsenceCommand, AbsenceDeleted, AbsenceEdited, AbsenceEvent,
    AbsenceRejected, AbsenceSubmitted, ApproveAbsence, DeleteAbsence, EditAbsence, RejectAbsence,
    SubmitAbsence,
};
pub use date_range::DateRange;
pub use queue::{QueueEntry, approval_queue};
