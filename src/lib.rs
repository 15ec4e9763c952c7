//! Calculation core of a shared-cost ("bill splitting") application.
//!
//! Everything here is pure and synchronous: the caller passes all inputs
//! explicitly, the current instant included, and gets back either a value
//! or an [`Error`]. Persistence and network dispatch belong to the caller.
//!
//! The main entry points, leaf to root:
//! - [`split::allocate`] divides a total among participants according to a
//!   [`split::SplitMethod`],
//! - [`schedule::next_due_date`] derives the next due instant of a
//!   [`schedule::RecurrenceRule`] in the fixed UTC-8 business calendar,
//! - [`entry::CostEntry::build`] composes both into a persisted-ready record,
//! - [`payload::RequestPayload`] is the JSON shape the backend expects.

pub mod amount;
pub mod date;
pub mod entry;
pub mod error;
pub mod payload;
pub mod schedule;
pub mod split;
pub mod store;
pub mod wizard;

pub use amount::Amount;
pub use entry::{CostEntry, EntryDraft};
pub use error::Error;
pub use payload::RequestPayload;
pub use schedule::{IntervalUnit, RecurrenceRule, StartTiming};
pub use split::{Allocation, Participant, ParticipantInput, SplitMethod};
