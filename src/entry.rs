//! Assembly of a persisted-ready cost entry.
//!
//! [`CostEntry::build`] is pure composition: allocate the split, derive the
//! next due instant, record the metadata. Errors from the sub-calls pass
//! through untouched, and the entry is immutable once built; persisting it
//! is the caller's job.

use chrono::{DateTime, Utc};

use crate::amount::Amount;
use crate::error::Error;
use crate::schedule::{self, RecurrenceRule, StartTiming};
use crate::split::{self, Participant, ParticipantInput, SplitMethod};

/// Everything the split wizard collected for one charge.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub name: String,
    pub total: Amount,
    pub participants: Vec<ParticipantInput>,
    pub method: SplitMethod,
    pub rule: RecurrenceRule,
    pub start: StartTiming,
    /// The amount may change between cycles and needs re-syncing backend-side.
    pub is_dynamic: bool,
    pub allow_mark_as_paid_for_everyone: bool,
    /// Current instant, passed in explicitly to keep the build reproducible.
    pub now: DateTime<Utc>,
}

/// One assembled shared-cost request, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    pub name: String,
    pub method: SplitMethod,
    /// For a custom split this is the sum of the entered amounts, not
    /// whatever total the form happened to hold.
    pub total: Amount,
    /// Sum of the participants' owed amounts (the owner's share, when there
    /// is one, is not owed to anybody).
    pub total_owed: Amount,
    pub participants: Vec<Participant>,
    /// Cent left over (or missing) after rounding, for the UI to display
    /// or absorb.
    pub residual: Amount,
    /// Sum of entered percentages when the split is by percentage; a value
    /// away from 100 is a display-level warning.
    pub percentage_total: Option<f64>,
    pub rule: RecurrenceRule,
    pub start: StartTiming,
    pub next_due: Option<DateTime<Utc>>,
    pub is_dynamic: bool,
    pub allow_mark_as_paid_for_everyone: bool,
}

impl CostEntry {
    /// Allocate, schedule, and assemble. Fails with whichever error the
    /// allocation or the schedule derivation fails with.
    pub fn build(draft: EntryDraft) -> Result<Self, Error> {
        let allocation = split::allocate(draft.total, &draft.participants, draft.method)?;
        let next_due = schedule::next_due_date(draft.rule, draft.start, draft.now)?;
        let total_owed = allocation.participants.iter().map(|p| p.amount).sum();
        // a custom split's total is defined by its parts
        let total = if draft.method == SplitMethod::Custom {
            total_owed
        } else {
            allocation.total
        };
        Ok(CostEntry {
            name: draft.name,
            method: draft.method,
            total,
            total_owed,
            participants: allocation.participants,
            residual: allocation.residual,
            percentage_total: allocation.percentage_total,
            rule: draft.rule,
            start: draft.start,
            next_due,
            is_dynamic: draft.is_dynamic,
            allow_mark_as_paid_for_everyone: draft.allow_mark_as_paid_for_everyone,
        })
    }
}
