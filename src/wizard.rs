//! Step machine for the multi-step split wizard.
//!
//! The flow is charge-type, recipient search, split configuration, final
//! add screen. Both directions live in one transition table instead of
//! per-handler conditionals, so the back-navigation branching (the search
//! step is skipped entirely when a recipient was preselected, e.g. when the
//! wizard was opened from a contact) stays in a single place.

/// Named steps of the wizard, in nominal forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ChargeType,
    Search,
    Split,
    Add,
}

/// Branching inputs the transitions depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardContext {
    /// A recipient was chosen before the wizard opened; skip the search step.
    pub recipient_preselected: bool,
}

impl Step {
    /// Next step, `None` once the wizard is on its last screen.
    pub fn advance(self, ctx: &WizardContext) -> Option<Step> {
        use Step::*;
        match self {
            ChargeType if ctx.recipient_preselected => Some(Split),
            ChargeType => Some(Search),
            Search => Some(Split),
            Split => Some(Add),
            Add => None,
        }
    }

    /// Previous step, `None` at the entry screen. Mirrors [`Step::advance`]:
    /// going back never lands on a skipped step.
    pub fn back(self, ctx: &WizardContext) -> Option<Step> {
        use Step::*;
        match self {
            ChargeType => None,
            Search => Some(ChargeType),
            Split if ctx.recipient_preselected => Some(ChargeType),
            Split => Some(Search),
            Add => Some(Split),
        }
    }
}

/// Current position in the wizard.
#[derive(Debug, Clone, Copy)]
pub struct Wizard {
    step: Step,
    ctx: WizardContext,
}

impl Wizard {
    pub fn new(ctx: WizardContext) -> Self {
        Self { step: Step::ChargeType, ctx }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Move forward; a no-op on the last screen.
    pub fn next(&mut self) {
        if let Some(next) = self.step.advance(&self.ctx) {
            self.step = next;
        }
    }

    /// Move backward; a no-op on the entry screen.
    pub fn previous(&mut self) {
        if let Some(prev) = self.step.back(&self.ctx) {
            self.step = prev;
        }
    }
}
