//! Division of a total amount among the participants of a shared cost.
//!
//! [`allocate`] is pure: the same inputs always produce the same
//! [`Allocation`]. Whatever cannot be represented exactly in cents is
//! reported as a residual instead of being dropped, so the caller can
//! display or absorb the rounding difference.

use std::fmt;

use crate::amount::Amount;
use crate::error::Error;

/// How a total is divided among participants.
///
/// The variant decides which input field of [`ParticipantInput`] is
/// authoritative: none for the equal modes, `percentage` for
/// [`Percentage`](SplitMethod::Percentage), `custom_amount` for
/// [`Custom`](SplitMethod::Custom).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// Total divided by participant count plus one: the requester is an
    /// implicit extra party and keeps their own share.
    EqualIncludingOwner,
    /// Total divided by participant count; the requester owes nothing.
    EqualExcludingOwner,
    /// Each participant owes a percentage of the total.
    Percentage,
    /// Each participant owes a hand-entered fixed amount.
    Custom,
}

impl SplitMethod {
    /// Tag understood by the backend's request-creation endpoint
    pub fn wire_tag(self) -> &'static str {
        match self {
            SplitMethod::EqualIncludingOwner => "equalWithMe",
            SplitMethod::EqualExcludingOwner => "equal",
            SplitMethod::Percentage => "percentage",
            SplitMethod::Custom => "custom",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_tag())
    }
}

/// One participant as entered in the split wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantInput {
    pub id: String,
    /// Share of the total in `[0, 100]`, read only for [`SplitMethod::Percentage`].
    /// A missing value counts as 0 (an untouched form field).
    pub percentage: Option<f64>,
    /// Fixed owed amount, read only for [`SplitMethod::Custom`].
    pub custom_amount: Option<f64>,
}

impl ParticipantInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), percentage: None, custom_amount: None }
    }

    pub fn with_percentage(id: impl Into<String>, percentage: f64) -> Self {
        Self { id: id.into(), percentage: Some(percentage), custom_amount: None }
    }

    pub fn with_custom_amount(id: impl Into<String>, amount: f64) -> Self {
        Self { id: id.into(), percentage: None, custom_amount: Some(amount) }
    }
}

/// One participant with their computed share.
///
/// `amount` is always derived by [`allocate`]; `percentage` and
/// `custom_amount` echo the authoritative input when the method uses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    pub amount: Amount,
    pub percentage: Option<f64>,
    pub custom_amount: Option<Amount>,
}

/// Result of allocating a total among participants.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub method: SplitMethod,
    pub total: Amount,
    pub participants: Vec<Participant>,
    /// The requester's own share, only for [`SplitMethod::EqualIncludingOwner`].
    /// Not part of `participants`: the caller tracks the owner separately.
    pub owner_share: Option<Amount>,
    /// `total - allocated()`. Non-zero when the total does not divide evenly,
    /// or when percentage/custom inputs do not reconstruct the total.
    pub residual: Amount,
    /// Sum of the entered percentages, only for [`SplitMethod::Percentage`].
    /// A sum away from 100 is a warning for the UI, never an error here.
    pub percentage_total: Option<f64>,
}

impl Allocation {
    /// Everything handed out, owner share included.
    pub fn allocated(&self) -> Amount {
        let parts: Amount = self.participants.iter().map(|p| p.amount).sum();
        parts + self.owner_share.unwrap_or(Amount::ZERO)
    }

    /// False when a percentage split does not sum to 100 (display-level
    /// warning; submission stays possible).
    pub fn percentages_balanced(&self) -> bool {
        match self.percentage_total {
            Some(sum) => (sum - 100.0).abs() < 1e-6,
            None => true,
        }
    }
}

/// Compute each participant's owed amount for the given split method.
///
/// Errors with [`Error::InvalidInput`] on a negative total, a negative
/// percentage or custom amount, or an empty participant list for the two
/// equal modes. A percentage sum different from 100 is deliberately not an
/// error; see [`Allocation::percentage_total`].
pub fn allocate(
    total: Amount,
    inputs: &[ParticipantInput],
    method: SplitMethod,
) -> Result<Allocation, Error> {
    if total.is_negative() {
        return Err(Error::InvalidInput(format!("total amount {} is negative", total)));
    }
    match method {
        SplitMethod::EqualIncludingOwner => {
            let share = equal_share(total, inputs, 1)?;
            let participants = inputs.iter().map(|p| derived(p, share)).collect();
            Ok(finish(method, total, participants, Some(share), None))
        }
        SplitMethod::EqualExcludingOwner => {
            let share = equal_share(total, inputs, 0)?;
            let participants = inputs.iter().map(|p| derived(p, share)).collect();
            Ok(finish(method, total, participants, None, None))
        }
        SplitMethod::Percentage => {
            let mut participants = Vec::with_capacity(inputs.len());
            let mut entered = 0.0;
            for p in inputs {
                let pct = p.percentage.unwrap_or(0.0);
                if pct < 0.0 {
                    return Err(Error::InvalidInput(format!(
                        "percentage {} for '{}' is negative",
                        pct, p.id
                    )));
                }
                entered += pct;
                participants.push(Participant {
                    id: p.id.clone(),
                    amount: Amount::from_float(total.to_float() * pct / 100.0),
                    percentage: Some(pct),
                    custom_amount: None,
                });
            }
            Ok(finish(method, total, participants, None, Some(entered)))
        }
        SplitMethod::Custom => {
            let mut participants = Vec::with_capacity(inputs.len());
            for p in inputs {
                let raw = p.custom_amount.unwrap_or(0.0);
                if raw < 0.0 {
                    return Err(Error::InvalidInput(format!(
                        "custom amount {} for '{}' is negative",
                        raw, p.id
                    )));
                }
                let amount = Amount::from_float(raw);
                participants.push(Participant {
                    id: p.id.clone(),
                    amount,
                    percentage: None,
                    custom_amount: Some(amount),
                });
            }
            Ok(finish(method, total, participants, None, None))
        }
    }
}

/// Per-head share for the equal modes, `extra` counting the implicit owner.
fn equal_share(
    total: Amount,
    inputs: &[ParticipantInput],
    extra: usize,
) -> Result<Amount, Error> {
    if inputs.is_empty() {
        return Err(Error::InvalidInput(
            "an equal split needs at least one participant".to_string(),
        ));
    }
    let heads = inputs.len() + extra;
    Ok(Amount::from_float(total.to_float() / heads as f64))
}

fn derived(input: &ParticipantInput, amount: Amount) -> Participant {
    Participant {
        id: input.id.clone(),
        amount,
        percentage: None,
        custom_amount: None,
    }
}

fn finish(
    method: SplitMethod,
    total: Amount,
    participants: Vec<Participant>,
    owner_share: Option<Amount>,
    percentage_total: Option<f64>,
) -> Allocation {
    let mut allocation = Allocation {
        method,
        total,
        participants,
        owner_share,
        residual: Amount::ZERO,
        percentage_total,
    };
    allocation.residual = total - allocation.allocated();
    allocation
}

#[cfg(test)]
mod test {
    use super::*;

    fn person(id: &str) -> ParticipantInput {
        ParticipantInput::new(id)
    }

    macro_rules! amounts {
        ( $alloc:expr ) => {
            $alloc.participants.iter().map(|p| p.amount).collect::<Vec<_>>()
        };
    }

    #[test]
    fn equal_with_owner_takes_an_extra_share() {
        let alloc = allocate(
            Amount::from_float(90.0),
            &[person("a"), person("b")],
            SplitMethod::EqualIncludingOwner,
        )
        .unwrap();
        assert_eq!(amounts!(alloc), vec![Amount::from_cents(3000); 2]);
        assert_eq!(alloc.owner_share, Some(Amount::from_cents(3000)));
        assert_eq!(alloc.residual, Amount::ZERO);
    }

    #[test]
    fn equal_without_owner() {
        let alloc = allocate(
            Amount::from_float(90.0),
            &[person("a"), person("b")],
            SplitMethod::EqualExcludingOwner,
        )
        .unwrap();
        assert_eq!(amounts!(alloc), vec![Amount::from_cents(4500); 2]);
        assert_eq!(alloc.owner_share, None);
        assert_eq!(alloc.residual, Amount::ZERO);
    }

    #[test]
    fn uneven_total_exposes_residual() {
        // 100 / 3 = 33.33 rounded, leaving one cent unassigned
        let alloc = allocate(
            Amount::from_float(100.0),
            &[person("a"), person("b")],
            SplitMethod::EqualIncludingOwner,
        )
        .unwrap();
        assert_eq!(alloc.allocated(), Amount::from_cents(9999));
        assert_eq!(alloc.residual, Amount::from_cents(1));
    }

    #[test]
    fn equal_split_residual_is_bounded_and_exposed() {
        // every head's share is rounded independently, each off by at most
        // half a cent, so the residual is bounded by ceil(heads / 2) cents
        // (one cent total only when the shares divide nearly evenly)
        let totals = [0.01, 0.10, 1.0, 7.77, 99.99, 100.0, 123.45, 1000.01];
        for &total in &totals {
            for n in 1..=7i64 {
                let people: Vec<_> = (0..n).map(|i| person(&format!("p{}", i))).collect();
                let alloc = allocate(
                    Amount::from_float(total),
                    &people,
                    SplitMethod::EqualIncludingOwner,
                )
                .unwrap();
                let heads = n + 1;
                let diff = alloc.residual.cents().abs();
                assert!(
                    diff <= (heads + 1) / 2,
                    "total {} over {} heads leaves residual {}",
                    total,
                    heads,
                    alloc.residual
                );
                // the residual always reconstructs the total exactly
                assert_eq!(alloc.allocated() + alloc.residual, Amount::from_float(total));
            }
        }
    }

    #[test]
    fn allocation_is_deterministic() {
        let people = [
            ParticipantInput::with_percentage("a", 33.3),
            ParticipantInput::with_percentage("b", 66.7),
        ];
        let total = Amount::from_float(47.19);
        let first = allocate(total, &people, SplitMethod::Percentage).unwrap();
        let second = allocate(total, &people, SplitMethod::Percentage).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn percentage_scaling() {
        let alloc = allocate(
            Amount::from_float(100.0),
            &[
                ParticipantInput::with_percentage("a", 25.0),
                ParticipantInput::with_percentage("b", 75.0),
            ],
            SplitMethod::Percentage,
        )
        .unwrap();
        assert_eq!(
            amounts!(alloc),
            vec![Amount::from_cents(2500), Amount::from_cents(7500)]
        );
        assert!(alloc.percentages_balanced());
        assert_eq!(alloc.residual, Amount::ZERO);
    }

    #[test]
    fn percentage_mismatch_is_a_warning_not_an_error() {
        let alloc = allocate(
            Amount::from_float(100.0),
            &[
                ParticipantInput::with_percentage("a", 30.0),
                ParticipantInput::with_percentage("b", 30.0),
            ],
            SplitMethod::Percentage,
        )
        .unwrap();
        assert_eq!(alloc.percentage_total, Some(60.0));
        assert!(!alloc.percentages_balanced());
        assert_eq!(alloc.residual, Amount::from_cents(4000));
    }

    #[test]
    fn missing_percentage_counts_as_zero() {
        let alloc = allocate(
            Amount::from_float(50.0),
            &[person("a"), ParticipantInput::with_percentage("b", 100.0)],
            SplitMethod::Percentage,
        )
        .unwrap();
        assert_eq!(
            amounts!(alloc),
            vec![Amount::ZERO, Amount::from_cents(5000)]
        );
    }

    #[test]
    fn custom_passthrough_rounds_half_up() {
        let alloc = allocate(
            Amount::from_float(20.0),
            &[ParticipantInput::with_custom_amount("a", 12.345)],
            SplitMethod::Custom,
        )
        .unwrap();
        assert_eq!(amounts!(alloc), vec![Amount::from_cents(1235)]);
        assert_eq!(alloc.participants[0].custom_amount, Some(Amount::from_cents(1235)));
        // no rescale toward the given total
        assert_eq!(alloc.residual, Amount::from_cents(2000 - 1235));
    }

    #[test]
    fn custom_boundary_cases() {
        let alloc = allocate(
            Amount::ZERO,
            &[
                ParticipantInput::with_custom_amount("a", 10.005),
                ParticipantInput::with_custom_amount("b", 0.0),
            ],
            SplitMethod::Custom,
        )
        .unwrap();
        assert_eq!(
            amounts!(alloc),
            vec![Amount::from_cents(1001), Amount::ZERO]
        );
    }

    macro_rules! bad_input {
        ( $e:expr ) => {
            assert!(matches!($e, Err(Error::InvalidInput(_))));
        };
    }

    #[test]
    fn rejections() {
        bad_input!(allocate(
            Amount::from_float(-1.0),
            &[person("a")],
            SplitMethod::EqualExcludingOwner,
        ));
        bad_input!(allocate(
            Amount::from_float(10.0),
            &[],
            SplitMethod::EqualIncludingOwner,
        ));
        bad_input!(allocate(
            Amount::from_float(10.0),
            &[],
            SplitMethod::EqualExcludingOwner,
        ));
        bad_input!(allocate(
            Amount::from_float(10.0),
            &[ParticipantInput::with_percentage("a", -5.0)],
            SplitMethod::Percentage,
        ));
        bad_input!(allocate(
            Amount::from_float(10.0),
            &[ParticipantInput::with_custom_amount("a", -0.01)],
            SplitMethod::Custom,
        ));
    }

    #[test]
    fn empty_list_is_fine_outside_equal_modes() {
        let alloc = allocate(Amount::from_float(10.0), &[], SplitMethod::Percentage).unwrap();
        assert!(alloc.participants.is_empty());
        assert_eq!(alloc.residual, Amount::from_cents(1000));
    }
}
