//! Cent-denominated currency values.
//!
//! All currency math in the crate happens on integer cents so that repeated
//! aggregation stays exact; floats only appear at the boundaries (caller
//! input and the JSON payload), where they are quantized once with
//! round-half-up semantics.

use std::fmt;
use std::iter::Sum;
use std::ops;

use serde::{Serialize, Serializer};

/// A monetary value, stored as a signed number of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Amount(cents)
    }

    /// Quantize a float to cents, rounding half up at the second decimal.
    ///
    /// The value is first snapped to mils so that inputs like `12.345`,
    /// which have no exact binary representation, still carry their
    /// intended half digit: `12.345` becomes `12.35`, not `12.34`.
    pub fn from_float(value: f64) -> Self {
        let mils = (value * 1000.0).round() as i64;
        Amount((mils + 5).div_euclid(10))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn to_float(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Amount {
    /// Amounts cross the wire as plain 2-decimal numbers.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_float())
    }
}

impl ops::Add for Amount {
    type Output = Amount;
    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl ops::Sub for Amount {
    type Output = Amount;
    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl ops::Neg for Amount {
    type Output = Amount;
    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.0 += other.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}
