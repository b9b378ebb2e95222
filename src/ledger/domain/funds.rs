//! Funds value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of funds in the marketplace's smallest currency unit.
///
/// Arithmetic is checked: additions and subtractions return `None` on
/// overflow or shortfall instead of wrapping, so balances can never go
/// negative or silently wrap around.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Funds(u64);

impl Funds {
    /// Zero funds.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of the amount.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Subtracts an amount, returning `None` when it exceeds the balance.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(difference) => Some(Self(difference)),
            None => None,
        }
    }
}

impl fmt::Display for Funds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Funds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
