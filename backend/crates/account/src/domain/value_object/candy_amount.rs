//! Candy amount
//!
//! A strictly positive number of candies moved in one ledger entry.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CandyAmount(i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Candy amount must be greater than zero")]
pub struct NonPositiveAmount;

impl CandyAmount {
    pub fn new(value: i64) -> Result<Self, NonPositiveAmount> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(NonPositiveAmount)
        }
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CandyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount() {
        assert_eq!(CandyAmount::new(30).unwrap().value(), 30);
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert_eq!(CandyAmount::new(0), Err(NonPositiveAmount));
        assert_eq!(CandyAmount::new(-5), Err(NonPositiveAmount));
    }
}
