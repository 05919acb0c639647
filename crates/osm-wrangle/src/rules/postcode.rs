//! Postcode range checks.

use serde::{Deserialize, Serialize};

use crate::validation::is_integer;

/// Result of checking a postcode against the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostcodeCheck {
    /// Integer inside the range.
    Valid,
    /// Integer outside the range.
    OutOfRange,
    /// Not an integer at all.
    NotANumber,
}

/// Half-open integer range `[min, max)` of accepted postcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostcodeRange {
    pub min: i64,
    pub max: i64,
}

impl PostcodeRange {
    /// Create a range.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Classify a postcode. Integers too wide for `i64` are out of range.
    pub fn check(&self, postcode: &str) -> PostcodeCheck {
        if !is_integer(postcode) {
            return PostcodeCheck::NotANumber;
        }
        match postcode.trim().parse::<i64>() {
            Ok(n) if (self.min..self.max).contains(&n) => PostcodeCheck::Valid,
            _ => PostcodeCheck::OutOfRange,
        }
    }

    /// True if the postcode is an integer inside the range.
    pub fn is_valid(&self, postcode: &str) -> bool {
        self.check(postcode) == PostcodeCheck::Valid
    }
}

impl Default for PostcodeRange {
    /// Quezon City postcodes.
    fn default() -> Self {
        Self::new(1100, 1200)
    }
}

/// True if `postcode` is a Quezon City postcode (an integer in `[1100, 1200)`).
pub fn valid_postcode(postcode: &str) -> bool {
    PostcodeRange::default().is_valid(postcode)
}
