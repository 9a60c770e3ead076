//! Validation rules declared on record fields

use serde::{Deserialize, Serialize};

/// A single declared constraint on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// The field must be present
    Required,
    /// Numeric bounds
    NumericRange(NumericRange),
    /// Length bounds: characters for text, element count for collections
    LengthRange(LengthRange),
    /// The value must match a regular expression
    Pattern {
        /// The expression, kept verbatim
        regex: String,
    },
    /// The value must be an email address
    Email,
}

/// Numeric bounds with independent exclusivity flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericRange {
    /// Lower bound
    pub min:           Option<f64>,
    /// Upper bound
    pub max:           Option<f64>,
    /// Lower bound is exclusive
    pub exclusive_min: bool,
    /// Upper bound is exclusive
    pub exclusive_max: bool,
}

/// Length bounds with independent exclusivity flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthRange {
    /// Lower bound
    pub min:           Option<u64>,
    /// Upper bound
    pub max:           Option<u64>,
    /// Lower bound is exclusive
    pub exclusive_min: bool,
    /// Upper bound is exclusive
    pub exclusive_max: bool,
}

impl ValidationRule {
    /// Inclusive numeric range
    pub const fn range(min: f64, max: f64) -> Self {
        Self::NumericRange(NumericRange::between(min, max))
    }

    /// Inclusive length range
    pub const fn length(min: u64, max: u64) -> Self {
        Self::LengthRange(LengthRange::between(min, max))
    }

    /// Regular expression rule
    pub fn pattern(regex: impl Into<String>) -> Self {
        Self::Pattern {
            regex: regex.into(),
        }
    }
}

impl NumericRange {
    /// Inclusive range over `[min, max]`
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min:           Some(min),
            max:           Some(max),
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Only a lower bound
    pub const fn at_least(min: f64) -> Self {
        Self {
            min:           Some(min),
            max:           None,
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Only an upper bound
    pub const fn at_most(max: f64) -> Self {
        Self {
            min:           None,
            max:           Some(max),
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Make the lower bound exclusive
    #[must_use]
    pub const fn exclusive_min(mut self) -> Self {
        self.exclusive_min = true;
        self
    }

    /// Make the upper bound exclusive
    #[must_use]
    pub const fn exclusive_max(mut self) -> Self {
        self.exclusive_max = true;
        self
    }
}

impl LengthRange {
    /// Inclusive range over `[min, max]`
    pub const fn between(min: u64, max: u64) -> Self {
        Self {
            min:           Some(min),
            max:           Some(max),
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Only a lower bound
    pub const fn at_least(min: u64) -> Self {
        Self {
            min:           Some(min),
            max:           None,
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Only an upper bound
    pub const fn at_most(max: u64) -> Self {
        Self {
            min:           None,
            max:           Some(max),
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Make the lower bound exclusive
    #[must_use]
    pub const fn exclusive_min(mut self) -> Self {
        self.exclusive_min = true;
        self
    }

    /// Make the upper bound exclusive
    #[must_use]
    pub const fn exclusive_max(mut self) -> Self {
        self.exclusive_max = true;
        self
    }

    /// Bounds as the inclusive pair a schema can express
    ///
    /// An exclusive minimum moves up by one, an exclusive maximum down by one (never below zero).
    pub const fn inclusive_bounds(&self) -> (Option<u64>, Option<u64>) {
        let min = match self.min {
            Some(min) if self.exclusive_min => Some(min.saturating_add(1)),
            other => other,
        };
        let max = match self.max {
            Some(max) if self.exclusive_max => Some(max.saturating_sub(1)),
            other => other,
        };
        (min, max)
    }
}
