//! Validation rules to schema constraint attributes
//!
//! Each rule applies only to the kinds it makes sense for and is silently ignored otherwise.
//! Rules are applied in declaration order; a later rule overwrites the attributes an earlier
//! one set.

use tracing::trace;

use crate::constants::FORMAT_EMAIL;
use crate::model::{LengthRange, NumericRange, ValidationRule};
use crate::tree::SchemaPrimitiveKind;

/// Schema constraint attributes of one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    /// Field must be present
    pub required:          bool,
    /// Numeric lower bound
    pub minimum:           Option<f64>,
    /// Numeric upper bound
    pub maximum:           Option<f64>,
    /// Lower bound is exclusive
    pub exclusive_minimum: bool,
    /// Upper bound is exclusive
    pub exclusive_maximum: bool,
    /// Minimum string length
    pub min_length:        Option<u64>,
    /// Maximum string length
    pub max_length:        Option<u64>,
    /// Minimum array size
    pub min_items:         Option<u64>,
    /// Maximum array size
    pub max_items:         Option<u64>,
    /// Regular expression, verbatim
    pub pattern:           Option<String>,
    /// Format marker set by a rule (`email`)
    pub format:            Option<String>,
}

impl ConstraintSet {
    /// True when no attribute is set
    pub fn is_empty(&self) -> bool { *self == Self::default() }
}

/// Maps validation rules onto schema constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintMapper;

impl ConstraintMapper {
    /// Map `rules` for a field of kind `target`
    pub fn map(self, rules: &[ValidationRule], target: SchemaPrimitiveKind) -> ConstraintSet {
        map_constraints(rules, target)
    }
}

/// Map `rules` for a field of kind `target`
pub fn map_constraints(rules: &[ValidationRule], target: SchemaPrimitiveKind) -> ConstraintSet {
    let mut constraints = ConstraintSet::default();

    for rule in rules {
        let applied = match rule {
            ValidationRule::Required => {
                constraints.required = true;
                true
            }
            ValidationRule::NumericRange(range) => {
                apply_numeric(&mut constraints, range, target)
            }
            ValidationRule::LengthRange(range) => apply_length(&mut constraints, range, target),
            ValidationRule::Pattern { regex } if target == SchemaPrimitiveKind::String => {
                constraints.pattern = Some(regex.clone());
                true
            }
            ValidationRule::Email if target == SchemaPrimitiveKind::String => {
                constraints.format = Some(FORMAT_EMAIL.to_string());
                true
            }
            ValidationRule::Pattern { .. } | ValidationRule::Email => false,
        };

        if !applied {
            trace!(?rule, kind = %target, "Validation rule does not apply to kind - ignored");
        }
    }

    constraints
}

fn apply_numeric(
    constraints: &mut ConstraintSet,
    range: &NumericRange,
    target: SchemaPrimitiveKind,
) -> bool {
    if !target.is_numeric() {
        return false;
    }
    if let Some(min) = range.min {
        constraints.minimum = Some(min);
        constraints.exclusive_minimum = range.exclusive_min;
    }
    if let Some(max) = range.max {
        constraints.maximum = Some(max);
        constraints.exclusive_maximum = range.exclusive_max;
    }
    true
}

fn apply_length(
    constraints: &mut ConstraintSet,
    range: &LengthRange,
    target: SchemaPrimitiveKind,
) -> bool {
    let (min, max) = range.inclusive_bounds();
    match target {
        SchemaPrimitiveKind::String => {
            if min.is_some() {
                constraints.min_length = min;
            }
            if max.is_some() {
                constraints.max_length = max;
            }
            true
        }
        SchemaPrimitiveKind::Array => {
            if min.is_some() {
                constraints.min_items = min;
            }
            if max.is_some() {
                constraints.max_items = max;
            }
            true
        }
        _ => false,
    }
}
