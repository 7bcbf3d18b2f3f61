#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Sentinel cell text meaning "this geography reported no value".
pub const NO_DATA: &str = "no data";

/// Numeric representation used for the `total` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueType {
    /// Totals are whole counts, rounded half-to-even from the input.
    #[default]
    Integer,
    /// Totals are percentages, rounded to one decimal and stored as text.
    Float,
}

/// A converted `total` cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TotalValue {
    /// The `"no data"` sentinel. Excluded from accumulation, stored as NULL.
    Missing,
    Count(i64),
    Percent(f64),
}

impl TotalValue {
    /// Convert a raw cell into the configured representation.
    ///
    /// Rounding happens here, before any accumulation, so the running totals
    /// in the normalizer always see the value that will be emitted.
    pub fn parse(raw: &str, value_type: ValueType) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed == NO_DATA {
            return Ok(Self::Missing);
        }
        let parsed: f64 = trimmed
            .parse()
            .map_err(|_| ModelError::InvalidTotal(raw.to_string()))?;
        Ok(match value_type {
            ValueType::Integer => Self::Count(parsed.round_ties_even() as i64),
            ValueType::Float => Self::Percent(round_one_decimal(parsed)),
        })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view for accumulation. `None` for missing values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Missing => None,
            Self::Count(v) => Some(*v as f64),
            Self::Percent(v) => Some(*v),
        }
    }

    /// Subtract the group's excess over 100 from this value.
    ///
    /// Counts only ever accumulate whole numbers, so the excess is integral
    /// for them; percentages are re-rounded to one decimal to absorb float
    /// noise from the subtraction. The result may be negative: a row whose
    /// own value exceeds the remaining budget is not clamped at zero.
    pub fn subtract_excess(self, excess: f64) -> Self {
        match self {
            Self::Missing => Self::Missing,
            Self::Count(v) => Self::Count(v - excess.round_ties_even() as i64),
            Self::Percent(v) => Self::Percent(round_one_decimal(v - excess)),
        }
    }
}

impl fmt::Display for TotalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str(NO_DATA),
            Self::Count(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v:.1}"),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_sentinel_maps_to_missing() {
        let total = TotalValue::parse("no data", ValueType::Integer).unwrap();
        assert!(total.is_missing());
    }

    #[test]
    fn integer_totals_round_half_to_even() {
        assert_eq!(
            TotalValue::parse("2.5", ValueType::Integer).unwrap(),
            TotalValue::Count(2)
        );
        assert_eq!(
            TotalValue::parse("3.5", ValueType::Integer).unwrap(),
            TotalValue::Count(4)
        );
        assert_eq!(
            TotalValue::parse("60", ValueType::Integer).unwrap(),
            TotalValue::Count(60)
        );
    }

    #[test]
    fn float_totals_round_to_one_decimal() {
        assert_eq!(
            TotalValue::parse("33.333", ValueType::Float).unwrap(),
            TotalValue::Percent(33.3)
        );
        assert_eq!(TotalValue::Percent(33.3).to_string(), "33.3");
    }

    #[test]
    fn garbage_totals_are_rejected() {
        assert!(TotalValue::parse("n/a", ValueType::Integer).is_err());
        assert!(TotalValue::parse("", ValueType::Float).is_err());
    }

    #[test]
    fn excess_subtraction_can_go_negative() {
        assert_eq!(
            TotalValue::Count(5).subtract_excess(15.0),
            TotalValue::Count(-10)
        );
    }
}
