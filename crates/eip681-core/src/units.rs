use std::fmt::{self, Display};
use std::str::FromStr;

use alloy_primitives::U256;

use crate::error::UnitError;

/// Named denominations of the native currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Wei,
    Gwei,
    Ether,
}

impl Unit {
    pub const fn decimals(self) -> u8 {
        match self {
            Unit::Wei => 0,
            Unit::Gwei => 9,
            Unit::Ether => 18,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Unit::Wei => "wei",
            Unit::Gwei => "gwei",
            Unit::Ether => "ether",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "wei" => Ok(Unit::Wei),
            "gwei" => Ok(Unit::Gwei),
            "ether" | "eth" => Ok(Unit::Ether),
            other => Err(UnitError::UnknownUnit(other.to_string())),
        }
    }
}

/// Converts a human-readable decimal amount into integer base units.
pub trait UnitConverter {
    fn to_base_units(&self, amount: &str, unit: Unit) -> Result<String, UnitError>;
}

/// Exact digit-wise conversion into a 256-bit integer; never touches floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalUnitConverter;

impl UnitConverter for DecimalUnitConverter {
    fn to_base_units(&self, amount: &str, unit: Unit) -> Result<String, UnitError> {
        parse_units(amount, unit).map(|value| value.to_string())
    }
}

/// Splits `amount` into whole and fractional digit strings.
///
/// Accepts `12`, `12.5`, `.5` and `12.`; rejects signs, exponents, separators
/// and a lone `.`.
pub(crate) fn split_decimal(amount: &str) -> Result<(&str, &str), UnitError> {
    let trimmed = amount.trim();
    // Negative zero is zero.
    let trimmed = match trimmed.strip_prefix('-') {
        Some(magnitude) if !has_nonzero_digit(magnitude) => magnitude,
        _ => trimmed,
    };
    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(UnitError::InvalidNumeric);
    }
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(UnitError::InvalidNumeric);
    }
    Ok((whole, frac))
}

pub(crate) fn has_nonzero_digit(amount: &str) -> bool {
    amount.bytes().any(|byte| matches!(byte, b'1'..=b'9'))
}

pub fn parse_units(amount: &str, unit: Unit) -> Result<U256, UnitError> {
    let (whole, frac) = split_decimal(amount)?;
    let decimals = usize::from(unit.decimals());

    // Trailing zeros past the unit's precision do not change the value.
    let significant = frac.trim_end_matches('0');
    if significant.len() > decimals {
        return Err(UnitError::TooManyDecimals {
            decimals: significant.len(),
            max: unit.decimals(),
            unit: unit.name(),
        });
    }

    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    digits.push_str(significant);
    digits.extend(std::iter::repeat('0').take(decimals - significant.len()));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| UnitError::Overflow)
}
