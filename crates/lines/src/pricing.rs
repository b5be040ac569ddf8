//! Pricing recalculation engine.
//!
//! Every edit that touches a priced field ends up here with a candidate unit
//! price; the engine derives total, discount amount and discount percent from
//! it so the four figures on a line always agree.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use draftorder_core::ValueObject;

/// Round to two decimal places on the exact binary value, ties away from zero.
///
/// `1.115` is stored as `1.11499999..` and rounds to `1.11`, the same figure a
/// browser's `toFixed(2)` shows. Scaling by 100 first would round it up.
/// Negative zero is normalised so it never renders as `-0.00`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = match exact_cents(value.abs()) {
        Some(cents) => (cents as f64 / 100.0).copysign(value),
        None => value,
    };
    if rounded == 0.0 { 0.0 } else { rounded }
}

// Whole cents of a finite, non-negative value, rounded half up on its exact
// binary expansion. `None` when the value is already an integer.
fn exact_cents(value: f64) -> Option<u128> {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent - 1075)
    };
    if exponent >= 0 {
        return None;
    }

    // value * 100 = scaled / 2^shift
    let shift = exponent.unsigned_abs();
    let scaled = u128::from(mantissa) * 100;
    if shift >= 127 {
        // scaled < 2^60, far below half a cent.
        return Some(0);
    }
    let denominator = 1u128 << shift;
    let cents = scaled >> shift;
    let remainder = scaled & (denominator - 1);
    Some(if remainder * 2 >= denominator { cents + 1 } else { cents })
}

/// Parse the longest numeric prefix of `input`, the way a browser's
/// `parseFloat` does (`"12abc"` is 12, `"abc"` is nothing).
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    if s[pos..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exp_part = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exp_part = &s[pos + 1..end];
        }
    }

    let mut normalized = String::with_capacity(s.len() + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }
    if !exp_part.is_empty() {
        normalized.push('e');
        normalized.push_str(exp_part);
    }

    normalized.parse::<f64>().ok()
}

/// Raw user input for a numeric field, as typed into the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Number(f64),
    Text(String),
    Empty,
}

impl FieldInput {
    /// The numeric reading of this input, if there is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldInput::Number(n) if !n.is_nan() => Some(*n),
            FieldInput::Number(_) | FieldInput::Empty => None,
            FieldInput::Text(s) => parse_float(s),
        }
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Number(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Text(value)
    }
}

/// Numeric coercion with an explicit fallback for unparseable input.
pub fn ensure_numeric(input: &FieldInput, default: f64) -> f64 {
    input.as_number().unwrap_or(default)
}

/// Discount percentage, kept rounded to two decimals.
///
/// Renders (and serializes) as the two-decimal string the order form shows,
/// e.g. `"20.00"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct DiscountPercent(f64);

impl DiscountPercent {
    pub const ZERO: DiscountPercent = DiscountPercent(0.0);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(round2(value))
        } else {
            Self::ZERO
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for DiscountPercent {}

impl core::fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for DiscountPercent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiscountPercent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = FieldInput::deserialize(deserializer)?;
        Ok(Self::new(input.as_number().unwrap_or(0.0)))
    }
}

/// Numeric basis the engine works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingBasis {
    pub quantity: f64,
    pub base_unit_price: f64,
    pub candidate_unit_price: f64,
}

/// Derived pricing fields for one line.
///
/// `unit_price` is only present when the edit that produced the update sets
/// the charged unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingUpdate {
    pub unit_price: Option<f64>,
    pub discount_amount: f64,
    pub discount_percent: DiscountPercent,
    pub total: f64,
}

impl ValueObject for PricingUpdate {}

/// Recalculate total and discounts for a candidate unit price.
///
/// A candidate above the base price, or below zero, carries no discount; the
/// total still reflects it.
pub fn recalculate(basis: PricingBasis, set_unit_price: bool) -> PricingUpdate {
    let PricingBasis {
        quantity,
        base_unit_price,
        candidate_unit_price,
    } = basis;

    let unit_price = set_unit_price.then_some(candidate_unit_price);
    let total_before_discount = base_unit_price * quantity;
    let total = round2(candidate_unit_price * quantity);

    if base_unit_price < candidate_unit_price || candidate_unit_price < 0.0 {
        return PricingUpdate {
            unit_price,
            discount_amount: 0.0,
            discount_percent: DiscountPercent::ZERO,
            total,
        };
    }

    let discount_amount = round2(total_before_discount - total);
    let discount_amount = if discount_amount.is_finite() {
        discount_amount.max(0.0)
    } else {
        0.0
    };

    // Zero base total leaves no reference to take a percentage of.
    let discount_percent = if total_before_discount > 0.0 && total_before_discount.is_finite() {
        DiscountPercent::new(discount_amount / total_before_discount * 100.0)
    } else {
        DiscountPercent::ZERO
    };

    PricingUpdate {
        unit_price,
        discount_amount,
        discount_percent,
        total,
    }
}
