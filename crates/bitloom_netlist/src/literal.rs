//! Constant values and sized literal parsing.
//!
//! A constant is given either as an integer (width defaults to the smallest
//! width that holds it, never below one bit) or as a sized literal string
//! such as `8'hFF` or `3'b101`. Either way the result is a validated
//! `(bitwidth, value)` pair with `value < 2^bitwidth`.

use crate::error::{NetlistError, NetlistResult};
use num_bigint::{BigInt, BigUint, Sign};

/// The value a constant is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstInput {
    /// An integer. Negative values are rejected during validation.
    Int(BigInt),
    /// A sized literal such as `4'b1010`.
    Text(String),
}

macro_rules! const_input_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConstInput {
                fn from(v: $t) -> Self {
                    ConstInput::Int(BigInt::from(v))
                }
            }
        )*
    };
}

const_input_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl From<BigInt> for ConstInput {
    fn from(v: BigInt) -> Self {
        ConstInput::Int(v)
    }
}

impl From<BigUint> for ConstInput {
    fn from(v: BigUint) -> Self {
        ConstInput::Int(BigInt::from(v))
    }
}

impl From<&str> for ConstInput {
    fn from(s: &str) -> Self {
        ConstInput::Text(s.to_string())
    }
}

impl From<String> for ConstInput {
    fn from(s: String) -> Self {
        ConstInput::Text(s)
    }
}

/// A validated constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConst {
    /// Width in bits, at least one.
    pub bitwidth: u32,
    /// The value, guaranteed to fit in `bitwidth` bits.
    pub value: BigUint,
}

/// Smallest width that holds `value`; zero still takes one bit.
pub fn min_bitwidth(value: &BigUint) -> u32 {
    value.bits().max(1) as u32
}

/// Validates a constant, inferring its width when neither the caller nor the
/// literal gives one.
pub fn parse_const(input: &ConstInput, bitwidth: Option<u32>) -> NetlistResult<ParsedConst> {
    match input {
        ConstInput::Int(v) => {
            let width = match bitwidth {
                Some(w) => i64::from(w),
                None => i64::from(min_bitwidth(v.magnitude())),
            };
            validate(&v.to_string(), width, v)
        }
        ConstInput::Text(text) => {
            if bitwidth.is_some() {
                return Err(NetlistError::LiteralWithBitwidth {
                    literal: text.clone(),
                });
            }
            let (width, value) = parse_literal(text)?;
            validate(text, width, &BigInt::from(value))
        }
    }
}

/// Splits a sized literal `<width>'<digits>` into its raw width and value.
///
/// The digit field may start with a base letter (`b`, `o`, `d`, `h` or `x`,
/// either case); without one it is decimal. Underscores are ignored. Width
/// range checks are left to the caller.
pub fn parse_literal(text: &str) -> NetlistResult<(i64, BigUint)> {
    let mut parts = text.split('\'');
    let (Some(width_text), Some(digits), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NetlistError::malformed(
            text,
            "expected exactly one `'` between width and digits",
        ));
    };

    let bitwidth: i64 = width_text
        .parse()
        .map_err(|_| NetlistError::malformed(text, "width field is not an integer"))?;

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    let (radix, body) = match digits.chars().next() {
        Some('b' | 'B') => (2, &digits[1..]),
        Some('o' | 'O') => (8, &digits[1..]),
        Some('d' | 'D') => (10, &digits[1..]),
        Some('h' | 'H' | 'x' | 'X') => (16, &digits[1..]),
        Some(c) if c.is_ascii_digit() => (10, digits.as_str()),
        Some(c) => {
            return Err(NetlistError::malformed(text, format!("unknown base `{c}`")));
        }
        None => return Err(NetlistError::malformed(text, "missing digits")),
    };
    if body.is_empty() {
        return Err(NetlistError::malformed(text, "no digits after base"));
    }
    if !body.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(NetlistError::malformed(text, "digits must be alphanumeric"));
    }
    let value = BigUint::parse_bytes(body.as_bytes(), radix)
        .ok_or_else(|| NetlistError::malformed(text, format!("invalid base-{radix} digits")))?;
    Ok((bitwidth, value))
}

fn validate(label: &str, bitwidth: i64, value: &BigInt) -> NetlistResult<ParsedConst> {
    if bitwidth < 0 {
        return Err(NetlistError::NegativeWidth {
            literal: label.to_string(),
            bitwidth,
        });
    }
    let width = u32::try_from(bitwidth)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| NetlistError::InvalidBitwidth {
            name: label.to_string(),
            bitwidth,
        })?;
    if value.sign() == Sign::Minus {
        return Err(NetlistError::NegativeConst {
            value: value.to_string(),
        });
    }
    let magnitude = value.magnitude();
    if magnitude.bits() > u64::from(width) {
        return Err(NetlistError::ConstOverflow {
            value: magnitude.to_string(),
            bitwidth: width,
        });
    }
    Ok(ParsedConst {
        bitwidth: width,
        value: magnitude.clone(),
    })
}
