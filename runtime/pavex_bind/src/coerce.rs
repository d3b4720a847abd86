//! Turn a single string token into a scalar value.
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use crate::reflect::{Bind, Kind, Shape};
use crate::unmarshal::{UnmarshalError, try_unmarshal};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`coerce`] when the input can't be converted into the target type.
///
/// Parsing errors are reported as they are, without additional context.
pub enum CoercionError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error(transparent)]
    Bool(#[from] ParseBoolError),
    #[error(transparent)]
    Unmarshal(#[from] UnmarshalError),
    #[error("`{value}` is out of range for `{kind}`")]
    /// The input is a well-formed number, but it can't be represented by the target type.
    OutOfRange {
        /// The rejected input.
        value: String,
        /// The kind of the value we tried to populate.
        kind: Kind,
    },
    #[error("unknown type: `{kind}` can't be populated from a single value")]
    UnknownType {
        /// The kind of the value we tried to populate.
        kind: Kind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid boolean")]
#[non_exhaustive]
/// The input is not one of the recognised boolean tokens.
pub struct ParseBoolError {
    /// The rejected input.
    pub value: String,
}

/// Populate `value` from `text`.
///
/// Custom unmarshaling capabilities are honoured first.
/// Otherwise `text` is parsed according to the kind of `value`:
///
/// - integers and floats are parsed in base 10, at the width of the target type;
/// - booleans accept `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`, `F`, `FALSE`,
///   `false`, `False`;
/// - strings are assigned as they are;
/// - pointers are initialized, if needed, and their pointee is populated.
///
/// An empty `text` is interpreted as the zero value for numbers and booleans.
pub fn coerce(value: &mut dyn Bind, text: &str) -> Result<(), CoercionError> {
    if try_unmarshal(value, text)? {
        return Ok(());
    }
    match value.shape() {
        Shape::Pointer(pointer) => return coerce(pointer.ensure_init(), text),
        Shape::I8(v) => *v = parse_number(text, "0")?,
        Shape::I16(v) => *v = parse_number(text, "0")?,
        Shape::I32(v) => *v = parse_number(text, "0")?,
        Shape::I64(v) => *v = parse_number(text, "0")?,
        Shape::Isize(v) => *v = parse_number(text, "0")?,
        Shape::U8(v) => *v = parse_unsigned(text)?,
        Shape::U16(v) => *v = parse_unsigned(text)?,
        Shape::U32(v) => *v = parse_unsigned(text)?,
        Shape::U64(v) => *v = parse_unsigned(text)?,
        Shape::Usize(v) => *v = parse_unsigned(text)?,
        Shape::F32(v) => *v = parse_float(text, f32::is_finite, Kind::F32)?,
        Shape::F64(v) => *v = parse_float(text, f64::is_finite, Kind::F64)?,
        Shape::Bool(v) => *v = parse_bool(text)?,
        Shape::String(v) => text.clone_into(v),
        shape => return Err(CoercionError::UnknownType { kind: shape.kind() }),
    }
    Ok(())
}

fn parse_number<T: FromStr>(text: &str, zero: &str) -> Result<T, T::Err> {
    if text.is_empty() {
        zero.parse()
    } else {
        text.parse()
    }
}

/// Unsigned integers never carry a sign, not even `+`.
fn parse_unsigned<T>(text: &str) -> Result<T, ParseIntError>
where
    T: FromStr<Err = ParseIntError>,
{
    if text.starts_with('+') {
        // A lone sign is reported as an invalid digit.
        return "+".parse();
    }
    parse_number(text, "0")
}

/// Parse a float, rejecting values that overflow to infinity.
///
/// `inf`, `infinity` and `nan` are still accepted when spelled out.
fn parse_float<T>(text: &str, is_finite: fn(T) -> bool, kind: Kind) -> Result<T, CoercionError>
where
    T: FromStr<Err = ParseFloatError> + Copy,
{
    let value: T = parse_number(text, "0.0")?;
    if !is_finite(value) && !spells_non_finite(text) {
        return Err(CoercionError::OutOfRange {
            value: text.to_owned(),
            kind,
        });
    }
    Ok(value)
}

fn spells_non_finite(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|token| unsigned.eq_ignore_ascii_case(token))
}

fn parse_bool(text: &str) -> Result<bool, ParseBoolError> {
    match text {
        "" | "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        _ => Err(ParseBoolError {
            value: text.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_zero_values() {
        let mut int = 5i32;
        coerce(&mut int, "").unwrap();
        assert_eq!(int, 0);

        let mut uint = 5u64;
        coerce(&mut uint, "").unwrap();
        assert_eq!(uint, 0);

        let mut flag = true;
        coerce(&mut flag, "").unwrap();
        assert!(!flag);

        let mut float = 1.5f64;
        coerce(&mut float, "").unwrap();
        assert_eq!(float, 0.0);
    }

    #[test]
    fn integers_are_parsed_at_their_width() {
        let mut small = 0i8;
        coerce(&mut small, "-128").unwrap();
        assert_eq!(small, -128);

        let err = coerce(&mut small, "128").unwrap_err();
        insta::assert_snapshot!(err, @"number too large to fit in target type");
        assert!(matches!(err, CoercionError::Int(_)));
        // A failed parse leaves the previous value in place.
        assert_eq!(small, -128);

        let mut unsigned = 0u16;
        let err = coerce(&mut unsigned, "-1").unwrap_err();
        insta::assert_snapshot!(err, @"invalid digit found in string");
    }

    #[test]
    fn floats_are_parsed() {
        let mut single = 0f32;
        coerce(&mut single, "0.25").unwrap();
        assert_eq!(single, 0.25);

        let err = coerce(&mut single, "one").unwrap_err();
        insta::assert_snapshot!(err, @"invalid float literal");
    }

    #[test]
    fn floats_that_overflow_their_width_are_rejected() {
        let mut single = 1f32;
        let err = coerce(&mut single, "1e39").unwrap_err();
        insta::assert_snapshot!(err, @"`1e39` is out of range for `f32`");
        assert_eq!(single, 1.0);

        let mut double = 1f64;
        let err = coerce(&mut double, "1e400").unwrap_err();
        insta::assert_snapshot!(err, @"`1e400` is out of range for `f64`");

        // Fits in a `f64`, but not in a `f32`.
        coerce(&mut double, "1e39").unwrap();
        assert_eq!(double, 1e39);
    }

    #[test]
    fn non_finite_floats_can_be_spelled_out() {
        let mut double = 0f64;
        coerce(&mut double, "-Inf").unwrap();
        assert_eq!(double, f64::NEG_INFINITY);
        coerce(&mut double, "infinity").unwrap();
        assert_eq!(double, f64::INFINITY);
        coerce(&mut double, "NaN").unwrap();
        assert!(double.is_nan());
    }

    #[test]
    fn unsigned_integers_reject_a_leading_plus() {
        let mut unsigned = 1u32;
        let err = coerce(&mut unsigned, "+5").unwrap_err();
        insta::assert_snapshot!(err, @"invalid digit found in string");
        assert!(matches!(err, CoercionError::Int(_)));
        assert_eq!(unsigned, 1);

        // Signed integers still accept it.
        let mut signed = 0i32;
        coerce(&mut signed, "+5").unwrap();
        assert_eq!(signed, 5);
    }

    #[test]
    fn booleans_accept_the_usual_tokens() {
        for token in ["1", "t", "T", "TRUE", "true", "True"] {
            let mut flag = false;
            coerce(&mut flag, token).unwrap();
            assert!(flag, "`{token}` should be true");
        }
        for token in ["0", "f", "F", "FALSE", "false", "False"] {
            let mut flag = true;
            coerce(&mut flag, token).unwrap();
            assert!(!flag, "`{token}` should be false");
        }

        let mut flag = false;
        let err = coerce(&mut flag, "yes").unwrap_err();
        insta::assert_snapshot!(err, @"`yes` is not a valid boolean");
    }

    #[test]
    fn strings_are_assigned_verbatim() {
        let mut name = "old".to_string();
        coerce(&mut name, " new value ").unwrap();
        assert_eq!(name, " new value ");
    }

    #[test]
    fn pointers_are_followed() {
        let mut n: Option<Box<u8>> = None;
        coerce(&mut n, "7").unwrap();
        assert_eq!(n, Some(Box::new(7)));
    }

    #[test]
    fn sequences_cant_be_populated_from_a_single_value() {
        let mut ids: Vec<u32> = vec![];
        let err = coerce(&mut ids, "1").unwrap_err();
        insta::assert_snapshot!(err, @"unknown type: `sequence` can't be populated from a single value");
    }
}
