//! String-to-value coercion for single tokens.

use std::str::FromStr;

use crate::error::{ConversionError, ShapeError};
use crate::param::{ParamKind, Value};

/// Why a token could not be bound to its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// The token is malformed for the slot's kind. Recoverable per argument.
    Conversion(ConversionError),
    /// The slot's kind cannot take a single token at all.
    Structural(ShapeError),
}

/// Converts one token according to `kind`.
///
/// Only one-token kinds are accepted; caller, `RestOfArgs` and unsupported
/// kinds yield [`CoerceError::Structural`].
pub fn coerce_token(kind: &ParamKind, token: &str) -> Result<Value, CoerceError> {
    let value = match kind {
        ParamKind::Int => Value::Int(parse_number(token)?),
        ParamKind::Long => Value::Long(parse_number(token)?),
        ParamKind::Float => Value::Float(parse_number(token)?),
        ParamKind::Double => Value::Double(parse_number(token)?),
        ParamKind::Byte => Value::Byte(parse_number(token)?),
        ParamKind::Short => Value::Short(parse_number(token)?),
        ParamKind::Bool => Value::Bool(parse_bool(token).map_err(CoerceError::Conversion)?),
        ParamKind::Char => Value::Char(parse_char(token).map_err(CoerceError::Conversion)?),
        ParamKind::String => Value::String(token.to_string()),
        other => {
            return Err(CoerceError::Structural(ShapeError(format!(
                "{} cannot be bound from a single token",
                other
            ))))
        }
    };
    Ok(value)
}

fn parse_number<T>(token: &str) -> Result<T, CoerceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    token
        .parse::<T>()
        .map_err(|e| CoerceError::Conversion(ConversionError::new(e.to_string())))
}

/// Parses `true` or `false` (any case). Everything else is rejected.
pub fn parse_bool(token: &str) -> Result<bool, ConversionError> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConversionError::new(format!(
            "{} must be \"true\" or \"false\"",
            token
        )))
    }
}

/// Accepts a token holding exactly one character.
pub fn parse_char(token: &str) -> Result<char, ConversionError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConversionError::new(format!(
            "{} must be a single character.",
            token
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn conversion_failed(kind: ParamKind, token: &str) -> bool {
        matches!(coerce_token(&kind, token), Err(CoerceError::Conversion(_)))
    }

    #[test]
    fn test_integers() {
        assert_eq!(coerce_token(&ParamKind::Int, "100"), Ok(Value::Int(100)));
        assert_eq!(coerce_token(&ParamKind::Int, "-3"), Ok(Value::Int(-3)));
        assert_eq!(coerce_token(&ParamKind::Int, "+3"), Ok(Value::Int(3)));
        assert_eq!(
            coerce_token(&ParamKind::Long, "9000000000"),
            Ok(Value::Long(9_000_000_000))
        );
        assert_eq!(coerce_token(&ParamKind::Short, "-32768"), Ok(Value::Short(-32768)));
        assert_eq!(coerce_token(&ParamKind::Byte, "127"), Ok(Value::Byte(127)));
    }

    #[test]
    fn test_integer_failures() {
        assert!(conversion_failed(ParamKind::Int, "notanumber"));
        assert!(conversion_failed(ParamKind::Int, "1.5"));
        assert!(conversion_failed(ParamKind::Int, ""));
        assert!(conversion_failed(ParamKind::Int, "9000000000"));
        assert!(conversion_failed(ParamKind::Byte, "128"));
        assert!(conversion_failed(ParamKind::Short, "40000"));
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce_token(&ParamKind::Float, "10.25"), Ok(Value::Float(10.25)));
        assert_eq!(coerce_token(&ParamKind::Double, "-0.5"), Ok(Value::Double(-0.5)));
        assert_eq!(coerce_token(&ParamKind::Double, "3"), Ok(Value::Double(3.0)));
        assert!(conversion_failed(ParamKind::Float, "ten"));
    }

    #[test]
    fn test_bool_is_strict() {
        assert_eq!(coerce_token(&ParamKind::Bool, "true"), Ok(Value::Bool(true)));
        assert_eq!(coerce_token(&ParamKind::Bool, "FALSE"), Ok(Value::Bool(false)));
        assert_eq!(coerce_token(&ParamKind::Bool, "True"), Ok(Value::Bool(true)));
        assert!(conversion_failed(ParamKind::Bool, "yes"));
        assert!(conversion_failed(ParamKind::Bool, "1"));
        assert!(conversion_failed(ParamKind::Bool, ""));
    }

    #[test]
    fn test_bool_message() {
        let err = parse_bool("maybe").unwrap_err();
        assert_eq!(err.reason, "maybe must be \"true\" or \"false\"");
    }

    #[test]
    fn test_char() {
        assert_eq!(coerce_token(&ParamKind::Char, "x"), Ok(Value::Char('x')));
        assert_eq!(coerce_token(&ParamKind::Char, "é"), Ok(Value::Char('é')));
        assert!(conversion_failed(ParamKind::Char, "xy"));
        assert!(conversion_failed(ParamKind::Char, ""));
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(
            coerce_token(&ParamKind::String, "muh str"),
            Ok(Value::String("muh str".into()))
        );
    }

    #[test]
    fn test_structural_kinds() {
        for kind in [
            ParamKind::Caller,
            ParamKind::PlayerCaller,
            ParamKind::RestOfArgs,
            ParamKind::Unsupported("BigInteger".into()),
        ] {
            assert!(
                matches!(coerce_token(&kind, "x"), Err(CoerceError::Structural(_))),
                "{:?} should be structural",
                kind
            );
        }
    }

    proptest! {
        #[test]
        fn prop_int_roundtrips(n in any::<i32>()) {
            prop_assert_eq!(coerce_token(&ParamKind::Int, &n.to_string()), Ok(Value::Int(n)));
        }

        #[test]
        fn prop_string_never_fails(s in ".*") {
            prop_assert_eq!(coerce_token(&ParamKind::String, &s), Ok(Value::String(s.clone())));
        }

        #[test]
        fn prop_bool_rejects_other_words(s in "[a-z]{1,8}") {
            prop_assume!(s != "true" && s != "false");
            prop_assert!(parse_bool(&s).is_err());
        }
    }
}
