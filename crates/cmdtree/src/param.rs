//! Parameter slots, signatures and coerced values.
//!
//! A [`Signature`] is the ordered list of slots a handler declares. Each slot
//! has a [`ParamKind`] that decides how one string token is turned into a
//! [`Value`]. The bound values reach the handler as [`Args`].
//!
//! # Slot Rules
//!
//! | Kind | Position | Consumes |
//! |------|----------|----------|
//! | `Caller`, `PlayerCaller`, `ConsoleCaller` | first only | nothing (bound to the caller) |
//! | `Int`, `Long`, `Float`, `Double`, `Byte`, `Short` | any | one token |
//! | `Bool`, `Char`, `String` | any | one token |
//! | `RestOfArgs` | last only | every remaining token |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ShapeError;

/// The kind of a single parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// Any caller.
    Caller,
    /// A caller that must be a player.
    PlayerCaller,
    /// A caller that must be the console.
    ConsoleCaller,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// `true` or `false`, case-insensitive.
    Bool,
    /// A single character.
    Char,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// The raw token.
    String,
    /// Every remaining token.
    RestOfArgs,
    /// A type the coercer has no conversion for, carrying its declared name.
    Unsupported(String),
}

impl ParamKind {
    /// Returns true for the three caller kinds.
    pub fn is_caller(&self) -> bool {
        matches!(
            self,
            ParamKind::Caller | ParamKind::PlayerCaller | ParamKind::ConsoleCaller
        )
    }

    /// Returns true if this slot consumes exactly one token.
    pub fn is_scalar(&self) -> bool {
        !self.is_caller() && !matches!(self, ParamKind::RestOfArgs | ParamKind::Unsupported(_))
    }

    /// The name shown in usage and conversion messages.
    pub fn type_name(&self) -> &str {
        match self {
            ParamKind::Caller => "Caller",
            ParamKind::PlayerCaller => "Player",
            ParamKind::ConsoleCaller => "Console",
            ParamKind::Int => "Int",
            ParamKind::Long => "Long",
            ParamKind::Float => "Float",
            ParamKind::Double => "Double",
            ParamKind::Bool => "Bool",
            ParamKind::Char => "Char",
            ParamKind::Byte => "Byte",
            ParamKind::Short => "Short",
            ParamKind::String => "String",
            ParamKind::RestOfArgs => "String...",
            ParamKind::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A named parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub kind: ParamKind,
    pub name: String,
}

impl Param {
    pub fn new(kind: ParamKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// The ordered parameter list of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Creates an empty signature (a command that takes no arguments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a signature from kinds alone, naming value slots `arg1`, `arg2`, ...
    ///
    /// Caller slots are named `caller` and a trailing rest slot `args`.
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ParamKind>,
    {
        let mut n = 0;
        let params = kinds
            .into_iter()
            .map(|kind| {
                let name = if kind.is_caller() {
                    "caller".to_string()
                } else if kind == ParamKind::RestOfArgs {
                    "args".to_string()
                } else {
                    n += 1;
                    format!("arg{}", n)
                };
                Param::new(kind, name)
            })
            .collect();
        Self { params }
    }

    /// Appends a slot.
    pub fn push(&mut self, param: Param) {
        self.params.push(param);
    }

    /// All slots in declared order, including a caller slot.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The leading caller slot's kind, if the signature has one.
    pub fn caller_slot(&self) -> Option<&ParamKind> {
        self.params
            .first()
            .map(|p| &p.kind)
            .filter(|kind| kind.is_caller())
    }

    /// Slots that receive values from the argument tokens.
    pub fn value_params(&self) -> &[Param] {
        match self.caller_slot() {
            Some(_) => &self.params[1..],
            None => &self.params,
        }
    }

    /// The number of required arguments when the command doesn't say:
    /// every slot that is neither a caller nor `RestOfArgs`.
    pub fn default_required_args(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.kind.is_caller() && p.kind != ParamKind::RestOfArgs)
            .count()
    }

    /// Checks the slot-ordering rules.
    ///
    /// A caller slot may only be first, `RestOfArgs` may only be last, and
    /// [`ParamKind::Unsupported`] is never accepted.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            match &param.kind {
                kind if kind.is_caller() && i != 0 => {
                    return Err(ShapeError(format!(
                        "caller parameter '{}' must be first in the parameter list",
                        param.name
                    )));
                }
                ParamKind::RestOfArgs if i != last => {
                    return Err(ShapeError(format!(
                        "rest parameter '{}' must be the last parameter",
                        param.name
                    )));
                }
                ParamKind::Unsupported(name) => {
                    return Err(ShapeError(format!(
                        "cannot convert parameter '{}' to unsupported type \"{}\"",
                        param.name, name
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Composes `Usage: /<path> <name:Kind> ...`, omitting the caller slot.
    pub fn usage(&self, prefix: &str, path: &str) -> String {
        let args: String = self
            .value_params()
            .iter()
            .map(|p| format!(" <{}:{}>", p.name, p.kind))
            .collect();
        format!("Usage: {}{}{}", prefix, path, args)
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    String(String),
    /// The tokens bound to a `RestOfArgs` slot.
    Rest(Vec<String>),
}

impl Value {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Value::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Value::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_rest(&self) -> Option<&[String]> {
        match self {
            Value::Rest(v) => Some(v),
            _ => None,
        }
    }
}

/// Values bound to a command's value slots, in declared order.
///
/// Index `0` is the first slot after the caller slot (if any). A slot is
/// unbound when its token was missing or failed conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Option<Value>>,
}

impl Args {
    pub fn new(values: Vec<Option<Value>>) -> Self {
        Self { values }
    }

    /// The number of value slots, bound or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, or `None` if unbound or out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Returns true if the slot at `index` holds a value.
    pub fn is_bound(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn int(&self, index: usize) -> Option<i32> {
        self.get(index).and_then(Value::as_int)
    }

    pub fn long(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(Value::as_long)
    }

    pub fn float(&self, index: usize) -> Option<f32> {
        self.get(index).and_then(Value::as_float)
    }

    pub fn double(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(Value::as_double)
    }

    pub fn bool(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(Value::as_bool)
    }

    pub fn char(&self, index: usize) -> Option<char> {
        self.get(index).and_then(Value::as_char)
    }

    pub fn byte(&self, index: usize) -> Option<i8> {
        self.get(index).and_then(Value::as_byte)
    }

    pub fn short(&self, index: usize) -> Option<i16> {
        self.get(index).and_then(Value::as_short)
    }

    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_str)
    }

    /// The trailing `RestOfArgs` tokens, or an empty slice if the command has none.
    pub fn rest(&self) -> &[String] {
        self.values
            .last()
            .and_then(Option::as_ref)
            .and_then(Value::as_rest)
            .unwrap_or(&[])
    }

    /// Iterates over every slot in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Value>> {
        self.values.iter().map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kinds_names_slots() {
        let sig = Signature::from_kinds([
            ParamKind::Caller,
            ParamKind::Int,
            ParamKind::String,
            ParamKind::RestOfArgs,
        ]);
        let names: Vec<_> = sig.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["caller", "arg1", "arg2", "args"]);
    }

    #[test]
    fn test_default_required_args_skips_caller_and_rest() {
        let sig = Signature::from_kinds([
            ParamKind::PlayerCaller,
            ParamKind::Int,
            ParamKind::Int,
            ParamKind::RestOfArgs,
        ]);
        assert_eq!(sig.default_required_args(), 2);

        assert_eq!(Signature::new().default_required_args(), 0);
    }

    #[test]
    fn test_value_params_excludes_caller() {
        let sig = Signature::from_kinds([ParamKind::Caller, ParamKind::Bool]);
        assert_eq!(sig.caller_slot(), Some(&ParamKind::Caller));
        assert_eq!(sig.value_params().len(), 1);
        assert_eq!(sig.value_params()[0].kind, ParamKind::Bool);

        let sig = Signature::from_kinds([ParamKind::Bool]);
        assert!(sig.caller_slot().is_none());
        assert_eq!(sig.value_params().len(), 1);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(Signature::new().validate().is_ok());
        assert!(Signature::from_kinds([ParamKind::RestOfArgs]).validate().is_ok());
        assert!(Signature::from_kinds([
            ParamKind::ConsoleCaller,
            ParamKind::Char,
            ParamKind::Short,
            ParamKind::RestOfArgs,
        ])
        .validate()
        .is_ok());
    }

    #[test]
    fn test_validate_rest_not_last() {
        let sig = Signature::from_kinds([
            ParamKind::RestOfArgs,
            ParamKind::String,
            ParamKind::Float,
        ]);
        let err = sig.validate().unwrap_err();
        assert!(err.0.contains("must be the last parameter"));
    }

    #[test]
    fn test_validate_caller_not_first() {
        let sig = Signature::from_kinds([ParamKind::String, ParamKind::Float, ParamKind::Caller]);
        let err = sig.validate().unwrap_err();
        assert!(err.0.contains("must be first"));
    }

    #[test]
    fn test_validate_two_rest_slots() {
        let sig = Signature::from_kinds([ParamKind::RestOfArgs, ParamKind::RestOfArgs]);
        assert!(sig.validate().is_err());
    }

    #[test]
    fn test_validate_unsupported_type() {
        let sig = Signature::from_kinds([
            ParamKind::Unsupported("BigInteger".into()),
            ParamKind::String,
        ]);
        let err = sig.validate().unwrap_err();
        assert!(err.0.contains("BigInteger"));
    }

    #[test]
    fn test_usage_omits_caller() {
        let sig: Signature = [
            Param::new(ParamKind::Caller, "sender"),
            Param::new(ParamKind::String, "name"),
            Param::new(ParamKind::RestOfArgs, "message"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            sig.usage("/", "mail send"),
            "Usage: /mail send <name:String> <message:String...>"
        );
    }

    #[test]
    fn test_args_accessors() {
        let args = Args::new(vec![
            Some(Value::Int(7)),
            None,
            Some(Value::String("hi".into())),
            Some(Value::Rest(vec!["a".into(), "b".into()])),
        ]);
        assert_eq!(args.len(), 4);
        assert_eq!(args.int(0), Some(7));
        assert!(!args.is_bound(1));
        assert_eq!(args.str(2), Some("hi"));
        assert_eq!(args.int(2), None);
        assert_eq!(args.rest().to_vec(), vec!["a", "b"]);
        assert_eq!(args.get(10), None);
    }

    #[test]
    fn test_args_rest_absent() {
        let args = Args::new(vec![Some(Value::Bool(true))]);
        assert!(args.rest().is_empty());
        assert_eq!(args.bool(0), Some(true));
    }

    #[test]
    fn test_param_kind_display() {
        assert_eq!(ParamKind::Int.to_string(), "Int");
        assert_eq!(ParamKind::RestOfArgs.to_string(), "String...");
        assert_eq!(ParamKind::Unsupported("BigInteger".into()).to_string(), "BigInteger");
    }
}
