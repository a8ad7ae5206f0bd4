//! Interface descriptions for remote actors
//!
//! An [`InterfaceDescription`] lists the methods a canister exposes, the
//! types of their arguments and results, and whether each one is a query
//! or an update. Values travel as JSON (see [`IdlType::accepts`] for the
//! mapping), so type checking is done against `serde_json::Value`.

use std::{collections::BTreeMap, fmt};

use serde_json::Value;

use super::error::{AgentError, IdlParseError};

/// A Candid-style value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdlType {
    Text,
    Bool,
    Nat,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Principal,
    Null,
    Reserved,
    Opt(Box<IdlType>),
    Vec(Box<IdlType>),
}

impl IdlType {
    /// Check whether a JSON value is a valid encoding of this type
    ///
    /// `text` and `principal` are strings, `bool` is a boolean, bounded
    /// integers are JSON numbers within range, `nat`, `int`, `nat64` and
    /// `int64` also accept decimal strings, `opt T` is `null` or a `T`,
    /// `vec T` is an array of `T`, and `reserved` accepts anything.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            IdlType::Text | IdlType::Principal => value.is_string(),
            IdlType::Bool => value.is_boolean(),
            IdlType::Null => value.is_null(),
            IdlType::Reserved => true,
            IdlType::Nat8 => fits_unsigned(value, u8::MAX as u64),
            IdlType::Nat16 => fits_unsigned(value, u16::MAX as u64),
            IdlType::Nat32 => fits_unsigned(value, u32::MAX as u64),
            IdlType::Int8 => fits_signed(value, i8::MIN as i64, i8::MAX as i64),
            IdlType::Int16 => fits_signed(value, i16::MIN as i64, i16::MAX as i64),
            IdlType::Int32 => fits_signed(value, i32::MIN as i64, i32::MAX as i64),
            IdlType::Nat | IdlType::Nat64 => {
                value.as_u64().is_some() || is_decimal(value, false)
            }
            IdlType::Int | IdlType::Int64 => value.as_i64().is_some() || is_decimal(value, true),
            IdlType::Opt(inner) => value.is_null() || inner.accepts(value),
            IdlType::Vec(inner) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| inner.accepts(item))),
        }
    }
}

fn fits_unsigned(value: &Value, max: u64) -> bool {
    value.as_u64().is_some_and(|n| n <= max)
}

fn fits_signed(value: &Value, min: i64, max: i64) -> bool {
    value.as_i64().is_some_and(|n| n >= min && n <= max)
}

fn is_decimal(value: &Value, signed: bool) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    let digits = match text.strip_prefix('-') {
        Some(rest) if signed => rest,
        Some(_) => return false,
        None => text,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdlType::Opt(inner) => return write!(f, "opt {}", inner),
            IdlType::Vec(inner) => return write!(f, "vec {}", inner),
            IdlType::Text => "text",
            IdlType::Bool => "bool",
            IdlType::Nat => "nat",
            IdlType::Nat8 => "nat8",
            IdlType::Nat16 => "nat16",
            IdlType::Nat32 => "nat32",
            IdlType::Nat64 => "nat64",
            IdlType::Int => "int",
            IdlType::Int8 => "int8",
            IdlType::Int16 => "int16",
            IdlType::Int32 => "int32",
            IdlType::Int64 => "int64",
            IdlType::Principal => "principal",
            IdlType::Null => "null",
            IdlType::Reserved => "reserved",
        };
        f.write_str(name)
    }
}

/// How a method is executed by the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallMode {
    /// Read-only call answered by a single replica
    Query,

    /// State-changing call that goes through consensus
    #[default]
    Update,
}

/// Signature of one remote method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Argument types, in order
    pub args: Vec<IdlType>,

    /// Result types, in order
    pub returns: Vec<IdlType>,

    /// Query or update
    pub mode: CallMode,
}

impl MethodSignature {
    /// Create a new method signature
    pub fn new(args: Vec<IdlType>, returns: Vec<IdlType>, mode: CallMode) -> Self {
        Self {
            args,
            returns,
            mode,
        }
    }
}

/// The set of methods a canister exposes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceDescription {
    methods: BTreeMap<String, MethodSignature>,
}

impl InterfaceDescription {
    /// Create an empty interface description
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a method to the interface
    pub fn with_method(mut self, name: impl Into<String>, signature: MethodSignature) -> Self {
        self.methods.insert(name.into(), signature);
        self
    }

    /// Parse a Candid service description such as
    /// `service : { greet : (text) -> (text) query }`
    pub fn parse(source: &str) -> Result<Self, IdlParseError> {
        super::did::parse_service(source)
    }

    /// Look up a method by name
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.get(name)
    }

    /// Iterate over method names in sorted order
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Check a call against the interface and return the method signature
    pub fn check_call(&self, method: &str, args: &[Value]) -> Result<&MethodSignature, AgentError> {
        let signature = self.method(method).ok_or_else(|| {
            AgentError::Interface(format!("method {:?} is not part of the interface", method))
        })?;

        check_values("argument", method, &signature.args, args)?;
        Ok(signature)
    }

    /// Check reply values against the declared result types
    pub fn check_reply(&self, method: &str, values: &[Value]) -> Result<(), AgentError> {
        let signature = self.method(method).ok_or_else(|| {
            AgentError::Interface(format!("method {:?} is not part of the interface", method))
        })?;

        check_values("result", method, &signature.returns, values)
    }
}

fn check_values(
    what: &str,
    method: &str,
    types: &[IdlType],
    values: &[Value],
) -> Result<(), AgentError> {
    if types.len() != values.len() {
        return Err(AgentError::Interface(format!(
            "{} expects {} {}(s), got {}",
            method,
            types.len(),
            what,
            values.len()
        )));
    }

    for (idx, (ty, value)) in types.iter().zip(values).enumerate() {
        if !ty.accepts(value) {
            return Err(AgentError::Interface(format!(
                "{} {} #{} is not a valid {}",
                method, what, idx, ty
            )));
        }
    }

    Ok(())
}

/// Interface of the `communitea` canister
pub fn communitea_interface() -> InterfaceDescription {
    InterfaceDescription::new().with_method(
        "greet",
        MethodSignature::new(vec![IdlType::Text], vec![IdlType::Text], CallMode::Query),
    )
}
