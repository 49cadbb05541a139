//! Concrete runtime value graph
//!
//! This module defines the [`Value`] enum, the default model for inspected
//! values. Values are tagged and type-safe; reference-counted handles let one
//! value appear in several places of the graph without ownership cycles (the
//! traversal never mutates values and never follows parent links).
//!
//! # Value Types
//!
//! - Scalars: [`Value::Int`], [`Value::Float`], [`Value::Bool`],
//!   [`Value::Str`], [`Value::None`] — traversal leaves
//! - Containers: [`Value::List`], [`Value::Tuple`], [`Value::Set`],
//!   [`Value::Dict`]
//! - [`Value::Object`]: named members, optional custom summary
//! - [`Value::Routine`]: callable stand-in
//! - [`Value::NumArray`] / [`Value::NumScalar`]: numeric-library stand-ins
//! - [`Value::EvalError`]: sentinel for a failed watch evaluation, rendered
//!   as `<error>`
//!
//! Hostile introspection (probes that fail) is modeled through
//! [`MemberSlot::Error`] and [`CustomSummary::Fails`], or by implementing
//! [`Reflect`] directly on a test double.

use super::{Key, Reflect, ReflectError};
use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

/// Runtime values in the inspected program
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    None,
    List(Vec<Rc<Value>>),
    Tuple(Vec<Rc<Value>>),
    Set(Vec<Rc<Value>>),
    Dict(Vec<(Key, Rc<Value>)>),
    Object(ObjectValue),
    Routine(String),
    NumArray { dtype: String, shape: Vec<usize> },
    NumScalar { text: String, dtype: String },
    EvalError,
}

/// A member slot of an [`ObjectValue`]: either a value or a stored failure
/// that fires when the member is resolved
#[derive(Debug, Clone, PartialEq)]
pub enum MemberSlot {
    Value(Rc<Value>),
    Error(String),
}

/// Outcome of the "safe custom stringify" capability
#[derive(Debug, Clone, PartialEq)]
pub enum CustomSummary {
    Text(String),
    Fails(String),
}

/// An object with reflectable named members
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    pub type_name: String,
    pub members: FxHashMap<String, MemberSlot>,
    pub summary: Option<CustomSummary>,
}

impl ObjectValue {
    pub fn new(type_name: &str) -> Self {
        ObjectValue {
            type_name: type_name.to_string(),
            members: FxHashMap::default(),
            summary: None,
        }
    }

    pub fn member(mut self, name: &str, value: Value) -> Self {
        self.members
            .insert(name.to_string(), MemberSlot::Value(Rc::new(value)));
        self
    }

    pub fn failing_member(mut self, name: &str, message: &str) -> Self {
        self.members
            .insert(name.to_string(), MemberSlot::Error(message.to_string()));
        self
    }

    pub fn summary(mut self, summary: CustomSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}

impl Value {
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(items.into_iter().map(Rc::new).collect())
    }

    pub fn tuple(items: Vec<Value>) -> Value {
        Value::Tuple(items.into_iter().map(Rc::new).collect())
    }

    pub fn set(items: Vec<Value>) -> Value {
        Value::Set(items.into_iter().map(Rc::new).collect())
    }

    pub fn dict(entries: Vec<(Key, Value)>) -> Value {
        Value::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k, Rc::new(v)))
                .collect(),
        )
    }

    pub fn str(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    /// Wrap into the shared handle the [`Reflect`] seam trades in
    pub fn rc(self) -> Rc<Value> {
        Rc::new(self)
    }

    fn items(&self) -> Option<&[Rc<Value>]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

fn format_shape(shape: &[usize]) -> String {
    match shape {
        [only] => format!("({},)", only),
        _ => format!(
            "({})",
            shape
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

impl fmt::Display for Value {
    /// Canonical detailed representation (the repr-like text)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(items: &[Rc<Value>]) -> String {
            items
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }

        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::None => write!(f, "None"),
            Value::List(items) => write!(f, "[{}]", join(items)),
            Value::Tuple(items) => match items.as_slice() {
                [only] => write!(f, "({},)", only),
                _ => write!(f, "({})", join(items)),
            },
            Value::Set(items) => {
                if items.is_empty() {
                    write!(f, "set()")
                } else {
                    write!(f, "{{{}}}", join(items))
                }
            }
            Value::Dict(entries) => {
                let body = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.repr(), v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", body)
            }
            Value::Object(obj) => write!(f, "<{} object>", obj.type_name),
            Value::Routine(name) => write!(f, "<function {}>", name),
            Value::NumArray { dtype, shape } => {
                write!(f, "ndarray({}) {}", dtype, format_shape(shape))
            }
            Value::NumScalar { text, .. } => write!(f, "{}", text),
            Value::EvalError => write!(f, "<error>"),
        }
    }
}

impl Reflect for Value {
    fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::None => "NoneType".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Tuple(_) => "tuple".to_string(),
            Value::Set(_) => "set".to_string(),
            Value::Dict(_) => "dict".to_string(),
            Value::Object(obj) => obj.type_name.clone(),
            Value::Routine(_) => "function".to_string(),
            Value::NumArray { .. } => "ndarray".to_string(),
            Value::NumScalar { dtype, .. } => dtype.clone(),
            Value::EvalError => "EvalError".to_string(),
        }
    }

    fn leaf_repr(&self) -> Option<String> {
        match self {
            Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Str(_) | Value::None => {
                Some(self.to_string())
            }
            _ => None,
        }
    }

    fn repr_text(&self) -> Result<String, ReflectError> {
        Ok(self.to_string())
    }

    fn display_text(&self) -> Result<String, ReflectError> {
        match self {
            Value::Str(s) => Ok(s.clone()),
            _ => Ok(self.to_string()),
        }
    }

    fn str_safe(&self) -> bool {
        matches!(self, Value::Routine(_) | Value::EvalError)
    }

    fn custom_summary(&self) -> Option<Result<String, ReflectError>> {
        match self {
            Value::Object(ObjectValue {
                summary: Some(summary),
                ..
            }) => Some(match summary {
                CustomSummary::Text(text) => Ok(text.clone()),
                CustomSummary::Fails(msg) => Err(ReflectError::Failed(msg.clone())),
            }),
            _ => None,
        }
    }

    fn is_builtin_container(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Dict(_)
        )
    }

    fn length(&self) -> Result<usize, ReflectError> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Ok(items.len()),
            Value::Dict(entries) => Ok(entries.len()),
            _ => Err(ReflectError::Unsupported),
        }
    }

    fn keys(&self) -> Result<Vec<Key>, ReflectError> {
        match self {
            Value::Dict(entries) => Ok(entries.iter().map(|(k, _)| k.clone()).collect()),
            _ => Err(ReflectError::Unsupported),
        }
    }

    fn index(&self, key: &Key) -> Result<Rc<dyn Reflect>, ReflectError> {
        match self {
            Value::List(items) | Value::Tuple(items) => match key {
                Key::Int(i) if *i >= 0 => items
                    .get(*i as usize)
                    .cloned()
                    .map(|v| v as Rc<dyn Reflect>)
                    .ok_or(ReflectError::Unsupported),
                _ => Err(ReflectError::Unsupported),
            },
            Value::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone() as Rc<dyn Reflect>)
                .ok_or(ReflectError::Unsupported),
            _ => Err(ReflectError::Unsupported),
        }
    }

    fn set_items(&self) -> Option<Vec<Rc<dyn Reflect>>> {
        match self {
            Value::Set(items) => Some(items.iter().map(|v| v.clone() as Rc<dyn Reflect>).collect()),
            _ => None,
        }
    }

    fn member_names(&self) -> Result<Vec<String>, ReflectError> {
        match self {
            Value::Object(obj) => Ok(obj.members.keys().cloned().collect()),
            _ => Ok(Vec::new()),
        }
    }

    fn member(&self, name: &str) -> Result<Rc<dyn Reflect>, ReflectError> {
        match self {
            Value::Object(obj) => match obj.members.get(name) {
                Some(MemberSlot::Value(v)) => Ok(v.clone() as Rc<dyn Reflect>),
                Some(MemberSlot::Error(msg)) => Err(ReflectError::Failed(msg.clone())),
                None => Err(ReflectError::Unsupported),
            },
            _ => Err(ReflectError::Unsupported),
        }
    }

    fn is_routine(&self) -> bool {
        matches!(self, Value::Routine(_))
    }

    fn numeric_array(&self) -> Option<(String, Vec<usize>)> {
        match self {
            Value::NumArray { dtype, shape } => Some((dtype.clone(), shape.clone())),
            _ => None,
        }
    }

    fn numeric_scalar(&self) -> Option<(String, String)> {
        match self {
            Value::NumScalar { text, dtype } => Some((text.clone(), dtype.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_leaves() {
        assert_eq!(Value::Int(42).leaf_repr(), Some("42".to_string()));
        assert_eq!(Value::Float(1.0).leaf_repr(), Some("1.0".to_string()));
        assert_eq!(Value::Bool(true).leaf_repr(), Some("true".to_string()));
        assert_eq!(Value::str("hi").leaf_repr(), Some("\"hi\"".to_string()));
        assert_eq!(Value::None.leaf_repr(), Some("None".to_string()));
        assert!(Value::list(vec![]).leaf_repr().is_none());
    }

    #[test]
    fn test_container_repr() {
        let v = Value::list(vec![Value::Int(1), Value::str("a")]);
        assert_eq!(v.to_string(), "[1, \"a\"]");

        let t = Value::tuple(vec![Value::Int(1)]);
        assert_eq!(t.to_string(), "(1,)");

        let d = Value::dict(vec![(Key::Str("k".to_string()), Value::Int(7))]);
        assert_eq!(d.to_string(), "{\"k\": 7}");

        assert_eq!(Value::set(vec![]).to_string(), "set()");
    }

    #[test]
    fn test_index_probes() {
        let v = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert!(v.index(&Key::Int(0)).is_ok());
        assert_eq!(
            v.index(&Key::Int(5)).err(),
            Some(ReflectError::Unsupported)
        );
        assert_eq!(
            v.index(&Key::Str("x".to_string())).err(),
            Some(ReflectError::Unsupported)
        );
    }

    #[test]
    fn test_object_members() {
        let obj = Value::Object(
            ObjectValue::new("Point")
                .member("x", Value::Int(1))
                .failing_member("broken", "getter raised"),
        );

        let mut names = obj.member_names().unwrap();
        names.sort();
        assert_eq!(names, vec!["broken".to_string(), "x".to_string()]);

        assert!(obj.member("x").is_ok());
        assert!(matches!(
            obj.member("broken"),
            Err(ReflectError::Failed(_))
        ));
        assert_eq!(obj.member("missing").err(), Some(ReflectError::Unsupported));
    }

    #[test]
    fn test_numeric_stand_ins() {
        let arr = Value::NumArray {
            dtype: "float64".to_string(),
            shape: vec![3, 4],
        };
        assert_eq!(
            arr.numeric_array(),
            Some(("float64".to_string(), vec![3, 4]))
        );
        assert_eq!(arr.to_string(), "ndarray(float64) (3, 4)");

        let one = Value::NumArray {
            dtype: "int32".to_string(),
            shape: vec![7],
        };
        assert_eq!(one.to_string(), "ndarray(int32) (7,)");
    }
}
