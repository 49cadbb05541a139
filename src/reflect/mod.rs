//! Reflection seam between the inspector and arbitrary runtime values
//!
//! The traversal engine never touches a concrete value type. Everything it
//! needs is expressed as a capability probe on the [`Reflect`] trait: "try to
//! get the member names", "try to get the length", "try to index". Every probe
//! returns a result or an absence marker instead of panicking, so a hostile or
//! half-broken value can never take the traversal down with it.
//!
//! # Error convention
//!
//! - [`ReflectError::Unsupported`]: the capability simply is not there (or a
//!   lookup missed). Callers treat this silently.
//! - [`ReflectError::Failed`]: the probe itself blew up. Callers log it and
//!   substitute something bounded.

pub mod value;

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

/// Name -> value bindings handed over by the surrounding debugger
pub type Bindings = FxHashMap<String, Rc<dyn Reflect>>;

/// A key used to index into a keyed or sequential container
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Literal text of the key, as used inside identity paths and labels
    pub fn repr(&self) -> String {
        match self {
            Key::Int(i) => i.to_string(),
            Key::Str(s) => format!("{:?}", s),
        }
    }
}

/// Failure modes of a reflection probe
#[derive(Debug, Clone, PartialEq)]
pub enum ReflectError {
    /// Capability absent or lookup missed; not worth mentioning
    Unsupported,
    /// The probe raised; message is for the log
    Failed(String),
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectError::Unsupported => write!(f, "operation not supported"),
            ReflectError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ReflectError {}

/// Capability probes over an inspected value.
///
/// Default implementations describe a featureless opaque object: no scalar
/// representation, no containers, no members. Implementors opt into exactly
/// the capabilities their value shape has.
pub trait Reflect {
    /// Bare name of the value's type
    fn type_name(&self) -> String;

    /// Literal representation for primitive scalars, text, and the absence
    /// value. `Some` here makes the value a leaf: the traversal never
    /// recurses into it.
    fn leaf_repr(&self) -> Option<String> {
        None
    }

    /// Canonical detailed text (repr-like)
    fn repr_text(&self) -> Result<String, ReflectError> {
        Ok(self.type_name())
    }

    /// Human display text (str-like)
    fn display_text(&self) -> Result<String, ReflectError> {
        self.repr_text()
    }

    /// True for routine/module-like types whose display text is safe to take
    /// at face value
    fn str_safe(&self) -> bool {
        false
    }

    /// The "safe custom stringify" capability: `Some` if the value claims to
    /// know how to summarize itself. The claim may still fail.
    fn custom_summary(&self) -> Option<Result<String, ReflectError>> {
        None
    }

    /// True for the built-in container shapes (set/list/map/tuple-like)
    fn is_builtin_container(&self) -> bool {
        false
    }

    /// Element count, when the value has one
    fn length(&self) -> Result<usize, ReflectError> {
        Err(ReflectError::Unsupported)
    }

    /// Key enumeration for keyed containers
    fn keys(&self) -> Result<Vec<Key>, ReflectError> {
        Err(ReflectError::Unsupported)
    }

    /// Keyed or indexed element access
    fn index(&self, _key: &Key) -> Result<Rc<dyn Reflect>, ReflectError> {
        Err(ReflectError::Unsupported)
    }

    /// Unordered-collection capability: elements in iteration order, no
    /// keyed access
    fn set_items(&self) -> Option<Vec<Rc<dyn Reflect>>> {
        None
    }

    /// Reflectable member names (may contain duplicates; caller sorts)
    fn member_names(&self) -> Result<Vec<String>, ReflectError> {
        Ok(Vec::new())
    }

    /// Resolve one member by name
    fn member(&self, _name: &str) -> Result<Rc<dyn Reflect>, ReflectError> {
        Err(ReflectError::Unsupported)
    }

    /// True for callable/routine-like values
    fn is_routine(&self) -> bool {
        false
    }

    /// Numeric-array-like capability: `(dtype, shape)`
    fn numeric_array(&self) -> Option<(String, Vec<usize>)> {
        None
    }

    /// Numeric-scalar-like capability: `(value text, dtype)`
    fn numeric_scalar(&self) -> Option<(String, String)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_repr() {
        assert_eq!(Key::Int(3).repr(), "3");
        assert_eq!(Key::Int(-1).repr(), "-1");
        assert_eq!(Key::Str("name".to_string()).repr(), "\"name\"");
    }

    #[test]
    fn test_default_probes_are_opaque() {
        struct Opaque;
        impl Reflect for Opaque {
            fn type_name(&self) -> String {
                "Opaque".to_string()
            }
        }

        let v = Opaque;
        assert!(v.leaf_repr().is_none());
        assert!(v.set_items().is_none());
        assert_eq!(v.keys(), Err(ReflectError::Unsupported));
        assert_eq!(v.length(), Err(ReflectError::Unsupported));
        assert_eq!(v.member_names(), Ok(Vec::new()));
        assert_eq!(v.repr_text(), Ok("Opaque".to_string()));
    }
}
