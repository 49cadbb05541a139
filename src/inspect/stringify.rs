//! Value-to-text representation strategies
//!
//! A node's value text comes from the representation selected by its
//! [`DisplayType`]: a compact type summary, the repr-like or str-like text,
//! or a user-supplied stringifier loaded from a file. Every call is wrapped:
//! whatever a representation does, the traversal gets a string back, with
//! failures logged and replaced by the type summary plus an inline error
//! marker.
//!
//! # Custom stringifiers
//!
//! Loading a user file is an external concern behind [`StringifierLoader`].
//! The registry loads each file exactly once per process; a load error or a
//! missing entry point is surfaced through a blocking [`AckPrompt`] and then
//! downgraded to a constant error-text stringifier for the rest of the
//! session.

use crate::inspect::state::{DisplayType, InspectInfo};
use crate::reflect::{Reflect, ReflectError};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::warn;

/// A loaded representation function
pub type StringifyFn = Box<dyn Fn(&dyn Reflect) -> Result<String, ReflectError>>;

/// Loads one designated entry-point function out of a user file
pub trait StringifierLoader {
    fn load(&self, path: &Path) -> Result<StringifyFn, LoadError>;
}

/// Failure to produce a custom stringifier from a file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file could not be read or executed
    Io(String),
    /// The file loaded but defines no entry point of the given name
    MissingEntryPoint(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "{}", msg),
            LoadError::MissingEntryPoint(name) => {
                write!(f, "no function named {} at the module level", name)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Blocking acknowledgment shown when a custom stringifier cannot be loaded
pub trait AckPrompt {
    fn acknowledge(&self, message: &str);
}

/// Prints the diagnostic and waits for enter on stdin
pub struct ConsoleAckPrompt;

impl AckPrompt for ConsoleAckPrompt {
    fn acknowledge(&self, message: &str) {
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "{}", message);
        let _ = writeln!(stderr, "Hit enter:");
        let _ = io::stdin().lock().read_line(&mut String::new());
    }
}

/// Placeholder loader for hosts that do not support custom stringifiers
pub struct NoCustomLoader;

impl StringifierLoader for NoCustomLoader {
    fn load(&self, _path: &Path) -> Result<StringifyFn, LoadError> {
        Err(LoadError::Io(
            "no custom stringifier loader configured".to_string(),
        ))
    }
}

const BROKEN_FILE_TEXT: &str = "ERROR: invalid custom stringifier file.";
const MISSING_ENTRY_TEXT: &str =
    "ERROR: custom stringifier file defines no entry-point function.";

enum CustomEntry {
    Loaded(StringifyFn),
    Broken(&'static str),
}

/// Process-wide registry of custom stringifiers plus the dispatch wrapper.
///
/// The cache is interior-mutable because loading happens lazily in the middle
/// of a read-only traversal; the core is single-threaded, so a `RefCell` is
/// the whole locking discipline.
pub struct StringifierRegistry {
    loader: Box<dyn StringifierLoader>,
    prompt: Box<dyn AckPrompt>,
    cache: RefCell<FxHashMap<PathBuf, Rc<CustomEntry>>>,
}

impl Default for StringifierRegistry {
    fn default() -> Self {
        StringifierRegistry::new(Box::new(NoCustomLoader), Box::new(ConsoleAckPrompt))
    }
}

impl StringifierRegistry {
    pub fn new(loader: Box<dyn StringifierLoader>, prompt: Box<dyn AckPrompt>) -> Self {
        StringifierRegistry {
            loader,
            prompt,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Value text for `value` under `iinfo`'s display type. Never fails: any
    /// representation error is logged and replaced by the type summary with
    /// an inline marker.
    pub fn stringify(&self, iinfo: &InspectInfo, value: &dyn Reflect) -> String {
        let result = match &iinfo.display_type {
            DisplayType::Type => return type_summary(value),
            DisplayType::Repr => value.repr_text(),
            DisplayType::Str => value.display_text(),
            DisplayType::Custom(path) => self.stringify_custom(path, value),
        };

        match result {
            Ok(text) => text,
            Err(err) => {
                warn!(display_type = %iinfo.display_type, error = %err, "stringifier failed");
                format!(
                    "{} (!! {} error !!)",
                    type_summary(value),
                    iinfo.display_type
                )
            }
        }
    }

    fn stringify_custom(&self, path: &Path, value: &dyn Reflect) -> Result<String, ReflectError> {
        match &*self.cached_entry(path) {
            CustomEntry::Loaded(stringify) => stringify(value),
            CustomEntry::Broken(text) => Ok((*text).to_string()),
        }
    }

    fn cached_entry(&self, path: &Path) -> Rc<CustomEntry> {
        if let Some(entry) = self.cache.borrow().get(path) {
            return entry.clone();
        }

        let entry = match self.loader.load(path) {
            Ok(stringify) => CustomEntry::Loaded(stringify),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "custom stringifier load failed");
                self.prompt.acknowledge(&format!(
                    "Error when loading custom stringifier {}: {}",
                    path.display(),
                    err
                ));
                match err {
                    LoadError::MissingEntryPoint(_) => CustomEntry::Broken(MISSING_ENTRY_TEXT),
                    LoadError::Io(_) => CustomEntry::Broken(BROKEN_FILE_TEXT),
                }
            }
        };

        let entry = Rc::new(entry);
        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), entry.clone());
        entry
    }
}

/// Compact, infallible summary of a value's type and rough size.
///
/// Used as the default representation and as the substitute whenever another
/// representation fails.
pub fn type_summary(value: &dyn Reflect) -> String {
    if let Some((dtype, shape)) = value.numeric_array() {
        let dims = shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return format!("{}({}) ({})", value.type_name(), dtype, dims);
    }

    if let Some((text, dtype)) = value.numeric_scalar() {
        return format!("{} ({})", text, dtype);
    }

    if value.str_safe() {
        return match value.display_text() {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "string-safe stringify failed");
                "!! string-safe stringify failed !!".to_string()
            }
        };
    }

    if let Some(result) = value.custom_summary() {
        return match result {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "custom summary call failed");
                "!! custom summary call failed !!".to_string()
            }
        };
    }

    if value.is_builtin_container() {
        if let Ok(len) = value.length() {
            return format!("{} ({})", value.type_name(), len);
        }
    }

    value.type_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::state::InspectDefaults;
    use crate::reflect::value::{CustomSummary, ObjectValue, Value};
    use crate::reflect::Key;

    fn iinfo_with(display_type: DisplayType) -> InspectInfo {
        let mut iinfo = InspectInfo::with_defaults(&InspectDefaults::default());
        iinfo.display_type = display_type;
        iinfo
    }

    #[test]
    fn test_type_summary_shapes() {
        assert_eq!(
            type_summary(&Value::list(vec![Value::Int(1), Value::Int(2)])),
            "list (2)"
        );
        assert_eq!(
            type_summary(&Value::dict(vec![(Key::Int(0), Value::None)])),
            "dict (1)"
        );
        assert_eq!(type_summary(&Value::set(vec![])), "set (0)");
        assert_eq!(
            type_summary(&Value::Object(ObjectValue::new("Widget"))),
            "Widget"
        );
        assert_eq!(
            type_summary(&Value::Routine("go".to_string())),
            "<function go>"
        );
        assert_eq!(
            type_summary(&Value::NumArray {
                dtype: "float64".to_string(),
                shape: vec![3, 4],
            }),
            "ndarray(float64) (3, 4)"
        );
        assert_eq!(
            type_summary(&Value::NumScalar {
                text: "2.5".to_string(),
                dtype: "float32".to_string(),
            }),
            "2.5 (float32)"
        );
    }

    #[test]
    fn test_custom_summary_capability_and_containment() {
        let nice = Value::Object(
            ObjectValue::new("Report").summary(CustomSummary::Text("3 rows".to_string())),
        );
        assert_eq!(type_summary(&nice), "3 rows");

        // A value may pretend to have the capability and then misbehave.
        let nasty = Value::Object(
            ObjectValue::new("Mock").summary(CustomSummary::Fails("nonsense".to_string())),
        );
        assert_eq!(type_summary(&nasty), "!! custom summary call failed !!");
    }

    #[test]
    fn test_stringify_repr_and_str() {
        let registry = StringifierRegistry::default();
        let value = Value::list(vec![Value::str("a")]);

        assert_eq!(
            registry.stringify(&iinfo_with(DisplayType::Repr), &value),
            "[\"a\"]"
        );
        assert_eq!(
            registry.stringify(&iinfo_with(DisplayType::Type), &value),
            "list (1)"
        );
    }

    #[test]
    fn test_stringify_failure_is_contained() {
        struct ExplodingRepr;
        impl Reflect for ExplodingRepr {
            fn type_name(&self) -> String {
                "Grenade".to_string()
            }
            fn repr_text(&self) -> Result<String, ReflectError> {
                Err(ReflectError::Failed("boom".to_string()))
            }
        }

        let registry = StringifierRegistry::default();
        let text = registry.stringify(&iinfo_with(DisplayType::Repr), &ExplodingRepr);
        assert_eq!(text, "Grenade (!! repr error !!)");
    }

    #[test]
    fn test_broken_loader_downgrades_for_the_session() {
        use std::cell::Cell;

        struct CountingLoader(Rc<Cell<usize>>);
        impl StringifierLoader for CountingLoader {
            fn load(&self, _path: &Path) -> Result<StringifyFn, LoadError> {
                self.0.set(self.0.get() + 1);
                Err(LoadError::MissingEntryPoint("my_stringifier".to_string()))
            }
        }

        struct CountingPrompt(Rc<Cell<usize>>);
        impl AckPrompt for CountingPrompt {
            fn acknowledge(&self, _message: &str) {
                self.0.set(self.0.get() + 1);
            }
        }

        let loads = Rc::new(Cell::new(0));
        let acks = Rc::new(Cell::new(0));
        let registry = StringifierRegistry::new(
            Box::new(CountingLoader(loads.clone())),
            Box::new(CountingPrompt(acks.clone())),
        );

        let iinfo = iinfo_with(DisplayType::Custom(PathBuf::from("strfy.cfg")));
        let value = Value::list(vec![]);

        for _ in 0..3 {
            let text = registry.stringify(&iinfo, &value);
            assert_eq!(text, MISSING_ENTRY_TEXT);
        }

        // One load attempt, one acknowledgment, then the constant error text.
        assert_eq!(loads.get(), 1);
        assert_eq!(acks.get(), 1);
    }

    #[test]
    fn test_loaded_stringifier_is_cached_and_used() {
        struct UpcaseLoader;
        impl StringifierLoader for UpcaseLoader {
            fn load(&self, _path: &Path) -> Result<StringifyFn, LoadError> {
                Ok(Box::new(|value: &dyn Reflect| {
                    Ok(value.type_name().to_uppercase())
                }))
            }
        }

        struct NoPrompt;
        impl AckPrompt for NoPrompt {
            fn acknowledge(&self, _message: &str) {
                panic!("should not prompt on success");
            }
        }

        let registry =
            StringifierRegistry::new(Box::new(UpcaseLoader), Box::new(NoPrompt));
        let iinfo = iinfo_with(DisplayType::Custom(PathBuf::from("up.cfg")));
        assert_eq!(registry.stringify(&iinfo, &Value::list(vec![])), "LIST");
        assert_eq!(registry.stringify(&iinfo, &Value::None), "NONETYPE");
    }
}
