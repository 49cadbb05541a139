//! Per-path inspection state and the stack-situation registry
//!
//! Display preferences (expansion, access filter, highlight, pinning, wrap)
//! are keyed by identity path and live for the whole debugging session. The
//! map only ever grows — bounded by the number of distinct paths the user has
//! actually touched — and is mutated exclusively by external toggle commands
//! between refreshes, never by the traversal itself.

use crate::inspect::watch::WatchExpression;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::PathBuf;

/// Which representation function to use for a node's value text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayType {
    /// Compact type summary (the default)
    #[default]
    Type,
    /// Canonical detailed text
    Repr,
    /// Human display text
    Str,
    /// A user-supplied stringifier loaded from this file
    Custom(PathBuf),
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayType::Type => write!(f, "type"),
            DisplayType::Repr => write!(f, "repr"),
            DisplayType::Str => write!(f, "str"),
            DisplayType::Custom(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which reflectable members of an object are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    /// Hide names starting with the private marker `_`
    #[default]
    Public,
    /// Hide only dunder-style names
    Private,
    /// Hide nothing
    All,
}

/// Session-wide defaults a fresh [`InspectInfo`] starts from
#[derive(Debug, Clone, Default)]
pub struct InspectDefaults {
    pub display_type: DisplayType,
    pub access_level: AccessLevel,
    pub wrap: bool,
}

/// Display preferences for one identity path
#[derive(Debug, Clone, PartialEq)]
pub struct InspectInfo {
    pub show_detail: bool,
    pub display_type: DisplayType,
    pub highlighted: bool,
    pub repeated_at_top: bool,
    pub access_level: AccessLevel,
    pub show_methods: bool,
    pub wrap: bool,
}

impl InspectInfo {
    pub fn with_defaults(defaults: &InspectDefaults) -> Self {
        InspectInfo {
            show_detail: false,
            display_type: defaults.display_type.clone(),
            highlighted: false,
            repeated_at_top: false,
            access_level: defaults.access_level,
            show_methods: false,
            wrap: defaults.wrap,
        }
    }
}

/// A single field change applied by an external key-binding handler
#[derive(Debug, Clone)]
pub enum InspectToggle {
    ShowDetail(bool),
    DisplayType(DisplayType),
    Highlighted(bool),
    RepeatedAtTop(bool),
    AccessLevel(AccessLevel),
    ShowMethods(bool),
    Wrap(bool),
}

/// Inspection state and watch expressions for one stack situation
#[derive(Debug, Clone)]
pub struct FrameVarInfo {
    id_path_to_iinfo: FxHashMap<String, InspectInfo>,
    watches: Vec<WatchExpression>,
    defaults: InspectDefaults,
}

impl FrameVarInfo {
    pub fn new(defaults: InspectDefaults) -> Self {
        FrameVarInfo {
            id_path_to_iinfo: FxHashMap::default(),
            watches: Vec::new(),
            defaults,
        }
    }

    /// Read-only lookup; absent paths get the session defaults without being
    /// inserted
    pub fn get_inspect_info(&self, id_path: Option<&str>) -> InspectInfo {
        id_path
            .and_then(|p| self.id_path_to_iinfo.get(p))
            .cloned()
            .unwrap_or_else(|| InspectInfo::with_defaults(&self.defaults))
    }

    /// Lookup for mutation; creates the record with session defaults on
    /// first touch
    pub fn ensure_inspect_info(&mut self, id_path: &str) -> &mut InspectInfo {
        let defaults = &self.defaults;
        self.id_path_to_iinfo
            .entry(id_path.to_string())
            .or_insert_with(|| InspectInfo::with_defaults(defaults))
    }

    /// Apply one toggle command to the record at `id_path`
    pub fn toggle(&mut self, id_path: &str, change: InspectToggle) {
        let iinfo = self.ensure_inspect_info(id_path);
        match change {
            InspectToggle::ShowDetail(v) => iinfo.show_detail = v,
            InspectToggle::DisplayType(v) => iinfo.display_type = v,
            InspectToggle::Highlighted(v) => iinfo.highlighted = v,
            InspectToggle::RepeatedAtTop(v) => iinfo.repeated_at_top = v,
            InspectToggle::AccessLevel(v) => iinfo.access_level = v,
            InspectToggle::ShowMethods(v) => iinfo.show_methods = v,
            InspectToggle::Wrap(v) => iinfo.wrap = v,
        }
    }

    pub fn watches(&self) -> &[WatchExpression] {
        &self.watches
    }

    pub fn add_watch(&mut self, expression: &str) {
        self.watches.push(WatchExpression::new(expression));
    }

    pub fn remove_watch(&mut self, index: usize) {
        if index < self.watches.len() {
            self.watches.remove(index);
        }
    }
}

/// Opaque identifier for "which point in program execution" a frame belongs
/// to; owned by the surrounding debugger
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackSituationId(pub String);

/// Session-wide registry mapping stack situations to their inspection state.
///
/// Entries are created lazily per new situation and never destroyed during
/// the session. Single-threaded by design; a host that refreshes
/// concurrently must wrap each entry in its own mutual-exclusion scope.
#[derive(Debug, Default)]
pub struct FrameVarInfoKeeper {
    by_situation: FxHashMap<StackSituationId, FrameVarInfo>,
    defaults: InspectDefaults,
}

impl FrameVarInfoKeeper {
    pub fn new(defaults: InspectDefaults) -> Self {
        FrameVarInfoKeeper {
            by_situation: FxHashMap::default(),
            defaults,
        }
    }

    /// State for `ssid`, created with session defaults on first use
    pub fn frame_var_info(&mut self, ssid: &StackSituationId) -> &mut FrameVarInfo {
        let defaults = &self.defaults;
        self.by_situation
            .entry(ssid.clone())
            .or_insert_with(|| FrameVarInfo::new(defaults.clone()))
    }

    /// Read-only view, if the situation has been seen before
    pub fn get(&self, ssid: &StackSituationId) -> Option<&FrameVarInfo> {
        self.by_situation.get(ssid)
    }

    /// Apply a toggle to one path of one situation
    pub fn toggle(&mut self, ssid: &StackSituationId, id_path: &str, change: InspectToggle) {
        self.frame_var_info(ssid).toggle(id_path, change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_collapsed() {
        let fvi = FrameVarInfo::new(InspectDefaults::default());
        let iinfo = fvi.get_inspect_info(Some("x"));

        assert!(!iinfo.show_detail);
        assert!(!iinfo.highlighted);
        assert!(!iinfo.repeated_at_top);
        assert!(!iinfo.show_methods);
        assert_eq!(iinfo.display_type, DisplayType::Type);
        assert_eq!(iinfo.access_level, AccessLevel::Public);
    }

    #[test]
    fn test_read_only_lookup_does_not_insert() {
        let mut fvi = FrameVarInfo::new(InspectDefaults::default());
        let _ = fvi.get_inspect_info(Some("x"));
        assert!(fvi.id_path_to_iinfo.is_empty());

        fvi.toggle("x", InspectToggle::ShowDetail(true));
        assert!(fvi.get_inspect_info(Some("x")).show_detail);
        assert_eq!(fvi.id_path_to_iinfo.len(), 1);
    }

    #[test]
    fn test_custom_defaults_flow_into_new_records() {
        let defaults = InspectDefaults {
            display_type: DisplayType::Repr,
            access_level: AccessLevel::All,
            wrap: true,
        };
        let mut fvi = FrameVarInfo::new(defaults);

        let fresh = fvi.get_inspect_info(Some("anything"));
        assert_eq!(fresh.display_type, DisplayType::Repr);
        assert_eq!(fresh.access_level, AccessLevel::All);
        assert!(fresh.wrap);

        let stored = fvi.ensure_inspect_info("anything");
        assert!(stored.wrap);
    }

    #[test]
    fn test_keeper_is_lazy_per_situation() {
        let mut keeper = FrameVarInfoKeeper::new(InspectDefaults::default());
        let a = StackSituationId("frame-a".to_string());
        let b = StackSituationId("frame-b".to_string());

        keeper.toggle(&a, "x", InspectToggle::Highlighted(true));
        assert!(keeper.get(&a).is_some());
        assert!(keeper.get(&b).is_none());

        keeper.frame_var_info(&b).add_watch("x + 1");
        assert_eq!(keeper.get(&b).map(|f| f.watches().len()), Some(1));
    }
}
