//! Display nodes emitted by the traversal
//!
//! A [`VarNode`] is immutable once constructed: label, value text, nesting
//! depth, identity path, visual class, and a `wrap` flag snapshotted from the
//! node's inspection state at construction time. Rendering later is a pure
//! function of a node plus an available width; nothing here points back into
//! the value graph.

/// Visual class of a node, selecting its color attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarClass {
    /// An ordinary variable
    #[default]
    Var,
    /// The distinguished return value
    Return,
    /// Rooted in a watch expression
    Watch,
    /// User-highlighted, wins over the other classes
    Highlighted,
}

/// One entry of the ordered node sequence.
///
/// Depth is a plain integer computed at construction (parent depth + 1, or 0
/// for a root); indentation, not child links, encodes the tree shape.
#[derive(Debug, Clone, PartialEq)]
pub struct VarNode {
    pub label: Option<String>,
    pub value_str: Option<String>,
    pub depth: usize,
    pub id_path: Option<String>,
    pub class: VarClass,
    /// Source text of the owning watch expression, for watch-rooted nodes
    pub watch_expr: Option<String>,
    /// Snapshot of the inspection state's wrap flag; not re-read later
    pub wrap: bool,
}

impl VarNode {
    /// Depth this node's children are constructed with
    pub fn child_depth(&self) -> usize {
        self.depth + 1
    }
}
