//! Recursive traversal of inspected value graphs
//!
//! [`ValueWalker::walk`] turns one root value into a pre-order sequence of
//! [`VarNode`]s, emitted through a pluggable [`NodeSink`]. The walk is driven
//! entirely by capability probes and per-path inspection state:
//!
//! - primitive scalars, text, and the absence value become leaves and are
//!   never recursed into;
//! - collapsed nodes (the default) emit exactly one node;
//! - expanded nodes recurse by shape — unordered collection, keyed/indexed
//!   container, or generic object — with every-10 pagination guarded by
//!   synthetic `.cont-{n}` paths;
//! - any probe failure is logged and contained: representation failures
//!   become marked text, member failures become sentinel error leaves, and
//!   enumeration failures halt that one container only.
//!
//! Each recursive call re-resolves inspection state by its own identity
//! path; expansion, display type, and highlighting are never inherited.

use crate::inspect::node::{VarClass, VarNode};
use crate::inspect::path::{continuation_path, index_path, is_descendant, member_path};
use crate::inspect::state::{AccessLevel, FrameVarInfo, InspectInfo};
use crate::inspect::stringify::StringifierRegistry;
use crate::reflect::value::Value;
use crate::reflect::{Key, Reflect, ReflectError};
use std::rc::Rc;
use tracing::warn;

/// A continuation marker is considered after this many elements
pub const CONTINUATION_INTERVAL: usize = 10;

/// Where emitted nodes accumulate; a small closed set of strategies selected
/// at call time
pub trait NodeSink {
    fn push(&mut self, node: VarNode, iinfo: &InspectInfo);
}

/// Accumulates one flat ordered list
#[derive(Debug, Default)]
pub struct BasicSink {
    pub nodes: Vec<VarNode>,
}

impl NodeSink for BasicSink {
    fn push(&mut self, node: VarNode, _iinfo: &InspectInfo) {
        self.nodes.push(node);
    }
}

/// Accumulates into a shared list across several independently-rooted watch
/// traversals, stamping every node with the owning expression
pub struct WatchSink<'a> {
    pub nodes: &'a mut Vec<VarNode>,
    pub expression: String,
}

impl NodeSink for WatchSink<'_> {
    fn push(&mut self, mut node: VarNode, _iinfo: &InspectInfo) {
        node.watch_expr = Some(self.expression.clone());
        if node.class == VarClass::Var {
            node.class = VarClass::Watch;
        }
        self.nodes.push(node);
    }
}

/// Maintains the main list and a secondary "top" list of pinned nodes.
///
/// A node goes to the top list when its own state is pinned or when its path
/// descends from a prefix pinned earlier in this traversal; the prefix set
/// grows monotonically, so pinning a node also pins its not-yet-visited
/// descendants. Top copies are constructed afresh, never shared.
#[derive(Debug, Default)]
pub struct TopAndMainSink {
    pub main: Vec<VarNode>,
    pub top: Vec<VarNode>,
    top_id_path_prefixes: Vec<String>,
}

impl NodeSink for TopAndMainSink {
    fn push(&mut self, node: VarNode, iinfo: &InspectInfo) {
        let mut repeated_at_top = iinfo.repeated_at_top;

        if let Some(id_path) = &node.id_path {
            if repeated_at_top && !self.top_id_path_prefixes.contains(id_path) {
                self.top_id_path_prefixes.push(id_path.clone());
            }
            repeated_at_top = repeated_at_top
                || self
                    .top_id_path_prefixes
                    .iter()
                    .any(|prefix| is_descendant(id_path, prefix));
        }

        if repeated_at_top {
            self.top.push(node.clone());
        }
        self.main.push(node);
    }
}

/// The traversal engine, parameterized by the sink variant
pub struct ValueWalker<'a, S: NodeSink> {
    frame_var_info: &'a FrameVarInfo,
    stringifiers: &'a StringifierRegistry,
    pub sink: S,
}

impl<'a, S: NodeSink> ValueWalker<'a, S> {
    pub fn new(
        frame_var_info: &'a FrameVarInfo,
        stringifiers: &'a StringifierRegistry,
        sink: S,
    ) -> Self {
        ValueWalker {
            frame_var_info,
            stringifiers,
            sink,
        }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Walk `value`, emitting its node and (when expanded) its descendants.
    /// `id_path` defaults to the label at the root. Returns the node emitted
    /// for `value` itself.
    pub fn walk(
        &mut self,
        parent: Option<&VarNode>,
        label: Option<&str>,
        value: &dyn Reflect,
        id_path: Option<&str>,
        class: Option<VarClass>,
    ) -> VarNode {
        let owned_path = id_path
            .map(str::to_string)
            .or_else(|| label.map(str::to_string));
        let id_path = owned_path.as_deref();

        let iinfo = self.frame_var_info.get_inspect_info(id_path);

        // Primitive scalars, text, and the absence value never recurse.
        if let Some(repr) = value.leaf_repr() {
            return self.add_item(parent, label, Some(repr), id_path, class);
        }

        let mut displayed = self.stringifiers.stringify(&iinfo, value);
        if iinfo.show_detail {
            let mut marker = match iinfo.access_level {
                AccessLevel::Public => "pub".to_string(),
                AccessLevel::Private => "pri".to_string(),
                AccessLevel::All => "all".to_string(),
            };
            if iinfo.show_methods {
                marker.push_str("+()");
            }
            displayed.push_str(&format!(" [{}]", marker));
        }

        let node = self.add_item(parent, label, Some(displayed), id_path, class);

        if !iinfo.show_detail {
            return node;
        }

        let path = id_path.unwrap_or("");

        // Unordered collection: no keyed access, iteration order only.
        if let Some(items) = value.set_items() {
            for (i, entry) in items.iter().enumerate() {
                if i % CONTINUATION_INTERVAL == 0 && i != 0 {
                    let cont_path = continuation_path(path, i);
                    if !self
                        .frame_var_info
                        .get_inspect_info(Some(&cont_path))
                        .show_detail
                    {
                        self.add_item(Some(&node), Some("..."), None, Some(&cont_path), None);
                        break;
                    }
                }
                let child_path = index_path(path, &Key::Int(i as i64));
                self.walk(Some(&node), None, entry.as_ref(), Some(&child_path), None);
            }
            if items.is_empty() {
                self.add_item(Some(&node), Some("<empty>"), None, None, None);
            }
            return node;
        }

        // Keyed or indexed container: explicit keys, or integer indices when
        // the value has a length and answers index probes.
        if let Some(keys) = self.container_keys(value) {
            let mut cnt = 0usize;
            for key in keys {
                if cnt % CONTINUATION_INTERVAL == 0 && cnt != 0 {
                    let cont_path = continuation_path(path, cnt);
                    if !self
                        .frame_var_info
                        .get_inspect_info(Some(&cont_path))
                        .show_detail
                    {
                        self.add_item(Some(&node), Some("..."), None, Some(&cont_path), None);
                        break;
                    }
                }

                let child = match value.index(&key) {
                    Ok(child) => child,
                    Err(err) => {
                        // Halts this container's enumeration only.
                        warn!(key = %key.repr(), error = %err,
                            "failed to fetch an element that appeared enumerable");
                        break;
                    }
                };

                let child_path = index_path(path, &key);
                self.walk(
                    Some(&node),
                    Some(&key.repr()),
                    child.as_ref(),
                    Some(&child_path),
                    None,
                );
                cnt += 1;
            }
            if cnt == 0 {
                self.add_item(Some(&node), Some("<empty>"), None, None, None);
            }
            return node;
        }

        // Generic object: reflectable members, filtered and sorted.
        match value.member_names() {
            Ok(mut names) => {
                names.sort();
                names.dedup();

                let mut cnt_omitted_private = 0usize;
                let mut cnt_omitted_methods = 0usize;
                let mut cnt_emitted = 0usize;

                for name in &names {
                    match iinfo.access_level {
                        AccessLevel::Public if name.starts_with('_') => {
                            cnt_omitted_private += 1;
                            continue;
                        }
                        AccessLevel::Private
                            if name.starts_with("__") && name.ends_with("__") =>
                        {
                            cnt_omitted_private += 1;
                            continue;
                        }
                        _ => {}
                    }

                    let member: Rc<dyn Reflect> = match value.member(name) {
                        Ok(member) => {
                            if member.is_routine() && !iinfo.show_methods {
                                cnt_omitted_methods += 1;
                                continue;
                            }
                            member
                        }
                        Err(err) => {
                            warn!(member = %name, error = %err, "member resolution failed");
                            Rc::new(Value::EvalError)
                        }
                    };

                    let child_path = member_path(path, name);
                    self.walk(
                        Some(&node),
                        Some(&format!(".{}", name)),
                        member.as_ref(),
                        Some(&child_path),
                        None,
                    );
                    cnt_emitted += 1;
                }

                if cnt_emitted == 0 {
                    let label = if cnt_omitted_private > 0 {
                        "<omitted private attributes>"
                    } else if cnt_omitted_methods > 0 {
                        "<omitted methods>"
                    } else {
                        "<empty>"
                    };
                    self.add_item(Some(&node), Some(label), None, None, None);
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to look up members");
                self.add_item(Some(&node), Some("<?>"), None, None, None);
            }
        }

        node
    }

    /// Key list for the keyed-container branch, or `None` when the value is
    /// not enumerable that way
    fn container_keys(&self, value: &dyn Reflect) -> Option<Vec<Key>> {
        match value.keys() {
            Ok(keys) => return Some(keys),
            Err(ReflectError::Unsupported) => {}
            Err(err) => warn!(error = %err, "failed to obtain key enumeration"),
        }

        match value.length() {
            Ok(len) => match value.index(&Key::Int(0)) {
                Ok(_) => Some((0..len).map(|i| Key::Int(i as i64)).collect()),
                // Has a length but no index access: enumerable and empty.
                Err(ReflectError::Unsupported) => Some(Vec::new()),
                Err(err) => {
                    warn!(error = %err, "element probe failed");
                    None
                }
            },
            Err(ReflectError::Unsupported) => None,
            Err(err) => {
                warn!(error = %err, "failed to determine container length");
                None
            }
        }
    }

    fn add_item(
        &mut self,
        parent: Option<&VarNode>,
        label: Option<&str>,
        value_str: Option<String>,
        id_path: Option<&str>,
        class: Option<VarClass>,
    ) -> VarNode {
        let iinfo = self.frame_var_info.get_inspect_info(id_path);
        let class = if iinfo.highlighted {
            VarClass::Highlighted
        } else {
            class.unwrap_or_default()
        };

        let node = VarNode {
            label: label.map(str::to_string),
            value_str,
            depth: parent.map_or(0, VarNode::child_depth),
            id_path: id_path.map(str::to_string),
            class,
            watch_expr: None,
            wrap: iinfo.wrap,
        };
        self.sink.push(node.clone(), &iinfo);
        node
    }
}
