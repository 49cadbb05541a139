//! Frame assembly: locals, return value, and watches into one sequence
//!
//! [`make_var_view`] pulls the pieces together for one refresh: it evaluates
//! the stored watch expressions, walks the distinguished return binding, and
//! walks the remaining locals, then concatenates the resulting node lists in
//! the order the pane paints them:
//!
//! ```text
//! return-nodes
//! pinned/top-nodes, separator     (when any)
//! watch-nodes, separator          (when any)
//! main tree
//! ```
//!
//! Deviating from that order is a regression, not a feature.

use crate::inspect::node::{VarClass, VarNode};
use crate::inspect::state::{FrameVarInfo, FrameVarInfoKeeper, StackSituationId};
use crate::inspect::stringify::StringifierRegistry;
use crate::inspect::walk::{BasicSink, TopAndMainSink, ValueWalker, WatchSink};
use crate::inspect::watch::WatchEvaluator;
use crate::reflect::value::Value;
use crate::reflect::{Bindings, Reflect};
use std::rc::Rc;
use tracing::warn;

/// The binding name the debugger uses for a frame's return value
pub const RETURN_BINDING: &str = "__return__";

/// One entry of the assembled view: a display node or a blank separator row
#[derive(Debug, Clone, PartialEq)]
pub enum VarViewEntry {
    Node(VarNode),
    Separator,
}

fn is_dunder(name: &str) -> bool {
    name.starts_with("__") && name.ends_with("__")
}

/// Assemble the ordered display sequence for one frame
pub fn make_var_view(
    frame_var_info: &FrameVarInfo,
    stringifiers: &StringifierRegistry,
    evaluator: &dyn WatchEvaluator,
    locals: &Bindings,
    globals: &Bindings,
) -> Vec<VarViewEntry> {
    let mut names: Vec<&String> = locals.keys().collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    // Watches first, one root per expression, one shared accumulator.
    let mut watch_nodes: Vec<VarNode> = Vec::new();
    for watch in frame_var_info.watches() {
        let value: Rc<dyn Reflect> = match evaluator.eval(&watch.expression, globals, locals) {
            Ok(value) => value,
            Err(err) => {
                warn!(expression = %watch.expression, error = %err, "watch evaluation failed");
                Rc::new(Value::EvalError)
            }
        };

        let mut walker = ValueWalker::new(
            frame_var_info,
            stringifiers,
            WatchSink {
                nodes: &mut watch_nodes,
                expression: watch.expression.clone(),
            },
        );
        walker.walk(None, Some(&watch.expression), value.as_ref(), None, None);
    }

    // The return value leads the pane and is excluded from the main scan.
    let mut ret_walker = ValueWalker::new(frame_var_info, stringifiers, BasicSink::default());
    if let Some(ret_value) = locals.get(RETURN_BINDING) {
        ret_walker.walk(
            None,
            Some("Return"),
            ret_value.as_ref(),
            None,
            Some(VarClass::Return),
        );
    }

    let mut tmv_walker =
        ValueWalker::new(frame_var_info, stringifiers, TopAndMainSink::default());
    for name in names {
        if is_dunder(name) {
            continue;
        }
        tmv_walker.walk(None, Some(name), locals[name].as_ref(), None, None);
    }

    let TopAndMainSink { main, top, .. } = tmv_walker.into_sink();

    let mut result: Vec<VarViewEntry> = main.into_iter().map(VarViewEntry::Node).collect();

    if !watch_nodes.is_empty() {
        let mut with_watches: Vec<VarViewEntry> =
            watch_nodes.into_iter().map(VarViewEntry::Node).collect();
        with_watches.push(VarViewEntry::Separator);
        with_watches.append(&mut result);
        result = with_watches;
    }

    if !top.is_empty() {
        let mut with_top: Vec<VarViewEntry> = top.into_iter().map(VarViewEntry::Node).collect();
        with_top.push(VarViewEntry::Separator);
        with_top.append(&mut result);
        result = with_top;
    }

    let ret_nodes = ret_walker.into_sink().nodes;
    if !ret_nodes.is_empty() {
        let mut with_ret: Vec<VarViewEntry> =
            ret_nodes.into_iter().map(VarViewEntry::Node).collect();
        with_ret.append(&mut result);
        result = with_ret;
    }

    result
}

impl FrameVarInfoKeeper {
    /// Registry-level entry point: lazily creates the situation's state and
    /// assembles its view
    pub fn assemble(
        &mut self,
        ssid: &StackSituationId,
        stringifiers: &StringifierRegistry,
        evaluator: &dyn WatchEvaluator,
        locals: &Bindings,
        globals: &Bindings,
    ) -> Vec<VarViewEntry> {
        let frame_var_info = self.frame_var_info(ssid);
        make_var_view(frame_var_info, stringifiers, evaluator, locals, globals)
    }
}
