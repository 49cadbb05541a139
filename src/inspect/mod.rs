//! Traversal core of the variables pane
//!
//! The pieces, in data-flow order: [`state`] holds per-path display
//! preferences keyed by the identity paths built in [`path`]; [`walk`] turns
//! a root value into an ordered [`node::VarNode`] sequence using the
//! representation strategies in [`stringify`]; [`frame`] combines locals,
//! the return value, and the [`watch`] expressions into the final sequence.

pub mod frame;
pub mod node;
pub mod path;
pub mod state;
pub mod stringify;
pub mod walk;
pub mod watch;
