//! # Introduction
//!
//! varscope is the variables-pane core of a terminal program inspector: it
//! takes an arbitrary live value graph — local bindings, a return value,
//! user watch expressions — and produces an ordered, indentable sequence of
//! display nodes, then lays each node out into exact line/column text with
//! color-attribute boundaries for a fixed-width surface built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Bindings → ValueWalker (+ InspectInfo state) → VarNodes → render → lines + spans
//! ```
//!
//! 1. [`reflect`] — the capability-probe seam over inspected values, plus
//!    the concrete tagged [`reflect::value::Value`] graph.
//! 2. [`inspect`] — identity paths, per-path inspection state kept per
//!    stack situation, the recursive traversal engine with its node sinks,
//!    stringification strategies, and frame assembly.
//! 3. [`ui`] — the pure display-node renderer (wrapping, truncation,
//!    attribute runs) and the theme that turns runs into styles.
//!
//! The core is single-threaded and synchronous; every traversal either runs
//! to completion or is bounded by the every-10-elements pagination policy.
//! Nothing in it is fatal: representation, reflection, and watch-evaluation
//! failures are logged and replaced by visible, bounded substitutes.

pub mod inspect;
pub mod reflect;
pub mod ui;
