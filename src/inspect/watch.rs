//! Watch expressions and the evaluation seam
//!
//! A watch is stored source text, re-evaluated against the current bindings
//! on every frame assembly. Evaluation itself belongs to the surrounding
//! debugger and is injected through [`WatchEvaluator`]; a failed evaluation
//! never aborts assembly — the caller substitutes the `<error>` sentinel.
//!
//! [`LookupEvaluator`] is the bundled evaluator: it resolves chains of the
//! form `name`, `.member`, `[3]`, `["key"]` through the same reflection
//! probes the traversal uses. Hosts with a real expression engine supply
//! their own implementation.

use crate::reflect::{Bindings, Key, Reflect};
use std::fmt;
use std::rc::Rc;

/// A stored watch expression
#[derive(Debug, Clone, PartialEq)]
pub struct WatchExpression {
    pub expression: String,
}

impl WatchExpression {
    pub fn new(expression: &str) -> Self {
        WatchExpression {
            expression: expression.to_string(),
        }
    }
}

/// Watch evaluation failure; the message is diagnostic only
#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    fn new(message: impl Into<String>) -> Self {
        EvalError {
            message: message.into(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

/// Evaluates a watch expression against (globals, locals)
pub trait WatchEvaluator {
    fn eval(
        &self,
        expression: &str,
        globals: &Bindings,
        locals: &Bindings,
    ) -> Result<Rc<dyn Reflect>, EvalError>;
}

/// Resolves `name(.member | [int] | ["key"])*` chains over the bindings
pub struct LookupEvaluator;

impl WatchEvaluator for LookupEvaluator {
    fn eval(
        &self,
        expression: &str,
        globals: &Bindings,
        locals: &Bindings,
    ) -> Result<Rc<dyn Reflect>, EvalError> {
        let expr = expression.trim();
        let (name, mut rest) = take_identifier(expr)
            .ok_or_else(|| EvalError::new(format!("cannot parse expression {:?}", expr)))?;

        let mut value: Rc<dyn Reflect> = locals
            .get(name)
            .or_else(|| globals.get(name))
            .cloned()
            .ok_or_else(|| EvalError::new(format!("name {:?} is not defined", name)))?;

        while !rest.is_empty() {
            if let Some(after_dot) = rest.strip_prefix('.') {
                let (member, tail) = take_identifier(after_dot)
                    .ok_or_else(|| EvalError::new(format!("expected member name in {:?}", expr)))?;
                value = value
                    .member(member)
                    .map_err(|err| EvalError::new(format!("member {:?}: {}", member, err)))?;
                rest = tail;
            } else if let Some(after_bracket) = rest.strip_prefix('[') {
                let close = after_bracket
                    .find(']')
                    .ok_or_else(|| EvalError::new(format!("unclosed index in {:?}", expr)))?;
                let key = parse_key(after_bracket[..close].trim())
                    .ok_or_else(|| EvalError::new(format!("bad index in {:?}", expr)))?;
                value = value
                    .index(&key)
                    .map_err(|err| EvalError::new(format!("index {}: {}", key.repr(), err)))?;
                rest = &after_bracket[close + 1..];
            } else {
                return Err(EvalError::new(format!(
                    "unsupported expression syntax at {:?}",
                    rest
                )));
            }
        }

        Ok(value)
    }
}

fn take_identifier(text: &str) -> Option<(&str, &str)> {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map_or(text.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    Some((&text[..end], &text[end..]))
}

fn parse_key(text: &str) -> Option<Key> {
    let quoted = (text.starts_with('"') && text.ends_with('"') && text.len() >= 2)
        || (text.starts_with('\'') && text.ends_with('\'') && text.len() >= 2);
    if quoted {
        return Some(Key::Str(text[1..text.len() - 1].to_string()));
    }
    text.parse::<i64>().ok().map(Key::Int)
}
