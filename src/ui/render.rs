//! Pure layout of display nodes into lines and attribute runs
//!
//! [`render`] is a function of a [`VarNode`] and an available width only: no
//! hidden state, no value-graph access, safe to call on every repaint. Each
//! produced line comes with a list of [`AttrRun`]s whose widths sum exactly
//! to the line's display width, so a painting layer can color the line
//! without re-measuring text.
//!
//! Layout rules:
//!
//! - nesting depth is shown by one `"| "` marker per level;
//! - non-wrapping nodes render as `label: value` on one line when it fits,
//!   as a label line plus an indented value line when it does not, and any
//!   still-overflowing line is cut to `...`;
//! - wrapping nodes flow `label: value` across as many lines as needed,
//!   continuation lines indented two extra columns past the markers.

use crate::inspect::node::{VarClass, VarNode};
use crate::ui::theme::Theme;
use crate::ui::width::{take_cols, text_width};
use ratatui::text::{Line, Span};

/// One marker of this per nesting level
pub const INDENT_MARKER: &str = "| ";

/// Which half of a node a run of columns belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Label,
    Value,
}

/// Color-attribute selector for a run of columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr {
    pub class: VarClass,
    pub part: Part,
    pub focused: bool,
}

/// A horizontal run of display columns sharing one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrRun {
    pub attr: Attr,
    pub width: usize,
}

/// The laid-out form of one node: lines plus per-line attribute runs, in
/// lockstep
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub lines: Vec<String>,
    pub attrs: Vec<Vec<AttrRun>>,
}

/// Build a run list, dropping zero-width entries
fn runs(parts: &[(Attr, usize)]) -> Vec<AttrRun> {
    parts
        .iter()
        .filter(|(_, width)| *width > 0)
        .map(|&(attr, width)| AttrRun { attr, width })
        .collect()
}

/// Cut a run list down to `cols` total columns
fn clamp_runs(original: &[AttrRun], cols: usize) -> Vec<AttrRun> {
    let mut left = cols;
    let mut clamped = Vec::new();
    for run in original {
        if left == 0 {
            break;
        }
        let width = run.width.min(left);
        clamped.push(AttrRun {
            attr: run.attr,
            width,
        });
        left -= width;
    }
    clamped
}

/// Cut an overflowing line to `maxcol` columns ending in `...`
fn truncate(line: String, attrs: Vec<AttrRun>, maxcol: usize) -> (String, Vec<AttrRun>) {
    if text_width(&line) <= maxcol {
        return (line, attrs);
    }
    if maxcol <= 3 {
        let kept = take_cols(&line, maxcol).0.to_string();
        let width = text_width(&kept);
        let attrs = clamp_runs(&attrs, width);
        return (kept, attrs);
    }
    let text = format!("{}...", take_cols(&line, maxcol - 3).0);
    let width = text_width(&text);
    let attrs = clamp_runs(&attrs, width);
    (text, attrs)
}

/// The node's full text flowed over as many lines as the width requires.
/// Continuation lines carry the depth markers plus two columns of extra
/// indent.
fn wrapped_lines(node: &VarNode, maxcol: usize) -> Vec<String> {
    let prefix = INDENT_MARKER.repeat(node.depth);
    let prefix_cols = text_width(&prefix);

    let alltext = match (node.label.as_deref(), node.value_str.as_deref()) {
        (Some(label), Some(value)) => format!("{}: {}", label, value),
        (Some(label), None) => label.to_string(),
        (None, Some(value)) => value.to_string(),
        (None, None) => String::new(),
    };

    let avail = maxcol.saturating_sub(prefix_cols);
    if avail == 0 {
        return vec![prefix];
    }

    let (chunk, mut rest) = take_cols(&alltext, avail);
    let mut lines = vec![format!("{}{}", prefix, chunk)];

    let cont_avail = avail.saturating_sub(2);
    while !rest.is_empty() {
        let (chunk, tail) = take_cols(rest, cont_avail);
        if chunk.is_empty() {
            // Degenerate width; bail rather than loop.
            break;
        }
        lines.push(format!("{}  {}", prefix, chunk));
        rest = tail;
    }
    lines
}

/// Number of terminal rows [`render`] will produce for this node at this
/// width
pub fn rows(node: &VarNode, maxcol: usize) -> usize {
    render(node, maxcol, false).lines.len()
}

/// Lay the node out at `maxcol` columns. Invariant: for every produced line,
/// the run widths sum to the line's display width.
pub fn render(node: &VarNode, maxcol: usize, focused: bool) -> RenderedNode {
    let label_attr = Attr {
        class: node.class,
        part: Part::Label,
        focused,
    };
    let value_attr = Attr {
        class: node.class,
        part: Part::Value,
        focused,
    };

    let prefix = INDENT_MARKER.repeat(node.depth);
    let lprefix = text_width(&prefix);

    if node.wrap {
        let lines = wrapped_lines(node, maxcol);

        // Columns of the flowed text styled as label: the label itself plus
        // its ": " joiner when a value follows.
        let label_cols = match (node.label.as_deref(), node.value_str.as_deref()) {
            (Some(label), Some(_)) => text_width(label) + 2,
            (Some(label), None) => text_width(label),
            (None, _) => 0,
        };

        let mut attrs = Vec::with_capacity(lines.len());
        let mut consumed = 0;
        for (i, line) in lines.iter().enumerate() {
            let pad = if i == 0 { lprefix } else { lprefix + 2 };
            let content = text_width(line).saturating_sub(pad);
            let label_here = label_cols.saturating_sub(consumed).min(content);
            attrs.push(runs(&[
                (label_attr, pad + label_here),
                (value_attr, content - label_here),
            ]));
            consumed += content;
        }

        let (lines, attrs) = lines
            .into_iter()
            .zip(attrs)
            .map(|(line, attrs)| truncate(line, attrs, maxcol))
            .unzip();
        return RenderedNode { lines, attrs };
    }

    let (lines, attrs): (Vec<String>, Vec<Vec<AttrRun>>) =
        match (node.label.as_deref(), node.value_str.as_deref()) {
            (Some(label), Some(value)) => {
                let lw = text_width(label);
                let vw = text_width(value);
                if lprefix + lw + 2 + vw <= maxcol {
                    (
                        vec![format!("{}{}: {}", prefix, label, value)],
                        vec![runs(&[(label_attr, lprefix + lw + 2), (value_attr, vw)])],
                    )
                } else {
                    // Label line, then the value on its own indented line.
                    (
                        vec![
                            format!("{}{}:", prefix, label),
                            format!("{}  {}", prefix, value),
                        ],
                        vec![
                            runs(&[(label_attr, lprefix + lw + 1)]),
                            runs(&[(value_attr, lprefix + 2 + vw)]),
                        ],
                    )
                }
            }
            (None, Some(value)) => (
                vec![format!("{}{}", prefix, value)],
                vec![runs(&[(label_attr, lprefix), (value_attr, text_width(value))])],
            ),
            (Some(label), None) => (
                vec![format!("{}{}", prefix, label)],
                vec![runs(&[(label_attr, lprefix + text_width(label))])],
            ),
            (None, None) => (vec![prefix], vec![runs(&[(label_attr, lprefix)])]),
        };

    let (lines, attrs) = lines
        .into_iter()
        .zip(attrs)
        .map(|(line, attrs)| truncate(line, attrs, maxcol))
        .unzip();
    RenderedNode { lines, attrs }
}

/// Turn a rendered node into styled lines, padded with `default`-styled
/// spaces to exactly `maxcol` columns
pub fn to_lines(
    rendered: &RenderedNode,
    maxcol: usize,
    theme: &Theme,
    default: Attr,
) -> Vec<Line<'static>> {
    rendered
        .lines
        .iter()
        .zip(&rendered.attrs)
        .map(|(line, attrs)| {
            let mut spans = Vec::with_capacity(attrs.len() + 1);
            let mut rest = line.as_str();
            for run in attrs {
                let (piece, tail) = take_cols(rest, run.width);
                spans.push(Span::styled(piece.to_string(), theme.style(run.attr)));
                rest = tail;
            }

            let used = text_width(line);
            if used < maxcol {
                spans.push(Span::styled(
                    " ".repeat(maxcol - used),
                    theme.style(default),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

/// Render and style one node in a single call
pub fn node_lines(
    node: &VarNode,
    maxcol: usize,
    focused: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let default = Attr {
        class: node.class,
        part: Part::Value,
        focused,
    };
    to_lines(&render(node, maxcol, focused), maxcol, theme, default)
}

/// The blank divider row between view sections
pub fn separator_line(maxcol: usize, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(maxcol),
        theme.separator_style(),
    ))
}
