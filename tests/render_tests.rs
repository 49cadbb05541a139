use varscope::inspect::node::{VarClass, VarNode};
use varscope::ui::render::{node_lines, render, rows, Part};
use varscope::ui::theme::DEFAULT_THEME;
use varscope::ui::width::text_width;

fn node(label: Option<&str>, value: Option<&str>, depth: usize, wrap: bool) -> VarNode {
    VarNode {
        label: label.map(str::to_string),
        value_str: value.map(str::to_string),
        depth,
        id_path: None,
        class: VarClass::Var,
        watch_expr: None,
        wrap,
    }
}

fn run_widths(rendered: &varscope::ui::render::RenderedNode, line: usize) -> Vec<usize> {
    rendered.attrs[line].iter().map(|r| r.width).collect()
}

fn assert_runs_cover_lines(rendered: &varscope::ui::render::RenderedNode) {
    assert_eq!(rendered.lines.len(), rendered.attrs.len());
    for (line, attrs) in rendered.lines.iter().zip(&rendered.attrs) {
        let total: usize = attrs.iter().map(|r| r.width).sum();
        assert_eq!(total, text_width(line), "runs must cover {:?} exactly", line);
    }
}

#[test]
fn test_short_node_is_one_line() {
    let n = node(Some("x"), Some("42"), 0, false);
    let rendered = render(&n, 80, false);

    assert_eq!(rendered.lines, vec!["x: 42".to_string()]);
    assert_eq!(run_widths(&rendered, 0), vec![3, 2]);
    assert_eq!(rendered.attrs[0][0].attr.part, Part::Label);
    assert_eq!(rendered.attrs[0][1].attr.part, Part::Value);
    assert!(!rendered.attrs[0][0].attr.focused);
    assert_runs_cover_lines(&rendered);
    assert_eq!(rows(&n, 80), 1);
}

#[test]
fn test_render_is_pure_and_repeatable() {
    let n = node(Some("xs"), Some("list (3)"), 2, false);
    assert_eq!(render(&n, 24, true), render(&n, 24, true));
}

#[test]
fn test_depth_is_shown_by_markers() {
    let n = node(Some("x"), Some("1"), 2, false);
    let rendered = render(&n, 80, false);

    assert_eq!(rendered.lines, vec!["| | x: 1".to_string()]);
    // The markers are styled as part of the label run.
    assert_eq!(run_widths(&rendered, 0), vec![7, 1]);
}

#[test]
fn test_overflow_splits_into_label_and_value_lines() {
    let n = node(Some("alpha"), Some("0123456789"), 0, false);
    let rendered = render(&n, 12, false);

    assert_eq!(
        rendered.lines,
        vec!["alpha:".to_string(), "  0123456789".to_string()]
    );
    assert_eq!(run_widths(&rendered, 0), vec![6]);
    assert_eq!(rendered.attrs[0][0].attr.part, Part::Label);
    assert_eq!(run_widths(&rendered, 1), vec![12]);
    assert_eq!(rendered.attrs[1][0].attr.part, Part::Value);
    assert_runs_cover_lines(&rendered);
    assert_eq!(rows(&n, 12), 2);
}

#[test]
fn test_overflowing_value_line_is_truncated() {
    let n = node(Some("a"), Some("abcdefghijklmnopqrstuvwxyz1234"), 0, false);
    let rendered = render(&n, 12, false);

    assert_eq!(rendered.lines.len(), 2);
    let value_line = &rendered.lines[1];
    assert!(value_line.ends_with("..."));
    assert_eq!(text_width(value_line), 12);
    assert_eq!(value_line, "  abcdefg...");
    assert_runs_cover_lines(&rendered);
}

#[test]
fn test_label_only_node() {
    let n = node(Some("<empty>"), None, 1, false);
    let rendered = render(&n, 80, false);

    assert_eq!(rendered.lines, vec!["| <empty>".to_string()]);
    assert_eq!(run_widths(&rendered, 0), vec![9]);
    assert_eq!(rendered.attrs[0][0].attr.part, Part::Label);
    assert_eq!(rows(&n, 80), 1);
}

#[test]
fn test_value_only_node() {
    let n = node(None, Some("42"), 1, false);
    let rendered = render(&n, 80, false);

    assert_eq!(rendered.lines, vec!["| 42".to_string()]);
    assert_eq!(run_widths(&rendered, 0), vec![2, 2]);
    assert_eq!(rendered.attrs[0][0].attr.part, Part::Label);
    assert_eq!(rendered.attrs[0][1].attr.part, Part::Value);
}

#[test]
fn test_wrap_flows_across_lines() {
    let value: String = "0123456789".repeat(5); // 50 columns
    let n = node(Some("alpha"), Some(&value), 0, true);
    let rendered = render(&n, 20, false);

    // 7 label columns + 50 value columns: 20 on the first line, then
    // 18-column chunks behind a 2-column indent.
    assert_eq!(rendered.lines.len(), 4);
    assert_eq!(rendered.lines[0], "alpha: 0123456789012");
    assert!(rendered.lines[1].starts_with("  "));
    assert_eq!(text_width(&rendered.lines[1]), 20);
    assert_eq!(text_width(&rendered.lines[3]), 3);

    // The label run covers "alpha: " and nothing past it.
    assert_eq!(run_widths(&rendered, 0), vec![7, 13]);
    assert_eq!(rendered.attrs[0][0].attr.part, Part::Label);
    assert_runs_cover_lines(&rendered);
    assert_eq!(rows(&n, 20), 4);
}

#[test]
fn test_wrap_label_can_span_lines() {
    let label = "a".repeat(30);
    let n = node(Some(&label), Some("val"), 0, true);
    let rendered = render(&n, 20, false);

    assert_eq!(rendered.lines.len(), 2);
    assert_eq!(text_width(&rendered.lines[0]), 20);
    assert_eq!(text_width(&rendered.lines[1]), 17);

    // First line is label throughout; the boundary falls on the second.
    assert_eq!(run_widths(&rendered, 0), vec![20]);
    assert_eq!(rendered.attrs[0][0].attr.part, Part::Label);
    assert_eq!(run_widths(&rendered, 1), vec![14, 3]);
    assert_eq!(rendered.attrs[1][1].attr.part, Part::Value);
    assert_runs_cover_lines(&rendered);
}

#[test]
fn test_wrap_fitting_text_is_single_line() {
    let n = node(Some("x"), Some("42"), 0, true);
    let rendered = render(&n, 80, false);

    assert_eq!(rendered.lines, vec!["x: 42".to_string()]);
    assert_eq!(run_widths(&rendered, 0), vec![3, 2]);
    assert_eq!(rows(&n, 80), 1);
}

#[test]
fn test_wide_characters_count_as_two_columns() {
    let n = node(Some("あ"), Some("x"), 0, false);
    let rendered = render(&n, 80, false);

    assert_eq!(rendered.lines, vec!["あ: x".to_string()]);
    assert_eq!(run_widths(&rendered, 0), vec![4, 1]);
    assert_runs_cover_lines(&rendered);
}

#[test]
fn test_focus_flag_reaches_every_run() {
    let n = node(Some("alpha"), Some("0123456789"), 1, false);
    let rendered = render(&n, 12, true);

    for attrs in &rendered.attrs {
        for run in attrs {
            assert!(run.attr.focused);
            assert_eq!(run.attr.class, VarClass::Var);
        }
    }
}

#[test]
fn test_styled_lines_pad_to_full_width() {
    let n = node(Some("x"), Some("42"), 0, false);
    for maxcol in [10usize, 20, 80] {
        let lines = node_lines(&n, maxcol, false, &DEFAULT_THEME);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width(), maxcol);
    }
}
