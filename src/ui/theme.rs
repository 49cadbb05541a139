use crate::inspect::node::VarClass;
use crate::ui::render::{Attr, Part};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub var_label: Color,   // Blue
    pub var_value: Color,
    pub return_label: Color, // Pink, return values stand out
    pub return_value: Color,
    pub watch_label: Color, // Orange
    pub watch_value: Color,
    pub highlighted_label: Color, // Yellow
    pub highlighted_value: Color,
    pub focused_bg: Color, // Slightly lighter BG for the focused row
    pub separator: Color,  // Grey
}

pub const DEFAULT_THEME: Theme = Theme {
    var_label: Color::Rgb(137, 180, 250),
    var_value: Color::Rgb(205, 214, 244),
    return_label: Color::Rgb(245, 194, 231),
    return_value: Color::Rgb(245, 194, 231),
    watch_label: Color::Rgb(250, 179, 135),
    watch_value: Color::Rgb(205, 214, 244),
    highlighted_label: Color::Rgb(249, 226, 175),
    highlighted_value: Color::Rgb(249, 226, 175),
    focused_bg: Color::Rgb(50, 50, 70),
    separator: Color::Rgb(108, 112, 134),
};

impl Theme {
    pub fn style(&self, attr: Attr) -> Style {
        let fg = match (attr.class, attr.part) {
            (VarClass::Var, Part::Label) => self.var_label,
            (VarClass::Var, Part::Value) => self.var_value,
            (VarClass::Return, Part::Label) => self.return_label,
            (VarClass::Return, Part::Value) => self.return_value,
            (VarClass::Watch, Part::Label) => self.watch_label,
            (VarClass::Watch, Part::Value) => self.watch_value,
            (VarClass::Highlighted, Part::Label) => self.highlighted_label,
            (VarClass::Highlighted, Part::Value) => self.highlighted_value,
        };

        let style = Style::default().fg(fg);
        if attr.focused {
            style.bg(self.focused_bg).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn separator_style(&self) -> Style {
        Style::default().fg(self.separator)
    }
}
