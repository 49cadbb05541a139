//! Text layout and styling for the variables pane
//!
//! [`render`] lays display nodes out into exact lines and attribute runs;
//! [`theme`] maps attributes to ratatui styles; [`width`] keeps all of it in
//! display columns.

pub mod render;
pub mod theme;
pub mod width;
