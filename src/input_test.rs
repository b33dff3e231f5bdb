#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

#[test]
fn default_tool_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn default_state_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::default().is_drawing());
}

#[test]
fn active_variants_count_as_drawing() {
    let start = Point::new(0.0, 0.0);
    assert!(InputState::DrawingLine { start }.is_drawing());
    assert!(InputState::DrawingCircle { center: start }.is_drawing());
    assert!(InputState::Sketching { points: vec![start] }.is_drawing());
    let original = Segment::new(start, Point::new(100.0, 0.0));
    assert!(InputState::DraggingEndpoint { anchor: start, original }.is_drawing());
}

#[test]
fn default_ui_state_has_no_selection() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.selected_point.is_none());
}
