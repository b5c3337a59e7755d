use ratatui::layout::Rect;

use dingding::world::{Vec2, WORLD_HEIGHT, WORLD_WIDTH};

/// Map a terminal cell to the world point at its center. Cells outside the
/// field are clamped to its edge; `None` when the field has no area yet.
pub fn cell_to_world(field: Rect, column: u16, row: u16) -> Option<Vec2> {
    if field.width == 0 || field.height == 0 {
        return None;
    }

    let col = column.clamp(field.x, field.x + field.width - 1) - field.x;
    let row = row.clamp(field.y, field.y + field.height - 1) - field.y;

    Some(Vec2::new(
        (col as f64 + 0.5) / field.width as f64 * WORLD_WIDTH,
        (row as f64 + 0.5) / field.height as f64 * WORLD_HEIGHT,
    ))
}

/// Canvas coordinates grow upwards, world coordinates downwards
pub fn world_to_canvas(p: Vec2) -> (f64, f64) {
    (p.x, WORLD_HEIGHT - p.y)
}
