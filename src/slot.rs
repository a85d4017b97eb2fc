//! Row slots: the fixed vertical positions sorted rows are placed into.

use crate::geometry::Rect;

/// One row position in table-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    /// 0 is the top row
    pub index: usize,
    pub position: (i32, i32),
    pub size: (i32, i32),
}

impl RowSlot {
    pub fn top_left(&self) -> (i32, i32) {
        self.position
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.0, self.position.1, self.size.0, self.size.1)
    }
}

/// Stack `count` slots directly below the header band
pub fn layout_slots(
    count: usize,
    row_width: i32,
    field_height: i32,
    header_height: i32,
) -> Vec<RowSlot> {
    (0..count)
        .map(|index| RowSlot {
            index,
            position: (0, header_height + index as i32 * field_height),
            size: (row_width, field_height),
        })
        .collect()
}
