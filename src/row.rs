//! Pre-rendered table rows
//!
//! A row's values never change, so its text is rendered exactly once into a
//! transparent strip. Sorting only moves the strip.

use crate::geometry::{Anchor, Rect};
use crate::label::Label;
use crate::record::{Record, Value};
use crate::style::TextStyle;
use crate::surface::Image;
use crate::text::Typesetter;

/// Gap between a value and the right edge of its column
pub const CELL_RIGHT_MARGIN: i32 = 3;

#[derive(Debug, Clone)]
pub struct TableRow {
    values: Vec<Value>,
    image: Image,
    rect: Rect,
}

impl TableRow {
    /// Render `record` into a strip `sum(field_widths)` wide and
    /// `field_height` tall. Values are right-aligned in their columns and
    /// vertically centred.
    pub fn new(
        record: &Record,
        field_widths: &[i32],
        field_height: i32,
        style: &TextStyle,
        typesetter: &mut dyn Typesetter,
    ) -> Self {
        let row_width: i32 = field_widths.iter().sum();
        let mut image = Image::transparent(row_width.max(0) as usize, field_height.max(0) as usize);

        {
            let mut frame = image.frame();
            let mut right = 0;
            for (width, value) in field_widths.iter().zip(record.values()) {
                right += width;
                Label::new(
                    value.to_string(),
                    Anchor::MidRight,
                    (right - CELL_RIGHT_MARGIN, field_height / 2),
                    style,
                )
                .draw(&mut frame, typesetter);
            }
        }

        let rect = image.rect();
        Self {
            values: record.values().cloned().collect(),
            image,
            rect,
        }
    }

    /// Value of the `column`-th field
    pub fn value(&self, column: usize) -> &Value {
        &self.values[column]
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move the row so its top-left corner is at `position`
    pub fn place_at(&mut self, position: (i32, i32)) {
        self.rect = self.rect.moved_to(position.0, position.1);
    }
}
