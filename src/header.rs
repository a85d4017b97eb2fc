//! Clickable column headers and the sort-direction toggle.

use std::fmt;

use crate::geometry::{Anchor, Rect};
use crate::label::Label;
use crate::style::ResolvedStyle;
use crate::surface::{Frame, Image};
use crate::text::Typesetter;

/// Sort order of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Ascending,
    /// Initial direction of every header
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// Header for one field. Clicking it sorts the table by that field;
/// further clicks toggle the order.
#[derive(Debug, Clone)]
pub struct FieldHeader {
    field_name: String,
    image: Image,
    rect: Rect,
    pub direction: SortDirection,
    pub selected: bool,
}

impl FieldHeader {
    /// Render the header for `field_name`: background fill, centred label
    /// and an outline in the table's line color. `top_left` is the header's
    /// screen position.
    pub fn new(
        field_name: &str,
        top_left: (i32, i32),
        width: i32,
        style: &ResolvedStyle,
        typesetter: &mut dyn Typesetter,
    ) -> Self {
        let height = style.header_height;
        let mut image = Image::new(
            width.max(0) as usize,
            height.max(0) as usize,
            style.bg_color.to_argb_u32(),
        );

        {
            let mut frame = image.frame();
            Label::new(
                field_name,
                Anchor::Center,
                (width / 2, height / 2),
                &style.header_text,
            )
            .draw(&mut frame, typesetter);
            frame.draw_outline(
                Rect::from_size(width, height),
                style.line_weight,
                style.line_color.to_argb_u32(),
            );
        }

        Self {
            field_name: field_name.to_string(),
            image,
            rect: Rect::new(top_left.0, top_left.1, width, height),
            direction: SortDirection::Descending,
            selected: false,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Screen-space hit rect
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.blit(&self.image, self.rect.x, self.rect.y);
    }
}

/// Apply a click on `headers[index]` and return the direction to sort in.
///
/// Clicking the selected header flips its direction. Clicking any other
/// header selects it (deselecting the rest) and resets it to descending.
pub fn click_header(headers: &mut [FieldHeader], index: usize) -> SortDirection {
    if headers[index].selected {
        headers[index].direction = headers[index].direction.flipped();
    } else {
        for header in headers.iter_mut() {
            header.selected = false;
        }
        headers[index].selected = true;
        headers[index].direction = SortDirection::Descending;
    }
    headers[index].direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TableStyle;
    use crate::text::BlockGlyphs;

    fn headers(names: &[&str]) -> Vec<FieldHeader> {
        let style = TableStyle::default().resolve().unwrap();
        let mut left = 0;
        names
            .iter()
            .map(|name| {
                let header = FieldHeader::new(name, (left, 0), 100, &style, &mut BlockGlyphs);
                left += 100;
                header
            })
            .collect()
    }

    #[test]
    fn test_new_header_defaults() {
        let hs = headers(&["Name", "GDP"]);
        assert!(hs.iter().all(|h| !h.selected));
        assert!(hs.iter().all(|h| h.direction == SortDirection::Descending));
        assert_eq!(hs[1].rect(), Rect::new(100, 0, 100, 48));
    }

    #[test]
    fn test_first_click_selects_descending() {
        let mut hs = headers(&["Name", "GDP"]);
        assert_eq!(click_header(&mut hs, 1), SortDirection::Descending);
        assert!(hs[1].selected);
        assert!(!hs[0].selected);
    }

    #[test]
    fn test_repeat_click_toggles() {
        let mut hs = headers(&["Name", "GDP"]);
        click_header(&mut hs, 0);
        assert_eq!(click_header(&mut hs, 0), SortDirection::Ascending);
        assert_eq!(click_header(&mut hs, 0), SortDirection::Descending);
    }

    #[test]
    fn test_switching_column_resets_direction() {
        let mut hs = headers(&["Name", "GDP"]);
        click_header(&mut hs, 0);
        click_header(&mut hs, 0);
        assert_eq!(hs[0].direction, SortDirection::Ascending);

        assert_eq!(click_header(&mut hs, 1), SortDirection::Descending);
        assert!(!hs[0].selected);

        // Coming back starts over at descending
        assert_eq!(click_header(&mut hs, 0), SortDirection::Descending);
    }

    #[test]
    fn test_header_image_has_outline_and_background() {
        let style = TableStyle::default().resolve().unwrap();
        let h = FieldHeader::new("", (0, 0), 100, &style, &mut BlockGlyphs);
        assert_eq!(h.image().pixel(0, 0), style.line_color.to_argb_u32());
        assert_eq!(h.image().pixel(99, 47), style.line_color.to_argb_u32());
        assert_eq!(h.image().pixel(50, 24), style.bg_color.to_argb_u32());
    }
}
