//! Single-line text labels positioned by a named anchor point.

use crate::geometry::{Anchor, Rect};
use crate::style::TextStyle;
use crate::surface::Frame;
use crate::text::Typesetter;

/// A line of text whose `anchor` point sits on `target`
#[derive(Debug, Clone)]
pub struct Label<'a> {
    pub text: String,
    pub anchor: Anchor,
    pub target: (i32, i32),
    pub style: &'a TextStyle,
}

impl<'a> Label<'a> {
    pub fn new(
        text: impl Into<String>,
        anchor: Anchor,
        target: (i32, i32),
        style: &'a TextStyle,
    ) -> Self {
        Self {
            text: text.into(),
            anchor,
            target,
            style,
        }
    }

    /// Where the text's bounding box lands
    pub fn rect(&self, typesetter: &mut dyn Typesetter) -> Rect {
        let (width, height) = typesetter.measure(&self.text, self.style);
        Rect::from_size(width, height).anchored_at(self.anchor, self.target)
    }

    pub fn draw(&self, frame: &mut Frame, typesetter: &mut dyn Typesetter) {
        let rect = self.rect(typesetter);
        typesetter.draw(frame, rect.x, rect.y, &self.text, self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::surface::Image;
    use crate::text::BlockGlyphs;

    #[test]
    fn test_midright_label_ends_at_target() {
        let style = TextStyle::new(None, 10, Color::BLACK);
        let label = Label::new("1234", Anchor::MidRight, (100, 15), &style);
        assert_eq!(label.rect(&mut BlockGlyphs), Rect::new(80, 10, 20, 10));
    }

    #[test]
    fn test_center_label_draws_around_target() {
        let style = TextStyle::new(None, 10, Color::rgb(255, 0, 0));
        let mut image = Image::transparent(40, 20);
        Label::new("ab", Anchor::Center, (20, 10), &style).draw(&mut image.frame(), &mut BlockGlyphs);

        // Box is 10x10 centred on (20, 10): x 15..25, y 5..15
        assert_eq!(image.pixel(15, 5), 0xFFFF0000);
        assert_eq!(image.pixel(14, 5), 0);
        assert_eq!(image.pixel(23, 14), 0xFFFF0000);
        assert_eq!(image.pixel(20, 4), 0);
    }
}
