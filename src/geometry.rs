//! Integer pixel geometry
//!
//! Tables are laid out on a pixel grid, so everything here is `i32`.
//! `Rect` follows the usual top-left origin convention: `right()` and
//! `bottom()` are exclusive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<[i32; 4]> for Rect {
    fn from([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<Rect> for [i32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size anchored at the origin
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Same size, moved so that its top-left corner is at `(x, y)`
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Overlapping region of two rects, `None` if they don't overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// Coordinate of a named anchor point on this rect
    pub fn anchor_point(&self, anchor: Anchor) -> (i32, i32) {
        let cx = self.x + self.width / 2;
        let cy = self.y + self.height / 2;
        match anchor {
            Anchor::TopLeft => (self.x, self.y),
            Anchor::MidTop => (cx, self.y),
            Anchor::TopRight => (self.right(), self.y),
            Anchor::MidLeft => (self.x, cy),
            Anchor::Center => (cx, cy),
            Anchor::MidRight => (self.right(), cy),
            Anchor::BottomLeft => (self.x, self.bottom()),
            Anchor::MidBottom => (cx, self.bottom()),
            Anchor::BottomRight => (self.right(), self.bottom()),
        }
    }

    /// Same size, moved so that `anchor` lands on `point`
    pub fn anchored_at(&self, anchor: Anchor, point: (i32, i32)) -> Self {
        let (ax, ay) = self.moved_to(0, 0).anchor_point(anchor);
        self.moved_to(point.0 - ax, point.1 - ay)
    }
}

/// Named anchor point on a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    TopLeft,
    MidTop,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    MidBottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::MidTop,
        Anchor::TopRight,
        Anchor::MidLeft,
        Anchor::Center,
        Anchor::MidRight,
        Anchor::BottomLeft,
        Anchor::MidBottom,
        Anchor::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::MidTop => "midtop",
            Anchor::TopRight => "topright",
            Anchor::MidLeft => "midleft",
            Anchor::Center => "center",
            Anchor::MidRight => "midright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::MidBottom => "midbottom",
            Anchor::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Anchor::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| format!("Unknown anchor: {}", s))
    }
}
