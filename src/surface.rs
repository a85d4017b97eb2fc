//! Raster surfaces and drawing primitives
//!
//! `Frame` wraps a borrowed ARGB pixel buffer (the window's back buffer or
//! an off-screen image) and provides a small, safe drawing API. `Image`
//! owns a buffer and is what the table pre-renders rows and headers into.
//!
//! All coordinates are in pixels. Out-of-bounds operations are clipped.

use crate::geometry::Rect;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). The alpha value from the
/// foreground color determines the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Composite `fg` over `bg` with straight (non-premultiplied) alpha.
///
/// Unlike [`blend_colors`] the destination may itself be translucent, which
/// is the case while drawing text into a transparent row image.
#[inline]
pub fn composite_over(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_a = ((bg >> 24) & 0xFF) as f32 / 255.0;
    if bg_a >= 1.0 {
        return blend_colors(bg, fg, alpha);
    }
    let out_a = alpha + bg_a * (1.0 - alpha);
    if out_a <= 0.0 {
        return 0;
    }

    let channel = |shift: u32| {
        let f = ((fg >> shift) & 0xFF) as f32;
        let b = ((bg >> shift) & 0xFF) as f32;
        (((f * alpha + b * bg_a * (1.0 - alpha)) / out_a).round() as u32).min(255)
    };

    let a = ((out_a * 255.0).round() as u32).min(255);
    (a << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// Pixel span in buffer coordinates (inclusive start, exclusive end)
#[derive(Clone, Copy, Debug)]
struct Span {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing safe drawing primitives.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            // Buffer is smaller than expected - recalculate height to fit
            let adjusted_height = actual_size / width;
            (width, adjusted_height)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
        }
    }

    /// Get the frame width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the frame height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Intersect a rect with the frame
    fn span(&self, rect: Rect) -> Option<Span> {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = (rect.right().max(0) as usize).min(self.width);
        let y1 = (rect.bottom().max(0) as usize).min(self.height);
        (x1 > x0 && y1 > y0).then_some(Span { x0, y0, x1, y1 })
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let Some(span) = self.span(rect) else {
            return;
        };
        for y in span.y0..span.y1 {
            let row_start = y * self.width;
            self.buffer[row_start + span.x0..row_start + span.x1].fill(color);
        }
    }

    /// Draw a rectangle outline `weight` pixels thick, inside the rect's
    /// edges. Nothing is drawn for a weight of zero.
    pub fn draw_outline(&mut self, rect: Rect, weight: i32, color: u32) {
        if weight <= 0 {
            return;
        }
        if weight * 2 >= rect.width || weight * 2 >= rect.height {
            self.fill_rect(rect, color);
            return;
        }
        // Top
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, weight), color);
        // Bottom
        self.fill_rect(
            Rect::new(rect.x, rect.bottom() - weight, rect.width, weight),
            color,
        );
        // Left
        self.fill_rect(Rect::new(rect.x, rect.y, weight, rect.height), color);
        // Right
        self.fill_rect(
            Rect::new(rect.right() - weight, rect.y, weight, rect.height),
            color,
        );
    }

    /// Horizontal line from `x0` to `x1` (exclusive) centred on `y`.
    /// Lines with a weight of zero are not drawn.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, weight: i32, color: u32) {
        if weight <= 0 {
            return;
        }
        self.fill_rect(Rect::new(x0, y - weight / 2, x1 - x0, weight), color);
    }

    /// Vertical line from `y0` to `y1` (exclusive) centred on `x`
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, weight: i32, color: u32) {
        if weight <= 0 {
            return;
        }
        self.fill_rect(Rect::new(x - weight / 2, y0, weight, y1 - y0), color);
    }

    /// Composite `color` onto a pixel with an explicit coverage in 0..=1,
    /// ignoring the color's own alpha byte
    #[inline]
    pub fn cover_pixel(&mut self, x: usize, y: usize, color: u32, coverage: f32) {
        if x >= self.width || y >= self.height || coverage <= 0.0 {
            return;
        }

        let idx = y * self.width + x;
        if coverage >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
            return;
        }
        self.buffer[idx] = composite_over(self.buffer[idx], color, coverage);
    }

    /// Composite a whole image with its top-left corner at `(x, y)`
    pub fn blit(&mut self, image: &Image, x: i32, y: i32) {
        self.blit_region(image, image.rect(), x, y);
    }

    /// Composite the `src` region of an image with its top-left corner at
    /// `(x, y)`. The region is clipped to the image first.
    pub fn blit_region(&mut self, image: &Image, src: Rect, x: i32, y: i32) {
        let Some(src) = src.intersection(&image.rect()) else {
            return;
        };
        let Some(dst) = self.span(Rect::new(x, y, src.width, src.height)) else {
            return;
        };

        for dy in dst.y0..dst.y1 {
            let sy = (src.y + (dy as i32 - y)) as usize;
            let src_row = &image.pixels[sy * image.width..(sy + 1) * image.width];
            let row_start = dy * self.width;
            for dx in dst.x0..dst.x1 {
                let sx = (src.x + (dx as i32 - x)) as usize;
                let pixel = src_row[sx];
                match pixel >> 24 {
                    0 => {}
                    0xFF => self.buffer[row_start + dx] = pixel,
                    a => {
                        let idx = row_start + dx;
                        self.buffer[idx] = composite_over(self.buffer[idx], pixel, a as f32 / 255.0);
                    }
                }
            }
        }
    }
}

/// An owned off-screen pixel buffer (ARGB, row-major)
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Image {
    /// Create an image filled with a solid color
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Create a fully transparent image
    pub fn transparent(width: usize, height: usize) -> Self {
        Self::new(width, height, 0)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds of the image, anchored at the origin
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, 0 if out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    /// Borrow the image as a drawable frame
    pub fn frame(&mut self) -> Frame<'_> {
        Frame::new(&mut self.pixels, self.width, self.height)
    }
}
