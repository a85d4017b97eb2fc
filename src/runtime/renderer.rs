//! softbuffer presentation of the table deck

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use softbuffer::Surface;
use winit::window::Window;

use stat_tables::deck::TableDeck;
use stat_tables::surface::Frame;

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so we draw here and copy to the surface on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Rc<Window>, context: &softbuffer::Context<Rc<Window>>) -> Result<Self> {
        let size = window.inner_size();
        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        let mut renderer = Self {
            surface,
            back_buffer: Vec::new(),
            width: 0,
            height: 0,
        };
        renderer.resize(size.width, size.height)?;
        Ok(renderer)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            // Minimized; keep the old buffer until we get a real size
            return Ok(());
        };
        if width == self.width && height == self.height {
            return Ok(());
        }

        self.surface
            .resize(w, h)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        self.width = width;
        self.height = height;
        self.back_buffer.resize((width as usize) * (height as usize), 0);
        tracing::debug!("Surface resized to {}x{}", width, height);
        Ok(())
    }

    pub fn render(&mut self, deck: &TableDeck) -> Result<()> {
        if self.back_buffer.is_empty() {
            return Ok(());
        }

        let mut frame = Frame::new(
            &mut self.back_buffer,
            self.width as usize,
            self.height as usize,
        );
        deck.draw(&mut frame);

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        buffer.copy_from_slice(&self.back_buffer);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}
