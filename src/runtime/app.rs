use std::rc::Rc;

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use stat_tables::config::WindowConfig;
use stat_tables::deck::{DeckAction, TableDeck};
use stat_tables::event::InputEvent;

use super::input::{key_from_winit, pointer_button, wheel_events, WheelAccumulator};
use super::renderer::Renderer;

pub struct App {
    deck: TableDeck,
    window_config: WindowConfig,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    mouse_position: (i32, i32),
    wheel: WheelAccumulator,
}

impl App {
    pub fn new(window_config: WindowConfig, deck: TableDeck) -> Self {
        Self {
            deck,
            window_config,
            renderer: None,
            window: None,
            context: None,
            mouse_position: (0, 0),
            wheel: WheelAccumulator::default(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(format!("Stat Tables - {}", self.deck.active_name()))
            .with_inner_size(PhysicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create graphics context: {}", e))?;

        self.renderer = Some(Renderer::new(Rc::clone(&window), &context)?);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Map a winit event to zero or more input events
    fn translate(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        let (x, y) = self.mouse_position;
        match event {
            WindowEvent::CloseRequested => vec![InputEvent::Quit],
            WindowEvent::KeyboardInput { event, .. } => {
                let key = key_from_winit(&event.logical_key);
                match event.state {
                    ElementState::Pressed => vec![InputEvent::KeyPressed(key)],
                    ElementState::Released => vec![InputEvent::KeyReleased(key)],
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x as i32, position.y as i32);
                let (x, y) = self.mouse_position;
                vec![InputEvent::PointerMoved { x, y }]
            }
            WindowEvent::MouseInput { state, button, .. } => match pointer_button(*button) {
                Some(button) => match state {
                    ElementState::Pressed => vec![InputEvent::PointerPressed { button, x, y }],
                    ElementState::Released => vec![InputEvent::PointerReleased { button, x, y }],
                },
                None => Vec::new(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = self.wheel.feed(*delta);
                wheel_events(notches, x, y).collect()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.render(&self.deck) {
                tracing::error!("Render failed: {}", e);
            }
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to open window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match &event {
            WindowEvent::RedrawRequested => {
                self.render();
                return;
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::error!("{}", e);
                    }
                }
                self.request_redraw();
                return;
            }
            _ => {}
        }

        let mut redraw = false;
        for input in self.translate(&event) {
            match self.deck.handle_event(&input) {
                DeckAction::Quit => {
                    tracing::info!("Exiting");
                    event_loop.exit();
                    return;
                }
                DeckAction::Switched(_) => {
                    if let Some(window) = &self.window {
                        window.set_title(&format!("Stat Tables - {}", self.deck.active_name()));
                    }
                    redraw = true;
                }
                DeckAction::Redraw => redraw = true,
                DeckAction::None => {}
            }
        }

        if redraw {
            self.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
