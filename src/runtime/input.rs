//! Translation from winit events to the table library's input model
//!
//! Keys are reduced to the handful tables care about. Wheel motion is
//! accumulated and reported as whole notches, each becoming one
//! `WheelUp`/`WheelDown` release at the pointer position.

use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, NamedKey};

use stat_tables::event::{InputEvent, Key, PointerButton};

/// Pixel distance that counts as one wheel notch for touchpad scrolling
pub const NOTCH_PIXELS: f64 = 16.0;

pub fn key_from_winit(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::ArrowUp) => Key::Up,
        WinitKey::Named(NamedKey::ArrowDown) => Key::Down,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Character(s) => s
            .chars()
            .next()
            .map(|c| Key::Char(c.to_ascii_lowercase()))
            .unwrap_or(Key::Other),
        _ => Key::Other,
    }
}

pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Accumulates fractional wheel motion into notches
#[derive(Debug, Default)]
pub struct WheelAccumulator {
    pixels: f64,
}

impl WheelAccumulator {
    /// Feed a scroll delta; returns whole notches, positive meaning up
    pub fn feed(&mut self, delta: MouseScrollDelta) -> i32 {
        self.pixels += match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64 * NOTCH_PIXELS,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        let notches = (self.pixels / NOTCH_PIXELS).trunc();
        self.pixels -= notches * NOTCH_PIXELS;
        notches as i32
    }
}

/// One wheel release per notch at `(x, y)`
pub fn wheel_events(notches: i32, x: i32, y: i32) -> impl Iterator<Item = InputEvent> {
    let button = if notches > 0 {
        PointerButton::WheelUp
    } else {
        PointerButton::WheelDown
    };
    (0..notches.unsigned_abs()).map(move |_| InputEvent::PointerReleased { button, x, y })
}
