//! Toolkit-independent input events
//!
//! The runtime translates window-system events into these; tables and the
//! deck only ever see this model. Wheel motion arrives as a release of
//! `WheelUp`/`WheelDown`, one event per notch.

/// Keys the table layer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Escape,
    /// A character key, lowercased
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyPressed(Key),
    KeyReleased(Key),
    PointerPressed {
        button: PointerButton,
        x: i32,
        y: i32,
    },
    PointerReleased {
        button: PointerButton,
        x: i32,
        y: i32,
    },
    PointerMoved {
        x: i32,
        y: i32,
    },
}

impl InputEvent {
    pub fn click(x: i32, y: i32) -> Self {
        InputEvent::PointerReleased {
            button: PointerButton::Primary,
            x,
            y,
        }
    }

    pub fn wheel_up() -> Self {
        InputEvent::PointerReleased {
            button: PointerButton::WheelUp,
            x: 0,
            y: 0,
        }
    }

    pub fn wheel_down() -> Self {
        InputEvent::PointerReleased {
            button: PointerButton::WheelDown,
            x: 0,
            y: 0,
        }
    }
}
