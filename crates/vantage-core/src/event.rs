//! Host-independent pointer event records.
//!
//! Hosts translate their native events into [`PointerEvent`] before handing
//! them to the diagram, so diagram behaviors never depend on a particular
//! UI toolkit.

use serde::Deserialize;

use crate::geometry::Point;

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Modifier keys held while the event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Returns true if no modifier key is held
    pub fn is_empty(self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.meta)
    }
}

/// A pointer event in client (screen) coordinates.
///
/// `button` is the button that changed state (`0` primary, `1` auxiliary,
/// `2` secondary, `-1` none) and `buttons` is the bit mask of all buttons
/// currently held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    client_position: Point,
    button: i16,
    buttons: u16,
    modifiers: Modifiers,
    pointer_id: i64,
    pointer_type: PointerType,
    is_primary: bool,
}

impl PointerEvent {
    /// Creates an event for the primary mouse pointer.
    pub fn new(client_position: Point) -> Self {
        Self {
            client_position,
            button: 0,
            buttons: 0,
            modifiers: Modifiers::default(),
            pointer_id: 0,
            pointer_type: PointerType::Mouse,
            is_primary: true,
        }
    }

    pub fn with_button(mut self, button: i16, buttons: u16) -> Self {
        self.button = button;
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_pointer(mut self, pointer_id: i64, pointer_type: PointerType, is_primary: bool) -> Self {
        self.pointer_id = pointer_id;
        self.pointer_type = pointer_type;
        self.is_primary = is_primary;
        self
    }

    pub fn client_position(&self) -> Point {
        self.client_position
    }

    pub fn button(&self) -> i16 {
        self.button
    }

    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn pointer_id(&self) -> i64 {
        self.pointer_id
    }

    pub fn pointer_type(&self) -> PointerType {
        self.pointer_type
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}
