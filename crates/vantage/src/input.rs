//! Host event records and their translation to diagram events.
//!
//! Hosts fill [`HostPointerEvent`] / [`HostMouseEvent`] from their native
//! event objects. The renderer converts them into
//! [`PointerEvent`](vantage_core::event::PointerEvent) before forwarding them
//! to the diagram.

use vantage_core::{
    event::{Modifiers, PointerEvent, PointerType},
    geometry::Point,
};

/// What the host should do with an event after the renderer handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the event bubble to outer elements.
    Continue,
    /// Stop the event at the node element.
    Stop,
}

/// A pointer event as reported by a host, modeled after DOM `PointerEvent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostPointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub button: i16,
    pub buttons: u16,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    pub pointer_id: i64,
    /// `"mouse"`, `"pen"` or `"touch"`; anything else is treated as a mouse.
    pub pointer_type: String,
    pub is_primary: bool,
}

/// A mouse event as reported by a host, modeled after DOM `MouseEvent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMouseEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub button: i16,
    pub buttons: u16,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

fn pointer_type(name: &str) -> PointerType {
    match name {
        "pen" => PointerType::Pen,
        "touch" => PointerType::Touch,
        _ => PointerType::Mouse,
    }
}

impl From<&HostPointerEvent> for PointerEvent {
    fn from(event: &HostPointerEvent) -> Self {
        PointerEvent::new(Point::new(event.client_x as f32, event.client_y as f32))
            .with_button(event.button, event.buttons)
            .with_modifiers(Modifiers {
                ctrl: event.ctrl_key,
                shift: event.shift_key,
                alt: event.alt_key,
                meta: event.meta_key,
            })
            .with_pointer(
                event.pointer_id,
                pointer_type(&event.pointer_type),
                event.is_primary,
            )
    }
}

impl From<&HostMouseEvent> for PointerEvent {
    fn from(event: &HostMouseEvent) -> Self {
        PointerEvent::new(Point::new(event.client_x as f32, event.client_y as f32))
            .with_button(event.button, event.buttons)
            .with_modifiers(Modifiers {
                ctrl: event.ctrl_key,
                shift: event.shift_key,
                alt: event.alt_key,
                meta: event.meta_key,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_translation() {
        let host = HostPointerEvent {
            client_x: 120.5,
            client_y: 40.0,
            button: 0,
            buttons: 1,
            ctrl_key: true,
            pointer_id: 3,
            pointer_type: "pen".to_string(),
            is_primary: true,
            ..HostPointerEvent::default()
        };

        let event = PointerEvent::from(&host);

        assert_eq!(event.client_position(), Point::new(120.5, 40.0));
        assert_eq!(event.buttons(), 1);
        assert!(event.modifiers().ctrl);
        assert!(!event.modifiers().shift);
        assert_eq!(event.pointer_id(), 3);
        assert_eq!(event.pointer_type(), PointerType::Pen);
        assert!(event.is_primary());
    }

    #[test]
    fn test_unknown_pointer_type_is_mouse() {
        let host = HostPointerEvent {
            pointer_type: "stylus-9000".to_string(),
            ..HostPointerEvent::default()
        };
        assert_eq!(PointerEvent::from(&host).pointer_type(), PointerType::Mouse);
    }

    #[test]
    fn test_mouse_event_is_primary_mouse_pointer() {
        let host = HostMouseEvent {
            client_x: 5.0,
            client_y: 6.0,
            alt_key: true,
            ..HostMouseEvent::default()
        };

        let event = PointerEvent::from(&host);

        assert_eq!(event.client_position(), Point::new(5.0, 6.0));
        assert_eq!(event.pointer_type(), PointerType::Mouse);
        assert_eq!(event.pointer_id(), 0);
        assert!(event.is_primary());
        assert!(event.modifiers().alt);
    }
}
