//! Vantage - Viewport-aware node rendering for pannable, zoomable diagrams.
//!
//! A [`Diagram`] holds nodes and the viewport (pan, zoom and container size).
//! Each node is drawn by a [`NodeRenderer`] which skips nodes outside the
//! visible area, writes host-measured sizes back into the node, and forwards
//! pointer interactions to the diagram.
//!
//! # Examples
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use vantage::{
//!     Diagram, NodeRenderer,
//!     config::AppConfig,
//!     geometry::{Point, Size},
//!     identifier::Id,
//!     model::Node,
//!     observer::HeadlessResizeObserver,
//! };
//!
//! let diagram = Diagram::new(&AppConfig::default());
//! diagram.set_container(Size::new(800.0, 600.0));
//!
//! let node = diagram
//!     .add_node(Node::new(Id::new("api"), Point::new(40.0, 40.0)))
//!     .expect("unique node id");
//!
//! let observer = Rc::new(HeadlessResizeObserver::new());
//! let renderer = NodeRenderer::new(Rc::clone(&diagram), &node, observer.clone());
//!
//! let rendered = renderer.draw().expect("draw").expect("node is visible");
//! observer.report(rendered.element(), Size::new(120.0, 60.0));
//!
//! assert_eq!(node.get().size(), Some(Size::new(120.0, 60.0)));
//! ```

pub mod config;
pub mod element;
pub mod input;
pub mod observer;
pub mod registry;

mod diagram;
mod error;
mod renderer;

pub use vantage_core::{event, geometry, identifier, model, signal, viewport};

pub use diagram::{Diagram, DiagramOptions, NodePointerEvent, PointerAction};
pub use error::VantageError;
pub use renderer::NodeRenderer;
