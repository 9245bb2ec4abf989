//! Node and port model.
//!
//! [`Node`] is plain data. [`NodeModel`] wraps a node in interior mutability
//! and a change [`Signal`], which is what renderers and link views hold on
//! to. Nodes are owned by the diagram's node collection; views keep
//! [`std::rc::Weak`] references.
//!
//! # Example
//!
//! ```
//! # use vantage_core::{geometry::{Point, Size}, identifier::Id};
//! # use vantage_core::model::{Node, NodeModel, PortAlignment};
//! let node = Node::new(Id::new("api"), Point::new(10.0, 10.0))
//!     .with_port(Id::new("api-out"), PortAlignment::Right);
//! let model = NodeModel::new(node);
//!
//! model.set_size(Some(Size::new(100.0, 40.0)));
//! model.reinitialize_ports();
//!
//! let port_position = model.get().ports()[0].position();
//! assert_eq!(port_position.x(), 110.0);
//! assert_eq!(port_position.y(), 30.0);
//! ```

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
    str::FromStr,
};

use log::trace;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    geometry::{Point, Size},
    identifier::Id,
    signal::{Signal, Subscription},
};

/// Errors from parsing model enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown port alignment `{0}`")]
    UnknownPortAlignment(String),

    #[error("unknown node shape `{0}`")]
    UnknownNodeShape(String),
}

/// How a node is drawn by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    /// Drawn as an HTML block positioned with CSS.
    #[default]
    Html,
    /// Drawn as an SVG group positioned with a transform.
    Svg,
}

impl FromStr for NodeShape {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            other => Err(ModelError::UnknownNodeShape(other.to_string())),
        }
    }
}

/// Where a port sits on its node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortAlignment {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl PortAlignment {
    /// Returns the class name used when rendering a port.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Right => "right",
            Self::BottomRight => "bottom-right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom-left",
            Self::Left => "left",
            Self::TopLeft => "top-left",
        }
    }

    /// Returns the anchor offset from the node's top-left corner.
    pub fn anchor(self, size: Size) -> Point {
        let (w, h) = (size.width(), size.height());
        match self {
            Self::Top => Point::new(w / 2.0, 0.0),
            Self::TopRight => Point::new(w, 0.0),
            Self::Right => Point::new(w, h / 2.0),
            Self::BottomRight => Point::new(w, h),
            Self::Bottom => Point::new(w / 2.0, h),
            Self::BottomLeft => Point::new(0.0, h),
            Self::Left => Point::new(0.0, h / 2.0),
            Self::TopLeft => Point::new(0.0, 0.0),
        }
    }
}

impl fmt::Display for PortAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PortAlignment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "top-right" => Ok(Self::TopRight),
            "right" => Ok(Self::Right),
            "bottom-right" => Ok(Self::BottomRight),
            "bottom" => Ok(Self::Bottom),
            "bottom-left" => Ok(Self::BottomLeft),
            "left" => Ok(Self::Left),
            "top-left" => Ok(Self::TopLeft),
            other => Err(ModelError::UnknownPortAlignment(other.to_string())),
        }
    }
}

/// A connection anchor on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    id: Id,
    alignment: PortAlignment,
    position: Point,
}

impl Port {
    pub fn new(id: Id, alignment: PortAlignment) -> Self {
        Self {
            id,
            alignment,
            position: Point::default(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn alignment(&self) -> PortAlignment {
        self.alignment
    }

    /// Position in diagram coordinates, valid after the last port reinitialization
    pub fn position(&self) -> Point {
        self.position
    }
}

/// A diagram node.
///
/// Position is the top-left corner in diagram coordinates. Size is `None`
/// until the host reports it, unless the application controls it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: Option<Id>,
    shape: NodeShape,
    title: Option<String>,
    position: Point,
    size: Option<Size>,
    controlled_size: bool,
    locked: bool,
    selected: bool,
    group: Option<Id>,
    ports: Vec<Port>,
}

impl Node {
    pub fn new(id: Id, position: Point) -> Self {
        Self {
            id,
            kind: None,
            shape: NodeShape::default(),
            title: None,
            position,
            size: None,
            controlled_size: false,
            locked: false,
            selected: false,
            group: None,
            ports: Vec::new(),
        }
    }

    /// Sets the component kind used to resolve a custom renderer
    pub fn with_kind(mut self, kind: Id) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Marks the size as application-controlled: hosts never report it.
    pub fn with_controlled_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self.controlled_size = true;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_group(mut self, group: Id) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_port(mut self, id: Id, alignment: PortAlignment) -> Self {
        self.ports.push(Port::new(id, alignment));
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> Option<Id> {
        self.kind
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn controlled_size(&self) -> bool {
        self.controlled_size
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn group(&self) -> Option<Id> {
        self.group
    }

    /// Returns true if the node belongs to a group
    pub fn grouped(&self) -> bool {
        self.group.is_some()
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }
}

/// Notifications published by a [`NodeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChange {
    /// The node's visible state changed and its views should redraw.
    Refreshed,
    /// Links attached to the node should recompute their routes.
    LinksRefreshed,
    /// Port positions were recomputed.
    PortsReinitialized,
}

/// An observable, shared node.
pub struct NodeModel {
    node: RefCell<Node>,
    changed: Signal<NodeChange>,
}

impl NodeModel {
    pub fn new(node: Node) -> Rc<Self> {
        Rc::new(Self {
            node: RefCell::new(node),
            changed: Signal::new(),
        })
    }

    /// Returns the node id.
    pub fn id(&self) -> Id {
        self.node.borrow().id
    }

    /// Borrows the node data.
    ///
    /// The borrow must be released before calling any mutating method.
    pub fn get(&self) -> Ref<'_, Node> {
        self.node.borrow()
    }

    /// Applies `update` to the node data without notifying listeners.
    pub fn update<R>(&self, update: impl FnOnce(&mut Node) -> R) -> R {
        update(&mut *self.node.borrow_mut())
    }

    pub fn set_position(&self, position: Point) {
        self.update(|node| node.position = position);
    }

    pub fn set_size(&self, size: Option<Size>) {
        self.update(|node| node.size = size);
    }

    pub fn set_selected(&self, selected: bool) {
        self.update(|node| node.selected = selected);
    }

    pub fn set_locked(&self, locked: bool) {
        self.update(|node| node.locked = locked);
    }

    pub fn set_group(&self, group: Option<Id>) {
        self.update(|node| node.group = group);
    }

    /// Asks views of this node to redraw.
    pub fn refresh(&self) {
        trace!(node_id:% = self.id(); "Node refresh");
        self.changed.emit(&NodeChange::Refreshed);
    }

    /// Asks links attached to this node to recompute.
    pub fn refresh_links(&self) {
        trace!(node_id:% = self.id(); "Node links refresh");
        self.changed.emit(&NodeChange::LinksRefreshed);
    }

    /// Recomputes port positions from the node position and size.
    pub fn reinitialize_ports(&self) {
        self.update(|node| {
            let origin = node.position;
            let size = node.size.unwrap_or_default();
            for port in &mut node.ports {
                port.position = origin.add_point(port.alignment.anchor(size));
            }
        });
        trace!(node_id:% = self.id(); "Node ports reinitialized");
        self.changed.emit(&NodeChange::PortsReinitialized);
    }

    /// Subscribes to node notifications.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_changed(&self, listener: impl FnMut(&NodeChange) + 'static) -> Subscription {
        self.changed.subscribe(listener)
    }

    /// Returns the number of active change listeners.
    pub fn listener_count(&self) -> usize {
        self.changed.listener_count()
    }
}

impl fmt::Debug for NodeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeModel")
            .field("node", &*self.node.borrow())
            .field("changed", &self.changed)
            .finish()
    }
}
