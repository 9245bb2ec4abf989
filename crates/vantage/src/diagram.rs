//! The shared diagram context.
//!
//! A [`Diagram`] owns the node collection, the viewport, the component
//! registry and the hooks renderers subscribe to. It is shared as
//! `Rc<Diagram>` and mutated through `&self`, since renderers, hosts and
//! application code all hold it at the same time on a single UI thread.
//!
//! # Example
//!
//! ```
//! # use vantage::{Diagram, config::AppConfig};
//! # use vantage_core::{geometry::{Point, Size}, identifier::Id, model::Node};
//! let diagram = Diagram::new(&AppConfig::default());
//! diagram.add_node(Node::new(Id::new("a"), Point::new(10.0, 10.0))).unwrap();
//!
//! diagram.set_container(Size::new(800.0, 600.0));
//! diagram.set_zoom(2.0).unwrap();
//!
//! assert_eq!(diagram.viewport().zoom(), 2.0);
//! assert_eq!(diagram.nodes().len(), 1);
//! ```

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use indexmap::IndexMap;
use log::{debug, info, trace};

use vantage_core::{
    event::PointerEvent,
    geometry::{Point, Size},
    identifier::Id,
    model::{Node, NodeModel},
    signal::{Signal, Subscription},
    viewport::Viewport,
};

use crate::{
    config::AppConfig,
    error::VantageError,
    registry::{ComponentRegistry, NodeComponent},
};

/// Runtime options derived from [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramOptions {
    virtualization: bool,
    resize_tolerance: f32,
}

impl DiagramOptions {
    /// Returns whether nodes outside the viewport are culled
    pub fn virtualization(&self) -> bool {
        self.virtualization
    }

    /// Returns the tolerance used to compare reported sizes
    pub fn resize_tolerance(&self) -> f32 {
        self.resize_tolerance
    }
}

impl From<&AppConfig> for DiagramOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            virtualization: config.virtualization().enabled(),
            resize_tolerance: config.resize().tolerance(),
        }
    }
}

/// Pointer interactions forwarded by node renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Up,
    Enter,
    Leave,
}

/// A pointer interaction tagged with the node it happened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePointerEvent {
    node: Id,
    action: PointerAction,
    event: PointerEvent,
}

impl NodePointerEvent {
    pub fn node(&self) -> Id {
        self.node
    }

    pub fn action(&self) -> PointerAction {
        self.action
    }

    pub fn event(&self) -> &PointerEvent {
        &self.event
    }
}

/// Shared viewport state, node collection and event hooks.
pub struct Diagram {
    viewport: Cell<Viewport>,
    options: Cell<DiagramOptions>,
    nodes: RefCell<IndexMap<Id, Rc<NodeModel>>>,
    registry: RefCell<ComponentRegistry>,
    pan_changed: Signal<Viewport>,
    zoom_changed: Signal<Viewport>,
    container_changed: Signal<Viewport>,
    options_changed: Signal<DiagramOptions>,
    pointer: Signal<NodePointerEvent>,
    redraw_requested: Signal<Id>,
}

impl Diagram {
    /// Creates an empty diagram with options taken from `config`.
    pub fn new(config: &AppConfig) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(Viewport::default()),
            options: Cell::new(DiagramOptions::from(config)),
            nodes: RefCell::new(IndexMap::new()),
            registry: RefCell::new(ComponentRegistry::new()),
            pan_changed: Signal::new(),
            zoom_changed: Signal::new(),
            container_changed: Signal::new(),
            options_changed: Signal::new(),
            pointer: Signal::new(),
            redraw_requested: Signal::new(),
        })
    }

    // === Viewport ===

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    pub fn options(&self) -> DiagramOptions {
        self.options.get()
    }

    /// Sets the pan offset and notifies pan listeners.
    pub fn set_pan(&self, pan: Point) {
        let viewport = self.viewport.get().with_pan(pan);
        self.viewport.set(viewport);
        trace!(pan:% = pan; "Pan changed");
        self.pan_changed.emit(&viewport);
    }

    /// Moves the pan offset by `delta`.
    pub fn pan_by(&self, delta: Point) {
        self.set_pan(self.viewport.get().pan().add_point(delta));
    }

    /// Sets the zoom factor and notifies zoom listeners.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Viewport`] if `zoom` is not finite and
    /// positive; the viewport is left unchanged.
    pub fn set_zoom(&self, zoom: f32) -> Result<(), VantageError> {
        let viewport = self.viewport.get().with_zoom(zoom)?;
        self.viewport.set(viewport);
        trace!(zoom; "Zoom changed");
        self.zoom_changed.emit(&viewport);
        Ok(())
    }

    /// Sets the container size and notifies container listeners.
    pub fn set_container(&self, container: Size) {
        let viewport = self.viewport.get().with_container(container);
        self.viewport.set(viewport);
        debug!(container:% = container; "Container changed");
        self.container_changed.emit(&viewport);
    }

    /// Enables or disables virtualization and notifies option listeners.
    pub fn set_virtualization(&self, enabled: bool) {
        let options = DiagramOptions {
            virtualization: enabled,
            ..self.options.get()
        };
        self.options.set(options);
        info!(enabled; "Virtualization toggled");
        self.options_changed.emit(&options);
    }

    // === Nodes ===

    /// Adds a node to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::DuplicateNode`] if a node with the same id exists.
    pub fn add_node(&self, node: Node) -> Result<Rc<NodeModel>, VantageError> {
        let id = node.id();
        let mut nodes = self.nodes.borrow_mut();
        if nodes.contains_key(&id) {
            return Err(VantageError::DuplicateNode(id));
        }
        let model = NodeModel::new(node);
        nodes.insert(id, Rc::clone(&model));
        debug!(node_id:% = id; "Node added");
        Ok(model)
    }

    /// Removes a node. Renderers holding it become inert.
    pub fn remove_node(&self, id: Id) -> Option<Rc<NodeModel>> {
        let removed = self.nodes.borrow_mut().shift_remove(&id);
        if removed.is_some() {
            debug!(node_id:% = id; "Node removed");
        }
        removed
    }

    pub fn node(&self, id: Id) -> Option<Rc<NodeModel>> {
        self.nodes.borrow().get(&id).cloned()
    }

    /// Returns all nodes in insertion order.
    pub fn nodes(&self) -> Vec<Rc<NodeModel>> {
        self.nodes.borrow().values().cloned().collect()
    }

    // === Components ===

    /// Registers a component for a node kind.
    pub fn register_component(&self, kind: Id, component: Rc<dyn NodeComponent>) {
        if self.registry.borrow_mut().register(kind, component).is_some() {
            debug!(kind:% = kind; "Replaced node component");
        }
    }

    /// Resolves the component that renders `node`.
    pub fn resolve_component(&self, node: &Node) -> Rc<dyn NodeComponent> {
        self.registry.borrow().resolve(node)
    }

    // === Pointer notifications ===

    pub fn trigger_pointer_down(&self, node: Id, event: PointerEvent) {
        self.trigger_pointer(node, PointerAction::Down, event);
    }

    pub fn trigger_pointer_up(&self, node: Id, event: PointerEvent) {
        self.trigger_pointer(node, PointerAction::Up, event);
    }

    pub fn trigger_pointer_enter(&self, node: Id, event: PointerEvent) {
        self.trigger_pointer(node, PointerAction::Enter, event);
    }

    pub fn trigger_pointer_leave(&self, node: Id, event: PointerEvent) {
        self.trigger_pointer(node, PointerAction::Leave, event);
    }

    fn trigger_pointer(&self, node: Id, action: PointerAction, event: PointerEvent) {
        trace!(node_id:% = node, action:?; "Pointer event");
        self.pointer.emit(&NodePointerEvent {
            node,
            action,
            event,
        });
    }

    // === Redraw requests ===

    /// Asks the host to redraw the renderer of `node`.
    pub fn request_redraw(&self, node: Id) {
        self.redraw_requested.emit(&node);
    }

    // === Subscriptions ===

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_pan_changed(&self, listener: impl FnMut(&Viewport) + 'static) -> Subscription {
        self.pan_changed.subscribe(listener)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_zoom_changed(&self, listener: impl FnMut(&Viewport) + 'static) -> Subscription {
        self.zoom_changed.subscribe(listener)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_container_changed(
        &self,
        listener: impl FnMut(&Viewport) + 'static,
    ) -> Subscription {
        self.container_changed.subscribe(listener)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_options_changed(
        &self,
        listener: impl FnMut(&DiagramOptions) + 'static,
    ) -> Subscription {
        self.options_changed.subscribe(listener)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_pointer(&self, listener: impl FnMut(&NodePointerEvent) + 'static) -> Subscription {
        self.pointer.subscribe(listener)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_redraw_requested(&self, listener: impl FnMut(&Id) + 'static) -> Subscription {
        self.redraw_requested.subscribe(listener)
    }

    /// Returns the number of listeners on the viewport and option hooks.
    pub fn viewport_listener_count(&self) -> usize {
        self.pan_changed.listener_count()
            + self.zoom_changed.listener_count()
            + self.container_changed.listener_count()
            + self.options_changed.listener_count()
    }
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("viewport", &self.viewport.get())
            .field("options", &self.options.get())
            .field("nodes", &self.nodes.borrow().len())
            .field("registry", &*self.registry.borrow())
            .finish()
    }
}
