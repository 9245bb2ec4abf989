//! The node renderer.
//!
//! A [`NodeRenderer`] draws one node of a [`Diagram`]. It:
//!
//! - tracks whether the node intersects the visible viewport and suppresses
//!   drawing while it does not (virtualization);
//! - attaches the host [`ResizeObserver`] to its element and writes reported
//!   sizes back to the node in diagram coordinates;
//! - forwards pointer and mouse events to the diagram, tagged with the node.
//!
//! # Lifecycle
//!
//! The host drives a renderer the same way for every frame:
//!
//! ```text
//!   should_render() ──► render() ──► attach element ──► after_render(first)
//! ```
//!
//! [`NodeRenderer::draw`] runs the sequence in one call. Redraw requests are
//! published on the diagram through [`Diagram::on_redraw_requested`].
//!
//! # Visibility
//!
//! ```text
//!            box intersects container
//!   Hidden ───────────────────────────► Visible (initial)
//!          ◄───────────────────────────
//!            box outside container
//! ```
//!
//! With virtualization disabled, a renderer moves to Visible on its next
//! check and stays there.

use std::{
    cell::Cell,
    fmt,
    rc::{Rc, Weak},
};

use log::{debug, trace, warn};

use vantage_core::{
    event::PointerEvent, geometry::Size, identifier::Id, model::NodeChange, model::NodeModel,
    signal::Subscription, viewport::Viewport,
};

use crate::{
    diagram::{Diagram, DiagramOptions},
    element::{ElementRef, RenderedNode},
    error::VantageError,
    input::{HostMouseEvent, HostPointerEvent, Propagation},
    observer::{ResizeObserver, SizeReporter, SizeSink},
};

/// Per-renderer flags shared with the diagram and node listeners.
#[derive(Debug)]
struct RenderState {
    node_id: Id,
    is_visible: Cell<bool>,
    became_visible: Cell<bool>,
    should_render: Cell<bool>,
    has_rendered: Cell<bool>,
    element: Cell<Option<ElementRef>>,
    observed: Cell<Option<ElementRef>>,
}

impl RenderState {
    fn new(node_id: Id) -> Self {
        Self {
            node_id,
            is_visible: Cell::new(true),
            became_visible: Cell::new(false),
            should_render: Cell::new(true),
            has_rendered: Cell::new(false),
            element: Cell::new(None),
            observed: Cell::new(None),
        }
    }

    fn rerender(&self, diagram: &Diagram) {
        self.should_render.set(true);
        diagram.request_redraw(self.node_id);
    }

    /// Recomputes visibility for the current viewport and options.
    fn check_visibility(&self, node: &NodeModel, diagram: &Diagram, viewport: &Viewport) {
        // Hidden renderers must still switch back when virtualization gets disabled
        if !diagram.options().virtualization() {
            if !self.is_visible.get() {
                self.transition(true, diagram);
            }
            return;
        }

        let (position, size) = {
            let node = node.get();
            (node.position(), node.size())
        };
        let Some(size) = size else {
            return;
        };
        let Some(is_visible) = viewport.is_visible(position, size) else {
            return;
        };

        if self.is_visible.get() != is_visible {
            self.transition(is_visible, diagram);
        }
    }

    fn transition(&self, is_visible: bool, diagram: &Diagram) {
        debug!(node_id:% = self.node_id, is_visible; "Node visibility changed");
        self.is_visible.set(is_visible);
        self.became_visible.set(is_visible);
        self.rerender(diagram);
    }
}

/// Writes a host size report into the node.
///
/// Returns `true` if the node size changed.
fn apply_reported_size(node: &NodeModel, diagram: &Diagram, screen_size: Size) -> bool {
    // Hidden elements report a zero size
    if screen_size.is_zero() {
        trace!(node_id:% = node.id(); "Ignoring zero size report");
        return false;
    }

    let size = diagram.viewport().size_to_diagram(screen_size);
    let tolerance = diagram.options().resize_tolerance();
    if let Some(current) = node.get().size() {
        if current.almost_eq(size, tolerance) {
            return false;
        }
    }

    debug!(node_id:% = node.id(), size:% = size; "Node size updated from host");
    node.set_size(Some(size));
    node.refresh();
    node.refresh_links();
    node.reinitialize_ports();
    true
}

/// Renders a single node and keeps it in sync with the host.
///
/// Dropping the renderer disposes it.
pub struct NodeRenderer {
    state: Rc<RenderState>,
    node: Weak<NodeModel>,
    diagram: Rc<Diagram>,
    observer: Rc<dyn ResizeObserver>,
    sink: Option<SizeSink>,
    subscriptions: Vec<Subscription>,
}

impl NodeRenderer {
    /// Creates a renderer for `node` and subscribes it to the diagram and node hooks.
    pub fn new(
        diagram: Rc<Diagram>,
        node: &Rc<NodeModel>,
        observer: Rc<dyn ResizeObserver>,
    ) -> Self {
        let state = Rc::new(RenderState::new(node.id()));
        let weak_node = Rc::downgrade(node);
        let weak_diagram = Rc::downgrade(&diagram);

        let viewport_listener = || {
            let state = Rc::downgrade(&state);
            let node = weak_node.clone();
            let diagram = weak_diagram.clone();
            move |viewport: &Viewport| {
                if let (Some(state), Some(node), Some(diagram)) =
                    (state.upgrade(), node.upgrade(), diagram.upgrade())
                {
                    state.check_visibility(&node, &diagram, viewport);
                }
            }
        };

        let options_listener = {
            let state = Rc::downgrade(&state);
            let node = weak_node.clone();
            let diagram = weak_diagram.clone();
            move |_: &DiagramOptions| {
                if let (Some(state), Some(node), Some(diagram)) =
                    (state.upgrade(), node.upgrade(), diagram.upgrade())
                {
                    state.check_visibility(&node, &diagram, &diagram.viewport());
                }
            }
        };

        let node_listener = {
            let state = Rc::downgrade(&state);
            let diagram = weak_diagram.clone();
            move |change: &NodeChange| {
                if *change != NodeChange::Refreshed {
                    return;
                }
                if let (Some(state), Some(diagram)) = (state.upgrade(), diagram.upgrade()) {
                    state.rerender(&diagram);
                }
            }
        };

        let subscriptions = vec![
            diagram.on_pan_changed(viewport_listener()),
            diagram.on_zoom_changed(viewport_listener()),
            diagram.on_container_changed(viewport_listener()),
            diagram.on_options_changed(options_listener),
            node.on_changed(node_listener),
        ];

        let sink: SizeSink = {
            let node = weak_node.clone();
            let diagram = weak_diagram;
            Rc::new(move |screen_size: Size| {
                if let (Some(node), Some(diagram)) = (node.upgrade(), diagram.upgrade()) {
                    apply_reported_size(&node, &diagram, screen_size);
                }
            })
        };

        debug!(node_id:% = state.node_id; "Node renderer created");

        Self {
            state,
            node: weak_node,
            diagram,
            observer,
            sink: Some(sink),
            subscriptions,
        }
    }

    pub fn node_id(&self) -> Id {
        self.state.node_id
    }

    /// Returns the current visibility state
    pub fn is_visible(&self) -> bool {
        self.state.is_visible.get()
    }

    /// Returns true between becoming visible and the next `after_render`
    pub fn became_visible(&self) -> bool {
        self.state.became_visible.get()
    }

    /// Returns the element handle of the last render, if the node is drawn
    pub fn element(&self) -> Option<ElementRef> {
        self.state.element.get()
    }

    /// Returns the element the host observer is attached to
    pub fn observed_element(&self) -> Option<ElementRef> {
        self.state.observed.get()
    }

    /// Returns true once the renderer was disposed
    pub fn is_disposed(&self) -> bool {
        self.sink.is_none()
    }

    /// Marks the renderer dirty after its inputs were reassigned.
    pub fn parameters_set(&self) {
        self.state.should_render.set(true);
    }

    /// Consumes the pending redraw request.
    ///
    /// Returns `true` at most once per request.
    pub fn should_render(&self) -> bool {
        self.state.should_render.replace(false)
    }

    /// Recomputes visibility against the diagram's current viewport.
    pub fn check_visibility(&self) {
        if let Some(node) = self.node.upgrade() {
            self.state
                .check_visibility(&node, &self.diagram, &self.diagram.viewport());
        }
    }

    /// Builds the node element, or `None` while the node is hidden or gone.
    ///
    /// A node drawn after being absent gets a fresh [`ElementRef`]. When the
    /// element disappears, the host observer is detached from it.
    pub fn render(&self) -> Option<RenderedNode> {
        let node = self.node.upgrade()?;
        if !self.state.is_visible.get() {
            self.state.element.set(None);
            self.detach_observer();
            return None;
        }

        let element = match self.state.element.get() {
            Some(element) => element,
            None => {
                let element = ElementRef::allocate();
                self.state.element.set(Some(element));
                element
            }
        };

        let node = node.get();
        let component = self.diagram.resolve_component(&node);
        trace!(node_id:% = node.id(), component = component.name(); "Rendering node");
        Some(RenderedNode::new(
            element,
            &node,
            component.name(),
            component.render(&node),
        ))
    }

    /// Attaches the host observer after the element was committed.
    ///
    /// Runs after the first render and after the node became visible.
    /// Nodes with an application-controlled size are never observed.
    /// A failed attach stays pending and is retried on the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Host`] if the observer refuses the element.
    pub fn after_render(&self, first_render: bool) -> Result<(), VantageError> {
        if first_render && !self.state.is_visible.get() {
            return Ok(());
        }
        if !first_render && !self.state.became_visible.get() {
            return Ok(());
        }

        self.attach_observer()?;
        self.state.became_visible.set(false);
        Ok(())
    }

    fn attach_observer(&self) -> Result<(), VantageError> {
        let Some(node) = self.node.upgrade() else {
            return Ok(());
        };
        if node.get().controlled_size() {
            return Ok(());
        }
        let (Some(element), Some(reporter)) = (self.state.element.get(), self.size_reporter())
        else {
            return Ok(());
        };

        self.observer.observe(element, reporter)?;
        self.state.observed.set(Some(element));
        debug!(node_id:% = self.state.node_id, element:% = element; "Observing node size");
        Ok(())
    }

    /// Runs a full frame if a redraw is pending.
    ///
    /// Returns the rendered element when one was produced.
    ///
    /// # Errors
    ///
    /// Propagates observer failures from [`NodeRenderer::after_render`].
    /// The frame is then not counted, so the next one attaches again.
    pub fn draw(&self) -> Result<Option<RenderedNode>, VantageError> {
        if !self.should_render() {
            return Ok(None);
        }
        let rendered = self.render();
        let first_render = !self.state.has_rendered.get();
        self.after_render(first_render)?;
        self.state.has_rendered.set(true);
        Ok(rendered)
    }

    /// Returns the host-side size callback, or `None` after disposal.
    pub fn size_reporter(&self) -> Option<SizeReporter> {
        self.sink.as_ref().map(SizeReporter::new)
    }

    /// Applies a screen-space size reported by the host.
    ///
    /// Returns `true` if the node size changed.
    pub fn on_resize(&self, screen_size: Size) -> bool {
        if self.is_disposed() {
            return false;
        }
        match self.node.upgrade() {
            Some(node) => apply_reported_size(&node, &self.diagram, screen_size),
            None => false,
        }
    }

    // === Event dispatch ===

    pub fn on_pointer_down(&self, event: &HostPointerEvent) -> Propagation {
        if !self.is_disposed() {
            self.diagram
                .trigger_pointer_down(self.state.node_id, PointerEvent::from(event));
        }
        Propagation::Stop
    }

    pub fn on_pointer_up(&self, event: &HostPointerEvent) -> Propagation {
        if !self.is_disposed() {
            self.diagram
                .trigger_pointer_up(self.state.node_id, PointerEvent::from(event));
        }
        Propagation::Stop
    }

    pub fn on_mouse_enter(&self, event: &HostMouseEvent) -> Propagation {
        if !self.is_disposed() {
            self.diagram
                .trigger_pointer_enter(self.state.node_id, PointerEvent::from(event));
        }
        Propagation::Continue
    }

    pub fn on_mouse_leave(&self, event: &HostMouseEvent) -> Propagation {
        if !self.is_disposed() {
            self.diagram
                .trigger_pointer_leave(self.state.node_id, PointerEvent::from(event));
        }
        Propagation::Continue
    }

    /// Unsubscribes from all hooks, detaches the observer and releases the
    /// size reporter. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.subscriptions.clear();
        self.detach_observer();
        self.sink = None;
        debug!(node_id:% = self.state.node_id; "Node renderer disposed");
    }

    fn detach_observer(&self) {
        let Some(element) = self.state.observed.take() else {
            return;
        };
        if let Err(err) = self.observer.unobserve(element) {
            warn!(node_id:% = self.state.node_id, element:% = element, err:%; "Failed to detach size observer");
        }
    }
}

impl Drop for NodeRenderer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for NodeRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRenderer")
            .field("state", &self.state)
            .field("disposed", &self.is_disposed())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use float_cmp::assert_approx_eq;

    use vantage_core::{geometry::Point, model::Node};

    use super::*;
    use crate::{
        config::AppConfig,
        diagram::{NodePointerEvent, PointerAction},
        observer::HeadlessResizeObserver,
    };

    struct Fixture {
        diagram: Rc<Diagram>,
        node: Rc<NodeModel>,
        observer: Rc<HeadlessResizeObserver>,
    }

    impl Fixture {
        fn new(node: Node) -> Self {
            let diagram = Diagram::new(&AppConfig::default());
            diagram.set_container(Size::new(800.0, 600.0));
            let node = diagram.add_node(node).expect("unique node");
            Self {
                diagram,
                node,
                observer: Rc::new(HeadlessResizeObserver::new()),
            }
        }

        fn renderer(&self) -> NodeRenderer {
            let observer: Rc<dyn ResizeObserver> = self.observer.clone();
            NodeRenderer::new(Rc::clone(&self.diagram), &self.node, observer)
        }
    }

    fn sized_node(name: &str) -> Node {
        Node::new(Id::new(name), Point::new(100.0, 100.0)).with_size(Size::new(50.0, 50.0))
    }

    #[test]
    fn test_initial_state() {
        let fixture = Fixture::new(sized_node("rn-initial"));
        let renderer = fixture.renderer();

        assert!(renderer.is_visible());
        assert!(!renderer.became_visible());
        assert!(renderer.should_render());
        assert!(!renderer.should_render());
    }

    #[test]
    fn test_pan_out_hides_and_requests_redraw() {
        let fixture = Fixture::new(sized_node("rn-pan"));
        let renderer = fixture.renderer();
        renderer.should_render();

        let requests = Rc::new(RefCell::new(Vec::new()));
        let _redraws = fixture.diagram.on_redraw_requested({
            let requests = Rc::clone(&requests);
            move |id: &Id| requests.borrow_mut().push(*id)
        });

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));

        assert!(!renderer.is_visible());
        assert!(renderer.should_render());
        assert_eq!(*requests.borrow(), vec![renderer.node_id()]);
        assert!(renderer.render().is_none());
    }

    #[test]
    fn test_becoming_visible_sets_flag() {
        let fixture = Fixture::new(sized_node("rn-back"));
        let renderer = fixture.renderer();

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));
        assert!(!renderer.became_visible());

        fixture.diagram.set_pan(Point::new(0.0, 0.0));
        assert!(renderer.is_visible());
        assert!(renderer.became_visible());
    }

    #[test]
    fn test_unsized_node_is_never_culled() {
        let fixture = Fixture::new(Node::new(Id::new("rn-unsized"), Point::new(5000.0, 5000.0)));
        let renderer = fixture.renderer();

        fixture.diagram.set_pan(Point::new(-100.0, 0.0));

        assert!(renderer.is_visible());
    }

    #[test]
    fn test_first_draw_attaches_observer() {
        let fixture = Fixture::new(sized_node("rn-observe"));
        let renderer = fixture.renderer();

        let rendered = renderer
            .draw()
            .expect("draw should succeed")
            .expect("visible node renders");

        assert_eq!(renderer.observed_element(), Some(rendered.element()));
        assert!(fixture.observer.is_observing(rendered.element()));

        // No pending redraw: nothing happens
        assert!(renderer.draw().expect("draw should succeed").is_none());
    }

    #[test]
    fn test_first_draw_while_hidden_does_not_observe() {
        let fixture = Fixture::new(sized_node("rn-hidden-first"));
        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));
        let renderer = fixture.renderer();
        renderer.check_visibility();
        assert!(!renderer.is_visible());

        assert!(renderer.draw().expect("draw should succeed").is_none());
        assert_eq!(fixture.observer.observed_count(), 0);
    }

    #[test]
    fn test_controlled_size_is_not_observed() {
        let node = Node::new(Id::new("rn-controlled"), Point::default())
            .with_controlled_size(Size::new(10.0, 10.0));
        let fixture = Fixture::new(node);
        let renderer = fixture.renderer();

        renderer.draw().expect("draw should succeed");

        assert_eq!(fixture.observer.observed_count(), 0);
        assert!(renderer.observed_element().is_none());
    }

    #[test]
    fn test_observer_failure_propagates() {
        let fixture = Fixture::new(sized_node("rn-fail"));
        let renderer = fixture.renderer();
        fixture.observer.fail_next_call();

        assert!(matches!(renderer.draw(), Err(VantageError::Host(_))));
        assert!(renderer.observed_element().is_none());
    }

    #[test]
    fn test_failed_first_attach_is_retried_on_next_draw() {
        let fixture = Fixture::new(sized_node("rn-retry"));
        let renderer = fixture.renderer();
        fixture.observer.fail_next_call();

        assert!(matches!(renderer.draw(), Err(VantageError::Host(_))));
        assert_eq!(fixture.observer.observed_count(), 0);

        fixture.node.refresh();
        let element = renderer
            .draw()
            .expect("draw should succeed")
            .expect("visible")
            .element();

        assert!(fixture.observer.is_observing(element));
        assert_eq!(renderer.observed_element(), Some(element));
    }

    #[test]
    fn test_failed_attach_after_becoming_visible_is_retried() {
        let fixture = Fixture::new(sized_node("rn-retry-back"));
        let renderer = fixture.renderer();
        renderer.draw().expect("draw should succeed");

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));
        renderer.draw().expect("draw should succeed");
        fixture.diagram.set_pan(Point::new(0.0, 0.0));
        fixture.observer.fail_next_call();

        assert!(matches!(renderer.draw(), Err(VantageError::Host(_))));
        assert!(renderer.became_visible());
        assert!(renderer.observed_element().is_none());

        fixture.node.refresh();
        let element = renderer
            .draw()
            .expect("draw should succeed")
            .expect("visible")
            .element();

        assert!(fixture.observer.is_observing(element));
        assert!(!renderer.became_visible());
    }

    #[test]
    fn test_pan_from_redraw_listener_is_applied() {
        let fixture = Fixture::new(sized_node("rn-repan"));
        let renderer = fixture.renderer();

        let repanned = Rc::new(Cell::new(false));
        let _redraws = fixture.diagram.on_redraw_requested({
            let diagram = Rc::downgrade(&fixture.diagram);
            let repanned = Rc::clone(&repanned);
            move |_: &Id| {
                if repanned.replace(true) {
                    return;
                }
                // Scroll back as soon as the node leaves the container
                if let Some(diagram) = diagram.upgrade() {
                    diagram.set_pan(Point::new(0.0, 0.0));
                }
            }
        });

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));

        let viewport = fixture.diagram.viewport();
        assert_eq!(viewport.pan(), Point::new(0.0, 0.0));
        assert!(repanned.get());
        assert!(renderer.is_visible());
        assert!(renderer.became_visible());
        assert_eq!(
            viewport.is_visible(Point::new(100.0, 100.0), Size::new(50.0, 50.0)),
            Some(renderer.is_visible())
        );
    }

    #[test]
    fn test_reappearing_node_gets_new_observed_element() {
        let fixture = Fixture::new(sized_node("rn-reappear"));
        let renderer = fixture.renderer();
        let first = renderer
            .draw()
            .expect("draw should succeed")
            .expect("visible")
            .element();

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));
        assert!(renderer.draw().expect("draw should succeed").is_none());
        assert!(!fixture.observer.is_observing(first));

        fixture.diagram.set_pan(Point::new(0.0, 0.0));
        let second = renderer
            .draw()
            .expect("draw should succeed")
            .expect("visible again")
            .element();

        assert_ne!(first, second);
        assert!(fixture.observer.is_observing(second));
        assert!(!renderer.became_visible());
    }

    #[test]
    fn test_resize_divides_by_zoom() {
        let fixture = Fixture::new(Node::new(Id::new("rn-zoom"), Point::default()));
        let renderer = fixture.renderer();
        fixture.diagram.set_zoom(2.0).expect("valid zoom");

        assert!(renderer.on_resize(Size::new(100.0, 100.0)));

        let size = fixture.node.get().size().expect("size is cached");
        assert_approx_eq!(f32, size.width(), 50.0);
        assert_approx_eq!(f32, size.height(), 50.0);
    }

    #[test]
    fn test_resize_ignores_zero_size() {
        let fixture = Fixture::new(sized_node("rn-zero"));
        let renderer = fixture.renderer();

        assert!(!renderer.on_resize(Size::ZERO));
        assert_eq!(fixture.node.get().size(), Some(Size::new(50.0, 50.0)));
    }

    #[test]
    fn test_resize_ignores_negligible_delta() {
        let fixture = Fixture::new(sized_node("rn-delta"));
        let renderer = fixture.renderer();
        let changes = Rc::new(Cell::new(0));
        let _changes = fixture.node.on_changed({
            let changes = Rc::clone(&changes);
            move |_| changes.set(changes.get() + 1)
        });

        assert!(!renderer.on_resize(Size::new(50.00001, 50.0)));
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn test_resize_triggers_dependent_refreshes() {
        let fixture = Fixture::new(sized_node("rn-deps"));
        let renderer = fixture.renderer();
        renderer.should_render();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let _changes = fixture.node.on_changed({
            let changes = Rc::clone(&changes);
            move |change: &NodeChange| changes.borrow_mut().push(*change)
        });

        assert!(renderer.on_resize(Size::new(80.0, 40.0)));

        assert_eq!(
            *changes.borrow(),
            vec![
                NodeChange::Refreshed,
                NodeChange::LinksRefreshed,
                NodeChange::PortsReinitialized
            ]
        );
        // The refresh requested a redraw of this renderer
        assert!(renderer.should_render());
    }

    #[test]
    fn test_host_report_reaches_node_through_observer() {
        let fixture = Fixture::new(Node::new(Id::new("rn-host"), Point::default()));
        let renderer = fixture.renderer();
        let element = renderer
            .draw()
            .expect("draw should succeed")
            .expect("visible")
            .element();

        assert!(fixture.observer.report(element, Size::new(120.0, 60.0)));
        assert_eq!(fixture.node.get().size(), Some(Size::new(120.0, 60.0)));
    }

    #[test]
    fn test_virtualization_disabled_freezes_visible() {
        let fixture = Fixture::new(sized_node("rn-freeze"));
        let renderer = fixture.renderer();

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));
        assert!(!renderer.is_visible());

        fixture.diagram.set_virtualization(false);
        assert!(renderer.is_visible());

        fixture.diagram.set_pan(Point::new(-5000.0, -5000.0));
        fixture.diagram.set_zoom(0.1).expect("valid zoom");
        assert!(renderer.is_visible());
    }

    #[test]
    fn test_pointer_events_forward_and_stop_propagation() {
        let fixture = Fixture::new(sized_node("rn-pointer"));
        let renderer = fixture.renderer();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _pointer = fixture.diagram.on_pointer({
            let seen = Rc::clone(&seen);
            move |event: &NodePointerEvent| {
                seen.borrow_mut().push((event.node(), event.action()))
            }
        });

        let pointer = HostPointerEvent::default();
        let mouse = HostMouseEvent::default();
        assert_eq!(renderer.on_pointer_down(&pointer), Propagation::Stop);
        assert_eq!(renderer.on_pointer_up(&pointer), Propagation::Stop);
        assert_eq!(renderer.on_mouse_enter(&mouse), Propagation::Continue);
        assert_eq!(renderer.on_mouse_leave(&mouse), Propagation::Continue);

        let id = renderer.node_id();
        assert_eq!(
            *seen.borrow(),
            vec![
                (id, PointerAction::Down),
                (id, PointerAction::Up),
                (id, PointerAction::Enter),
                (id, PointerAction::Leave),
            ]
        );
    }

    #[test]
    fn test_dispose_releases_everything() {
        let fixture = Fixture::new(sized_node("rn-dispose"));
        let mut renderer = fixture.renderer();
        renderer.draw().expect("draw should succeed");
        let reporter = renderer.size_reporter().expect("live reporter");
        renderer.should_render();

        renderer.dispose();

        assert!(renderer.is_disposed());
        assert_eq!(fixture.diagram.viewport_listener_count(), 0);
        assert_eq!(fixture.node.listener_count(), 0);
        assert_eq!(fixture.observer.observed_count(), 0);
        assert!(reporter.is_released());
        assert!(!reporter.report(Size::new(999.0, 999.0)));

        fixture.diagram.set_pan(Point::new(-1000.0, 0.0));
        fixture.node.refresh();
        assert!(renderer.is_visible());
        assert!(!renderer.should_render());
        assert_eq!(fixture.node.get().size(), Some(Size::new(50.0, 50.0)));

        // Second dispose is a no-op
        renderer.dispose();
    }

    #[test]
    fn test_drop_disposes() {
        let fixture = Fixture::new(sized_node("rn-drop"));
        {
            let renderer = fixture.renderer();
            renderer.draw().expect("draw should succeed");
            assert_eq!(fixture.observer.observed_count(), 1);
        }
        assert_eq!(fixture.observer.observed_count(), 0);
        assert_eq!(fixture.diagram.viewport_listener_count(), 0);
    }

    #[test]
    fn test_removed_node_makes_renderer_inert() {
        let fixture = Fixture::new(sized_node("rn-removed"));
        let Fixture {
            diagram,
            node,
            observer,
        } = fixture;
        let renderer = NodeRenderer::new(Rc::clone(&diagram), &node, observer);
        let id = node.id();
        drop(node);
        diagram.remove_node(id);

        assert!(renderer.render().is_none());
        assert!(!renderer.on_resize(Size::new(10.0, 10.0)));
        diagram.set_pan(Point::new(-1000.0, 0.0));
        assert!(renderer.is_visible());
    }
}
