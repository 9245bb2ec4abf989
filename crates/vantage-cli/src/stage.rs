//! Headless replay of a scene.
//!
//! A [`Stage`] plays the host role for every node of a scene: it owns one
//! [`NodeRenderer`] per node, backs them with a [`HeadlessResizeObserver`],
//! applies scene steps and draws every renderer that asked for a redraw.
//! Everything observable is written to an event log.

use std::{cell::RefCell, rc::Rc};

use log::{debug, info};

use vantage::{
    Diagram, NodePointerEvent, NodeRenderer, VantageError,
    config::AppConfig,
    identifier::Id,
    input::{HostMouseEvent, HostPointerEvent},
    observer::HeadlessResizeObserver,
    signal::Subscription,
};

use crate::scene::{Scene, Step, to_point, to_size};

struct Slot {
    renderer: NodeRenderer,
    markup: Option<String>,
}

/// Replays scene steps against a diagram.
pub struct Stage {
    diagram: Rc<Diagram>,
    observer: Rc<HeadlessResizeObserver>,
    slots: Vec<Slot>,
    log: Rc<RefCell<Vec<String>>>,
    frames: usize,
    _pointer: Subscription,
}

impl Stage {
    /// Builds the diagram, the initial viewport and one renderer per node.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid initial zoom, duplicate node ids or
    /// invalid node declarations.
    pub fn new(config: &AppConfig, scene: &Scene) -> Result<Self, VantageError> {
        let diagram = Diagram::new(config);
        let viewport = scene.viewport();
        if let Some(container) = viewport.container() {
            diagram.set_container(container);
        }
        if let Some(pan) = viewport.pan() {
            diagram.set_pan(pan);
        }
        if let Some(zoom) = viewport.zoom() {
            diagram.set_zoom(zoom)?;
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let pointer = diagram.on_pointer({
            let log = Rc::clone(&log);
            move |event: &NodePointerEvent| {
                log.borrow_mut().push(format!(
                    "pointer {:?} on {} at {}",
                    event.action(),
                    event.node(),
                    event.event().client_position()
                ));
            }
        });

        let observer = Rc::new(HeadlessResizeObserver::new());
        let mut slots = Vec::with_capacity(scene.nodes().len());
        for spec in scene.nodes() {
            let node = diagram.add_node(spec.to_node()?)?;
            let renderer = NodeRenderer::new(Rc::clone(&diagram), &node, observer.clone());
            // Nodes start out Visible; settle them against the initial viewport
            renderer.check_visibility();
            slots.push(Slot {
                renderer,
                markup: None,
            });
        }

        info!(nodes = slots.len(), steps = scene.steps().len(); "Stage ready");

        Ok(Self {
            diagram,
            observer,
            slots,
            log,
            frames: 0,
            _pointer: pointer,
        })
    }

    /// Applies a single step.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::UnknownNode`] if the step names a node that is
    /// not in the scene, or a viewport error for an invalid zoom.
    pub fn apply(&mut self, step: &Step) -> Result<(), VantageError> {
        debug!(step = step.name(); "Applying step");
        self.record(format!("step {}", step.name()));

        match step {
            Step::Pan { to } => self.diagram.set_pan(to_point(*to)),
            Step::PanBy { delta } => self.diagram.pan_by(to_point(*delta)),
            Step::Zoom { zoom } => self.diagram.set_zoom(*zoom)?,
            Step::Container { size } => self.diagram.set_container(to_size(*size)),
            Step::Virtualization { enabled } => self.diagram.set_virtualization(*enabled),
            Step::Resize { node, size } => {
                let size = to_size(*size);
                match self.slot(*node)?.renderer.element() {
                    Some(element) => {
                        if !self.observer.report(element, size) {
                            self.record(format!("resize of {node} ignored: not observed"));
                        }
                    }
                    None => self.record(format!("resize of {node} skipped: not drawn")),
                }
            }
            Step::PointerDown { node, at } => {
                let event = host_pointer_event(*at);
                self.slot(*node)?.renderer.on_pointer_down(&event);
            }
            Step::PointerUp { node, at } => {
                let event = host_pointer_event(*at);
                self.slot(*node)?.renderer.on_pointer_up(&event);
            }
            Step::MouseEnter { node } => {
                self.slot(*node)?
                    .renderer
                    .on_mouse_enter(&HostMouseEvent::default());
            }
            Step::MouseLeave { node } => {
                self.slot(*node)?
                    .renderer
                    .on_mouse_leave(&HostMouseEvent::default());
            }
            Step::Select { node, selected } => {
                let model = self
                    .diagram
                    .node(*node)
                    .ok_or(VantageError::UnknownNode(*node))?;
                model.set_selected(*selected);
                model.refresh();
            }
        }
        Ok(())
    }

    /// Draws every renderer with a pending redraw.
    ///
    /// Returns the number of elements drawn.
    ///
    /// # Errors
    ///
    /// Propagates observer failures.
    pub fn flush(&mut self) -> Result<usize, VantageError> {
        self.frames += 1;
        let mut drawn = 0;
        let mut entries = Vec::new();

        for slot in &mut self.slots {
            let id = slot.renderer.node_id();
            match slot.renderer.draw()? {
                Some(rendered) => {
                    drawn += 1;
                    entries.push(format!(
                        "draw {id} as {} {}",
                        rendered.component(),
                        rendered.element()
                    ));
                    slot.markup = Some(rendered.into_element().to_string());
                }
                None if !slot.renderer.is_visible() && slot.markup.is_some() => {
                    entries.push(format!("cull {id}"));
                    slot.markup = None;
                }
                None => {}
            }
        }

        for entry in entries {
            self.record(entry);
        }
        debug!(frame = self.frames, drawn; "Frame flushed");
        Ok(drawn)
    }

    /// Replays all steps of `scene`, flushing after each one.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step.
    pub fn play(&mut self, scene: &Scene) -> Result<(), VantageError> {
        self.flush()?;
        for step in scene.steps() {
            self.apply(step)?;
            self.flush()?;
        }
        Ok(())
    }

    /// Returns the event log.
    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Returns the markup of all currently drawn nodes, in scene order.
    pub fn markup(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|slot| slot.markup.as_deref())
            .collect()
    }

    /// Renders the event log followed by the current markup.
    pub fn report(&self) -> String {
        let mut report = String::from("# events\n");
        for event in self.log.borrow().iter() {
            report.push_str(event);
            report.push('\n');
        }
        report.push_str("\n# markup\n");
        for markup in self.markup() {
            report.push_str(markup);
            report.push('\n');
        }
        report
    }

    fn slot(&self, id: Id) -> Result<&Slot, VantageError> {
        self.slots
            .iter()
            .find(|slot| slot.renderer.node_id() == id)
            .ok_or(VantageError::UnknownNode(id))
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

fn host_pointer_event([x, y]: [f32; 2]) -> HostPointerEvent {
    HostPointerEvent {
        client_x: f64::from(x),
        client_y: f64::from(y),
        buttons: 1,
        pointer_id: 1,
        pointer_type: "mouse".to_string(),
        is_primary: true,
        ..HostPointerEvent::default()
    }
}
