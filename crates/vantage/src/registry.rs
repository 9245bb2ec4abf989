//! Component resolution for node content.
//!
//! The wrapper element of a node is always produced by the renderer; what
//! goes inside it is produced by a [`NodeComponent`]. Applications register
//! components per node kind in a [`ComponentRegistry`]. Nodes without a
//! registered kind fall back to [`NodeWidget`] or [`SvgNodeWidget`]
//! depending on their shape.

use std::{fmt, rc::Rc};

use indexmap::IndexMap;
use svg::{Node as _, node::Text as SvgText, node::element as svg_element};

use vantage_core::{
    identifier::Id,
    model::{Node, NodeShape},
};

/// Type alias for boxed markup nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Produces the inner content of a node element.
pub trait NodeComponent {
    /// Component name, reported on rendered nodes.
    fn name(&self) -> &str;

    /// Renders the content for `node`.
    fn render(&self, node: &Node) -> Vec<SvgNode>;
}

/// Default content for HTML nodes: the title followed by one element per port.
#[derive(Debug, Default)]
pub struct NodeWidget;

impl NodeComponent for NodeWidget {
    fn name(&self) -> &str {
        "NodeWidget"
    }

    fn render(&self, node: &Node) -> Vec<SvgNode> {
        let mut body = svg_element::Element::new("div");
        body.assign("class", "default-node");
        body.append(SvgText::new(node.title().unwrap_or("Title")));

        for port in node.ports() {
            let mut port_element = svg_element::Element::new("div");
            port_element.assign("class", format!("diagram-port {}", port.alignment()));
            port_element.assign("data-port-id", port.id().to_string());
            body.append(port_element);
        }

        vec![Box::new(body)]
    }
}

/// Default content for SVG nodes: a rectangle sized to the node and its title.
#[derive(Debug, Default)]
pub struct SvgNodeWidget;

impl NodeComponent for SvgNodeWidget {
    fn name(&self) -> &str {
        "SvgNodeWidget"
    }

    fn render(&self, node: &Node) -> Vec<SvgNode> {
        let size = node.size().unwrap_or_default();
        let rect = svg_element::Rectangle::new()
            .set("class", "default-node")
            .set("width", size.width())
            .set("height", size.height());

        let mut content: Vec<SvgNode> = vec![Box::new(rect)];
        if let Some(title) = node.title() {
            let text = svg_element::Text::new(title)
                .set("x", size.width() / 2.0)
                .set("y", size.height() / 2.0)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle");
            content.push(Box::new(text));
        }
        content
    }
}

/// Maps node kinds to components.
pub struct ComponentRegistry {
    components: IndexMap<Id, Rc<dyn NodeComponent>>,
    default_node: Rc<dyn NodeComponent>,
    default_svg_node: Rc<dyn NodeComponent>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self {
            components: IndexMap::new(),
            default_node: Rc::new(NodeWidget),
            default_svg_node: Rc::new(SvgNodeWidget),
        }
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `component` for `kind`, returning the component it replaces.
    pub fn register(
        &mut self,
        kind: Id,
        component: Rc<dyn NodeComponent>,
    ) -> Option<Rc<dyn NodeComponent>> {
        self.components.insert(kind, component)
    }

    /// Removes the component registered for `kind`.
    pub fn unregister(&mut self, kind: Id) -> Option<Rc<dyn NodeComponent>> {
        self.components.shift_remove(&kind)
    }

    /// Returns the component registered for `kind`, without fallback.
    pub fn get(&self, kind: Id) -> Option<Rc<dyn NodeComponent>> {
        self.components.get(&kind).cloned()
    }

    /// Resolves the component for a node, falling back to the default for its shape.
    pub fn resolve(&self, node: &Node) -> Rc<dyn NodeComponent> {
        if let Some(component) = node.kind().and_then(|kind| self.get(kind)) {
            return component;
        }
        match node.shape() {
            NodeShape::Svg => Rc::clone(&self.default_svg_node),
            NodeShape::Html => Rc::clone(&self.default_node),
        }
    }

    /// Returns the registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = Id> + '_ {
        self.components.keys().copied()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("kinds", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}
