//! Rendered node elements.
//!
//! A [`RenderedNode`] is what a [`NodeRenderer`](crate::NodeRenderer) hands
//! to the host: the wrapper element with its class list, node id attribute
//! and placement, plus the inner content produced by the resolved component.
//! [`RenderedNode::into_element`] turns it into markup.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use svg::{Node as _, node::element::Element};

use vantage_core::{geometry::Point, identifier::Id, model::Node, model::NodeShape};

use crate::registry::SvgNode;

static NEXT_ELEMENT: AtomicU64 = AtomicU64::new(1);

/// Handle to a rendered element, used by the host to observe its size.
///
/// A new handle is allocated every time a node's element is created, so a
/// node that is culled and drawn again gets a different handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u64);

impl ElementRef {
    pub(crate) fn allocate() -> Self {
        Self(NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw handle value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the wrapper element is positioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// SVG `transform="translate(x y)"`.
    Transform(Point),
    /// CSS `top`/`left` in pixels.
    Style(Point),
}

impl Placement {
    fn for_node(node: &Node) -> Self {
        match node.shape() {
            NodeShape::Svg => Self::Transform(node.position()),
            NodeShape::Html => Self::Style(node.position()),
        }
    }

    /// Returns the attribute name and value this placement renders to.
    pub fn attribute(&self) -> (&'static str, String) {
        match self {
            Self::Transform(position) => (
                "transform",
                format!("translate({} {})", position.x(), position.y()),
            ),
            Self::Style(position) => (
                "style",
                format!("top: {}px; left: {}px", position.y(), position.x()),
            ),
        }
    }
}

/// A node element ready to be attached by the host.
#[derive(Debug)]
pub struct RenderedNode {
    element: ElementRef,
    node_id: Id,
    tag: &'static str,
    class: String,
    placement: Placement,
    component: String,
    content: Vec<SvgNode>,
}

impl RenderedNode {
    pub(crate) fn new(
        element: ElementRef,
        node: &Node,
        component: impl Into<String>,
        content: Vec<SvgNode>,
    ) -> Self {
        let tag = match node.shape() {
            NodeShape::Svg => "g",
            NodeShape::Html => "div",
        };
        Self {
            element,
            node_id: node.id(),
            tag,
            class: class_list(node),
            placement: Placement::for_node(node),
            component: component.into(),
            content,
        }
    }

    /// Returns the element handle the host should observe
    pub fn element(&self) -> ElementRef {
        self.element
    }

    pub fn node_id(&self) -> Id {
        self.node_id
    }

    /// Returns `g` for SVG nodes and `div` otherwise
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the name of the component that produced the inner content
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Builds the wrapper element with the component content as children.
    pub fn into_element(self) -> Element {
        let mut element = Element::new(self.tag);
        element.assign("class", self.class);
        element.assign("data-node-id", self.node_id.to_string());
        let (name, value) = self.placement.attribute();
        element.assign(name, value);
        for child in self.content {
            element.append(child);
        }
        element
    }
}

fn class_list(node: &Node) -> String {
    let mut class = String::from("diagram-node");
    if node.locked() {
        class.push_str(" locked");
    }
    if node.selected() {
        class.push_str(" selected");
    }
    if node.grouped() {
        class.push_str(" grouped");
    }
    class
}
