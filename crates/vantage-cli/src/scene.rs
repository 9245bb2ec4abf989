//! Scene fixtures.
//!
//! A scene describes nodes, an initial viewport and a list of steps that
//! a headless host replays. Scenes are TOML documents:
//!
//! ```toml
//! [viewport]
//! container = [800.0, 600.0]
//! zoom = 1.0
//!
//! [[nodes]]
//! id = "api"
//! position = [40.0, 40.0]
//! title = "API"
//! ports = [{ id = "api-out", alignment = "right" }]
//!
//! [[steps]]
//! action = "resize"
//! node = "api"
//! size = [120.0, 60.0]
//! ```

use serde::Deserialize;

use vantage::{
    VantageError,
    geometry::{Point, Size},
    identifier::Id,
    model::{Node, NodeShape, PortAlignment},
};

pub(crate) fn to_point([x, y]: [f32; 2]) -> Point {
    Point::new(x, y)
}

pub(crate) fn to_size([width, height]: [f32; 2]) -> Size {
    Size::new(width, height)
}

/// A parsed scene fixture.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    viewport: ViewportSpec,

    #[serde(default)]
    nodes: Vec<NodeSpec>,

    #[serde(default)]
    steps: Vec<Step>,
}

impl Scene {
    /// Parses a scene from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Scene`] if the source is not a valid scene.
    pub fn parse(source: &str) -> Result<Self, VantageError> {
        toml::from_str(source).map_err(|e| VantageError::Scene(e.to_string()))
    }

    pub fn viewport(&self) -> &ViewportSpec {
        &self.viewport
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Initial viewport of a scene.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportSpec {
    pan: Option<[f32; 2]>,
    zoom: Option<f32>,
    container: Option<[f32; 2]>,
}

impl ViewportSpec {
    pub fn pan(&self) -> Option<Point> {
        self.pan.map(to_point)
    }

    pub fn zoom(&self) -> Option<f32> {
        self.zoom
    }

    pub fn container(&self) -> Option<Size> {
        self.container.map(to_size)
    }
}

/// A node declaration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    id: Id,
    position: [f32; 2],
    size: Option<[f32; 2]>,
    kind: Option<Id>,
    #[serde(default)]
    shape: NodeShape,
    title: Option<String>,
    #[serde(default)]
    controlled_size: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    selected: bool,
    group: Option<Id>,
    #[serde(default)]
    ports: Vec<PortSpec>,
}

/// A port declaration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortSpec {
    id: Id,
    alignment: PortAlignment,
}

impl NodeSpec {
    pub fn id(&self) -> Id {
        self.id
    }

    /// Builds the node model.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Scene`] if `controlled_size` is set without a size.
    pub fn to_node(&self) -> Result<Node, VantageError> {
        let mut node = Node::new(self.id, to_point(self.position))
            .with_shape(self.shape)
            .with_locked(self.locked)
            .with_selected(self.selected);

        match (self.size.map(to_size), self.controlled_size) {
            (Some(size), true) => node = node.with_controlled_size(size),
            (Some(size), false) => node = node.with_size(size),
            (None, true) => {
                return Err(VantageError::Scene(format!(
                    "node `{}` has a controlled size but no `size`",
                    self.id
                )));
            }
            (None, false) => {}
        }
        if let Some(kind) = self.kind {
            node = node.with_kind(kind);
        }
        if let Some(title) = &self.title {
            node = node.with_title(title.as_str());
        }
        if let Some(group) = self.group {
            node = node.with_group(group);
        }
        for port in &self.ports {
            node = node.with_port(port.id, port.alignment);
        }
        Ok(node)
    }
}

/// One replay step. Points and sizes are `[x, y]` / `[width, height]` pairs
/// in screen space.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Pan { to: [f32; 2] },
    PanBy { delta: [f32; 2] },
    Zoom { zoom: f32 },
    Container { size: [f32; 2] },
    Resize { node: Id, size: [f32; 2] },
    PointerDown {
        node: Id,
        #[serde(default)]
        at: [f32; 2],
    },
    PointerUp {
        node: Id,
        #[serde(default)]
        at: [f32; 2],
    },
    MouseEnter { node: Id },
    MouseLeave { node: Id },
    Virtualization { enabled: bool },
    Select { node: Id, selected: bool },
}

impl Step {
    /// Returns the step's action name as written in the scene
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pan { .. } => "pan",
            Self::PanBy { .. } => "pan-by",
            Self::Zoom { .. } => "zoom",
            Self::Container { .. } => "container",
            Self::Resize { .. } => "resize",
            Self::PointerDown { .. } => "pointer-down",
            Self::PointerUp { .. } => "pointer-up",
            Self::MouseEnter { .. } => "mouse-enter",
            Self::MouseLeave { .. } => "mouse-leave",
            Self::Virtualization { .. } => "virtualization",
            Self::Select { .. } => "select",
        }
    }
}
