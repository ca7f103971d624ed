//! Scene graph for the atom visualization.
//!
//! The [`Scene`] is an arena of transform nodes. Nodes are addressed by
//! [`NodeId`] handles that only the scene can mint, and a parent is always
//! inserted before its children, so world matrices resolve in a single
//! forward pass over the arena.
//!
//! Geometry and material descriptors live in side tables addressed by
//! [`GeometryId`] and [`MaterialId`], so several meshes can share one
//! material (the electrons do) while the nucleus keeps its own.

/// Builds the atom: nucleus, orbit groups, trails, rings, and lights.
pub mod builder;
/// Shape descriptors and their triangle-mesh tessellation.
pub mod geometry;
/// Material descriptors (lit, unlit, line).
pub mod material;

use glam::{Mat4, Quat, Vec3};

pub use builder::{build_atom, AtomRig, OrbitingBody};
pub use geometry::{Geometry, MeshData, Vertex};
pub use material::Material;

/// Handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a geometry descriptor in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(usize);

impl GeometryId {
    /// Table index of this geometry.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a material descriptor in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

/// Local transform of a node: translation, Euler XYZ rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform rotated by the given Euler XYZ angles.
    #[must_use]
    pub fn from_rotation(rotation: Vec3) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// Identity transform translated to `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Orientation quaternion for the XYZ Euler angles (`Rx * Ry * Rz`).
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_z(self.rotation.z)
    }

    /// Local matrix: translate * rotate * scale.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.orientation(),
            self.position,
        )
    }
}

/// What a node contributes to the rendered image.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node.
    Group,
    /// Triangle mesh.
    Mesh {
        /// Shape to draw.
        geometry: GeometryId,
        /// Surface material.
        material: MaterialId,
    },
    /// Two-point line segment in the node's local frame.
    Line {
        /// Segment endpoints.
        points: [Vec3; 2],
        /// Line material.
        material: MaterialId,
    },
    /// Uniform ambient light.
    AmbientLight {
        /// Linear RGB color.
        color: Vec3,
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Omni light at the node's world position.
    PointLight {
        /// Linear RGB color.
        color: Vec3,
        /// Intensity multiplier.
        intensity: f32,
        /// Cutoff distance (0 = infinite).
        distance: f32,
    },
}

/// A single scene-graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Debug name.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Hidden nodes are skipped along with their descendants.
    pub visible: bool,
    /// Payload.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Parent node, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed scene graph.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
}

impl Scene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or as a root) and return its handle.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        transform: Transform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            transform,
            visible: true,
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Register a geometry descriptor.
    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    /// Register a material descriptor.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Mutably borrow a node's local transform.
    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    /// Replace the endpoints of a line node. No-op for other kinds.
    pub fn set_line_points(&mut self, id: NodeId, new_points: [Vec3; 2]) {
        if let NodeKind::Line { points, .. } = &mut self.nodes[id.0].kind {
            *points = new_points;
        }
    }

    /// Borrow a geometry descriptor.
    #[must_use]
    pub fn geometry(&self, id: GeometryId) -> &Geometry {
        &self.geometries[id.0]
    }

    /// All geometry descriptors in registration order.
    #[must_use]
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Borrow a material descriptor.
    #[must_use]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Mutably borrow a material descriptor.
    pub fn material_mut(&mut self, id: MaterialId) -> &mut Material {
        &mut self.materials[id.0]
    }

    /// Iterate `(id, node)` pairs in insertion order (parents first).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// World matrix of a single node.
    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        node.parent
            .map_or(local, |parent| self.world_matrix(parent) * local)
    }

    /// World matrices of every node, indexed by [`NodeId::index`].
    #[must_use]
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let world = match node.parent {
                Some(parent) => out[parent.0] * local,
                None => local,
            };
            out.push(world);
        }
        out
    }

    /// Whether a node and all of its ancestors are visible.
    #[must_use]
    pub fn is_visible(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.visible && node.parent.is_none_or(|p| self.is_visible(p))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn children_inherit_parent_transform() {
        let mut scene = Scene::new();
        let root = scene.add_node(
            "root",
            NodeKind::Group,
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
            None,
        );
        let child = scene.add_node(
            "child",
            NodeKind::Group,
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
            Some(root),
        );

        let world = scene.world_matrix(child);
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);

        let all = scene.world_matrices();
        assert_eq!(all.len(), 2);
        assert!(all[child.index()].abs_diff_eq(world, 1e-6));
        assert_eq!(scene.node(root).children(), &[child]);
        assert_eq!(scene.node(child).parent(), Some(root));
    }

    #[test]
    fn euler_rotation_applies_x_then_y() {
        // Rx(a) * Ry(b): a vector on +Z is first turned by Y, then by X.
        let t = Transform::from_rotation(Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        let v = t.matrix().transform_vector3(Vec3::Z);
        // Ry(90) takes +Z to +X; Rx(90) leaves +X alone.
        assert!((v - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let mut scene = Scene::new();
        let root = scene.add_node(
            "root",
            NodeKind::Group,
            Transform::default(),
            None,
        );
        let leaf = scene.add_node(
            "leaf",
            NodeKind::Group,
            Transform::default(),
            Some(root),
        );
        assert!(scene.is_visible(leaf));
        scene.node_mut(root).visible = false;
        assert!(!scene.is_visible(leaf));
    }

    #[test]
    fn set_line_points_ignores_non_lines() {
        let mut scene = Scene::new();
        let group = scene.add_node(
            "group",
            NodeKind::Group,
            Transform::default(),
            None,
        );
        scene.set_line_points(group, [Vec3::X, Vec3::Y]);
        assert_eq!(scene.node(group).kind, NodeKind::Group);
    }
}
