//! The X3D node vocabulary the primitives are built from.
//!
//! Only the handful of node kinds the factory needs are modelled: grouping
//! (`Transform`), the `Shape` that pairs geometry with an optional shared
//! `Appearance`, and the geometry leaves. Field names and defaults follow the
//! X3D standard; rotations use X3D's axis-angle form.

use crate::float_types::{Real, nearly_equal};
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Unit, Vector3};

pub mod appearance;
pub mod geometry;

pub use appearance::{Appearance, AppearanceHandle, Material};
pub use geometry::{Circle2D, Cone, Coordinate, FACE_TERMINATOR, Geometry, IndexedFaceSet, Sphere};

/// X3D `Shape`: one geometry node plus an optional appearance reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub appearance: Option<AppearanceHandle>,
}

impl Shape {
    pub fn new(geometry: impl Into<Geometry>, appearance: Option<AppearanceHandle>) -> Self {
        Shape { geometry: geometry.into(), appearance }
    }

    /// `true` if both shapes reference the very same appearance allocation.
    pub fn shares_appearance_with(&self, other: &Shape) -> bool {
        match (&self.appearance, &other.appearance) {
            (Some(a), Some(b)) => AppearanceHandle::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Axis-angle rotation `(x, y, z, angle)` with the angle in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAngle {
    pub axis: Vector3<Real>,
    pub angle: Real,
}

impl AxisAngle {
    pub fn new(axis: Vector3<Real>, angle: Real) -> Self {
        AxisAngle { axis, angle }
    }

    /// The X3D default `0 0 1 0`.
    pub fn identity() -> Self {
        AxisAngle::new(Vector3::z(), 0.0)
    }

    /// A zero angle or a zero axis both leave points where they are.
    pub fn is_identity(&self) -> bool {
        nearly_equal(self.angle, 0.0) || nearly_equal(self.axis.norm(), 0.0)
    }

    pub fn to_rotation(&self) -> Rotation3<Real> {
        match Unit::try_new(self.axis, Real::EPSILON) {
            Some(axis) => Rotation3::from_axis_angle(&axis, self.angle),
            None => Rotation3::identity(),
        }
    }

    /// The four X3D field values in order.
    pub fn to_array(&self) -> [Real; 4] {
        [self.axis.x, self.axis.y, self.axis.z, self.angle]
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        AxisAngle::identity()
    }
}

/// X3D `Transform`: a translation and rotation applied to its children.
///
/// Children are rotated first, then translated.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<Real>,
    pub rotation: AxisAngle,
    pub children: Vec<Node>,
}

impl Transform {
    pub fn new(children: Vec<Node>) -> Self {
        Transform { translation: Vector3::zeros(), rotation: AxisAngle::identity(), children }
    }

    pub fn with_translation(mut self, translation: Vector3<Real>) -> Self {
        self.translation = translation;
        self
    }

    /// Translate so the local origin lands on `point`.
    pub fn at(self, point: Point3<Real>) -> Self {
        self.with_translation(point.coords)
    }

    pub fn with_rotation(mut self, rotation: AxisAngle) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn has_identity_translation(&self) -> bool {
        self.translation.iter().all(|&c| nearly_equal(c, 0.0))
    }

    /// Local-to-parent matrix `T * R`.
    pub fn to_homogeneous(&self) -> Matrix4<Real> {
        Translation3::from(self.translation).to_homogeneous()
            * self.rotation.to_rotation().to_homogeneous()
    }

    /// Every `Shape` directly inside this transform (not nested ones).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.children.iter().filter_map(Node::as_shape)
    }

    /// Every `Transform` directly inside this transform.
    pub fn transforms(&self) -> impl Iterator<Item = &Transform> {
        self.children.iter().filter_map(Node::as_transform)
    }

    /// Calls `f` for every `Shape` in the subtree with the matrix taking its
    /// local coordinates into this transform's parent frame.
    pub fn visit_shapes<F>(&self, mut f: F)
    where
        F: FnMut(&Shape, &Matrix4<Real>),
    {
        self.visit_shapes_from(&Matrix4::identity(), &mut f);
    }

    fn visit_shapes_from<F>(&self, parent: &Matrix4<Real>, f: &mut F)
    where
        F: FnMut(&Shape, &Matrix4<Real>),
    {
        let world = parent * self.to_homogeneous();
        for child in &self.children {
            match child {
                Node::Shape(shape) => f(shape, &world),
                Node::Transform(transform) => transform.visit_shapes_from(&world, f),
            }
        }
    }
}

/// A child of a `Transform`.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Transform(Transform),
    Shape(Shape),
}

impl Node {
    pub const fn as_shape(&self) -> Option<&Shape> {
        match self {
            Node::Shape(shape) => Some(shape),
            Node::Transform(_) => None,
        }
    }

    pub const fn as_transform(&self) -> Option<&Transform> {
        match self {
            Node::Transform(transform) => Some(transform),
            Node::Shape(_) => None,
        }
    }

    /// See [`Transform::visit_shapes`]. A bare `Shape` is visited with the identity.
    pub fn visit_shapes<F>(&self, mut f: F)
    where
        F: FnMut(&Shape, &Matrix4<Real>),
    {
        match self {
            Node::Shape(shape) => f(shape, &Matrix4::identity()),
            Node::Transform(transform) => transform.visit_shapes(f),
        }
    }
}

impl From<Transform> for Node {
    fn from(value: Transform) -> Self {
        Node::Transform(value)
    }
}

impl From<Shape> for Node {
    fn from(value: Shape) -> Self {
        Node::Shape(value)
    }
}
