//! Geometry nodes: the leaves of every primitive tree.

use crate::float_types::Real;
use nalgebra::Point3;

/// Sentinel closing one polygon inside a flat `coordIndex` sequence.
pub const FACE_TERMINATOR: i32 = -1;

/// X3D `Sphere`, centred on its local origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub radius: Real,
}

impl Sphere {
    pub const DEFAULT_RADIUS: Real = 1.0;

    pub const fn new(radius: Real) -> Self {
        Sphere { radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere::new(Self::DEFAULT_RADIUS)
    }
}

/// X3D `Cone`. The local origin sits halfway up the axis, so the apex is at
/// `+height / 2` on y and the base at `-height / 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cone {
    pub bottom_radius: Real,
    pub height: Real,
    pub side: bool,
    pub bottom: bool,
}

impl Cone {
    pub const DEFAULT_BOTTOM_RADIUS: Real = 1.0;
    pub const DEFAULT_HEIGHT: Real = 2.0;

    pub const fn new(bottom_radius: Real, height: Real) -> Self {
        Cone { bottom_radius, height, side: true, bottom: true }
    }

    /// Apex position in the cone's local frame.
    pub fn apex(&self) -> Point3<Real> {
        Point3::new(0.0, self.height * 0.5, 0.0)
    }
}

impl Default for Cone {
    fn default() -> Self {
        Cone::new(Self::DEFAULT_BOTTOM_RADIUS, Self::DEFAULT_HEIGHT)
    }
}

/// X3D `Circle2D`: an outline in the local x-y plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle2D {
    pub radius: Real,
}

impl Circle2D {
    pub const DEFAULT_RADIUS: Real = 1.0;

    pub const fn new(radius: Real) -> Self {
        Circle2D { radius }
    }
}

impl Default for Circle2D {
    fn default() -> Self {
        Circle2D::new(Self::DEFAULT_RADIUS)
    }
}

/// X3D `Coordinate`: the point list an `IndexedFaceSet` indexes into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub point: Vec<Point3<Real>>,
}

impl Coordinate {
    pub fn new(point: Vec<Point3<Real>>) -> Self {
        Coordinate { point }
    }
}

/// X3D `IndexedFaceSet`.
///
/// `coord_index` is flat: each face lists its vertex indices and is closed by
/// [`FACE_TERMINATOR`].
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedFaceSet {
    pub coord: Coordinate,
    pub coord_index: Vec<i32>,
    pub solid: bool,
    pub ccw: bool,
    pub convex: bool,
}

impl IndexedFaceSet {
    /// Builds a face set from a point list and a set of faces, appending the
    /// terminator after each face. `solid`, `ccw` and `convex` start at their
    /// X3D defaults (`true`).
    pub fn from_faces(points: Vec<Point3<Real>>, faces: &[&[i32]]) -> Self {
        let mut coord_index = Vec::with_capacity(faces.iter().map(|f| f.len() + 1).sum());
        for face in faces {
            coord_index.extend_from_slice(face);
            coord_index.push(FACE_TERMINATOR);
        }
        IndexedFaceSet {
            coord: Coordinate::new(points),
            coord_index,
            solid: true,
            ccw: true,
            convex: true,
        }
    }

    /// Marks the face set as two-sided (`solid = false`).
    pub fn two_sided(mut self) -> Self {
        self.solid = false;
        self
    }

    /// Splits `coord_index` into faces. A trailing face without a terminator
    /// is still returned; empty runs are skipped.
    pub fn faces(&self) -> Vec<&[i32]> {
        self.coord_index
            .split(|&i| i == FACE_TERMINATOR)
            .filter(|face| !face.is_empty())
            .collect()
    }

    /// Resolves every face to its points. Out-of-range indices are dropped.
    pub fn face_points(&self) -> Vec<Vec<Point3<Real>>> {
        self.faces()
            .into_iter()
            .map(|face| {
                face.iter()
                    .filter_map(|&i| usize::try_from(i).ok())
                    .filter_map(|i| self.coord.point.get(i).copied())
                    .collect()
            })
            .collect()
    }
}

/// The geometry slot of a `Shape`.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Cone(Cone),
    Circle2D(Circle2D),
    IndexedFaceSet(IndexedFaceSet),
}

impl Geometry {
    /// The X3D element name of this geometry.
    pub const fn node_name(&self) -> &'static str {
        match self {
            Geometry::Sphere(_) => "Sphere",
            Geometry::Cone(_) => "Cone",
            Geometry::Circle2D(_) => "Circle2D",
            Geometry::IndexedFaceSet(_) => "IndexedFaceSet",
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(value: Sphere) -> Self {
        Geometry::Sphere(value)
    }
}

impl From<Cone> for Geometry {
    fn from(value: Cone) -> Self {
        Geometry::Cone(value)
    }
}

impl From<Circle2D> for Geometry {
    fn from(value: Circle2D) -> Self {
        Geometry::Circle2D(value)
    }
}

impl From<IndexedFaceSet> for Geometry {
    fn from(value: IndexedFaceSet) -> Self {
        Geometry::IndexedFaceSet(value)
    }
}
