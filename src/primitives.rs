//! Parametric primitives as ready-to-compose X3D fragments.
//!
//! Every function validates its inputs first and only then allocates nodes,
//! so an `Err` never comes with a half-built tree. The returned `Transform`
//! is owned by the caller; an `appearance` handle, when given, is attached by
//! reference to the single `Shape` inside.

use crate::errors::{PrimitiveError, require_finite, require_positive};
use crate::float_types::{FRAC_PI_2, Real};
use crate::nodes::{
    AppearanceHandle, AxisAngle, Circle2D, Cone, IndexedFaceSet, Shape, Sphere, Transform,
};
use nalgebra::{Matrix3, Point3, RowVector3, Vector3};

/// Converts loosely typed coordinate data into a point.
///
/// Fails with `InvalidArgument` unless `coords` holds exactly three finite values.
pub fn point3(coords: &[Real]) -> Result<Point3<Real>, PrimitiveError> {
    match coords {
        [x, y, z] => finite_point("point", Point3::new(*x, *y, *z)),
        _ => Err(PrimitiveError::invalid(
            "point",
            format!("must have exactly 3 components, got {}", coords.len()),
        )),
    }
}

fn finite_point(name: &'static str, p: Point3<Real>) -> Result<Point3<Real>, PrimitiveError> {
    if p.iter().all(|c| c.is_finite()) {
        Ok(p)
    } else {
        Err(PrimitiveError::invalid(name, format!("must have finite components, got {p}")))
    }
}

/// A sphere of `radius` centred on `center`.
///
/// Returns `Transform(translation = center) -> Shape -> Sphere(radius)`.
pub fn sphere(
    center: Point3<Real>,
    radius: Real,
    appearance: Option<AppearanceHandle>,
) -> Result<Transform, PrimitiveError> {
    let center = finite_point("center", center)?;
    let radius = require_positive("radius", radius)?;

    log::debug!("sphere: radius {radius} at {center}");
    let shape = Shape::new(Sphere::new(radius), appearance);
    Ok(Transform::new(vec![shape.into()]).at(center))
}

/// The four corners of a `length` x `width` rectangle centred on the origin in
/// the y = 0 plane, tilted by `beta` radians.
///
/// Corners start in the cyclic order `(+x,+z) (-x,+z) (-x,-z) (+x,-z)` and each
/// is multiplied as a row vector by
///
/// ```text
/// [  cos β   sin β   0 ]
/// [ -sin β   cos β   0 ]
/// [  0       0       1 ]
/// ```
///
/// Swapping that for its transpose reverses the tilt direction.
pub fn tilted_plane_corners(length: Real, width: Real, beta: Real) -> [Point3<Real>; 4] {
    let (hl, hw) = (length * 0.5, width * 0.5);
    let (sin, cos) = beta.sin_cos();
    #[rustfmt::skip]
    let tilt = Matrix3::new(
         cos, sin, 0.0,
        -sin, cos, 0.0,
         0.0, 0.0, 1.0,
    );

    [(hl, hw), (-hl, hw), (-hl, -hw), (hl, -hw)].map(|(x, z)| {
        let row: RowVector3<Real> = RowVector3::new(x, 0.0, z) * tilt;
        Point3::new(row[0], row[1], row[2])
    })
}

/// A flat, two-sided rectangular panel (ramp, ground plane, reference plane).
///
/// Returns `Transform(identity) -> Shape -> IndexedFaceSet` with the corners of
/// [`tilted_plane_corners`] joined by one face `0 1 2 3 -1` and `solid = false`.
pub fn tilted_plane(
    length: Real,
    width: Real,
    beta: Real,
    appearance: Option<AppearanceHandle>,
) -> Result<Transform, PrimitiveError> {
    let length = require_positive("length", length)?;
    let width = require_positive("width", width)?;
    let beta = require_finite("beta", beta)?;

    log::debug!("tilted plane: {length} x {width}, beta {beta} rad");
    let corners = tilted_plane_corners(length, width, beta);
    let panel = IndexedFaceSet::from_faces(corners.to_vec(), &[&[0, 1, 2, 3]]).two_sided();
    let shape = Shape::new(panel, appearance);
    Ok(Transform::new(vec![shape.into()]))
}

/// Base radius of a cone `total_height` tall whose slant makes `half_angle`
/// radians with its axis.
pub fn cone_bottom_radius(total_height: Real, half_angle: Real) -> Result<Real, PrimitiveError> {
    let total_height = require_positive("total_height", total_height)?;
    let half_angle = require_finite("half_angle", half_angle)?;
    if !(0.0..FRAC_PI_2).contains(&half_angle) {
        return Err(PrimitiveError::invalid(
            "half_angle",
            format!("must lie in [0, pi/2), got {half_angle}"),
        ));
    }

    let radius = total_height * half_angle.tan();
    // tan blows up just below pi/2 as well
    require_finite("half_angle", radius)
}

/// A cone whose apex sits at `vertex_height` on the y axis, opening downwards.
///
/// Returns `Transform(0, vertex_height - total_height/2, 0) -> Shape -> Cone`.
/// `half_angle = 0` yields a degenerate cone of radius zero.
pub fn cone(
    vertex_height: Real,
    total_height: Real,
    half_angle: Real,
    appearance: Option<AppearanceHandle>,
) -> Result<Transform, PrimitiveError> {
    let vertex_height = require_finite("vertex_height", vertex_height)?;
    let bottom_radius = cone_bottom_radius(total_height, half_angle)?;

    log::debug!(
        "cone: apex at y={vertex_height}, height {total_height}, bottom radius {bottom_radius}"
    );
    let shape = Shape::new(Cone::new(bottom_radius, total_height), appearance);
    Ok(Transform::new(vec![shape.into()])
        .with_translation(Vector3::new(0.0, vertex_height - total_height * 0.5, 0.0)))
}

/// A circle of `radius` lying in the horizontal (x-z) plane around `center`.
///
/// Returns `Transform(center) -> Transform(rotation 1 0 0 pi/2) -> Shape -> Circle2D`.
/// The circle is always horizontal; passing any `normal` fails with
/// `NotImplemented` and builds nothing.
pub fn circle(
    center: Point3<Real>,
    radius: Real,
    normal: Option<Vector3<Real>>,
    appearance: Option<AppearanceHandle>,
) -> Result<Transform, PrimitiveError> {
    if let Some(normal) = normal {
        return Err(PrimitiveError::NotImplemented(format!(
            "circle orientation along a custom normal {normal:?}"
        )));
    }
    let center = finite_point("center", center)?;
    let radius = require_positive("radius", radius)?;

    log::debug!("circle: radius {radius} at {center}");
    let shape = Shape::new(Circle2D::new(radius), appearance);
    let laid_flat = Transform::new(vec![shape.into()])
        .with_rotation(AxisAngle::new(Vector3::x(), FRAC_PI_2));
    Ok(Transform::new(vec![laid_flat.into()]).at(center))
}
