use nalgebra::{Point3, Vector3};
use x3d_prims::{
    PrimitiveError, circle, cone,
    float_types::{FRAC_PI_2, FRAC_PI_4, PI, Real},
    nodes::{Appearance, Geometry, Material, Node, Shape},
    point3,
    primitives::{cone_bottom_radius, tilted_plane_corners},
    sphere, tilted_plane,
};

mod support;

fn panel_points(shape: &Shape) -> Vec<Point3<Real>> {
    match &shape.geometry {
        Geometry::IndexedFaceSet(ifs) => ifs.coord.point.clone(),
        other => panic!("expected an IndexedFaceSet, got {other:?}"),
    }
}

#[test]
fn sphere_is_translated_to_its_center() {
    support::init_logger();
    let t = sphere(Point3::new(1.0, 2.0, 3.0), 5.0, None).unwrap();

    assert_eq!(t.translation, Vector3::new(1.0, 2.0, 3.0));
    assert!(t.rotation.is_identity());
    let shape = support::only_shape(&t);
    assert_eq!(shape.geometry, Geometry::Sphere(x3d_prims::nodes::Sphere::new(5.0)));
    assert!(shape.appearance.is_none());
}

#[test]
fn sphere_keeps_the_given_appearance() {
    let look = Appearance::new().with_material(Material::diffuse(0.0, 0.0, 1.0)).into_handle();
    let t = sphere(Point3::origin(), 1.0, Some(look.clone())).unwrap();
    let attached = support::only_shape(&t).appearance.as_ref().unwrap();
    assert!(std::sync::Arc::ptr_eq(attached, &look));
}

#[test]
fn sphere_rejects_bad_radius() {
    for radius in [0.0, -1.0, Real::NAN, Real::INFINITY] {
        let err = sphere(Point3::origin(), radius, None).unwrap_err();
        assert!(
            matches!(err, PrimitiveError::InvalidArgument { name: "radius", .. }),
            "radius {radius} gave {err:?}"
        );
    }
}

#[test]
fn sphere_rejects_non_finite_center() {
    let err = sphere(Point3::new(0.0, Real::NAN, 0.0), 1.0, None).unwrap_err();
    assert!(matches!(err, PrimitiveError::InvalidArgument { name: "center", .. }));
}

#[test]
fn point3_requires_three_components() {
    assert_eq!(point3(&[1.0, 2.0, 3.0]).unwrap(), Point3::new(1.0, 2.0, 3.0));
    for bad in [&[][..], &[1.0, 2.0][..], &[1.0, 2.0, 3.0, 4.0][..]] {
        assert!(matches!(point3(bad), Err(PrimitiveError::InvalidArgument { name: "point", .. })));
    }
    assert!(point3(&[1.0, Real::INFINITY, 3.0]).is_err());
}

#[test]
fn tilted_plane_without_tilt_is_flat() {
    let t = tilted_plane(2.0, 4.0, 0.0, None).unwrap();
    assert!(t.has_identity_translation());
    assert!(t.rotation.is_identity());

    let shape = support::only_shape(&t);
    let expected = [
        Point3::new(1.0, 0.0, 2.0),
        Point3::new(-1.0, 0.0, 2.0),
        Point3::new(-1.0, 0.0, -2.0),
        Point3::new(1.0, 0.0, -2.0),
    ];
    let points = panel_points(shape);
    assert_eq!(points.len(), 4);
    for (got, want) in points.iter().zip(&expected) {
        assert!(support::points_approx_eq(got, want, 1e-12), "{got} != {want}");
        assert_eq!(got.y, 0.0);
    }

    let Geometry::IndexedFaceSet(ifs) = &shape.geometry else { unreachable!() };
    assert_eq!(ifs.coord_index, vec![0, 1, 2, 3, -1]);
    assert_eq!(ifs.coord_index.last(), Some(&x3d_prims::nodes::FACE_TERMINATOR));
    assert!(!ifs.solid);
}

#[test]
fn tilted_plane_preserves_corner_distances() {
    let flat = tilted_plane_corners(3.0, 1.5, 0.0);
    for beta in [0.1, 0.7, FRAC_PI_2, 2.0, PI, -1.3, 10.0] {
        let tilted = tilted_plane_corners(3.0, 1.5, beta);
        for (a, b) in flat.iter().zip(&tilted) {
            assert!(support::approx_eq(a.coords.norm(), b.coords.norm(), 1e-9), "beta {beta}");
        }
    }
}

#[test]
fn tilted_plane_follows_row_vector_convention() {
    // (x, 0, z) . M = (x cos b, x sin b, z)
    let beta: Real = 0.3;
    let corners = tilted_plane_corners(2.0, 4.0, beta);
    let want = Point3::new(beta.cos(), beta.sin(), 2.0);
    assert!(support::points_approx_eq(&corners[0], &want, 1e-12));
    let want = Point3::new(-beta.cos(), -beta.sin(), -2.0);
    assert!(support::points_approx_eq(&corners[2], &want, 1e-12));
}

#[test]
fn tilted_plane_matches_its_corner_helper() {
    let t = tilted_plane(5.0, 2.0, 0.4, None).unwrap();
    assert_eq!(panel_points(support::only_shape(&t)), tilted_plane_corners(5.0, 2.0, 0.4).to_vec());
}

#[test]
fn tilted_plane_rejects_degenerate_sizes() {
    assert!(matches!(
        tilted_plane(0.0, 1.0, 0.0, None),
        Err(PrimitiveError::InvalidArgument { name: "length", .. })
    ));
    assert!(matches!(
        tilted_plane(1.0, -1.0, 0.0, None),
        Err(PrimitiveError::InvalidArgument { name: "width", .. })
    ));
    assert!(matches!(
        tilted_plane(1.0, 1.0, Real::NAN, None),
        Err(PrimitiveError::InvalidArgument { name: "beta", .. })
    ));
}

#[test]
fn cone_radius_and_placement() {
    let t = cone(10.0, 4.0, FRAC_PI_4, None).unwrap();
    assert!(support::approx_eq(t.translation.y, 8.0, 1e-12));
    assert_eq!(t.translation.x, 0.0);
    assert_eq!(t.translation.z, 0.0);

    let Geometry::Cone(c) = &support::only_shape(&t).geometry else {
        panic!("expected a cone");
    };
    assert!(support::approx_eq(c.bottom_radius, 4.0, 1e-9));
    assert_eq!(c.height, 4.0);
}

#[test]
fn cone_apex_lands_on_vertex_height() {
    let t = cone(3.5, 2.0, 0.6, None).unwrap();
    let Geometry::Cone(c) = &support::only_shape(&t).geometry else { unreachable!() };
    let apex = t.to_homogeneous().transform_point(&c.apex());
    assert!(support::points_approx_eq(&apex, &Point3::new(0.0, 3.5, 0.0), 1e-12));
}

#[test]
fn cone_with_zero_half_angle_is_a_line() {
    let t = cone(1.0, 2.0, 0.0, None).unwrap();
    let Geometry::Cone(c) = &support::only_shape(&t).geometry else { unreachable!() };
    assert_eq!(c.bottom_radius, 0.0);
}

#[test]
fn cone_rejects_out_of_range_angles() {
    for half_angle in [FRAC_PI_2, 2.0, PI, -0.1, Real::NAN] {
        assert!(
            matches!(
                cone(1.0, 2.0, half_angle, None),
                Err(PrimitiveError::InvalidArgument { name: "half_angle", .. })
            ),
            "half_angle {half_angle}"
        );
    }
    assert!(matches!(
        cone_bottom_radius(0.0, 0.5),
        Err(PrimitiveError::InvalidArgument { name: "total_height", .. })
    ));
    assert!(matches!(
        cone(Real::INFINITY, 2.0, 0.5, None),
        Err(PrimitiveError::InvalidArgument { name: "vertex_height", .. })
    ));
}

#[test]
fn circle_is_laid_into_the_horizontal_plane() {
    let t = circle(Point3::origin(), 3.0, None, None).unwrap();
    assert!(t.has_identity_translation());
    assert_eq!(t.shapes().count(), 0);

    let inner: Vec<_> = t.transforms().collect();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].rotation.axis, Vector3::x());
    assert_eq!(inner[0].rotation.angle, FRAC_PI_2);
    assert!(inner[0].has_identity_translation());
    assert_eq!(
        support::only_shape(inner[0]).geometry,
        Geometry::Circle2D(x3d_prims::nodes::Circle2D::new(3.0))
    );

    // local +y of the 2D circle ends up on world +z, so the circle spans x-z
    let mut mapped = None;
    t.visit_shapes(|_, m| mapped = Some(m.transform_vector(&Vector3::y())));
    let mapped = mapped.unwrap();
    assert!((mapped - Vector3::z()).norm() < 1e-12);
}

#[test]
fn circle_is_translated_to_its_center() {
    let t = circle(Point3::new(-1.0, 4.0, 2.5), 0.5, None, None).unwrap();
    assert_eq!(t.translation, Vector3::new(-1.0, 4.0, 2.5));
    let origins = support::shape_origins(&t);
    assert_eq!(origins.len(), 1);
    assert!(support::points_approx_eq(&origins[0].1, &Point3::new(-1.0, 4.0, 2.5), 1e-12));
}

#[test]
fn circle_with_a_normal_is_not_implemented() {
    for normal in [Vector3::y(), Vector3::x(), Vector3::new(1.0, 1.0, 0.0)] {
        let result = circle(Point3::origin(), 1.0, Some(normal), None);
        assert!(matches!(result, Err(PrimitiveError::NotImplemented(_))));
    }
    assert!(circle(Point3::origin(), 0.0, None, None).is_err());
}

#[test]
fn one_appearance_shared_across_primitives() {
    let look = Appearance::new()
        .with_name("Shared")
        .with_material(Material::diffuse(0.2, 0.6, 0.2).with_emissive(0.1, 0.1, 0.1))
        .into_handle();

    let ball = sphere(Point3::origin(), 1.0, Some(look.clone())).unwrap();
    let panel = tilted_plane(1.0, 1.0, 0.2, Some(look.clone())).unwrap();
    let ring = circle(Point3::origin(), 1.0, None, Some(look.clone())).unwrap();

    let mut shapes = Vec::new();
    for t in [&ball, &panel, &ring] {
        t.visit_shapes(|shape, _| shapes.push(shape.clone()));
    }
    assert_eq!(shapes.len(), 3);
    assert!(shapes[0].shares_appearance_with(&shapes[1]));
    assert!(shapes[1].shares_appearance_with(&shapes[2]));
    // the local handle, one per tree, one per collected clone
    assert_eq!(std::sync::Arc::strong_count(&look), 7);
}

#[test]
fn failed_calls_do_not_hold_on_to_the_appearance() {
    let look = Appearance::new().into_handle();
    assert!(cone(1.0, 1.0, FRAC_PI_2, Some(look.clone())).is_err());
    assert!(circle(Point3::origin(), 1.0, Some(Vector3::z()), Some(look.clone())).is_err());
    assert_eq!(std::sync::Arc::strong_count(&look), 1);
}

#[test]
fn primitives_compose_into_one_tree() {
    let scene = x3d_prims::nodes::Transform::new(vec![
        sphere(Point3::new(0.0, 1.0, 0.0), 0.25, None).unwrap().into(),
        cone(2.0, 1.0, 0.4, None).unwrap().into(),
        Node::from(circle(Point3::origin(), 1.0, None, None).unwrap()),
    ]);
    let origins = support::shape_origins(&scene);
    let names: Vec<_> = origins.iter().map(|(g, _)| g.node_name()).collect();
    assert_eq!(names, ["Sphere", "Cone", "Circle2D"]);
    assert!(support::points_approx_eq(&origins[1].1, &Point3::new(0.0, 1.5, 0.0), 1e-12));
}
