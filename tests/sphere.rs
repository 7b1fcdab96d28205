use std::f64::consts::FRAC_PI_2;

use lunar_toolkit::geometry::{
    GeometryError, Intersection, NoHit, angular_separation, arc_points, cylinder_between,
    intersect_ray_sphere, project_onto_sphere, slerp_on_sphere, view_surface_point,
};
use lunar_toolkit::shapes::{Ray, Sphere};
use lunar_toolkit::vector::{Point3, Vector3};

fn unit_sphere() -> Sphere {
    Sphere::centered(1.0).expect("sphere")
}

fn assert_point_close(actual: Point3, expected: Point3, tol: f64) {
    assert!(
        actual.distance(expected) < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn ray_from_above_hits_the_north_pole() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::Z).expect("ray");
    match intersect_ray_sphere(&ray, &unit_sphere()) {
        Intersection::Hit { point, t } => {
            assert_point_close(point, Point3::new(0.0, 0.0, 1.0), 1e-12);
            assert!((t - 4.0).abs() < 1e-12);
        }
        other => panic!("expected a hit, got {other:?}"),
    }
}

#[test]
fn sphere_intersection_normalizes_direction() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -10.0)).expect("ray");
    let Intersection::Hit { t, .. } = intersect_ray_sphere(&ray, &unit_sphere()) else {
        panic!("expected a hit");
    };
    assert!((t - 4.0).abs() < 1e-12, "t is a metric distance, got {t}");
}

#[test]
fn ray_beside_the_sphere_misses() {
    let ray = Ray::new(Point3::new(2.0, 2.0, 5.0), -Vector3::Z).expect("ray");
    assert_eq!(
        intersect_ray_sphere(&ray, &unit_sphere()),
        Intersection::NoHit(NoHit::Missed)
    );
}

#[test]
fn origin_inside_or_past_the_sphere_is_behind() {
    let inside = Ray::new(Point3::ORIGIN, Vector3::X).expect("ray");
    assert_eq!(
        intersect_ray_sphere(&inside, &unit_sphere()),
        Intersection::NoHit(NoHit::BehindOrigin)
    );
    let past = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::Z).expect("ray");
    assert_eq!(
        intersect_ray_sphere(&past, &unit_sphere()),
        Intersection::NoHit(NoHit::BehindOrigin)
    );
}

#[test]
fn grazing_ray_touches_the_surface() {
    let ray = Ray::new(Point3::new(1.0, 0.0, 5.0), -Vector3::Z).expect("ray");
    let hit = intersect_ray_sphere(&ray, &unit_sphere()).point().expect("tangent hit");
    assert_point_close(hit, Point3::new(1.0, 0.0, 0.0), 1e-9);
}

#[test]
fn offset_sphere_is_respected() {
    let sphere = Sphere::new(Point3::new(10.0, 0.0, 0.0), 2.0).expect("sphere");
    let ray = Ray::toward(Point3::ORIGIN, Point3::new(10.0, 0.0, 0.0)).expect("ray");
    let hit = intersect_ray_sphere(&ray, &sphere).point().expect("hit");
    assert_point_close(hit, Point3::new(8.0, 0.0, 0.0), 1e-12);
}

#[test]
fn single_segment_arc_is_the_projected_endpoints() {
    let sphere = unit_sphere();
    let a = Point3::new(2.0, 0.0, 0.0);
    let b = Point3::new(0.0, 0.0, 3.0);
    let points = arc_points(a, b, &sphere, 1).expect("arc");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0], project_onto_sphere(a, &sphere).expect("a"));
    assert_eq!(points[1], project_onto_sphere(b, &sphere).expect("b"));
}

#[test]
fn arc_to_itself_repeats_the_point() {
    let sphere = unit_sphere();
    let a = Point3::new(0.3, -0.4, 0.5);
    let projected = project_onto_sphere(a, &sphere).expect("projection");
    let points = arc_points(a, a, &sphere, 6).expect("arc");
    assert_eq!(points.len(), 7);
    for p in points {
        assert_point_close(p, projected, 1e-12);
    }
}

#[test]
fn arc_points_stay_on_the_great_circle() {
    let sphere = Sphere::new(Point3::new(1.0, -1.0, 0.5), 3.0).expect("sphere");
    let a = sphere.center() + Vector3::new(3.0, 0.0, 0.0);
    let b = sphere.center() + Vector3::new(0.0, 3.0, 0.0);
    let points = arc_points(a, b, &sphere, 16).expect("arc");
    assert_eq!(points.len(), 17);
    assert_eq!(points[0], a);
    assert_eq!(points[16], b);
    for p in &points {
        let offset = *p - sphere.center();
        assert!((offset.length() - 3.0).abs() < 1e-12);
        assert!(offset.z.abs() < 1e-12, "off the great circle: {p:?}");
    }
    // symmetric endpoints meet at the true midpoint direction
    let mid = points[8] - sphere.center();
    assert!((mid.x - mid.y).abs() < 1e-12);
}

#[test]
fn zero_segments_are_rejected() {
    let sphere = unit_sphere();
    assert_eq!(
        arc_points(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0), &sphere, 0),
        Err(GeometryError::ZeroSegments)
    );
}

#[test]
fn antipodal_midpoint_is_degenerate() {
    let sphere = unit_sphere();
    let a = Point3::new(1.0, 0.0, 0.0);
    let b = Point3::new(-1.0, 0.0, 0.0);
    assert!(slerp_on_sphere(a, b, 0.5, &sphere).is_err());
    assert!(matches!(
        arc_points(a, b, &sphere, 2),
        Err(GeometryError::Degenerate(_))
    ));
}

#[test]
fn slerp_endpoints_and_separation() {
    let sphere = unit_sphere();
    let a = Point3::new(1.0, 0.0, 0.0);
    let b = Point3::new(0.0, 0.0, 1.0);
    assert_point_close(slerp_on_sphere(a, b, 0.0, &sphere).expect("t=0"), a, 1e-12);
    assert_point_close(slerp_on_sphere(a, b, 1.0, &sphere).expect("t=1"), b, 1e-12);
    let separation = angular_separation(a, b, &sphere).expect("separation");
    assert!((separation - FRAC_PI_2).abs() < 1e-12);
    assert!(project_onto_sphere(sphere.center(), &sphere).is_err());
}

#[test]
fn slerp_outside_the_unit_interval_stays_on_the_sphere() {
    let sphere = Sphere::new(Point3::new(1.0, -2.0, 0.5), 2.0).expect("sphere");
    let a = sphere.center() + Vector3::X * 2.0;
    let b = sphere.center() + Vector3::Z * 2.0;
    for t in [-0.5, 1.5, 3.0] {
        let p = slerp_on_sphere(a, b, t, &sphere).expect("off-interval slerp");
        assert!(
            (p.distance(sphere.center()) - sphere.radius()).abs() < 1e-12,
            "t = {t} left the sphere: {p:?}"
        );
    }
    // t < 0 continues past `a` away from `b`
    let before = slerp_on_sphere(a, b, -0.5, &sphere).expect("t=-0.5");
    assert!(before.z < sphere.center().z);
}

#[test]
fn view_point_lies_under_the_look_line() {
    let sphere = unit_sphere();
    let eye = Point3::new(0.0, 0.0, 3.0);
    let through_center = view_surface_point(eye, -Vector3::Z, &sphere).expect("view point");
    assert_point_close(through_center, Point3::new(0.0, 0.0, 1.0), 1e-12);

    let offset = view_surface_point(Point3::new(0.5, 0.0, 3.0), -Vector3::Z, &sphere)
        .expect("view point");
    assert!((offset.to_vector().length() - 1.0).abs() < 1e-12);
    assert!(offset.x > 0.99);
}

#[test]
fn cylinder_spans_its_endpoints() {
    let p1 = Point3::new(0.0, 0.0, 1.0);
    let p2 = Point3::new(2.0, 0.0, 1.0);
    let pose = cylinder_between(p1, p2).expect("pose");
    assert_point_close(pose.midpoint, Point3::new(1.0, 0.0, 1.0), 1e-12);
    assert!((pose.length - 2.0).abs() < 1e-12);
    let axis = pose.orientation.rotate(Vector3::Z);
    assert!((axis - Vector3::X).length() < 1e-12);
    assert!(cylinder_between(p1, p1).is_err());
}
