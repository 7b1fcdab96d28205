use lunar_toolkit::shapes::{Plane, Ray, ShapeError, Sphere};
use lunar_toolkit::vector::{DegenerateVectorError, Point3, Vector3, lerp, normalize};

fn assert_vec_close(actual: Vector3, expected: Vector3, tol: f64) {
    assert!(
        (actual - expected).length() < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

fn assert_point_close(actual: Point3, expected: Point3, tol: f64) {
    assert!(
        actual.distance(expected) < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn normalize_scales_to_unit_length() {
    let unit = normalize(Vector3::new(3.0, 4.0, 0.0)).expect("non-zero vector");
    assert_vec_close(unit, Vector3::new(0.6, 0.8, 0.0), 1e-12);
    assert!((unit.length() - 1.0).abs() < 1e-12);
}

#[test]
fn normalize_rejects_vanishing_vectors() {
    let err = normalize(Vector3::ZERO).unwrap_err();
    assert_eq!(err, DegenerateVectorError { magnitude: 0.0 });
    assert!(Vector3::new(1e-9, 0.0, 0.0).normalize().is_err());
    assert!(Vector3::new(f64::NAN, 0.0, 0.0).normalize().is_err());
}

#[test]
fn cross_product_is_right_handed() {
    assert_vec_close(Vector3::X.cross(Vector3::Y), Vector3::Z, 1e-15);
    assert_vec_close(Vector3::Y.cross(Vector3::X), -Vector3::Z, 1e-15);
    assert!(Vector3::X.dot(Vector3::Y).abs() < 1e-15);
}

#[test]
fn lerp_hits_endpoints_and_extrapolates() {
    let a = Point3::new(1.0, 1.0, 1.0);
    let b = Point3::new(3.0, 1.0, -1.0);
    assert_point_close(lerp(a, b, 0.0), a, 1e-15);
    assert_point_close(lerp(a, b, 1.0), b, 1e-15);
    assert_point_close(lerp(a, b, 0.5), a.midpoint(b), 1e-15);
    // t is not clamped
    assert_point_close(lerp(a, b, 1.5), Point3::new(4.0, 1.0, -2.0), 1e-12);
    assert_point_close(lerp(a, b, -1.0), Point3::new(-1.0, 1.0, 3.0), 1e-12);
}

#[test]
fn lerp_between_a_point_and_itself_stays_put() {
    let p = Point3::new(-0.25, 7.5, 3.0);
    for t in [-2.0, 0.0, 0.3, 1.0, 10.0] {
        assert_point_close(lerp(p, p, t), p, 1e-12);
    }
}

#[test]
fn point_and_vector_arithmetic_round_trip() {
    let p = Point3::new(0.5, -2.0, 4.0);
    let v = Vector3::new(1.0, 2.0, 3.0);
    assert_vec_close((p + v) - p, v, 1e-12);
    assert_point_close((p + v) - v, p, 1e-12);
    assert!((p.distance(p + v) - v.length()).abs() < 1e-12);
}

#[test]
fn sphere_requires_positive_radius() {
    assert!(matches!(
        Sphere::new(Point3::ORIGIN, 0.0),
        Err(ShapeError::NonPositiveRadius(r)) if r == 0.0
    ));
    assert!(Sphere::new(Point3::ORIGIN, -1.0).is_err());
    assert!(Sphere::new(Point3::ORIGIN, f64::NAN).is_err());
    let sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 2.5).expect("valid sphere");
    assert_eq!(sphere.center(), Point3::new(1.0, 2.0, 3.0));
    assert_eq!(sphere.radius(), 2.5);
}

#[test]
fn plane_normal_is_normalized_on_construction() {
    let plane = Plane::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, 5.0)).expect("plane");
    assert_vec_close(plane.normal(), Vector3::Z, 1e-15);
    assert!(Plane::new(Point3::ORIGIN, Vector3::ZERO).is_err());
}

#[test]
fn ray_keeps_supplied_direction() {
    let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, 2.0)).expect("ray");
    assert_vec_close(ray.direction(), Vector3::new(0.0, 0.0, 2.0), 1e-15);
    assert_vec_close(ray.unit_direction(), Vector3::Z, 1e-15);
    assert_point_close(ray.at(1.5), Point3::new(0.0, 0.0, 3.0), 1e-15);

    assert!(Ray::new(Point3::ORIGIN, Vector3::ZERO).is_err());
    let p = Point3::new(1.0, 1.0, 1.0);
    assert!(Ray::toward(p, p).is_err());
    let toward = Ray::toward(p, Point3::new(1.0, 1.0, 4.0)).expect("ray toward");
    assert_vec_close(toward.direction(), Vector3::Z, 1e-15);
}

#[test]
fn vectors_serialize_as_arrays() {
    let json = serde_json::to_string(&Vector3::new(1.0, 2.0, 3.0)).expect("json");
    assert_eq!(json, "[1.0,2.0,3.0]");
    let point: Point3 = serde_json::from_str("[0.5, 0.0, -1.0]").expect("point");
    assert_eq!(point, Point3::new(0.5, 0.0, -1.0));
}
