use std::f64::consts::{FRAC_PI_2, PI};

use lunar_toolkit::geometry::{ConicOrbit, GeometryError};
use lunar_toolkit::vector::{Point3, Vector3};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual}"
    );
}

fn assert_vec_close(actual: Vector3, expected: Vector3, tol: f64) {
    assert!(
        (actual - expected).length() < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn ellipse_spans_periapsis_to_apoapsis() {
    let orbit = ConicOrbit::new(2.5, 0.5, 0.0).expect("ellipse");
    assert!(!orbit.is_hyperbolic());
    assert_close(orbit.periapsis(), 1.25, 1e-12);
    assert_vec_close(
        orbit.offset_at(0.0).expect("periapsis"),
        Vector3::new(1.25, 0.0, 0.0),
        1e-12,
    );
    assert_vec_close(
        orbit.offset_at(PI).expect("apoapsis"),
        Vector3::new(-3.75, 0.0, 0.0),
        1e-12,
    );
    assert!(orbit.true_anomaly_limit().is_none());
}

#[test]
fn trail_points_satisfy_the_focal_equation() {
    let orbit = ConicOrbit::new(3.0, 0.3, 25.0).expect("ellipse");
    let focus = Point3::new(1.0, -1.0, 2.0);
    let trail = orbit.trail(focus, 0.0, 2.0 * PI, 36).expect("trail");
    assert_eq!(trail.len(), 37);
    let p = orbit.semi_latus_rectum();
    for (i, point) in trail.iter().enumerate() {
        let nu = 2.0 * PI * i as f64 / 36.0;
        let r = point.distance(focus);
        assert_close(r, p / (1.0 + 0.3 * nu.cos()), 1e-9);
    }
    // closed orbits come back to where they started
    assert!(trail[0].distance(trail[36]) < 1e-9);
}

#[test]
fn inclination_tilts_the_plane_about_x() {
    let flat = ConicOrbit::new(2.0, 0.0, 0.0).expect("circle");
    let polar = ConicOrbit::new(2.0, 0.0, 90.0).expect("polar circle");
    assert_vec_close(
        flat.offset_at(FRAC_PI_2).expect("flat"),
        Vector3::new(0.0, 2.0, 0.0),
        1e-12,
    );
    assert_vec_close(
        polar.offset_at(FRAC_PI_2).expect("polar"),
        Vector3::new(0.0, 0.0, 2.0),
        1e-12,
    );
    for i in 0..12 {
        let nu = i as f64 * PI / 6.0;
        assert!(polar.offset_at(nu).expect("polar").y.abs() < 1e-12);
    }
}

#[test]
fn hyperbola_is_bounded_by_its_asymptotes() {
    let orbit = ConicOrbit::new(2.5, 1.5, 0.0).expect("hyperbola");
    assert!(orbit.is_hyperbolic());
    let limit = orbit.true_anomaly_limit().expect("limit");
    assert_close(limit, (-1.0f64 / 1.5).acos(), 1e-12);
    assert_close(orbit.periapsis(), 1.25, 1e-12);

    assert!(orbit.offset_at(limit * 0.99).is_ok());
    assert!(matches!(
        orbit.offset_at(limit),
        Err(GeometryError::BeyondAsymptote(_))
    ));
    assert!(matches!(
        orbit.offset_at(PI),
        Err(GeometryError::BeyondAsymptote(_))
    ));
}

#[test]
fn anomaly_at_radius_lands_on_that_radius() {
    let ellipse = ConicOrbit::new(2.5, 0.5, 10.0).expect("ellipse");
    let hyperbola = ConicOrbit::new(2.5, 1.5, 10.0).expect("hyperbola");
    for (orbit, radius) in [(ellipse, 2.0), (ellipse, 3.75), (hyperbola, 8.0)] {
        let nu = orbit.anomaly_at_radius(radius).expect("reachable radius");
        assert!((0.0..=PI).contains(&nu));
        assert_close(orbit.offset_at(nu).expect("offset").length(), radius, 1e-9);
    }
    // inside periapsis, beyond apoapsis, and a circle of another radius never get there
    assert!(ellipse.anomaly_at_radius(1.0).is_none());
    assert!(ellipse.anomaly_at_radius(4.0).is_none());
    let circle = ConicOrbit::new(2.0, 0.0, 0.0).expect("circle");
    assert!(circle.anomaly_at_radius(2.0).is_none());
}

#[test]
fn degenerate_conics_are_rejected() {
    for (a, e) in [
        (2.0, 1.0),
        (0.0, 0.5),
        (-1.0, 0.5),
        (2.0, -0.1),
        (f64::NAN, 0.5),
        (2.0, f64::INFINITY),
    ] {
        assert!(
            matches!(
                ConicOrbit::new(a, e, 0.0),
                Err(GeometryError::InvalidConic { .. })
            ),
            "a = {a}, e = {e} should be rejected"
        );
    }
    assert!(ConicOrbit::new(2.0, 0.5, f64::NAN).is_err());
}

#[test]
fn trail_needs_at_least_one_segment() {
    let orbit = ConicOrbit::new(1.5, 0.1, 0.0).expect("ellipse");
    assert!(matches!(
        orbit.trail(Point3::ORIGIN, 0.0, PI, 0),
        Err(GeometryError::ZeroSegments)
    ));
    let single = orbit.trail(Point3::ORIGIN, 0.0, PI, 1).expect("one segment");
    assert_eq!(single.len(), 2);
}
