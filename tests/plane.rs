use lunar_toolkit::geometry::{
    Intersection, NoHit, intersect_ray_plane, project_point_onto_plane, signed_distance,
};
use lunar_toolkit::shapes::{Plane, Ray};
use lunar_toolkit::vector::{Point3, Vector3};

fn ground() -> Plane {
    Plane::new(Point3::ORIGIN, Vector3::Z).expect("plane")
}

#[test]
fn projection_lands_on_the_plane() {
    let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 3.0)).expect("plane");
    let projected = project_point_onto_plane(Point3::new(2.0, -1.0, 4.0), &plane);
    assert!(projected.distance(Point3::new(2.0, -1.0, 1.0)) < 1e-12);
    assert!(signed_distance(projected, &plane).abs() < 1e-12);
}

#[test]
fn projection_of_a_point_on_the_plane_is_itself() {
    let plane = Plane::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0)).expect("plane");
    let p = plane.point();
    assert!(project_point_onto_plane(p, &plane).distance(p) < 1e-12);
}

#[test]
fn signed_distance_follows_the_normal() {
    assert!((signed_distance(Point3::new(0.0, 0.0, 2.5), &ground()) - 2.5).abs() < 1e-12);
    assert!((signed_distance(Point3::new(5.0, 5.0, -1.0), &ground()) + 1.0).abs() < 1e-12);
}

#[test]
fn downward_ray_hits_the_ground() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::Z).expect("ray");
    match intersect_ray_plane(&ray, &ground()) {
        Intersection::Hit { point, t } => {
            assert!(point.distance(Point3::ORIGIN) < 1e-12);
            assert!((t - 5.0).abs() < 1e-12);
        }
        other => panic!("expected a hit, got {other:?}"),
    }
}

#[test]
fn ray_pointing_away_reports_behind_origin() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::Z).expect("ray");
    assert_eq!(
        intersect_ray_plane(&ray, &ground()),
        Intersection::NoHit(NoHit::BehindOrigin)
    );
}

#[test]
fn parallel_ray_reports_parallel() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::X).expect("ray");
    let result = intersect_ray_plane(&ray, &ground());
    assert_eq!(result, Intersection::NoHit(NoHit::Parallel));
    assert!(!result.is_hit());
    assert_eq!(result.point(), None);
}

#[test]
fn t_is_measured_in_direction_units() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -2.0)).expect("ray");
    let Intersection::Hit { point, t } = intersect_ray_plane(&ray, &ground()) else {
        panic!("expected a hit");
    };
    assert!((t - 2.5).abs() < 1e-12);
    assert!(point.distance(Point3::ORIGIN) < 1e-12);
}

#[test]
fn oblique_ray_hits_where_expected() {
    let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::Z).expect("plane");
    let ray = Ray::toward(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 2.0)).expect("ray");
    let hit = intersect_ray_plane(&ray, &plane).point().expect("hit");
    assert!(hit.distance(Point3::new(0.0, 0.0, 1.0)) < 1e-12);
}
