use std::f64::consts::{FRAC_PI_2, PI};

use lunar_toolkit::orientation::{
    Axis, Orientation, OrientationError, facing_outward, look_at_orientation, track_to,
};
use lunar_toolkit::vector::Vector3;

fn assert_vec_close(actual: Vector3, expected: Vector3, tol: f64) {
    assert!(
        (actual - expected).length() < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn camera_convention_reproduces_identity() {
    let q = look_at_orientation(-Vector3::Z, Vector3::Y, Axis::NegZ, Axis::PosY)
        .expect("orientation");
    let [w, x, y, z] = q.to_array();
    assert!((w - 1.0).abs() < 1e-12, "{q:?}");
    assert!(x.abs() < 1e-12 && y.abs() < 1e-12 && z.abs() < 1e-12);
}

#[test]
fn track_to_maps_forward_axis_onto_direction() {
    let q = track_to(Vector3::new(2.0, 0.0, 0.0), Axis::PosZ, Axis::PosY).expect("track");
    assert_vec_close(q.rotate(Vector3::Z), Vector3::X, 1e-12);
    // up leans toward world +Z
    assert_vec_close(q.rotate(Vector3::Y), Vector3::Z, 1e-12);
}

#[test]
fn up_axis_is_orthogonalized_against_direction() {
    let direction = Vector3::new(1.0, 0.0, 1.0);
    let q = track_to(direction, Axis::PosZ, Axis::PosY).expect("track");
    let forward = q.rotate(Vector3::Z);
    let up = q.rotate(Vector3::Y);
    assert_vec_close(forward, direction.normalize().expect("unit"), 1e-12);
    assert!(forward.dot(up).abs() < 1e-12);
    assert!(up.z > 0.0);
}

#[test]
fn parallel_up_hint_falls_back_to_world_x() {
    let q = look_at_orientation(Vector3::Z, Vector3::Z, Axis::PosZ, Axis::PosY)
        .expect("fallback orientation");
    assert_vec_close(q.rotate(Vector3::Z), Vector3::Z, 1e-12);
    assert_vec_close(q.rotate(Vector3::Y), Vector3::X, 1e-12);
}

#[test]
fn zero_direction_is_degenerate() {
    let err = track_to(Vector3::ZERO, Axis::NegZ, Axis::PosY).unwrap_err();
    assert!(matches!(err, OrientationError::Degenerate(_)));
}

#[test]
fn shared_principal_axis_is_rejected() {
    let err = look_at_orientation(Vector3::X, Vector3::Z, Axis::PosZ, Axis::NegZ).unwrap_err();
    assert_eq!(
        err,
        OrientationError::AxisConflict {
            forward: Axis::PosZ,
            up: Axis::NegZ,
        }
    );
}

#[test]
fn track_orientations_are_canonical() {
    for direction in [
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, -1.0, 0.2),
        Vector3::new(0.3, 0.4, -0.9),
        Vector3::new(-0.5, 0.5, 0.5),
    ] {
        let q = track_to(direction, Axis::NegZ, Axis::PosY).expect("track");
        assert!(q.to_array()[0] >= 0.0, "{q:?}");
        let norm = q.to_array().iter().map(|c| c * c).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert_vec_close(
            q.rotate(-Vector3::Z),
            direction.normalize().expect("unit"),
            1e-12,
        );
    }
}

#[test]
fn outward_labels_face_away_from_the_sphere() {
    let outward = Vector3::new(1.0, 0.0, 0.05);
    let q = facing_outward(outward).expect("label orientation");
    assert_vec_close(
        q.rotate(Vector3::Z),
        outward.normalize().expect("unit"),
        1e-12,
    );
    assert!(q.rotate(Vector3::Y).z > 0.9);
}

#[test]
fn quaternion_algebra_composes_rotations() {
    let quarter = Orientation::from_axis_angle(Vector3::Z, FRAC_PI_2).expect("axis");
    assert_vec_close(quarter.rotate(Vector3::X), Vector3::Y, 1e-12);
    assert_vec_close((quarter * quarter).rotate(Vector3::X), -Vector3::X, 1e-12);
    assert_vec_close(
        (quarter * quarter.conjugate()).rotate(Vector3::new(0.3, -0.2, 0.9)),
        Vector3::new(0.3, -0.2, 0.9),
        1e-12,
    );

    // rhs is applied first
    let about_x = Orientation::from_axis_angle(Vector3::X, FRAC_PI_2).expect("axis");
    assert_vec_close((quarter * about_x).rotate(Vector3::Y), Vector3::new(0.0, 0.0, 1.0), 1e-12);
    assert_vec_close((about_x * quarter).rotate(Vector3::X), Vector3::new(0.0, 0.0, 1.0), 1e-12);

    assert!(Orientation::from_axis_angle(Vector3::ZERO, PI).is_err());
}

#[test]
fn rotation_matrix_round_trips() {
    let q = Orientation::from_axis_angle(Vector3::new(1.0, 2.0, 3.0), 1.1).expect("axis");
    let back = Orientation::from_rotation_matrix(q.to_rotation_matrix());
    for (a, b) in q.to_array().iter().zip(back.to_array()) {
        assert!((a - b).abs() < 1e-12);
    }
    let euler = Orientation::from_axis_angle(Vector3::Z, 0.3)
        .expect("axis")
        .to_euler_xyz();
    assert!(euler[0].abs() < 1e-12 && euler[1].abs() < 1e-12);
    assert!((euler[2] - 0.3).abs() < 1e-12);
}

#[test]
fn euler_angles_round_trip() {
    let angles = [0.2, -0.4, 1.3];
    let q = Orientation::from_euler_xyz(angles);
    for (a, b) in q.to_euler_xyz().iter().zip(angles) {
        assert!((a - b).abs() < 1e-12);
    }
    // X is applied first, Z last
    let expected = Orientation::from_axis_angle(Vector3::Z, 1.3).expect("z")
        * Orientation::from_axis_angle(Vector3::Y, -0.4).expect("y")
        * Orientation::from_axis_angle(Vector3::X, 0.2).expect("x");
    let v = Vector3::new(0.3, 0.5, -0.7);
    assert_vec_close(q.rotate(v), expected.rotate(v), 1e-12);
}

#[test]
fn slerp_walks_the_shorter_arc_at_constant_rate() {
    let start = Orientation::IDENTITY;
    let end = Orientation::from_axis_angle(Vector3::Z, FRAC_PI_2).expect("axis");
    assert_vec_close(start.slerp(end, 0.0).rotate(Vector3::X), Vector3::X, 1e-12);
    assert_vec_close(start.slerp(end, 1.0).rotate(Vector3::X), Vector3::Y, 1e-12);
    let tenth = start.slerp(end, 0.1).rotate(Vector3::X);
    assert!((tenth.y.atan2(tenth.x) - 0.1 * FRAC_PI_2).abs() < 1e-12);

    // the same end rotation with a flipped sign still takes the short way
    let flipped = Orientation::from_axis_angle(Vector3::Z, FRAC_PI_2 - 2.0 * PI).expect("axis");
    let halfway = start.slerp(flipped, 0.5).rotate(Vector3::X);
    assert!((halfway.y.atan2(halfway.x) - FRAC_PI_2 / 2.0).abs() < 1e-12);
}

#[test]
fn axis_tokens_parse_and_print() {
    assert_eq!("X".parse::<Axis>(), Ok(Axis::PosX));
    assert_eq!("+y".parse::<Axis>(), Ok(Axis::PosY));
    assert_eq!("-Z".parse::<Axis>(), Ok(Axis::NegZ));
    assert!("W".parse::<Axis>().is_err());
    assert_eq!(Axis::NegX.to_string(), "-X");
    assert_eq!(Axis::NegY.unit_vector(), -Vector3::Y);
}
