use std::time::Duration;

use cgmath::{Deg, Point3, Vector3};
use winit::keyboard::KeyCode;

use voxelview::camera::{Camera, CameraController, PITCH_LIMIT};

const FRAME: Duration = Duration::from_millis(16);

fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    for (a, e) in [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.z, expected.z),
    ] {
        assert!((a - e).abs() < 1e-5, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn should_clamp_pitch_under_repeated_large_look_deltas() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    let mut controller = CameraController::new(10.0, 0.4);

    // Negative vertical deltas pitch the view up; pile them on.
    for _ in 0..50 {
        controller.handle_mouse(0.0, -10_000.0);
        controller.update(&mut camera, FRAME);
        assert!(camera.pitch().0 <= PITCH_LIMIT);
    }
    assert_eq!(camera.pitch(), Deg(PITCH_LIMIT));

    for _ in 0..50 {
        controller.handle_mouse(0.0, 10_000.0);
        controller.update(&mut camera, FRAME);
        assert!(camera.pitch().0 >= -PITCH_LIMIT);
    }
    assert_eq!(camera.pitch(), Deg(-PITCH_LIMIT));
}

#[test]
fn should_leave_yaw_unbounded() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    let mut controller = CameraController::new(10.0, 1.0);

    for _ in 0..10 {
        controller.handle_mouse(100.0, 0.0);
        controller.update(&mut camera, FRAME);
    }
    // Ten full-ish turns of input: yaw keeps counting, wrapping is left to
    // the trigonometry.
    assert!(camera.yaw().0 > 360.0);
}

#[test]
fn should_derive_forward_from_yaw_and_pitch() {
    let level = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    assert_close(level.forward(), Vector3::new(1.0, 0.0, 0.0));

    let turned = Camera::new((0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
    assert_close(turned.forward(), Vector3::new(0.0, 0.0, -1.0));

    let tilted = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(45.0));
    let half_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
    assert_close(tilted.forward(), Vector3::new(half_sqrt2, half_sqrt2, 0.0));
}

#[test]
fn should_clamp_an_out_of_range_initial_pitch() {
    let camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(135.0));
    assert_eq!(camera.pitch(), Deg(PITCH_LIMIT));
}

#[test]
fn should_translate_along_forward_when_moving() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    let mut controller = CameraController::new(10.0, 0.4);

    controller.process_keyboard(KeyCode::KeyW, true);
    controller.update(&mut camera, Duration::from_secs(1));

    // One second at speed 10 along +X.
    assert_close(
        camera.position - Point3::new(0.0, 0.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
    );

    controller.process_keyboard(KeyCode::KeyW, false);
    controller.update(&mut camera, Duration::from_secs(1));
    assert_close(
        camera.position - Point3::new(0.0, 0.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
    );
}

#[test]
fn should_strafe_along_the_horizontal_right_axis() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    let mut controller = CameraController::new(2.0, 0.4);

    controller.process_keyboard(KeyCode::KeyD, true);
    controller.update(&mut camera, Duration::from_secs(1));
    assert_close(
        camera.position - Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 2.0),
    );
}

#[test]
fn should_not_move_the_camera_on_reload_sized_idle_frames() {
    let mut camera = Camera::new((3.0, 4.0, 5.0), Deg(30.0), Deg(-10.0));
    let mut controller = CameraController::new(10.0, 0.4);

    // No input accumulated: a long frame must not drift the pose.
    controller.update(&mut camera, Duration::from_secs(2));
    assert_eq!(camera.position, Point3::new(3.0, 4.0, 5.0));
    assert_eq!(camera.yaw(), Deg(30.0));
    assert_eq!(camera.pitch(), Deg(-10.0));
}

#[test]
fn should_floor_the_grid_position_for_negative_coordinates() {
    let camera = Camera::new((-0.5, 0.0, 2.7), Deg(0.0), Deg(0.0));
    assert_eq!(camera.grid_position(1.0), [-1, 0, 2]);

    let camera = Camera::new((-3.2, -0.1, 4.0), Deg(0.0), Deg(0.0));
    assert_eq!(camera.grid_position(2.0), [-2, -1, 2]);
}
