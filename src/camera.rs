//! Camera pose, controller, projection and the GPU uniform.
//!
//! The camera is a free-fly pose: position plus yaw/pitch in degrees. Input
//! is accumulated by [`CameraController`] as winit events arrive and applied
//! to the camera exactly once per frame, so holding a key moves smoothly and
//! a burst of mouse deltas collapses into one orientation change.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, perspective};
use instant::Duration;
use winit::event::{KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Transformation from OpenGL clip space (z in [-1, 1]) to WGPU clip space
/// (z in [0, 1]). Applied on top of the cgmath perspective matrix.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pitch is clamped short of straight up/down so the view matrix keeps a
/// usable horizontal component.
pub const PITCH_LIMIT: f32 = 89.0;

/// Free-fly camera pose: position, yaw and pitch with a derived forward
/// vector. Orientation changes go through the controller so the forward
/// vector is recomputed exactly when yaw or pitch move.
#[derive(Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    forward: Vector3<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>>(position: V, yaw: Deg<f32>, pitch: Deg<f32>) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw,
            pitch,
            forward: Vector3::unit_z(),
        };
        camera.clamp_and_derive();
        camera
    }

    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    /// Horizontal unit vector to the camera's right, used for strafing.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos).normalize()
    }

    /// View matrix: look from the camera position toward `position + forward`
    /// with the fixed world up axis.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.forward, Vector3::unit_y())
    }

    /// Grid cell containing the camera, the center of the box query. Floored
    /// per axis so negative coordinates land in the cell they are actually
    /// in, instead of being pulled toward zero.
    pub fn grid_position(&self, block_size: f32) -> [i64; 3] {
        [
            (self.position.x / block_size).floor() as i64,
            (self.position.y / block_size).floor() as i64,
            (self.position.z / block_size).floor() as i64,
        ]
    }

    fn add_rotation(&mut self, yaw_delta: Deg<f32>, pitch_delta: Deg<f32>) {
        // Yaw is unbounded and wraps through the trigonometry.
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        self.clamp_and_derive();
    }

    fn clamp_and_derive(&mut self) {
        self.pitch = Deg(self.pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT));
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).0.sin_cos();
        let (pitch_sin, pitch_cos) = Rad::from(self.pitch).0.sin_cos();
        self.forward =
            Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize();
    }
}

/// Accumulates movement and look input between frames and applies it to the
/// camera once per frame.
#[derive(Debug)]
pub struct CameraController {
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// `speed` in world units per second, `sensitivity` in degrees per
    /// mouse-delta unit.
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Track the held state of the movement keys. Returns whether the event
    /// was one of ours.
    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    ..
                },
            ..
        } = event
        {
            self.process_keyboard(*code, state.is_pressed())
        } else {
            false
        }
    }

    /// Record a key transition. Returns whether the key was one of ours.
    pub fn process_keyboard(&mut self, code: KeyCode, pressed: bool) -> bool {
        let amount = if pressed { 1.0 } else { 0.0 };
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => {
                self.amount_forward = amount;
                true
            }
            KeyCode::KeyS | KeyCode::ArrowDown => {
                self.amount_backward = amount;
                true
            }
            KeyCode::KeyA | KeyCode::ArrowLeft => {
                self.amount_left = amount;
                true
            }
            KeyCode::KeyD | KeyCode::ArrowRight => {
                self.amount_right = amount;
                true
            }
            KeyCode::Space => {
                self.amount_up = amount;
                true
            }
            KeyCode::ShiftLeft => {
                self.amount_down = amount;
                true
            }
            _ => false,
        }
    }

    /// Accumulate a mouse delta since the last frame.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.rotate_horizontal += dx as f32;
        self.rotate_vertical += dy as f32;
    }

    /// Apply the accumulated input to the camera.
    ///
    /// Movement is direction x elapsed time x speed along the camera's
    /// forward/right axes plus the world up axis; there is no collision or
    /// terrain clamping. Look adds to yaw and subtracts from pitch, which the
    /// camera then clamps.
    pub fn update(&mut self, camera: &mut Camera, dt: Duration) {
        let dt = dt.as_secs_f32();

        let forward = camera.forward();
        let right = camera.right();
        camera.position += forward * (self.amount_forward - self.amount_backward) * self.speed * dt;
        camera.position += right * (self.amount_right - self.amount_left) * self.speed * dt;
        camera.position.y += (self.amount_up - self.amount_down) * self.speed * dt;

        camera.add_rotation(
            Deg(self.rotate_horizontal * self.sensitivity),
            Deg(-self.rotate_vertical * self.sensitivity),
        );
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }
}

/// Perspective projection parameters.
#[derive(Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Deg<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: Deg<f32>, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy,
            znear,
            zfar,
        }
    }

    /// Track the viewport on window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/**
 * The raw view-projection matrix as it is stored in the camera uniform
 * buffer on the GPU.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera state bundled with its GPU resources, owned by the context.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
