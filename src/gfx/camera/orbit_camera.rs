use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

/// Remaps clip-space depth from OpenGL's [-1, 1] to wgpu's [0, 1].
///
/// `Matrix4::new` takes column-major arguments: the third column scales z,
/// the fourth adds the half-w offset (z' = 0.5z + 0.5w, w' = w).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Distance covered per frame while a movement key is held.
///
/// Fixed per-tick step (speed x nominal delta), not scaled by measured
/// elapsed time, so flight speed follows the display refresh rate.
pub const FLY_SPEED: f32 = 2.0;
pub const FLY_DELTA: f32 = 0.1;

/// Y-up orbit camera parameterized by pitch/yaw/distance around a target
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // derived in update()
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Builds an orbit camera looking from `eye` towards `target`
    pub fn from_eye(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude().max(f32::EPSILON);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self::new(distance, pitch, yaw, target, aspect)
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.eye).normalize()
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Multiplicative zoom, so the feel is consistent at any distance
    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance + delta * self.distance.max(0.25));
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Applies one frame of free flight from held movement keys.
    ///
    /// Displaces the eye along the camera-relative forward/right axes by a
    /// fixed step, then re-aims the orbit target to sit one unit ahead of the
    /// new eye position, so the camera always looks straight ahead after a
    /// manual move. This intentionally overrides any prior orbit target.
    pub fn fly(&mut self, forward: bool, backward: bool, left: bool, right: bool) {
        if !(forward || backward || left || right) {
            return;
        }

        let step = FLY_SPEED * FLY_DELTA;
        let facing = self.forward();
        let sideways = self.up.cross(facing).normalize();

        let mut displacement = Vector3::zero();
        if forward {
            displacement += facing * step;
        }
        if backward {
            displacement -= facing * step;
        }
        if left {
            displacement += sideways * step;
        }
        if right {
            displacement -= sideways * step;
        }

        // Keep pitch/yaw: the facing direction is unchanged, only the pivot
        // moves. Distance collapses to 1 so the eye lands exactly where the
        // displacement put it.
        self.target = self.eye + displacement + facing;
        self.distance = 1.0;
        self.update();
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(0.1),
            max_distance: Some(64.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::Ray;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    #[test]
    fn test_from_eye_recovers_position() {
        let eye = Vector3::new(0.0, 2.0, 5.0);
        let camera = OrbitCamera::from_eye(eye, Vector3::zero(), 1.5);
        assert!(approx(camera.eye, eye));
        assert!(approx(camera.target, Vector3::zero()));
    }

    #[test]
    fn test_fly_forward_moves_along_facing() {
        let mut camera = OrbitCamera::from_eye(Vector3::new(0.0, 2.0, 5.0), Vector3::zero(), 1.5);
        let facing = camera.forward();
        let eye_before = camera.eye;

        camera.fly(true, false, false, false);

        let step = FLY_SPEED * FLY_DELTA;
        assert!(approx(camera.eye, eye_before + facing * step));
        // Target re-aimed one unit ahead of the new eye.
        assert!(approx(camera.target, camera.eye + facing));
    }

    #[test]
    fn test_fly_opposite_keys_cancel() {
        let mut camera = OrbitCamera::from_eye(Vector3::new(0.0, 2.0, 5.0), Vector3::zero(), 1.5);
        let eye_before = camera.eye;
        let facing_before = camera.forward();

        camera.fly(true, true, true, true);

        assert!(approx(camera.eye, eye_before));
        assert!(approx(camera.forward(), facing_before));
    }

    #[test]
    fn test_no_keys_is_a_noop() {
        let mut camera = OrbitCamera::from_eye(Vector3::new(0.0, 2.0, 5.0), Vector3::zero(), 1.5);
        let before = (camera.eye, camera.target, camera.distance);
        camera.fly(false, false, false, false);
        assert_eq!(before, (camera.eye, camera.target, camera.distance));
    }

    #[test]
    fn test_depth_remap_preserves_w() {
        // Column-major literal: z' = 0.5z + 0.5w, w' = w.
        let near = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.3, -0.7, -1.0, 1.0);
        assert!(near.z.abs() < 1e-6);
        assert!((near.w - 1.0).abs() < 1e-6);

        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((far.z - 1.0).abs() < 1e-6);
        assert!((far.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_center_ray_matches_camera_forward() {
        // Unprojecting through the full view-projection (depth remap
        // included) must give a ray that looks where the camera looks,
        // not up and behind it.
        let camera = OrbitCamera::from_eye(Vector3::new(0.0, 2.0, 5.0), Vector3::zero(), 16.0 / 9.0);
        let ray = Ray::from_screen(640.0, 360.0, 1280.0, 720.0, camera.build_view_projection_matrix())
            .unwrap();
        assert!(approx(ray.direction, camera.forward()));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.set_pitch(10.0);
        assert!(camera.pitch <= camera.bounds.max_pitch);
        camera.set_pitch(-10.0);
        assert!(camera.pitch >= camera.bounds.min_pitch);
    }
}
