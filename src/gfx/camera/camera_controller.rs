use winit::{
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Velocity below which damped rotation is considered stopped.
const REST_THRESHOLD: f32 = 1e-4;

/// Turns raw mouse input into damped orbit motion
///
/// Dragging accumulates yaw/pitch velocity which [`tick`](Self::tick) applies
/// and decays every frame, so releasing the button lets the orbit coast to a
/// stop instead of freezing.
pub struct CameraController {
    rotate_speed: f32,
    zoom_speed: f32,
    damping: f32,
    is_drag_rotate: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            damping: 0.9,
            is_drag_rotate: false,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button { button, state } => {
                self.handle_button(*button, *state == ElementState::Pressed);
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => -*scroll,
                    MouseScrollDelta::PixelDelta(position) => -position.y as f32,
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.handle_motion(delta.0 as f32, delta.1 as f32) {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Left or right mouse button toggles the drag latch. A release must
    /// always reach this, even while the UI has the pointer, or the drag
    /// stays latched with no button held.
    fn handle_button(&mut self, button: u32, pressed: bool) {
        if button == 0 || button == 1 {
            self.is_drag_rotate = pressed;
        }
    }

    /// Accumulates rotation velocity while dragging, returns true when the
    /// motion was consumed
    fn handle_motion(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_drag_rotate {
            return false;
        }
        self.yaw_velocity += dx * self.rotate_speed;
        self.pitch_velocity += dy * self.rotate_speed;
        true
    }

    /// Applies and decays the accumulated rotation velocity for one frame
    pub fn tick(&mut self, camera: &mut OrbitCamera) {
        if self.yaw_velocity.abs() < REST_THRESHOLD && self.pitch_velocity.abs() < REST_THRESHOLD {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            return;
        }

        camera.add_yaw(-self.yaw_velocity);
        camera.add_pitch(self.pitch_velocity);

        self.yaw_velocity *= self.damping;
        self.pitch_velocity *= self.damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn test_velocity_decays_to_rest() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(5.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);

        controller.yaw_velocity = 0.1;
        for _ in 0..200 {
            controller.tick(&mut camera);
        }

        assert_eq!(controller.yaw_velocity, 0.0);
        assert!(camera.yaw != 0.0);
    }

    #[test]
    fn test_release_always_ends_drag() {
        let mut controller = CameraController::new(0.005, 0.1);

        controller.handle_button(0, true);
        assert!(controller.handle_motion(4.0, 0.0));

        // The release may arrive while the pointer sits over the panel;
        // afterwards motion must no longer rotate the camera.
        controller.handle_button(0, false);
        assert!(!controller.is_drag_rotate);
        assert!(!controller.handle_motion(4.0, 0.0));
    }

    #[test]
    fn test_tick_without_input_leaves_camera_alone() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(5.0, 0.3, 0.2, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let yaw = camera.yaw;
        let pitch = camera.pitch;

        controller.tick(&mut camera);

        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.pitch, pitch);
    }
}
