use cgmath::Vector3;

use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use crate::gfx::picking::{pick_nearest, Ray};

use super::object::{SceneObject, ShapeKind};

/// Initial camera position
const CAMERA_EYE: Vector3<f32> = Vector3::new(0.0, 2.0, 5.0);

/// Logical scene state
///
/// Owns the camera, the three objects and the viewer toggles. The renderer
/// reads from here every frame; the UI and input handling write to it.
pub struct Scene {
    pub camera_manager: CameraManager,
    objects: Vec<SceneObject>,
    selected: Option<ShapeKind>,
    pub bloom_enabled: bool,
    pub outline_enabled: bool,
    pub ambient_intensity: f32,
}

impl Scene {
    pub fn new(aspect: f32) -> Self {
        let camera = OrbitCamera::from_eye(CAMERA_EYE, Vector3::new(0.0, 0.0, 0.0), aspect);
        let controller = CameraController::new(0.005, 0.8);

        Self {
            camera_manager: CameraManager::new(camera, controller),
            objects: ShapeKind::ALL.iter().map(|&kind| SceneObject::new(kind)).collect(),
            selected: None,
            bloom_enabled: false,
            outline_enabled: false,
            ambient_intensity: 0.5,
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn object(&self, kind: ShapeKind) -> &SceneObject {
        &self.objects[Self::index_of(kind)]
    }

    pub fn object_mut(&mut self, kind: ShapeKind) -> &mut SceneObject {
        &mut self.objects[Self::index_of(kind)]
    }

    fn index_of(kind: ShapeKind) -> usize {
        ShapeKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or(0)
    }

    pub fn selected(&self) -> Option<ShapeKind> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.map(|kind| self.object(kind))
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        self.selected.map(move |kind| self.object_mut(kind))
    }

    /// Selects an object, from either the dropdown or a click
    pub fn select(&mut self, kind: ShapeKind) {
        self.selected = Some(kind);
    }

    /// The object the outline effect should highlight this frame
    pub fn outline_target(&self) -> Option<ShapeKind> {
        if self.outline_enabled {
            self.selected
        } else {
            None
        }
    }

    /// Casts a ray through the clicked pixel and selects the nearest hit.
    ///
    /// A click on empty space keeps the current selection.
    pub fn handle_click(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let view_proj = self.camera_manager.get_view_proj_matrix();
        let Some(ray) = Ray::from_screen(x, y, width, height, view_proj) else {
            return;
        };

        let boxes: Vec<_> = self.objects.iter().map(|o| o.world_aabb()).collect();
        if let Some(index) = pick_nearest(&ray, &boxes) {
            self.selected = Some(self.objects[index].kind);
        }
    }

    /// Advances the scene by one frame: camera damping, free flight and
    /// idle rotations
    pub fn tick(&mut self, forward: bool, backward: bool, left: bool, right: bool) {
        self.camera_manager.tick();
        self.camera_manager
            .camera
            .fly(forward, backward, left, right);

        for object in &mut self.objects {
            object.advance_rotation();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(16.0 / 9.0)
    }

    /// Projects the world-space center of an object to window coordinates.
    fn screen_position_of(scene: &Scene, kind: ShapeKind, width: f32, height: f32) -> (f32, f32) {
        let clip = scene.camera_manager.get_view_proj_matrix()
            * scene.object(kind).position.extend(1.0);
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        ((ndc_x + 1.0) / 2.0 * width, (1.0 - ndc_y) / 2.0 * height)
    }

    #[test]
    fn test_starts_with_nothing_selected() {
        let scene = scene();
        assert_eq!(scene.selected(), None);
        assert!(!scene.bloom_enabled);
        assert!(!scene.outline_enabled);
        assert_eq!(scene.ambient_intensity, 0.5);
    }

    #[test]
    fn test_click_on_each_object_selects_it() {
        let mut scene = scene();
        for kind in ShapeKind::ALL {
            let (x, y) = screen_position_of(&scene, kind, 1280.0, 720.0);
            scene.handle_click(x, y, 1280.0, 720.0);
            assert_eq!(scene.selected(), Some(kind));
        }
    }

    #[test]
    fn test_dropdown_and_click_agree() {
        let mut by_click = scene();
        let (x, y) = screen_position_of(&by_click, ShapeKind::Cylinder, 1280.0, 720.0);
        by_click.handle_click(x, y, 1280.0, 720.0);

        let mut by_dropdown = scene();
        by_dropdown.select(ShapeKind::Cylinder);

        assert_eq!(by_click.selected(), by_dropdown.selected());
    }

    #[test]
    fn test_miss_click_keeps_selection() {
        let mut scene = scene();
        scene.select(ShapeKind::Sphere);

        // Top-left corner is sky.
        scene.handle_click(1.0, 1.0, 1280.0, 720.0);
        assert_eq!(scene.selected(), Some(ShapeKind::Sphere));
    }

    #[test]
    fn test_outline_targets_latest_selection_only() {
        let mut scene = scene();
        assert_eq!(scene.outline_target(), None);

        scene.select(ShapeKind::Cube);
        assert_eq!(scene.outline_target(), None, "outline disabled");

        scene.outline_enabled = true;
        assert_eq!(scene.outline_target(), Some(ShapeKind::Cube));

        scene.select(ShapeKind::Sphere);
        assert_eq!(scene.outline_target(), Some(ShapeKind::Sphere));
    }

    #[test]
    fn test_mutating_one_object_leaves_others_alone() {
        let mut scene = scene();

        scene.select(ShapeKind::Cylinder);
        if let Some(object) = scene.selected_object_mut() {
            object.set_color([0.0, 0.0, 0.0]);
        }

        scene.select(ShapeKind::Sphere);
        let sphere = scene.object(ShapeKind::Sphere);
        assert_eq!(sphere.color, ShapeKind::Sphere.default_color());
        assert_eq!(
            scene.object(ShapeKind::Cylinder).color,
            [0.0, 0.0, 0.0],
            "cylinder keeps its new color"
        );
    }

    #[test]
    fn test_tick_advances_only_rotating_objects() {
        let mut scene = scene();
        scene.object_mut(ShapeKind::Sphere).toggle_rotation();

        scene.tick(false, false, false, false);

        assert!(scene.object(ShapeKind::Cube).rotation.x > 0.0);
        assert_eq!(scene.object(ShapeKind::Sphere).rotation.y, 0.0);
        assert!(scene.object(ShapeKind::Cylinder).rotation.x > 0.0);
    }
}
