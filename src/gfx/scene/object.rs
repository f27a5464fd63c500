use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::geometry::{primitives, GeometryData};
use crate::gfx::picking::Aabb;
use crate::gfx::resources::TextureKind;

/// Radians added per frame to each spinning axis.
pub const ROTATION_STEP: f32 = 0.01;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 3.0;

/// The three built-in primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Cylinder];

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
        }
    }

    pub fn default_color(&self) -> [f32; 3] {
        match self {
            ShapeKind::Cube => [0.204, 0.596, 0.859],
            ShapeKind::Sphere => [0.906, 0.298, 0.235],
            ShapeKind::Cylinder => [0.180, 0.800, 0.443],
        }
    }

    pub fn home_position(&self) -> Vector3<f32> {
        match self {
            ShapeKind::Cube => Vector3::new(-2.0, 0.0, 0.0),
            ShapeKind::Sphere => Vector3::new(0.0, 0.0, 0.0),
            ShapeKind::Cylinder => Vector3::new(2.0, 0.0, 0.0),
        }
    }

    pub fn geometry(&self) -> GeometryData {
        match self {
            ShapeKind::Cube => primitives::cube(1.0),
            ShapeKind::Sphere => primitives::uv_sphere(0.7, 32, 32),
            ShapeKind::Cylinder => primitives::cylinder(0.5, 1.5, 32),
        }
    }
}

/// Logical state of one pickable object
///
/// Holds everything the UI can mutate. GPU-side buffers live with the
/// renderer and follow the dirty flags set here.
pub struct SceneObject {
    pub kind: ShapeKind,
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub scale: f32,
    pub rotation: Vector3<f32>,
    pub rotation_enabled: bool,
    pub texture: TextureKind,
    base_aabb: Aabb,
    /// Color, scale or texture flag changed and the material UBO is stale.
    pub material_dirty: bool,
    /// Texture assignment changed and the bind group must be rebuilt.
    pub texture_dirty: bool,
}

impl SceneObject {
    pub fn new(kind: ShapeKind) -> Self {
        let (min, max) = kind.geometry().bounds();
        Self {
            kind,
            position: kind.home_position(),
            color: kind.default_color(),
            scale: 1.0,
            rotation: Vector3::new(0.0, 0.0, 0.0),
            rotation_enabled: true,
            texture: TextureKind::None,
            base_aabb: Aabb::new(min.into(), max.into()),
            material_dirty: false,
            texture_dirty: false,
        }
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        if self.color != color {
            self.color = color;
            self.material_dirty = true;
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        let clamped = scale.clamp(MIN_SCALE, MAX_SCALE);
        if self.scale != clamped {
            self.scale = clamped;
            self.material_dirty = true;
        }
    }

    pub fn set_texture(&mut self, texture: TextureKind) {
        if self.texture != texture {
            self.texture = texture;
            self.texture_dirty = true;
            self.material_dirty = true;
        }
    }

    pub fn toggle_rotation(&mut self) {
        self.rotation_enabled = !self.rotation_enabled;
    }

    /// Restores color, scale, texture and orientation to their defaults.
    ///
    /// The rotation toggle is deliberately left alone: a spinning object
    /// keeps spinning after a reset, from a zeroed orientation.
    pub fn reset(&mut self) {
        self.set_color(self.kind.default_color());
        self.set_scale(1.0);
        self.set_texture(TextureKind::None);
        self.rotation = Vector3::new(0.0, 0.0, 0.0);
    }

    /// Advances the idle spin by one frame if enabled
    pub fn advance_rotation(&mut self) {
        if !self.rotation_enabled {
            return;
        }
        match self.kind {
            ShapeKind::Cube => {
                self.rotation.x += ROTATION_STEP;
                self.rotation.y += ROTATION_STEP;
            }
            ShapeKind::Sphere => self.rotation.y += ROTATION_STEP,
            ShapeKind::Cylinder => self.rotation.x += ROTATION_STEP,
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_scale(self.scale)
    }

    /// Picking bounds in world space
    ///
    /// Rotation is ignored; the untransformed AABB scaled and translated is
    /// close enough for click selection of these primitives.
    pub fn world_aabb(&self) -> Aabb {
        self.base_aabb.transformed(self.scale, self.position)
    }

    pub fn clear_dirty(&mut self) {
        self.material_dirty = false;
        self.texture_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object_matches_defaults() {
        let object = SceneObject::new(ShapeKind::Sphere);
        assert_eq!(object.color, ShapeKind::Sphere.default_color());
        assert_eq!(object.scale, 1.0);
        assert_eq!(object.texture, TextureKind::None);
        assert!(object.rotation_enabled);
        assert!(!object.material_dirty);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut object = SceneObject::new(ShapeKind::Cube);
        object.set_scale(10.0);
        assert_eq!(object.scale, MAX_SCALE);
        object.set_scale(0.0);
        assert_eq!(object.scale, MIN_SCALE);
    }

    #[test]
    fn test_reset_preserves_rotation_toggle() {
        let mut object = SceneObject::new(ShapeKind::Cylinder);
        object.toggle_rotation();
        assert!(!object.rotation_enabled);

        object.set_color([0.0, 0.0, 0.0]);
        object.set_scale(2.5);
        object.set_texture(TextureKind::Wood);
        object.rotation.x = 1.0;
        object.reset();

        assert_eq!(object.color, ShapeKind::Cylinder.default_color());
        assert_eq!(object.scale, 1.0);
        assert_eq!(object.texture, TextureKind::None);
        assert_eq!(object.rotation, Vector3::new(0.0, 0.0, 0.0));
        assert!(!object.rotation_enabled, "reset must not re-enable rotation");
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut object = SceneObject::new(ShapeKind::Cube);
        object.toggle_rotation();
        object.toggle_rotation();
        assert!(object.rotation_enabled);
    }

    #[test]
    fn test_rotation_axes_per_kind() {
        let mut cube = SceneObject::new(ShapeKind::Cube);
        cube.advance_rotation();
        assert_eq!(cube.rotation.x, ROTATION_STEP);
        assert_eq!(cube.rotation.y, ROTATION_STEP);

        let mut sphere = SceneObject::new(ShapeKind::Sphere);
        sphere.advance_rotation();
        assert_eq!(sphere.rotation.x, 0.0);
        assert_eq!(sphere.rotation.y, ROTATION_STEP);

        let mut cylinder = SceneObject::new(ShapeKind::Cylinder);
        cylinder.advance_rotation();
        assert_eq!(cylinder.rotation.x, ROTATION_STEP);
        assert_eq!(cylinder.rotation.y, 0.0);
    }

    #[test]
    fn test_disabled_rotation_does_not_advance() {
        let mut object = SceneObject::new(ShapeKind::Sphere);
        object.toggle_rotation();
        object.advance_rotation();
        assert_eq!(object.rotation.y, 0.0);
    }

    #[test]
    fn test_mutators_set_dirty_flags() {
        let mut object = SceneObject::new(ShapeKind::Cube);
        object.set_color([1.0, 1.0, 1.0]);
        assert!(object.material_dirty);
        assert!(!object.texture_dirty);

        object.clear_dirty();
        object.set_texture(TextureKind::Brick);
        assert!(object.texture_dirty);

        object.clear_dirty();
        object.set_texture(TextureKind::Brick);
        assert!(!object.texture_dirty, "unchanged texture must not redirty");
    }

    #[test]
    fn test_world_aabb_follows_scale_and_position() {
        let mut object = SceneObject::new(ShapeKind::Cube);
        object.set_scale(2.0);
        let aabb = object.world_aabb();
        assert!((aabb.min.x - (-3.0)).abs() < 1e-5);
        assert!((aabb.max.x - (-1.0)).abs() < 1e-5);
    }
}
