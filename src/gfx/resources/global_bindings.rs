use cgmath::{Matrix4, Point3, Vector3};

use crate::gfx::camera::camera_utils::{convert_matrix4_to_array, CameraUniform};
use crate::gfx::camera::orbit_camera::OPENGL_TO_WGPU_MATRIX;
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};

use super::texture_resource::Texture;

/// World position of the key light.
pub const LIGHT_POSITION: [f32; 3] = [5.0, 10.0, 5.0];
/// Intensity of the key light.
pub const LIGHT_INTENSITY: f32 = 0.8;

/// Uniforms shared by every object in the scene pass
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniforms {
    pub camera: CameraUniform,
    pub light_view_proj: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    /// x: ambient intensity, yzw: padding
    pub ambient: [f32; 4],
}

impl Default for GlobalUniforms {
    fn default() -> Self {
        Self {
            camera: CameraUniform::default(),
            light_view_proj: convert_matrix4_to_array(light_view_projection()),
            light_position: [LIGHT_POSITION[0], LIGHT_POSITION[1], LIGHT_POSITION[2], 1.0],
            light_color: [LIGHT_INTENSITY; 4],
            ambient: [0.5, 0.0, 0.0, 0.0],
        }
    }
}

/// Orthographic projection from the light, used for the shadow map
pub fn light_view_projection() -> Matrix4<f32> {
    let view = Matrix4::look_at_rh(
        Point3::new(LIGHT_POSITION[0], LIGHT_POSITION[1], LIGHT_POSITION[2]),
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
    );
    let proj = cgmath::ortho(-12.0, 12.0, -12.0, 12.0, 0.1, 40.0);
    OPENGL_TO_WGPU_MATRIX * proj * view
}

/// Bind group 0: frame uniforms plus the shadow map
pub struct GlobalBindings {
    pub layout: BindGroupLayoutWithDesc,
    pub uniform_buffer: UniformBuffer<GlobalUniforms>,
    pub bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, shadow_map: &Texture) -> Self {
        let layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_depth_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Comparison,
            ))
            .create(device, "global bind group layout");

        let uniform_buffer = UniformBuffer::new_with_data(device, &GlobalUniforms::default());

        let bind_group = BindGroupBuilder::new(&layout)
            .resource(uniform_buffer.binding_resource())
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(device, "global bind group");

        Self {
            layout,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, uniforms: GlobalUniforms) {
        self.uniform_buffer.update_content(queue, uniforms);
    }
}
