use crate::wgpu_utils::{binding_types, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};

/// Per-object transform uniform, bound in both the shadow and scene passes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
        BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(device, "model bind group layout")
    }
}

/// Per-object shading parameters
///
/// `params.x` switches texture sampling on, `params.y` switches the normal
/// map on. Both are 0 or 1 so the same pipeline renders textured and plain
/// objects.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub params: [f32; 4],
}

impl MaterialUniform {
    pub fn new(color: [f32; 3], textured: bool) -> Self {
        let flag = if textured { 1.0 } else { 0.0 };
        Self {
            base_color: [color[0], color[1], color[2], 1.0],
            params: [flag, flag, 0.0, 0.0],
        }
    }

    /// Material UBO plus diffuse and normal maps with their samplers
    pub fn bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
        BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "material bind group layout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textured_flag_drives_params() {
        let plain = MaterialUniform::new([0.2, 0.4, 0.6], false);
        assert_eq!(plain.params[0], 0.0);

        let textured = MaterialUniform::new([0.2, 0.4, 0.6], true);
        assert_eq!(textured.params[0], 1.0);
        assert_eq!(textured.base_color, [0.2, 0.4, 0.6, 1.0]);
    }
}
