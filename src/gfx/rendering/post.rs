//! Offscreen targets and bind groups for the post-processing chain
//!
//! The scene renders into one of two ping-pong color buffers. Each enabled
//! effect reads the current buffer and writes the other, and the final blit
//! copies whichever buffer is current onto the swapchain.

use crate::gfx::resources::Texture;
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};

/// Intermediate color format, linear with headroom for bloom
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
/// Single-channel silhouette mask format
pub const MASK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;

pub const BLOOM_STRENGTH: f32 = 0.5;
pub const BLOOM_THRESHOLD: f32 = 0.85;
pub const OUTLINE_THICKNESS: f32 = 1.5;

/// Generic parameter block for fullscreen passes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostParams {
    pub params: [f32; 4],
}

/// Ping-pong buffer selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingPong {
    A,
    B,
}

impl PingPong {
    pub fn other(self) -> Self {
        match self {
            PingPong::A => PingPong::B,
            PingPong::B => PingPong::A,
        }
    }

    fn index(self) -> usize {
        match self {
            PingPong::A => 0,
            PingPong::B => 1,
        }
    }
}

pub struct PostStack {
    pub sample_layout: BindGroupLayoutWithDesc,
    pub composite_layout: BindGroupLayoutWithDesc,
    pub blit_layout: BindGroupLayoutWithDesc,

    color: [Texture; 2],
    bloom: [Texture; 2],
    mask: Texture,

    extract_params: UniformBuffer<PostParams>,
    blur_h_params: UniformBuffer<PostParams>,
    blur_v_params: UniformBuffer<PostParams>,
    bloom_composite_params: UniformBuffer<PostParams>,
    outline_params: UniformBuffer<PostParams>,

    extract_bind_groups: [wgpu::BindGroup; 2],
    blur_h_bind_group: wgpu::BindGroup,
    blur_v_bind_group: wgpu::BindGroup,
    bloom_composite_bind_groups: [wgpu::BindGroup; 2],
    outline_composite_bind_groups: [wgpu::BindGroup; 2],
    blit_bind_groups: [wgpu::BindGroup; 2],
}

impl PostStack {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let sample_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .next_binding_fragment(binding_types::uniform())
            .create(device, "post sample layout");

        let composite_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .next_binding_fragment(binding_types::uniform())
            .create(device, "post composite layout");

        let blit_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "blit layout");

        let texel = texel_size(width, height);
        let extract_params = UniformBuffer::new_with_data(
            device,
            &PostParams {
                params: [BLOOM_THRESHOLD, 0.0, 0.0, 0.0],
            },
        );
        let blur_h_params = UniformBuffer::new_with_data(
            device,
            &PostParams {
                params: [1.0, 0.0, texel[0], texel[1]],
            },
        );
        let blur_v_params = UniformBuffer::new_with_data(
            device,
            &PostParams {
                params: [0.0, 1.0, texel[0], texel[1]],
            },
        );
        let bloom_composite_params = UniformBuffer::new_with_data(
            device,
            &PostParams {
                params: [BLOOM_STRENGTH, 0.0, 0.0, 0.0],
            },
        );
        let outline_params = UniformBuffer::new_with_data(
            device,
            &PostParams {
                params: [texel[0], texel[1], OUTLINE_THICKNESS, 0.0],
            },
        );

        let (color, bloom, mask) = Self::create_targets(device, width, height);
        let bind_groups = Self::create_bind_groups(
            device,
            &sample_layout,
            &composite_layout,
            &blit_layout,
            &color,
            &bloom,
            &mask,
            &extract_params,
            &blur_h_params,
            &blur_v_params,
            &bloom_composite_params,
            &outline_params,
        );

        Self {
            sample_layout,
            composite_layout,
            blit_layout,
            color,
            bloom,
            mask,
            extract_params,
            blur_h_params,
            blur_v_params,
            bloom_composite_params,
            outline_params,
            extract_bind_groups: bind_groups.0,
            blur_h_bind_group: bind_groups.1,
            blur_v_bind_group: bind_groups.2,
            bloom_composite_bind_groups: bind_groups.3,
            outline_composite_bind_groups: bind_groups.4,
            blit_bind_groups: bind_groups.5,
        }
    }

    fn create_targets(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> ([Texture; 2], [Texture; 2], Texture) {
        let color = [
            Texture::create_render_target(device, width, height, COLOR_FORMAT, "scene color a"),
            Texture::create_render_target(device, width, height, COLOR_FORMAT, "scene color b"),
        ];
        let bloom = [
            Texture::create_render_target(device, width, height, COLOR_FORMAT, "bloom a"),
            Texture::create_render_target(device, width, height, COLOR_FORMAT, "bloom b"),
        ];
        let mask = Texture::create_render_target(device, width, height, MASK_FORMAT, "outline mask");
        (color, bloom, mask)
    }

    #[allow(clippy::too_many_arguments)]
    fn create_bind_groups(
        device: &wgpu::Device,
        sample_layout: &BindGroupLayoutWithDesc,
        composite_layout: &BindGroupLayoutWithDesc,
        blit_layout: &BindGroupLayoutWithDesc,
        color: &[Texture; 2],
        bloom: &[Texture; 2],
        mask: &Texture,
        extract_params: &UniformBuffer<PostParams>,
        blur_h_params: &UniformBuffer<PostParams>,
        blur_v_params: &UniformBuffer<PostParams>,
        bloom_composite_params: &UniformBuffer<PostParams>,
        outline_params: &UniformBuffer<PostParams>,
    ) -> (
        [wgpu::BindGroup; 2],
        wgpu::BindGroup,
        wgpu::BindGroup,
        [wgpu::BindGroup; 2],
        [wgpu::BindGroup; 2],
        [wgpu::BindGroup; 2],
    ) {
        let extract = [0, 1].map(|i| {
            BindGroupBuilder::new(sample_layout)
                .texture(&color[i].view)
                .sampler(&color[i].sampler)
                .resource(extract_params.binding_resource())
                .create(device, "bloom extract bind group")
        });

        let blur_h = BindGroupBuilder::new(sample_layout)
            .texture(&bloom[0].view)
            .sampler(&bloom[0].sampler)
            .resource(blur_h_params.binding_resource())
            .create(device, "bloom blur h bind group");

        let blur_v = BindGroupBuilder::new(sample_layout)
            .texture(&bloom[1].view)
            .sampler(&bloom[1].sampler)
            .resource(blur_v_params.binding_resource())
            .create(device, "bloom blur v bind group");

        let bloom_composite = [0, 1].map(|i| {
            BindGroupBuilder::new(composite_layout)
                .texture(&color[i].view)
                .sampler(&color[i].sampler)
                .texture(&bloom[0].view)
                .sampler(&bloom[0].sampler)
                .resource(bloom_composite_params.binding_resource())
                .create(device, "bloom composite bind group")
        });

        let outline_composite = [0, 1].map(|i| {
            BindGroupBuilder::new(composite_layout)
                .texture(&color[i].view)
                .sampler(&color[i].sampler)
                .texture(&mask.view)
                .sampler(&mask.sampler)
                .resource(outline_params.binding_resource())
                .create(device, "outline composite bind group")
        });

        let blit = [0, 1].map(|i| {
            BindGroupBuilder::new(blit_layout)
                .texture(&color[i].view)
                .sampler(&color[i].sampler)
                .create(device, "blit bind group")
        });

        (extract, blur_h, blur_v, bloom_composite, outline_composite, blit)
    }

    /// Recreates the offscreen targets and texel-size uniforms
    pub fn resize(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, width: u32, height: u32) {
        let (color, bloom, mask) = Self::create_targets(device, width, height);
        self.color = color;
        self.bloom = bloom;
        self.mask = mask;

        let texel = texel_size(width, height);
        self.blur_h_params.update_content(
            queue,
            PostParams {
                params: [1.0, 0.0, texel[0], texel[1]],
            },
        );
        self.blur_v_params.update_content(
            queue,
            PostParams {
                params: [0.0, 1.0, texel[0], texel[1]],
            },
        );
        self.outline_params.update_content(
            queue,
            PostParams {
                params: [texel[0], texel[1], OUTLINE_THICKNESS, 0.0],
            },
        );

        let bind_groups = Self::create_bind_groups(
            device,
            &self.sample_layout,
            &self.composite_layout,
            &self.blit_layout,
            &self.color,
            &self.bloom,
            &self.mask,
            &self.extract_params,
            &self.blur_h_params,
            &self.blur_v_params,
            &self.bloom_composite_params,
            &self.outline_params,
        );
        self.extract_bind_groups = bind_groups.0;
        self.blur_h_bind_group = bind_groups.1;
        self.blur_v_bind_group = bind_groups.2;
        self.bloom_composite_bind_groups = bind_groups.3;
        self.outline_composite_bind_groups = bind_groups.4;
        self.blit_bind_groups = bind_groups.5;
    }

    pub fn color_view(&self, which: PingPong) -> &wgpu::TextureView {
        &self.color[which.index()].view
    }

    pub fn bloom_view(&self, index: usize) -> &wgpu::TextureView {
        &self.bloom[index].view
    }

    pub fn mask_view(&self) -> &wgpu::TextureView {
        &self.mask.view
    }

    pub fn extract_bind_group(&self, source: PingPong) -> &wgpu::BindGroup {
        &self.extract_bind_groups[source.index()]
    }

    pub fn blur_h_bind_group(&self) -> &wgpu::BindGroup {
        &self.blur_h_bind_group
    }

    pub fn blur_v_bind_group(&self) -> &wgpu::BindGroup {
        &self.blur_v_bind_group
    }

    pub fn bloom_composite_bind_group(&self, source: PingPong) -> &wgpu::BindGroup {
        &self.bloom_composite_bind_groups[source.index()]
    }

    pub fn outline_composite_bind_group(&self, source: PingPong) -> &wgpu::BindGroup {
        &self.outline_composite_bind_groups[source.index()]
    }

    pub fn blit_bind_group(&self, source: PingPong) -> &wgpu::BindGroup {
        &self.blit_bind_groups[source.index()]
    }
}

fn texel_size(width: u32, height: u32) -> [f32; 2] {
    [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_pong_alternates() {
        assert_eq!(PingPong::A.other(), PingPong::B);
        assert_eq!(PingPong::B.other().other(), PingPong::B);
    }

    #[test]
    fn test_texel_size_never_divides_by_zero() {
        let texel = texel_size(0, 0);
        assert!(texel[0].is_finite() && texel[1].is_finite());
    }
}
