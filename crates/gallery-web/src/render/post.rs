use super::helpers;
use super::targets::RenderTargets;
use gallery_core::PostSettings;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    bloom_strength: f32,
    bloom_radius: f32,
    threshold: f32,
    exposure: f32,
    vignette_offset: f32,
    vignette_darkness: f32,
    _pad: [f32; 2],
}

impl PostUniforms {
    pub(crate) fn new(resolution: [f32; 2], blur_dir: [f32; 2], settings: &PostSettings) -> Self {
        Self {
            resolution,
            blur_dir,
            bloom_strength: settings.bloom_strength,
            bloom_radius: settings.bloom_radius,
            threshold: settings.bloom_threshold,
            exposure: settings.exposure,
            vignette_offset: settings.vignette_offset,
            vignette_darkness: settings.vignette_darkness,
            _pad: [0.0; 2],
        }
    }
}

/// Pipelines and layouts for the composite chain. Each blur direction has its
/// own uniform buffer: all writes land before the encoder is submitted, so a
/// shared buffer would leave every pass seeing the last direction.
pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) uniform_main: wgpu::Buffer,
    pub(crate) uniform_h: wgpu::Buffer,
    pub(crate) uniform_v: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let size = std::mem::size_of::<PostUniforms>();
    let uniform_main = helpers::uniform_buffer(device, "post_uniforms", size);
    let uniform_h = helpers::uniform_buffer(device, "post_uniforms_blur_h", size);
    let uniform_v = helpers::uniform_buffer(device, "post_uniforms_blur_v", size);

    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        helpers::HDR_FORMAT,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_blur",
        helpers::HDR_FORMAT,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        uniform_main,
        uniform_h,
        uniform_v,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, bloom_res: [f32; 2], settings: &PostSettings) {
        let main = PostUniforms::new(bloom_res, [0.0, 0.0], settings);
        let h = PostUniforms::new(bloom_res, [1.0, 0.0], settings);
        let v = PostUniforms::new(bloom_res, [0.0, 1.0], settings);
        queue.write_buffer(&self.uniform_main, 0, bytemuck::bytes_of(&main));
        queue.write_buffer(&self.uniform_h, 0, bytemuck::bytes_of(&h));
        queue.write_buffer(&self.uniform_v, 0, bytemuck::bytes_of(&v));
    }
}

/// Bind groups over the current targets; rebuilt whenever the targets are.
pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup, // horizontal blur source
    pub(crate) from_bloom_b: wgpu::BindGroup, // vertical blur source
    pub(crate) bloom_a_only: wgpu::BindGroup, // group1 for composite
}

impl PostBindGroups {
    pub(crate) fn new(
        device: &wgpu::Device,
        post: &PostResources,
        sampler: &wgpu::Sampler,
        targets: &RenderTargets,
    ) -> Self {
        let with_uniform = |label: &str, view: &wgpu::TextureView, uniform: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &post.bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniform.as_entire_binding(),
                    },
                ],
            })
        };
        let hdr = with_uniform("bg_hdr", &targets.hdr_view, &post.uniform_main);
        let from_bloom_a = with_uniform("bg_from_bloom_a", &targets.bloom_a_view, &post.uniform_h);
        let from_bloom_b = with_uniform("bg_from_bloom_b", &targets.bloom_b_view, &post.uniform_v);
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &post.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            hdr,
            from_bloom_a,
            from_bloom_b,
            bloom_a_only,
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
