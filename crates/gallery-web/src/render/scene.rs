//! Scene pass: baked gallery geometry, per-exhibit instance transforms and the
//! dust billboards.

use super::helpers;
use super::targets::RenderTargets;
use crate::constants::SCENE_SAMPLE_COUNT;
use gallery_core::*;
use glam::{Mat4, Vec3};
use std::ops::Range;
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog: [f32; 4],
    ambient: [f32; 4],
    sky: [f32; 4],
    ground: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    fill_dir: [f32; 4],
    fill_color: [f32; 4],
    particle_color: [f32; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
}

fn scaled(hex: u32, intensity: f32) -> [f32; 4] {
    let [r, g, b] = srgb_hex_to_linear(hex);
    [r * intensity, g * intensity, b * intensity, 1.0]
}

fn direction(p: [f32; 3]) -> [f32; 4] {
    Vec3::from(p).normalize_or_zero().extend(0.0).to_array()
}

impl SceneUniforms {
    pub(crate) fn from_world(world: &World) -> Self {
        let cam = &world.camera;
        let (right, up) = cam.billboard_axes();
        let [fr, fg, fb] = srgb_hex_to_linear(BACKGROUND_HEX);
        let [pr, pg, pb] = srgb_hex_to_linear(PARTICLE_HEX);
        Self {
            view_proj: cam.view_projection().to_cols_array_2d(),
            camera_pos: cam.eye.extend(world.time()).to_array(),
            fog: [fr, fg, fb, FOG_DENSITY],
            ambient: scaled(AMBIENT_HEX, AMBIENT_INTENSITY),
            sky: scaled(HEMI_SKY_HEX, HEMI_INTENSITY),
            ground: scaled(HEMI_GROUND_HEX, HEMI_INTENSITY),
            key_dir: direction(KEY_LIGHT_POSITION),
            key_color: scaled(KEY_LIGHT_HEX, KEY_LIGHT_INTENSITY),
            fill_dir: direction(FILL_LIGHT_POSITION),
            fill_color: scaled(FILL_LIGHT_HEX, FILL_LIGHT_INTENSITY),
            particle_color: [pr, pg, pb, PARTICLE_OPACITY],
            camera_right: right.extend(PARTICLE_SIZE).to_array(),
            camera_up: up.extend(0.0).to_array(),
        }
    }
}

const MESH_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3, 3 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![4 => Float32x4, 5 => Float32x4, 6 => Float32x4, 7 => Float32x4];
const PARTICLE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

const INSTANCE_STRIDE: u64 = std::mem::size_of::<[f32; 16]>() as u64;
const PARTICLE_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;

/// GPU copies of everything the scene pass draws.
///
/// Instance 0 is the identity used by the static surfaces; instance `i + 1`
/// carries exhibit `i`'s model matrix.
pub(crate) struct SceneResources {
    mesh_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    particle_buffer: wgpu::Buffer,
    static_range: Range<u32>,
    exhibit_ranges: Vec<Range<u32>>,
    particle_count: u32,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, world: &World) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let uniform_buffer =
            helpers::uniform_buffer(device, "scene_uniforms", std::mem::size_of::<SceneUniforms>());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        // Planes are single-sided in local space; the shader flips back faces.
        let primitive = wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        };
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_mesh"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SceneVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &MESH_ATTRS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: INSTANCE_STRIDE,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &INSTANCE_ATTRS,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive,
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: SCENE_SAMPLE_COUNT,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_mesh"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: helpers::HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: PARTICLE_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &PARTICLE_ATTRS,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive,
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: SCENE_SAMPLE_COUNT,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: helpers::HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let (geometry, static_range, exhibit_ranges) = world.bake_geometry();
        log::info!(
            "[render] baked vertices={} triangles={} exhibits={}",
            geometry.vertices.len(),
            geometry.indices.len() / 3,
            exhibit_ranges.len()
        );
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_vertices"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_indices"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_instances"),
            size: INSTANCE_STRIDE * (exhibit_ranges.len() as u64 + 1),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let particle_count = world.particles.len() as u32;
        let particle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dust_positions"),
            size: PARTICLE_STRIDE * (particle_count.max(1) as u64),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            mesh_pipeline,
            particle_pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            particle_buffer,
            static_range,
            exhibit_ranges,
            particle_count,
        }
    }

    /// Upload this frame's camera, exhibit transforms and dust positions.
    pub(crate) fn write_frame(&self, queue: &wgpu::Queue, world: &World) {
        let uniforms = SceneUniforms::from_world(world);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let instances: Vec<[f32; 16]> = std::iter::once(Mat4::IDENTITY)
            .chain(world.exhibits.iter().map(|e| e.transform.matrix()))
            .map(|m| m.to_cols_array())
            .collect();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        if self.particle_count > 0 {
            queue.write_buffer(
                &self.particle_buffer,
                0,
                bytemuck::cast_slice(world.particles.positions()),
            );
        }
    }

    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        clear: wgpu::Color,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &targets.msaa_view,
                resolve_target: Some(&targets.hdr_view),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Discard,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.bind_group, &[]);

        rpass.set_pipeline(&self.mesh_pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(self.static_range.clone(), 0, 0..1);
        for (i, range) in self.exhibit_ranges.iter().enumerate() {
            let instance = i as u32 + 1;
            rpass.draw_indexed(range.clone(), 0, instance..instance + 1);
        }

        if self.particle_count > 0 {
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_vertex_buffer(0, self.particle_buffer.slice(..));
            rpass.draw(0..6, 0..self.particle_count);
        }
    }
}
