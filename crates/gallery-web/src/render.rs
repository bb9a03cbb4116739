mod helpers;
mod post;
mod scene;
mod targets;

use gallery_core::{srgb_hex_to_linear, FrameSink, PostSettings, World, BACKGROUND_HEX, POST_WGSL};
use post::{PostBindGroups, PostResources};
use scene::SceneResources;
use targets::RenderTargets;
use web_sys as web;
use wgpu;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,
    settings: PostSettings,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        world: &World,
        settings: PostSettings,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {}x{} format={:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);
        let scene = SceneResources::new(&device, world);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = PostBindGroups::new(&device, &post, &linear_sampler, &targets);

        let [r, g, b] = srgb_hex_to_linear(BACKGROUND_HEX);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            linear_sampler,
            post,
            post_groups,
            settings,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the surface configuration and rebuild size-dependent targets.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, self.width, self.height);
        self.post_groups =
            PostBindGroups::new(&self.device, &self.post, &self.linear_sampler, &self.targets);
        log::debug!("[render] resized to {}x{}", self.width, self.height);
    }

    pub fn render(&mut self, world: &World) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.scene.write_frame(&self.queue, world);
        let (bw, bh) = self.targets.bloom_size;
        self.post
            .write_uniforms(&self.queue, [bw as f32, bh as f32], &self.settings);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.scene.encode(&mut encoder, &self.targets, self.clear_color);

        if self.settings.bloom_enabled() {
            // bright pass -> bloom_a, blur H -> bloom_b, blur V -> bloom_a
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                &self.post.bright_pipeline,
                &self.post_groups.hdr,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                &self.post.blur_pipeline,
                &self.post_groups.from_bloom_a,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                &self.post.blur_pipeline,
                &self.post_groups.from_bloom_b,
                None,
            );
        }
        post::blit(
            &mut encoder,
            "composite",
            &view,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl FrameSink for GpuState {
    type Error = wgpu::SurfaceError;

    fn frame_ready(&mut self, world: &World) -> Result<(), Self::Error> {
        self.render(world)
    }
}
