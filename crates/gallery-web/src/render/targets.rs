use super::helpers;
use wgpu;

/// Offscreen targets for the scene and the composite chain.
///
/// - `msaa_*` and `depth_*` are multisampled and back the scene pass only.
/// - `hdr_*` receive the resolved scene in Rgba16Float for post-processing.
/// - `bloom_*` are half-res ping-pong buffers for the bright pass and blur.
pub(crate) struct RenderTargets {
    #[allow(dead_code)]
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) bloom_size: (u32, u32),
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (msaa_tex, msaa_view) = helpers::create_msaa_target(device, width, height);
        let (hdr_tex, hdr_view) = helpers::create_color_target(device, "hdr_tex", width, height);
        let (depth_tex, depth_view) = helpers::create_depth_target(device, width, height);
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) = helpers::create_color_target(device, "bloom_a", bw, bh);
        let (bloom_b, bloom_b_view) = helpers::create_color_target(device, "bloom_b", bw, bh);
        Self {
            msaa_tex,
            msaa_view,
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
            bloom_size: (bw, bh),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
