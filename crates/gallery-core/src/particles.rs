//! Dust motes: a fixed-size point cloud drifting through the gallery.
//!
//! Positions and velocities live in flat `[x, y, z, x, y, z, ..]` buffers so the
//! position buffer can be uploaded to the GPU as-is. x and y wrap toroidally;
//! z is left unbounded.

use crate::config::ParticleParams;
use crate::constants::FRAME_TIME_STEP;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<f32>,
    velocities: Vec<f32>,
    half_width: f32,
    height: f32,
}

impl ParticleField {
    pub fn spawn<R: Rng + ?Sized>(params: &ParticleParams, rng: &mut R) -> Self {
        let n = params.count;
        let mut positions = Vec::with_capacity(n * 3);
        let mut velocities = Vec::with_capacity(n * 3);
        let symmetric = |rng: &mut R, v: f32| {
            if v > 0.0 {
                rng.gen_range(-v..=v)
            } else {
                0.0
            }
        };
        for _ in 0..n {
            positions.push(rng.gen_range(-params.half_width..params.half_width));
            positions.push(rng.gen_range(0.0..params.height));
            positions.push(params.depth_start - rng.gen_range(0.0..params.depth_span));

            velocities.push(symmetric(rng, params.velocity_xz));
            velocities.push(symmetric(rng, params.velocity_y));
            velocities.push(symmetric(rng, params.velocity_xz));
        }
        log::debug!("[particles] spawned {}", n);
        Self {
            positions,
            velocities,
            half_width: params.half_width,
            height: params.height,
        }
    }

    /// Build a field from explicit buffers (both `3 * count` long).
    pub fn from_buffers(
        positions: Vec<f32>,
        velocities: Vec<f32>,
        half_width: f32,
        height: f32,
    ) -> Self {
        debug_assert_eq!(positions.len(), velocities.len());
        debug_assert_eq!(positions.len() % 3, 0);
        Self {
            positions,
            velocities,
            half_width,
            height,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn position(&self, i: usize) -> [f32; 3] {
        [
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        ]
    }

    /// Move every particle by its velocity, scaled so that `dt ==
    /// FRAME_TIME_STEP` is exactly one frame's drift, then wrap x and y.
    pub fn advance(&mut self, dt: f32) {
        let scale = dt / FRAME_TIME_STEP;
        let hw = self.half_width;
        let h = self.height;
        for (p, v) in self
            .positions
            .chunks_exact_mut(3)
            .zip(self.velocities.chunks_exact(3))
        {
            p[0] += v[0] * scale;
            p[1] += v[1] * scale;
            p[2] += v[2] * scale;

            if p[0] > hw {
                p[0] = -hw;
            }
            if p[0] < -hw {
                p[0] = hw;
            }
            if p[1] > h {
                p[1] = 0.0;
            }
            if p[1] < 0.0 {
                p[1] = h;
            }
        }
    }
}
