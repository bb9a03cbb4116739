//! Scroll-driven camera path and projection.
//!
//! The path controller is a pure function of normalized scroll progress. It
//! never clamps: keeping progress in \[0, 1\] is the caller's job (see
//! [`ScrollSmoother`], which clamps its input).

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPathConfig {
    pub start_depth: f32,
    pub end_depth: f32,
    pub start_height: f32,
    pub end_height: f32,
}

impl Default for CameraPathConfig {
    fn default() -> Self {
        Self {
            start_depth: CAMERA_START_DEPTH,
            end_depth: CAMERA_END_DEPTH,
            start_height: CAMERA_START_HEIGHT,
            end_height: CAMERA_END_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPathStyle {
    /// Linear depth, sine-blended height, fixed forward view.
    Linear,
    /// Quadratic ease-in-out depth and height with a look-ahead target.
    Eased,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

impl CameraPathConfig {
    pub fn position_at(&self, progress: f32, style: CameraPathStyle) -> CameraPose {
        let p = progress;
        match style {
            CameraPathStyle::Linear => {
                let z = lerp(self.start_depth, self.end_depth, p);
                let blend = (p * PI).sin() * 0.5 + p * 0.5;
                let y = lerp(self.start_height, self.end_height, blend);
                let x = (p * PI * 2.0).sin() * 0.5;
                let eye = Vec3::new(x, y, z);
                CameraPose {
                    eye,
                    target: eye - Vec3::Z,
                }
            }
            CameraPathStyle::Eased => {
                let e = ease_in_out_quad(p);
                let z = lerp(self.start_depth, self.end_depth, e);
                let y = lerp(self.start_height, self.end_height, e) + (p * PI * 3.0).sin() * 0.3;
                let x = (p * PI * 2.5).sin() * 0.3;
                CameraPose {
                    eye: Vec3::new(x, y, z),
                    target: Vec3::new(
                        0.0,
                        CAMERA_LOOK_HEIGHT + (p * PI).sin() * 0.5,
                        z - CAMERA_LOOK_AHEAD,
                    ),
                }
            }
        }
    }
}

/// Right-handed perspective camera; `aspect` follows the viewport.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, CAMERA_START_HEIGHT, CAMERA_START_DEPTH),
            target: Vec3::new(0.0, CAMERA_START_HEIGHT, CAMERA_START_DEPTH - 1.0),
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn apply_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    /// Resize hook: zero-height viewports keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera-space right and up axes in world space, used for billboards.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

/// Map a page scroll offset to progress in \[0, 1\].
pub fn progress_from_scroll(scroll_offset: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_offset / range).clamp(0.0, 1.0) as f32
}

/// Lagging follower of the raw scroll progress ("scrub").
#[derive(Clone, Debug)]
pub struct ScrollSmoother {
    target: f32,
    current: f32,
    tau_sec: f32,
}

impl ScrollSmoother {
    pub fn new(tau_sec: f32) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            tau_sec,
        }
    }

    pub fn set_target(&mut self, progress: f32) {
        self.target = progress.clamp(0.0, 1.0);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance by `dt_sec` and return the smoothed progress.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        if self.tau_sec <= 0.0 {
            self.current = self.target;
            return self.current;
        }
        let alpha = 1.0 - (-dt_sec.max(0.0) / self.tau_sec).exp();
        self.current += (self.target - self.current) * alpha;
        self.current
    }
}

impl Default for ScrollSmoother {
    fn default() -> Self {
        Self::new(SCROLL_SCRUB_SEC)
    }
}
