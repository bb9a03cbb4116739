//! Scene configuration presets.
//!
//! Two versions of the gallery exist: the classic walk (linear camera, flat
//! ceilings, direct render) and the elaborate one (eased camera with a look-at
//! target, vaulted ceilings, denser dust and a bloom + vignette composite).

use crate::camera::{CameraPathConfig, CameraPathStyle};
use crate::constants::*;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneVersion {
    Classic,
    Elaborate,
}

impl FromStr for SceneVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" | "classic" => Ok(SceneVersion::Classic),
            "2" | "v2" | "elaborate" => Ok(SceneVersion::Elaborate),
            other => Err(ConfigError::UnknownVersion(other.to_string())),
        }
    }
}

impl SceneVersion {
    /// Look up `key` in a `location.search` style string (`?a=1&version=2`).
    /// A missing or empty key yields `Ok(None)`; the first occurrence wins.
    pub fn from_query(search: &str, key: &str) -> Result<Option<Self>, ConfigError> {
        let query = search.strip_prefix('?').unwrap_or(search);
        for pair in query.split('&') {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            if k != key {
                continue;
            }
            if v.is_empty() {
                return Ok(None);
            }
            return v.parse().map(Some);
        }
        Ok(None)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown scene version: {0:?}")]
    UnknownVersion(String),
    #[error("room count must be at least 1")]
    NoRooms,
    #[error("room step must be positive, got {0}")]
    NonPositiveStep(f32),
    #[error("room dimensions must be positive")]
    DegenerateRoom,
    #[error("particle box must be finite and non-empty")]
    EmptyParticleBox,
    #[error("particle velocity range must be finite and non-negative")]
    NegativeVelocityRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
    pub room_count: usize,
    pub step: f32,
    pub start: f32,
    pub room_width: f32,
    pub room_height: f32,
    pub doorway_width: f32,
    pub doorway_height: f32,
    pub pillar_lateral: f32,
    pub pillar_inset: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            room_count: ROOM_COUNT,
            step: ROOM_STEP,
            start: LAYOUT_START,
            room_width: ROOM_WIDTH,
            room_height: ROOM_HEIGHT,
            doorway_width: DOORWAY_WIDTH,
            doorway_height: DOORWAY_HEIGHT,
            pillar_lateral: PILLAR_LATERAL,
            pillar_inset: PILLAR_INSET,
        }
    }
}

/// Spawn box and velocity ranges for the dust field.
///
/// Velocities are per-frame displacements at [`FRAME_TIME_STEP`]; each axis is
/// sampled from `[-v, v]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams {
    pub count: usize,
    pub half_width: f32,
    pub height: f32,
    pub depth_start: f32,
    pub depth_span: f32,
    pub velocity_xz: f32,
    pub velocity_y: f32,
}

impl ParticleParams {
    pub fn classic() -> Self {
        Self {
            count: 800,
            velocity_xz: 0.005,
            velocity_y: 0.0025,
            ..Self::base()
        }
    }

    pub fn elaborate() -> Self {
        Self {
            count: 1200,
            velocity_xz: 0.008,
            velocity_y: 0.004,
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            count: 0,
            half_width: PARTICLE_HALF_WIDTH,
            height: PARTICLE_HEIGHT,
            depth_start: PARTICLE_DEPTH_START,
            depth_span: PARTICLE_DEPTH_SPAN,
            velocity_xz: 0.0,
            velocity_y: 0.0,
        }
    }
}

/// Composite parameters; zero strength/darkness turns the pass into a plain
/// tone-mapped copy of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostSettings {
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
    pub exposure: f32,
}

impl PostSettings {
    pub fn direct() -> Self {
        Self {
            bloom_strength: 0.0,
            bloom_radius: 0.0,
            bloom_threshold: 1.0,
            vignette_offset: 0.0,
            vignette_darkness: 0.0,
            exposure: TONE_MAPPING_EXPOSURE,
        }
    }

    pub fn bloom_vignette() -> Self {
        Self {
            bloom_strength: BLOOM_STRENGTH,
            bloom_radius: BLOOM_RADIUS,
            bloom_threshold: BLOOM_THRESHOLD,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
            exposure: TONE_MAPPING_EXPOSURE,
        }
    }

    pub fn bloom_enabled(&self) -> bool {
        self.bloom_strength > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub version: SceneVersion,
    pub layout: LayoutParams,
    pub particles: ParticleParams,
    pub camera: CameraPathConfig,
    pub camera_style: CameraPathStyle,
    /// Ceiling vault depth; `None` keeps ceilings flat.
    pub vault: Option<f32>,
    pub post: PostSettings,
}

impl GalleryConfig {
    pub fn classic() -> Self {
        Self {
            version: SceneVersion::Classic,
            layout: LayoutParams::default(),
            particles: ParticleParams::classic(),
            camera: CameraPathConfig::default(),
            camera_style: CameraPathStyle::Linear,
            vault: None,
            post: PostSettings::direct(),
        }
    }

    pub fn elaborate() -> Self {
        Self {
            version: SceneVersion::Elaborate,
            layout: LayoutParams::default(),
            particles: ParticleParams::elaborate(),
            camera: CameraPathConfig::default(),
            camera_style: CameraPathStyle::Eased,
            vault: Some(VAULT_DEPTH),
            post: PostSettings::bloom_vignette(),
        }
    }

    pub fn for_version(version: SceneVersion) -> Self {
        match version {
            SceneVersion::Classic => Self::classic(),
            SceneVersion::Elaborate => Self::elaborate(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.layout;
        if l.room_count == 0 {
            return Err(ConfigError::NoRooms);
        }
        if !(l.step > 0.0) {
            return Err(ConfigError::NonPositiveStep(l.step));
        }
        if !(l.room_width > 0.0 && l.room_height > 0.0) {
            return Err(ConfigError::DegenerateRoom);
        }
        let p = &self.particles;
        let box_finite = [p.half_width, p.height, p.depth_start, p.depth_span]
            .iter()
            .all(|v| v.is_finite());
        if !(box_finite && p.half_width > 0.0 && p.height > 0.0 && p.depth_span > 0.0) {
            return Err(ConfigError::EmptyParticleBox);
        }
        if !(p.velocity_xz >= 0.0 && p.velocity_y >= 0.0)
            || !(p.velocity_xz.is_finite() && p.velocity_y.is_finite())
        {
            return Err(ConfigError::NegativeVelocityRange);
        }
        Ok(())
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::elaborate()
    }
}
