//! The owned scene aggregate and the per-frame driver.
//!
//! Static surfaces are built once; afterwards the frame driver is the only
//! writer of exhibit transforms, particles and time, and [`World::scroll_to`]
//! is the only writer of the camera.

use crate::camera::{Camera, CameraPathConfig, CameraPathStyle, CameraPose};
use crate::config::GalleryConfig;
use crate::exhibits::ExhibitRegistry;
use crate::geometry::SurfaceGroup;
use crate::layout::{generate_layout, Layout};
use crate::mesh::{MeshData, SceneGeometry};
use crate::particles::ParticleField;
use rand::Rng;
use std::convert::Infallible;
use std::ops::Range;

pub struct World {
    pub layout: Layout,
    pub surfaces: SurfaceGroup,
    pub exhibits: ExhibitRegistry,
    pub particles: ParticleField,
    pub camera: Camera,
    camera_path: CameraPathConfig,
    camera_style: CameraPathStyle,
    time: f32,
}

impl World {
    pub fn new<R: Rng + ?Sized>(config: &GalleryConfig, aspect: f32, rng: &mut R) -> Self {
        let layout = generate_layout(&config.layout);
        let surfaces = layout.build_surfaces(config.vault);
        let mut world = Self {
            layout,
            surfaces,
            exhibits: ExhibitRegistry::gallery(),
            particles: ParticleField::spawn(&config.particles, rng),
            camera: Camera::new(aspect),
            camera_path: config.camera,
            camera_style: config.camera_style,
            time: 0.0,
        };
        world.scroll_to(0.0);
        world
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Place the camera for `progress`, which must already be in \[0, 1\].
    pub fn scroll_to(&mut self, progress: f32) -> CameraPose {
        let pose = self.camera_path.position_at(progress, self.camera_style);
        self.camera.apply_pose(pose);
        pose
    }

    /// Bake static surfaces followed by one mesh per exhibit (in local
    /// space). Returns the geometry, the static index range and one index
    /// range per exhibit.
    pub fn bake_geometry(&self) -> (SceneGeometry, Range<u32>, Vec<Range<u32>>) {
        let mut geometry = SceneGeometry::default();
        let start = geometry.indices.len() as u32;
        for surface in self.surfaces.iter() {
            geometry.append_surface(surface);
        }
        let static_range = start..geometry.indices.len() as u32;
        let exhibit_ranges = self
            .exhibits
            .iter()
            .map(|e| geometry.append(&MeshData::from_primitive(&e.shape), e.material))
            .collect();
        (geometry, static_range, exhibit_ranges)
    }
}

/// Receiver of the "frame ready" signal at the end of every tick.
pub trait FrameSink {
    type Error;

    fn frame_ready(&mut self, world: &World) -> Result<(), Self::Error>;
}

impl FrameSink for () {
    type Error = Infallible;

    fn frame_ready(&mut self, _world: &World) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FrameDriver {
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick<S: FrameSink>(
        &mut self,
        world: &mut World,
        dt: f32,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        world.time += dt;
        world.exhibits.update_all(world.time);
        world.particles.advance(dt);
        self.frames += 1;
        sink.frame_ready(world)
    }
}
