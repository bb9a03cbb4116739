//! Floating exhibition pieces and their per-tick motion.

use crate::constants::*;
use crate::geometry::{MaterialKind, Primitive, Transform};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct Exhibit {
    pub shape: Primitive,
    pub material: MaterialKind,
    pub base_rotation_speed: f32,
    pub sway_amplitude: f32,
    pub bob_amplitude: f32,
    pub transform: Transform,
}

impl Exhibit {
    pub fn new(shape: Primitive, material: MaterialKind, position: Vec3) -> Self {
        Self {
            shape,
            material,
            base_rotation_speed: EXHIBIT_ROTATION_SPEED,
            sway_amplitude: EXHIBIT_SWAY_AMPLITUDE,
            bob_amplitude: EXHIBIT_BOB_AMPLITUDE,
            transform: Transform::at(position),
        }
    }

    /// One tick of motion; `index` phase-offsets this exhibit from its
    /// neighbours.
    pub fn update(&mut self, time: f32, index: usize) {
        let phase = index as f32;
        self.transform.rotation.y += self.base_rotation_speed;
        self.transform.rotation.x = (time + phase).sin() * self.sway_amplitude;
        self.transform.position.y += (time * 0.5 + phase * 2.0).sin() * self.bob_amplitude;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExhibitRegistry {
    exhibits: Vec<Exhibit>,
}

impl ExhibitRegistry {
    pub fn new(exhibits: Vec<Exhibit>) -> Self {
        Self { exhibits }
    }

    /// The five pieces placed one per room.
    pub fn gallery() -> Self {
        Self::new(vec![
            Exhibit::new(
                Primitive::Torus {
                    radius: 1.5,
                    tube: 0.4,
                    radial_segments: 32,
                    tubular_segments: 64,
                    arc: std::f32::consts::TAU,
                },
                MaterialKind::Gold,
                Vec3::new(0.0, 5.0, 0.0),
            ),
            Exhibit::new(
                Primitive::Dodecahedron { radius: 1.2 },
                MaterialKind::Accent,
                Vec3::new(3.0, 4.5, -45.0),
            ),
            Exhibit::new(
                Primitive::Icosahedron { radius: 1.0 },
                MaterialKind::Gold,
                Vec3::new(-3.0, 5.5, -95.0),
            ),
            Exhibit::new(
                Primitive::Sphere {
                    radius: 1.5,
                    width_segments: 64,
                    height_segments: 64,
                },
                MaterialKind::Accent,
                Vec3::new(0.0, 6.0, -145.0),
            ),
            Exhibit::new(
                Primitive::Octahedron { radius: 1.3 },
                MaterialKind::Gold,
                Vec3::new(2.0, 5.0, -195.0),
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.exhibits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exhibits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Exhibit> {
        self.exhibits.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exhibit> {
        self.exhibits.iter()
    }

    pub fn update_all(&mut self, time: f32) {
        for (i, exhibit) in self.exhibits.iter_mut().enumerate() {
            exhibit.update(time, i);
        }
    }
}
