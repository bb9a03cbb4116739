//! Geometry factory: rooms, arched doorways and pillars as groups of static
//! surfaces.
//!
//! Every builder is pure. A surface is an immutable value combining a
//! primitive shape, a material, a transform and shadow flags; meshes are
//! produced from it later by [`crate::mesh`].

use crate::constants::*;
use crate::layout::{DoorwaySpec, PillarSpec, RoomSpec};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Position, XYZ Euler rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadowConfig {
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl ShadowConfig {
    pub const NONE: Self = Self {
        cast_shadow: false,
        receive_shadow: false,
    };
    pub const CAST: Self = Self {
        cast_shadow: true,
        receive_shadow: false,
    };
    pub const RECEIVE: Self = Self {
        cast_shadow: false,
        receive_shadow: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Floor,
    Wall,
    Ceiling,
    Pillar,
    Gold,
    Accent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color_hex: u32,
    pub roughness: f32,
    pub metalness: f32,
}

impl MaterialKind {
    pub fn material(self) -> Material {
        let (color_hex, roughness, metalness) = match self {
            MaterialKind::Floor => (FLOOR_HEX, 0.85, 0.05),
            MaterialKind::Wall => (WALL_HEX, 0.9, 0.02),
            MaterialKind::Ceiling => (CEILING_HEX, 0.95, 0.0),
            MaterialKind::Pillar => (PILLAR_HEX, 0.7, 0.05),
            MaterialKind::Gold => (GOLD_HEX, 0.3, 0.8),
            MaterialKind::Accent => (ACCENT_HEX, 0.4, 0.6),
        };
        Material {
            color_hex,
            roughness,
            metalness,
        }
    }
}

/// Shape parameters, centred on the local origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// XY plane facing +Z. `vault` bends the grid by [`vault_displacement`].
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
        vault: Option<f32>,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Y-aligned frustum.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Ring in the XY plane; `arc` sweeps counter-clockwise from +X.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Dodecahedron {
        radius: f32,
    },
    Icosahedron {
        radius: f32,
    },
    Octahedron {
        radius: f32,
    },
}

impl Primitive {
    pub fn flat_plane(width: f32, height: f32) -> Self {
        Primitive::Plane {
            width,
            height,
            width_segments: 1,
            height_segments: 1,
            vault: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub primitive: Primitive,
    pub material: MaterialKind,
    pub transform: Transform,
    pub shadow: ShadowConfig,
}

impl Surface {
    pub fn new(
        primitive: Primitive,
        material: MaterialKind,
        transform: Transform,
        shadow: ShadowConfig,
    ) -> Self {
        Self {
            primitive,
            material,
            transform,
            shadow,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceGroup {
    pub surfaces: Vec<Surface>,
}

impl SurfaceGroup {
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }

    pub fn extend(&mut self, other: SurfaceGroup) {
        self.surfaces.extend(other.surfaces);
    }
}

/// Radial falloff used to vault ceilings: 0 at the centre, `-2k` at corners.
#[inline]
pub fn vault_displacement(x: f32, z: f32, half_width: f32, half_length: f32, k: f32) -> f32 {
    let nx = x / half_width;
    let nz = z / half_length;
    -k * (nx * nx + nz * nz)
}

pub fn build_room(spec: &RoomSpec, vault: Option<f32>) -> SurfaceGroup {
    let centre_z = spec.start_offset - spec.length / 2.0;
    let floor = Primitive::flat_plane(spec.width, spec.length);
    let ceiling = match vault {
        Some(k) => Primitive::Plane {
            width: spec.width,
            height: spec.length,
            width_segments: VAULT_SEGMENTS,
            height_segments: VAULT_SEGMENTS,
            vault: Some(k),
        },
        None => floor,
    };
    let wall = Primitive::flat_plane(spec.length, spec.height);

    SurfaceGroup {
        surfaces: vec![
            Surface::new(
                floor,
                MaterialKind::Floor,
                Transform::at(Vec3::new(0.0, 0.0, centre_z))
                    .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
                ShadowConfig::RECEIVE,
            ),
            Surface::new(
                ceiling,
                MaterialKind::Ceiling,
                Transform::at(Vec3::new(0.0, spec.height, centre_z))
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
                ShadowConfig::NONE,
            ),
            Surface::new(
                wall,
                MaterialKind::Wall,
                Transform::at(Vec3::new(-spec.width / 2.0, spec.height / 2.0, centre_z))
                    .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)),
                ShadowConfig::RECEIVE,
            ),
            Surface::new(
                wall,
                MaterialKind::Wall,
                Transform::at(Vec3::new(spec.width / 2.0, spec.height / 2.0, centre_z))
                    .with_rotation(Vec3::new(0.0, -FRAC_PI_2, 0.0)),
                ShadowConfig::RECEIVE,
            ),
        ],
    }
}

pub fn build_doorway(spec: &DoorwaySpec) -> SurfaceGroup {
    let arch_radius = spec.width / 2.0;
    let jamb_height = spec.height - arch_radius;
    let jamb = Primitive::Box {
        width: DOOR_FRAME_THICKNESS,
        height: jamb_height,
        depth: DOOR_FRAME_THICKNESS,
    };
    let arch = Primitive::Torus {
        radius: arch_radius,
        tube: DOOR_FRAME_THICKNESS / 2.0,
        radial_segments: 8,
        tubular_segments: 16,
        arc: PI,
    };

    SurfaceGroup {
        surfaces: vec![
            Surface::new(
                jamb,
                MaterialKind::Pillar,
                Transform::at(Vec3::new(-spec.width / 2.0, jamb_height / 2.0, spec.offset)),
                ShadowConfig::CAST,
            ),
            Surface::new(
                jamb,
                MaterialKind::Pillar,
                Transform::at(Vec3::new(spec.width / 2.0, jamb_height / 2.0, spec.offset)),
                ShadowConfig::CAST,
            ),
            // Half ring laid over the jamb tops.
            Surface::new(
                arch,
                MaterialKind::Pillar,
                Transform::at(Vec3::new(0.0, jamb_height, spec.offset))
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2)),
                ShadowConfig::CAST,
            ),
        ],
    }
}

pub fn build_pillar(spec: &PillarSpec) -> SurfaceGroup {
    let part = |radius_top: f32, radius_bottom: f32, height: f32| Primitive::Cylinder {
        radius_top,
        radius_bottom,
        height,
        radial_segments: 16,
    };

    SurfaceGroup {
        surfaces: vec![
            Surface::new(
                part(0.4, 0.5, 10.0),
                MaterialKind::Pillar,
                Transform::at(Vec3::new(spec.x, 5.0, spec.z)),
                ShadowConfig::CAST,
            ),
            Surface::new(
                part(0.7, 0.8, 0.6),
                MaterialKind::Pillar,
                Transform::at(Vec3::new(spec.x, 0.3, spec.z)),
                ShadowConfig::NONE,
            ),
            Surface::new(
                part(0.8, 0.5, 0.5),
                MaterialKind::Pillar,
                Transform::at(Vec3::new(spec.x, 10.2, spec.z)),
                ShadowConfig::NONE,
            ),
        ],
    }
}
