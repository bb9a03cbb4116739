//! Triangle meshes for [`Primitive`]s and packing into GPU vertices.
//!
//! Conventions follow the usual Y-up, counter-clockwise layout. Polyhedra are
//! flat shaded (vertices are not shared between faces); everything else is
//! smooth shaded and indexed.

use crate::constants::srgb_hex_to_linear;
use crate::geometry::{vault_displacement, MaterialKind, Primitive, Surface};
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::{PI, TAU};
use std::ops::Range;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, p: Vec3, n: Vec3) -> u32 {
        self.positions.push(p.to_array());
        self.normals.push(n.to_array());
        (self.positions.len() - 1) as u32
    }

    pub fn from_primitive(primitive: &Primitive) -> Self {
        match *primitive {
            Primitive::Plane {
                width,
                height,
                width_segments,
                height_segments,
                vault,
            } => plane(width, height, width_segments, height_segments, vault),
            Primitive::Box {
                width,
                height,
                depth,
            } => cuboid(width, height, depth),
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => cylinder(radius_top, radius_bottom, height, radial_segments),
            Primitive::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
                arc,
            } => torus(radius, tube, radial_segments, tubular_segments, arc),
            Primitive::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments, height_segments),
            Primitive::Dodecahedron { radius } => dodecahedron(radius),
            Primitive::Icosahedron { radius } => flat_hull(&icosahedron_vertices(), radius),
            Primitive::Octahedron { radius } => flat_hull(&octahedron_vertices(), radius),
        }
    }

    pub fn transformed(&self, m: &Mat4) -> Self {
        let normal_m = Mat3::from_mat4(*m).inverse().transpose();
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| m.transform_point3(Vec3::from(*p)).to_array())
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| (normal_m * Vec3::from(*n)).normalize_or_zero().to_array())
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds as `(min, max)`; `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.positions.iter().map(|p| Vec3::from(*p));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

fn plane(width: f32, height: f32, ws: u32, hs: u32, vault: Option<f32>) -> MeshData {
    let ws = ws.max(1);
    let hs = hs.max(1);
    let hw = width / 2.0;
    let hh = height / 2.0;
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let y = hh - iy as f32 * height / hs as f32;
        for ix in 0..=ws {
            let x = ix as f32 * width / ws as f32 - hw;
            match vault {
                // Negated: the ceiling's +Z faces down into the room, so the
                // edges must move toward +Z to drop below the crown.
                Some(k) => {
                    let z = -vault_displacement(x, y, hw, hh, k);
                    let dzdx = 2.0 * k * x / (hw * hw);
                    let dzdy = 2.0 * k * y / (hh * hh);
                    let n = Vec3::new(-dzdx, -dzdy, 1.0).normalize();
                    mesh.push(Vec3::new(x, y, z), n);
                }
                None => {
                    mesh.push(Vec3::new(x, y, 0.0), Vec3::Z);
                }
            }
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) / 2.0;
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let centre = n * half;
        let hu = u * half;
        let hv = v * half;
        let i0 = mesh.push(centre - hu - hv, n);
        let i1 = mesh.push(centre + hu - hv, n);
        let i2 = mesh.push(centre + hu + hv, n);
        let i3 = mesh.push(centre - hu + hv, n);
        mesh.indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
    }
    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut mesh = MeshData::default();

    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.push(
                Vec3::new(r * s, y, r * c),
                Vec3::new(s, slope, c).normalize(),
            );
        }
    }
    let row = segments + 1;
    for x in 0..segments {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    for (y, r, n) in [(half, radius_top, Vec3::Y), (-half, radius_bottom, Vec3::NEG_Y)] {
        if r <= 0.0 {
            continue;
        }
        let centre = mesh.push(Vec3::new(0.0, y, 0.0), n);
        let first = centre + 1;
        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.push(Vec3::new(r * s, y, r * c), n);
        }
        for x in 0..segments {
            let (a, b) = (first + x, first + x + 1);
            if n.y > 0.0 {
                mesh.indices.extend_from_slice(&[centre, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[centre, b, a]);
            }
        }
    }
    mesh
}

fn torus(radius: f32, tube: f32, radial: u32, tubular: u32, arc: f32) -> MeshData {
    let radial = radial.max(3);
    let tubular = tubular.max(3);
    let mut mesh = MeshData::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * arc;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push(p, (p - centre).normalize_or_zero());
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

fn sphere(radius: f32, ws: u32, hs: u32) -> MeshData {
    let ws = ws.max(3);
    let hs = hs.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let n = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.push(n * radius, n);
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = row * iy + ix + 1;
            let b = row * iy + ix;
            let c = row * (iy + 1) + ix;
            let d = row * (iy + 1) + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

const PHI: f32 = 1.618_034;

fn icosahedron_vertices() -> Vec<Vec3> {
    let mut v = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-PHI, PHI] {
            v.push(Vec3::new(0.0, a, b));
            v.push(Vec3::new(a, b, 0.0));
            v.push(Vec3::new(b, 0.0, a));
        }
    }
    v
}

fn octahedron_vertices() -> Vec<Vec3> {
    vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
}

/// Triangular faces of a regular polyhedron centred on the origin: every
/// triple of mutually adjacent vertices (shortest edge length), wound
/// outward.
fn hull_triangles(verts: &[Vec3]) -> Vec<[usize; 3]> {
    let mut min_sq = f32::MAX;
    for i in 0..verts.len() {
        for j in i + 1..verts.len() {
            min_sq = min_sq.min(verts[i].distance_squared(verts[j]));
        }
    }
    let adjacent = |i: usize, j: usize| verts[i].distance_squared(verts[j]) < min_sq * 1.01;
    let mut faces = Vec::new();
    for i in 0..verts.len() {
        for j in i + 1..verts.len() {
            if !adjacent(i, j) {
                continue;
            }
            for k in j + 1..verts.len() {
                if adjacent(i, k) && adjacent(j, k) {
                    faces.push(outward([i, j, k], verts));
                }
            }
        }
    }
    faces
}

fn outward(tri: [usize; 3], verts: &[Vec3]) -> [usize; 3] {
    let [a, b, c] = tri.map(|i| verts[i]);
    if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    }
}

fn push_flat_triangle(mesh: &mut MeshData, a: Vec3, b: Vec3, c: Vec3) {
    let n = (b - a).cross(c - a).normalize_or_zero();
    let i = mesh.push(a, n);
    mesh.push(b, n);
    mesh.push(c, n);
    mesh.indices.extend_from_slice(&[i, i + 1, i + 2]);
}

fn flat_hull(verts: &[Vec3], radius: f32) -> MeshData {
    let scaled: Vec<Vec3> = verts.iter().map(|v| v.normalize() * radius).collect();
    let mut mesh = MeshData::default();
    for [a, b, c] in hull_triangles(&scaled) {
        push_flat_triangle(&mut mesh, scaled[a], scaled[b], scaled[c]);
    }
    mesh
}

/// Dual of the icosahedron: one pentagon per icosahedron vertex, built from
/// the centroids of the five faces around it.
fn dodecahedron(radius: f32) -> MeshData {
    let ico: Vec<Vec3> = icosahedron_vertices().iter().map(|v| v.normalize()).collect();
    let faces = hull_triangles(&ico);
    let centroids: Vec<Vec3> = faces
        .iter()
        .map(|f| ((ico[f[0]] + ico[f[1]] + ico[f[2]]) / 3.0).normalize() * radius)
        .collect();

    let mut mesh = MeshData::default();
    for (vi, &axis) in ico.iter().enumerate() {
        let u = axis.any_orthonormal_vector();
        let w = axis.cross(u);
        let mut ring: Vec<Vec3> = faces
            .iter()
            .zip(&centroids)
            .filter(|(f, _)| f.contains(&vi))
            .map(|(_, c)| *c)
            .collect();
        ring.sort_by(|a, b| {
            let ta = a.dot(w).atan2(a.dot(u));
            let tb = b.dot(w).atan2(b.dot(u));
            ta.total_cmp(&tb)
        });
        for k in 1..ring.len().saturating_sub(1) {
            let (a, b, c) = (ring[0], ring[k], ring[k + 1]);
            if (b - a).cross(c - a).dot(axis) < 0.0 {
                push_flat_triangle(&mut mesh, a, c, b);
            } else {
                push_flat_triangle(&mut mesh, a, b, c);
            }
        }
    }
    mesh
}

/// Interleaved vertex consumed by the scene shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    /// roughness, metalness
    pub material: [f32; 2],
}

/// One vertex/index buffer pair holding many meshes.
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
}

impl SceneGeometry {
    /// Append `mesh` with `material`; returns its index range.
    pub fn append(&mut self, mesh: &MeshData, material: MaterialKind) -> Range<u32> {
        let m = material.material();
        let color = srgb_hex_to_linear(m.color_hex);
        let base = self.vertices.len() as u32;
        let start = self.indices.len() as u32;
        self.vertices.extend(
            mesh.positions
                .iter()
                .zip(&mesh.normals)
                .map(|(p, n)| SceneVertex {
                    position: *p,
                    normal: *n,
                    color,
                    material: [m.roughness, m.metalness],
                }),
        );
        self.indices.extend(mesh.indices.iter().map(|i| i + base));
        start..self.indices.len() as u32
    }

    /// Bake a surface in world space.
    pub fn append_surface(&mut self, surface: &Surface) -> Range<u32> {
        let mesh =
            MeshData::from_primitive(&surface.primitive).transformed(&surface.transform.matrix());
        self.append(&mesh, surface.material)
    }
}
