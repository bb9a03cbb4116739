// Host-side tests for primitive mesh generation and vertex packing.

use gallery_core::*;
use glam::Vec3;

fn mesh(p: Primitive) -> MeshData {
    MeshData::from_primitive(&p)
}

fn assert_on_sphere(m: &MeshData, radius: f32) {
    for p in &m.positions {
        let r = Vec3::from(*p).length();
        assert!((r - radius).abs() < 1e-4, "vertex at radius {r}, want {radius}");
    }
}

fn assert_faces_outward(m: &MeshData) {
    for tri in m.indices.chunks_exact(3) {
        let c = tri
            .iter()
            .map(|&i| Vec3::from(m.positions[i as usize]))
            .sum::<Vec3>()
            / 3.0;
        let n = Vec3::from(m.normals[tri[0] as usize]);
        assert!(n.dot(c) > 0.0, "face normal points inward");
    }
}

#[test]
fn polyhedra_have_expected_face_counts() {
    let ico = mesh(Primitive::Icosahedron { radius: 1.0 });
    assert_eq!(ico.triangle_count(), 20);
    assert_on_sphere(&ico, 1.0);
    assert_faces_outward(&ico);

    let octa = mesh(Primitive::Octahedron { radius: 1.3 });
    assert_eq!(octa.triangle_count(), 8);
    assert_on_sphere(&octa, 1.3);
    assert_faces_outward(&octa);

    // 12 pentagons, fan-triangulated
    let dodeca = mesh(Primitive::Dodecahedron { radius: 1.2 });
    assert_eq!(dodeca.triangle_count(), 36);
    assert_on_sphere(&dodeca, 1.2);
    assert_faces_outward(&dodeca);
}

#[test]
fn dodecahedron_pentagons_are_planar() {
    let dodeca = mesh(Primitive::Dodecahedron { radius: 1.0 });
    // Each pentagon emits three consecutive triangles sharing one normal
    for face in dodeca.normals.chunks_exact(9) {
        let n0 = Vec3::from(face[0]);
        for n in face {
            assert!((Vec3::from(*n) - n0).length() < 1e-4);
        }
    }
}

#[test]
fn box_has_six_quads() {
    let m = mesh(Primitive::Box {
        width: 0.8,
        height: 7.5,
        depth: 0.8,
    });
    assert_eq!(m.vertex_count(), 24);
    assert_eq!(m.triangle_count(), 12);
    let (lo, hi) = m.bounds().unwrap();
    assert!((lo - Vec3::new(-0.4, -3.75, -0.4)).length() < 1e-6);
    assert!((hi - Vec3::new(0.4, 3.75, 0.4)).length() < 1e-6);
    assert_faces_outward(&m);
}

#[test]
fn sphere_grid_skips_degenerate_pole_triangles() {
    let m = mesh(Primitive::Sphere {
        radius: 1.5,
        width_segments: 16,
        height_segments: 8,
    });
    assert_eq!(m.vertex_count(), 17 * 9);
    assert_eq!(m.triangle_count(), 16 * 8 * 2 - 2 * 16);
    assert_on_sphere(&m, 1.5);
}

#[test]
fn half_torus_stays_above_its_axis() {
    let m = mesh(Primitive::Torus {
        radius: 3.5,
        tube: 0.4,
        radial_segments: 8,
        tubular_segments: 16,
        arc: std::f32::consts::PI,
    });
    assert_eq!(m.vertex_count(), 9 * 17);
    assert_eq!(m.triangle_count(), 8 * 16 * 2);
    let (lo, hi) = m.bounds().unwrap();
    assert!(lo.y > -1e-5);
    assert!((hi.y - 3.9).abs() < 1e-4);
}

#[test]
fn cylinder_caps_close_the_frustum() {
    let m = mesh(Primitive::Cylinder {
        radius_top: 0.8,
        radius_bottom: 0.5,
        height: 0.5,
        radial_segments: 16,
    });
    // side rings + two caps (centre + ring)
    assert_eq!(m.vertex_count(), 2 * 17 + 2 * 18);
    assert_eq!(m.triangle_count(), 16 * 2 + 16 * 2);
    let (lo, hi) = m.bounds().unwrap();
    assert!((lo.y + 0.25).abs() < 1e-6 && (hi.y - 0.25).abs() < 1e-6);
    assert!((hi.x - 0.8).abs() < 1e-4);
}

#[test]
fn flat_plane_is_a_single_quad() {
    let m = mesh(Primitive::flat_plane(24.0, 50.0));
    assert_eq!(m.vertex_count(), 4);
    assert_eq!(m.triangle_count(), 2);
    assert!(m.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
}

#[test]
fn vaulted_plane_normals_tilt_toward_the_crown() {
    let m = mesh(Primitive::Plane {
        width: 24.0,
        height: 50.0,
        width_segments: 4,
        height_segments: 4,
        vault: Some(1.5),
    });
    for (p, n) in m.positions.iter().zip(&m.normals) {
        let n = Vec3::from(*n);
        assert!((n.length() - 1.0).abs() < 1e-5);
        // Surface rises toward +z at the edges; normals lean back to the middle
        if p[0] > 0.0 {
            assert!(n.x < 0.0);
        } else if p[0] < 0.0 {
            assert!(n.x > 0.0);
        }
    }
}

#[test]
fn transform_keeps_normals_unit_length() {
    let m = mesh(Primitive::Icosahedron { radius: 1.0 });
    let t = Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.3, 1.1, -0.4),
        scale: Vec3::new(2.0, 1.0, 0.5),
    };
    let moved = m.transformed(&t.matrix());
    assert_eq!(moved.indices, m.indices);
    for n in &moved.normals {
        assert!((Vec3::from(*n).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn scene_geometry_rebases_indices_and_packs_material() {
    let mut g = SceneGeometry::default();
    let quad = mesh(Primitive::flat_plane(1.0, 1.0));
    let first = g.append(&quad, MaterialKind::Floor);
    let second = g.append(&quad, MaterialKind::Gold);
    assert_eq!(first, 0..6);
    assert_eq!(second, 6..12);
    assert_eq!(&g.indices[6..], &[4, 6, 5, 6, 7, 5]);
    assert_eq!(g.vertices.len(), 8);

    let gold = MaterialKind::Gold.material();
    assert_eq!(g.vertices[4].material, [gold.roughness, gold.metalness]);
    assert_eq!(g.vertices[4].color, srgb_hex_to_linear(0xd4af37));
    assert_eq!(
        std::mem::size_of::<SceneVertex>(),
        11 * std::mem::size_of::<f32>()
    );
}

#[test]
fn srgb_conversion_hits_endpoints() {
    assert_eq!(srgb_hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
    let white = srgb_hex_to_linear(0xffffff);
    assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
    let mid = srgb_hex_to_linear(0x808080)[0];
    assert!((mid - 0.2158).abs() < 1e-3);
}
