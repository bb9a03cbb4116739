// Host-side tests for exhibits, the world aggregate and the frame driver.

use gallery_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn world(config: &GalleryConfig) -> World {
    World::new(config, 16.0 / 9.0, &mut StdRng::seed_from_u64(1))
}

#[derive(Default)]
struct CountingSink {
    frames: usize,
    last_time: f32,
}

impl FrameSink for CountingSink {
    type Error = String;

    fn frame_ready(&mut self, world: &World) -> Result<(), String> {
        self.frames += 1;
        self.last_time = world.time();
        Ok(())
    }
}

#[test]
fn registry_holds_five_distinct_placements() {
    let reg = ExhibitRegistry::gallery();
    assert_eq!(reg.len(), 5);
    let zs: Vec<f32> = reg.iter().map(|e| e.transform.position.z).collect();
    assert_eq!(zs, vec![0.0, -45.0, -95.0, -145.0, -195.0]);
    assert!(reg.iter().all(|e| e.base_rotation_speed == 0.003));
}

#[test]
fn thousand_ticks_rotate_exhibits_by_three_radians() {
    let mut w = world(&GalleryConfig::classic());
    let mut driver = FrameDriver::new();
    let mut sink = CountingSink::default();
    for _ in 0..1000 {
        driver.tick(&mut w, 0.01, &mut sink).unwrap();
    }
    assert!((w.time() - 10.0).abs() < 1e-3, "time={}", w.time());
    assert_eq!(sink.frames, 1000);
    assert_eq!(driver.frames(), 1000);
    assert_eq!(sink.last_time, w.time());

    let e = w.exhibits.get(2).unwrap();
    assert!((e.transform.rotation.y - 3.0).abs() < 1e-3, "rot.y={}", e.transform.rotation.y);
    let expected_x = (w.time() + 2.0).sin() * 0.1;
    assert!((e.transform.rotation.x - expected_x).abs() < 1e-5);
}

#[test]
fn exhibit_update_uses_explicit_index_phase() {
    let mut a = Exhibit::new(
        Primitive::Icosahedron { radius: 1.0 },
        MaterialKind::Gold,
        glam::Vec3::new(0.0, 5.0, 0.0),
    );
    let mut b = a.clone();
    a.update(1.0, 0);
    b.update(1.0, 3);
    assert!((a.transform.rotation.x - 1.0f32.sin() * 0.1).abs() < 1e-6);
    assert!((b.transform.rotation.x - 4.0f32.sin() * 0.1).abs() < 1e-6);
    let bob_a = (0.5f32).sin() * 0.002;
    let bob_b = (0.5f32 + 6.0).sin() * 0.002;
    assert!((a.transform.position.y - (5.0 + bob_a)).abs() < 1e-6);
    assert!((b.transform.position.y - (5.0 + bob_b)).abs() < 1e-6);
}

#[test]
fn exhibit_height_drifts_but_stays_near_placement() {
    let mut w = world(&GalleryConfig::elaborate());
    let before: Vec<f32> = w.exhibits.iter().map(|e| e.transform.position.y).collect();
    let mut driver = FrameDriver::new();
    for _ in 0..5000 {
        driver.tick(&mut w, FRAME_TIME_STEP, &mut ()).unwrap();
    }
    for (e, y0) in w.exhibits.iter().zip(before) {
        assert!((e.transform.position.y - y0).abs() < 1.0);
    }
}

#[test]
fn tick_advances_particles_within_bounds() {
    let mut w = world(&GalleryConfig::elaborate());
    let before = w.particles.positions().to_vec();
    let mut driver = FrameDriver::new();
    driver.tick(&mut w, FRAME_TIME_STEP, &mut ()).unwrap();
    assert_ne!(before, w.particles.positions());
    assert_eq!(w.particles.len(), 1200);
}

#[test]
fn sink_errors_propagate() {
    struct Failing;
    impl FrameSink for Failing {
        type Error = &'static str;
        fn frame_ready(&mut self, _world: &World) -> Result<(), &'static str> {
            Err("surface lost")
        }
    }
    let mut w = world(&GalleryConfig::classic());
    let mut driver = FrameDriver::new();
    assert_eq!(driver.tick(&mut w, 0.01, &mut Failing), Err("surface lost"));
    // State still advanced before the signal
    assert!(w.time() > 0.0);
}

#[test]
fn world_builds_static_scene_and_starts_at_path_origin() {
    let w = world(&GalleryConfig::classic());
    assert_eq!(w.surfaces.len(), 92);
    assert_eq!(w.layout.rooms.len(), 5);
    assert!((w.camera.eye.z - 30.0).abs() < 1e-5);
    assert!((w.camera.eye.y - 4.0).abs() < 1e-5);
    assert_eq!(w.time(), 0.0);
}

#[test]
fn scroll_moves_only_the_camera() {
    let mut w = world(&GalleryConfig::elaborate());
    let particles = w.particles.positions().to_vec();
    let pose = w.scroll_to(1.0);
    assert!((pose.eye.z + 200.0).abs() < 1e-3);
    assert_eq!(w.camera.eye, pose.eye);
    assert_eq!(w.camera.target, pose.target);
    assert_eq!(w.particles.positions(), &particles[..]);
    assert_eq!(w.time(), 0.0);
}

#[test]
fn independent_worlds_do_not_share_state() {
    let mut a = world(&GalleryConfig::classic());
    let b = world(&GalleryConfig::classic());
    FrameDriver::new().tick(&mut a, 0.01, &mut ()).unwrap();
    assert_eq!(b.time(), 0.0);
    assert_ne!(
        a.exhibits.get(0).unwrap().transform,
        b.exhibits.get(0).unwrap().transform
    );
}

#[test]
fn baked_geometry_covers_statics_and_exhibits() {
    let w = world(&GalleryConfig::elaborate());
    let (geometry, statics, exhibits) = w.bake_geometry();
    assert_eq!(statics.start, 0);
    assert_eq!(exhibits.len(), 5);
    assert_eq!(exhibits[0].start, statics.end);
    for pair in exhibits.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(exhibits[4].end as usize, geometry.indices.len());
    for (range, exhibit) in exhibits.iter().zip(w.exhibits.iter()) {
        let mesh = MeshData::from_primitive(&exhibit.shape);
        assert_eq!((range.end - range.start) as usize, mesh.indices.len());
    }
    assert!(geometry
        .indices
        .iter()
        .all(|&i| (i as usize) < geometry.vertices.len()));
}
