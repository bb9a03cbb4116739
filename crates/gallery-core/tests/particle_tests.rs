// Host-side tests for the dust particle field.

use gallery_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_in_bounds(field: &ParticleField) {
    for i in 0..field.len() {
        let [x, y, _] = field.position(i);
        assert!((-15.0..=15.0).contains(&x), "particle {i} x={x}");
        assert!((0.0..=14.0).contains(&y), "particle {i} y={y}");
    }
}

#[test]
fn spawn_fills_the_box() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = ParticleParams::classic();
    let field = ParticleField::spawn(&params, &mut rng);
    assert_eq!(field.len(), 800);
    assert_eq!(field.positions().len(), 2400);
    assert_in_bounds(&field);
    for i in 0..field.len() {
        let z = field.position(i)[2];
        assert!(z <= 30.0 && z > -220.0, "z={z}");
    }
    for v in field.velocities().chunks_exact(3) {
        assert!(v[0].abs() <= 0.005 && v[2].abs() <= 0.005);
        assert!(v[1].abs() <= 0.0025);
    }
}

#[test]
fn long_run_keeps_bounds_and_z_follows_velocity_sign() {
    let mut rng = StdRng::seed_from_u64(42);
    let params = ParticleParams::elaborate();
    let mut field = ParticleField::spawn(&params, &mut rng);
    assert_eq!(field.len(), 1200);
    for v in field.velocities().chunks_exact(3) {
        assert!(v[0].abs() <= 0.008 && v[2].abs() <= 0.008);
        assert!(v[1].abs() <= 0.004);
    }

    let start_z: Vec<f32> = (0..field.len()).map(|i| field.position(i)[2]).collect();
    let mut prev_z = start_z.clone();
    for step in 0..10_000 {
        field.advance(FRAME_TIME_STEP);
        if step % 500 == 0 {
            assert_in_bounds(&field);
        }
        for i in 0..field.len() {
            let z = field.position(i)[2];
            let vz = field.velocities()[i * 3 + 2];
            if vz > 0.0 {
                assert!(z >= prev_z[i]);
            } else if vz < 0.0 {
                assert!(z <= prev_z[i]);
            }
            prev_z[i] = z;
        }
    }
    assert_in_bounds(&field);

    // z is never wrapped: total drift matches velocity * steps
    for i in 0..field.len() {
        let vz = field.velocities()[i * 3 + 2];
        let drift = field.position(i)[2] - start_z[i];
        assert!((drift - vz * 10_000.0).abs() < 0.2, "particle {i} drift={drift}");
    }
}

#[test]
fn wraparound_resets_to_opposite_edge() {
    let mut field = ParticleField::from_buffers(
        vec![14.99, 13.99, 0.0, -14.99, 0.01, 0.0],
        vec![0.02, 0.02, 0.0, -0.02, -0.02, 0.0],
        15.0,
        14.0,
    );
    field.advance(FRAME_TIME_STEP);
    assert_eq!(field.position(0), [-15.0, 0.0, 0.0]);
    assert_eq!(field.position(1), [15.0, 14.0, 0.0]);
}

#[test]
fn advance_scales_with_dt() {
    let mut field =
        ParticleField::from_buffers(vec![0.0, 5.0, 0.0], vec![0.001, 0.0, -0.002], 15.0, 14.0);
    field.advance(FRAME_TIME_STEP * 2.0);
    let [x, _, z] = field.position(0);
    assert!((x - 0.002).abs() < 1e-7);
    assert!((z + 0.004).abs() < 1e-7);
}

#[test]
fn same_seed_same_field() {
    let params = ParticleParams::classic();
    let a = ParticleField::spawn(&params, &mut StdRng::seed_from_u64(3));
    let b = ParticleField::spawn(&params, &mut StdRng::seed_from_u64(3));
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());
}
