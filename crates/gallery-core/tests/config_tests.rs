// Host-side tests for configuration presets and constants.

use gallery_core::*;

#[test]
fn version_parses_from_query_values() {
    assert_eq!("1".parse::<SceneVersion>(), Ok(SceneVersion::Classic));
    assert_eq!(" Classic ".parse::<SceneVersion>(), Ok(SceneVersion::Classic));
    assert_eq!("v2".parse::<SceneVersion>(), Ok(SceneVersion::Elaborate));
    assert_eq!("elaborate".parse::<SceneVersion>(), Ok(SceneVersion::Elaborate));
    assert_eq!(
        "3".parse::<SceneVersion>(),
        Err(ConfigError::UnknownVersion("3".to_string()))
    );
}

#[test]
fn version_reads_from_location_search() {
    assert_eq!(SceneVersion::from_query("", "version"), Ok(None));
    assert_eq!(SceneVersion::from_query("?", "version"), Ok(None));
    assert_eq!(
        SceneVersion::from_query("?version=classic", "version"),
        Ok(Some(SceneVersion::Classic))
    );
    assert_eq!(
        SceneVersion::from_query("?debug&version=2&version=1", "version"),
        Ok(Some(SceneVersion::Elaborate))
    );
    assert_eq!(SceneVersion::from_query("?version=", "version"), Ok(None));
    assert_eq!(SceneVersion::from_query("?versions=1", "version"), Ok(None));
    assert!(SceneVersion::from_query("?version=9", "version").is_err());
}

#[test]
fn presets_differ_where_versions_differ() {
    let classic = GalleryConfig::classic();
    let elaborate = GalleryConfig::elaborate();
    assert_eq!(classic.camera_style, CameraPathStyle::Linear);
    assert_eq!(elaborate.camera_style, CameraPathStyle::Eased);
    assert_eq!(classic.vault, None);
    assert!(elaborate.vault.is_some());
    assert_eq!(classic.particles.count, 800);
    assert_eq!(elaborate.particles.count, 1200);
    assert!(!classic.post.bloom_enabled());
    assert!(elaborate.post.bloom_enabled());
    assert_eq!(classic.layout, elaborate.layout);
    assert_eq!(GalleryConfig::default(), elaborate);
    assert_eq!(GalleryConfig::for_version(SceneVersion::Classic), classic);
}

#[test]
fn composite_constants_match_post_settings() {
    let post = PostSettings::bloom_vignette();
    assert_eq!(post.bloom_strength, 0.4);
    assert_eq!(post.bloom_radius, 0.6);
    assert_eq!(post.bloom_threshold, 0.85);
    assert_eq!(post.vignette_offset, 0.9);
    assert_eq!(post.vignette_darkness, 1.2);
    let direct = PostSettings::direct();
    assert_eq!(direct.bloom_strength, 0.0);
    assert_eq!(direct.vignette_darkness, 0.0);
    assert_eq!(direct.exposure, post.exposure);
}

#[test]
fn presets_validate() {
    assert_eq!(GalleryConfig::classic().validate(), Ok(()));
    assert_eq!(GalleryConfig::elaborate().validate(), Ok(()));
}

#[test]
fn degenerate_configs_are_rejected() {
    let mut cfg = GalleryConfig::classic();
    cfg.layout.room_count = 0;
    assert_eq!(cfg.validate(), Err(ConfigError::NoRooms));

    let mut cfg = GalleryConfig::classic();
    cfg.layout.step = -5.0;
    assert_eq!(cfg.validate(), Err(ConfigError::NonPositiveStep(-5.0)));

    let mut cfg = GalleryConfig::classic();
    cfg.layout.step = f32::NAN;
    assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveStep(_))));

    let mut cfg = GalleryConfig::classic();
    cfg.layout.room_height = 0.0;
    assert_eq!(cfg.validate(), Err(ConfigError::DegenerateRoom));

    let mut cfg = GalleryConfig::elaborate();
    cfg.particles.half_width = 0.0;
    assert_eq!(cfg.validate(), Err(ConfigError::EmptyParticleBox));

    let mut cfg = GalleryConfig::elaborate();
    cfg.particles.velocity_y = -0.1;
    assert_eq!(cfg.validate(), Err(ConfigError::NegativeVelocityRange));

    let mut cfg = GalleryConfig::elaborate();
    cfg.particles.depth_span = 0.0;
    assert_eq!(cfg.validate(), Err(ConfigError::EmptyParticleBox));

    let mut cfg = GalleryConfig::classic();
    cfg.particles.depth_start = f32::INFINITY;
    assert_eq!(cfg.validate(), Err(ConfigError::EmptyParticleBox));

    let mut cfg = GalleryConfig::classic();
    cfg.particles.height = f32::NAN;
    assert_eq!(cfg.validate(), Err(ConfigError::EmptyParticleBox));

    let mut cfg = GalleryConfig::elaborate();
    cfg.particles.velocity_xz = f32::INFINITY;
    assert_eq!(cfg.validate(), Err(ConfigError::NegativeVelocityRange));
}

#[test]
fn validated_configs_build_a_world() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut cfg = GalleryConfig::elaborate();
    cfg.particles.depth_span = 0.0;
    assert!(cfg.validate().is_err());

    let cfg = GalleryConfig::elaborate();
    assert!(cfg.validate().is_ok());
    let world = World::new(&cfg, 16.0 / 9.0, &mut StdRng::seed_from_u64(3));
    assert_eq!(world.particles.len(), cfg.particles.count);
}

#[test]
fn errors_render_readable_messages() {
    assert_eq!(
        ConfigError::NonPositiveStep(0.0).to_string(),
        "room step must be positive, got 0"
    );
    assert_eq!(
        ConfigError::UnknownVersion("x".into()).to_string(),
        "unknown scene version: \"x\""
    );
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(FRAME_TIME_STEP > 0.0);
    assert!(SCROLL_SCRUB_SEC > 0.0);
    assert!(FOG_DENSITY > 0.0 && FOG_DENSITY < 1.0);
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_END_DEPTH < CAMERA_START_DEPTH);
    assert!(PARTICLE_OPACITY > 0.0 && PARTICLE_OPACITY <= 1.0);
    // Doorway fits inside a room with the arch below the ceiling
    assert!(DOORWAY_WIDTH < ROOM_WIDTH);
    assert!(DOORWAY_HEIGHT < ROOM_HEIGHT);
    assert!(PILLAR_LATERAL < ROOM_WIDTH / 2.0);
}
