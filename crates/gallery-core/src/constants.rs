// Shared scene/visual tuning constants used by the core and the web frontend.

// Palette (sRGB hex, converted to linear when packed for the GPU)
pub const BACKGROUND_HEX: u32 = 0xc4b5a0; // warm beige, also the fog colour
pub const FOG_DENSITY: f32 = 0.012; // exponential-squared fog

pub const FLOOR_HEX: u32 = 0xb8a890;
pub const WALL_HEX: u32 = 0xd4c8b8;
pub const CEILING_HEX: u32 = 0xe8dfd0;
pub const PILLAR_HEX: u32 = 0xddd2c2;
pub const GOLD_HEX: u32 = 0xd4af37;
pub const ACCENT_HEX: u32 = 0xf5e6c8;

// Lighting
pub const AMBIENT_HEX: u32 = 0xf5e6d3;
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const KEY_LIGHT_HEX: u32 = 0xfff8e8; // sun through skylights
pub const KEY_LIGHT_INTENSITY: f32 = 0.8;
pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 30.0, 20.0];
pub const FILL_LIGHT_HEX: u32 = 0xffe4c4; // warm fill from below
pub const FILL_LIGHT_INTENSITY: f32 = 0.3;
pub const FILL_LIGHT_POSITION: [f32; 3] = [-10.0, 5.0, -10.0];
pub const HEMI_SKY_HEX: u32 = 0xffeedd;
pub const HEMI_GROUND_HEX: u32 = 0xc4b5a0;
pub const HEMI_INTENSITY: f32 = 0.4;

// Layout
pub const ROOM_COUNT: usize = 5;
pub const ROOM_STEP: f32 = 50.0; // longitudinal distance between room starts
pub const LAYOUT_START: f32 = 30.0; // z of the first room's open end
pub const ROOM_WIDTH: f32 = 24.0;
pub const ROOM_HEIGHT: f32 = 14.0;
pub const DOORWAY_WIDTH: f32 = 7.0;
pub const DOORWAY_HEIGHT: f32 = 11.0;
pub const DOOR_FRAME_THICKNESS: f32 = 0.8;
pub const PILLAR_LATERAL: f32 = 9.0; // |x| of every pillar
pub const PILLAR_INSET: f32 = 15.0; // distance from a room start to its first pillar pair

// Vaulted ceilings (elaborate version)
pub const VAULT_DEPTH: f32 = 1.5; // k in -k * ((x/hw)^2 + (z/hl)^2)
pub const VAULT_SEGMENTS: u32 = 24;

// Exhibits
pub const EXHIBIT_ROTATION_SPEED: f32 = 0.003; // radians per tick around y
pub const EXHIBIT_SWAY_AMPLITUDE: f32 = 0.1; // x rotation amplitude
pub const EXHIBIT_BOB_AMPLITUDE: f32 = 0.002; // y displacement per tick

// Particles (dust motes)
pub const PARTICLE_HALF_WIDTH: f32 = 15.0;
pub const PARTICLE_HEIGHT: f32 = 14.0;
pub const PARTICLE_DEPTH_START: f32 = 30.0;
pub const PARTICLE_DEPTH_SPAN: f32 = 250.0; // spawned from +30 going negative
pub const PARTICLE_HEX: u32 = 0xfff8e0;
pub const PARTICLE_SIZE: f32 = 0.08;
pub const PARTICLE_OPACITY: f32 = 0.6;

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 500.0;
pub const CAMERA_START_DEPTH: f32 = 30.0;
pub const CAMERA_END_DEPTH: f32 = -200.0;
pub const CAMERA_START_HEIGHT: f32 = 4.0;
pub const CAMERA_END_HEIGHT: f32 = 5.0;
pub const CAMERA_LOOK_AHEAD: f32 = 10.0; // eased path looks this far down -z
pub const CAMERA_LOOK_HEIGHT: f32 = 5.0;
pub const SCROLL_SCRUB_SEC: f32 = 1.5; // scroll smoothing time constant

// Timing
pub const FRAME_TIME_STEP: f32 = 0.01; // time accumulator advance per frame

// Post-processing (elaborate version)
pub const BLOOM_STRENGTH: f32 = 0.4;
pub const BLOOM_RADIUS: f32 = 0.6;
pub const BLOOM_THRESHOLD: f32 = 0.85;
pub const VIGNETTE_OFFSET: f32 = 0.9;
pub const VIGNETTE_DARKNESS: f32 = 1.2;
pub const TONE_MAPPING_EXPOSURE: f32 = 1.1;

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}
