// Host-side tests for the web frontend constants.
// The crate itself is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert_eq!(LOADING_HIDE_DELAY_MS, 2200);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(PROGRESS_BAR_EPSILON > 0.0 && PROGRESS_BAR_EPSILON < 0.01);
    assert!(STATS_INTERVAL_FRAMES > 0);
}

#[test]
fn scene_pass_is_multisampled_with_a_webgpu_sample_count() {
    // WebGPU only guarantees 1x and 4x render targets
    assert_eq!(SCENE_SAMPLE_COUNT, 4);
}

#[test]
fn dom_lookups_are_well_formed() {
    // ids are used with getElementById, the overlay with querySelector
    for id in [CANVAS_ID, PROGRESS_BAR_ID] {
        assert!(!id.is_empty());
        assert!(!id.starts_with('#') && !id.contains(' '));
    }
    assert!(LOADING_SELECTOR.starts_with('.'));
    assert!(!HIDDEN_CLASS.starts_with('.'));
    assert_eq!(VERSION_QUERY_KEY, "version");
}
