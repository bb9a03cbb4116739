// Host-side checks that the bundled WGSL exposes what the renderer binds.

use gallery_core::*;

fn has_fn(src: &str, name: &str) -> bool {
    src.contains(&format!("fn {name}("))
}

#[test]
fn scene_shader_has_mesh_and_particle_entry_points() {
    for entry in ["vs_mesh", "fs_mesh", "vs_particle", "fs_particle"] {
        assert!(has_fn(SCENE_WGSL, entry), "missing {entry}");
    }
}

#[test]
fn post_shader_has_composite_chain_entry_points() {
    for entry in ["vs_fullscreen", "fs_bright", "fs_blur", "fs_composite"] {
        assert!(has_fn(POST_WGSL, entry), "missing {entry}");
    }
}

#[test]
fn scene_vertex_attributes_fit_the_shader_inputs() {
    // position, normal, colour (vec3 each) + roughness/metalness (vec2)
    assert_eq!(std::mem::size_of::<SceneVertex>(), (3 + 3 + 3 + 2) * 4);
    for loc in 0..8 {
        assert!(
            SCENE_WGSL.contains(&format!("@location({loc})")),
            "missing vertex location {loc}"
        );
    }
}
