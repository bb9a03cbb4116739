pub mod camera;
pub mod config;
pub mod constants;
pub mod exhibits;
pub mod geometry;
pub mod layout;
pub mod mesh;
pub mod particles;
pub mod world;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use exhibits::*;
pub use geometry::*;
pub use layout::*;
pub use mesh::*;
pub use particles::*;
pub use world::*;
