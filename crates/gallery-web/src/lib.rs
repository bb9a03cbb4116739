#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod frame;
mod overlay;
mod render;
mod scroll;

use constants::{CANVAS_ID, LOADING_HIDE_DELAY_MS, VERSION_QUERY_KEY};
use gallery_core::{GalleryConfig, SceneVersion, ScrollSmoother, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    if let Some(window) = web::window() {
        overlay::hide_after_load(&window, LOADING_HIDE_DELAY_MS);
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    wire_canvas_resize(&window, &canvas);

    let config = scene_config(&window);
    config.validate()?;
    log::info!("[scene] version={:?}", config.version);

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let mut rng = StdRng::from_entropy();
    let world = World::new(&config, aspect, &mut rng);
    log::info!(
        "[scene] surfaces={} exhibits={} particles={}",
        world.surfaces.len(),
        world.exhibits.len(),
        world.particles.len()
    );

    let smoother = Rc::new(RefCell::new(ScrollSmoother::default()));
    scroll::wire_scroll_progress(&window, smoother.clone());

    let gpu = frame::init_gpu(&canvas, &world, config.post).await;
    let ctx = frame::FrameContext::new(world, smoother, canvas, document, gpu);
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}

/// Scene preset from `?version=`; unknown values fall back to the default
/// with a warning.
fn scene_config(window: &web::Window) -> GalleryConfig {
    let search = dom::location_search(window);
    match SceneVersion::from_query(&search, VERSION_QUERY_KEY) {
        Ok(Some(version)) => GalleryConfig::for_version(version),
        Ok(None) => GalleryConfig::default(),
        Err(e) => {
            log::warn!("[scene] {e}; using default");
            GalleryConfig::default()
        }
    }
}

// Keep the canvas backing store at CSS size * min(devicePixelRatio, 2).
// The frame loop picks the new size up for the camera and surface.
fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    dom::add_window_listener(window, "resize", move || {
        dom::sync_canvas_backing_size(&canvas);
    });
}
