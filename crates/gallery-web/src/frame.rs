use crate::constants::{PROGRESS_BAR_EPSILON, STATS_INTERVAL_FRAMES};
use crate::dom;
use crate::render;
use gallery_core::{FrameDriver, PostSettings, ScrollSmoother, World, FRAME_TIME_STEP};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub world: World,
    pub driver: FrameDriver,
    pub scroll: Rc<RefCell<ScrollSmoother>>,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState>,

    pub last_instant: Instant,
    pub stats_instant: Instant,
    pub shown_progress: f32,
}

impl FrameContext {
    pub fn new(
        world: World,
        scroll: Rc<RefCell<ScrollSmoother>>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        gpu: Option<render::GpuState>,
    ) -> Self {
        let now = Instant::now();
        Self {
            world,
            driver: FrameDriver::new(),
            scroll,
            canvas,
            document,
            gpu,
            last_instant: now,
            stats_instant: now,
            shown_progress: -1.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // Camera follows the smoothed scroll; animation time advances a
        // fixed step per frame regardless of wall-clock dt.
        let progress = self.scroll.borrow_mut().step(dt_sec);
        self.world.scroll_to(progress);
        if (progress - self.shown_progress).abs() > PROGRESS_BAR_EPSILON {
            dom::set_progress_bar(&self.document, progress);
            self.shown_progress = progress;
        }

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.world.camera.set_viewport(w, h);

        match &mut self.gpu {
            Some(g) => {
                g.resize_if_needed(w, h);
                match self.driver.tick(&mut self.world, FRAME_TIME_STEP, g) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("[frame] surface lost, reconfiguring");
                        g.reconfigure();
                    }
                    Err(e) => log::error!("render error: {:?}", e),
                }
            }
            None => {
                _ = self.driver.tick(&mut self.world, FRAME_TIME_STEP, &mut ());
            }
        }

        let frames = self.driver.frames();
        if frames % STATS_INTERVAL_FRAMES == 0 {
            let elapsed = (now - self.stats_instant).as_secs_f32();
            self.stats_instant = now;
            if elapsed > 0.0 {
                log::debug!(
                    "[frame] frames={} fps={:.1} time={:.2} progress={:.3}",
                    frames,
                    STATS_INTERVAL_FRAMES as f32 / elapsed,
                    self.world.time(),
                    progress
                );
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    world: &World,
    settings: PostSettings,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, world, settings).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    let Some(cb) = tick.as_ref() else {
        return;
    };
    if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}
