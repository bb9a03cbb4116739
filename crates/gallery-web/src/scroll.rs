use crate::dom;
use gallery_core::{progress_from_scroll, ScrollSmoother};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Raw page scroll progress in \[0, 1\].
pub fn read_progress(window: &web::Window, document: &web::Document) -> f32 {
    let offset = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    progress_from_scroll(offset, scroll_height, viewport)
}

/// Feed scroll position into `smoother` on every scroll or resize. The frame
/// loop reads the smoothed value back out.
pub fn wire_scroll_progress(window: &web::Window, smoother: Rc<RefCell<ScrollSmoother>>) {
    let Some(document) = window.document() else {
        log::warn!("[scroll] no document, scroll progress disabled");
        return;
    };
    let update = {
        let window = window.clone();
        move || {
            let p = read_progress(&window, &document);
            smoother.borrow_mut().set_target(p);
        }
    };
    update();
    let on_resize = update.clone();
    dom::add_window_listener(window, "scroll", update);
    dom::add_window_listener(window, "resize", on_resize);
}
