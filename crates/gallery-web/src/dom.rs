use crate::constants::{MAX_PIXEL_RATIO, PROGRESS_BAR_ID};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach `handler` to a window event for the lifetime of the page.
pub fn add_window_listener(window: &web::Window, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Err(e) = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::error!("failed to listen for {event}: {:?}", e);
    }
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn set_progress_bar(document: &web::Document, progress: f32) {
    let Some(el) = document
        .get_element_by_id(PROGRESS_BAR_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    _ = el
        .style()
        .set_property("width", &format!("{:.3}%", progress * 100.0));
}

/// Raw `location.search`, empty when unavailable.
pub fn location_search(window: &web::Window) -> String {
    window.location().search().unwrap_or_default()
}
