use crate::constants::{HIDDEN_CLASS, LOADING_SELECTOR};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn loading_element(document: &web::Document) -> Option<web::Element> {
    document.query_selector(LOADING_SELECTOR).ok().flatten()
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = loading_element(document) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
    }
}

fn hide_later(window: &web::Window, delay_ms: i32) {
    let cb = Closure::once(move || {
        if let Some(doc) = dom::window_document() {
            hide(&doc);
            log::info!("[overlay] loading screen hidden");
        }
    });
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay_ms)
    {
        log::error!("failed to schedule overlay hide: {:?}", e);
    }
    cb.forget();
}

/// Hide the loading overlay `delay_ms` after the window `load` event. If the
/// page already finished loading the delay starts now.
pub fn hide_after_load(window: &web::Window, delay_ms: i32) {
    let loaded = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if loaded {
        hide_later(window, delay_ms);
        return;
    }
    let w = window.clone();
    let mut fired = false;
    dom::add_window_listener(window, "load", move || {
        if !fired {
            fired = true;
            hide_later(&w, delay_ms);
        }
    });
}
