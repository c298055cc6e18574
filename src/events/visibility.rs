//! Page-visibility guard: stop paying animation cost while the tab is
//! hidden. Spawning resumes naturally on the next qualifying mouse move.

use crate::{dom, SharedEmitter};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_visibilitychange(document: &web::Document, emitter: SharedEmitter) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if doc.hidden() {
            dom::remove_all_sparkles(&doc);
            let purged = emitter.borrow_mut().purge();
            if purged > 0 {
                log::info!("[sparkle] purged {purged} sparkles on page hide");
            }
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
