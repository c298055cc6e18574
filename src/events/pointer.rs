//! Mouse-move wiring: the spawn path and its failure policy.
//!
//! A transient DOM failure skips the event and keeps the listener alive; a
//! critical type/reference error is a fuse that unregisters the listener for
//! the rest of the page's life.

use crate::core::{SpawnOutcome, SparkleSpec};
use crate::{dom, SharedEmitter};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type ListenerSlot = Rc<RefCell<Option<Closure<dyn FnMut(web::MouseEvent)>>>>;

pub fn wire_mousemove(document: &web::Document, emitter: SharedEmitter) {
    // The handler holds a reference to its own closure so the fuse can
    // unregister it; the resulting Rc cycle keeps the listener alive for the
    // page lifetime.
    let slot: ListenerSlot = Rc::new(RefCell::new(None));
    let slot_inner = slot.clone();
    let doc = document.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let now_ms = js_sys::Date::now();
        let cursor = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let outcome = emitter.borrow_mut().pointer_move(now_ms, cursor);
        match outcome {
            SpawnOutcome::Throttled => {}
            SpawnOutcome::Evicted(n) => dom::remove_oldest_sparkles(&doc, n),
            SpawnOutcome::Spawned(spec) => {
                if let Err(err) = spawn_into_dom(&doc, &emitter, &spec) {
                    // roll back so a failed insert does not leak a live slot
                    emitter.borrow_mut().expire(spec.id);
                    log::warn!("[sparkle] spawn failed: {:?}", err);
                    if is_critical(&err) {
                        log::warn!("[sparkle] critical error, unregistering mousemove listener");
                        unregister(&doc, &slot_inner);
                    }
                }
            }
        }
    }) as Box<dyn FnMut(_)>));

    if let Some(closure) = slot.borrow().as_ref() {
        _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
}

fn spawn_into_dom(
    document: &web::Document,
    emitter: &SharedEmitter,
    spec: &SparkleSpec,
) -> Result<(), JsValue> {
    let el = dom::insert_sparkle(document, spec)?;
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let emitter = emitter.clone();
    let id = spec.id;
    dom::schedule_removal(&window, el, spec.duration_ms, move || {
        emitter.borrow_mut().expire(id);
    })
}

/// Type and reference errors indicate a broken spawn path rather than a
/// transient DOM hiccup.
fn is_critical(err: &JsValue) -> bool {
    if err.is_instance_of::<js_sys::TypeError>() || err.is_instance_of::<js_sys::ReferenceError>()
    {
        return true;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        let name = String::from(e.name());
        return name == "TypeError" || name == "ReferenceError";
    }
    false
}

fn unregister(document: &web::Document, slot: &ListenerSlot) {
    if let Some(closure) = slot.borrow().as_ref() {
        _ = document
            .remove_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    // The closure itself is intentionally leaked: this runs inside its own
    // invocation, so it must not be dropped here.
}
