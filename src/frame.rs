//! Animation-frame monitor loop feeding the FPS sampler into the emitter's
//! retune step.

use crate::core::{FpsSampler, Retune};
use crate::SharedEmitter;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn start_monitor_loop(emitter: SharedEmitter) {
    let mut sampler = FpsSampler::new(js_sys::Date::now());
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(fps) = sampler.on_frame(js_sys::Date::now()) {
            match emitter.borrow_mut().retune(fps) {
                Some(Retune::Relaxed) => {
                    log::info!("[sparkle] low fps ({fps:.0}), relaxing emission")
                }
                Some(Retune::Tightened) => {
                    log::debug!("[sparkle] fps {fps:.0}, tightening emission")
                }
                None => {}
            }
        }
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
