#![cfg(target_arch = "wasm32")]
//! Adaptive cursor sparkle trail for the portfolio site.
//!
//! On mouse movement, short-lived decorative elements are spawned near the
//! cursor, throttled and sized by an estimated device performance tier and
//! self-tuned against the measured frame rate. Nothing in here may fail the
//! host page: every error path degrades or disables the effect silently.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod core;
mod device;
mod dom;
mod events;
mod frame;

use crate::core::{classify, SparkleEmitter, Tier};

pub(crate) type SharedEmitter = Rc<RefCell<SparkleEmitter>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sparkle-trail starting");

    let Some(document) = dom::window_document() else {
        log::info!("sparkle effects disabled: no window/document");
        return Ok(());
    };
    if document.body().is_none() {
        // Module was instantiated before the DOM finished parsing.
        let closure = Closure::wrap(Box::new(run_init) as Box<dyn FnMut()>);
        _ = document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        run_init();
    }
    Ok(())
}

fn run_init() {
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if !dom::environment_supported(&document) {
        log::info!("sparkle effects disabled: required browser features missing");
        return Ok(());
    }

    dom::ensure_styles(&document)
        .map_err(|e| anyhow::anyhow!("style injection failed: {:?}", e))?;

    let tier = match device::read_profile(&window) {
        Some(profile) => {
            let classification = classify(&profile);
            log::info!(
                "[tier] {:?} (score: {})",
                classification.tier,
                classification.score
            );
            classification.tier
        }
        None => {
            log::info!("[tier] signal read failed, using Low fallback");
            Tier::Low
        }
    };

    let seed = js_sys::Date::now() as u64;
    let emitter: SharedEmitter = Rc::new(RefCell::new(SparkleEmitter::new(tier, seed)));
    {
        let p = emitter.borrow().params();
        log::info!(
            "[tier] settings: interval={}ms max={}",
            p.interval_ms,
            p.max_sparkles
        );
    }

    events::pointer::wire_mousemove(&document, emitter.clone());
    events::visibility::wire_visibilitychange(&document, emitter.clone());
    frame::start_monitor_loop(emitter.clone());
    device::probe_battery(&window, emitter);
    Ok(())
}
