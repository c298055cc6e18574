//! Navigator signal reads feeding the performance classifier, plus the
//! asynchronous battery probe.
//!
//! `deviceMemory`, `connection.effectiveType` and `getBattery` are
//! experimental APIs, so they are read through `Reflect` and fall back to
//! defaults instead of failing the build or throwing.

use crate::core::{is_legacy_device, is_mobile_user_agent, DeviceProfile, NetworkKind};
use crate::SharedEmitter;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Snapshot the device signals. `None` means even the baseline reads failed
/// and the caller should fall back to the Low tier.
pub fn read_profile(window: &web::Window) -> Option<DeviceProfile> {
    let navigator = window.navigator();

    let cores = navigator.hardware_concurrency();
    let logical_cores = if cores.is_finite() && cores >= 1.0 {
        cores as u32
    } else {
        2
    };
    let memory_gb = reflect_f64(navigator.as_ref(), "deviceMemory").unwrap_or(2.0);
    let user_agent = navigator.user_agent().ok()?;

    let network = reflect_get(navigator.as_ref(), "connection")
        .and_then(|conn| reflect_get(&conn, "effectiveType"))
        .and_then(|v| v.as_string())
        .and_then(|s| NetworkKind::from_effective_type(&s));

    let is_mobile = is_mobile_user_agent(&user_agent);
    let is_legacy = is_legacy_device(&user_agent, is_mobile, logical_cores, memory_gb);

    Some(DeviceProfile {
        logical_cores,
        memory_gb,
        network,
        is_mobile,
        is_legacy,
    })
}

/// Kick off the battery probe. The reading arrives after classification and
/// wins over it (then acts as a ceiling for later retunes); every failure
/// path keeps the prior tier.
pub fn probe_battery(window: &web::Window, emitter: SharedEmitter) {
    let navigator = window.navigator();
    let get_battery = match reflect_get(navigator.as_ref(), "getBattery") {
        Some(f) if f.is_function() => js_sys::Function::from(f),
        _ => return, // API absent
    };
    let promise: js_sys::Promise = match get_battery.call0(navigator.as_ref()) {
        Ok(p) => p.unchecked_into(),
        Err(err) => {
            log::warn!("[tier] battery API access failed: {:?}", err);
            return;
        }
    };
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(battery) => {
                if let Some(level) = reflect_f64(&battery, "level") {
                    if emitter.borrow_mut().apply_battery_level(level) {
                        let p = emitter.borrow().params();
                        log::info!(
                            "[tier] battery saver: interval={}ms max={}",
                            p.interval_ms,
                            p.max_sparkles
                        );
                    }
                }
            }
            Err(err) => log::warn!("[tier] battery probe failed: {:?}", err),
        }
    });
}

fn reflect_get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn reflect_f64(target: &JsValue, key: &str) -> Option<f64> {
    reflect_get(target, key).and_then(|v| v.as_f64())
}
