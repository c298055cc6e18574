//! Small `web-sys` helpers: stylesheet injection, sparkle element lifecycle
//! and the cleanup sweeps.

use crate::constants::{SPARKLE_CLASS, STYLE_ELEMENT_ID};
use crate::core::SparkleSpec;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

// Keyframes plus the reduced-motion / small-screen variant, injected once.
static SPARKLE_CSS: &str = include_str!("../assets/sparkle.css");

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// The effect needs somewhere to append sparkles and somewhere to put the
/// stylesheet; anything else degrades at call sites.
pub fn environment_supported(document: &web::Document) -> bool {
    document.body().is_some() && document.head().is_some()
}

/// Insert the sparkle stylesheet, at most once per page load.
pub fn ensure_styles(document: &web::Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(SPARKLE_CSS));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document head not available"))?;
    head.append_child(&style)?;
    Ok(())
}

/// Build and insert one sparkle element. The whole style is written in a
/// single attribute before the node is appended, so it never renders
/// unstyled.
pub fn insert_sparkle(
    document: &web::Document,
    spec: &SparkleSpec,
) -> Result<web::Element, JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document body not available"))?;
    let el = document.create_element("div")?;
    el.set_class_name(SPARKLE_CLASS);
    let style = format!(
        "left:{:.1}px;top:{:.1}px;width:{:.1}px;height:{:.1}px;animation-duration:{:.0}ms",
        spec.position.x, spec.position.y, spec.size_px, spec.size_px, spec.duration_ms
    );
    el.set_attribute("style", &style)?;
    body.append_child(&el)?;
    Ok(el)
}

/// Schedule the element's removal after its animation finishes. The timer is
/// best-effort: if the node was already swept by eviction or the visibility
/// guard, removal and `on_expired` both turn into no-ops.
pub fn schedule_removal(
    window: &web::Window,
    el: web::Element,
    after_ms: f64,
    on_expired: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::once_into_js(move || {
        if el.parent_node().is_some() {
            el.remove();
        }
        on_expired();
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        after_ms as i32,
    )?;
    Ok(())
}

/// Remove the `n` oldest sparkle elements. Sparkles are appended in spawn
/// order, so document order is oldest-first.
pub fn remove_oldest_sparkles(document: &web::Document, n: usize) {
    if n == 0 {
        return;
    }
    sweep_sparkles(document, Some(n));
}

/// Remove every sparkle element currently in the document.
pub fn remove_all_sparkles(document: &web::Document) {
    sweep_sparkles(document, None);
}

fn sweep_sparkles(document: &web::Document, limit: Option<usize>) {
    let selector = format!(".{SPARKLE_CLASS}");
    let list = match document.query_selector_all(&selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("[sparkle] cleanup query failed: {:?}", err);
            return;
        }
    };
    let count = match limit {
        Some(n) => n.min(list.length() as usize),
        None => list.length() as usize,
    };
    for i in 0..count {
        if let Some(node) = list.item(i as u32) {
            if let Some(el) = node.dyn_ref::<web::Element>() {
                el.remove();
            }
        }
    }
}
