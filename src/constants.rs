//! DOM-facing identifiers for the sparkle effect.
//!
//! Emission tuning constants live next to the pure logic in `core`; these
//! are the names the stylesheet, the spawner and the cleanup sweeps share.

/// Class applied to every sparkle element. The injected stylesheet, the
/// eviction sweep and the page-hidden purge all key off it.
pub const SPARKLE_CLASS: &str = "sparkle-trail";

/// Id of the injected `<style>` block; guards against double injection.
pub const STYLE_ELEMENT_ID: &str = "sparkle-trail-styles";
