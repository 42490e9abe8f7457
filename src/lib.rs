//! Zoro site core crate.
//!
//! Front-end behavior for the Roronoa Zoro fan site: toast notifications, the
//! gated link to the character page, the secret-code easter egg, keyboard
//! shortcuts and the decorative effects. Everything the browser sees goes
//! through the small `#[wasm_bindgen]` surface at the bottom of this file; the
//! modules underneath keep their decisions in plain Rust so they run under
//! `cargo test` on the host.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod effects;
pub mod error;
pub mod gate;
pub mod logging;
pub mod motion;
pub mod notify;
pub mod probe;
pub mod secret;
pub mod shortcuts;
pub mod site;

pub use config::{Messages, SiteConfig};
pub use error::{SiteError, SiteResult};
pub use gate::{BlockReason, GateCopy, GateError, GateState};
pub use notify::{NotificationCenter, Severity, Toast, ToastHost, ToastId, ToastPhase};
pub use probe::{HeadProbe, PageProbe, ProbeOutcome};
pub use secret::{ClickBurst, SecretCode};
pub use shortcuts::{KeyChord, Shortcut};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "autostart")]
    autostart();
}

#[cfg(feature = "autostart")]
fn autostart() {
    let Ok(document) = dom::document() else {
        return;
    };
    if document.body().is_some() {
        launch();
        return;
    }
    gloo_events::EventListener::once(&document, "DOMContentLoaded", |_| launch()).forget();
}

#[cfg(feature = "autostart")]
fn launch() {
    if let Err(err) = site::start(SiteConfig::default()) {
        web_sys::console::error_1(&JsValue::from(err));
    }
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Start with the built-in configuration. A second call while running is a no-op.
#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    site::start(SiteConfig::default()).map_err(JsValue::from)
}

/// Start with a JSON configuration; absent fields keep their defaults.
#[wasm_bindgen]
pub fn start_site_with_config(json: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_json(json)?;
    site::start(config).map_err(JsValue::from)
}

/// Tear everything down. Returns `false` when nothing was running.
#[wasm_bindgen]
pub fn stop_site() -> bool {
    site::stop()
}

/// Show a toast. `kind` is one of `info`, `success`, `warning`, `error`.
#[wasm_bindgen]
pub fn notify(message: &str, kind: &str) -> bool {
    site::notify(message, Severity::from_name(kind)).is_some()
}

#[wasm_bindgen]
pub fn site_config() -> Option<String> {
    site::config_json()
}
