//! Visual side of the easter egg: page shake, spinning swords, console banner.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom::{self, StyleRegistry};
use crate::error::SiteResult;

const SHAKE_MS: u32 = 500;
const SWORD_STAGGER_MS: u32 = 100;
const SWORD_SPIN_MS: u32 = 600;

/// Delay before sword `index` starts spinning.
pub fn sword_delay_ms(index: usize) -> u32 {
    index as u32 * SWORD_STAGGER_MS
}

pub fn play(document: &Document, styles: &mut StyleRegistry) -> SiteResult<()> {
    styles.ensure(document, "easter-egg-styles", EASTER_EGG_CSS)?;

    let body = dom::body(document)?;
    dom::set_styles(&body, &[("animation", "shake 0.5s")]);
    Timeout::new(SHAKE_MS, move || dom::set_styles(&body, &[("animation", "")])).forget();

    for (index, sword) in dom::select_all(document, ".sword")?.into_iter().enumerate() {
        Timeout::new(sword_delay_ms(index), move || {
            dom::set_styles(&sword, &[("animation", "swordSlash 0.6s ease-out")]);
            Timeout::new(SWORD_SPIN_MS, move || dom::set_styles(&sword, &[("animation", "")])).forget();
        })
        .forget();
    }

    banner(
        "%c⚔️ ¡MODO SANTORYU ACTIVADO! ⚔️",
        "color: #2dd4bf; font-size: 24px; font-weight: bold; text-shadow: 2px 2px 4px rgba(0,0,0,0.5);",
    );
    banner("%c\"El camino del espadachín es solitario\"", "color: #94a3b8; font-size: 14px; font-style: italic;");
    Ok(())
}

/// Styled `console.log`; `tracing` output cannot carry CSS.
pub fn banner(text: &str, css: &str) {
    web_sys::console::log_2(&JsValue::from_str(text), &JsValue::from_str(css));
}

const EASTER_EGG_CSS: &str = r#"
@keyframes shake {
  0%, 100% { transform: translateX(0); }
  10%, 30%, 50%, 70%, 90% { transform: translateX(-8px); }
  20%, 40%, 60%, 80% { transform: translateX(8px); }
}
@keyframes swordSlash {
  0% { transform: rotate(0deg) scale(1); }
  50% { transform: rotate(360deg) scale(1.3); }
  100% { transform: rotate(720deg) scale(1); }
}
"#;
