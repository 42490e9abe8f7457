//! Material-style ripple on button clicks.

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};

use crate::dom;
use crate::error::SiteResult;

const RIPPLE_MS: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// Circle covering the element, centered on the click point (element-local).
pub fn ripple_geometry(rect: (f64, f64, f64, f64), click: (f64, f64)) -> RippleGeometry {
    let (left, top, width, height) = rect;
    let size = width.max(height);
    RippleGeometry {
        size,
        left: click.0 - left - size / 2.0,
        top: click.1 - top - size / 2.0,
    }
}

pub struct Ripples {
    _listeners: Vec<EventListener>,
}

impl Ripples {
    pub fn mount(document: &Document) -> SiteResult<Option<Self>> {
        let targets = dom::select_all(document, ".btn, [data-ripple]")?;
        if targets.is_empty() {
            return Ok(None);
        }
        let mut listeners = Vec::with_capacity(targets.len());
        for el in targets {
            let host = el.clone();
            let document = document.clone();
            listeners.push(EventListener::new(&el, "click", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = host.get_bounding_client_rect();
                let geometry = ripple_geometry(
                    (rect.left(), rect.top(), rect.width(), rect.height()),
                    (event.client_x() as f64, event.client_y() as f64),
                );
                let Ok(ripple) = dom::create(&document, "span", "ripple-effect") else {
                    return;
                };
                let size = format!("{:.1}px", geometry.size);
                let left = format!("{:.1}px", geometry.left);
                let top = format!("{:.1}px", geometry.top);
                dom::set_styles(
                    &ripple,
                    &[("width", size.as_str()), ("height", size.as_str()), ("left", left.as_str()), ("top", top.as_str())],
                );
                if host.append_child(&ripple).is_ok() {
                    Timeout::new(RIPPLE_MS, move || ripple.remove()).forget();
                }
            }));
        }
        Ok(Some(Self { _listeners: listeners }))
    }
}

pub const RIPPLE_CSS: &str = r#"
.btn, [data-ripple] { position: relative; overflow: hidden; }
.ripple-effect {
  position: absolute;
  border-radius: 50%;
  background: rgba(255, 255, 255, 0.35);
  transform: scale(0);
  animation: rippleGrow 0.6s ease-out;
  pointer-events: none;
}
@keyframes rippleGrow { to { transform: scale(2.5); opacity: 0; } }
"#;
