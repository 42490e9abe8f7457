//! Hero parallax: layers drift with the pointer, deeper layers further.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent, Window};

use crate::dom;
use crate::error::SiteResult;
use crate::motion::{self, Throttle};

const DEPTH_STEP_PX: f64 = 5.0;
const THROTTLE_MS: f64 = 50.0;

/// Translation of layer `index` for a pointer at `(x, y)` in a `(w, h)` viewport.
pub fn parallax_offset(pointer: (f64, f64), viewport: (f64, f64), index: usize) -> (f64, f64) {
    let x_pct = (pointer.0 / viewport.0 - 0.5) * 2.0;
    let y_pct = (pointer.1 / viewport.1 - 0.5) * 2.0;
    let depth = (index + 1) as f64 * DEPTH_STEP_PX;
    (x_pct * depth, y_pct * depth)
}

pub struct Parallax {
    _listener: EventListener,
}

impl Parallax {
    pub fn mount(window: &Window, document: &Document) -> SiteResult<Option<Self>> {
        let layers = dom::select_all(document, ".hero-content, .hero-sidebar")?;
        if layers.is_empty() {
            return Ok(None);
        }
        let window = window.clone();
        let mut throttle = Throttle::new(THROTTLE_MS);
        let listener = EventListener::new(document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if !throttle.ready(motion::now_ms()) {
                return;
            }
            let pointer = (event.client_x() as f64, event.client_y() as f64);
            let viewport = dom::viewport(&window);
            for (index, layer) in layers.iter().enumerate() {
                let (x, y) = parallax_offset(pointer, viewport, index);
                let transform = format!("translate({x:.2}px, {y:.2}px)");
                dom::set_styles(layer, &[("transform", transform.as_str())]);
            }
        });
        Ok(Some(Self { _listener: listener }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pointer_does_not_move_layers() {
        assert_eq!(parallax_offset((500.0, 300.0), (1000.0, 600.0), 0), (0.0, 0.0));
    }

    #[test]
    fn deeper_layers_move_further() {
        let near = parallax_offset((1000.0, 0.0), (1000.0, 600.0), 0);
        let far = parallax_offset((1000.0, 0.0), (1000.0, 600.0), 1);
        assert_eq!(near, (5.0, -5.0));
        assert_eq!(far, (10.0, -10.0));
    }
}
