//! Scroll behaviors: in-page anchors, scroll-to-top button, header shade and the
//! initial URL fragment.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Window};

use crate::dom;
use crate::error::SiteResult;
use crate::motion::{self, Throttle};

const HEADER_OFFSET: f64 = 100.0;
const SCROLL_THROTTLE_MS: f64 = 100.0;

/// Fragment id for an in-page link; bare `#` has none.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the element clears the fixed header.
pub fn anchor_offset(element_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    (element_top + page_offset - header_offset).max(0.0)
}

pub fn header_look(scroll_y: f64, shade_after: f64) -> (&'static str, &'static str) {
    if scroll_y > shade_after {
        ("rgba(10, 14, 26, 0.95)", "0 8px 32px rgba(0, 0, 0, 0.5)")
    } else {
        ("rgba(10, 14, 26, 0.75)", "0 4px 20px rgba(0, 0, 0, 0.3)")
    }
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_to_top(window: &Window) {
    smooth_scroll_to(window, 0.0);
}

/// Smooth-scroll to the element with `id`; `false` when there is none.
pub fn scroll_to_element(window: &Window, document: &Document, id: &str) -> bool {
    let Some(target) = document.get_element_by_id(id) else {
        return false;
    };
    let top = anchor_offset(target.get_bounding_client_rect().top(), dom::scroll_y(window), HEADER_OFFSET);
    smooth_scroll_to(window, top);
    true
}

fn scroll_into_view(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Subscriptions owned by the scroll module.
pub struct ScrollEffects {
    _listeners: Vec<EventListener>,
    _hash_timer: Option<Timeout>,
}

impl ScrollEffects {
    pub fn mount(
        window: &Window,
        document: &Document,
        top_threshold: f64,
        header_shade_after: f64,
        hash_delay_ms: u32,
    ) -> SiteResult<Self> {
        let mut listeners = Vec::new();
        bind_anchors(window, document, &mut listeners)?;
        bind_scroll_top(window, document, top_threshold, &mut listeners)?;
        bind_header(window, document, header_shade_after, &mut listeners)?;
        let hash_timer = schedule_hash_scroll(window, document, hash_delay_ms);
        Ok(Self { _listeners: listeners, _hash_timer: hash_timer })
    }
}

fn bind_anchors(window: &Window, document: &Document, listeners: &mut Vec<EventListener>) -> SiteResult<()> {
    for anchor in dom::select_all(document, r##"a[href^="#"]"##)? {
        let window = window.clone();
        let document = document.clone();
        let el = anchor.clone();
        listeners.push(EventListener::new(&anchor, "click", move |event| {
            let Some(href) = el.get_attribute("href") else {
                return;
            };
            let Some(id) = anchor_id(&href) else {
                return;
            };
            event.prevent_default();
            if scroll_to_element(&window, &document, id) {
                if let Ok(history) = window.history() {
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
                }
            }
        }));
    }
    Ok(())
}

fn bind_scroll_top(
    window: &Window,
    document: &Document,
    threshold: f64,
    listeners: &mut Vec<EventListener>,
) -> SiteResult<()> {
    let Some(button) = document.get_element_by_id("scrollTop") else {
        return Ok(());
    };
    let click_window = window.clone();
    listeners.push(EventListener::new(&button, "click", move |_| scroll_to_top(&click_window)));

    let throttle = Rc::new(RefCell::new(Throttle::new(SCROLL_THROTTLE_MS)));
    let scroll_window = window.clone();
    listeners.push(EventListener::new(window, "scroll", move |_| {
        if !throttle.borrow_mut().ready(motion::now_ms()) {
            return;
        }
        let classes = button.class_list();
        let _ = if dom::scroll_y(&scroll_window) > threshold {
            classes.add_1("visible")
        } else {
            classes.remove_1("visible")
        };
    }));
    Ok(())
}

fn bind_header(
    window: &Window,
    document: &Document,
    shade_after: f64,
    listeners: &mut Vec<EventListener>,
) -> SiteResult<()> {
    let Some(header) = dom::select_one(document, ".header")? else {
        return Ok(());
    };
    let throttle = Rc::new(RefCell::new(Throttle::new(SCROLL_THROTTLE_MS)));
    let scroll_window = window.clone();
    listeners.push(EventListener::new(window, "scroll", move |_| {
        if !throttle.borrow_mut().ready(motion::now_ms()) {
            return;
        }
        shade(&header, dom::scroll_y(&scroll_window), shade_after);
    }));
    Ok(())
}

fn shade(header: &HtmlElement, scroll_y: f64, shade_after: f64) {
    let (background, shadow) = header_look(scroll_y, shade_after);
    dom::set_styles(header, &[("background", background), ("box-shadow", shadow)]);
}

fn schedule_hash_scroll(window: &Window, document: &Document, delay_ms: u32) -> Option<Timeout> {
    let hash = window.location().hash().ok()?;
    let id = anchor_id(&hash)?.to_string();
    let document = document.clone();
    Some(Timeout::new(delay_ms, move || {
        if let Some(target) = document.get_element_by_id(&id) {
            tracing::debug!(%id, "scrolling to url fragment");
            scroll_into_view(&target);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_ids() {
        assert_eq!(anchor_id("#skills"), Some("skills"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("zoro.html"), None);
    }

    #[test]
    fn offset_clears_header_and_never_goes_negative() {
        assert_eq!(anchor_offset(500.0, 200.0, 100.0), 600.0);
        assert_eq!(anchor_offset(20.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn header_shades_past_offset() {
        assert_eq!(header_look(10.0, 50.0).0, "rgba(10, 14, 26, 0.75)");
        assert_eq!(header_look(51.0, 50.0).0, "rgba(10, 14, 26, 0.95)");
    }
}
