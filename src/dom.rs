//! Small `web-sys` helpers shared by the effects and the toast host.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

use crate::error::{SiteError, SiteResult};

pub fn window() -> SiteResult<Window> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> SiteResult<Document> {
    window()?.document().ok_or(SiteError::NoDocument)
}

pub fn body(document: &Document) -> SiteResult<HtmlElement> {
    document.body().ok_or(SiteError::NoBody)
}

/// Every `HtmlElement` matching `selector`, in document order.
pub fn select_all(document: &Document, selector: &str) -> SiteResult<Vec<HtmlElement>> {
    let list = document.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

pub fn select_one(document: &Document, selector: &str) -> SiteResult<Option<HtmlElement>> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn create(document: &Document, tag: &str, class: &str) -> SiteResult<HtmlElement> {
    let el: HtmlElement = document
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| SiteError::Cast("HtmlElement"))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Set several inline style properties; failures are ignored like the browser
/// ignores invalid declarations.
pub fn set_styles(el: &HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        let _ = style.set_property(name, value);
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (w.max(1.0), h.max(1.0))
}

/// Injects `<style id=...>` blocks into `<head>` at most once per id.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    injected: HashSet<&'static str>,
}

impl StyleRegistry {
    pub fn ensure(&mut self, document: &Document, id: &'static str, css: &str) -> SiteResult<()> {
        if self.injected.contains(id) {
            return Ok(());
        }
        if document.get_element_by_id(id).is_none() {
            let style = document.create_element("style")?;
            style.set_id(id);
            style.set_text_content(Some(css));
            let head = document.head().ok_or(SiteError::Dom("document has no head".into()))?;
            head.append_child(&style)?;
        }
        self.injected.insert(id);
        Ok(())
    }
}

// --- Frame loop ---------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drive `tick` from `requestAnimationFrame` until it returns `false`.
pub fn run_frames(mut tick: impl FnMut(f64) -> bool + 'static) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if !tick(ts) {
            // drop the closure so the Rc cycle goes away
            let _ = f.borrow_mut().take();
            return;
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    let Some(w) = web_sys::window() else {
        return;
    };
    if let Some(cb) = f.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
