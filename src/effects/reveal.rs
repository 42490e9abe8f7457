//! Scroll-triggered reveals: stat counters, skill cards, timeline items.

use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::SiteResult;
use crate::motion;

const COUNTER_MS: f64 = 2000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    Counter,
    SlideUp,
    SlideIn,
}

impl RevealKind {
    fn selector(self) -> &'static str {
        match self {
            RevealKind::Counter => ".stat-value[data-target]",
            RevealKind::SlideUp => ".skill-card",
            RevealKind::SlideIn => ".timeline-item",
        }
    }
}

struct ObserverHandle {
    observer: IntersectionObserver,
    _closure: Rc<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

/// One observer per reveal group; disconnected on drop.
pub struct RevealObserver {
    handles: Vec<ObserverHandle>,
}

impl RevealObserver {
    pub fn mount(document: &Document) -> SiteResult<Self> {
        let mut handles = Vec::new();
        for kind in [RevealKind::Counter, RevealKind::SlideUp, RevealKind::SlideIn] {
            if let Some(handle) = observe(document, kind)? {
                handles.push(handle);
            }
        }
        Ok(Self { handles })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.observer.disconnect();
        }
    }
}

fn observe(document: &Document, kind: RevealKind) -> SiteResult<Option<ObserverHandle>> {
    let targets = dom::select_all(document, kind.selector())?;
    if targets.is_empty() {
        return Ok(None);
    }
    let closure = Rc::new(Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            reveal(&target, kind);
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>));

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.2));
    options.set_root_margin("0px 0px -50px 0px");
    let observer = IntersectionObserver::new_with_options(closure.as_ref().as_ref().unchecked_ref(), &options)?;
    for target in &targets {
        observer.observe(target);
    }
    tracing::debug!(?kind, count = targets.len(), "reveal observer attached");
    Ok(Some(ObserverHandle { observer, _closure: closure }))
}

fn reveal(target: &Element, kind: RevealKind) {
    let Ok(el) = target.clone().dyn_into::<HtmlElement>() else {
        return;
    };
    match kind {
        RevealKind::Counter => start_counter(el),
        RevealKind::SlideUp => dom::set_styles(&el, &[("opacity", "1"), ("transform", "translateY(0)")]),
        RevealKind::SlideIn => dom::set_styles(&el, &[("opacity", "1"), ("transform", "translateX(0)")]),
    }
}

/// Parse `data-target`; garbage counts as zero like `parseInt` fallback.
pub fn parse_target(raw: Option<&str>) -> i64 {
    raw.map(str::trim)
        .and_then(|s| {
            let digits: String = s
                .char_indices()
                .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
                .map(|(_, c)| c)
                .collect();
            digits.parse::<i64>().ok()
        })
        .unwrap_or(0)
}

pub fn render_count(value: i64, compact: bool) -> String {
    if compact { motion::format_compact(value) } else { value.to_string() }
}

fn start_counter(el: HtmlElement) {
    let target = parse_target(el.get_attribute("data-target").as_deref());
    let compact = el.get_attribute("data-format").as_deref() == Some("compact");
    let mut start: Option<f64> = None;
    dom::run_frames(move |now| {
        let began = *start.get_or_insert(now);
        let p = motion::progress(began, now, COUNTER_MS);
        el.set_text_content(Some(&render_count(motion::counter_value(target, p), compact)));
        p < 1.0
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_parse_like_parse_int() {
        assert_eq!(parse_target(Some("1200")), 1200);
        assert_eq!(parse_target(Some(" 35 swords")), 35);
        assert_eq!(parse_target(Some("-4")), -4);
        assert_eq!(parse_target(Some("abc")), 0);
        assert_eq!(parse_target(None), 0);
    }

    #[test]
    fn compact_rendering_is_opt_in() {
        assert_eq!(render_count(3_000_000, false), "3000000");
        assert_eq!(render_count(3_000_000, true), "3.00M");
    }
}
