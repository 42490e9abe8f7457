//! Rotating quote: each quote types itself in, holds, fades, and hands over to
//! the next one.

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::SiteResult;
use crate::motion;

const TYPE_MS: f64 = 1800.0;
const FADE_MS: f64 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteFrame {
    pub index: usize,
    pub visible_chars: usize,
    pub opacity: f64,
}

/// What the quote element shows `elapsed_ms` after the rotation started.
pub fn quote_frame(elapsed_ms: f64, interval_ms: f64, lengths: &[usize]) -> Option<QuoteFrame> {
    if lengths.is_empty() {
        return None;
    }
    let interval = interval_ms.max(TYPE_MS + FADE_MS);
    let elapsed = elapsed_ms.max(0.0);
    let cycle = (elapsed / interval).floor() as usize;
    let index = cycle % lengths.len();
    let local = elapsed - cycle as f64 * interval;

    let typed = motion::ease_in_out_cubic(motion::progress(0.0, local, TYPE_MS));
    let visible_chars = (lengths[index] as f64 * typed).round() as usize;
    let fade_start = interval - FADE_MS;
    let opacity = if local > fade_start { 1.0 - motion::progress(fade_start, local, FADE_MS) } else { 1.0 };
    Some(QuoteFrame { index, visible_chars: visible_chars.min(lengths[index]), opacity })
}

pub struct QuoteRotator {
    running: Rc<Cell<bool>>,
}

impl QuoteRotator {
    pub fn mount(document: &Document, quotes: &[String], interval_ms: u32) -> SiteResult<Option<Self>> {
        let Some(el) = dom::select_one(document, ".quote-text")? else {
            return Ok(None);
        };
        let quotes: Vec<Vec<char>> = match el.get_attribute("data-quotes") {
            Some(list) => list.split('|').map(|q| q.trim().chars().collect()).filter(|q: &Vec<char>| !q.is_empty()).collect(),
            None => quotes.iter().map(|q| q.chars().collect()).collect(),
        };
        if quotes.is_empty() {
            return Ok(None);
        }
        let running = Rc::new(Cell::new(true));
        animate(el, quotes, interval_ms as f64, running.clone());
        Ok(Some(Self { running }))
    }
}

impl Drop for QuoteRotator {
    fn drop(&mut self) {
        self.running.set(false);
    }
}

fn animate(el: HtmlElement, quotes: Vec<Vec<char>>, interval_ms: f64, running: Rc<Cell<bool>>) {
    let lengths: Vec<usize> = quotes.iter().map(Vec::len).collect();
    let mut start: Option<f64> = None;
    let mut shown: Option<(usize, usize)> = None;
    dom::run_frames(move |now| {
        if !running.get() {
            return false;
        }
        let began = *start.get_or_insert(now);
        let Some(frame) = quote_frame(now - began, interval_ms, &lengths) else {
            return false;
        };
        if shown != Some((frame.index, frame.visible_chars)) {
            let text: String = quotes[frame.index][..frame.visible_chars].iter().collect();
            el.set_text_content(Some(&text));
            shown = Some((frame.index, frame.visible_chars));
        }
        let opacity = format!("{:.3}", frame.opacity);
        dom::set_styles(&el, &[("opacity", opacity.as_str())]);
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_in_then_holds_full_text() {
        let lengths = [10, 20];
        let start = quote_frame(0.0, 6000.0, &lengths).unwrap();
        assert_eq!((start.index, start.visible_chars), (0, 0));
        let typed = quote_frame(TYPE_MS, 6000.0, &lengths).unwrap();
        assert_eq!(typed.visible_chars, 10);
        assert_eq!(typed.opacity, 1.0);
    }

    #[test]
    fn fades_before_rotating() {
        let lengths = [10, 20];
        let fading = quote_frame(6000.0 - FADE_MS / 2.0, 6000.0, &lengths).unwrap();
        assert!(fading.opacity > 0.0 && fading.opacity < 1.0);
        let next = quote_frame(6000.0, 6000.0, &lengths).unwrap();
        assert_eq!(next.index, 1);
        assert_eq!(next.opacity, 1.0);
        let wrapped = quote_frame(12_000.0, 6000.0, &lengths).unwrap();
        assert_eq!(wrapped.index, 0);
    }

    #[test]
    fn no_quotes_no_frame() {
        assert_eq!(quote_frame(100.0, 6000.0, &[]), None);
    }
}
