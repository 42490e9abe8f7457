//! Magnetic cursor follower.
//!
//! A dot trails the pointer with per-frame easing. Elements marked
//! `data-magnetic` lean toward the pointer while it is over them and spring
//! back when it leaves.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use crate::dom;
use crate::error::SiteResult;
use crate::motion;

const FOLLOW_FACTOR: f64 = 0.18;
const MAGNET_STRENGTH: f64 = 0.3;
const FOLLOWER_SIZE: f64 = 20.0;

/// Eased chase of a target point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follower {
    pub x: f64,
    pub y: f64,
}

impl Follower {
    pub fn step(&mut self, target: (f64, f64), factor: f64) {
        self.x = motion::lerp(self.x, target.0, factor);
        self.y = motion::lerp(self.y, target.1, factor);
    }
}

/// Offset for a magnetic element whose center is `center`.
pub fn magnet_pull(pointer: (f64, f64), center: (f64, f64), strength: f64) -> (f64, f64) {
    ((pointer.0 - center.0) * strength, (pointer.1 - center.1) * strength)
}

pub struct CursorFollower {
    dot: HtmlElement,
    running: Rc<Cell<bool>>,
    _listeners: Vec<EventListener>,
}

impl CursorFollower {
    pub fn mount(window: &Window, document: &Document) -> SiteResult<Option<Self>> {
        let coarse = window
            .match_media("(pointer: coarse)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());
        if coarse {
            return Ok(None);
        }

        let dot = dom::create(document, "div", "cursor-follower")?;
        dom::set_styles(
            &dot,
            &[
                ("position", "fixed"),
                ("left", "0"),
                ("top", "0"),
                ("width", "20px"),
                ("height", "20px"),
                ("border-radius", "50%"),
                ("border", "2px solid rgba(45, 212, 191, 0.8)"),
                ("pointer-events", "none"),
                ("z-index", "9999"),
                ("mix-blend-mode", "difference"),
            ],
        );
        dom::body(document)?.append_child(&dot)?;

        let pointer = Rc::new(Cell::new((0.0, 0.0)));
        let mut listeners = Vec::new();
        let track = pointer.clone();
        listeners.push(EventListener::new(document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                track.set((event.client_x() as f64, event.client_y() as f64));
            }
        }));
        bind_magnets(document, pointer.clone(), &mut listeners)?;

        let running = Rc::new(Cell::new(true));
        let alive = running.clone();
        let frame_dot = dot.clone();
        let follower = RefCell::new(Follower::default());
        dom::run_frames(move |_| {
            if !alive.get() {
                return false;
            }
            let mut f = follower.borrow_mut();
            f.step(pointer.get(), FOLLOW_FACTOR);
            let half = FOLLOWER_SIZE / 2.0;
            let transform = format!("translate({:.1}px, {:.1}px)", f.x - half, f.y - half);
            dom::set_styles(&frame_dot, &[("transform", transform.as_str())]);
            true
        });

        Ok(Some(Self { dot, running, _listeners: listeners }))
    }
}

impl Drop for CursorFollower {
    fn drop(&mut self) {
        self.running.set(false);
        self.dot.remove();
    }
}

fn bind_magnets(
    document: &Document,
    pointer: Rc<Cell<(f64, f64)>>,
    listeners: &mut Vec<EventListener>,
) -> SiteResult<()> {
    for el in dom::select_all(document, "[data-magnetic]")? {
        let target = el.clone();
        let pointer = pointer.clone();
        listeners.push(EventListener::new(&el, "mousemove", move |_| {
            let rect = target.get_bounding_client_rect();
            let center = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
            let (x, y) = magnet_pull(pointer.get(), center, MAGNET_STRENGTH);
            let transform = format!("translate({x:.1}px, {y:.1}px)");
            dom::set_styles(&target, &[("transform", transform.as_str())]);
        }));
        let target = el.clone();
        listeners.push(EventListener::new(&el, "mouseleave", move |_| {
            dom::set_styles(&target, &[("transform", "translate(0px, 0px)")]);
        }));
    }
    Ok(())
}
