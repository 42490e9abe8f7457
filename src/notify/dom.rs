//! Browser rendering of toasts.

use std::collections::HashMap;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement};

use super::{Toast, ToastHost, ToastId};
use crate::dom::{self, StyleRegistry};
use crate::error::SiteResult;

/// What a toast's timers and close button report back to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastEvent {
    /// Auto-close timer fired or the close button was clicked.
    CloseRequested(ToastId),
    /// Exit transition finished; the node can go.
    ExitFinished(ToastId),
}

pub type ToastDispatch = Rc<dyn Fn(ToastEvent)>;

struct MountedToast {
    element: HtmlElement,
    auto_close: Option<Timeout>,
    exit: Option<Timeout>,
    _close_click: EventListener,
}

pub struct DomToastHost {
    document: Document,
    dispatch: ToastDispatch,
    mounted: HashMap<ToastId, MountedToast>,
}

const CLOSE_ICON: &str = r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M6 6L14 14M6 14L14 6" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#;

impl DomToastHost {
    pub fn new(document: Document, styles: &mut StyleRegistry, dispatch: ToastDispatch) -> SiteResult<Self> {
        styles.ensure(&document, "notification-styles", NOTIFICATION_CSS)?;
        Ok(Self { document, dispatch, mounted: HashMap::new() })
    }

    fn build(&self, toast: &Toast) -> SiteResult<(HtmlElement, HtmlElement)> {
        let doc = &self.document;
        let root = dom::create(doc, "div", &format!("notification {}", toast.severity.css_class()))?;
        root.set_attribute("role", "status")?;

        let content = dom::create(doc, "div", "notification-content")?;
        let icon = dom::create(doc, "span", "notification-icon")?;
        icon.set_text_content(Some(toast.severity.glyph()));
        let message = dom::create(doc, "p", "notification-message")?;
        message.set_text_content(Some(&toast.message));
        let close = dom::create(doc, "button", "notification-close")?;
        close.set_attribute("aria-label", "Cerrar")?;
        close.set_inner_html(CLOSE_ICON);
        content.append_child(&icon)?;
        content.append_child(&message)?;
        content.append_child(&close)?;

        let progress = dom::create(doc, "div", "notification-progress")?;
        let lifetime = format!("{}ms", toast.duration_ms);
        dom::set_styles(&progress, &[("animation-duration", lifetime.as_str())]);

        root.append_child(&content)?;
        root.append_child(&progress)?;
        dom::body(doc)?.append_child(&root)?;
        Ok((root, close))
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }
}

impl ToastHost for DomToastHost {
    fn mount(&mut self, toast: &Toast) -> bool {
        let (element, close) = match self.build(toast) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(id = toast.id.raw(), %err, "toast render failed");
                return false;
            }
        };
        // read layout so the entry transition starts from the hidden state
        let _ = element.offset_height();
        let _ = element.class_list().add_1("show");

        let id = toast.id;
        let dispatch = self.dispatch.clone();
        let listener = EventListener::new(&close, "click", move |_| dispatch(ToastEvent::CloseRequested(id)));
        self.mounted.insert(
            id,
            MountedToast { element, auto_close: None, exit: None, _close_click: listener },
        );
        true
    }

    fn arm_auto_close(&mut self, id: ToastId, after_ms: u32) {
        let Some(entry) = self.mounted.get_mut(&id) else {
            return;
        };
        let dispatch = self.dispatch.clone();
        entry.auto_close = Some(Timeout::new(after_ms, move || dispatch(ToastEvent::CloseRequested(id))));
    }

    fn disarm_auto_close(&mut self, id: ToastId) {
        if let Some(entry) = self.mounted.get_mut(&id) {
            // dropping a gloo Timeout clears it
            entry.auto_close = None;
        }
    }

    fn begin_exit(&mut self, id: ToastId, after_ms: u32) {
        let dispatch = self.dispatch.clone();
        let Some(entry) = self.mounted.get_mut(&id) else {
            // never rendered; still let the center forget it
            Timeout::new(after_ms, move || dispatch(ToastEvent::ExitFinished(id))).forget();
            return;
        };
        let _ = entry.element.class_list().remove_1("show");
        entry.exit = Some(Timeout::new(after_ms, move || dispatch(ToastEvent::ExitFinished(id))));
    }

    fn detach(&mut self, id: ToastId) {
        if let Some(entry) = self.mounted.remove(&id) {
            entry.element.remove();
        }
    }
}

const NOTIFICATION_CSS: &str = r#"
.notification {
  position: fixed;
  top: 20px;
  right: 20px;
  max-width: 420px;
  min-width: 300px;
  background: linear-gradient(135deg, rgba(15, 23, 42, 0.98), rgba(10, 14, 26, 0.98));
  border-radius: 16px;
  box-shadow: 0 20px 40px rgba(0, 0, 0, 0.6), 0 0 1px rgba(45, 212, 191, 0.3);
  backdrop-filter: blur(20px);
  opacity: 0;
  transform: translateX(450px) scale(0.9);
  transition: all 0.4s cubic-bezier(0.68, -0.55, 0.265, 1.55);
  z-index: 10000;
  overflow: hidden;
}
.notification.show { opacity: 1; transform: translateX(0) scale(1); }
.notification + .notification { margin-top: 8px; }
.notification-content {
  display: flex;
  align-items: flex-start;
  gap: 1rem;
  padding: 1.5rem;
  position: relative;
  z-index: 2;
}
.notification-icon { font-size: 1.75rem; flex-shrink: 0; line-height: 1; animation: iconBounce 0.6s ease-out; }
@keyframes iconBounce { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.2); } }
.notification-message { flex: 1; color: #e6eef8; font-size: 0.9375rem; line-height: 1.6; margin: 0; white-space: pre-line; }
.notification-close {
  background: none;
  border: none;
  color: #94a3b8;
  cursor: pointer;
  padding: 0.25rem;
  width: 32px;
  height: 32px;
  display: flex;
  align-items: center;
  justify-content: center;
  border-radius: 8px;
  transition: all 0.2s;
  flex-shrink: 0;
}
.notification-close:hover { background: rgba(255, 255, 255, 0.1); color: #e6eef8; }
.notification-progress {
  position: absolute;
  bottom: 0;
  left: 0;
  height: 3px;
  width: 100%;
  background: linear-gradient(90deg, var(--accent-cyan), var(--accent-emerald));
  transform-origin: left;
  animation: progressBar 6s linear forwards;
}
@keyframes progressBar { from { transform: scaleX(1); } to { transform: scaleX(0); } }
.notification-warning { border-left: 4px solid #fbbf24; }
.notification-success { border-left: 4px solid #34d399; }
.notification-error { border-left: 4px solid #ef4444; }
.notification-info { border-left: 4px solid #2dd4bf; }
@media (max-width: 640px) {
  .notification { top: 10px; right: 10px; left: 10px; max-width: none; min-width: 0; transform: translateY(-120px) scale(0.95); }
  .notification.show { transform: translateY(0) scale(1); }
}
"#;
