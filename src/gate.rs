//! Click gate: links to the target page are held back until a probe says the
//! page is there.

use thiserror::Error;

use crate::notify::Severity;
use crate::probe::{PageProbe, ProbeOutcome};

/// Per-link state. A link goes back to `Idle` once a click is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Checking,
    Proceed,
    Blocked(BlockReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    ResourceMissing,
    ProbeFailed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("{0} does not exist")]
    ResourceMissing(String),
    #[error("could not verify {0}")]
    ProbeFailed(String),
}

impl GateError {
    pub fn reason(&self) -> BlockReason {
        match self {
            GateError::ResourceMissing(_) => BlockReason::ResourceMissing,
            GateError::ProbeFailed(_) => BlockReason::ProbeFailed,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            GateError::ResourceMissing(_) => Severity::Warning,
            GateError::ProbeFailed(_) => Severity::Info,
        }
    }

    fn message<'a>(&self, copy: &'a GateCopy) -> &'a str {
        match self {
            GateError::ResourceMissing(_) => &copy.not_found,
            GateError::ProbeFailed(_) => &copy.local_warning,
        }
    }
}

/// User-facing strings the gate shows.
#[derive(Clone, Debug)]
pub struct GateCopy {
    pub loading: String,
    pub not_found: String,
    pub local_warning: String,
    pub navigation_failed: String,
}

/// The clickable element whose navigation is gated.
pub trait TriggerElement {
    fn content(&self) -> String;
    fn set_content(&self, markup: &str);
    fn set_interactive(&self, interactive: bool);
}

pub trait Notify {
    fn notify(&self, message: &str, severity: Severity);
}

pub fn check(outcome: ProbeOutcome, target: &str) -> Result<(), GateError> {
    match outcome {
        ProbeOutcome::Exists => Ok(()),
        ProbeOutcome::Missing => Err(GateError::ResourceMissing(target.to_string())),
        ProbeOutcome::Failed => Err(GateError::ProbeFailed(target.to_string())),
    }
}

pub fn loading_markup(loading: &str) -> String {
    format!(
        r#"<span class="btn-content"><span class="loading-spinner"></span><span class="btn-text">{}</span></span>"#,
        escape_html(loading)
    )
}

/// Run one gated click to completion. Every path restores the trigger; a
/// blocked click is reported through `notifier` and never escapes as an error.
pub async fn intercept<P, T, N>(probe: &P, trigger: &T, notifier: &N, target: &str, copy: &GateCopy) -> GateState
where
    P: PageProbe,
    T: TriggerElement,
    N: Notify,
{
    let original = trigger.content();
    trigger.set_content(&loading_markup(&copy.loading));
    trigger.set_interactive(false);
    tracing::debug!(page = target, state = ?GateState::Checking, "gate checking");

    let outcome = probe.probe(target).await;
    let state = match check(outcome, target) {
        Ok(()) => GateState::Proceed,
        Err(err) => {
            tracing::info!(%err, "navigation blocked");
            notifier.notify(err.message(copy), err.severity());
            GateState::Blocked(err.reason())
        }
    };

    trigger.set_content(&original);
    trigger.set_interactive(true);
    state
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// --- DOM binding ---------------------------------------------------------------

pub mod dom {
    use std::cell::Cell;
    use std::rc::Rc;

    use gloo_events::EventListener;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement, MouseEvent};

    use super::{GateCopy, GateState, Notify, TriggerElement, intercept};
    use crate::dom::{self, StyleRegistry};
    use crate::error::SiteResult;
    use crate::notify::Severity;
    use crate::probe::HeadProbe;

    /// A gated link. Its markup is captured once, so whatever other handlers
    /// append while a check runs (ripples) is never baked into the restore.
    #[derive(Clone)]
    pub struct DomTrigger {
        element: HtmlElement,
        original: Rc<str>,
    }

    impl DomTrigger {
        pub fn new(element: HtmlElement) -> Self {
            let original = Rc::from(element.inner_html());
            Self { element, original }
        }

        pub fn element(&self) -> &HtmlElement {
            &self.element
        }
    }

    impl TriggerElement for DomTrigger {
        fn content(&self) -> String {
            self.original.to_string()
        }

        fn set_content(&self, markup: &str) {
            self.element.set_inner_html(markup);
        }

        fn set_interactive(&self, interactive: bool) {
            let pointer = if interactive { "auto" } else { "none" };
            dom::set_styles(&self.element, &[("pointer-events", pointer)]);
            let _ = self.element.set_attribute("aria-busy", if interactive { "false" } else { "true" });
        }
    }

    /// Clicks that open a new tab or window are left alone.
    fn wants_new_context(event: &MouseEvent) -> bool {
        event.ctrl_key() || event.meta_key() || event.shift_key() || event.button() != 0
    }

    /// Bind every link to `target` on the page. Returns the subscriptions.
    pub fn bind<N>(
        document: &Document,
        styles: &mut StyleRegistry,
        target: &str,
        probe: HeadProbe,
        copy: GateCopy,
        notifier: N,
    ) -> SiteResult<Vec<EventListener>>
    where
        N: Notify + Clone + 'static,
    {
        let links = dom::select_all(document, &format!(r#"a[href="{target}"]"#))?;
        if links.is_empty() {
            return Ok(Vec::new());
        }
        styles.ensure(document, "spinner-styles", SPINNER_CSS)?;

        let mut listeners = Vec::with_capacity(links.len());
        for link in links {
            let trigger = DomTrigger::new(link.clone());
            let state = Rc::new(Cell::new(GateState::Idle));
            let target = target.to_string();
            let copy = copy.clone();
            let notifier = notifier.clone();
            listeners.push(EventListener::new(&link, "click", move |event| {
                if event.dyn_ref::<MouseEvent>().is_some_and(wants_new_context) {
                    return;
                }
                event.prevent_default();
                if state.get() != GateState::Idle {
                    tracing::debug!(page = %target, "gate busy; click swallowed");
                    return;
                }
                state.set(GateState::Checking);

                let href = trigger.element().get_attribute("href").unwrap_or_else(|| target.clone());
                let trigger = trigger.clone();
                let state = state.clone();
                let target = target.clone();
                let copy = copy.clone();
                let notifier = notifier.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = intercept(&probe, &trigger, &notifier, &target, &copy).await;
                    if outcome == GateState::Proceed {
                        navigate(&href, &notifier, &copy.navigation_failed);
                    }
                    state.set(GateState::Idle);
                });
            }));
        }
        tracing::debug!(count = listeners.len(), "gated links bound");
        Ok(listeners)
    }

    fn navigate<N: Notify>(href: &str, notifier: &N, failure: &str) {
        let result = dom::window().map(|w| w.location().set_href(href));
        if !matches!(result, Ok(Ok(()))) {
            tracing::warn!(href, "navigation failed");
            notifier.notify(failure, Severity::Error);
        }
    }

    const SPINNER_CSS: &str = r#"
.loading-spinner {
  display: inline-block;
  width: 16px;
  height: 16px;
  border: 2px solid rgba(10, 34, 46, 0.3);
  border-top-color: #0a222e;
  border-radius: 50%;
  animation: spin 0.6s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
"#;
}
