//! The site controller: one long-lived owner for the notification center, the
//! easter-egg detectors, every effect and every event subscription.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Window};

use crate::config::SiteConfig;
use crate::dom::{self, StyleRegistry};
use crate::effects::{Effects, easter_egg, scroll};
use crate::error::{SiteError, SiteResult};
use crate::gate::{self, GateCopy, Notify};
use crate::logging;
use crate::motion;
use crate::notify::dom::{DomToastHost, ToastEvent};
use crate::notify::{NotificationCenter, Severity, ToastId};
use crate::probe::HeadProbe;
use crate::secret::{ClickBurst, SecretCode};
use crate::shortcuts::{self, KeyChord, Shortcut};

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Run `f` against the live controller. `None` when the site is stopped or the
/// controller is already borrowed further up the stack.
pub(crate) fn with_site<R>(f: impl FnOnce(&mut Site) -> R) -> Option<R> {
    SITE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            tracing::warn!("site controller busy; dropping re-entrant call");
            None
        }
    })
}

pub fn is_running() -> bool {
    SITE.with(|cell| cell.try_borrow().map(|site| site.is_some()).unwrap_or(true))
}

pub fn start(config: SiteConfig) -> SiteResult<()> {
    if is_running() {
        tracing::info!("site already running; start ignored");
        return Ok(());
    }
    config.validate()?;
    logging::init(&config.log_level);
    let site = Site::mount(config)?;
    tracing::info!(effects = site.effects.mounted(), gated_links = site.gated_links, "site started");
    SITE.with(|cell| *cell.borrow_mut() = Some(site));
    welcome();
    Ok(())
}

/// Drop the controller; every listener, observer and frame loop goes with it.
pub fn stop() -> bool {
    let site = SITE.with(|cell| cell.try_borrow_mut().ok().and_then(|mut guard| guard.take()));
    let stopped = site.is_some();
    drop(site);
    if stopped {
        tracing::info!("site stopped");
    }
    stopped
}

pub fn notify(message: &str, severity: Severity) -> Option<ToastId> {
    with_site(|site| {
        let duration = site.config.notification_duration_ms;
        site.show(message, severity, duration)
    })
}

pub fn config_json() -> Option<String> {
    with_site(|site| site.config.to_json().ok()).flatten()
}

/// Notifier handed to async work (the click gate) that outlives any borrow.
#[derive(Clone, Copy, Debug, Default)]
pub struct SiteNotifier;

impl Notify for SiteNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        notify(message, severity);
    }
}

pub(crate) struct Site {
    config: Rc<SiteConfig>,
    window: Window,
    document: Document,
    styles: StyleRegistry,
    notifications: NotificationCenter,
    toasts: DomToastHost,
    secret: SecretCode,
    logo_clicks: ClickBurst,
    effects: Effects,
    gated_links: usize,
    _listeners: Vec<EventListener>,
}

impl Site {
    fn mount(config: SiteConfig) -> SiteResult<Self> {
        let window = dom::window()?;
        let document = window.document().ok_or(SiteError::NoDocument)?;
        dom::body(&document)?;

        let config = Rc::new(config);
        let mut styles = StyleRegistry::default();
        let toasts = DomToastHost::new(document.clone(), &mut styles, Rc::new(dispatch_toast))?;
        let notifications = NotificationCenter::new(config.animation_duration_ms);
        let effects = Effects::mount(&window, &document, &mut styles, &config);

        let mut listeners = match gate::dom::bind(
            &document,
            &mut styles,
            &config.target_page,
            HeadProbe::new(config.probe_timeout_ms),
            GateCopy {
                loading: config.messages.loading.clone(),
                not_found: config.messages.not_found.clone(),
                local_warning: config.messages.local_warning.clone(),
                navigation_failed: config.messages.navigation_failed.clone(),
            },
            SiteNotifier,
        ) {
            Ok(listeners) => listeners,
            Err(err) => {
                tracing::warn!(%err, "gated links not bound");
                Vec::new()
            }
        };
        let gated_links = listeners.len();
        listeners.extend(bind_keyboard(&document, config.section_anchors.len()));
        listeners.extend(bind_logo(&document)?);

        Ok(Self {
            secret: SecretCode::new(&config.secret_code),
            logo_clicks: ClickBurst::triple(),
            config,
            window,
            document,
            styles,
            notifications,
            toasts,
            effects,
            gated_links,
            _listeners: listeners,
        })
    }

    fn show(&mut self, message: &str, severity: Severity, duration_ms: u32) -> ToastId {
        self.notifications.show(&mut self.toasts, message, severity, duration_ms)
    }

    fn on_toast_event(&mut self, event: ToastEvent) {
        match event {
            ToastEvent::CloseRequested(id) => {
                self.notifications.close(&mut self.toasts, id);
            }
            ToastEvent::ExitFinished(id) => {
                self.notifications.finish_close(&mut self.toasts, id);
            }
        }
    }

    fn on_secret_key(&mut self, key: &str) {
        if self.secret.push(key) {
            self.activate_easter_egg();
        }
    }

    fn on_logo_click(&mut self) {
        if self.logo_clicks.register(motion::now_ms()) {
            self.activate_easter_egg();
        }
    }

    fn activate_easter_egg(&mut self) {
        tracing::info!("easter egg activated");
        let message = self.config.messages.easter_egg.clone();
        let duration = self.config.easter_egg_duration_ms;
        self.show(&message, Severity::Success, duration);
        if let Err(err) = easter_egg::play(&self.document, &mut self.styles) {
            tracing::warn!(%err, "easter egg visuals failed");
        }
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) {
        tracing::debug!(?shortcut, "shortcut");
        match shortcut {
            Shortcut::DismissNotifications => {
                self.notifications.close_all(&mut self.toasts);
            }
            Shortcut::JumpToTop => scroll::scroll_to_top(&self.window),
            Shortcut::Section(index) => {
                if let Some(id) = self.config.section_anchors.get(index) {
                    if !scroll::scroll_to_element(&self.window, &self.document, id) {
                        tracing::debug!(%id, "section anchor not on page");
                    }
                }
            }
        }
    }
}

fn dispatch_toast(event: ToastEvent) {
    with_site(|site| site.on_toast_event(event));
}

fn bind_keyboard(document: &Document, sections: usize) -> Vec<EventListener> {
    let keypress = EventListener::new(document, "keypress", |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            let key = event.key();
            with_site(|site| site.on_secret_key(&key));
        }
    });

    let keydown = EventListener::new(document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let typing = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| shortcuts::is_text_entry(&el.tag_name()));
        if typing {
            return;
        }
        let code = key_event.code();
        let chord = KeyChord {
            code: &code,
            alt: key_event.alt_key(),
            ctrl: key_event.ctrl_key(),
            meta: key_event.meta_key(),
        };
        if let Some(shortcut) = shortcuts::resolve(chord, sections) {
            event.prevent_default();
            with_site(|site| site.run_shortcut(shortcut));
        }
    });

    vec![keypress, keydown]
}

fn bind_logo(document: &Document) -> SiteResult<Vec<EventListener>> {
    Ok(dom::select_all(document, ".logo")?
        .iter()
        .map(|logo| {
            EventListener::new(logo, "click", |_| {
                with_site(|site| site.on_logo_click());
            })
        })
        .collect())
}

fn welcome() {
    let title = "color: #2dd4bf; font-size: 20px; font-weight: bold; text-shadow: 2px 2px 4px rgba(0,0,0,0.5); padding: 10px";
    let hint = "color: #94a3b8; font-size: 12px; font-style: italic";
    easter_egg::banner("%c⚔️ Bienvenido al Portal de Roronoa Zoro ⚔️", title);
    easter_egg::banner("%cPresiona las teclas Z-O-R-O para descubrir un secreto...", hint);
    easter_egg::banner("%c\"Las cicatrices en la espalda son la vergüenza de un espadachín\"", hint);
}
