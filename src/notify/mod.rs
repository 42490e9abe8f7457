//! Toast notifications.
//!
//! [`NotificationCenter`] owns the lifecycle of every toast: it decides when a
//! toast is mounted, when its auto-close timer is armed or disarmed, and when it
//! is finally detached. Everything the browser does (building nodes, running
//! timers, listening for the close button) sits behind [`ToastHost`], so the
//! lifecycle runs unchanged against a recording host in tests.
//!
//! Lifecycle of one toast:
//!
//! ```text
//! show ──> Showing ──close──> Leaving ──finish_close──> removed
//!             │                  ▲
//!             └── timer expiry ──┘   (second close is a no-op)
//! ```

pub mod dom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Success => "✓",
            Severity::Warning => "⚠️",
            Severity::Error => "✕",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "notification-info",
            Severity::Success => "notification-success",
            Severity::Warning => "notification-warning",
            Severity::Error => "notification-error",
        }
    }

    /// Lenient parse for the JS surface; unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" | "warn" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Showing,
    Leaving,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
    pub phase: ToastPhase,
}

/// Browser side of the toast lifecycle. Implementations must route timer expiry
/// and close clicks back into [`NotificationCenter::close`], and the exit timer
/// into [`NotificationCenter::finish_close`].
pub trait ToastHost {
    /// Render the toast and wire its close control. `false` when nothing was
    /// rendered; the center then never tracks the toast.
    fn mount(&mut self, toast: &Toast) -> bool;
    fn arm_auto_close(&mut self, id: ToastId, after_ms: u32);
    fn disarm_auto_close(&mut self, id: ToastId);
    /// Start the exit transition and schedule `finish_close` after `after_ms`.
    fn begin_exit(&mut self, id: ToastId, after_ms: u32);
    fn detach(&mut self, id: ToastId);
}

#[derive(Debug)]
pub struct NotificationCenter {
    active: Vec<Toast>,
    next_id: u64,
    exit_ms: u32,
}

impl NotificationCenter {
    pub fn new(exit_ms: u32) -> Self {
        Self { active: Vec::new(), next_id: 1, exit_ms }
    }

    pub fn show<H: ToastHost>(
        &mut self,
        host: &mut H,
        message: impl Into<String>,
        severity: Severity,
        duration_ms: u32,
    ) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let toast = Toast {
            id,
            message: message.into(),
            severity,
            duration_ms,
            phase: ToastPhase::Showing,
        };
        if !host.mount(&toast) {
            tracing::warn!(id = id.0, ?severity, "toast not rendered; dropped");
            return id;
        }
        host.arm_auto_close(id, duration_ms);
        tracing::debug!(id = id.0, ?severity, duration_ms, "toast shown");
        self.active.push(toast);
        id
    }

    /// Begin closing `id`. Only the first call for a toast does anything and
    /// returns `true`; closing a leaving or removed toast is a no-op.
    pub fn close<H: ToastHost>(&mut self, host: &mut H, id: ToastId) -> bool {
        let Some(toast) = self.active.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if toast.phase == ToastPhase::Leaving {
            return false;
        }
        toast.phase = ToastPhase::Leaving;
        host.disarm_auto_close(id);
        host.begin_exit(id, self.exit_ms);
        tracing::debug!(id = id.0, "toast closing");
        true
    }

    /// Detach and forget `id` once its exit transition ran. Idempotent.
    pub fn finish_close<H: ToastHost>(&mut self, host: &mut H, id: ToastId) -> bool {
        let Some(index) = self.active.iter().position(|t| t.id == id) else {
            return false;
        };
        self.active.remove(index);
        host.detach(id);
        tracing::debug!(id = id.0, remaining = self.active.len(), "toast removed");
        true
    }

    /// Close every toast still showing. Returns how many started closing.
    pub fn close_all<H: ToastHost>(&mut self, host: &mut H) -> usize {
        let showing: Vec<ToastId> = self
            .active
            .iter()
            .filter(|t| t.phase == ToastPhase::Showing)
            .map(|t| t.id)
            .collect();
        showing.into_iter().filter(|id| self.close(host, *id)).count()
    }

    /// Toasts mounted and not yet detached, leaving ones included.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: ToastId) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.active.iter().find(|t| t.id == id)
    }

    pub fn exit_ms(&self) -> u32 {
        self.exit_ms
    }
}
