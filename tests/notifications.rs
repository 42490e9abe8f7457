// Host-side tests for the toast lifecycle. A recording host stands in for the
// browser so timer expiry and exit transitions are driven by hand.

use zoro_site::{NotificationCenter, Severity, Toast, ToastHost, ToastId};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Mount(ToastId, Severity),
    Arm(ToastId, u32),
    Disarm(ToastId),
    Exit(ToastId, u32),
    Detach(ToastId),
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<Call>,
    /// Simulates a render failure (no body, detached document).
    refuse_mount: bool,
}

impl RecordingHost {
    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn mounted(&self) -> usize {
        self.count(|c| matches!(c, Call::Mount(..)))
    }

    fn detached(&self) -> usize {
        self.count(|c| matches!(c, Call::Detach(_)))
    }
}

impl ToastHost for RecordingHost {
    fn mount(&mut self, toast: &Toast) -> bool {
        if self.refuse_mount {
            return false;
        }
        self.calls.push(Call::Mount(toast.id, toast.severity));
        true
    }
    fn arm_auto_close(&mut self, id: ToastId, after_ms: u32) {
        self.calls.push(Call::Arm(id, after_ms));
    }
    fn disarm_auto_close(&mut self, id: ToastId) {
        self.calls.push(Call::Disarm(id));
    }
    fn begin_exit(&mut self, id: ToastId, after_ms: u32) {
        self.calls.push(Call::Exit(id, after_ms));
    }
    fn detach(&mut self, id: ToastId) {
        self.calls.push(Call::Detach(id));
    }
}

#[test]
fn active_count_tracks_shows_minus_completed_closes() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);

    let a = center.show(&mut host, "uno", Severity::Info, 6000);
    let b = center.show(&mut host, "dos", Severity::Warning, 6000);
    let c = center.show(&mut host, "tres", Severity::Success, 6000);
    assert_eq!(center.active_count(), host.mounted() - host.detached());
    assert_eq!(center.active_count(), 3);

    center.close(&mut host, b);
    // still on screen while the exit transition runs
    assert_eq!(center.active_count(), 3);
    center.finish_close(&mut host, b);
    assert_eq!(center.active_count(), host.mounted() - host.detached());
    assert_eq!(center.active_count(), 2);

    for id in [a, c] {
        center.close(&mut host, id);
        center.finish_close(&mut host, id);
        assert_eq!(center.active_count(), host.mounted() - host.detached());
    }
    assert_eq!(center.active_count(), 0);
}

#[test]
fn show_mounts_then_arms_the_auto_close_timer() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);
    let id = center.show(&mut host, "hola", Severity::Error, 4500);
    assert_eq!(host.calls, vec![Call::Mount(id, Severity::Error), Call::Arm(id, 4500)]);
}

#[test]
fn unrendered_toast_is_never_tracked() {
    let mut host = RecordingHost { refuse_mount: true, ..Default::default() };
    let mut center = NotificationCenter::new(300);
    let id = center.show(&mut host, "hola", Severity::Info, 6000);

    assert_eq!(center.active_count(), 0);
    assert!(!center.is_active(id));
    assert!(host.calls.is_empty());
    assert!(!center.close(&mut host, id));

    // rendering recovers for the next toast
    host.refuse_mount = false;
    let next = center.show(&mut host, "otra", Severity::Info, 6000);
    assert_ne!(id, next);
    assert_eq!(center.active_count(), host.mounted() - host.detached());
}

#[test]
fn double_close_is_harmless_and_detaches_once() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);
    let id = center.show(&mut host, "hola", Severity::Info, 6000);

    // timer expiry and a close click racing each other
    assert!(center.close(&mut host, id));
    assert!(!center.close(&mut host, id));
    assert_eq!(host.count(|c| matches!(c, Call::Exit(..))), 1);
    assert_eq!(host.count(|c| *c == Call::Disarm(id)), 1);

    assert!(center.finish_close(&mut host, id));
    assert!(!center.finish_close(&mut host, id));
    assert!(!center.close(&mut host, id));
    assert_eq!(host.detached(), 1);
    assert!(!center.is_active(id));
}

#[test]
fn close_uses_the_animation_duration_for_the_exit() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(450);
    let id = center.show(&mut host, "hola", Severity::Info, 6000);
    center.close(&mut host, id);
    assert_eq!(host.calls.last(), Some(&Call::Exit(id, 450)));
    assert_eq!(center.exit_ms(), 450);
}

#[test]
fn closing_one_toast_leaves_the_others_armed() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);
    let first = center.show(&mut host, "uno", Severity::Info, 6000);
    let second = center.show(&mut host, "dos", Severity::Info, 6000);
    center.close(&mut host, first);
    assert_eq!(host.count(|c| matches!(c, Call::Disarm(_))), 1);
    assert_eq!(host.count(|c| *c == Call::Disarm(second)), 0);
}

#[test]
fn close_all_skips_toasts_already_leaving() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);
    let ids: Vec<_> = (0..4).map(|i| center.show(&mut host, format!("n{i}"), Severity::Info, 6000)).collect();
    center.close(&mut host, ids[0]);

    assert_eq!(center.close_all(&mut host), 3);
    assert_eq!(center.close_all(&mut host), 0);
    for id in &ids {
        center.finish_close(&mut host, *id);
    }
    assert_eq!(host.detached(), 4);
    assert_eq!(center.active_count(), 0);
}

#[test]
fn unknown_ids_are_ignored() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);
    let id = center.show(&mut host, "hola", Severity::Info, 6000);
    center.close(&mut host, id);
    center.finish_close(&mut host, id);
    let calls = host.calls.len();
    assert!(!center.close(&mut host, id));
    assert!(!center.finish_close(&mut host, id));
    assert_eq!(host.calls.len(), calls);
}

#[test]
fn toast_ids_are_unique() {
    let mut host = RecordingHost::default();
    let mut center = NotificationCenter::new(300);
    let a = center.show(&mut host, "a", Severity::Info, 1);
    let b = center.show(&mut host, "b", Severity::Info, 1);
    assert_ne!(a, b);
    assert!(b.raw() > a.raw());
}

#[test]
fn severity_glyphs_and_classes() {
    assert_eq!(Severity::Info.glyph(), "ℹ️");
    assert_eq!(Severity::Success.glyph(), "✓");
    assert_eq!(Severity::Warning.glyph(), "⚠️");
    assert_eq!(Severity::Error.glyph(), "✕");
    assert_eq!(Severity::Warning.css_class(), "notification-warning");
}

#[test]
fn severity_names_are_lenient() {
    assert_eq!(Severity::from_name("WARNING"), Severity::Warning);
    assert_eq!(Severity::from_name(" success "), Severity::Success);
    assert_eq!(Severity::from_name("error"), Severity::Error);
    assert_eq!(Severity::from_name("loud"), Severity::Info);
}
