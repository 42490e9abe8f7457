//! Global keyboard shortcuts.
//!
//! Chords are matched on `KeyboardEvent.code`, the physical key, so the same
//! keys work whatever character the layout or the Option modifier produces.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    JumpToTop,
    DismissNotifications,
    /// Index into `SiteConfig::section_anchors`.
    Section(usize),
}

/// The parts of a `keydown` event the resolver looks at.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyChord<'a> {
    /// `KeyboardEvent.code`, e.g. `Digit1`, `ArrowUp`, `Escape`.
    pub code: &'a str,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl<'a> KeyChord<'a> {
    pub fn plain(code: &'a str) -> Self {
        Self { code, ..Default::default() }
    }

    pub fn alt(code: &'a str) -> Self {
        Self { code, alt: true, ..Default::default() }
    }
}

/// Map a chord to a shortcut. Section digits beyond `sections` resolve to nothing.
pub fn resolve(chord: KeyChord<'_>, sections: usize) -> Option<Shortcut> {
    if chord.ctrl || chord.meta {
        return None;
    }
    match (chord.code, chord.alt) {
        ("Escape", false) => Some(Shortcut::DismissNotifications),
        ("ArrowUp", true) => Some(Shortcut::JumpToTop),
        (code, true) => {
            let index = section_digit(code)?;
            (index < sections).then_some(Shortcut::Section(index))
        }
        _ => None,
    }
}

/// `Digit1..Digit3` and their numpad twins, as zero-based section indices.
fn section_digit(code: &str) -> Option<usize> {
    let digit = code.strip_prefix("Digit").or_else(|| code.strip_prefix("Numpad"))?;
    match digit {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        _ => None,
    }
}

/// Typing into form fields never triggers shortcuts.
pub fn is_text_entry(tag_name: &str) -> bool {
    matches!(tag_name.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_dismisses() {
        assert_eq!(resolve(KeyChord::plain("Escape"), 3), Some(Shortcut::DismissNotifications));
    }

    #[test]
    fn alt_arrow_up_jumps_to_top() {
        assert_eq!(resolve(KeyChord::alt("ArrowUp"), 3), Some(Shortcut::JumpToTop));
        assert_eq!(resolve(KeyChord::plain("ArrowUp"), 3), None);
    }

    #[test]
    fn digits_map_to_configured_sections() {
        assert_eq!(resolve(KeyChord::alt("Digit1"), 3), Some(Shortcut::Section(0)));
        assert_eq!(resolve(KeyChord::alt("Digit3"), 3), Some(Shortcut::Section(2)));
        assert_eq!(resolve(KeyChord::alt("Numpad2"), 3), Some(Shortcut::Section(1)));
        assert_eq!(resolve(KeyChord::alt("Digit3"), 2), None);
        assert_eq!(resolve(KeyChord::alt("Digit4"), 3), None);
        assert_eq!(resolve(KeyChord::plain("Digit1"), 3), None);
    }

    #[test]
    fn characters_are_not_codes() {
        // what `key` reports for Option+1 on macOS and for the 1 key on AZERTY
        assert_eq!(resolve(KeyChord::alt("¡"), 3), None);
        assert_eq!(resolve(KeyChord::alt("&"), 3), None);
        assert_eq!(resolve(KeyChord::alt("1"), 3), None);
    }

    #[test]
    fn ctrl_and_meta_are_left_to_the_browser() {
        let chord = KeyChord { code: "Digit1", alt: true, ctrl: true, meta: false };
        assert_eq!(resolve(chord, 3), None);
        let chord = KeyChord { code: "Escape", alt: false, ctrl: false, meta: true };
        assert_eq!(resolve(chord, 3), None);
    }

    #[test]
    fn form_fields_are_text_entry() {
        assert!(is_text_entry("input"));
        assert!(is_text_entry("TEXTAREA"));
        assert!(!is_text_entry("A"));
    }
}
