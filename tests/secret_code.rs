// Host-side tests for the easter-egg detectors.

use zoro_site::{ClickBurst, SecretCode};

fn activations(code: &mut SecretCode, keys: &[&str]) -> usize {
    keys.iter().filter(|k| code.push(k)).count()
}

#[test]
fn phrase_in_any_case_activates_once_and_clears_the_buffer() {
    for keys in [["z", "o", "r", "o"], ["Z", "O", "R", "O"], ["z", "O", "r", "O"]] {
        let mut code = SecretCode::new("ZORO");
        assert_eq!(activations(&mut code, &keys), 1);
        assert_eq!(code.buffered(), 0);
    }
}

#[test]
fn typo_followed_by_the_phrase_still_activates() {
    let mut code = SecretCode::new("ZORO");
    assert_eq!(activations(&mut code, &["z", "o", "r", "x", "z", "o", "r", "o"]), 1);
    assert_eq!(code.buffered(), 0);
}

#[test]
fn only_the_trailing_keystrokes_count() {
    // no four-key window of z-o-r-x-o-r-o spells the phrase
    let mut code = SecretCode::new("ZORO");
    assert_eq!(activations(&mut code, &["z", "o", "r", "x", "o", "r", "o"]), 0);
    assert_eq!(code.buffered(), 4);
}

#[test]
fn phrase_can_be_entered_again_after_activation() {
    let mut code = SecretCode::new("ZORO");
    let keys = ["z", "o", "r", "o", "z", "o", "r", "o"];
    assert_eq!(activations(&mut code, &keys), 2);
}

#[test]
fn named_keys_break_the_sequence() {
    let mut code = SecretCode::new("ZORO");
    assert_eq!(activations(&mut code, &["z", "o", "Shift", "r", "o"]), 0);
}

#[test]
fn empty_phrase_never_activates() {
    let mut code = SecretCode::new("");
    assert_eq!(activations(&mut code, &["", "a"]), 0);
}

#[test]
fn three_quick_logo_clicks_activate() {
    let mut burst = ClickBurst::triple();
    assert!(!burst.register(0.0));
    assert!(!burst.register(200.0));
    assert!(burst.register(400.0));
    // counter starts over afterwards
    assert!(!burst.register(500.0));
}

#[test]
fn slow_logo_clicks_do_not_activate() {
    let mut burst = ClickBurst::triple();
    assert!(!burst.register(0.0));
    assert!(!burst.register(400.0));
    assert!(!burst.register(900.0));
    assert!(!burst.register(1100.0));
    assert!(burst.register(1300.0));
}
