//! Easter-egg detectors: a trailing keystroke buffer matched against a secret
//! phrase, and a click burst counter.

use std::collections::VecDeque;

/// Slot pushed for named keys (`Enter`, `Tab`, ...). It never matches.
const NAMED_KEY: char = '\0';

#[derive(Debug, Clone)]
pub struct SecretCode {
    target: Vec<char>,
    buffer: VecDeque<char>,
}

impl SecretCode {
    pub fn new(phrase: &str) -> Self {
        let target: Vec<char> = phrase.chars().map(normalize).collect();
        Self { buffer: VecDeque::with_capacity(target.len()), target }
    }

    /// Feed one `KeyboardEvent.key`. Returns `true` when the trailing keystrokes
    /// spell the phrase; the buffer is emptied in that case.
    pub fn push(&mut self, key: &str) -> bool {
        if self.target.is_empty() {
            return false;
        }
        let mut chars = key.chars();
        let slot = match (chars.next(), chars.next()) {
            (Some(c), None) => normalize(c),
            _ => NAMED_KEY,
        };
        if self.buffer.len() == self.target.len() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(slot);

        if self.buffer.iter().eq(self.target.iter()) {
            self.buffer.clear();
            return true;
        }
        false
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.target.len()
    }
}

fn normalize(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Fires when `needed` clicks land within `window_ms` of the first one.
#[derive(Debug, Clone)]
pub struct ClickBurst {
    needed: u32,
    window_ms: f64,
    count: u32,
    first_ms: f64,
}

impl ClickBurst {
    pub fn new(needed: u32, window_ms: f64) -> Self {
        Self { needed: needed.max(1), window_ms, count: 0, first_ms: 0.0 }
    }

    pub fn triple() -> Self {
        Self::new(3, 600.0)
    }

    pub fn register(&mut self, now_ms: f64) -> bool {
        if self.count == 0 || now_ms - self.first_ms > self.window_ms {
            self.count = 0;
            self.first_ms = now_ms;
        }
        self.count += 1;
        if self.count >= self.needed {
            self.count = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_never_exceeds_phrase_length() {
        let mut code = SecretCode::new("ZORO");
        for key in ["a", "b", "c", "d", "e", "f", "g"] {
            code.push(key);
            assert!(code.buffered() <= code.capacity());
        }
        assert_eq!(code.buffered(), 4);
    }

    #[test]
    fn named_keys_break_the_sequence() {
        let mut code = SecretCode::new("ZORO");
        let hits: Vec<bool> = ["z", "o", "Enter", "r", "o"].iter().map(|k| code.push(k)).collect();
        assert!(hits.iter().all(|hit| !hit));
    }

    #[test]
    fn burst_needs_clicks_inside_window() {
        let mut burst = ClickBurst::triple();
        assert!(!burst.register(0.0));
        assert!(!burst.register(200.0));
        assert!(burst.register(400.0));
        // fresh burst after firing
        assert!(!burst.register(450.0));
        assert!(!burst.register(1500.0));
        assert!(!burst.register(1600.0));
        assert!(burst.register(1700.0));
    }

    #[test]
    fn slow_clicks_never_fire() {
        let mut burst = ClickBurst::triple();
        for i in 0..10 {
            assert!(!burst.register(i as f64 * 700.0));
        }
    }
}
