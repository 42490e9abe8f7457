//! Timing helpers shared by the effects: easing curves, tweens, throttling and a
//! tiny random source.

/// `1 - (1 - t)^3`, clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Fraction of `duration_ms` elapsed since `start_ms`, clamped to `[0, 1]`.
pub fn progress(start_ms: f64, now_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

/// Counter tween value: eases from zero toward `target`, landing exactly on it.
pub fn counter_value(target: i64, progress: f64) -> i64 {
    if progress >= 1.0 {
        return target;
    }
    (target as f64 * ease_out_cubic(progress)).floor() as i64
}

pub fn lerp(from: f64, to: f64, factor: f64) -> f64 {
    from + (to - from) * factor
}

/// Compact human number: `1234 -> 1.23K`, `2_500_000 -> 2.50M`.
pub fn format_compact(value: i64) -> String {
    let v = value as f64;
    if value >= 1_000_000_000 {
        format!("{:.2}B", v / 1_000_000_000.0)
    } else if value >= 1_000_000 {
        format!("{:.2}M", v / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.2}K", v / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Leading-edge throttle: the first call passes, later calls are dropped until
/// `limit_ms` has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self { limit_ms, last_ms: None }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.limit_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// xorshift64* generator; good enough for scattering particles.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn seeded(seed: u64) -> Self {
        // xorshift gets stuck on zero
        Self { state: seed.max(1) }
    }

    /// Seed from the browser crypto source when available, else from the clock.
    pub fn from_entropy() -> Self {
        #[cfg(feature = "rng")]
        {
            let mut bytes = [0u8; 8];
            if getrandom::getrandom(&mut bytes).is_ok() {
                return Self::seeded(u64::from_le_bytes(bytes));
            }
        }
        Self::seeded(clock_seed())
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        let x = self.state.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (x >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now * 1000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}

/// `performance.now()` or zero outside a browser.
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_endpoints_and_monotonic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = ease_out_cubic(i as f64 / 1000.0);
            assert!(v >= prev, "ease_out_cubic decreased at step {i}");
            prev = v;
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_around_half() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        for t in [0.1, 0.2, 0.3, 0.45] {
            let sum = ease_in_out_cubic(t) + ease_in_out_cubic(1.0 - t);
            assert!((sum - 1.0).abs() < 1e-9, "asymmetric at {t}");
        }
    }

    #[test]
    fn counter_lands_on_target() {
        assert_eq!(counter_value(1200, 0.0), 0);
        assert_eq!(counter_value(1200, 1.0), 1200);
        assert!(counter_value(1200, 0.5) > 600);
        assert!(counter_value(1200, 0.99) <= 1200);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(progress(100.0, 50.0, 200.0), 0.0);
        assert_eq!(progress(100.0, 200.0, 200.0), 0.5);
        assert_eq!(progress(100.0, 900.0, 200.0), 1.0);
        assert_eq!(progress(100.0, 100.0, 0.0), 1.0);
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1_500), "1.50K");
        assert_eq!(format_compact(3_200_000), "3.20M");
        assert_eq!(format_compact(1_110_000_000), "1.11B");
    }

    #[test]
    fn throttle_drops_calls_inside_window() {
        let mut t = Throttle::new(100.0);
        assert!(t.ready(0.0));
        assert!(!t.ready(50.0));
        assert!(!t.ready(99.9));
        assert!(t.ready(100.0));
        assert!(!t.ready(150.0));
    }

    #[test]
    fn rng_stays_in_range() {
        let mut rng = Rng::seeded(7);
        for _ in 0..500 {
            let v = rng.range(2.0, 6.0);
            assert!((2.0..6.0).contains(&v), "{v} out of range");
        }
        assert_eq!(Rng::seeded(0).next_f64(), Rng::seeded(1).next_f64());
    }
}
