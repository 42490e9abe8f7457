//! Floating background particles.

use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::SiteResult;
use crate::motion::Rng;

/// Randomized look of one particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub alpha: f64,
}

impl ParticleSpec {
    pub fn sample(rng: &mut Rng) -> Self {
        Self {
            size_px: rng.range(2.0, 6.0),
            left_pct: rng.range(0.0, 100.0),
            top_pct: rng.range(0.0, 100.0),
            duration_s: rng.range(15.0, 30.0),
            delay_s: rng.range(0.0, 10.0),
            alpha: rng.range(0.3, 0.7),
        }
    }

    pub fn style(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_string()),
            ("width", format!("{:.2}px", self.size_px)),
            ("height", format!("{:.2}px", self.size_px)),
            (
                "background",
                format!("radial-gradient(circle, rgba(45, 212, 191, {:.2}), transparent)", self.alpha),
            ),
            ("border-radius", "50%".to_string()),
            ("left", format!("{:.2}%", self.left_pct)),
            ("top", format!("{:.2}%", self.top_pct)),
            (
                "animation",
                format!("particleFloat {:.2}s {:.2}s infinite ease-in-out", self.duration_s, self.delay_s),
            ),
            ("pointer-events", "none".to_string()),
        ]
    }
}

/// Particles spawned into `#particles`; removed again on drop.
pub struct ParticleField {
    particles: Vec<HtmlElement>,
}

impl ParticleField {
    pub fn mount(document: &Document, container_id: &str, count: usize, rng: &mut Rng) -> SiteResult<Option<Self>> {
        let Some(container) = document.get_element_by_id(container_id) else {
            return Ok(None);
        };
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let particle = dom::create(document, "div", "particle")?;
            let style = ParticleSpec::sample(rng).style();
            let props: Vec<(&str, &str)> = style.iter().map(|(k, v)| (*k, v.as_str())).collect();
            dom::set_styles(&particle, &props);
            container.append_child(&particle)?;
            particles.push(particle);
        }
        tracing::debug!(count, "particles mounted");
        Ok(Some(Self { particles }))
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        for particle in self.particles.drain(..) {
            particle.remove();
        }
    }
}

pub const PARTICLE_CSS: &str = r#"
@keyframes particleFloat {
  0%, 100% { transform: translate(0, 0); opacity: 0.5; }
  25% { transform: translate(10px, -20px); opacity: 0.8; }
  50% { transform: translate(-10px, -40px); opacity: 0.6; }
  75% { transform: translate(15px, -60px); opacity: 0.4; }
}
"#;
