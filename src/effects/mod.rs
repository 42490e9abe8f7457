//! Cosmetic effects. Each one mounts on its own, skips itself when the page has
//! no matching markup, and tears down its listeners when dropped.

pub mod cursor;
pub mod easter_egg;
pub mod parallax;
pub mod particles;
pub mod quotes;
pub mod reveal;
pub mod ripple;
pub mod scroll;

use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::dom::StyleRegistry;
use crate::error::SiteResult;
use crate::motion::Rng;

pub struct Effects {
    particles: Option<particles::ParticleField>,
    reveal: Option<reveal::RevealObserver>,
    scroll: Option<scroll::ScrollEffects>,
    parallax: Option<parallax::Parallax>,
    cursor: Option<cursor::CursorFollower>,
    ripples: Option<ripple::Ripples>,
    quotes: Option<quotes::QuoteRotator>,
}

/// Log and drop a failed mount; decoration never blocks startup.
fn settle<T>(name: &str, result: SiteResult<Option<T>>) -> Option<T> {
    match result {
        Ok(effect) => {
            tracing::debug!(effect = name, mounted = effect.is_some(), "effect mount");
            effect
        }
        Err(err) => {
            tracing::warn!(effect = name, %err, "effect skipped");
            None
        }
    }
}

impl Effects {
    pub fn mount(window: &Window, document: &Document, styles: &mut StyleRegistry, config: &SiteConfig) -> Self {
        if let Err(err) = styles
            .ensure(document, "particle-styles", particles::PARTICLE_CSS)
            .and_then(|_| styles.ensure(document, "ripple-styles", ripple::RIPPLE_CSS))
        {
            tracing::warn!(%err, "effect styles not injected");
        }

        let mut rng = Rng::from_entropy();
        Self {
            particles: settle(
                "particles",
                particles::ParticleField::mount(document, "particles", config.particle_count, &mut rng),
            ),
            reveal: settle("reveal", reveal::RevealObserver::mount(document).map(Some)),
            scroll: settle(
                "scroll",
                scroll::ScrollEffects::mount(
                    window,
                    document,
                    config.scroll_threshold,
                    config.header_shade_offset,
                    config.hash_scroll_delay_ms,
                )
                .map(Some),
            ),
            parallax: settle("parallax", parallax::Parallax::mount(window, document)),
            cursor: settle("cursor", cursor::CursorFollower::mount(window, document)),
            ripples: settle("ripple", ripple::Ripples::mount(document)),
            quotes: settle(
                "quotes",
                quotes::QuoteRotator::mount(document, &config.quotes, config.quote_interval_ms),
            ),
        }
    }

    pub fn mounted(&self) -> usize {
        [
            self.particles.is_some(),
            self.reveal.is_some(),
            self.scroll.is_some(),
            self.parallax.is_some(),
            self.cursor.is_some(),
            self.ripples.is_some(),
            self.quotes.is_some(),
        ]
        .into_iter()
        .filter(|m| *m)
        .count()
    }
}
