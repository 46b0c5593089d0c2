//! Celebration burst: hearts and confetti near the bottom of the card.
//!
//! Purely decorative. Particles carry their own lifetime and the renderer
//! removes them; nothing here feeds back into the stage machine.

use serde::{Deserialize, Serialize};

use crate::error::FxError;
use crate::sampler::Sampler;

pub const HEART_COUNT: usize = 18;
pub const CONFETTI_COUNT: usize = 22;
pub const HEART_GLYPH: &str = "❤";
pub const HEART_LIFETIME_MS: u32 = 1600;
pub const CONFETTI_LIFETIME_MS: u32 = 1700;
pub const CONFETTI_PALETTE: [&str; 3] = [
    "rgba(216,180,106,0.95)",
    "rgba(255,255,255,0.85)",
    "rgba(200,180,255,0.70)",
];

/// Bounds of the presentation surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Horizontal centre, 82% of the way down.
    pub fn burst_origin(&self) -> (f64, f64) {
        (
            self.left + self.width * 0.5,
            self.top + self.height * 0.82,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParticleKind {
    Heart { glyph: String, font_size: u32 },
    Confetti { color: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f64,
    pub y: f64,
    pub duration_ms: u32,
    pub delay_ms: u32,
    /// Renderer removes the particle after this long.
    pub lifetime_ms: u32,
}

/// Something that can draw particles over the presentation surface.
pub trait FxRenderer {
    /// Current surface bounds, `None` when layout is unavailable.
    fn surface_bounds(&self) -> Option<Rect>;

    fn spawn(&mut self, particle: Particle) -> Result<(), FxError>;

    /// Called once after a whole burst has been spawned.
    fn flush(&mut self) {}
}

/// Renderer with no layout; every burst degrades to nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFx;

impl FxRenderer for NoFx {
    fn surface_bounds(&self) -> Option<Rect> {
        None
    }

    fn spawn(&mut self, _particle: Particle) -> Result<(), FxError> {
        Ok(())
    }
}

/// Generate the particles for one burst around `bounds`.
pub fn burst_particles(bounds: Rect, sampler: &mut Sampler) -> Vec<Particle> {
    let (origin_x, origin_y) = bounds.burst_origin();
    let mut particles = Vec::with_capacity(HEART_COUNT + CONFETTI_COUNT);

    for _ in 0..HEART_COUNT {
        particles.push(Particle {
            x: origin_x + f64::from(sampler.between(-140, 140)),
            y: origin_y + f64::from(sampler.between(-10, 30)),
            kind: ParticleKind::Heart {
                glyph: HEART_GLYPH.to_string(),
                font_size: jitter(sampler, 16, 26),
            },
            duration_ms: jitter(sampler, 900, 1350),
            delay_ms: jitter(sampler, 0, 120),
            lifetime_ms: HEART_LIFETIME_MS,
        });
    }

    for _ in 0..CONFETTI_COUNT {
        let x = origin_x + f64::from(sampler.between(-160, 160));
        let y = origin_y + f64::from(sampler.between(-40, 10));
        let duration_ms = jitter(sampler, 1100, 1550);
        let delay_ms = jitter(sampler, 0, 90);
        let color = CONFETTI_PALETTE[jitter(sampler, 0, 2) as usize].to_string();
        particles.push(Particle {
            kind: ParticleKind::Confetti { color },
            x,
            y,
            duration_ms,
            delay_ms,
            lifetime_ms: CONFETTI_LIFETIME_MS,
        });
    }

    particles
}

/// Spawn a burst on `renderer`. Returns how many particles were placed.
///
/// Missing layout or spawn failures are logged and skipped.
pub fn burst_fx(renderer: &mut dyn FxRenderer, sampler: &mut Sampler) -> usize {
    let Some(bounds) = renderer.surface_bounds() else {
        tracing::debug!("no surface bounds; celebration skipped");
        return 0;
    };

    let mut spawned = 0;
    for particle in burst_particles(bounds, sampler) {
        match renderer.spawn(particle) {
            Ok(()) => spawned += 1,
            Err(e) => tracing::debug!(error = %e, "particle dropped"),
        }
    }
    renderer.flush();
    spawned
}

fn jitter(sampler: &mut Sampler, min: i32, max: i32) -> u32 {
    sampler.between(min, max).max(0) as u32
}
