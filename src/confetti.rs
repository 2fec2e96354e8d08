use crate::utils::hsl_to_rgb;
use rand::Rng;
use ratatui::style::Color;
use std::time::{Duration, Instant};

pub const PARTICLE_COUNT: usize = 150;
pub const CONFETTI_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    /// Grows downwards; the renderer flips it.
    pub y: f64,
    pub radius: f64,
    pub speed: f64,
    pub tilt: f64,
    pub color: Color,
}

/// Celebration shown when a quiz completes. Stops after `CONFETTI_DURATION` no matter
/// where the particles are.
#[derive(Debug, Clone)]
pub struct Confetti {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    started_at: Instant,
    finished: bool,
}

impl Confetti {
    pub fn launch<R: Rng + ?Sized>(width: f64, height: f64, now: Instant, rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: rng.gen_range(0.0..width.max(1.0)),
                y: rng.gen_range(-height.max(1.0)..0.0),
                radius: rng.gen_range(0.5..2.0),
                speed: rng.gen_range(0.5..1.0),
                tilt: rng.gen_range(-10.0..0.0),
                color: hsl_to_rgb(rng.gen_range(0.0..360.0), 1.0, 0.5),
            })
            .collect();

        Self {
            particles,
            width,
            height,
            started_at: now,
            finished: false,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one frame. Returns `false` once the animation is over and the surface is clear.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.finished {
            return false;
        }
        if now.duration_since(self.started_at) >= CONFETTI_DURATION {
            self.finished = true;
            self.particles.clear();
            return false;
        }

        for p in &mut self.particles {
            p.y += p.speed;
            p.x += p.tilt.sin();
            if p.y > self.height {
                p.y = -10.0;
            }
        }
        true
    }
}
