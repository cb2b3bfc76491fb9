use glam::DVec2;
use rand::Rng;

use crate::body::{Body, advance};
use crate::components::{Appearance, Bounds, Color, ValueRange};
use crate::renderer::Surface;

/// Sampling ranges for newly spawned bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawner {
    pub radius: ValueRange,
    pub speed: ValueRange,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            radius: ValueRange::new(20.0, 50.0),
            speed: ValueRange::new(1.0, 5.0),
        }
    }
}

/// Owns every body of a session together with the bounds they bounce in.
#[derive(Clone, Debug)]
pub struct World {
    bodies: Vec<Body>,
    bounds: Bounds,
    appearance: Appearance,
    frame: u64,
    collisions: u64,
}

impl World {
    pub fn new(bounds: Bounds, appearance: Appearance) -> Self {
        Self {
            bodies: Vec::new(),
            bounds,
            appearance,
            frame: 0,
            collisions: 0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Number of completed steps.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total velocity exchanges since the session started.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Adds a hand-built body, e.g. for scripted scenes.
    pub fn push(&mut self, body: Body) {
        self.bodies.push(body);
    }

    /// Appends `count` random bodies, labelled on from the ones already there
    /// (`C1`, `C2`, ...).
    pub fn spawn(&mut self, count: usize, spawner: &Spawner, rng: &mut impl Rng) {
        self.bodies.reserve(count);

        for _ in 0..count {
            let radius = rng.gen_range(spawner.radius.min..spawner.radius.max);
            let position = DVec2::new(
                place_on_axis(rng, radius, self.bounds.width),
                place_on_axis(rng, radius, self.bounds.height),
            );
            let color = Color::rgb(rng.r#gen(), rng.r#gen(), rng.r#gen());
            let speed = rng.gen_range(spawner.speed.min..spawner.speed.max);
            let label = format!("C{}", self.bodies.len() + 1);

            self.bodies
                .push(Body::new(position, radius, color, label, speed, rng));
        }

        log::info!(
            "spawned {count} bodies ({} total) in {}x{}",
            self.bodies.len(),
            self.bounds.width,
            self.bounds.height
        );
    }

    /// One frame: clear the surface, then advance every body in order against
    /// the whole collection.
    pub fn step(&mut self, surface: &mut impl Surface) {
        surface.clear_rect(DVec2::ZERO, self.bounds.width, self.bounds.height);

        for index in 0..self.bodies.len() {
            let resolved = advance(
                &mut self.bodies,
                index,
                self.bounds,
                &self.appearance,
                surface,
            );
            self.collisions += resolved as u64;
        }

        self.frame += 1;
    }
}

/// Uniform in `[radius, extent - radius)`, or the middle of the axis when it
/// is too short to fit the body.
fn place_on_axis(rng: &mut impl Rng, radius: f64, extent: f64) -> f64 {
    if extent - radius <= radius {
        log::warn!("axis of {extent} cannot fit radius {radius}, centring the body");
        return extent / 2.0;
    }

    rng.gen_range(radius..extent - radius)
}
