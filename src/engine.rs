//! Frame drivers. Each calls [`World::step`] once per frame until it stops.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::components::Bounds;
use crate::renderer::RecordingSurface;
use crate::settings::{Settings, WindowSize};
use crate::world::World;

/// Viewport used when running without a window and no size is configured.
pub const HEADLESS_SIZE: WindowSize = WindowSize {
    width: 1920,
    height: 1080,
};

/// Frames between statistics lines in the log.
const REPORT_EVERY: u64 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub collisions: u64,
    pub bodies: usize,
}

impl SessionStats {
    fn of(world: &World) -> Self {
        Self {
            frames: world.frame(),
            collisions: world.collisions(),
            bodies: world.bodies().len(),
        }
    }
}

/// Spawns the configured bodies into a fresh world of the given bounds.
pub fn build_world(settings: &Settings, bounds: Bounds) -> World {
    let mut rng = match settings.seed {
        Some(seed) => {
            log::info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut world = World::new(bounds, settings.appearance());
    world.spawn(settings.count, &settings.spawner(), &mut rng);
    world
}

/// Steps a world `frames` times without opening a window.
pub fn run_headless(settings: &Settings, frames: u64) -> SessionStats {
    let size = settings.window.unwrap_or(HEADLESS_SIZE);
    let mut world = build_world(settings, Bounds::new(size.width as f64, size.height as f64));
    let mut surface = RecordingSurface::new();

    for _ in 0..frames {
        world.step(&mut surface);

        if world.frame() % REPORT_EVERY == 0 {
            log::debug!(
                "frame {}: {} collisions so far",
                world.frame(),
                world.collisions()
            );
        }
    }

    let stats = SessionStats::of(&world);
    log::info!(
        "headless run finished: {} frames, {} bodies, {} collisions",
        stats.frames,
        stats.bodies,
        stats.collisions
    );
    stats
}

#[cfg(feature = "window")]
pub use window::run;

#[cfg(feature = "window")]
mod window {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result, anyhow};
    use sfml::graphics::{Font, RenderTarget, RenderWindow};
    use sfml::window::{ContextSettings, Event, Style, VideoMode};

    use super::{SessionStats, build_world};
    use crate::components::Bounds;
    use crate::renderer::SfmlSurface;
    use crate::settings::Settings;

    const TITLE: &str = "Bouncing Circles";

    /// Tried in order when no font is configured.
    const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    fn font_path(settings: &Settings) -> Result<PathBuf> {
        if let Some(path) = &settings.font {
            return Ok(path.clone());
        }

        FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("no label font found, set \"font\" in the settings file"))
    }

    /// Opens the window and runs until it is closed.
    pub fn run(settings: &Settings) -> Result<SessionStats> {
        let path = font_path(settings)?;
        let path_str = path
            .to_str()
            .with_context(|| format!("font path {} is not valid UTF-8", path.display()))?;
        let mut font = Font::from_file(path_str)
            .map_err(|e| anyhow!("failed to load font {}: {e:?}", path.display()))?;
        font.set_smooth(true);

        let mode = match settings.window {
            Some(size) => VideoMode::new(size.width, size.height, 32),
            None => VideoMode::desktop_mode(),
        };

        let mut window = RenderWindow::new(
            mode,
            TITLE,
            Style::CLOSE,
            &ContextSettings {
                antialiasing_level: 4,
                ..Default::default()
            },
        )
        .map_err(|e| anyhow!("failed to create window: {e:?}"))?;

        window.set_vertical_sync_enabled(settings.vsync);
        if let Some(limit) = settings.frame_limit {
            window.set_framerate_limit(limit);
        }

        // bounds are fixed for the session even if the window manager resizes us
        let size = window.size();
        let mut world = build_world(settings, Bounds::new(size.x as f64, size.y as f64));

        let mut last_report = Instant::now();
        let mut frames_since_report = 0u32;

        while window.is_open() {
            while let Some(event) = window.poll_event() {
                if let Event::Closed = event {
                    window.close();
                }
            }

            world.step(&mut SfmlSurface::new(
                &mut window,
                &font,
                settings.background,
            ));
            window.display();

            frames_since_report += 1;
            let elapsed = last_report.elapsed();
            if elapsed >= Duration::from_secs(1) {
                log::debug!(
                    "FPS: {:.0}, collisions: {}",
                    frames_since_report as f64 / elapsed.as_secs_f64(),
                    world.collisions()
                );
                last_report = Instant::now();
                frames_since_report = 0;
            }
        }

        let stats = SessionStats::of(&world);
        log::info!(
            "window closed after {} frames, {} collisions",
            stats.frames,
            stats.collisions
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_run_counts_frames() {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };

        let stats = run_headless(&settings, 120);
        assert_eq!(stats.frames, 120);
        assert_eq!(stats.bodies, 10);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let settings = Settings {
            seed: Some(2024),
            count: 30,
            ..Default::default()
        };

        assert_eq!(run_headless(&settings, 300), run_headless(&settings, 300));
    }

    #[test]
    fn test_build_world_uses_window_size_as_bounds() {
        let settings = Settings {
            seed: Some(1),
            count: 3,
            ..Default::default()
        };

        let world = build_world(&settings, Bounds::new(800.0, 600.0));
        assert_eq!(world.bounds(), Bounds::new(800.0, 600.0));
        assert_eq!(world.bodies().len(), 3);
    }
}
