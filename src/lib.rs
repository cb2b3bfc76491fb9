//! Bouncing Circles - labelled circles drifting around a window, bouncing off
//! its edges and off each other, flashing on every hit.
//!
//! Core modules:
//! - `body`: one circle and its per-frame step
//! - `world`: all circles of a session plus the bounds; spawning and stepping
//! - `collision`: overlap test and velocity exchange along the collision normal
//! - `renderer`: drawing surfaces (SFML window, headless recorder)
//! - `engine`: frame drivers
//! - `settings`: JSON session settings

pub mod body;
pub mod collision;
pub mod components;
pub mod engine;
pub mod renderer;
pub mod settings;
pub mod systems;
pub mod world;

pub use body::{Body, advance};
pub use components::{Appearance, Bounds, Color, ValueRange};
pub use renderer::{DrawCommand, RecordingSurface, Surface};
pub use settings::{Settings, SettingsError};
pub use world::{Spawner, World};
