//! Drawing surfaces the simulation renders onto.

use glam::DVec2;

use crate::components::Color;

/// The 2D drawing context a [`crate::world::World`] draws each frame into.
pub trait Surface {
    fn clear_rect(&mut self, origin: DVec2, width: f64, height: f64);

    /// Outline of a full circle, centred on the path.
    fn stroke_circle(&mut self, centre: DVec2, radius: f64, color: Color, line_width: f64);

    /// Text centred horizontally and vertically on `position`.
    fn fill_text(&mut self, text: &str, position: DVec2, font_size: u32, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        origin: DVec2,
        width: f64,
        height: f64,
    },
    Circle {
        centre: DVec2,
        radius: f64,
        color: Color,
        line_width: f64,
    },
    Text {
        text: String,
        position: DVec2,
        font_size: u32,
        color: Color,
    },
}

/// Keeps the current frame's draw calls in order. Used when there is no window.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, origin: DVec2, width: f64, height: f64) {
        // nothing before a clear is visible any more
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            origin,
            width,
            height,
        });
    }

    fn stroke_circle(&mut self, centre: DVec2, radius: f64, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Circle {
            centre,
            radius,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, position: DVec2, font_size: u32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            font_size,
            color,
        });
    }
}

#[cfg(feature = "window")]
pub use sfml_surface::SfmlSurface;

#[cfg(feature = "window")]
mod sfml_surface {
    use glam::DVec2;
    use sfml::graphics::{
        CircleShape, Color as SfColor, Font, RectangleShape, RenderTarget, RenderWindow, Shape,
        Text, Transformable,
    };

    use super::Surface;
    use crate::components::Color;

    /// Points used to approximate a circle outline.
    const CIRCLE_POINTS: usize = 90;

    impl From<Color> for SfColor {
        fn from(Color { r, g, b }: Color) -> Self {
            SfColor::rgb(r, g, b)
        }
    }

    /// Draws onto an SFML window. "Clearing" paints the page background, the
    /// way a cleared canvas shows the element behind it.
    pub struct SfmlSurface<'a> {
        window: &'a mut RenderWindow,
        font: &'a Font,
        background: SfColor,
    }

    impl<'a> SfmlSurface<'a> {
        pub fn new(window: &'a mut RenderWindow, font: &'a Font, background: Color) -> Self {
            Self {
                window,
                font,
                background: background.into(),
            }
        }
    }

    impl Surface for SfmlSurface<'_> {
        fn clear_rect(&mut self, origin: DVec2, width: f64, height: f64) {
            let size = self.window.size();
            if origin == DVec2::ZERO && width >= size.x as f64 && height >= size.y as f64 {
                self.window.clear(self.background);
                return;
            }

            let mut rect = RectangleShape::new();
            rect.set_position((origin.x as f32, origin.y as f32));
            rect.set_size((width as f32, height as f32));
            rect.set_fill_color(self.background);
            self.window.draw(&rect);
        }

        fn stroke_circle(&mut self, centre: DVec2, radius: f64, color: Color, line_width: f64) {
            // SFML grows outlines outwards; shrink so the stroke straddles the path
            let inner = (radius - line_width / 2.0).max(0.0) as f32;

            let mut circle = CircleShape::new(inner, CIRCLE_POINTS);
            circle.set_origin((inner, inner));
            circle.set_position((centre.x as f32, centre.y as f32));
            circle.set_fill_color(SfColor::TRANSPARENT);
            circle.set_outline_color(color.into());
            circle.set_outline_thickness(line_width as f32);

            self.window.draw(&circle);
        }

        fn fill_text(&mut self, text: &str, position: DVec2, font_size: u32, color: Color) {
            let mut label = Text::new(text, self.font, font_size);
            let bounds = label.local_bounds();
            label.set_origin((
                bounds.left + bounds.width / 2.0,
                bounds.top + bounds.height / 2.0,
            ));
            label.set_position((position.x as f32, position.y as f32));
            label.set_fill_color(color.into());

            self.window.draw(&label);
        }
    }
}
