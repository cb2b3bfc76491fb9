use glam::DVec2;
use rand::Rng;

use crate::collision::{circles_overlap, exchange_normal_velocities};
use crate::components::{Appearance, Bounds, Color};
use crate::renderer::Surface;
use crate::systems::{check_wall_collision, clamp_to_bounds, decay_flash, update_position};

/// One labelled circle moving at constant velocity between collisions.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    radius: f64,
    original_color: Color,
    color: Color,
    label: String,
    flash_countdown: u32,
}

impl Body {
    /// Each velocity component is drawn independently from `[-speed, speed]`.
    pub fn new(
        position: DVec2,
        radius: f64,
        color: Color,
        label: impl Into<String>,
        speed: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let velocity = DVec2::new(
            rng.gen_range(-speed..=speed),
            rng.gen_range(-speed..=speed),
        );

        Self::with_velocity(position, velocity, radius, color, label)
    }

    pub fn with_velocity(
        position: DVec2,
        velocity: DVec2,
        radius: f64,
        color: Color,
        label: impl Into<String>,
    ) -> Self {
        debug_assert!(radius > 0.0, "radius must be positive, got {radius}");

        Self {
            position,
            velocity,
            radius,
            original_color: color,
            color,
            label: label.into(),
            flash_countdown: 0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Tracked for completeness; collision response ignores it.
    pub fn mass(&self) -> f64 {
        self.radius
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn original_color(&self) -> Color {
        self.original_color
    }

    /// Colour picked at the start of the latest frame.
    pub fn display_color(&self) -> Color {
        self.color
    }

    pub fn flash_countdown(&self) -> u32 {
        self.flash_countdown
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_countdown > 0
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        circles_overlap(self.position, self.radius, other.position, other.radius)
    }

    /// Exchanges the velocity components along the line of centres and starts
    /// both flashes. Pairs that are already separating are left alone, which is
    /// what keeps the second visit of a pair in the same frame from undoing the
    /// first. Returns whether anything changed.
    pub fn resolve_collision(&mut self, other: &mut Body, flash_frames: u32) -> bool {
        let Some((v1, v2)) = exchange_normal_velocities(
            self.velocity,
            other.velocity,
            self.position,
            other.position,
        ) else {
            return false;
        };

        self.velocity = v1;
        other.velocity = v2;

        self.flash_countdown = flash_frames;
        other.flash_countdown = flash_frames;

        log::trace!("{} <-> {} collided", self.label, other.label);

        true
    }

    /// Label first, then the outline in the current display colour.
    pub fn draw(&self, appearance: &Appearance, surface: &mut impl Surface) {
        surface.fill_text(
            &self.label,
            self.position,
            appearance.font_size,
            appearance.label_color,
        );
        surface.stroke_circle(
            self.position,
            self.radius,
            self.color,
            appearance.line_width,
        );
    }
}

/// Runs one frame for `bodies[index]`: flash, collisions against every other
/// body in slice order, movement, wall reflection, clamping, then drawing.
///
/// Returns how many collisions this body resolved.
pub fn advance(
    bodies: &mut [Body],
    index: usize,
    bounds: Bounds,
    appearance: &Appearance,
    surface: &mut impl Surface,
) -> usize {
    let body = &mut bodies[index];
    body.color = decay_flash(
        &mut body.flash_countdown,
        body.original_color,
        appearance.flash_color,
    );

    let mut resolved = 0;
    for other in 0..bodies.len() {
        if other == index {
            continue;
        }

        let (this, that) = pair_mut(bodies, index, other);
        if this.overlaps(that) && this.resolve_collision(that, appearance.flash_frames) {
            resolved += 1;
        }
    }

    let body = &mut bodies[index];
    update_position(&mut body.position, body.velocity);

    // reflection and clamping both run every frame
    check_wall_collision(body.position, &mut body.velocity, body.radius, bounds);
    clamp_to_bounds(&mut body.position, body.radius, bounds);

    body.draw(appearance, surface);

    resolved
}

fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(a, b);

    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FLASH_FRAMES;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f64 = 1e-9;
    const BOUNDS: Bounds = Bounds {
        width: 400.0,
        height: 300.0,
    };

    fn body(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Body {
        Body::with_velocity(
            DVec2::new(x, y),
            DVec2::new(vx, vy),
            radius,
            Color::rgb(200, 10, 10),
            "C1",
        )
    }

    fn closing_speed(a: &Body, b: &Body, normal: DVec2) -> f64 {
        (a.velocity - b.velocity).dot(normal)
    }

    #[test]
    fn test_new_draws_velocity_within_speed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let b = Body::new(DVec2::ZERO, 20.0, Color::BLACK, "C1", 3.0, &mut rng);
            assert!(b.velocity.x.abs() <= 3.0);
            assert!(b.velocity.y.abs() <= 3.0);
            assert_eq!(b.flash_countdown(), 0);
            assert_eq!(b.display_color(), b.original_color());
        }
    }

    #[test]
    fn test_new_with_zero_speed_is_still() {
        let mut rng = StdRng::seed_from_u64(1);
        let b = Body::new(DVec2::ZERO, 20.0, Color::BLACK, "C1", 0.0, &mut rng);
        assert_eq!(b.velocity, DVec2::ZERO);
    }

    #[test]
    fn test_mass_is_radius() {
        assert_eq!(body(0.0, 0.0, 0.0, 0.0, 33.0).mass(), 33.0);
    }

    #[test]
    fn test_overlaps() {
        let a = body(100.0, 100.0, 0.0, 0.0, 20.0);
        assert!(a.overlaps(&body(130.0, 100.0, 0.0, 0.0, 20.0)));
        assert!(!a.overlaps(&body(140.0, 100.0, 0.0, 0.0, 20.0)));
        assert!(!a.overlaps(&body(200.0, 200.0, 0.0, 0.0, 20.0)));
    }

    #[test]
    fn test_head_on_swap_ignores_mass() {
        let mut a = body(100.0, 100.0, 4.0, 0.0, 20.0);
        let mut b = body(145.0, 100.0, -4.0, 0.0, 45.0);

        assert!(a.resolve_collision(&mut b, FLASH_FRAMES));

        assert!((a.velocity - DVec2::new(-4.0, 0.0)).length() < EPS);
        assert!((b.velocity - DVec2::new(4.0, 0.0)).length() < EPS);
        assert_eq!(a.flash_countdown(), FLASH_FRAMES);
        assert_eq!(b.flash_countdown(), FLASH_FRAMES);
    }

    #[test]
    fn test_resolution_stops_the_approach() {
        let mut a = body(100.0, 100.0, 3.0, 1.5, 25.0);
        let mut b = body(130.0, 120.0, -1.0, -2.0, 30.0);
        let normal = b.position - a.position;
        assert!(closing_speed(&a, &b, normal) > 0.0);

        assert!(a.resolve_collision(&mut b, FLASH_FRAMES));
        assert!(closing_speed(&a, &b, normal) <= EPS);
    }

    #[test]
    fn test_second_visit_is_a_no_op() {
        let mut a = body(100.0, 100.0, 2.0, -1.0, 25.0);
        let mut b = body(120.0, 90.0, -3.0, 0.5, 20.0);

        assert!(a.resolve_collision(&mut b, FLASH_FRAMES));
        let after_first = (a.velocity, b.velocity);

        assert!(!b.resolve_collision(&mut a, FLASH_FRAMES));
        assert_eq!((a.velocity, b.velocity), after_first);
    }

    #[test]
    fn test_separating_pair_keeps_velocities_and_does_not_flash() {
        let mut a = body(100.0, 100.0, -2.0, 0.0, 20.0);
        let mut b = body(130.0, 100.0, 2.0, 0.0, 20.0);

        assert!(!a.resolve_collision(&mut b, FLASH_FRAMES));
        assert_eq!(a.velocity, DVec2::new(-2.0, 0.0));
        assert_eq!(b.velocity, DVec2::new(2.0, 0.0));
        assert!(!a.is_flashing() && !b.is_flashing());
    }

    #[test]
    fn test_boundary_bounce() {
        let mut bodies = vec![body(389.0, 150.0, 3.0, 0.0, 10.0)];
        let mut surface = RecordingSurface::new();

        advance(&mut bodies, 0, BOUNDS, &Appearance::default(), &mut surface);

        assert_eq!(bodies[0].velocity, DVec2::new(-3.0, 0.0));
        assert_eq!(bodies[0].position, DVec2::new(390.0, 150.0));
    }

    #[test]
    fn test_body_past_left_edge_is_reflected_and_clamped() {
        let mut bodies = vec![body(5.0, 150.0, 1.0, 0.0, 10.0)];
        let mut surface = RecordingSurface::new();

        advance(&mut bodies, 0, BOUNDS, &Appearance::default(), &mut surface);

        assert_eq!(bodies[0].velocity, DVec2::new(-1.0, 0.0));
        assert_eq!(bodies[0].position.x, 10.0);
    }

    #[test]
    fn test_flash_lasts_five_frames() {
        let mut a = body(100.0, 100.0, 1.0, 0.0, 20.0);
        let mut b = body(130.0, 100.0, -1.0, 0.0, 20.0);
        let appearance = Appearance::default();
        assert!(a.resolve_collision(&mut b, appearance.flash_frames));

        // park them apart so nothing else happens
        a.position = DVec2::new(50.0, 50.0);
        a.velocity = DVec2::ZERO;
        b.position = DVec2::new(300.0, 200.0);
        b.velocity = DVec2::ZERO;

        let mut surface = RecordingSurface::new();
        for mut single in [vec![a], vec![b]] {
            for _ in 0..5 {
                advance(&mut single, 0, BOUNDS, &appearance, &mut surface);
                assert_eq!(single[0].display_color(), appearance.flash_color);
            }
            assert_eq!(single[0].flash_countdown(), 0);

            advance(&mut single, 0, BOUNDS, &appearance, &mut surface);
            assert_eq!(single[0].display_color(), single[0].original_color());
        }
    }

    #[test]
    fn test_advance_resolves_each_pair_once_per_frame() {
        let mut bodies = vec![
            body(100.0, 100.0, 2.0, 0.0, 20.0),
            body(135.0, 100.0, -2.0, 0.0, 20.0),
        ];
        let appearance = Appearance::default();
        let mut surface = RecordingSurface::new();

        let first = advance(&mut bodies, 0, BOUNDS, &appearance, &mut surface);
        let second = advance(&mut bodies, 1, BOUNDS, &appearance, &mut surface);

        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(bodies[0].velocity, DVec2::new(-2.0, 0.0));
        assert_eq!(bodies[1].velocity, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_flash_shows_from_the_next_frame() {
        let mut bodies = vec![
            body(100.0, 100.0, 2.0, 0.0, 20.0),
            body(135.0, 100.0, -2.0, 0.0, 20.0),
        ];
        let appearance = Appearance::default();
        let mut surface = RecordingSurface::new();

        advance(&mut bodies, 0, BOUNDS, &appearance, &mut surface);
        assert_eq!(bodies[0].display_color(), bodies[0].original_color());
        assert!(bodies[0].is_flashing());

        advance(&mut bodies, 1, BOUNDS, &appearance, &mut surface);
        assert_eq!(bodies[1].display_color(), appearance.flash_color);
        assert_eq!(bodies[1].flash_countdown(), FLASH_FRAMES - 1);
    }

    #[test]
    fn test_draw_emits_label_then_outline() {
        let b = body(60.0, 70.0, 0.0, 0.0, 25.0);
        let appearance = Appearance::default();
        let mut surface = RecordingSurface::new();

        b.draw(&appearance, &mut surface);

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Text {
                    text: "C1".into(),
                    position: DVec2::new(60.0, 70.0),
                    font_size: 20,
                    color: Color::BLACK,
                },
                DrawCommand::Circle {
                    centre: DVec2::new(60.0, 70.0),
                    radius: 25.0,
                    color: Color::rgb(200, 10, 10),
                    line_width: 2.0,
                },
            ]
        );
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut bodies = vec![
            body(1.0, 0.0, 0.0, 0.0, 1.0),
            body(2.0, 0.0, 0.0, 0.0, 1.0),
            body(3.0, 0.0, 0.0, 0.0, 1.0),
        ];

        let (a, b) = pair_mut(&mut bodies, 0, 2);
        assert_eq!((a.position.x, b.position.x), (1.0, 3.0));

        let (a, b) = pair_mut(&mut bodies, 2, 1);
        assert_eq!((a.position.x, b.position.x), (3.0, 2.0));
    }
}
