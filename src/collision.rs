use glam::DVec2;

/// Rotates `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(v)
}

/// Strict overlap: touching circles do not collide.
#[inline]
pub fn circles_overlap(c1: DVec2, r1: f64, c2: DVec2, r2: f64) -> bool {
    c1.distance(c2) < r1 + r2
}

/// Whether the first body is closing in on the second along the line of centres.
/// Zero counts as approaching.
#[inline]
pub fn approaching(s1: DVec2, v1: DVec2, s2: DVec2, v2: DVec2) -> bool {
    (v1 - v2).dot(s2 - s1) >= 0.0
}

/// Swaps the components of `v1` and `v2` along the line from `s1` to `s2`,
/// each body keeping its own tangential component. Masses play no part.
///
/// Returns vf1 and vf2 respectively, or `None` if the bodies are already
/// separating and nothing should change.
pub fn exchange_normal_velocities(
    v1: DVec2,
    v2: DVec2,
    s1: DVec2,
    s2: DVec2,
) -> Option<(DVec2, DVec2)> {
    if !approaching(s1, v1, s2, v2) {
        return None;
    }

    // rotates the collision normal onto the x axis
    let d = s2 - s1;
    let angle = -d.y.atan2(d.x);

    let u1 = rotate(v1, angle);
    let u2 = rotate(v2, angle);

    Some((
        rotate(DVec2::new(u2.x, u1.y), -angle),
        rotate(DVec2::new(u1.x, u2.y), -angle),
    ))
}
