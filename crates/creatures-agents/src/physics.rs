//! Motion integration, collision tests and offspring placement.
//!
//! Positions are footprint centers. The heading convention is screen
//! space: angle 0 faces right, 90 faces up (toward smaller `y`).

use creatures_types::{Footprint, Motion, Vec2};

/// Advance `motion` by one move step of length `dt`.
///
/// Forward speed grows by `acceleration * dt` and is capped at
/// `max_velocity`. Non-zero steering turns the heading with an angular
/// velocity of `speed / (height / sin(steering))`. Steering is clamped to
/// `max_steering` first.
pub fn step(motion: &mut Motion, footprint: Footprint, dt: f64) {
    let cap = motion.max_velocity.abs();
    motion.velocity.x = motion
        .acceleration
        .mul_add(dt, motion.velocity.x)
        .max(-cap)
        .min(cap);

    let steer_cap = motion.max_steering.abs();
    motion.steering = motion.steering.max(-steer_cap).min(steer_cap);

    let angular_velocity = if motion.steering.abs() > f64::EPSILON {
        let turning_radius = f64::from(footprint.height) / motion.steering.to_radians().sin();
        motion.velocity.x / turning_radius
    } else {
        0.0
    };

    motion.position = motion
        .position
        .add(motion.velocity.rotate(-motion.angle).scale(dt));
    motion.angle = angular_velocity
        .to_degrees()
        .mul_add(dt, motion.angle)
        .rem_euclid(360.0);
}

/// Whether two footprints centered at `a` and `b` overlap. Touching edges
/// do not count.
pub fn overlaps(a: Vec2, a_size: Footprint, b: Vec2, b_size: Footprint) -> bool {
    let reach_x = (f64::from(a_size.width) + f64::from(b_size.width)) / 2.0;
    let reach_y = (f64::from(a_size.height) + f64::from(b_size.height)) / 2.0;
    (a.x - b.x).abs() < reach_x && (a.y - b.y).abs() < reach_y
}

/// Where to put an offspring: `(width, width)` away from the parent,
/// rotated by `heading` degrees.
pub fn offspring_position(parent: Vec2, offspring: Footprint, heading: f64) -> Vec2 {
    let dist = f64::from(offspring.width);
    parent.add(Vec2::new(dist, dist).rotate(heading))
}
