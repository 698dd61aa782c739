//! The per-boid steering rules, one function per stage of a step.

use crate::boid::Boid;
use crate::params::FlockParams;
use crate::vector::Vector2D;

/// What one boid saw of the others before anybody moved
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neighborhood {
    /// Sum of `self - other` over boids inside the protected range
    pub close: Vector2D,
    /// Sum of positions of visible boids outside the protected range
    pub position_sum: Vector2D,
    /// Sum of velocities of the same boids
    pub velocity_sum: Vector2D,
    pub count: u32,
}

impl Neighborhood {
    /// Fold one other boid into the summary, using squared distances only
    pub fn observe(&mut self, boid: &Boid, other: &Boid, visual_sq: f32, protected_sq: f32) {
        let offset = boid.position - other.position;
        let distance_sq = offset.magnitude_squared();

        if distance_sq < visual_sq {
            if distance_sq < protected_sq {
                self.close += offset;
            } else {
                self.position_sum += other.position;
                self.velocity_sum += other.velocity;
                self.count += 1;
            }
        }
    }
}

/// Scan `others` (index, boid) pairs for neighbors of the boid at `index`
pub fn scan<'a, I>(index: usize, boid: &Boid, others: I, params: &FlockParams) -> Neighborhood
where
    I: IntoIterator<Item = (usize, &'a Boid)>,
{
    let visual_sq = params.visual_range * params.visual_range;
    let protected_sq = params.protected_range * params.protected_range;
    let mut hood = Neighborhood::default();

    for (other_index, other) in others {
        if other_index != index {
            hood.observe(boid, other, visual_sq, protected_sq);
        }
    }

    hood
}

/// Unit pull towards the cursor scaled by `cursor_bias`, when following and in range
pub fn cursor_attraction(boid: &Boid, params: &FlockParams) -> Vector2D {
    if !params.follow_cursor {
        return Vector2D::zero();
    }

    let toward = params.cursor - boid.position;
    let distance = toward.magnitude();

    // A boid sitting on the cursor has no direction to steer in
    if distance > 0.0 && distance < params.visual_range {
        toward / distance * params.cursor_bias
    } else {
        Vector2D::zero()
    }
}

/// Steer towards the neighbors' centre of mass, then towards their mean velocity
pub fn cohesion_and_alignment(boid: &mut Boid, hood: &Neighborhood, params: &FlockParams) {
    if hood.count == 0 {
        return;
    }

    let count = hood.count as f32;
    let centre = hood.position_sum / count;
    let mean_velocity = hood.velocity_sum / count;

    boid.velocity += (centre - boid.position) * params.centering_factor;
    boid.velocity += (mean_velocity - boid.velocity) * params.matching_factor;
}

pub fn separation(boid: &mut Boid, hood: &Neighborhood, params: &FlockParams) {
    boid.velocity += hood.close * params.avoid_factor;
}

/// Soft walls: nudge velocity back while outside `[0, width] x [0, height]`
pub fn boundary_turn(boid: &mut Boid, params: &FlockParams) {
    if boid.position.x < 0.0 {
        boid.velocity.x += params.turn_factor;
    }
    if boid.position.x > params.width {
        boid.velocity.x -= params.turn_factor;
    }
    if boid.position.y < 0.0 {
        boid.velocity.y += params.turn_factor;
    }
    if boid.position.y > params.height {
        boid.velocity.y -= params.turn_factor;
    }
}

/// Clamp the speed into `[min_speed, max_speed]`.
///
/// A velocity with no direction is sent along `+x` at `min_speed`.
pub fn limit_speed(velocity: Vector2D, min_speed: f32, max_speed: f32) -> Vector2D {
    let speed = velocity.magnitude();

    if speed.is_nan() || speed < min_speed {
        velocity
            .with_magnitude(min_speed)
            .unwrap_or(Vector2D::new(min_speed, 0.0))
    } else if speed > max_speed {
        velocity
            .with_magnitude(max_speed)
            .unwrap_or(Vector2D::new(max_speed, 0.0))
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy))
    }

    #[test]
    fn test_scan_splits_protected_and_visible() {
        let params = FlockParams::default();
        let flock = [
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(5.0, 0.0, -1.0, 0.0),
            boid_at(50.0, 0.0, 0.0, 2.0),
            boid_at(500.0, 0.0, 0.0, 9.0),
        ];

        let hood = scan(0, &flock[0], flock.iter().enumerate(), &params);

        assert_eq!(hood.close, Vector2D::new(-5.0, 0.0));
        assert_eq!(hood.count, 1);
        assert_eq!(hood.position_sum, Vector2D::new(50.0, 0.0));
        assert_eq!(hood.velocity_sum, Vector2D::new(0.0, 2.0));
    }

    #[test]
    fn test_scan_with_zero_visual_range_sees_nothing() {
        let mut params = FlockParams::default();
        params.visual_range = 0.0;
        let flock = [boid_at(0.0, 0.0, 1.0, 0.0), boid_at(0.0, 0.0, 1.0, 0.0)];

        let hood = scan(0, &flock[0], flock.iter().enumerate(), &params);
        assert_eq!(hood, Neighborhood::default());
    }

    #[test]
    fn test_cursor_attraction() {
        let mut params = FlockParams::default();
        params.cursor = Vector2D::new(30.0, 40.0);
        params.cursor_bias = 0.5;
        let boid = boid_at(0.0, 0.0, 0.0, 0.0);

        assert_eq!(cursor_attraction(&boid, &params), Vector2D::zero());

        params.follow_cursor = true;
        let pull = cursor_attraction(&boid, &params);
        assert!((pull.x - 0.3).abs() < 1e-6);
        assert!((pull.y - 0.4).abs() < 1e-6);

        params.visual_range = 50.0;
        assert_eq!(cursor_attraction(&boid, &params), Vector2D::zero());
    }

    #[test]
    fn test_cursor_on_top_of_boid() {
        let mut params = FlockParams::default();
        params.follow_cursor = true;
        params.cursor = Vector2D::new(10.0, 10.0);
        let boid = boid_at(10.0, 10.0, 1.0, 1.0);

        let pull = cursor_attraction(&boid, &params);
        assert_eq!(pull, Vector2D::zero());
    }

    #[test]
    fn test_cohesion_uses_updated_velocity_for_alignment() {
        let mut params = FlockParams::default();
        params.centering_factor = 0.1;
        params.matching_factor = 0.5;
        let mut boid = boid_at(0.0, 0.0, 0.0, 0.0);
        let hood = Neighborhood {
            close: Vector2D::zero(),
            position_sum: Vector2D::new(20.0, 0.0),
            velocity_sum: Vector2D::new(0.0, 4.0),
            count: 2,
        };

        cohesion_and_alignment(&mut boid, &hood, &params);

        // centre (10, 0) -> vx 1.0; then alignment pulls vx halfway to 0 and vy halfway to 2
        assert!((boid.velocity.x - 0.5).abs() < 1e-6);
        assert!((boid.velocity.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_boundary_turn() {
        let params = FlockParams::new(100.0, 100.0);
        let mut outside = boid_at(-10.0, 150.0, 0.0, 0.0);
        boundary_turn(&mut outside, &params);
        assert_eq!(outside.velocity, Vector2D::new(1.0, -1.0));

        let mut inside = boid_at(50.0, 50.0, 0.0, 0.0);
        boundary_turn(&mut inside, &params);
        assert_eq!(inside.velocity, Vector2D::zero());
    }

    #[test]
    fn test_limit_speed() {
        let slow = limit_speed(Vector2D::new(0.6, 0.8), 2.0, 4.0);
        assert!((slow.magnitude() - 2.0).abs() < 1e-5);

        let fast = limit_speed(Vector2D::new(30.0, 40.0), 2.0, 4.0);
        assert!((fast.magnitude() - 4.0).abs() < 1e-5);
        assert!((fast.x - 2.4).abs() < 1e-5);

        let fine = limit_speed(Vector2D::new(3.0, 0.0), 2.0, 4.0);
        assert_eq!(fine, Vector2D::new(3.0, 0.0));
    }

    #[test]
    fn test_limit_speed_from_rest() {
        let moved = limit_speed(Vector2D::zero(), 2.0, 4.0);
        assert_eq!(moved, Vector2D::new(2.0, 0.0));

        let resting = limit_speed(Vector2D::zero(), 0.0, 4.0);
        assert_eq!(resting, Vector2D::zero());
    }
}
