use crate::vector::Vector2D;

/// Tuning for the lane preference stage applied to boids carrying a [`Lane`](crate::Lane)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneBias {
    /// Upper bound of a boid's bias while it keeps drifting its lane's way
    pub max_bias: f32,
    /// Per-frame bias change; also the floor the bias relaxes to
    pub bias_increment: f32,
}

impl Default for LaneBias {
    fn default() -> Self {
        Self {
            max_bias: 0.01,
            bias_increment: 0.0001,
        }
    }
}

/// Every knob the host can turn between frames.
///
/// The simulation only reads this during a step. Any value a slider can produce
/// is accepted; zero or negative ranges and factors give degenerate motion but
/// never a panic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockParams {
    /// Number of boids created by the next reset
    pub agent_count: usize,
    /// Neighbor detection radius
    pub visual_range: f32,
    /// Separation radius, expected to be at most `visual_range`
    pub protected_range: f32,
    /// Cohesion strength
    pub centering_factor: f32,
    /// Separation strength
    pub avoid_factor: f32,
    /// Alignment strength
    pub matching_factor: f32,
    /// Velocity nudge applied while outside the world rectangle
    pub turn_factor: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub follow_cursor: bool,
    pub cursor_bias: f32,
    pub cursor: Vector2D,
    pub width: f32,
    pub height: f32,
    pub lane_bias: LaneBias,
}

impl FlockParams {
    /// Defaults for a world of the given size, cursor parked in its centre
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            agent_count: 100,
            visual_range: 100.0,
            protected_range: 20.0,
            centering_factor: 0.005,
            avoid_factor: 0.05,
            matching_factor: 0.05,
            turn_factor: 1.0,
            min_speed: 2.0,
            max_speed: 4.0,
            follow_cursor: false,
            cursor_bias: 0.1,
            cursor: Vector2D::new(width / 2.0, height / 2.0),
            width,
            height,
            lane_bias: LaneBias::default(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

impl Default for FlockParams {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_centre_cursor() {
        let params = FlockParams::new(1000.0, 500.0);
        assert_eq!(params.cursor, Vector2D::new(500.0, 250.0));
        assert_eq!(params.agent_count, 100);
        assert!(params.protected_range <= params.visual_range);
        assert!(params.min_speed <= params.max_speed);
        assert!(!params.follow_cursor);
    }

    #[test]
    fn test_resize_keeps_tuning() {
        let mut params = FlockParams::default();
        params.avoid_factor = 0.2;
        params.resize(320.0, 240.0);
        assert_eq!(params.width, 320.0);
        assert_eq!(params.height, 240.0);
        assert_eq!(params.avoid_factor, 0.2);
    }
}
