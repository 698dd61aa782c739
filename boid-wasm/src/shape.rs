use boid_core::BoidView;

/// Nose-to-centre distance of a drawn boid, in pixels
pub const BOID_SIZE: f64 = 5.0;

/// Corners of the triangle for one boid, nose first, pointing along its heading
pub fn triangle(view: &BoidView, size: f64) -> [(f64, f64); 3] {
    let (sin, cos) = (view.heading as f64).sin_cos();
    let cx = view.position.x as f64;
    let cy = view.position.y as f64;

    let place = |x: f64, y: f64| (cx + x * cos - y * sin, cy + x * sin + y * cos);

    [
        place(size, 0.0),
        place(-size / 2.0, size / 2.0),
        place(-size / 2.0, -size / 2.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use boid_core::Vector2D;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5
    }

    #[test]
    fn test_triangle_points_east() {
        let view = BoidView {
            position: Vector2D::new(10.0, 20.0),
            heading: 0.0,
        };
        let [nose, left, right] = triangle(&view, 4.0);

        assert!(close(nose, (14.0, 20.0)));
        assert!(close(left, (8.0, 22.0)));
        assert!(close(right, (8.0, 18.0)));
    }

    #[test]
    fn test_triangle_follows_heading() {
        let view = BoidView {
            position: Vector2D::zero(),
            heading: core::f32::consts::FRAC_PI_2,
        };
        let [nose, _, _] = triangle(&view, 2.0);

        assert!(close(nose, (0.0, 2.0)));
    }
}
