use glam::Mat4;

/// Fixed orthographic camera over the whole level.
///
/// The world is y-down (screen coordinates); the projection flips y once so
/// gameplay code never has to think about clip space.
pub struct Camera {
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec4, Vec4Swizzles};

    #[test]
    fn test_world_corners_map_to_clip_corners() {
        let camera = Camera::new(800.0, 600.0);
        let vp = camera.view_proj();

        // Top-left of the world lands in the top-left of clip space
        let tl = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((tl.xy() - glam::Vec2::new(-1.0, 1.0)).length() < 1e-5);

        // Bottom-right lands in the bottom-right
        let br = vp * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((br.xy() - glam::Vec2::new(1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_world_center_maps_to_origin() {
        let camera = Camera::new(800.0, 600.0);
        let c = camera.view_proj() * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!(c.xy().length() < 1e-5);
    }
}
