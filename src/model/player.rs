use glam::{Mat4, Vec2, Vec3};

use crate::model::Aabb;

/// Sprite size of the blue placeholder, in world pixels.
pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);

pub const PLAYER_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// The one entity in the prototype.
///
/// `pos` is the sprite center. `on_ground` is owned by the physics step:
/// it is recomputed every frame and only read by the input controller.
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub bounce: f32,
}

impl Player {
    pub fn spawn(at: Vec2) -> Self {
        Self {
            pos: at,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            on_ground: false,
            bounce: 0.1,
        }
    }

    pub fn body(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    /// Model matrix placing the unit-centered player quad in the world.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.pos.x, self.pos.y, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawned_player_is_airborne_and_still() {
        let player = Player::spawn(Vec2::new(100.0, 450.0));
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_body_is_centered_on_pos() {
        let player = Player::spawn(Vec2::new(100.0, 450.0));
        let body = player.body();
        assert_eq!(body.center(), player.pos);
        assert_eq!(body.size(), PLAYER_SIZE);
    }
}
