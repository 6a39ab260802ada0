use crate::model::{Level, Player};

/// Handles player physics (gravity, collision, bounce)
///
/// Arcade model: uniform gravity, axis-aligned bodies, per-axis collision
/// resolution against the level's static platforms. The step owns the
/// player's `on_ground` flag: cleared on entry, set again only by an
/// actual downward contact this frame.
pub struct PhysicsSystem {
    pub gravity: f32,
    pub max_fall_speed: f32,
}

/// Rebounds slower than this are swallowed so a resting player does not
/// micro-bounce and flicker its ground contact.
const REBOUND_CUTOFF: f32 = 30.0;

impl PhysicsSystem {
    pub fn new() -> Self {
        Self {
            gravity: 900.0,
            max_fall_speed: 1000.0,
        }
    }

    /// Advance the player by one frame against the level.
    pub fn update(&self, player: &mut Player, level: &Level, dt: f32) {
        player.on_ground = false;

        // Gravity first, then integrate (semi-implicit Euler)
        player.vel.y = (player.vel.y + self.gravity * dt).min(self.max_fall_speed);

        // X axis
        player.pos.x += player.vel.x * dt;
        for platform in &level.platforms {
            if player.body().overlaps(&platform.body) {
                if player.vel.x > 0.0 {
                    player.pos.x = platform.body.min.x - player.size.x * 0.5;
                } else if player.vel.x < 0.0 {
                    player.pos.x = platform.body.max.x + player.size.x * 0.5;
                }
                player.vel.x = 0.0;
            }
        }

        // Y axis
        player.pos.y += player.vel.y * dt;
        for platform in &level.platforms {
            if player.body().overlaps(&platform.body) {
                if player.vel.y > 0.0 {
                    // Landed on top
                    player.pos.y = platform.body.min.y - player.size.y * 0.5;
                    player.on_ground = true;
                    player.vel.y = rebound(player.vel.y, player.bounce);
                } else if player.vel.y < 0.0 {
                    // Bumped the underside
                    player.pos.y = platform.body.max.y + player.size.y * 0.5;
                    player.vel.y = 0.0;
                }
            }
        }

        self.clamp_to_bounds(player, level);
    }

    /// Keep the body inside the world on all four edges; the bottom edge
    /// counts as ground.
    fn clamp_to_bounds(&self, player: &mut Player, level: &Level) {
        let bounds = level.bounds();
        let half = player.size * 0.5;

        if player.pos.x - half.x < bounds.min.x {
            player.pos.x = bounds.min.x + half.x;
            player.vel.x = 0.0;
        } else if player.pos.x + half.x > bounds.max.x {
            player.pos.x = bounds.max.x - half.x;
            player.vel.x = 0.0;
        }

        if player.pos.y - half.y < bounds.min.y {
            player.pos.y = bounds.min.y + half.y;
            player.vel.y = 0.0;
        } else if player.pos.y + half.y > bounds.max.y {
            player.pos.y = bounds.max.y - half.y;
            player.on_ground = true;
            player.vel.y = rebound(player.vel.y, player.bounce);
        }
    }
}

fn rebound(vy: f32, bounce: f32) -> f32 {
    let r = -vy * bounce;
    if r.abs() < REBOUND_CUTOFF {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (PhysicsSystem, Level, Player) {
        let level = Level::prototype();
        let player = Player::spawn(level.spawn);
        (PhysicsSystem::new(), level, player)
    }

    fn ground_top(level: &Level) -> f32 {
        level.platforms[0].body.min.y
    }

    #[test]
    fn test_gravity_integrates_velocity() {
        let (physics, level, mut player) = setup();

        physics.update(&mut player, &level, DT);

        assert!((player.vel.y - 900.0 * DT).abs() < 1e-3);
        assert!(player.pos.y > level.spawn.y);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_fall_speed_is_clamped() {
        let (physics, level, mut player) = setup();
        player.vel.y = 5000.0;

        physics.update(&mut player, &level, DT);

        assert!(player.vel.y <= physics.max_fall_speed);
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        let (physics, level, mut player) = setup();
        let top = ground_top(&level);
        player.pos.y = top - player.size.y * 0.5 - 1.0;
        player.vel.y = 200.0;

        physics.update(&mut player, &level, DT);

        assert!(player.on_ground);
        assert_eq!(player.pos.y, top - player.size.y * 0.5);
        // A 200 px/s impact rebounds at 20 px/s, below the cutoff
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_hard_landing_bounces() {
        let (physics, level, mut player) = setup();
        let top = ground_top(&level);
        player.pos.y = top - player.size.y * 0.5 - 5.0;
        player.vel.y = 600.0;

        physics.update(&mut player, &level, DT);

        assert!(player.on_ground);
        assert!(player.vel.y < 0.0, "hard impact should rebound upward");
    }

    #[test]
    fn test_standing_player_keeps_ground_contact() {
        let (physics, level, mut player) = setup();
        let top = ground_top(&level);
        player.pos.y = top - player.size.y * 0.5;
        player.vel = Vec2::ZERO;

        for _ in 0..10 {
            physics.update(&mut player, &level, DT);
            assert!(player.on_ground);
            assert_eq!(player.pos.y, top - player.size.y * 0.5);
        }
    }

    #[test]
    fn test_jump_leaves_ground_and_lands_again() {
        let (physics, level, mut player) = setup();
        let top = ground_top(&level);
        player.pos.y = top - player.size.y * 0.5;
        player.vel.y = -550.0;

        physics.update(&mut player, &level, DT);
        assert!(!player.on_ground);
        assert!(player.pos.y < top - player.size.y * 0.5);

        let mut landed = false;
        for _ in 0..200 {
            physics.update(&mut player, &level, DT);
            if player.on_ground {
                landed = true;
                break;
            }
        }
        assert!(landed, "jump arc should come back down within 200 frames");
    }

    #[test]
    fn test_side_bounds_stop_the_player() {
        let (physics, level, mut player) = setup();
        player.pos.x = 5.0;
        player.vel.x = -160.0;

        physics.update(&mut player, &level, DT);

        assert_eq!(player.pos.x, player.size.x * 0.5);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_bottom_bound_acts_as_ground() {
        let physics = PhysicsSystem::new();
        // Empty level: nothing to land on but the world edge
        let level = Level {
            platforms: Vec::new(),
            ..Level::prototype()
        };
        let mut player = Player::spawn(Vec2::new(400.0, 580.0));
        player.vel.y = 300.0;

        physics.update(&mut player, &level, DT);

        assert!(player.on_ground);
        assert_eq!(player.pos.y, level.height - player.size.y * 0.5);
    }

    #[test]
    fn test_ceiling_zeroes_upward_velocity() {
        let (physics, level, mut player) = setup();
        player.pos.y = player.size.y * 0.5 + 1.0;
        player.vel.y = -550.0;

        physics.update(&mut player, &level, DT);

        assert_eq!(player.pos.y, player.size.y * 0.5);
        assert_eq!(player.vel.y, 0.0);
    }
}
