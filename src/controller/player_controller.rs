use crate::controller::{InputProcessor, InputState};
use crate::model::Player;

/// Per-frame input-to-velocity controller.
///
/// Runs once per frame before the physics step. It only writes velocity:
/// vx is set outright from the held direction keys, vy is touched only by
/// a fresh jump press while the player has ground contact. Everything
/// else about vy belongs to gravity in the physics step.
pub struct PlayerController {
    pub run_speed: f32,
    pub jump_velocity: f32,
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            run_speed: 160.0,
            // y grows downward, so the jump impulse is negative
            jump_velocity: -550.0,
        }
    }

    pub fn update(&self, player: &mut Player, input: &InputState, processor: &InputProcessor) {
        if processor.jump_just_pressed(input) && player.on_ground {
            player.vel.y = self.jump_velocity;
        }

        // Left wins when both directions are held
        if processor.is_moving_left(input) {
            player.vel.x = -self.run_speed;
        } else if processor.is_moving_right(input) {
            player.vel.x = self.run_speed;
        } else {
            player.vel.x = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InputEvent;
    use glam::Vec2;

    fn setup() -> (PlayerController, InputState, InputProcessor, Player) {
        (
            PlayerController::new(),
            InputState::new(),
            InputProcessor::default(),
            Player::spawn(Vec2::new(100.0, 450.0)),
        )
    }

    fn press(input: &mut InputState, key: &str) {
        input.process_event(&InputEvent::KeyDown(key.to_string()));
    }

    #[test]
    fn test_fresh_jump_on_ground_sets_impulse() {
        let (controller, mut input, processor, mut player) = setup();
        player.on_ground = true;

        press(&mut input, " ");
        controller.update(&mut player, &input, &processor);

        assert_eq!(player.vel.y, -550.0);
    }

    #[test]
    fn test_held_jump_does_not_retrigger() {
        let (controller, mut input, processor, mut player) = setup();
        player.on_ground = true;

        press(&mut input, " ");
        controller.update(&mut player, &input, &processor);
        input.end_frame();

        // The impulse fired; pretend gravity has eaten some of it
        player.vel.y = -300.0;
        controller.update(&mut player, &input, &processor);
        assert_eq!(player.vel.y, -300.0);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let (controller, mut input, processor, mut player) = setup();
        player.on_ground = false;
        player.vel.y = 120.0;

        press(&mut input, "ArrowLeft");
        press(&mut input, " ");
        controller.update(&mut player, &input, &processor);

        assert_eq!(player.vel.x, -160.0);
        assert_eq!(player.vel.y, 120.0, "vy must be untouched while airborne");
    }

    #[test]
    fn test_left_wins_over_right() {
        let (controller, mut input, processor, mut player) = setup();

        press(&mut input, "ArrowLeft");
        press(&mut input, "ArrowRight");
        controller.update(&mut player, &input, &processor);

        assert_eq!(player.vel.x, -160.0);
    }

    #[test]
    fn test_right_held_moves_right() {
        let (controller, mut input, processor, mut player) = setup();

        press(&mut input, "ArrowRight");
        controller.update(&mut player, &input, &processor);

        assert_eq!(player.vel.x, 160.0);
    }

    #[test]
    fn test_no_keys_stops_horizontal_motion() {
        let (controller, input, processor, mut player) = setup();
        player.vel.x = 160.0;

        controller.update(&mut player, &input, &processor);

        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_controller_leaves_vy_alone_without_jump() {
        let (controller, mut input, processor, mut player) = setup();
        player.on_ground = true;
        player.vel.y = 42.0;

        press(&mut input, "ArrowRight");
        controller.update(&mut player, &input, &processor);

        assert_eq!(player.vel.y, 42.0);
    }
}
