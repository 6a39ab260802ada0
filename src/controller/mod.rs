// CONTROLLER: Input, game logic, and update loop
pub mod input;
pub mod physics;
pub mod player_controller;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputState, KeyBindings};
pub use physics::PhysicsSystem;
pub use player_controller::PlayerController;
#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoopContext;
