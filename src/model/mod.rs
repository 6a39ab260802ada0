// MODEL: Game state and data
pub mod camera;
pub mod level;
pub mod player;

pub use camera::Camera;
pub use level::{Aabb, Level, Platform};
pub use player::Player;
