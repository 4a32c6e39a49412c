// Library exports for testing
pub use app::App;
pub use collision::{box_collides, collides};
pub use config::Config;
pub use entities::{Bullet, Direction, Enemy, Explosion, FrameLayout, Player, Powerup, Sprite};
pub use game::GameState;
pub use input::{HeldKeys, InputAction, InputManager, Key, KeySource};
pub use renderer::{Canvas, DrawCall, RecordingCanvas, render_scene};
pub use resources::Resources;

pub mod app;
pub mod collision;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
pub mod resources;
