mod bullet;
mod enemy;
mod explosion;
mod player;
mod sprite;

// Re-export all public types
pub use bullet::{Bullet, Direction};
pub use enemy::Enemy;
pub use explosion::Explosion;
pub use player::{Player, Powerup};
pub use sprite::{FrameLayout, Sprite};
