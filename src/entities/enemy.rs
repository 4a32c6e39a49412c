use glam::Vec2;

use super::sprite::Sprite;
use crate::resources::SPRITE_SHEET;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub sprite: Sprite,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            sprite: Sprite::animated(
                SPRITE_SHEET,
                Vec2::new(0.0, 78.0),
                Vec2::new(80.0, 39.0),
                6.0,
                &[0, 1, 2, 3, 2, 1],
            ),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.sprite.size
    }

    /// Drifts left at `speed` pixels per second
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.x -= speed * dt;
    }

    /// True once the right edge has passed the left side of the surface
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size().x < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_new() {
        let enemy = Enemy::new(Vec2::new(512.0, 100.0));
        assert_eq!(enemy.size(), Vec2::new(80.0, 39.0));
        assert!(!enemy.sprite.once);
        assert_eq!(enemy.sprite.frames.len(), 6);
    }

    #[test]
    fn test_enemy_moves_left() {
        let mut enemy = Enemy::new(Vec2::new(512.0, 100.0));
        enemy.advance(100.0, 0.5);
        assert_eq!(enemy.pos, Vec2::new(462.0, 100.0));
    }

    #[test]
    fn test_enemy_leaves_screen_by_right_edge() {
        let mut enemy = Enemy::new(Vec2::new(-80.0, 100.0));
        assert!(!enemy.is_off_screen());

        enemy.advance(100.0, 0.01);
        assert!(enemy.is_off_screen());
    }
}
