use glam::Vec2;

use super::sprite::Sprite;
use crate::resources::SPRITE_SHEET;

/// Fixed travel direction of a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub dir: Direction,
    pub sprite: Sprite,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: Direction) -> Self {
        let sprite = match dir {
            Direction::Forward => {
                Sprite::still(SPRITE_SHEET, Vec2::new(0.0, 39.0), Vec2::new(18.0, 8.0))
            }
            Direction::Up | Direction::Down => {
                Sprite::still(SPRITE_SHEET, Vec2::new(0.0, 50.0), Vec2::new(9.0, 5.0))
            }
        };

        Self { pos, dir, sprite }
    }

    pub fn size(&self) -> Vec2 {
        self.sprite.size
    }

    pub fn advance(&mut self, speed: f32, dt: f32) {
        let step = speed * dt;
        match self.dir {
            Direction::Forward => self.pos.x += step,
            Direction::Up => self.pos.y -= step,
            Direction::Down => self.pos.y += step,
        }
    }

    pub fn is_out_of_bounds(&self, bounds: Vec2) -> bool {
        self.pos.y < 0.0 || self.pos.y > bounds.y || self.pos.x > bounds.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(512.0, 480.0);

    #[test]
    fn test_bullet_sizes() {
        assert_eq!(Bullet::new(Vec2::ZERO, Direction::Forward).size(), Vec2::new(18.0, 8.0));
        assert_eq!(Bullet::new(Vec2::ZERO, Direction::Up).size(), Vec2::new(9.0, 5.0));
        assert_eq!(Bullet::new(Vec2::ZERO, Direction::Down).size(), Vec2::new(9.0, 5.0));
    }

    #[test]
    fn test_bullets_move_along_direction() {
        let start = Vec2::new(100.0, 100.0);
        let mut forward = Bullet::new(start, Direction::Forward);
        let mut up = Bullet::new(start, Direction::Up);
        let mut down = Bullet::new(start, Direction::Down);

        forward.advance(500.0, 0.1);
        up.advance(500.0, 0.1);
        down.advance(500.0, 0.1);

        assert_eq!(forward.pos, Vec2::new(150.0, 100.0));
        assert_eq!(up.pos, Vec2::new(100.0, 50.0));
        assert_eq!(down.pos, Vec2::new(100.0, 150.0));
    }

    #[test]
    fn test_bullet_out_of_bounds() {
        assert!(!Bullet::new(Vec2::new(10.0, 10.0), Direction::Forward).is_out_of_bounds(BOUNDS));
        assert!(Bullet::new(Vec2::new(513.0, 10.0), Direction::Forward).is_out_of_bounds(BOUNDS));
        assert!(Bullet::new(Vec2::new(10.0, -1.0), Direction::Up).is_out_of_bounds(BOUNDS));
        assert!(Bullet::new(Vec2::new(10.0, 481.0), Direction::Down).is_out_of_bounds(BOUNDS));
        // The edges themselves are still inside
        assert!(!Bullet::new(Vec2::new(512.0, 480.0), Direction::Down).is_out_of_bounds(BOUNDS));
    }
}
