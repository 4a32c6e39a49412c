use glam::Vec2;

use super::bullet::{Bullet, Direction};
use super::sprite::Sprite;
use crate::input::{Key, KeySource};
use crate::resources::SPRITE_SHEET;

/// Gap between the two barrels of the double shot
const DOUBLE_SHOT_SPREAD: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Powerup {
    #[default]
    None,
    Double,
    Sides,
}

impl Powerup {
    /// Tier unlocked by `score`
    pub fn for_score(score: u32, double_threshold: u32, sides_threshold: u32) -> Self {
        if score > sides_threshold {
            Powerup::Sides
        } else if score > double_threshold {
            Powerup::Double
        } else {
            Powerup::None
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Powerup::None => "Single",
            Powerup::Double => "Double",
            Powerup::Sides => "Sides",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub powerup: Powerup,
    pub sprite: Sprite,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            powerup: Powerup::None,
            sprite: Sprite::animated(
                SPRITE_SHEET,
                Vec2::ZERO,
                Vec2::new(39.0, 39.0),
                16.0,
                &[0, 1],
            ),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.sprite.size
    }

    /// Moves by `speed * dt` along each axis whose keys are held. Opposing
    /// keys are applied independently and cancel out.
    pub fn steer(&mut self, keys: &dyn KeySource, speed: f32, dt: f32) {
        let step = speed * dt;

        if keys.is_down(Key::Down) || keys.is_down(Key::S) {
            self.pos.y += step;
        }
        if keys.is_down(Key::Up) || keys.is_down(Key::W) {
            self.pos.y -= step;
        }
        if keys.is_down(Key::Left) || keys.is_down(Key::A) {
            self.pos.x -= step;
        }
        if keys.is_down(Key::Right) || keys.is_down(Key::D) {
            self.pos.x += step;
        }
    }

    /// Keeps the whole sprite inside a `bounds`-sized surface
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let max = (bounds - self.size()).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    /// Bullets produced by one trigger pull at the current powerup tier
    pub fn shot_set(&self) -> Vec<Bullet> {
        let muzzle = self.pos + self.size() / 2.0;

        match self.powerup {
            Powerup::None => vec![Bullet::new(muzzle, Direction::Forward)],
            Powerup::Double => vec![
                Bullet::new(muzzle - Vec2::new(0.0, DOUBLE_SHOT_SPREAD), Direction::Forward),
                Bullet::new(muzzle + Vec2::new(0.0, DOUBLE_SHOT_SPREAD), Direction::Forward),
            ],
            Powerup::Sides => vec![
                Bullet::new(muzzle, Direction::Forward),
                Bullet::new(muzzle, Direction::Up),
                Bullet::new(muzzle, Direction::Down),
            ],
        }
    }

    /// Raises the powerup tier to the one unlocked by `score`. Never
    /// downgrades. Returns true when the tier changed.
    pub fn upgrade(&mut self, score: u32, double_threshold: u32, sides_threshold: u32) -> bool {
        let unlocked = Powerup::for_score(score, double_threshold, sides_threshold);
        if unlocked > self.powerup {
            self.powerup = unlocked;
            true
        } else {
            false
        }
    }
}
