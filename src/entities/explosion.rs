use glam::Vec2;

use super::sprite::Sprite;
use crate::resources::SPRITE_SHEET;

const EXPLOSION_FRAMES: &[usize] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// One-shot blast left behind by a destroyed enemy
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub sprite: Sprite,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            sprite: Sprite::animated(
                SPRITE_SHEET,
                Vec2::new(0.0, 117.0),
                Vec2::new(39.0, 39.0),
                16.0,
                EXPLOSION_FRAMES,
            )
            .one_shot(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.sprite.done
    }
}
