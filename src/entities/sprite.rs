use glam::Vec2;

use crate::renderer::Canvas;

/// How successive frames are laid out on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameLayout {
    #[default]
    Horizontal,
    Vertical,
}

/// A region of a sprite sheet, optionally animated through a sequence of
/// frame indices
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Name of the sheet image in the resource loader
    pub sheet: &'static str,
    /// Top-left corner of frame 0 on the sheet
    pub origin: Vec2,
    /// Size of one frame, also the on-screen size
    pub size: Vec2,
    pub fps: f32,
    /// Frame indices to play; empty for a static sprite
    pub frames: &'static [usize],
    pub layout: FrameLayout,
    /// Play the sequence once and hold on the last frame
    pub once: bool,
    /// Set when a one-shot sequence reaches its last frame
    pub done: bool,
    elapsed: f32,
    cursor: usize,
}

impl Sprite {
    /// A static, single-frame sprite
    pub fn still(sheet: &'static str, origin: Vec2, size: Vec2) -> Self {
        Self::animated(sheet, origin, size, 0.0, &[])
    }

    /// A sprite looping through `frames` at `fps`
    pub fn animated(
        sheet: &'static str,
        origin: Vec2,
        size: Vec2,
        fps: f32,
        frames: &'static [usize],
    ) -> Self {
        Self {
            sheet,
            origin,
            size,
            fps,
            frames,
            layout: FrameLayout::Horizontal,
            once: false,
            done: false,
            elapsed: 0.0,
            cursor: 0,
        }
    }

    /// Plays the sequence a single time
    pub fn one_shot(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Advances the animation clock by `dt` seconds. A step is taken once
    /// the accumulated time exceeds one frame period.
    ///
    /// Moves at most one step through the sequence per call; whole extra
    /// frame periods in a long `dt` are dropped rather than caught up.
    pub fn update(&mut self, dt: f32) {
        if self.frames.is_empty() || self.fps <= 0.0 || self.done {
            return;
        }

        let period = 1.0 / self.fps;
        self.elapsed += dt;
        if self.elapsed <= period {
            return;
        }
        self.elapsed %= period;

        let last = self.frames.len() - 1;
        if self.once {
            if self.cursor < last {
                self.cursor += 1;
            }
            if self.cursor == last {
                self.done = true;
            }
        } else {
            self.cursor = (self.cursor + 1) % self.frames.len();
        }
    }

    /// Sheet frame index currently shown
    pub fn frame_index(&self) -> usize {
        self.frames.get(self.cursor).copied().unwrap_or(0)
    }

    /// Position in the sequence, not the sheet frame index
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Top-left corner of the current frame on the sheet
    pub fn source_origin(&self) -> Vec2 {
        let step = self.frame_index() as f32;
        match self.layout {
            FrameLayout::Horizontal => self.origin + Vec2::new(step * self.size.x, 0.0),
            FrameLayout::Vertical => self.origin + Vec2::new(0.0, step * self.size.y),
        }
    }

    /// Draws the current frame at the canvas' current origin
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_image(self.sheet, self.source_origin(), self.size, Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "sprites.png";

    #[test]
    fn test_still_sprite_never_changes() {
        let mut sprite = Sprite::still(SHEET, Vec2::new(0.0, 39.0), Vec2::new(18.0, 8.0));
        for _ in 0..100 {
            sprite.update(1.0);
        }
        assert_eq!(sprite.source_origin(), Vec2::new(0.0, 39.0));
        assert!(!sprite.done);
    }

    #[test]
    fn test_looping_sprite_wraps() {
        let mut sprite = Sprite::animated(
            SHEET,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            10.0,
            &[0, 1, 2],
        );
        assert_eq!(sprite.frame_index(), 0);

        sprite.update(0.11);
        assert_eq!(sprite.frame_index(), 1);
        sprite.update(0.11);
        assert_eq!(sprite.frame_index(), 2);
        sprite.update(0.11);
        assert_eq!(sprite.frame_index(), 0);
        assert!(!sprite.done);
    }

    #[test]
    fn test_accumulates_small_steps() {
        let mut sprite =
            Sprite::animated(SHEET, Vec2::ZERO, Vec2::new(10.0, 10.0), 4.0, &[0, 1]);
        sprite.update(0.1);
        sprite.update(0.1);
        assert_eq!(sprite.frame_index(), 0);
        sprite.update(0.1);
        assert_eq!(sprite.frame_index(), 1);
    }

    #[test]
    fn test_waits_until_period_is_exceeded() {
        let mut sprite =
            Sprite::animated(SHEET, Vec2::ZERO, Vec2::new(10.0, 10.0), 4.0, &[0, 1]);
        sprite.update(0.25);
        assert_eq!(sprite.frame_index(), 0);
        sprite.update(0.01);
        assert_eq!(sprite.frame_index(), 1);
    }

    #[test]
    fn test_large_dt_advances_one_frame() {
        let mut sprite = Sprite::animated(
            SHEET,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            16.0,
            &[0, 1, 2, 3, 4, 5],
        );
        sprite.update(5.0);
        assert_eq!(sprite.position(), 1);
    }

    #[test]
    fn test_one_shot_sets_done_on_last_frame() {
        let mut sprite = Sprite::animated(
            SHEET,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            10.0,
            &[0, 1, 2],
        )
        .one_shot();

        sprite.update(0.11);
        assert!(!sprite.done);
        sprite.update(0.11);
        assert!(sprite.done);
        assert_eq!(sprite.frame_index(), 2);

        sprite.update(0.11);
        assert_eq!(sprite.frame_index(), 2);
    }

    #[test]
    fn test_source_origin_follows_layout() {
        let mut sprite = Sprite::animated(
            SHEET,
            Vec2::new(0.0, 78.0),
            Vec2::new(80.0, 39.0),
            6.0,
            &[0, 1, 2, 3, 2, 1],
        );
        sprite.update(0.2);
        assert_eq!(sprite.source_origin(), Vec2::new(80.0, 78.0));

        let mut vertical = sprite.clone().with_layout(FrameLayout::Vertical);
        vertical.update(0.2);
        assert_eq!(vertical.source_origin(), Vec2::new(0.0, 78.0 + 2.0 * 39.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const SEQUENCE: &[usize] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

        proptest! {
            #[test]
            fn test_one_shot_never_passes_last_frame(
                steps in prop::collection::vec(0.0f32..0.5, 0..200)
            ) {
                let mut sprite = Sprite::animated(
                    SHEET,
                    Vec2::ZERO,
                    Vec2::new(39.0, 39.0),
                    16.0,
                    SEQUENCE,
                )
                .one_shot();

                let mut transitions = 0;
                for dt in steps {
                    let was_done = sprite.done;
                    sprite.update(dt);
                    prop_assert!(sprite.position() < SEQUENCE.len());
                    if sprite.done && !was_done {
                        transitions += 1;
                        prop_assert_eq!(sprite.position(), SEQUENCE.len() - 1);
                    }
                }
                prop_assert!(transitions <= 1);
                prop_assert_eq!(sprite.done, sprite.position() == SEQUENCE.len() - 1);
            }
        }
    }
}
