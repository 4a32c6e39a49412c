use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::box_collides;
use crate::config::Config;
use crate::entities::{Bullet, Enemy, Explosion, Player};
use crate::input::{Key, KeySource};

/// Slack on the fire cooldown so a gap of exactly `fire_interval` is not
/// lost to f32 rounding
const FIRE_EPSILON: f32 = 1e-5;

/// Everything the simulation mutates from frame to frame
pub struct GameState {
    pub config: Config,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Simulation seconds since the last reset
    pub game_time: f32,
    pub is_game_over: bool,
    /// Simulation seconds since the last shot set
    since_fire: Option<f32>,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut state = Self {
            player: Player::new(Vec2::ZERO),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            game_time: 0.0,
            is_game_over: false,
            since_fire: None,
            rng,
            config,
        };
        state.reset();
        state
    }

    pub fn bounds(&self) -> Vec2 {
        self.config.canvas_size()
    }

    /// Starting position of the player
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(50.0, self.config.canvas_height / 2.0)
    }

    /// Returns to a fresh session
    pub fn reset(&mut self) {
        self.is_game_over = false;
        self.game_time = 0.0;
        self.score = 0;
        self.since_fire = None;

        self.bullets.clear();
        self.enemies.clear();
        self.explosions.clear();

        self.player = Player::new(self.spawn_point());
        log::info!("Game reset");
    }

    /// Advances the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32, keys: &dyn KeySource) {
        self.game_time += dt;
        if let Some(since) = self.since_fire.as_mut() {
            *since += dt;
        }

        self.handle_input(dt, keys);
        self.update_entities(dt);

        if self.rng.random::<f32>() < self.spawn_probability() {
            self.spawn_enemy();
        }

        self.check_collisions();
        self.check_powerup();
    }

    fn handle_input(&mut self, dt: f32, keys: &dyn KeySource) {
        self.player.steer(keys, self.config.player_speed, dt);

        if keys.is_down(Key::Space) {
            self.try_fire();
        }
    }

    /// True when the fire cooldown has elapsed and the game is still on
    pub fn can_fire(&self) -> bool {
        !self.is_game_over
            && self
                .since_fire
                .is_none_or(|since| since >= self.config.fire_interval - FIRE_EPSILON)
    }

    /// Fires one shot set if the cooldown allows. Returns whether it fired.
    pub fn try_fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }

        self.bullets.extend(self.player.shot_set());
        self.since_fire = Some(0.0);
        true
    }

    fn update_entities(&mut self, dt: f32) {
        let bounds = self.bounds();

        self.player.sprite.update(dt);
        for bullet in &mut self.bullets {
            bullet.sprite.update(dt);
        }
        for enemy in &mut self.enemies {
            enemy.sprite.update(dt);
        }
        for explosion in &mut self.explosions {
            explosion.sprite.update(dt);
        }

        let bullet_speed = self.config.bullet_speed;
        for bullet in &mut self.bullets {
            bullet.advance(bullet_speed, dt);
        }
        self.bullets.retain(|b| !b.is_out_of_bounds(bounds));

        let enemy_speed = self.config.enemy_speed;
        for enemy in &mut self.enemies {
            enemy.advance(enemy_speed, dt);
        }
        self.enemies.retain(|e| !e.is_off_screen());

        self.explosions.retain(|e| !e.is_done());
    }

    /// Chance of an enemy appearing this frame. Zero at the start of a
    /// session, approaching one as the session goes on.
    pub fn spawn_probability(&self) -> f32 {
        1.0 - self.config.spawn_decay_base.powf(self.game_time)
    }

    /// Adds an enemy at the right edge at a random height
    pub fn spawn_enemy(&mut self) {
        let mut enemy = Enemy::new(Vec2::new(self.config.canvas_width, 0.0));
        let max_y = (self.config.canvas_height - enemy.size().y).max(0.0);
        enemy.pos.y = self.rng.random::<f32>() * max_y;
        self.enemies.push(enemy);
    }

    /// Clamps the player, then resolves bullet hits and player contact.
    ///
    /// Enemies are scanned in order and each takes the first bullet in order
    /// that overlaps it.
    fn check_collisions(&mut self) {
        self.player.clamp_to(self.bounds());

        let mut survivors = Vec::with_capacity(self.enemies.len());
        for enemy in std::mem::take(&mut self.enemies) {
            let hit = self
                .bullets
                .iter()
                .position(|b| box_collides(enemy.pos, enemy.size(), b.pos, b.size()));

            if let Some(idx) = hit {
                self.bullets.remove(idx);
                self.score += self.config.kill_score;
                self.explosions.push(Explosion::new(enemy.pos));
                continue;
            }

            if box_collides(
                enemy.pos,
                enemy.size(),
                self.player.pos,
                self.player.size(),
            ) {
                self.game_over();
            }
            survivors.push(enemy);
        }
        self.enemies = survivors;
    }

    fn check_powerup(&mut self) {
        let upgraded = self.player.upgrade(
            self.score,
            self.config.double_threshold,
            self.config.sides_threshold,
        );
        if upgraded {
            log::info!(
                "Powerup unlocked at score {}: {}",
                self.score,
                self.player.powerup.get_name()
            );
        }
    }

    fn game_over(&mut self) {
        if !self.is_game_over {
            log::info!(
                "Game over with score {} after {:.1}s",
                self.score,
                self.game_time
            );
        }
        self.is_game_over = true;
    }
}
