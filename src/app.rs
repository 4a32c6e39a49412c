use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::game::GameState;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::resources::{Resources, SPRITE_SHEET, TERRAIN};

/// The main application: owns the game state and drives the frame loop.
pub struct App {
    running: bool,
    state: GameState,
    resources: Resources,
    /// Frames info
    last_frame_time: Instant,
    frame_interval: Duration,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`], loading the image assets.
    pub fn new(config: Config, reports_release: bool) -> Self {
        let mut resources = Resources::new(config.asset_dir.clone());
        resources.on_ready(|res| {
            log::info!(
                "Assets ready (sprites: {}, terrain: {})",
                res.get(SPRITE_SHEET).is_some(),
                res.get(TERRAIN).is_some()
            );
        });
        resources.load(&[SPRITE_SHEET, TERRAIN]);

        let frame_interval = Duration::from_secs_f64(1.0 / config.target_fps.max(1) as f64);
        let renderer = GameRenderer::new(config.canvas_size());

        Self {
            running: true,
            state: GameState::new(config),
            resources,
            last_frame_time: Instant::now(),
            frame_interval,
            fps: 0,
            input_manager: InputManager::new(reports_release),
            renderer,
        }
    }

    /// Run the application's main loop until the player quits.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        self.last_frame_time = Instant::now();

        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }
            let dt = self.state.config.clamp_dt(frame_time.as_secs_f32());

            self.input_manager.poll_events(self.state.is_game_over)?;
            self.process_actions();

            self.state.update(dt, &self.input_manager);

            terminal.draw(|frame| {
                let view = RenderView {
                    state: &self.state,
                    resources: &self.resources,
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.last_frame_time = now;

            // Hold the target frame rate without spinning
            let spent = now.elapsed();
            if spent < self.frame_interval {
                std::thread::sleep(self.frame_interval - spent);
            }
        }

        log::info!("Quit with score {}", self.state.score);
        Ok(())
    }

    /// Process host commands collected by the last poll
    fn process_actions(&mut self) {
        for action in self.input_manager.actions().to_vec() {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::PlayAgain => {
                    self.state.reset();
                    self.input_manager.clear();
                }
            }
        }
    }
}
