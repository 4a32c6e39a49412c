use glam::Vec2;
use image::{Rgba, RgbaImage};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::entities::Sprite;
use crate::game::GameState;
use crate::resources::{Resources, TERRAIN};

/// Background used when the terrain tile is missing
const FALLBACK_GROUND: Rgba<u8> = Rgba([34, 52, 30, 255]);

/// Drawing surface the scene is painted onto
pub trait Canvas {
    /// Tiles `image` over a `size` area starting at the current origin
    fn fill_pattern(&mut self, image: &str, size: Vec2);
    /// Copies the `size` region at `src` of `image` to `dest`, relative to
    /// the current origin
    fn draw_image(&mut self, image: &str, src: Vec2, size: Vec2, dest: Vec2);
    fn save(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn restore(&mut self);
}

/// Paints one frame of the scene: background, then player, bullets,
/// enemies and explosions in that order
pub fn render_scene(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.fill_pattern(TERRAIN, state.bounds());

    if !state.is_game_over {
        render_entity(canvas, state.player.pos, &state.player.sprite);
    }
    for bullet in &state.bullets {
        render_entity(canvas, bullet.pos, &bullet.sprite);
    }
    for enemy in &state.enemies {
        render_entity(canvas, enemy.pos, &enemy.sprite);
    }
    for explosion in &state.explosions {
        render_entity(canvas, explosion.pos, &explosion.sprite);
    }
}

fn render_entity(canvas: &mut dyn Canvas, pos: Vec2, sprite: &Sprite) {
    canvas.save();
    canvas.translate(pos);
    sprite.render(canvas);
    canvas.restore();
}

/// Flat colour standing in for a sheet region whose image failed to load,
/// keyed on the sheet row the region comes from
fn placeholder_color(src: Vec2) -> Rgba<u8> {
    match src.y as u32 {
        0..=38 => Rgba([90, 220, 90, 255]),   // player
        39..=77 => Rgba([250, 230, 80, 255]), // bullets
        78..=116 => Rgba([220, 70, 70, 255]), // enemies
        _ => Rgba([255, 150, 40, 255]),       // explosions
    }
}

/// Source-over blend of `src` onto `dst`
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let alpha = src[3] as u16;
    match alpha {
        0 => {}
        255 => *dst = src,
        _ => {
            for c in 0..3 {
                let mixed = (src[c] as u16 * alpha + dst[c] as u16 * (255 - alpha)) / 255;
                dst[c] = mixed as u8;
            }
            dst[3] = 255;
        }
    }
}

/// Canvas rasterising into an RGBA framebuffer
pub struct FrameCanvas<'a> {
    resources: &'a Resources,
    target: &'a mut RgbaImage,
    origin: Vec2,
    saved: Vec<Vec2>,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(resources: &'a Resources, target: &'a mut RgbaImage) -> Self {
        Self {
            resources,
            target,
            origin: Vec2::ZERO,
            saved: Vec::new(),
        }
    }

    fn put(&mut self, x: f32, y: f32, color: Rgba<u8>) {
        let (x, y) = (x.floor(), y.floor());
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.target.width() && y < self.target.height() {
            blend(self.target.get_pixel_mut(x, y), color);
        }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn fill_pattern(&mut self, image: &str, size: Vec2) {
        let resources = self.resources;
        let tile = resources.get(image);
        let origin = self.origin;

        for y in 0..size.y.max(0.0) as u32 {
            for x in 0..size.x.max(0.0) as u32 {
                let color = match tile {
                    Some(tile) if tile.width() > 0 && tile.height() > 0 => {
                        *tile.get_pixel(x % tile.width(), y % tile.height())
                    }
                    _ => FALLBACK_GROUND,
                };
                self.put(origin.x + x as f32, origin.y + y as f32, color);
            }
        }
    }

    fn draw_image(&mut self, image: &str, src: Vec2, size: Vec2, dest: Vec2) {
        let resources = self.resources;
        let sheet = resources.get(image);
        let at = self.origin + dest;

        for dy in 0..size.y.max(0.0) as u32 {
            for dx in 0..size.x.max(0.0) as u32 {
                let color = match sheet {
                    Some(sheet) => {
                        let sx = src.x as u32 + dx;
                        let sy = src.y as u32 + dy;
                        if sx >= sheet.width() || sy >= sheet.height() {
                            continue;
                        }
                        *sheet.get_pixel(sx, sy)
                    }
                    None => placeholder_color(src),
                };
                self.put(at.x + dx as f32, at.y + dy as f32, color);
            }
        }
    }

    fn save(&mut self) {
        self.saved.push(self.origin);
    }

    fn translate(&mut self, offset: Vec2) {
        self.origin += offset;
    }

    fn restore(&mut self) {
        if let Some(origin) = self.saved.pop() {
            self.origin = origin;
        }
    }
}

/// A single recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillPattern { image: String, size: Vec2 },
    DrawImage { image: String, src: Vec2, size: Vec2, at: Vec2 },
    Save,
    Translate(Vec2),
    Restore,
}

/// Canvas that only records what was asked of it. `DrawImage::at` holds
/// the absolute position after translation.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
    origin: Vec2,
    saved: Vec<Vec2>,
}

impl RecordingCanvas {
    /// Absolute positions of every image draw, in draw order
    pub fn draw_positions(&self) -> Vec<Vec2> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::DrawImage { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_pattern(&mut self, image: &str, size: Vec2) {
        self.calls.push(DrawCall::FillPattern {
            image: image.to_string(),
            size,
        });
    }

    fn draw_image(&mut self, image: &str, src: Vec2, size: Vec2, dest: Vec2) {
        self.calls.push(DrawCall::DrawImage {
            image: image.to_string(),
            src,
            size,
            at: self.origin + dest,
        });
    }

    fn save(&mut self) {
        self.saved.push(self.origin);
        self.calls.push(DrawCall::Save);
    }

    fn translate(&mut self, offset: Vec2) {
        self.origin += offset;
        self.calls.push(DrawCall::Translate(offset));
    }

    fn restore(&mut self) {
        if let Some(origin) = self.saved.pop() {
            self.origin = origin;
        }
        self.calls.push(DrawCall::Restore);
    }
}

/// Largest rect inside `area` that keeps the canvas aspect ratio, given
/// that each terminal cell shows two stacked pixels
pub fn fit_area(area: Rect, canvas: Vec2) -> Rect {
    if area.width == 0 || area.height == 0 || canvas.x <= 0.0 || canvas.y <= 0.0 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let scale = (area.width as f32 / canvas.x).min(area.height as f32 * 2.0 / canvas.y);
    let width = ((canvas.x * scale) as u16).clamp(1, area.width);
    let height = ((canvas.y * scale / 2.0) as u16).clamp(1, area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Shows a framebuffer with half-block cells, nearest-neighbour scaled to
/// the target area
pub struct FramebufferView<'a>(pub &'a RgbaImage);

impl Widget for FramebufferView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let image = self.0;
        if area.width == 0 || area.height == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }

        let rows = area.height as u32 * 2;
        let sample = |col: u32, row: u32| {
            let x = col * image.width() / area.width as u32;
            let y = row * image.height() / rows;
            let p = image.get_pixel(x.min(image.width() - 1), y.min(image.height() - 1));
            Color::Rgb(p[0], p[1], p[2])
        };

        for cy in 0..area.height {
            for cx in 0..area.width {
                let top = sample(cx as u32, cy as u32 * 2);
                let bottom = sample(cx as u32, cy as u32 * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_char('▀').set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

/// View struct that holds everything needed to draw a frame
pub struct RenderView<'a> {
    pub state: &'a GameState,
    pub resources: &'a Resources,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    framebuffer: RgbaImage,
}

impl GameRenderer {
    pub fn new(canvas: Vec2) -> Self {
        Self {
            framebuffer: RgbaImage::new(canvas.x.max(1.0) as u32, canvas.y.max(1.0) as u32),
        }
    }

    /// Paints the scene into the framebuffer
    pub fn paint(&mut self, state: &GameState, resources: &Resources) {
        let mut canvas = FrameCanvas::new(resources, &mut self.framebuffer);
        render_scene(state, &mut canvas);
    }

    /// Main render method: scene, HUD, and the game-over panel on top
    pub fn render(&mut self, frame: &mut Frame, view: &RenderView) {
        self.paint(view.state, view.resources);

        let area = frame.area();
        let hud_area = Rect { height: 1, ..area };
        let play_area = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(1),
            ..area
        };

        let scene_area = fit_area(play_area, view.state.bounds());
        frame.render_widget(FramebufferView(&self.framebuffer), scene_area);

        self.render_hud(frame, hud_area, view);
        if view.state.is_game_over {
            self.render_game_over(frame, scene_area, view);
        }
    }

    /// Score line across the top
    fn render_hud(&self, frame: &mut Frame, area: Rect, view: &RenderView) {
        let state = view.state;
        let elapsed = state.game_time.max(0.0) as u64;

        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", state.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Shot: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                state.player.powerup.get_name(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:02}:{:02}", elapsed / 60, elapsed % 60),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  [WASD/Arrows: Move] [Space: Fire] [Q: Quit]",
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        frame.render_widget(Paragraph::new(stats), area);
    }

    /// Game-over panel with the play-again prompt
    fn render_game_over(&self, frame: &mut Frame, area: Rect, view: &RenderView) {
        let width = 32.min(area.width);
        let height = 8.min(area.height);
        let panel = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let text = vec![
            Line::from(""),
            Line::from("GAME OVER!").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.state.score))
                .centered()
                .yellow()
                .bold(),
            Line::from("Press R to play again").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            panel,
        );
    }
}
