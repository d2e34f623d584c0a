//! Native tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the recorded tree, the
//! playback cursor, and the retained draw surface, and implements
//! [`eframe::App`] to host either replay mode:
//!
//! - animated: one batch of points per frame, progress bar, repaint
//!   requested only while playing;
//! - immediate: the whole buffer drawn in a single pass on regenerate.
//!
//! egui is an immediate-mode host, so draw calls are retained as shapes
//! in a [`ShapeSurface`] and repainted every frame; the underlying
//! point buffer is never mutated after generation.

use eframe::App;
use glam::Vec2;
use rand::rng;
use tree_core::{
    buffer::PointBuffer,
    config::GrowthConfig,
    grow::grow,
    playback::{LeafSprite, Playback, PlaybackOptions, PlaybackStatus, Rgb, Surface},
};

use crate::sprites::LeafSprites;

/// Retained draw target backing the egui canvas.
///
/// Playback primitives are appended as egui shapes in canvas-local
/// coordinates; [`ShapeSurface::paint`] translates them to the panel
/// each frame. The progress bar is replaced on every fill, not
/// accumulated, so only the latest bar is ever painted.
#[derive(Default)]
struct ShapeSurface {
    shapes: Vec<egui::Shape>,
    progress: Option<egui::Shape>,
    sprite_ids: [Option<egui::TextureId>; 2],
}

impl ShapeSurface {
    fn clear(&mut self) {
        self.shapes.clear();
        self.progress = None;
    }

    fn set_sprite_ids(&mut self, ids: [egui::TextureId; 2]) {
        self.sprite_ids = [Some(ids[0]), Some(ids[1])];
    }

    fn sprite_id(&self, sprite: LeafSprite) -> Option<egui::TextureId> {
        match sprite {
            LeafSprite::One => self.sprite_ids[0],
            LeafSprite::Two => self.sprite_ids[1],
        }
    }

    /// Paints every retained shape, offset into the panel rect.
    fn paint(&self, painter: &egui::Painter, offset: egui::Vec2) {
        let all = self.shapes.iter().chain(self.progress.iter());
        for shape in all {
            let mut shape = shape.clone();
            shape.translate(offset);
            painter.add(shape);
        }
    }
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

impl Surface for ShapeSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.shapes.push(egui::Shape::circle_filled(
            egui::pos2(center.x, center.y),
            radius,
            color32(color),
        ));
    }

    fn blit_sprite(&mut self, sprite: LeafSprite, pos: Vec2, size: Vec2) {
        // A variant whose texture is missing is skipped, never fatal.
        let Some(id) = self.sprite_id(sprite) else {
            return;
        };
        let rect =
            egui::Rect::from_min_size(egui::pos2(pos.x, pos.y), egui::vec2(size.x, size.y));
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        self.shapes
            .push(egui::Shape::image(id, rect, uv, egui::Color32::WHITE));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgb) {
        let rect =
            egui::Rect::from_min_size(egui::pos2(min.x, min.y), egui::vec2(size.x, size.y));
        self.progress = Some(egui::Shape::rect_filled(
            rect,
            egui::CornerRadius::ZERO,
            color32(color),
        ));
    }
}

/// Main application state for the tree viewer.
///
/// ### Fields
/// - `tree` - The frozen point buffer of the last growth run.
/// - `playback` - Cursor state for the current replay.
/// - `canvas` - Retained shapes produced by playback.
/// - `sprites` - Cached leaf textures, loaded on the first frame.
///
/// - `rng` - Random source for growth and sprite variant draws.
///
/// - `animate` - Progressive replay with progress bar vs. one-shot draw.
/// - `playing` - Whether an animated replay is advancing.
/// - `points_per_frame` - Replay pacing for the animated mode.
/// - `regen_requested` - Deferred regenerate; resolved in the central
///   panel where the canvas size is known.
/// - `error` - Last growth failure, shown in place of a tree.
pub struct Viewer {
    tree: Option<PointBuffer>,
    playback: Playback,
    canvas: ShapeSurface,
    sprites: Option<LeafSprites>,

    rng: rand::rngs::ThreadRng,

    animate: bool,
    playing: bool,
    points_per_frame: usize,
    regen_requested: bool,
    error: Option<String>,
}

impl Viewer {
    /// Creates a viewer with no tree yet; the first frame grows one
    /// sized to the canvas.
    pub fn new() -> Self {
        Self {
            tree: None,
            playback: Playback::new(PlaybackOptions::animated(0.0)),
            canvas: ShapeSurface::default(),
            sprites: None,
            rng: rng(),
            animate: true,
            playing: false,
            points_per_frame: 32,
            regen_requested: false,
            error: None,
        }
    }

    /// Grows a fresh tree for the given surface size and resets playback.
    ///
    /// In animated mode the replay starts from the first point; in
    /// immediate mode the whole buffer is drawn here and nothing is
    /// left scheduled.
    fn regenerate(&mut self, width: f32, height: f32) {
        let cfg = GrowthConfig::for_surface(width, height);
        self.canvas.clear();
        self.error = None;
        self.playing = false;

        match grow(&cfg, &mut self.rng) {
            Ok(buf) => {
                log::info!(
                    "grew tree for {width:.0}x{height:.0}: {} points, {} leaves",
                    buf.len(),
                    buf.leaf_count()
                );
                if self.animate {
                    self.playback = Playback::new(PlaybackOptions::animated(width));
                    self.playing = true;
                } else {
                    self.playback = Playback::new(PlaybackOptions::immediate(width));
                    self.playback.run(&buf, &mut self.canvas, &mut self.rng);
                }
                self.tree = Some(buf);
            }
            Err(e) => {
                log::error!("tree generation failed: {e}");
                self.error = Some(e.to_string());
                self.tree = None;
            }
        }
    }

    /// Advances an animated replay by up to `points_per_frame` points.
    ///
    /// Clears `playing` when the last point lands; the host stops
    /// requesting repaints at that moment, so a finished or stopped
    /// replay leaves no pending continuation.
    fn advance_playback(&mut self) {
        let Some(buf) = &self.tree else {
            self.playing = false;
            return;
        };
        for _ in 0..self.points_per_frame {
            if self.playback.step(buf, &mut self.canvas, &mut self.rng) == PlaybackStatus::Done {
                self.playing = false;
                break;
            }
        }
    }

    /// Builds the top panel UI (regenerate, mode toggle, pacing).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🌱 Regenerate").clicked() {
                    self.regen_requested = true;
                }

                ui.checkbox(&mut self.animate, "Animate");

                let mid_replay = self
                    .tree
                    .as_ref()
                    .is_some_and(|buf| !self.playback.is_done(buf));

                if self.playing {
                    if ui.button("⏸ Pause").clicked() {
                        self.playing = false;
                    }
                } else if mid_replay && ui.button("▶ Play").clicked() {
                    self.playing = true;
                }

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.points_per_frame, 1..=256).text("points / frame"),
                );
            });
        });
    }

    /// Builds the bottom status bar (point counts and replay progress).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match &self.tree {
                    Some(buf) => {
                        ui.label(format!(
                            "progress = {:.0}%",
                            self.playback.progress(buf) * 100.0
                        ));
                        ui.separator();
                        ui.label(format!("drawn = {}", self.playback.cursor()));
                        ui.label(format!("leaves = {}", buf.leaf_count()));
                        ui.label(format!("points = {}", buf.len()));
                    }
                    None => {
                        ui.label("no tree");
                    }
                }
            });
        });
    }

    /// Builds the central canvas: grows on demand, advances the replay,
    /// and paints the retained shapes.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if self.sprites.is_none() {
                let sprites = LeafSprites::load(ctx);
                self.canvas.set_sprite_ids(sprites.ids());
                self.sprites = Some(sprites);
            }

            // The surface size is fixed at generation start; a panel
            // resize only takes effect on the next regenerate.
            if self.regen_requested || (self.tree.is_none() && self.error.is_none()) {
                self.regen_requested = false;
                self.regenerate(rect.width(), rect.height());
            }

            if self.playing {
                self.advance_playback();
                if self.playing {
                    ctx.request_repaint();
                }
            }

            self.canvas.paint(&painter, rect.min.to_vec2());

            if let Some(err) = &self.error {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    err,
                    egui::FontId::default(),
                    egui::Color32::RED,
                );
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
