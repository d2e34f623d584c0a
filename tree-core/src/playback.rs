//! Replay of a recorded [`PointBuffer`] onto a drawing surface.
//!
//! Playback is a cursor walk over the frozen buffer, in emission order,
//! with two modes:
//! - [`Playback::run`] — immediate: every point is drawn synchronously,
//!   no frame pacing, no progress indicator.
//! - [`Playback::step`] — animated: the host calls it once per drawn
//!   point and presents a frame in between; each step also redraws the
//!   progress bar. Cancellation is the host simply not calling `step`
//!   again — the pull model leaves nothing scheduled.
//!
//! Points are drawn in strict buffer-index order. Leaf density gating
//! is a drawing decision, not a traversal skip: suppressed leaves still
//! advance the cursor and the progress fraction.

use crate::buffer::PointBuffer;
use crate::random::UnitRng;
use crate::types::{PointIndex, PointKind};
use glam::Vec2;

/// An RGB color in surface color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fill color of every trunk circle.
pub const BARK: Rgb = Rgb { r: 0x94, g: 0x6A, b: 0x2C };

/// Fill color of the progress bar.
pub const PROGRESS: Rgb = Rgb { r: 0x4F, g: 0xB3, b: 0x9A };

/// Height of the progress bar in pixels.
pub const PROGRESS_HEIGHT: f32 = 3.0;

/// The two leaf sprite assets, selected by variant.
///
/// The sprites themselves are opaque to playback; the surface
/// implementation owns loading and caching them. An implementation
/// whose sprite failed to load should skip the blit and carry on —
/// a missing leaf must never abort playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafSprite {
    One,
    Two,
}

/// Drawing target for playback, addressed in surface pixel coordinates.
///
/// The three primitives mirror what the playback walk needs: trunk
/// circles, leaf sprite blits, and the progress rectangle. Drawing a
/// single point is atomic with respect to the surface; playback never
/// suspends mid-primitive.
pub trait Surface {
    /// Fills a circle, no stroke.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    /// Blits a leaf sprite with its top-left corner at `pos`.
    fn blit_sprite(&mut self, sprite: LeafSprite, pos: Vec2, size: Vec2);

    /// Fills an axis-aligned rectangle. Used for the progress bar; the
    /// latest call replaces the previous bar rather than stacking.
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgb);
}

/// Result of one animated playback step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// More points remain; the host should present a frame and step again.
    InProgress,
    /// The last point has been drawn; nothing further will be emitted.
    Done,
}

/// Leaf density gating and progress-bar geometry for one replay.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackOptions {
    /// Draw every `leaf_interval`-th leaf (counted among leaves seen).
    pub leaf_interval: usize,
    /// Suppress leaves until this many have been seen, so density
    /// increases going outward from the base of the tree.
    pub leaf_warmup: usize,
    /// Surface width, for sizing the progress bar.
    pub surface_width: f32,
}

impl PlaybackOptions {
    /// Gating used by the frame-paced replay.
    pub fn animated(surface_width: f32) -> Self {
        Self {
            leaf_interval: 10,
            leaf_warmup: 200,
            surface_width,
        }
    }

    /// Gating used by the draw-everything-at-once replay.
    pub fn immediate(surface_width: f32) -> Self {
        Self {
            leaf_interval: 20,
            leaf_warmup: 200,
            surface_width,
        }
    }
}

/// Cursor state for replaying one frozen buffer.
///
/// Holds no reference to the buffer; the same buffer must be passed to
/// every call so the cursor and leaf count stay meaningful. The buffer
/// is never mutated — the de-clumping leaf x-shift is applied to a
/// local copy right before the blit, so leaf coordinates are stable
/// across repeated replays of the same buffer.
#[derive(Debug)]
pub struct Playback {
    opts: PlaybackOptions,
    cursor: PointIndex,
    leaves_seen: usize,
}

impl Playback {
    /// Creates a replay positioned at the first point.
    pub fn new(opts: PlaybackOptions) -> Self {
        Self {
            opts,
            cursor: 0,
            leaves_seen: 0,
        }
    }

    /// Index of the next point to draw.
    pub fn cursor(&self) -> PointIndex {
        self.cursor
    }

    /// Fraction of the buffer drawn so far, in `[0, 1]`.
    pub fn progress(&self, buf: &PointBuffer) -> f32 {
        if buf.is_empty() {
            1.0
        } else {
            self.cursor as f32 / buf.len() as f32
        }
    }

    /// Returns `true` once every point has been drawn.
    pub fn is_done(&self, buf: &PointBuffer) -> bool {
        self.cursor >= buf.len()
    }

    /// Immediate mode: draws every remaining point synchronously.
    ///
    /// No progress bar is drawn and nothing remains scheduled when this
    /// returns; the surface holds the complete tree.
    pub fn run(&mut self, buf: &PointBuffer, surface: &mut impl Surface, rng: &mut impl UnitRng) {
        while self.cursor < buf.len() {
            self.draw_point(buf, surface, rng);
        }
    }

    /// Animated mode: draws exactly one point, then the progress bar.
    ///
    /// Returns [`PlaybackStatus::Done`] exactly when the last point has
    /// been drawn; the terminal bar spans the full surface width. The
    /// host yields between calls, never mid-point. Stopping early is
    /// just not calling `step` again.
    pub fn step(
        &mut self,
        buf: &PointBuffer,
        surface: &mut impl Surface,
        rng: &mut impl UnitRng,
    ) -> PlaybackStatus {
        if self.is_done(buf) {
            return PlaybackStatus::Done;
        }
        self.draw_point(buf, surface, rng);

        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(self.opts.surface_width * self.progress(buf), PROGRESS_HEIGHT),
            PROGRESS,
        );

        if self.is_done(buf) {
            PlaybackStatus::Done
        } else {
            PlaybackStatus::InProgress
        }
    }

    /// Draws the point under the cursor and advances it.
    fn draw_point(&mut self, buf: &PointBuffer, surface: &mut impl Surface, rng: &mut impl UnitRng) {
        let i = self.cursor;
        match buf.kind(i) {
            PointKind::Trunk => {
                surface.fill_circle(buf.pos(i), buf.radius(i), BARK);
            }
            PointKind::Leaf => {
                self.draw_leaf(i, buf, surface, rng);
                self.leaves_seen += 1;
            }
        }
        self.cursor += 1;
    }

    /// Density-gated leaf blit.
    ///
    /// Only every `leaf_interval`-th leaf is drawn, and none before the
    /// warmup count is reached, which thins leaves near the base of the
    /// tree. The variant draw picks one of three arms: sprite one at
    /// base size with no shift, or a double-size sprite shifted a few
    /// pixels left to de-clump. The shift applies to a local copy of x;
    /// the buffer keeps the recorded coordinate.
    fn draw_leaf(
        &self,
        i: PointIndex,
        buf: &PointBuffer,
        surface: &mut impl Surface,
        rng: &mut impl UnitRng,
    ) {
        if self.leaves_seen % self.opts.leaf_interval != 0 || self.leaves_seen <= self.opts.leaf_warmup
        {
            return;
        }

        let p = rng.next_unit() * 3.0;
        let (sprite, scale, shift) = if p < 1.0 {
            (LeafSprite::One, 1.0, 0.0)
        } else if p < 2.0 {
            (LeafSprite::Two, 2.0, -10.0)
        } else {
            (LeafSprite::One, 2.0, -5.0)
        };

        let pos = Vec2::new((buf.x(i) + shift).floor(), buf.y(i).floor());
        surface.blit_sprite(sprite, pos, Vec2::splat(10.0 * scale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::Fixed;

    /// Surface that records every primitive for assertions.
    #[derive(Debug, Default)]
    struct Recorder {
        circles: Vec<(Vec2, f32, Rgb)>,
        blits: Vec<(LeafSprite, Vec2, Vec2)>,
        rects: Vec<(Vec2, Vec2, Rgb)>,
    }

    impl Surface for Recorder {
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
            self.circles.push((center, radius, color));
        }

        fn blit_sprite(&mut self, sprite: LeafSprite, pos: Vec2, size: Vec2) {
            self.blits.push((sprite, pos, size));
        }

        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgb) {
            self.rects.push((min, size, color));
        }
    }

    fn trunk_buffer(n: usize) -> PointBuffer {
        let mut buf = PointBuffer::new();
        for i in 0..n {
            buf.record(Vec2::new(i as f32, i as f32), 2.0, PointKind::Trunk);
        }
        buf
    }

    fn leaf_buffer(n: usize) -> PointBuffer {
        let mut buf = PointBuffer::new();
        for i in 0..n {
            buf.record(Vec2::new(i as f32, 0.0), 4.0, PointKind::Leaf);
        }
        buf
    }

    #[test]
    fn immediate_mode_draws_every_trunk_point_once() {
        let buf = trunk_buffer(25);
        let mut surface = Recorder::default();
        let mut rng = Fixed(0.5);
        let mut playback = Playback::new(PlaybackOptions::immediate(500.0));

        playback.run(&buf, &mut surface, &mut rng);

        // Exactly N primitives for an N-point buffer, no progress bar,
        // and nothing left to draw.
        assert_eq!(surface.circles.len(), 25);
        assert!(surface.rects.is_empty());
        assert!(playback.is_done(&buf));

        for (i, (center, radius, color)) in surface.circles.iter().enumerate() {
            assert_eq!(*center, buf.pos(i));
            assert_eq!(*radius, buf.radius(i));
            assert_eq!(*color, BARK);
        }
    }

    #[test]
    fn animated_mode_completes_in_exactly_n_steps() {
        let buf = trunk_buffer(10);
        let mut surface = Recorder::default();
        let mut rng = Fixed(0.5);
        let mut playback = Playback::new(PlaybackOptions::animated(500.0));

        let mut steps = 0;
        while playback.step(&buf, &mut surface, &mut rng) == PlaybackStatus::InProgress {
            steps += 1;
        }
        steps += 1; // the Done-returning step also drew a point

        assert_eq!(steps, 10);
        assert_eq!(surface.circles.len(), 10);
        assert_eq!(surface.rects.len(), 10);

        // Terminal bar spans the full surface width.
        let (min, size, color) = surface.rects.last().unwrap();
        assert_eq!(*min, Vec2::ZERO);
        assert_eq!(size.x, 500.0);
        assert_eq!(size.y, PROGRESS_HEIGHT);
        assert_eq!(*color, PROGRESS);
        assert_eq!(playback.progress(&buf), 1.0);

        // Stepping a finished replay draws nothing further.
        assert_eq!(playback.step(&buf, &mut surface, &mut rng), PlaybackStatus::Done);
        assert_eq!(surface.circles.len(), 10);
        assert_eq!(surface.rects.len(), 10);
    }

    #[test]
    fn stopping_early_leaves_the_cursor_where_it_was() {
        let buf = trunk_buffer(10);
        let mut surface = Recorder::default();
        let mut rng = Fixed(0.5);
        let mut playback = Playback::new(PlaybackOptions::animated(500.0));

        for _ in 0..4 {
            assert_eq!(
                playback.step(&buf, &mut surface, &mut rng),
                PlaybackStatus::InProgress
            );
        }

        // The host cancels by not stepping again; nothing is scheduled
        // and exactly the drawn prefix is on the surface.
        assert_eq!(playback.cursor(), 4);
        assert_eq!(surface.circles.len(), 4);
        assert!(!playback.is_done(&buf));
        assert_eq!(playback.progress(&buf), 0.4);
    }

    #[test]
    fn leaf_gate_suppresses_warmup_and_off_interval_leaves() {
        let buf = leaf_buffer(500);
        let mut surface = Recorder::default();
        let mut rng = Fixed(0.5);
        let mut playback = Playback::new(PlaybackOptions::animated(500.0));

        playback.run(&buf, &mut surface, &mut rng);

        // Ordinals 210, 220, ..., 490 pass the gate: above the warmup
        // of 200 and on the interval of 10.
        assert_eq!(surface.blits.len(), 29);
        // Suppression is a drawing decision, not a traversal skip.
        assert!(playback.is_done(&buf));
        assert_eq!(playback.cursor(), 500);
    }

    #[test]
    fn immediate_gate_is_sparser_than_animated() {
        let buf = leaf_buffer(500);
        let mut rng = Fixed(0.5);

        let mut animated_surface = Recorder::default();
        Playback::new(PlaybackOptions::animated(500.0)).run(
            &buf,
            &mut animated_surface,
            &mut rng,
        );

        let mut immediate_surface = Recorder::default();
        Playback::new(PlaybackOptions::immediate(500.0)).run(
            &buf,
            &mut immediate_surface,
            &mut rng,
        );

        // Interval 20 vs 10: ordinals 220, 240, ..., 480.
        assert_eq!(immediate_surface.blits.len(), 14);
        assert!(immediate_surface.blits.len() < animated_surface.blits.len());
    }

    #[test]
    fn variant_draw_picks_the_middle_arm_for_a_middle_sample() {
        let mut buf = PointBuffer::new();
        // Enough leaves to open the gate, with a marked one at ordinal 210.
        for i in 0..211 {
            buf.record(Vec2::new(i as f32, 7.9), 4.0, PointKind::Leaf);
        }
        let mut surface = Recorder::default();
        // 0.5 * 3 = 1.5 lands in the second arm: sprite two, double
        // size, shifted ten pixels left.
        let mut rng = Fixed(0.5);
        let mut playback = Playback::new(PlaybackOptions::animated(500.0));

        playback.run(&buf, &mut surface, &mut rng);

        assert_eq!(surface.blits.len(), 1);
        let (sprite, pos, size) = surface.blits[0];
        assert_eq!(sprite, LeafSprite::Two);
        assert_eq!(size, Vec2::splat(20.0));
        // x = 210 - 10, floored; y floored. The buffer itself is not
        // shifted.
        assert_eq!(pos, Vec2::new(200.0, 7.0));
        assert_eq!(buf.x(210), 210.0);
    }

    #[test]
    fn empty_buffer_reports_done_immediately() {
        let buf = PointBuffer::new();
        let mut surface = Recorder::default();
        let mut rng = Fixed(0.5);
        let mut playback = Playback::new(PlaybackOptions::animated(500.0));

        assert!(playback.is_done(&buf));
        assert_eq!(playback.progress(&buf), 1.0);
        assert_eq!(playback.step(&buf, &mut surface, &mut rng), PlaybackStatus::Done);
        assert!(surface.circles.is_empty());
        assert!(surface.rects.is_empty());
    }
}
