use crate::types::{PointIndex, PointKind};
use glam::Vec2;

/// The flat recording of every point emitted by a growth run.
///
/// Four parallel columns — x, y, radius, category — indexed together:
/// index `i` across all four refers to one recorded point. The order is
/// emission order and is semantically meaningful: it is the only order
/// playback has, and it determines both draw sequence and the progress
/// fraction.
///
/// Lifecycle: created empty at simulation start, append-only while the
/// engine runs, then handed to playback as a read-only view. Playback
/// never mutates it; the cosmetic leaf x-shift is applied to a local
/// copy at draw time.
///
/// The engine appends all four columns in lockstep for every point.
/// Length equality across columns is an invariant, not a validated
/// input; it is debug-asserted on read access.
#[derive(Debug, Default)]
pub struct PointBuffer {
    xs: Vec<f32>,
    ys: Vec<f32>,
    radii: Vec<f32>,
    kinds: Vec<PointKind>,
}

impl PointBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an x-coordinate. O(1) amortized.
    #[inline]
    pub fn push_x(&mut self, x: f32) {
        self.xs.push(x);
    }

    /// Appends a y-coordinate. O(1) amortized.
    #[inline]
    pub fn push_y(&mut self, y: f32) {
        self.ys.push(y);
    }

    /// Appends a radius. O(1) amortized.
    #[inline]
    pub fn push_radius(&mut self, radius: f32) {
        self.radii.push(radius);
    }

    /// Appends a category. O(1) amortized.
    #[inline]
    pub fn push_kind(&mut self, kind: PointKind) {
        self.kinds.push(kind);
    }

    /// Appends one complete point, keeping all four columns in lockstep.
    ///
    /// This is what the growth engine calls; the per-column appends are
    /// the primitive operations it is built from.
    pub fn record(&mut self, pos: Vec2, radius: f32, kind: PointKind) {
        debug_assert!(radius > 0.0, "recorded a non-positive radius: {radius}");
        self.push_x(pos.x);
        self.push_y(pos.y);
        self.push_radius(radius);
        self.push_kind(kind);
    }

    /// Number of recorded points.
    ///
    /// ### Panics
    /// Debug builds assert that all four columns have the same length;
    /// a mismatch means the writer skipped a column append.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.xs.len(), self.ys.len());
        debug_assert_eq!(self.xs.len(), self.radii.len());
        debug_assert_eq!(self.xs.len(), self.kinds.len());
        self.xs.len()
    }

    /// Returns `true` if no points have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// X-coordinate of point `i`.
    #[inline]
    pub fn x(&self, i: PointIndex) -> f32 {
        self.xs[i]
    }

    /// Y-coordinate of point `i`.
    #[inline]
    pub fn y(&self, i: PointIndex) -> f32 {
        self.ys[i]
    }

    /// Position of point `i`.
    #[inline]
    pub fn pos(&self, i: PointIndex) -> Vec2 {
        Vec2::new(self.xs[i], self.ys[i])
    }

    /// Radius of point `i`.
    #[inline]
    pub fn radius(&self, i: PointIndex) -> f32 {
        self.radii[i]
    }

    /// Category of point `i`.
    #[inline]
    pub fn kind(&self, i: PointIndex) -> PointKind {
        self.kinds[i]
    }

    /// Number of recorded leaf points.
    pub fn leaf_count(&self) -> usize {
        self.kinds.iter().filter(|k| **k == PointKind::Leaf).count()
    }
}
