/// Default ceiling on total emitted points before a run is aborted.
///
/// Termination of the growth loop is probabilistic, not structural; the
/// cap turns a pathological run into a reportable failure instead of an
/// unbounded loop.
pub const DEFAULT_MAX_POINTS: usize = 500_000;

/// A branch dies once its radius drops below this threshold.
pub const MIN_RADIUS: f32 = 0.5;

/// Recorded radius of every leaf point.
pub const LEAF_RADIUS: f32 = 4.0;

/// Parameters of one growth run, fixed at simulation start.
///
/// The surface dimensions are captured here once; nothing in the engine
/// reads ambient viewport state during a run.
#[derive(Clone, Copy, Debug)]
pub struct GrowthConfig {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels. Split probabilities scale against this.
    pub height: f32,
    /// Starting radius of every root branch.
    pub initial_radius: f32,
    /// Starting step length of every root branch.
    pub initial_speed: f32,
    /// Hard cap on total emitted points; see [`crate::error::GrowthError`].
    pub max_points: usize,
}

impl GrowthConfig {
    /// Derives a config from the drawing surface dimensions.
    ///
    /// The root radius is `width / 50` and the step length `width / 500`,
    /// so trees scale with the surface they are grown for.
    pub fn for_surface(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            initial_radius: width / 50.0,
            initial_speed: width / 500.0,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}
