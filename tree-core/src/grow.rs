//! Run-to-exhaustion driver for the growth simulation.
//!
//! The pipeline is strictly two-phase:
//! 1. [`grow`] — seed root branches and run simulation passes until no
//!    branch remains alive, filling a [`PointBuffer`].
//! 2. Playback (see [`crate::playback`]) — replay the frozen buffer
//!    onto a surface, immediately or paced across frames.
//!
//! The loop is synchronous and blocking by design: the whole tree must
//! be recorded before any point can be indexed for a progress fraction.

use crate::branch::BranchCollection;
use crate::buffer::PointBuffer;
use crate::config::GrowthConfig;
use crate::error::GrowthError;
use crate::random::UnitRng;

/// Runs one complete growth simulation and returns the recorded tree.
///
/// Seeds the root branches for the configured surface, then repeatedly
/// applies simulation passes until the collection is empty. Nothing
/// structurally bounds the pass count — termination relies on radii
/// strictly shrinking and forks stopping at generation 3 — so the run
/// is aborted with [`GrowthError::BudgetExhausted`] once the buffer
/// exceeds `cfg.max_points`.
///
/// ### Parameters
/// - `cfg` - Surface dimensions and derived growth parameters, captured
///   once for the whole run.
/// - `rng` - Uniform source for every stochastic decision in the run.
///
/// ### Returns
/// The frozen point buffer on success, ready for playback.
pub fn grow(cfg: &GrowthConfig, rng: &mut impl UnitRng) -> Result<PointBuffer, GrowthError> {
    let mut buf = PointBuffer::new();
    let mut branches = BranchCollection::seed(cfg, rng);
    let roots = branches.len();
    let mut passes: u64 = 0;

    while !branches.is_empty() {
        if buf.len() > cfg.max_points {
            log::error!(
                "growth aborted after {passes} passes: {} points exceed the cap of {}",
                buf.len(),
                cfg.max_points
            );
            return Err(GrowthError::BudgetExhausted {
                emitted: buf.len(),
                cap: cfg.max_points,
            });
        }
        branches.step(cfg, &mut buf, rng);
        passes += 1;
    }

    log::debug!(
        "growth finished: {roots} roots, {} points ({} leaves) in {passes} passes",
        buf.len(),
        buf.leaf_count()
    );
    Ok(buf)
}
