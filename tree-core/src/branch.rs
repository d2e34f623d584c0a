use crate::buffer::PointBuffer;
use crate::config::{GrowthConfig, LEAF_RADIUS, MIN_RADIUS};
use crate::random::UnitRng;
use crate::types::PointKind;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Per-step multiplicative taper base; higher generations taper faster.
const TAPER_BASE: f32 = 0.99;
const TAPER_PER_GENERATION: f32 = 1.0 / 250.0;

/// Half-width of the uniform heading perturbation per step, in radians.
const WIGGLE: f32 = 0.1;

/// Reach of the leaf offset from the branch position, in pixels.
const LEAF_REACH: f32 = 20.0;

/// One growth front of the tree.
///
/// A branch is a stateful point: position, step length, current trunk
/// thickness, heading, lineage generation, and the path length traveled
/// since its own genesis or split. The radius strictly shrinks every
/// step, which is what ultimately terminates the simulation.
#[derive(Clone, Debug)]
pub struct Branch {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub angle: f32,
    pub generation: u32,
    pub distance: f32,
}

impl Branch {
    /// Creates a generation-0 root branch heading straight up.
    pub fn root(x: f32, y: f32, speed: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            speed,
            radius,
            angle: FRAC_PI_2,
            generation: 0,
            distance: 0.0,
        }
    }

    /// Records a leaf point offset from the current position.
    ///
    /// The offset direction and reach both derive from one draw `p`:
    /// `(20·p·cos(πp/2), −20·p·sin(πp/2))`, biased up and to the right
    /// of the growth front. Root branches never call this; they are
    /// pure trunk risers.
    pub fn emit_leaf(&self, buf: &mut PointBuffer, rng: &mut impl UnitRng) {
        let p = rng.next_unit();
        let theta = FRAC_PI_2;
        let offset = Vec2::new(
            LEAF_REACH * p * (theta * p).cos(),
            -LEAF_REACH * p * (theta * p).sin(),
        );
        buf.record(self.pos + offset, LEAF_RADIUS, PointKind::Leaf);
    }

    /// Advances the branch one step and records the new trunk point.
    ///
    /// The step moves along the current heading (y grows downward, so an
    /// angle of π/2 moves up), shrinks the radius by the generation-scaled
    /// taper, accumulates the traveled distance, re-clamps the speed to at
    /// most twice the radius so thin branches do not outrun their own
    /// thickness, and finally perturbs the heading by `U(−0.1, 0.1)`.
    pub fn advance(&mut self, buf: &mut PointBuffer, rng: &mut impl UnitRng) {
        let delta = Vec2::new(
            self.speed * self.angle.cos(),
            -self.speed * self.angle.sin(),
        );
        self.pos += delta;
        self.radius *= TAPER_BASE - self.generation as f32 * TAPER_PER_GENERATION;
        self.distance += delta.length();
        if self.speed > self.radius * 2.0 {
            self.speed = self.radius * 2.0;
        }
        self.angle += rng.next_unit() * (2.0 * WIGGLE) - WIGGLE;
        buf.record(self.pos, self.radius, PointKind::Trunk);
    }

    /// Probability that this branch forks this step.
    ///
    /// Scales with the distance traveled relative to the surface height:
    /// generation 1 pays a 0.2 head start, generations 0 and 2 pay 0.1,
    /// and generation 3 and beyond never fork.
    pub fn split_chance(&self, surface_height: f32) -> f32 {
        match self.generation {
            1 => self.distance / surface_height - 0.2,
            g if g < 3 => self.distance / surface_height - 0.1,
            _ => 0.0,
        }
    }

    /// Draws against [`Branch::split_chance`] and, on success, pushes
    /// `2 + round(U(0,1)·3)` offspring into `spawned`.
    ///
    /// Offspring share the parent's position, speed, radius, heading and
    /// accumulated distance, at generation + 1. Returns `true` if the
    /// branch split (and should be dropped from the collection). The
    /// probability draw is consumed even when the chance is zero.
    pub fn try_split(
        &self,
        surface_height: f32,
        rng: &mut impl UnitRng,
        spawned: &mut Vec<Branch>,
    ) -> bool {
        if rng.next_unit() >= self.split_chance(surface_height) {
            return false;
        }
        let count = 2 + (rng.next_unit() * 3.0).round() as usize;
        for _ in 0..count {
            let mut child = self.clone();
            child.generation += 1;
            spawned.push(child);
        }
        true
    }

    /// Returns `true` once the branch is too thin to render meaningfully.
    pub fn is_dead(&self) -> bool {
        self.radius < MIN_RADIUS
    }
}

/// The set of currently-alive branches being simulated.
///
/// Insertion order is preserved so a run is reproducible given a fixed
/// random sequence: a pass walks branches in order, survivors keep their
/// relative order, and split offspring append at the end.
#[derive(Debug, Default)]
pub struct BranchCollection {
    branches: Vec<Branch>,
}

impl BranchCollection {
    /// Seeds the initial root branches for a surface.
    ///
    /// Picks `2 + round(U(0,1)·3)` branches and spreads them evenly over
    /// a span of two root radii centered on the surface midline, all at
    /// the bottom edge and heading straight up.
    pub fn seed(cfg: &GrowthConfig, rng: &mut impl UnitRng) -> Self {
        let count = 2 + (rng.next_unit() * 3.0).round() as usize;
        let r0 = cfg.initial_radius;
        let branches = (0..count)
            .map(|i| {
                let x = cfg.width / 2.0 - r0 + i as f32 * 2.0 * r0 / count as f32;
                Branch::root(x, cfg.height, cfg.initial_speed, r0)
            })
            .collect();
        Self { branches }
    }

    /// Number of alive branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Returns `true` once every branch has split away or died.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Read access to the alive branches, in pass order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Adds one branch. Mostly useful for crafting test scenarios.
    pub fn add(&mut self, branch: Branch) {
        self.branches.push(branch);
    }

    /// Applies one simulation pass to every currently-alive branch.
    ///
    /// Per branch, in order: leaf emission (generations above 0 only),
    /// advance (which records the trunk point), split draw, death check.
    /// Splitting and dying are mutually exclusive within a pass: a branch
    /// that split is already gone and its offspring are not stepped until
    /// the next pass.
    ///
    /// The pass drains the current collection and rebuilds it, so
    /// removal never happens on a collection that is being iterated.
    pub fn step(&mut self, cfg: &GrowthConfig, buf: &mut PointBuffer, rng: &mut impl UnitRng) {
        let mut survivors = Vec::with_capacity(self.branches.len());
        let mut spawned = Vec::new();

        for mut branch in self.branches.drain(..) {
            if branch.generation > 0 {
                branch.emit_leaf(buf, rng);
            }
            branch.advance(buf, rng);

            if branch.try_split(cfg.height, rng, &mut spawned) {
                continue;
            }
            if !branch.is_dead() {
                survivors.push(branch);
            }
        }

        survivors.extend(spawned);
        self.branches = survivors;
    }
}
