//! Core stochastic tree growth and playback library.
//!
//! Main components:
//! - [`branch`] — branch lifecycle: iterate, split, die.
//! - [`buffer`] — the flat point recording produced by a growth run.
//! - [`grow`] — run-to-exhaustion simulation driver.
//! - [`playback`] — replay of a recorded buffer onto a drawing surface.
//! - [`config`] — growth parameters derived from the surface.
//! - [`random`] — the injected uniform randomness source.
//! - [`error`] — failure taxonomy for the engine.
//! - [`types`] — shared type aliases and point categories.

pub mod branch;
pub mod buffer;
pub mod config;
pub mod error;
pub mod grow;
pub mod playback;
pub mod random;
pub mod types;
