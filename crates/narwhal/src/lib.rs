#![forbid(unsafe_code)]

//! Headless circular-sector packing.
//!
//! `narwhal` computes evenly spaced target points inside an annular sector (a ring segment)
//! and exposes them as an attraction force for an external force-simulation engine.
//! Rendering, collision and velocity integration stay with the engine.

pub mod error;
pub mod force;
pub mod geometry;
pub mod packing;

pub use error::{Error, Result};
pub use force::{Particle, SectorForce, SimNode, Strength};
pub use geometry::{Point, SectorSpec};
pub use packing::{Ring, RingFit, RingPlan, pack, pack_xy, plan};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point: `n` target points filling `spec`.
pub fn layout(spec: &SectorSpec, n: usize) -> Vec<Point> {
    packing::pack(spec, n)
}
