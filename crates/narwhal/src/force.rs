//! Sector attraction force for external force-simulation engines.
//!
//! [`SectorForce`] owns the packed target points for the current node list and, once per
//! simulation tick, nudges each node's velocity toward its target. Integration, cooling and
//! every other force remain the engine's job.

use crate::error::Result;
use crate::geometry::{Point, SectorSpec};
use crate::packing;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_STRENGTH: f64 = 0.1;

/// What the force needs from a simulation node.
pub trait SimNode {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    /// Adds to the node's velocity.
    fn accelerate(&mut self, dvx: f64, dvy: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Particle {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }
}

impl SimNode for Particle {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn accelerate(&mut self, dvx: f64, dvy: f64) {
        self.vx += dvx;
        self.vy += dvy;
    }
}

pub type StrengthFn<N> = dyn Fn(&N, usize, &[N]) -> f64 + Send + Sync;

/// Pull strength, either shared by every node or evaluated per node.
pub enum Strength<N> {
    Constant(f64),
    /// Called as `f(node, index, all_nodes)`.
    PerNode(Arc<StrengthFn<N>>),
}

impl<N> Strength<N> {
    pub fn per_node(f: impl Fn(&N, usize, &[N]) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerNode(Arc::new(f))
    }

    fn evaluate(&self, nodes: &[N]) -> Vec<f64> {
        match self {
            Self::Constant(s) => vec![*s; nodes.len()],
            Self::PerNode(f) => nodes
                .iter()
                .enumerate()
                .map(|(i, node)| f(node, i, nodes))
                .collect(),
        }
    }
}

impl<N> Default for Strength<N> {
    fn default() -> Self {
        Self::Constant(DEFAULT_STRENGTH)
    }
}

impl<N> Clone for Strength<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(s) => Self::Constant(*s),
            Self::PerNode(f) => Self::PerNode(Arc::clone(f)),
        }
    }
}

impl<N> fmt::Debug for Strength<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(s) => f.debug_tuple("Constant").field(s).finish(),
            Self::PerNode(_) => f.write_str("PerNode(..)"),
        }
    }
}

impl<N> From<f64> for Strength<N> {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

/// Attracts each node toward its packed slot inside a circular sector.
///
/// Any setter recomputes the target points for the last initialized node count.
#[derive(Debug, Clone)]
pub struct SectorForce<N> {
    spec: SectorSpec,
    strength: Strength<N>,
    node_count: usize,
    xz: Vec<f64>,
    yz: Vec<f64>,
    strengths: Vec<f64>,
    strengths_stale: bool,
}

impl<N> SectorForce<N> {
    /// A full-circle sector force between `inner` and `outer`.
    pub fn new(inner: f64, outer: f64) -> Result<Self> {
        Ok(Self::from_spec(SectorSpec::full(inner, outer)?))
    }

    pub fn from_spec(spec: SectorSpec) -> Self {
        Self {
            spec,
            strength: Strength::default(),
            node_count: 0,
            xz: Vec::new(),
            yz: Vec::new(),
            strengths: Vec::new(),
            strengths_stale: false,
        }
    }

    pub fn spec(&self) -> &SectorSpec {
        &self.spec
    }

    pub fn radiuses(&self) -> [f64; 2] {
        self.spec.radii()
    }

    pub fn angles(&self) -> [f64; 2] {
        self.spec.angles()
    }

    pub fn strength(&self) -> &Strength<N> {
        &self.strength
    }

    pub fn set_radiuses(&mut self, radiuses: [f64; 2]) -> Result<&mut Self> {
        let [start, end] = self.spec.angles();
        self.spec = SectorSpec::new(radiuses[0], radiuses[1], start, end)?;
        self.recompute_targets();
        Ok(self)
    }

    pub fn set_angles(&mut self, angles: [f64; 2]) -> Result<&mut Self> {
        let [inner, outer] = self.spec.radii();
        self.spec = SectorSpec::new(inner, outer, angles[0], angles[1])?;
        self.recompute_targets();
        Ok(self)
    }

    /// Constant strengths apply immediately; per-node functions are evaluated on the next
    /// [`initialize`](Self::initialize) or [`apply`](Self::apply), which provide the nodes.
    pub fn set_strength(&mut self, strength: impl Into<Strength<N>>) -> &mut Self {
        self.strength = strength.into();
        match &self.strength {
            Strength::Constant(s) => {
                self.strengths = vec![*s; self.node_count];
                self.strengths_stale = false;
            }
            Strength::PerNode(_) => self.strengths_stale = true,
        }
        self
    }

    /// Binds the force to a node list, recomputing every target and strength.
    pub fn initialize(&mut self, nodes: &[N]) {
        self.node_count = nodes.len();
        self.recompute_targets();
        self.strengths = self.strength.evaluate(nodes);
        self.strengths_stale = false;
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn xz(&self) -> &[f64] {
        &self.xz
    }

    pub fn yz(&self) -> &[f64] {
        &self.yz
    }

    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }

    pub fn targets(&self) -> impl Iterator<Item = Point> + '_ {
        self.xz.iter().zip(&self.yz).map(|(&x, &y)| Point { x, y })
    }

    fn recompute_targets(&mut self) {
        let (xz, yz) = packing::pack_xy(&self.spec, self.node_count);
        self.xz = xz;
        self.yz = yz;
    }
}

impl<N: SimNode> SectorForce<N> {
    /// One simulation tick: `v += (target - position) * strength * alpha` for every node.
    pub fn apply(&mut self, nodes: &mut [N], alpha: f64) {
        if nodes.len() != self.node_count {
            tracing::debug!(
                previous = self.node_count,
                current = nodes.len(),
                "node count changed; re-initializing sector force"
            );
            self.initialize(nodes);
        } else if self.strengths_stale {
            self.strengths = self.strength.evaluate(nodes);
            self.strengths_stale = false;
        }

        for (i, node) in nodes.iter_mut().enumerate() {
            let k = self.strengths[i] * alpha;
            let dvx = (self.xz[i] - node.x()) * k;
            let dvy = (self.yz[i] - node.y()) * k;
            node.accelerate(dvx, dvy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Particle, SectorForce, Strength};

    #[test]
    fn default_strength_is_constant_point_one() {
        let force: SectorForce<Particle> = SectorForce::new(0.0, 10.0).unwrap();
        assert!(matches!(force.strength(), Strength::Constant(s) if *s == 0.1));
        assert_eq!(force.angles(), [0.0, 360.0]);
    }

    #[test]
    fn per_node_strength_is_deferred_until_nodes_are_known() {
        let mut nodes = vec![Particle::default(); 3];
        let mut force = SectorForce::new(0.0, 10.0).unwrap();
        force.initialize(&nodes);
        force.set_strength(Strength::per_node(|_: &Particle, i, _| i as f64));
        assert_eq!(force.strengths(), &[0.1, 0.1, 0.1]);

        force.apply(&mut nodes, 1.0);
        assert_eq!(force.strengths(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn strength_debug_hides_closure() {
        let s: Strength<Particle> = Strength::per_node(|_, _, _| 1.0);
        assert_eq!(format!("{s:?}"), "PerNode(..)");
    }
}
