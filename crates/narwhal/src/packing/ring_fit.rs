//! Binary search for the ring spacing that balances radial and angular gaps.

use super::{SEARCH_TOLERANCE, TAU_APPROX};
use crate::geometry::SectorSpec;
use serde::Serialize;

/// Outcome of the ring-spacing search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingFit {
    /// Radial distance between consecutive rings (the final lower bound of the search window).
    pub spacing: f64,
    /// Number of rings reported by the last probe.
    pub ring_count: usize,
    /// Arc length reserved per point, from the last probe.
    pub point_arc: f64,
    /// Number of search iterations performed.
    pub probes: usize,
}

impl RingFit {
    fn empty() -> Self {
        Self {
            spacing: 0.0,
            ring_count: 0,
            point_arc: 0.0,
            probes: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Probe {
    rings: usize,
    covered: f64,
}

/// Counts how many rings of thickness `d` fit into `depth`, by laying down doubling runs of
/// rings and backing off one power of two whenever the next run would overshoot.
fn probe_rings(d: f64, depth: f64) -> Probe {
    let mut step: i32 = 0;
    while d * 2f64.powi(step) <= depth {
        step += 1;
    }

    let mut covered = 0.0;
    let mut rings: usize = 0;
    while step >= 0 {
        let run = d * 2f64.powi(step);
        if covered + run <= depth {
            covered += run;
            rings += 1usize << step;
        } else {
            step -= 1;
        }
    }
    Probe { rings, covered }
}

/// Searches for the ring spacing `d` at which the spacing equals the mean arc length available
/// per point, treating each ring as consuming one extra slot.
pub fn fit_rings(spec: &SectorSpec, n: usize) -> RingFit {
    let depth = spec.depth();
    if n == 0 || depth <= 0.0 {
        return RingFit::empty();
    }

    let inner = spec.inner_radius();
    let fraction = spec.span_fraction();

    let mut lo = 0.0_f64;
    let mut hi = depth;
    let mut fit = RingFit::empty();
    while hi - lo > SEARCH_TOLERANCE {
        let d = (lo + hi) / 2.0;
        let Probe { rings, covered } = probe_rings(d, depth);

        // Mean ring radius is `inner + (d + covered) / 2`.
        let total_arc = TAU_APPROX * fraction * (inner + inner + covered + d) * rings as f64 / 2.0;
        let point_arc = total_arc / (n + rings) as f64;

        if d > point_arc {
            hi = d;
        } else {
            lo = d;
        }
        fit.ring_count = rings;
        fit.point_arc = point_arc;
        fit.probes += 1;
    }
    fit.spacing = lo;

    tracing::debug!(
        n,
        probes = fit.probes,
        ring_count = fit.ring_count,
        spacing = fit.spacing,
        point_arc = fit.point_arc,
        "sector ring fit"
    );
    fit
}
