//! Even packing of a fixed number of points into an annular sector.
//!
//! Points are laid on concentric rings. A binary search (see [`fit_rings`]) picks the ring
//! spacing so that the radial gap between rings matches the arc gap between neighbours on a
//! ring. Each ring then receives as many evenly spaced points as its arc allows minus one slot
//! of slack; the remaining points go one per ring, largest unused arc first, at the start angle.

mod ring_fit;

pub use ring_fit::{RingFit, fit_rings};

use crate::geometry::{Point, SectorSpec};
use serde::Serialize;

/// Circle constant used for every arc length. Layouts depend on this exact four-decimal
/// value.
pub const TAU_APPROX: f64 = 6.2832;

/// Absolute width at which the ring-spacing search stops.
pub const SEARCH_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub radius: f64,
    pub arc_length: f64,
    /// Angular step between neighbouring points on this ring, in degrees.
    pub unit_angle_deg: f64,
    /// `floor(arc_length / point_arc) - 1`; negative when the ring is shorter than one gap.
    pub slots: i64,
    /// Arc length left unused by `slots` points.
    pub leftover: f64,
}

impl Ring {
    /// Number of points placed along the arc.
    pub fn placed(&self) -> usize {
        self.slots.max(0) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingPlan {
    pub fit: RingFit,
    pub rings: Vec<Ring>,
}

impl RingPlan {
    /// Points placed along ring arcs, before leftover distribution.
    pub fn arc_points(&self) -> usize {
        self.rings.iter().map(Ring::placed).sum()
    }

    /// Ring indices ordered by descending leftover arc. Ties keep ring order.
    pub fn leftover_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rings.len()).collect();
        order.sort_by(|&a, &b| self.rings[b].leftover.total_cmp(&self.rings[a].leftover));
        order
    }

    /// Whether the fit produced usable rings. A zero spacing means every ring would sit on the
    /// inner radius.
    pub fn is_degenerate(&self) -> bool {
        self.rings.is_empty() || self.fit.spacing <= 0.0
    }
}

/// Lays out the rings for `n` points without placing the points.
pub fn plan(spec: &SectorSpec, n: usize) -> RingPlan {
    let fit = fit_rings(spec, n);
    let span = spec.span_deg();
    let point_arc = fit.point_arc;
    let usable_arc = point_arc.is_finite() && point_arc > 0.0;

    let mut rings = Vec::with_capacity(fit.ring_count);
    let mut radius = spec.inner_radius();
    for _ in 0..fit.ring_count {
        radius += fit.spacing;
        let arc_length = TAU_APPROX * radius * span / 360.0;
        let ring = if usable_arc && radius > 0.0 {
            let slots = (arc_length / point_arc).floor() as i64 - 1;
            Ring {
                radius,
                arc_length,
                unit_angle_deg: point_arc / TAU_APPROX / radius * 360.0,
                slots,
                leftover: arc_length - slots as f64 * point_arc,
            }
        } else {
            Ring {
                radius,
                arc_length,
                unit_angle_deg: 0.0,
                slots: 0,
                leftover: arc_length,
            }
        };
        rings.push(ring);
    }

    RingPlan { fit, rings }
}

/// Computes `n` target points filling `spec`.
///
/// The order is ring by ring (inner first, counter-clockwise from the start angle), followed by
/// the leftover points. Identical inputs always yield identical output.
pub fn pack(spec: &SectorSpec, n: usize) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }

    let plan = plan(spec, n);
    if plan.is_degenerate() {
        return pack_single_ring(spec, n);
    }

    let start = spec.start_angle_deg();
    let mut points = Vec::with_capacity(n);
    for ring in &plan.rings {
        let mut angle = start;
        for _ in 0..ring.placed() {
            angle += ring.unit_angle_deg;
            points.push(Point::from_polar(ring.radius, angle));
        }
    }

    let order = plan.leftover_order();
    let remaining = n.saturating_sub(points.len());
    if remaining > order.len() {
        tracing::debug!(
            remaining,
            rings = order.len(),
            "more leftover points than rings; cycling leftover order"
        );
    }
    points.extend(
        order
            .iter()
            .cycle()
            .take(remaining)
            .map(|&idx| Point::from_polar(plan.rings[idx].radius, start)),
    );

    points.truncate(n);
    points
}

/// Same as [`pack`], split into parallel `x` / `y` arrays.
pub fn pack_xy(spec: &SectorSpec, n: usize) -> (Vec<f64>, Vec<f64>) {
    pack(spec, n).into_iter().map(|p| (p.x, p.y)).unzip()
}

/// Fallback for sectors without room for a ring: spread the points along the inner radius.
fn pack_single_ring(spec: &SectorSpec, n: usize) -> Vec<Point> {
    tracing::debug!(
        n,
        depth = spec.depth(),
        "sector has no usable ring spacing; packing onto the inner radius"
    );
    let start = spec.start_angle_deg();
    let step = spec.span_deg() / n as f64;
    (0..n)
        .map(|j| Point::from_polar(spec.inner_radius(), start + step * j as f64))
        .collect()
}
