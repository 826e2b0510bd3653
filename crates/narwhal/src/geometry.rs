use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts a polar coordinate (angle in degrees, counter-clockwise from +x) to Cartesian.
    pub fn from_polar(radius: f64, angle_deg: f64) -> Self {
        let theta = angle_deg * std::f64::consts::PI / 180.0;
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle in degrees, in `(-180, 180]`.
    pub fn angle_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // `rem_euclid` can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

/// An annular sector: the region between two radii and two angles around the origin.
///
/// Angles are in degrees, counter-clockwise from the positive x-axis. Only the absolute
/// difference between them matters for packing; `start_angle_deg` anchors the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSectorSpec")]
pub struct SectorSpec {
    inner_radius: f64,
    outer_radius: f64,
    start_angle_deg: f64,
    end_angle_deg: f64,
}

impl SectorSpec {
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
    ) -> Result<Self> {
        for (field, value) in [
            ("inner radius", inner_radius),
            ("outer radius", outer_radius),
            ("start angle", start_angle_deg),
            ("end angle", end_angle_deg),
        ] {
            if !value.is_finite() {
                return Err(Error::NonFinite { field, value });
            }
        }
        if inner_radius < 0.0 {
            return Err(Error::NegativeRadius {
                inner: inner_radius,
            });
        }
        if outer_radius < inner_radius {
            return Err(Error::InvertedRadii {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self {
            inner_radius,
            outer_radius,
            start_angle_deg,
            end_angle_deg,
        })
    }

    /// A full ring (`[0, 360]` degrees).
    pub fn full(inner_radius: f64, outer_radius: f64) -> Result<Self> {
        Self::new(inner_radius, outer_radius, 0.0, 360.0)
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn start_angle_deg(&self) -> f64 {
        self.start_angle_deg
    }

    pub fn end_angle_deg(&self) -> f64 {
        self.end_angle_deg
    }

    pub fn radii(&self) -> [f64; 2] {
        [self.inner_radius, self.outer_radius]
    }

    pub fn angles(&self) -> [f64; 2] {
        [self.start_angle_deg, self.end_angle_deg]
    }

    /// Usable radial depth.
    pub fn depth(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    pub fn span_deg(&self) -> f64 {
        (self.end_angle_deg - self.start_angle_deg).abs()
    }

    /// Fraction of the full circle covered by the span.
    pub fn span_fraction(&self) -> f64 {
        self.span_deg() / 360.0
    }

    /// Whether `p` lies inside the sector, allowing `tolerance` both radially (length units) and
    /// angularly (degrees). Angles are measured counter-clockwise from the start angle.
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        let r = p.radius();
        if r < self.inner_radius - tolerance || r > self.outer_radius + tolerance {
            return false;
        }
        let span = self.span_deg();
        if span >= 360.0 || r <= tolerance {
            return true;
        }
        let rel = normalize_deg(p.angle_deg() - self.start_angle_deg);
        rel <= span + tolerance || rel >= 360.0 - tolerance
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSectorSpec {
    inner_radius: f64,
    outer_radius: f64,
    #[serde(default)]
    start_angle_deg: f64,
    #[serde(default = "full_turn")]
    end_angle_deg: f64,
}

fn full_turn() -> f64 {
    360.0
}

impl TryFrom<RawSectorSpec> for SectorSpec {
    type Error = Error;

    fn try_from(raw: RawSectorSpec) -> Result<Self> {
        Self::new(
            raw.inner_radius,
            raw.outer_radius,
            raw.start_angle_deg,
            raw.end_angle_deg,
        )
    }
}
